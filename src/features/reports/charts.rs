use crate::features::expenses::models::Expense;
use crate::features::expenses::summary::{totals_by_category, totals_by_date};
use crate::features::reports::models::ChartsResponse;
use crate::shared::errors::AppResult;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// グラフの高さ（px）
const CHART_HEIGHT: u32 = 400;

/// 日別推移グラフの線の色
const TREND_LINE_COLOR: &str = "#4facfe";

/// カテゴリ別・日別のグラフ定義を生成する
///
/// グラフ定義はPlotly互換のfigure JSONを文字列化したもので、
/// 描画はフロントエンドに任せる。
///
/// # 引数
/// * `expenses` - 経費のリスト
///
/// # 戻り値
/// グラフ定義（経費がない場合はどちらもNone）
pub fn render_charts(expenses: &[Expense]) -> AppResult<ChartsResponse> {
    if expenses.is_empty() {
        return Ok(ChartsResponse::default());
    }

    let category_chart = category_figure(&totals_by_category(expenses));
    let daily_chart = daily_figure(&totals_by_date(expenses));

    Ok(ChartsResponse {
        category_chart: Some(serde_json::to_string(&category_chart)?),
        daily_chart: Some(serde_json::to_string(&daily_chart)?),
    })
}

/// カテゴリ別の円グラフ
pub fn category_figure(totals: &BTreeMap<String, f64>) -> Value {
    let labels: Vec<&str> = totals.keys().map(String::as_str).collect();
    let values: Vec<f64> = totals.values().copied().collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "title": { "text": "Spending by Category" },
        }],
        "layout": {
            "height": CHART_HEIGHT,
        },
    })
}

/// 日別支出の推移グラフ
pub fn daily_figure(totals: &[(String, f64)]) -> Value {
    let dates: Vec<&str> = totals.iter().map(|(date, _)| date.as_str()).collect();
    let amounts: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();

    json!({
        "data": [{
            "type": "scatter",
            "x": dates,
            "y": amounts,
            "mode": "lines+markers",
            "name": "Daily Spending",
            "line": { "color": TREND_LINE_COLOR, "width": 3 },
            "marker": { "size": 8 },
        }],
        "layout": {
            "title": { "text": "Daily Spending Trend" },
            "height": CHART_HEIGHT,
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": { "title": { "text": "Amount ($)" } },
        },
    })
}
