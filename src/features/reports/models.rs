use serde::{Deserialize, Serialize};

/// グラフ定義のレスポンス
///
/// それぞれPlotly互換のfigure JSONを文字列化したもの。経費がない場合はnull。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ChartsResponse {
    pub category_chart: Option<String>,
    pub daily_chart: Option<String>,
}

/// エクスポート結果
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// CSVファイル（ファイル名, 内容）
    Csv { filename: String, content: String },
    /// 出力対象がない場合のエラーメッセージ
    Empty { error: String },
}

/// エクスポートできなかった場合のレスポンス
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportErrorResponse {
    pub error: String,
}
