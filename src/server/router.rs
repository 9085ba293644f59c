use crate::features::expenses::{self, CreateExpenseDto};
use crate::features::reports::{self, ExportErrorResponse, ExportOutcome};
use crate::server::index_page::create_index_html;
use crate::server::responses::{csv_attachment, error_response, html_response, json_response};
use crate::shared::errors::{AppError, AppResult};
use crate::AppState;
use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response, StatusCode};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;

/// ルーティング対象のエンドポイント
#[derive(Debug, Clone, Copy, PartialEq)]
enum Endpoint {
    Index,
    Expenses,
    Expense(i64),
    Charts,
    Stats,
    Export,
}

/// パスからエンドポイントを判定する
///
/// `/api/expenses/{id}` のIDは0以上の整数のみ受け付ける。
fn match_endpoint(path: &str) -> Option<Endpoint> {
    match path {
        "/" => Some(Endpoint::Index),
        "/api/expenses" => Some(Endpoint::Expenses),
        "/api/charts" => Some(Endpoint::Charts),
        "/api/stats" => Some(Endpoint::Stats),
        "/api/export" => Some(Endpoint::Export),
        _ => {
            let id = path.strip_prefix("/api/expenses/")?;
            if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            id.parse::<i64>().ok().map(Endpoint::Expense)
        }
    }
}

/// HTTPリクエストを処理する
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<String>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            let error = AppError::validation(format!("リクエスト本文を読み込めません: {e}"));
            return Ok(error_response(&error));
        }
    };

    Ok(dispatch(state, method, path, body).await)
}

/// ファイルI/Oを伴うルーティングをブロッキング用スレッドで実行する
async fn dispatch(
    state: Arc<AppState>,
    method: Method,
    path: String,
    body: Bytes,
) -> Response<String> {
    let handle = tokio::task::spawn_blocking(move || route(&state, &method, &path, &body));

    match handle.await {
        Ok(response) => response,
        Err(e) => error_response(&AppError::concurrency(format!(
            "リクエスト処理タスクが異常終了しました: {e}"
        ))),
    }
}

/// メソッド・パス・本文からレスポンスを作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `method` - HTTPメソッド
/// * `path` - リクエストパス（クエリ文字列を含まない）
/// * `body` - リクエスト本文
pub fn route(state: &AppState, method: &Method, path: &str, body: &[u8]) -> Response<String> {
    log::debug!("リクエストを受信: {method} {path}");

    let Some(endpoint) = match_endpoint(path) else {
        return error_response(&AppError::not_found(format!("パス {path} ")));
    };

    let result = match (method, endpoint) {
        (&Method::GET, Endpoint::Index) => Ok(html_response(create_index_html())),
        (&Method::GET, Endpoint::Expenses) => {
            expenses::get_expenses(state).map(|list| json_response(StatusCode::OK, &list))
        }
        (&Method::POST, Endpoint::Expenses) => parse_create_body(body)
            .and_then(|dto| expenses::create_expense(state, dto))
            .map(|expense| {
                json_response(
                    StatusCode::OK,
                    &json!({ "success": true, "expense": expense }),
                )
            }),
        (&Method::DELETE, Endpoint::Expense(id)) => expenses::delete_expense(state, id)
            .map(|_| json_response(StatusCode::OK, &json!({ "success": true }))),
        (&Method::GET, Endpoint::Charts) => {
            reports::get_charts(state).map(|charts| json_response(StatusCode::OK, &charts))
        }
        (&Method::GET, Endpoint::Stats) => {
            expenses::get_stats(state).map(|stats| json_response(StatusCode::OK, &stats))
        }
        (&Method::GET, Endpoint::Export) => {
            reports::export_expenses(state).map(|outcome| match outcome {
                ExportOutcome::Csv { filename, content } => csv_attachment(&filename, content),
                ExportOutcome::Empty { error } => {
                    json_response(StatusCode::OK, &ExportErrorResponse { error })
                }
            })
        }
        (method, _) => Err(AppError::method_not_allowed(method.as_str())),
    };

    result.unwrap_or_else(|e| error_response(&e))
}

/// 経費作成リクエストの本文を解析する
fn parse_create_body(body: &[u8]) -> AppResult<CreateExpenseDto> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("リクエストの形式が正しくありません: {e}")))
}
