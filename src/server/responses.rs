use crate::shared::errors::{AppError, ErrorSeverity};
use hyper::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

const JSON_CONTENT_TYPE: &str = "application/json";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// ステータスとContent-Typeを指定してレスポンスを作成する
fn build_response(status: StatusCode, content_type: &'static str, body: String) -> Response<String> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// JSONレスポンスを作成する
///
/// # 引数
/// * `status` - HTTPステータス
/// * `payload` - シリアライズする値
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response<String> {
    match serde_json::to_string(payload) {
        Ok(body) => build_response(status, JSON_CONTENT_TYPE, body),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// エラーに対応するHTTPステータスを取得する
pub fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        AppError::EmptyStore => StatusCode::OK,
        AppError::Storage(_)
        | AppError::Configuration(_)
        | AppError::Io(_)
        | AppError::Json(_)
        | AppError::Csv(_)
        | AppError::Concurrency(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// エラーレスポンスを作成する
///
/// 詳細はログにのみ出力し、レスポンスにはユーザー向けメッセージを載せる。
pub fn error_response(error: &AppError) -> Response<String> {
    match error.severity() {
        ErrorSeverity::Low => log::warn!("リクエストエラー: {}", error.details()),
        ErrorSeverity::Medium | ErrorSeverity::High => {
            log::error!("リクエスト処理エラー: {}", error.details())
        }
    }

    let body = json!({
        "success": false,
        "error": error.user_message(),
    });
    build_response(status_for(error), JSON_CONTENT_TYPE, body.to_string())
}

/// CSVファイルの添付レスポンスを作成する
///
/// # 引数
/// * `filename` - ダウンロード時のファイル名
/// * `content` - CSV本文
pub fn csv_attachment(filename: &str, content: String) -> Response<String> {
    let mut response = build_response(StatusCode::OK, CSV_CONTENT_TYPE, content);
    let disposition = format!("attachment; filename=\"{filename}\"");
    match HeaderValue::from_str(&disposition) {
        Ok(value) => {
            response.headers_mut().insert(CONTENT_DISPOSITION, value);
        }
        Err(e) => log::warn!("Content-Dispositionを設定できません: {filename} ({e})"),
    }
    response
}

/// HTMLレスポンスを作成する
pub fn html_response(body: String) -> Response<String> {
    build_response(StatusCode::OK, HTML_CONTENT_TYPE, body)
}
