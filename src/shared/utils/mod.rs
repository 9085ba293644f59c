use crate::shared::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// 日付文字列のバリデーション
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 正規化された日付文字列、無効な場合はエラー
///
/// # バリデーション規則
/// - 前後の空白は取り除く
/// - YYYY-MM-DD形式であること（文字列順が日付順と一致する）
/// - 実在する日付であること
pub fn normalize_date(date_str: &str) -> AppResult<String> {
    let date_str = date_str.trim();

    // 基本的な形式チェック
    let bytes = date_str.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(AppError::validation(
            "日付はYYYY-MM-DD形式で入力してください",
        ));
    }

    // 日付として解析可能かチェック
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation("無効な日付です"))?;

    Ok(date.format("%Y-%m-%d").to_string())
}

/// 金額文字列を数値に変換する
///
/// # 引数
/// * `text` - 金額文字列（前後の空白は許可）
///
/// # 戻り値
/// 有限の数値、変換できない場合はエラー
pub fn parse_amount(text: &str) -> AppResult<f64> {
    let amount = text
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::validation(format!("金額は数値で入力してください: {text}")))?;
    ensure_finite_amount(amount)
}

/// 金額が有限の数値であることを確認する
pub fn ensure_finite_amount(amount: f64) -> AppResult<f64> {
    if !amount.is_finite() {
        return Err(AppError::validation("無効な金額です"));
    }
    Ok(amount)
}

/// 必須フィールドの存在チェック
///
/// # 引数
/// * `value` - 検証対象の値
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 値が存在する場合はその値、欠落している場合はエラー
pub fn require_field<T>(value: Option<T>, field_name: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(format!("{field_name}は必須項目です")))
}

/// 現在の日時を指定タイムゾーンで取得
///
/// # 戻り値
/// RFC3339形式の文字列
pub fn current_timestamp(timezone: &Tz) -> String {
    Utc::now().with_timezone(timezone).to_rfc3339()
}

/// 金額を小数点以下2桁に丸める（集計結果の表示用）
///
/// 100倍で桁あふれする巨大な値はそのまま返す。
pub fn round_amount(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    if !scaled.is_finite() {
        return amount;
    }
    scaled.round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date() {
        // 有効な日付
        assert_eq!(normalize_date("2024-01-01").unwrap(), "2024-01-01");
        assert_eq!(normalize_date(" 2024-12-31 ").unwrap(), "2024-12-31");
        assert_eq!(normalize_date("2000-02-29").unwrap(), "2000-02-29"); // うるう年

        // 無効な日付
        assert!(normalize_date("2024-13-01").is_err()); // 無効な月
        assert!(normalize_date("2024-02-30").is_err()); // 無効な日
        assert!(normalize_date("2023-02-29").is_err()); // 非うるう年
        assert!(normalize_date("24-01-01").is_err()); // 形式エラー
        assert!(normalize_date("2024/01/01").is_err()); // 区切り文字エラー
        assert!(normalize_date("01/02/2024").is_err());
        assert!(normalize_date("").is_err());
        assert!(normalize_date("２０２４-01-01").is_err()); // 全角数字
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount(" 100 ").unwrap(), 100.0);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);

        assert!(matches!(parse_amount("abc"), Err(AppError::Validation(_))));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("食費"), "カテゴリ").unwrap(), "食費");

        let err = require_field::<String>(None, "カテゴリ").unwrap_err();
        assert_eq!(err.user_message(), "カテゴリは必須項目です");
    }

    #[test]
    fn test_current_timestamp() {
        let timestamp = current_timestamp(&Tz::UTC);

        // RFC3339形式であることを確認
        assert!(timestamp.contains('T'));
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());

        let tokyo = current_timestamp(&chrono_tz::Asia::Tokyo);
        assert!(tokyo.ends_with("+09:00"));
    }

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(18.0), 18.0);
        assert_eq!(round_amount(10.005_1), 10.01);
        assert_eq!(round_amount(0.1 + 0.2), 0.3);
        assert_eq!(round_amount(33.333_333), 33.33);

        // 100倍で桁あふれする値は変化しない
        assert_eq!(round_amount(1e307), 1e307);
        assert_eq!(round_amount(-f64::MAX), -f64::MAX);
    }
}
