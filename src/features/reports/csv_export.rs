use crate::features::expenses::models::Expense;
use crate::shared::errors::{AppError, AppResult};

/// ダウンロード時のファイル名
pub const EXPORT_FILENAME: &str = "family-trip-expenses.csv";

/// CSVのヘッダー（`Expense`のフィールド順と一致）
pub const CSV_HEADERS: [&str; 7] = [
    "id",
    "date",
    "amount",
    "category",
    "place",
    "description",
    "timestamp",
];

/// 経費のリストをCSV文字列に変換する
///
/// # 引数
/// * `expenses` - 出力する経費のリスト（登録順）
///
/// # 戻り値
/// ヘッダー付きのCSV文字列、経費がない場合は`AppError::EmptyStore`
pub fn write_csv(expenses: &[Expense]) -> AppResult<String> {
    if expenses.is_empty() {
        return Err(AppError::EmptyStore);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for expense in expenses {
        writer.serialize(expense)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, amount: f64, description: &str) -> Expense {
        Expense {
            id,
            date: "2024-05-01".to_string(),
            amount,
            category: "food".to_string(),
            place: "Lisbon".to_string(),
            description: description.to_string(),
            timestamp: "2024-05-01T08:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_export_is_error() {
        assert!(matches!(write_csv(&[]), Err(AppError::EmptyStore)));
    }

    #[test]
    fn test_header_and_rows() {
        let csv = write_csv(&[expense(1, 12.5, "pastries"), expense(2, 3.0, "coffee")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,date,amount,category,place,description,timestamp"
        );
        assert_eq!(
            lines[1],
            "1,2024-05-01,12.5,food,Lisbon,pastries,2024-05-01T08:30:00+00:00"
        );
        assert!(lines[2].starts_with("2,2024-05-01,3.0,food"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let csv = write_csv(&[expense(1, 1.0, "bread, cheese")]).unwrap();
        assert!(csv.contains("\"bread, cheese\""));
    }

    #[test]
    fn test_header_matches_field_order() {
        let json = serde_json::to_value(expense(1, 1.0, "x")).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(|key| key.as_str())
            .collect();

        let mut expected = CSV_HEADERS.to_vec();
        expected.sort_unstable();
        let mut actual = keys.clone();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }
}
