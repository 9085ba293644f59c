use crate::features::reports::charts;
use crate::features::reports::csv_export::{self, EXPORT_FILENAME};
use crate::features::reports::models::{ChartsResponse, ExportOutcome};
use crate::shared::errors::{AppError, AppResult};
use crate::AppState;

/// グラフ定義を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// カテゴリ別・日別のグラフ定義、または失敗時はエラー
pub fn get_charts(state: &AppState) -> AppResult<ChartsResponse> {
    let expenses = state.lock_store()?.list_all()?;
    charts::render_charts(&expenses)
}

/// 経費データをCSVでエクスポートする
///
/// 経費が空の場合はエラーにせず、エラーメッセージを結果として返す。
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// CSVファイル、または出力対象がない旨
pub fn export_expenses(state: &AppState) -> AppResult<ExportOutcome> {
    let expenses = state.lock_store()?.list_all()?;

    match csv_export::write_csv(&expenses) {
        Ok(content) => {
            log::info!("経費をエクスポートしました: {}件", expenses.len());
            Ok(ExportOutcome::Csv {
                filename: EXPORT_FILENAME.to_string(),
                content,
            })
        }
        Err(AppError::EmptyStore) => {
            log::debug!("エクスポート対象の経費がありません");
            Ok(ExportOutcome::Empty {
                error: AppError::EmptyStore.user_message().to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::expenses::models::{AmountInput, CreateExpenseDto};
    use crate::features::expenses::repository::ExpenseStore;
    use chrono_tz::Tz;
    use tempfile::TempDir;

    fn create_test_state() -> (TempDir, AppState) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"), Tz::UTC);
        (temp_dir, AppState::new(store))
    }

    fn add(state: &AppState, date: &str, amount: f64, category: &str) {
        let dto = CreateExpenseDto {
            date: Some(date.to_string()),
            amount: Some(AmountInput::Number(amount)),
            category: Some(category.to_string()),
            place: Some("函館".to_string()),
            description: Some("テスト".to_string()),
        };
        state.lock_store().unwrap().add(dto).unwrap();
    }

    #[test]
    fn test_export_on_empty_store() {
        let (_dir, state) = create_test_state();

        let outcome = export_expenses(&state).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Empty {
                error: "エクスポートする経費がありません".to_string()
            }
        );
    }

    #[test]
    fn test_export_with_expenses() {
        let (_dir, state) = create_test_state();
        add(&state, "2024-01-01", 10.0, "food");

        match export_expenses(&state).unwrap() {
            ExportOutcome::Csv { filename, content } => {
                assert_eq!(filename, "family-trip-expenses.csv");
                assert!(content.starts_with("id,date,amount,category,place,description,timestamp"));
                assert_eq!(content.lines().count(), 2);
            }
            other => panic!("CSVが返されるべきです: {other:?}"),
        }
    }

    #[test]
    fn test_get_charts() {
        let (_dir, state) = create_test_state();
        assert_eq!(get_charts(&state).unwrap(), ChartsResponse::default());

        add(&state, "2024-01-01", 10.0, "food");
        let charts = get_charts(&state).unwrap();
        assert!(charts.category_chart.is_some());
        assert!(charts.daily_chart.is_some());
    }
}
