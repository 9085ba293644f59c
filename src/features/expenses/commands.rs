use crate::features::expenses::models::{CreateExpenseDto, Expense, ExpenseStats};
use crate::shared::errors::AppResult;
use crate::AppState;

/// 経費を作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `dto` - 経費作成用DTO
///
/// # 戻り値
/// 作成された経費、または失敗時はエラー
pub fn create_expense(state: &AppState, dto: CreateExpenseDto) -> AppResult<Expense> {
    let store = state.lock_store()?;
    store.add(dto)
}

/// 経費一覧を取得する（登録順）
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 経費のリスト、または失敗時はエラー
pub fn get_expenses(state: &AppState) -> AppResult<Vec<Expense>> {
    let store = state.lock_store()?;
    store.list_all()
}

/// 経費を削除する
///
/// 存在しないIDでも成功として扱う。
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `id` - 経費ID
pub fn delete_expense(state: &AppState, id: i64) -> AppResult<()> {
    let store = state.lock_store()?;
    store.delete_by_id(id)?;
    Ok(())
}

/// 経費の統計情報を取得する
pub fn get_stats(state: &AppState) -> AppResult<ExpenseStats> {
    let store = state.lock_store()?;
    store.stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::expenses::models::AmountInput;
    use crate::features::expenses::repository::ExpenseStore;
    use chrono_tz::Tz;
    use tempfile::TempDir;

    fn create_test_state() -> (TempDir, AppState) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"), Tz::UTC);
        (temp_dir, AppState::new(store))
    }

    fn dto(amount: &str) -> CreateExpenseDto {
        CreateExpenseDto {
            date: Some("2024-08-10".to_string()),
            amount: Some(AmountInput::Text(amount.to_string())),
            category: Some("宿泊".to_string()),
            place: Some("札幌".to_string()),
            description: Some("ホテル".to_string()),
        }
    }

    #[test]
    fn test_expense_commands() {
        let (_dir, state) = create_test_state();

        let created = create_expense(&state, dto("8000")).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(get_expenses(&state).unwrap().len(), 1);

        let stats = get_stats(&state).unwrap();
        assert_eq!(stats.total_spent, 8000.0);
        assert_eq!(stats.top_category, "宿泊");

        delete_expense(&state, created.id).unwrap();
        delete_expense(&state, created.id).unwrap();
        assert!(get_expenses(&state).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_creates_do_not_lose_updates() {
        let (_dir, state) = create_test_state();
        let state = std::sync::Arc::new(state);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = std::sync::Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..5 {
                        create_expense(&state, dto("1")).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expenses = get_expenses(&state).unwrap();
        assert_eq!(expenses.len(), 40);
        let ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }
}
