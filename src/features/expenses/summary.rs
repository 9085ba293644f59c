use crate::features::expenses::models::{Expense, ExpenseStats};
use crate::shared::utils::round_amount;
use std::collections::{BTreeMap, BTreeSet};

/// 統計に表示するカテゴリがない場合の表示値
pub const NO_CATEGORY: &str = "-";

/// カテゴリ別の合計金額を集計する
///
/// # 引数
/// * `expenses` - 経費のリスト
///
/// # 戻り値
/// カテゴリ名から合計金額へのマップ（カテゴリ名順）
pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// 日付別の合計金額を集計する
///
/// # 引数
/// * `expenses` - 経費のリスト
///
/// # 戻り値
/// (日付, 合計金額) のリスト（日付文字列の昇順）
pub fn totals_by_date(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.date.as_str()).or_insert(0.0) += expense.amount;
    }
    totals
        .into_iter()
        .map(|(date, total)| (date.to_string(), total))
        .collect()
}

/// 合計金額が最大のカテゴリを取得する
///
/// 同額の場合はカテゴリ名が辞書順で先のものを返す。
pub fn top_category(totals: &BTreeMap<String, f64>) -> Option<&str> {
    let mut top: Option<(&str, f64)> = None;
    for (category, total) in totals {
        match top {
            Some((_, best)) if *total <= best => {}
            _ => top = Some((category.as_str(), *total)),
        }
    }
    top.map(|(category, _)| category)
}

/// 経費の統計情報を算出する
///
/// # 引数
/// * `expenses` - 経費のリスト
///
/// # 戻り値
/// 合計金額・1日平均・件数・最多カテゴリ
///
/// # 算出規則
/// - 1日平均は合計金額を日付の種類数で割ったもの
/// - 金額は小数点以下2桁に丸める
/// - 経費がない場合はすべて0、カテゴリは"-"
pub fn summarize(expenses: &[Expense]) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats {
            total_spent: 0.0,
            daily_average: 0.0,
            total_expenses: 0,
            top_category: NO_CATEGORY.to_string(),
        };
    }

    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let unique_dates: BTreeSet<&str> = expenses.iter().map(|e| e.date.as_str()).collect();
    let daily_average = total / unique_dates.len() as f64;

    let category_totals = totals_by_category(expenses);
    let top_category = top_category(&category_totals)
        .unwrap_or(NO_CATEGORY)
        .to_string();

    ExpenseStats {
        total_spent: round_amount(total),
        daily_average: round_amount(daily_average),
        total_expenses: expenses.len(),
        top_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, date: &str, amount: f64, category: &str) -> Expense {
        Expense {
            id,
            date: date.to_string(),
            amount,
            category: category.to_string(),
            place: "テスト".to_string(),
            description: String::new(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_totals_by_category() {
        let expenses = vec![
            expense(1, "2024-01-01", 10.0, "food"),
            expense(2, "2024-01-01", 5.0, "food"),
            expense(3, "2024-01-02", 20.0, "fuel"),
        ];

        let totals = totals_by_category(&expenses);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["food"], 15.0);
        assert_eq!(totals["fuel"], 20.0);
    }

    #[test]
    fn test_totals_by_date_are_sorted() {
        let expenses = vec![
            expense(1, "2024-01-03", 1.0, "a"),
            expense(2, "2024-01-01", 2.0, "a"),
            expense(3, "2024-01-03", 4.0, "b"),
            expense(4, "2023-12-31", 8.0, "b"),
        ];

        let totals = totals_by_date(&expenses);
        assert_eq!(
            totals,
            vec![
                ("2023-12-31".to_string(), 8.0),
                ("2024-01-01".to_string(), 2.0),
                ("2024-01-03".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_spent, 0.0);
        assert_eq!(stats.daily_average, 0.0);
        assert_eq!(stats.total_expenses, 0);
        assert_eq!(stats.top_category, "-");
    }

    #[test]
    fn test_summarize_uses_distinct_dates() {
        let expenses = vec![
            expense(1, "2024-01-01", 10.0, "food"),
            expense(2, "2024-01-01", 5.0, "food"),
            expense(3, "2024-01-02", 3.0, "fuel"),
        ];

        let stats = summarize(&expenses);
        assert_eq!(stats.total_spent, 18.0);
        assert_eq!(stats.daily_average, 9.0);
        assert_eq!(stats.total_expenses, 3);
        assert_eq!(stats.top_category, "food");
    }

    #[test]
    fn test_summarize_rounds_to_two_decimals() {
        let expenses = vec![
            expense(1, "2024-01-01", 10.0, "food"),
            expense(2, "2024-01-02", 0.0, "food"),
            expense(3, "2024-01-03", 0.0, "food"),
        ];

        let stats = summarize(&expenses);
        assert_eq!(stats.daily_average, 3.33);
    }

    #[test]
    fn test_summarize_keeps_huge_totals_finite() {
        let expenses = vec![expense(1, "2024-01-01", 1e307, "a")];

        let stats = summarize(&expenses);
        assert_eq!(stats.total_spent, 1e307);
        assert_eq!(stats.daily_average, 1e307);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_spent"].as_f64(), Some(1e307));
        assert_eq!(json["daily_average"].as_f64(), Some(1e307));
    }

    #[test]
    fn test_top_category_tie_prefers_first_label() {
        let expenses = vec![
            expense(1, "2024-01-01", 10.0, "lodging"),
            expense(2, "2024-01-01", 10.0, "fuel"),
            expense(3, "2024-01-01", 5.0, "food"),
            expense(4, "2024-01-01", 5.0, "food"),
        ];

        // food / fuel / lodging がすべて10で同額
        assert_eq!(summarize(&expenses).top_category, "food");
    }

    #[test]
    fn test_top_category_with_negative_totals() {
        let mut totals = BTreeMap::new();
        totals.insert("refund".to_string(), -5.0);
        totals.insert("zeta".to_string(), -1.0);
        assert_eq!(top_category(&totals), Some("zeta"));

        assert_eq!(top_category(&BTreeMap::new()), None);
    }
}
