use crate::shared::errors::AppResult;
use crate::shared::utils::{ensure_finite_amount, normalize_date, parse_amount, require_field};
use serde::{Deserialize, Serialize};

/// 経費データモデル
///
/// フィールドの並び順はJSONファイルとCSVエクスポートの列順を兼ねる。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub place: String,
    pub description: String,
    pub timestamp: String,
}

/// 金額の入力値（数値または数値文字列）
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// 入力値を金額に変換する
    ///
    /// # 戻り値
    /// 有限の金額、変換できない場合はバリデーションエラー
    pub fn to_amount(&self) -> AppResult<f64> {
        match self {
            AmountInput::Number(value) => ensure_finite_amount(*value),
            AmountInput::Text(text) => parse_amount(text),
        }
    }
}

/// 経費作成用DTO
///
/// 欠落したフィールドをバリデーションエラーとして返すため、
/// すべてのフィールドをOptionで受け取る。
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CreateExpenseDto {
    pub date: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub place: Option<String>,
    pub description: Option<String>,
}

/// バリデーション済みの経費入力（IDとタイムスタンプは未採番）
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub place: String,
    pub description: String,
}

impl CreateExpenseDto {
    /// DTOを検証して経費入力に変換する
    ///
    /// # 戻り値
    /// バリデーション済みの経費入力、または失敗時はバリデーションエラー
    ///
    /// # バリデーション規則
    /// - 日付・金額・カテゴリ・場所・説明はすべて必須
    /// - 金額は数値または数値文字列
    /// - 日付はYYYY-MM-DD形式
    pub fn validate(self) -> AppResult<NewExpense> {
        let date = normalize_date(&require_field(self.date, "日付")?)?;
        let amount = require_field(self.amount, "金額")?.to_amount()?;
        let category = require_field(self.category, "カテゴリ")?;
        let place = require_field(self.place, "場所")?;
        let description = require_field(self.description, "説明")?;

        Ok(NewExpense {
            date,
            amount,
            category,
            place,
            description,
        })
    }
}

impl NewExpense {
    /// IDとタイムスタンプを付与して経費レコードにする
    pub fn into_expense(self, id: i64, timestamp: String) -> Expense {
        Expense {
            id,
            date: self.date,
            amount: self.amount,
            category: self.category,
            place: self.place,
            description: self.description,
            timestamp,
        }
    }
}

/// 経費の集計結果
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExpenseStats {
    pub total_spent: f64,
    pub daily_average: f64,
    pub total_expenses: usize,
    pub top_category: String,
}
