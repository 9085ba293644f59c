/// 経費機能モジュール
///
/// このモジュールは経費管理に関連するすべての機能を提供します：
/// - 経費の作成、一覧取得、削除
/// - 経費データのバリデーション
/// - カテゴリ別・日付別の集計と統計情報
// サブモジュールの宣言
pub mod commands;
pub mod models;
pub mod repository;
pub mod summary;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{AmountInput, CreateExpenseDto, Expense, ExpenseStats, NewExpense};

// コマンド
pub use commands::{create_expense, delete_expense, get_expenses, get_stats};

// リポジトリ（データファイル操作）
pub use repository::ExpenseStore;
