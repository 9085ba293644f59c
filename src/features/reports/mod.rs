/// レポート機能モジュール
///
/// 経費の集計結果をグラフ定義とCSVファイルとして出力します。
pub mod charts;
pub mod commands;
pub mod csv_export;
pub mod models;

pub use commands::{export_expenses, get_charts};
pub use models::{ChartsResponse, ExportErrorResponse, ExportOutcome};
