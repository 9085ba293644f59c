pub mod features;
pub mod server;
pub mod shared;

use features::expenses::ExpenseStore;
use shared::{AppError, AppResult, ServerConfig};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

/// アプリケーション状態（経費ストアを保持）
///
/// ストアへのアクセスはすべてMutex経由で直列化する。
pub struct AppState {
    pub store: Mutex<ExpenseStore>,
}

impl AppState {
    /// 新しいアプリケーション状態を作成する
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// 経費ストアのロックを取得する
    ///
    /// # 戻り値
    /// ストアのガード、またはロックが壊れている場合は並行処理エラー
    pub fn lock_store(&self) -> AppResult<MutexGuard<'_, ExpenseStore>> {
        self.store
            .lock()
            .map_err(|e| AppError::concurrency(format!("経費ストアのロック取得失敗: {e}")))
    }
}

/// サーバーを起動し、`shutdown`が完了するまでリクエストを処理する
///
/// # 引数
/// * `config` - サーバー設定
/// * `shutdown` - 停止を通知するFuture
pub async fn run<F>(config: ServerConfig, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()>,
{
    log::info!("アプリケーション初期化を開始します...");
    log::info!(
        "経費データファイル: {}, タイムゾーン: {}",
        config.expenses_file.display(),
        config.timezone
    );

    let store = ExpenseStore::new(config.expenses_file.clone(), config.timezone);

    // 壊れたデータファイルでも起動は続ける（各リクエストがエラーを返す）
    match store.load() {
        Ok(expenses) => log::info!("経費データを確認しました: {}件", expenses.len()),
        Err(e) => log::error!("経費データを読み込めません: {}", e.details()),
    }

    let state = Arc::new(AppState::new(store));
    let listener = server::bind(config.socket_addr()).await?;

    log::info!("アプリケーション初期化が完了しました");
    server::serve(listener, state, shutdown).await
}
