use trip_expenses_lib::shared::{
    initialize_logging_system, load_environment_variables, log_environment_file, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // LOG_LEVELを.envから読めるよう、ログ初期化より先に読み込む
    let env_file = load_environment_variables();
    initialize_logging_system();
    log_environment_file(env_file);

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("サーバー設定の読み込みに失敗しました: {}", e.details());
        e
    })?;

    trip_expenses_lib::run(config, shutdown_signal()).await?;
    Ok(())
}

/// Ctrl-Cを待つ
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("シグナルハンドラーの登録に失敗しました: {e}");
        std::future::pending::<()>().await;
    }
}
