/// 環境設定関連のモジュール
pub mod environment;

// 便利な再エクスポート
pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, log_environment_file,
    Environment, EnvironmentConfig, ServerConfig,
};
