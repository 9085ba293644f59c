use crate::shared::errors::{AppError, AppResult};
use chrono_tz::Tz;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// デフォルトの待ち受けポート
pub const DEFAULT_PORT: u16 = 5001;

/// デフォルトのバインドアドレス（全インターフェース）
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトの経費データファイル名（作業ディレクトリ直下）
pub const DEFAULT_EXPENSES_FILE: &str = "expenses.json";

/// デフォルトのタイムゾーン
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定
    pub fn from_env() -> Self {
        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if environment == Environment::Development {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            log_level,
        }
    }

    /// 開発環境かどうかを判定
    ///
    /// # 戻り値
    /// 開発環境の場合はtrue
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 設定文字列からログレベルを決定する（不明な値はInfo）
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// HTTPサーバーと経費データファイルの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: IpAddr,
    /// 待ち受けポート
    pub port: u16,
    /// 経費データファイルのパス
    pub expenses_file: PathBuf,
    /// タイムスタンプに使用するタイムゾーン
    pub timezone: Tz,
}

impl ServerConfig {
    /// 環境変数からサーバー設定を読み込む
    ///
    /// # 戻り値
    /// サーバー設定、または値が不正な場合は設定エラー
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の取得関数からサーバー設定を組み立てる
    ///
    /// # 引数
    /// * `lookup` - 変数名から値を返す関数
    ///
    /// # 戻り値
    /// サーバー設定、または値が不正な場合は設定エラー
    ///
    /// # 読み込む変数
    /// - `HOST`（デフォルト: 0.0.0.0）
    /// - `PORT`（デフォルト: 5001）
    /// - `EXPENSES_FILE`（デフォルト: expenses.json）
    /// - `TIMEZONE`（デフォルト: UTC）
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_value = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_value.trim().parse::<IpAddr>().map_err(|e| {
            AppError::configuration(format!("HOSTの値が不正です: {host_value} ({e})"))
        })?;

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                AppError::configuration(format!("PORTの値が不正です: {value} ({e})"))
            })?,
            None => DEFAULT_PORT,
        };

        let expenses_file = lookup("EXPENSES_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPENSES_FILE));

        let timezone_value = lookup("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_value.trim().parse::<Tz>().map_err(|e| {
            AppError::configuration(format!("TIMEZONEの値が不正です: {timezone_value} ({e})"))
        })?;

        Ok(Self {
            host,
            port,
            expenses_file,
            timezone,
        })
    }

    /// バインド先のソケットアドレスを取得
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        return match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
    }

    // フォールバック: ビルド設定に基づく判定
    if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// 環境に応じた.envファイル名を取得する
///
/// # ファイル名の規則
/// - 開発環境: ".env"
/// - プロダクション環境: ".env.production"
pub fn get_env_filename(environment: &str) -> &'static str {
    match environment {
        "production" => ".env.production",
        _ => ".env",
    }
}

/// 環境に応じた.envファイルを読み込む
///
/// ログシステムの初期化前に呼ばれるため、結果はログに出さず戻り値で返す。
///
/// # 戻り値
/// 読み込んだファイル名、見つからない場合はNone
pub fn load_environment_variables() -> Option<&'static str> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    select_env_file(&environment, |file| dotenv::from_filename(file).is_ok())
}

/// 読み込みに成功した.envファイル名を返す
///
/// 環境固有のファイルがない場合はデフォルトの.envを試行する。
fn select_env_file<F>(environment: &str, mut try_load: F) -> Option<&'static str>
where
    F: FnMut(&'static str) -> bool,
{
    let env_file = get_env_filename(environment);
    if try_load(env_file) {
        return Some(env_file);
    }
    if env_file != ".env" && try_load(".env") {
        return Some(".env");
    }
    None
}

/// .envファイルの読み込み結果をログに出力する
///
/// # 引数
/// * `loaded` - `load_environment_variables`の戻り値
pub fn log_environment_file(loaded: Option<&str>) {
    match loaded {
        Some(file) => log::info!("{file}ファイルを読み込みました"),
        None => log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。"),
    }
}

/// ログシステムを初期化する
///
/// # 処理内容
/// 1. 環境設定を取得
/// 2. ログレベルを設定
/// 3. env_loggerを初期化
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    // 開発環境ではモジュールパスとミリ秒まで出力する
    let development = env_config.is_development();
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(env_config.level_filter())
        .format_module_path(development)
        .format_target(false);
    if development {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp_secs();
    }
    builder.init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );
}
