/// HTTPサーバーモジュール
///
/// hyperのHTTP/1サーバーで経費APIとトップページを提供します。
pub mod index_page;
pub mod responses;
pub mod router;

use crate::shared::errors::AppResult;
use crate::AppState;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

pub use router::route;

/// 指定アドレスでリスナーを作成する
///
/// # 引数
/// * `addr` - バインド先アドレス
///
/// # 戻り値
/// TCPリスナー、または失敗時はI/Oエラー
pub async fn bind(addr: SocketAddr) -> AppResult<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("HTTPサーバーを開始しました: http://{}", listener.local_addr()?);
    Ok(listener)
}

/// 接続を受け付けてリクエストを処理する
///
/// `shutdown`が完了すると新規接続の受け付けを止めて戻る。
///
/// # 引数
/// * `listener` - TCPリスナー
/// * `state` - アプリケーション状態
/// * `shutdown` - 停止を通知するFuture
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    log::debug!("接続を受け付けました: {peer}");
                    let state = Arc::clone(&state);
                    tokio::spawn(async move {
                        handle_connection(stream, state).await;
                    });
                }
                Err(e) => {
                    log::error!("接続受け入れエラー: {e}");
                }
            },
            _ = &mut shutdown => {
                log::info!("HTTPサーバーを停止します");
                break;
            }
        }
    }

    Ok(())
}

/// TCP接続を処理する
async fn handle_connection(stream: TcpStream, state: Arc<AppState>) {
    let io = TokioIo::new(stream);

    let service = service_fn(move |req| router::handle_request(req, Arc::clone(&state)));

    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        log::error!("HTTP接続処理エラー: {err}");
    }
}
