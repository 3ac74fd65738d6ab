use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C，随后由 main 结束服务器
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, stopping the reporting service..."),
        Err(e) => {
            // 无法监听信号时不主动退出，交给服务器自身结束
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
