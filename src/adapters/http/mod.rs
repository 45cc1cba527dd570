//! HTTP Adapter
//!
//! axum server exposing the token endpoint and the health probe.

mod error;
mod routes;

pub use error::error_response;
pub use routes::{create_router, AppState, HEALTH_MESSAGE, MSG_INVALID_PATH};

use anyhow::{Context, Result};
use tokio::net::TcpListener;

/// Bind `host:port`; `host` may be an IP literal or a resolvable name
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port)).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => anyhow::anyhow!(
            "Failed to bind to {}:{}: Address already in use\n\n\
             Another process is listening on port {}. Stop it or pick another port \
             with --port or the PORT environment variable.",
            host,
            port,
            port
        ),
        std::io::ErrorKind::PermissionDenied => anyhow::anyhow!(
            "Failed to bind to {}:{}: Permission denied\n\n\
             Port {} requires elevated privileges on this system. \
             Consider using a port above 1024.",
            host,
            port,
            port
        ),
        _ => anyhow::anyhow!("Failed to bind to {}:{}: {}", host, port, e),
    })
}

/// Bind `host:port` and serve until Ctrl+C
pub async fn run_server(host: &str, port: u16, state: AppState) -> Result<()> {
    let listener = bind_listener(host, port).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read bound address")?;

    let chains = state.service.allowed_chains().sorted();
    tracing::info!(address = %addr, chains = ?chains, "Server running on port {}", addr.port());

    let shutdown_signal = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Failed to install Ctrl+C handler, shutdown signal disabled");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, stopping server");
    };

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_accepts_hostname() {
        let listener = bind_listener("localhost", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_accepts_ip_literal() {
        let listener = bind_listener("127.0.0.1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_reports_port_in_use() {
        let taken = bind_listener("127.0.0.1", 0).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = bind_listener("127.0.0.1", port).await.unwrap_err();
        assert!(err.to_string().contains("Address already in use"));
    }

    #[tokio::test]
    async fn test_bind_unresolvable_host_fails() {
        assert!(bind_listener("no-such-host.invalid", 0).await.is_err());
    }
}
