//! HTTP server lifecycle: bind, serve, graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;
use crate::utils::shutdown_signal;

/// Bind a TCP listener on the given address.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    Ok(listener)
}

/// Serve the router until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    serve_with_shutdown(listener, router, shutdown_signal()).await
}

/// Serve the router until `signal` resolves, then drain in-flight requests.
pub async fn serve_with_shutdown<F>(listener: TcpListener, router: Router, signal: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
