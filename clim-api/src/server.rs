//! Server loop.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on `addr` until Ctrl-C.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(router: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("got SIGINT, shutting down"),
        Err(e) => {
            log::error!("could not install SIGINT handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}
