//! Greeter RPC server.
//!
//! Serves `hello.Greeter` (and reflection, for `grpcurl`) on
//! `127.0.0.1:50051` until killed. Ctrl+C shuts down gracefully.
//!
//! Run with: cargo run --bin greeter_server
//!
//! Set `GREETER_LISTEN_ADDR` to bind elsewhere.
mod common;

use anyhow::Context;
use hello_rpc::{RpcConfig, RpcServer};

#[tokio::main]
async fn main() {
    // ---
    common::init_logging();

    if let Err(err) = run().await {
        common::fatal(err);
    }
}

async fn run() -> anyhow::Result<()> {
    // ---
    let config = RpcConfig::from_env();

    let server = RpcServer::bind(&config)
        .await
        .context("failed to listen")?;

    log::info!("Server listening at {}", server.local_addr());

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl+C, shutting down...");
            shutdown.shutdown();
        }
    });

    server.run().await.context("failed to serve")?;

    Ok(())
}
