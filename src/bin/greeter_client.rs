//! Greeter RPC client.
//!
//! Greets the name given as the first argument (default `world`) with
//! `SayHello` and then `SayHelloAgain`, both under one 1 second deadline.
//! Any failure is logged and ends the process with status 1.
//!
//! Run with: cargo run --bin greeter_client -- Ada
//!
//! Requires: greeter_server running (set `GREETER_ADDR` if not on localhost:50051)
mod common;

use anyhow::Context;
use hello_rpc::{greeted_name, Deadline, Greeting, RpcClient, RpcConfig};

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
    let name = greeted_name(std::env::args());

    let mut client = RpcClient::connect(&config)
        .await
        .context("did not connect")?;

    // One budget for both calls; the second may already be out of time.
    let deadline = Deadline::after(config.request_timeout);

    for greeting in Greeting::ALL {
        let message = client
            .greet(greeting, &name, &deadline)
            .await
            .context(greeting.failure_context())?;

        log::info!("{}: {message}", greeting.log_label());
    }

    Ok(())
}
