//! Process plumbing shared by the greeter binaries.

/// Route `log` records (and `tracing` events bridged to them) to stderr.
///
/// Defaults to `info` so greetings are visible; `RUST_LOG` overrides.
pub fn init_logging() {
    // ---
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Log `err` with its full context chain and terminate with status 1.
pub fn fatal(err: anyhow::Error) -> ! {
    // ---
    log::error!("{err:#}");
    std::process::exit(1)
}
