pub mod api;
pub mod config;
pub mod expect;
pub mod fixtures;
pub mod suite;
pub mod util;

// === CLI entrypoint ===
pub mod cli;

/// Entrypoint used by `main.rs` and tests to run the full CLI.
pub async fn run_cli() -> anyhow::Result<()> {
    cli::cli().await
}
