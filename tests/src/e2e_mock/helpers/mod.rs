//! Helper utilities for E2E tests

/// Error type for E2E tests
#[derive(Debug, thiserror::Error)]
pub enum E2EError {
    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("Fixture failed: {0}")]
    Fixture(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type E2EResult<T> = Result<T, E2EError>;

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
