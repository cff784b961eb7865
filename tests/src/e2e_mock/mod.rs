//! Mock objects API and the tests that drive the suite against it

pub mod fixtures;
pub mod helpers;

#[cfg(test)]
mod api;

// Re-export commonly used items
pub use fixtures::{TestWorkbook, sample_rows};
pub use helpers::{E2EError, E2EResult, init_tracing};
pub use server::{MockOptions, MockServer};
