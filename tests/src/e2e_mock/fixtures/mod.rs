//! Test fixtures for E2E tests
//!
//! Fixtures write throwaway `.xlsx` workbooks shaped like the real test data
//! sheet so the suite can load them through its normal path.

mod workbook;

pub use workbook::*;
