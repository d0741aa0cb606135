//! Upstream employee API integration.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → client.rs (one HTTP attempt, timeouts, status classification)
//!     → resilience::retries (429 → wait fixed delay → retry)
//!     → employee::envelope (decode `{status, data}`)
//! ```

pub mod client;

pub use client::{ClientBuildError, UpstreamClient};
