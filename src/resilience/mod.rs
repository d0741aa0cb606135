//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream call:
//!     → reqwest client (connect timeout + per-attempt request timeout)
//!     → on 429: retries.rs (fixed delay, bounded retry count)
//!     → on exhaustion: ServiceUnavailable
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream attempt has a deadline
//! - The retry loop sits on top of the attempt timeout, not inside it
//! - Retries are invisible to callers except as latency

pub mod retries;

pub use retries::{AttemptError, RetryPolicy};
