//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build client → Build service → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → trigger → server stops accepting → in-flight requests finish
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
