//! Employee domain subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (search / highest salary / top earners / create / delete)
//!     → upstream client (one or two round trips)
//!     → envelope.rs (single record or list)
//!     → Employee values, or an EmployeeError (error.rs)
//! ```

pub mod envelope;
pub mod error;
pub mod model;
pub mod service;

pub use envelope::{Envelope, EnvelopeData};
pub use error::{EmployeeError, EmployeeResult};
pub use model::{Employee, EmployeeInput};
pub use service::EmployeeService;
