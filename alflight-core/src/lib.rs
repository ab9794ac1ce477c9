//! ALFlight Core - Shared diagnostic types
//!
//! This crate provides the types shared by the unit and aircraft crates:
//! - `Diagnostic`: Structured, non-fatal report of degraded data
//! - `Severity`: How degraded the result is
//! - `codes`: Machine-readable diagnostic codes

mod diagnostic;

pub use diagnostic::{codes, Diagnostic, Diagnostics, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Diagnostic, Diagnostics, Severity};
    pub use crate::diagnostic::codes;
}
