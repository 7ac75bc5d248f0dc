//! Session Crate - Drawing formulas against shared declarations
//!
//! Builds on the `formula` parser with the state of a writing session:
//! - Formulas corrected symbol by symbol as they are drawn
//! - A registry of declared constants and functions with change propagation
//! - Translation of parsed formulas into solver requests

pub mod drawing;
pub mod error;
pub mod registry;
pub mod request;
pub mod session;

pub use drawing::Formula;
pub use error::*;
pub use registry::{IdentifierRegistry, Propagation, WatcherId, BUILTIN_FUNCTIONS};
pub use request::{build_request, Declaration, Request, SOLVE_UNKNOWN};
pub use session::{Outcome, Session};

use std::path::Path;

/// Load recorded formulas from a JSON array of `{ "mode", "boxes" }` objects
pub fn load_formulas(path: &Path) -> SessionResult<Vec<Formula>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
