//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on hosting, workers, or player loops.

pub mod errors;
pub mod providers;

pub use errors::{Rejection, RejectionKind, Result, RuntimeError};
pub use providers::{ActionProvider, EndTurnProvider};
