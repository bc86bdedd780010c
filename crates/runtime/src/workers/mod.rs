//! Worker tasks that back the battle server.
//!
//! The timer worker is the only writer that acts without a player request.

mod timer;

pub use timer::TurnTimer;
