//! Stat derivation.
//!
//! ```text
//! [ BaseAttributes (catalog bag) ]
//!      ↓ validate
//! [ CoreAttributes ]
//!      ↓ Growth bonus stack (combination %Inc → form More → rarity More)
//! [ BattleStats ]  cached on the creature instance
//! ```
//!
//! Every layer is a pure function; the only failure is missing catalog data.

pub mod attributes;
pub mod bonus;
pub mod derive;

pub use attributes::{BaseAttributes, CoreAttributes, Form, Rarity};
pub use bonus::{Bonus, BonusStack, StatBounds};
pub use derive::{BattleStats, Growth, StatsError, derive_stats};
