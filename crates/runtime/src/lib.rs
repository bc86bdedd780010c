//! Hosting runtime for two-player creature battles.
//!
//! The deterministic rules live in `arena-core`; this crate hosts many
//! battles at once and serialises the writers of each one. Clients submit
//! requests and read per-viewer projections through [`BattleServer`], a
//! background [`TurnTimer`] ends turns whose window has elapsed, and
//! observers follow progress on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`server`] owns battle state and the commit path
//! - [`api`] exposes the error and provider types downstream clients use
//! - [`events`] provides the topic-based event bus
//! - [`client`] and [`providers`] drive a player from a projection
//! - [`clock`] and [`config`] are the injected time source and settings
pub mod api;
pub mod client;
pub mod clock;
pub mod config;
pub mod events;
pub mod providers;
pub mod server;

mod workers;

pub use api::{ActionProvider, EndTurnProvider, Rejection, RejectionKind, Result, RuntimeError};
pub use client::PollingClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RuntimeConfig;
pub use events::{BattleEvent, Event, EventBus, OutcomeEvent, Topic, TurnEvent};
pub use providers::GreedyProvider;
pub use server::{BattleId, BattleServer};
pub use workers::TurnTimer;
