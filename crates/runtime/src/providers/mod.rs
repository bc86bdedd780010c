//! Action provider implementations for automated players.

mod greedy;

pub use greedy::GreedyProvider;
