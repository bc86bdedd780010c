//! Local arena match runner.
//!
//! This binary is the composition root: it loads rules, the catalog and both
//! selections from the data directory, hosts one battle on an in-process
//! [`BattleServer`], starts the turn timer and lets two greedy agents poll
//! and play until the battle is decided.
//!
//! # Examples
//!
//! ```bash
//! ARENA_DIFFICULTY=hard RUST_LOG=arena=debug cargo run -p arena-client
//! ```

mod config;
mod logging;

use anyhow::{Context, Result};
use arena_content::ContentFactory;
use arena_core::SideId;
use arena_runtime::{BattleServer, GreedyProvider, PollingClient, RuntimeConfig, TurnTimer};

use crate::config::ClientConfig;

/// Creature ids are assigned per side from disjoint ranges.
const PLAYER_FIRST_ID: u32 = 1;
const OPPONENT_FIRST_ID: u32 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::setup_logging()?;

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();
    tracing::info!(
        data_dir = %client_config.data_dir.display(),
        difficulty = %client_config.difficulty,
        "starting arena match"
    );

    // 2. Load content
    let content = ContentFactory::new(&client_config.data_dir);
    let rules = content.load_config().context("loading rules")?;
    let catalog = content.load_catalog().context("loading catalog")?;
    let player = content
        .load_selection(&client_config.player)
        .with_context(|| format!("loading selection `{}`", client_config.player))?;
    let opponent = content
        .load_selection(&client_config.opponent)
        .with_context(|| format!("loading selection `{}`", client_config.opponent))?;

    let side_a = catalog.build_side(&player, PLAYER_FIRST_ID)?;
    let side_b = catalog.build_side(&opponent, OPPONENT_FIRST_ID)?;

    // 3. Host the battle
    let server = BattleServer::new(runtime_config);
    let battle = server
        .create_battle(rules.clone(), client_config.difficulty, side_a, side_b)
        .await?;
    let timer = TurnTimer::spawn(server.clone());

    // 4. Play it out
    let a = PollingClient::new(
        server.clone(),
        battle,
        SideId::A,
        GreedyProvider::new(rules.clone()),
    );
    let b = PollingClient::new(server.clone(), battle, SideId::B, GreedyProvider::new(rules));
    let (a, b) = tokio::join!(a.run(), b.run());
    let (view, _) = (a?, b?);
    timer.shutdown().await?;

    for entry in &view.battle_log {
        println!("[turn {:>2}] {}", entry.turn, entry.message);
    }
    if let Some(result) = &view.result {
        println!(
            "{} wins; rating change for {}: {:+}",
            result.winner_side, view.side.id, result.rating_change
        );
    }

    Ok(())
}
