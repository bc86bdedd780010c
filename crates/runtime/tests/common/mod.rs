//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use arena_core::{
    ActionKind, ActionRequest, BattleStats, Creature, CreatureId, Difficulty, Form, GameConfig,
    Growth, Rarity, SideSetup,
};
use arena_runtime::{BattleId, BattleServer, Clock, RuntimeConfig};

pub fn creature(id: u32, species: &str, health: u32, attack: u32, energy_cost: u32) -> Creature {
    Creature::new(
        CreatureId(id),
        species,
        Growth::new(Form(1), Rarity::Common, 0),
        BattleStats {
            max_health: health,
            physical_attack: attack,
            magical_attack: attack / 2,
            physical_defense: 8,
            magical_defense: 4,
            initiative: 10,
            energy_cost,
        },
    )
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig::default()
        .with_poll_interval(Duration::from_millis(1))
        .with_timer_sweep_interval(Duration::from_millis(5))
}

pub fn server() -> BattleServer {
    BattleServer::new(runtime_config())
}

pub fn server_with_clock(clock: Arc<dyn Clock>) -> BattleServer {
    BattleServer::with_clock(runtime_config(), clock)
}

pub async fn host(
    server: &BattleServer,
    rules: GameConfig,
    side_a: SideSetup,
    side_b: SideSetup,
) -> BattleId {
    server
        .create_battle(rules, Difficulty::Easy, side_a, side_b)
        .await
        .expect("battle should be created")
}

pub fn deploy(id: u32) -> ActionRequest {
    ActionRequest {
        creature_id: Some(CreatureId(id)),
        ..ActionRequest::new(ActionKind::Deploy)
    }
}

pub fn attack(attacker: u32, target: u32) -> ActionRequest {
    ActionRequest {
        creature_id: Some(CreatureId(attacker)),
        target_id: Some(CreatureId(target)),
        ..ActionRequest::new(ActionKind::Attack)
    }
}

pub fn end_turn() -> ActionRequest {
    ActionRequest::new(ActionKind::EndTurn)
}
