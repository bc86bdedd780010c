/// Battle rules: compile-time limits and runtime-tunable balance parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Energy each side holds when the battle starts.
    pub starting_energy: u32,
    /// Energy restored at the start of a side's turn.
    pub energy_regen: u32,
    /// Upper bound for a side's energy pool.
    pub energy_cap: u32,

    pub attack_cost: u32,
    pub spell_cost: u32,
    pub defend_cost: u32,

    /// Damage reduction applied to a defending target, in percent.
    pub defend_reduction_pct: u32,
    /// Lowest damage a hit can deal.
    pub minimum_damage: u32,

    /// Length of a turn window in milliseconds.
    pub turn_duration_ms: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Largest field any side can have (expert difficulty).
    pub const MAX_FIELD_SLOTS: usize = 6;
    pub const MAX_HAND_SIZE: usize = 5;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    /// Field capacity of the player side regardless of difficulty.
    pub const PLAYER_FIELD_CAPACITY: usize = 3;

    // ===== pre-battle selection limits =====
    pub const MAX_SELECTED_CREATURES: usize = 5;
    pub const MAX_SELECTED_TOOLS: usize = 3;
    pub const MAX_SELECTED_SPELLS: usize = 3;

    /// Energy cost used when a creature's attribute bag carries none.
    pub const DEFAULT_ENERGY_COST: u32 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_ENERGY: u32 = 5;
    pub const DEFAULT_ENERGY_REGEN: u32 = 3;
    pub const DEFAULT_ENERGY_CAP: u32 = 10;
    pub const DEFAULT_ATTACK_COST: u32 = 2;
    pub const DEFAULT_SPELL_COST: u32 = 4;
    pub const DEFAULT_DEFEND_COST: u32 = 1;
    pub const DEFAULT_DEFEND_REDUCTION_PCT: u32 = 50;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_TURN_DURATION_MS: u64 = 60_000;

    pub fn new() -> Self {
        Self {
            starting_energy: Self::DEFAULT_STARTING_ENERGY,
            energy_regen: Self::DEFAULT_ENERGY_REGEN,
            energy_cap: Self::DEFAULT_ENERGY_CAP,
            attack_cost: Self::DEFAULT_ATTACK_COST,
            spell_cost: Self::DEFAULT_SPELL_COST,
            defend_cost: Self::DEFAULT_DEFEND_COST,
            defend_reduction_pct: Self::DEFAULT_DEFEND_REDUCTION_PCT,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            turn_duration_ms: Self::DEFAULT_TURN_DURATION_MS,
        }
    }

    pub fn with_turn_duration_ms(mut self, turn_duration_ms: u64) -> Self {
        self.turn_duration_ms = turn_duration_ms;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
