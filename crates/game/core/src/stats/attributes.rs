//! Raw creature attributes as they arrive from the catalog.
//!
//! The catalog is an external collaborator, so every attribute is optional
//! here; [`CoreAttributes::from_bag`] is the single place that decides which
//! ones are required.

use super::derive::StatsError;

/// Rarity tier. Declaration order is the ordinal order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// `More` multiplier in percent applied to every derived stat.
    pub const fn multiplier_pct(self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 15,
            Rarity::Epic => 35,
            Rarity::Legendary => 60,
        }
    }
}

/// Maturity tier of a creature. `0` is an egg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Form(pub u8);

impl Form {
    pub const EGG: Self = Self(0);

    pub const fn is_egg(self) -> bool {
        self.0 == 0
    }

    /// `More` multiplier in percent: eggs fight at 60%, each tier above the
    /// first adds 25%.
    pub const fn multiplier_pct(self) -> i32 {
        if self.is_egg() {
            -40
        } else {
            25 * (self.0 as i32 - 1)
        }
    }

    /// Extra energy paid to deploy a creature whose cost is catalogued.
    pub const fn energy_surcharge(self) -> u32 {
        self.0.saturating_sub(1) as u32
    }
}

/// Attribute bag for one creature, exactly as the catalog provides it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseAttributes {
    pub strength: Option<u32>,
    pub magic: Option<u32>,
    pub stamina: Option<u32>,
    pub speed: Option<u32>,
    /// Innate energy affinity; optional, feeds magical stats.
    pub energy: Option<u32>,
    /// Catalogued deploy cost before form surcharge.
    pub energy_cost: Option<u32>,
}

impl BaseAttributes {
    /// Bag with all four required attributes set.
    pub fn new(strength: u32, magic: u32, stamina: u32, speed: u32) -> Self {
        Self {
            strength: Some(strength),
            magic: Some(magic),
            stamina: Some(stamina),
            speed: Some(speed),
            energy: None,
            energy_cost: None,
        }
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_energy_cost(mut self, energy_cost: u32) -> Self {
        self.energy_cost = Some(energy_cost);
        self
    }
}

/// Validated attributes, the input layer of stat derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreAttributes {
    pub strength: i32,
    pub magic: i32,
    pub stamina: i32,
    pub speed: i32,
    pub energy: i32,
}

impl CoreAttributes {
    /// Attribute values above this are clamped before any arithmetic.
    pub const MAX_ATTRIBUTE: u32 = 9999;

    /// Validates the bag; the four combat attributes are mandatory.
    pub fn from_bag(bag: &BaseAttributes) -> Result<Self, StatsError> {
        let require = |value: Option<u32>, name: &'static str| {
            value
                .map(|v| v.min(Self::MAX_ATTRIBUTE) as i32)
                .ok_or(StatsError::InvalidCreatureData { missing: name })
        };

        Ok(Self {
            strength: require(bag.strength, "strength")?,
            magic: require(bag.magic, "magic")?,
            stamina: require(bag.stamina, "stamina")?,
            speed: require(bag.speed, "speed")?,
            energy: bag.energy.unwrap_or(0).min(Self::MAX_ATTRIBUTE) as i32,
        })
    }
}
