//! Status effect tracking for creatures.
//!
//! Durations count the owning side's turns. Every effect is decremented once
//! at the start of its owner's turn and removed when it reaches zero, so an
//! effect applied with duration `n` survives exactly `n - 1` decays.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEffectKind {
    /// Cannot act at all (only end the turn).
    Stunned,
}

impl StatusEffectKind {
    /// Whether an active effect of this kind blocks every action but ending the turn.
    pub const fn prevents_actions(self) -> bool {
        match self {
            StatusEffectKind::Stunned => true,
        }
    }
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Owner turns left; always > 0 while the effect is stored.
    pub remaining: u32,
    /// Battle turn on which the effect was applied.
    pub applied_on: u32,
}

/// Why a creature cannot act right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CannotAct {
    #[error("incapacitated by {0}")]
    Incapacitated(StatusEffectKind),
    #[error("defeated")]
    Defeated,
}

/// Active status effects on one creature.
///
/// Entries of the same kind are stacked, not merged; whichever stacked entry
/// expires last governs incapacitation because queries ask "is any entry
/// active".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
    /// Cached result of the incapacitation query, refreshed on every mutation.
    incapacitated: bool,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff any stored effect prevents actions.
    pub fn is_incapacitated(&self) -> bool {
        self.incapacitated
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Longest remaining duration of `kind`, if any entry is active.
    pub fn remaining(&self, kind: StatusEffectKind) -> Option<u32> {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.remaining)
            .max()
    }

    /// Appends a new entry. A zero duration is a no-op.
    ///
    /// When every slot is taken, the entry closest to expiry is replaced if the
    /// new one outlasts it; otherwise the new entry is dropped. Either way the
    /// longest-lasting incapacitation is preserved.
    pub fn apply(&mut self, kind: StatusEffectKind, duration: u32, turn: u32) {
        if duration == 0 {
            return;
        }

        let effect = StatusEffect {
            kind,
            remaining: duration,
            applied_on: turn,
        };

        if self.effects.try_push(effect).is_err() {
            if let Some(shortest) = self.effects.iter_mut().min_by_key(|e| e.remaining) {
                if shortest.remaining < duration {
                    *shortest = effect;
                }
            }
        }

        self.refresh();
    }

    /// Decrements every entry once and drops the ones that reach zero.
    ///
    /// Returns the kinds that expired during this call.
    pub fn decay(&mut self) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        self.refresh();
        expired
    }

    /// Removes every entry.
    pub fn clear(&mut self) -> usize {
        let removed = self.effects.len();
        self.effects.clear();
        self.refresh();
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn refresh(&mut self) {
        self.incapacitated = self
            .effects
            .iter()
            .any(|e| e.kind.prevents_actions() && e.remaining > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_one_expires_after_one_decay() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Stunned, 1, 1);
        assert!(effects.is_incapacitated());

        let expired = effects.decay();

        assert_eq!(expired, vec![StatusEffectKind::Stunned]);
        assert!(effects.is_empty());
        assert!(!effects.is_incapacitated());
    }

    #[test]
    fn duration_two_survives_first_decay() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Stunned, 2, 1);

        assert!(effects.decay().is_empty());
        assert_eq!(effects.remaining(StatusEffectKind::Stunned), Some(1));
        assert!(effects.is_incapacitated());

        effects.decay();
        assert!(effects.is_empty());
    }

    #[test]
    fn stacked_entries_are_not_merged() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Stunned, 1, 1);
        effects.apply(StatusEffectKind::Stunned, 3, 2);
        assert_eq!(effects.len(), 2);

        effects.decay();
        assert_eq!(effects.len(), 1);
        assert!(effects.is_incapacitated());
    }

    #[test]
    fn zero_duration_is_ignored() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Stunned, 0, 1);
        assert!(effects.is_empty());
        assert!(!effects.is_incapacitated());
    }

    #[test]
    fn full_list_keeps_longest_entries() {
        let mut effects = StatusEffects::empty();
        for _ in 0..GameConfig::MAX_STATUS_EFFECTS {
            effects.apply(StatusEffectKind::Stunned, 1, 1);
        }

        effects.apply(StatusEffectKind::Stunned, 4, 2);

        assert_eq!(effects.len(), GameConfig::MAX_STATUS_EFFECTS);
        assert_eq!(effects.remaining(StatusEffectKind::Stunned), Some(4));
    }
}
