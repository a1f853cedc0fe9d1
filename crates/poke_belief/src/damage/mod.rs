//! Damage calculation.
//!
//! # Architecture
//!
//! - [`DamageFormula`]: the replaceable, deterministic "how much damage does
//!   this move do in this battle" function. [`StandardFormula`] is the
//!   bundled Gen 5+ implementation.
//! - [`BeliefDamageEstimator`]: wraps a formula and marginalizes it over the
//!   belief about a defender whose spread is hidden, evaluating each likely
//!   role through a [`ShadowBattle`](crate::overlay::ShadowBattle).

mod estimator;
pub mod formula;
mod hooks;
mod modifier;
pub mod pipeline;
mod standard;

pub use estimator::{BeliefDamageEstimator, DamageResult};
pub use formula::{apply_modifier, chain_mods, get_base_damage, pokeround};
pub use hooks::{ability_hooks, item_hooks, AbilityHooks, HookContext, ItemHooks};
pub use modifier::Modifier;
pub use standard::StandardFormula;

use crate::error::FormulaError;
use crate::moves::MoveInfo;
use crate::view::BattleView;

/// Lowest and highest roll of one damage calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    /// No damage (immunity or status move).
    pub const ZERO: Self = Self { min: 0, max: 0 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Range of a full 16-roll spread (roll index 0 is 85%, 15 is 100%).
    pub fn from_rolls(rolls: &[u16; 16]) -> Self {
        Self {
            min: rolls[0] as u32,
            max: rolls[15] as u32,
        }
    }
}

/// A deterministic damage function over a battle view.
///
/// `battle` may be an overlay; implementations must read combatants only
/// through [`BattleView::get_pokemon`] (or the derived lookups) so that
/// overridden fields are honoured.
pub trait DamageFormula {
    fn calculate(
        &self,
        attacker_id: &str,
        defender_id: &str,
        mv: &MoveInfo,
        battle: &dyn BattleView,
        is_critical: bool,
    ) -> Result<DamageRange, FormulaError>;
}

impl<F> DamageFormula for F
where
    F: Fn(&str, &str, &MoveInfo, &dyn BattleView, bool) -> Result<DamageRange, FormulaError>,
{
    fn calculate(
        &self,
        attacker_id: &str,
        defender_id: &str,
        mv: &MoveInfo,
        battle: &dyn BattleView,
        is_critical: bool,
    ) -> Result<DamageRange, FormulaError> {
        self(attacker_id, defender_id, mv, battle, is_critical)
    }
}
