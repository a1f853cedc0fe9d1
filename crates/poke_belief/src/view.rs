//! Read-only views of a battle, as seen by the damage formula.
//!
//! The formula never touches a concrete battle type. It asks a `BattleView`
//! for combatants by identifier ("p2: Ferrothorn") and reads them through the
//! `Combatant` trait. That seam is what lets an overlay stand in for the real
//! battle without copying it.

use crate::state::{SideConditions, Status, Weather};
use crate::stats::StatTable;
use crate::types::Type;

/// Player side. Identifiers are prefixed with `p1`/`p2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    P1,
    P2,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
        }
    }

    /// Side encoded in an identifier such as "p2a: Ferrothorn".
    pub fn of_identifier(identifier: &str) -> Option<Side> {
        let bytes = identifier.as_bytes();
        match (bytes.first(), bytes.get(1)) {
            (Some(b'p'), Some(b'1')) => Some(Side::P1),
            (Some(b'p'), Some(b'2')) => Some(Side::P2),
            _ => None,
        }
    }
}

/// One battle participant.
pub trait Combatant {
    /// Battle-unique identifier, e.g. "p2: Ferrothorn".
    fn identifier(&self) -> &str;

    /// Species display name.
    fn species(&self) -> &str;

    fn level(&self) -> u8;

    /// Current types. Mono-typed combatants repeat their type.
    fn types(&self) -> [Type; 2];

    /// Species base stats, when the host knows them.
    fn base_stats(&self) -> Option<StatTable>;

    /// Computed battle stats. `None` for an opponent whose spread is hidden.
    fn stats(&self) -> Option<StatTable>;

    /// Boost stages `[Atk, Def, SpA, SpD, Spe]`.
    fn boosts(&self) -> [i8; 5];

    fn item(&self) -> Option<&str>;

    fn ability(&self) -> Option<&str>;

    fn status(&self) -> Status;

    /// Remaining HP as a fraction of max, in `[0, 1]`.
    fn current_hp_fraction(&self) -> f64;

    /// Tera type, once terastallized.
    fn tera_type(&self) -> Option<Type>;

    /// Types used for defensive matchups (tera overrides both).
    fn defensive_types(&self) -> [Type; 2] {
        match self.tera_type() {
            Some(tera) => [tera, tera],
            None => self.types(),
        }
    }
}

/// Everything the damage formula may ask of a battle.
pub trait BattleView {
    fn get_pokemon(&self, identifier: &str) -> Option<&dyn Combatant>;

    fn active_identifier(&self, side: Side) -> Option<&str>;

    /// Active combatant of `side`, resolved through [`BattleView::get_pokemon`].
    fn active_pokemon(&self, side: Side) -> Option<&dyn Combatant> {
        self.active_identifier(side).and_then(|id| self.get_pokemon(id))
    }

    /// The side the caller (our agent) plays.
    fn player_side(&self) -> Side;

    fn side_conditions(&self, side: Side) -> SideConditions;

    fn weather(&self) -> Weather;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_of_identifier() {
        assert_eq!(Side::of_identifier("p1: Gholdengo"), Some(Side::P1));
        assert_eq!(Side::of_identifier("p2a: Ferrothorn"), Some(Side::P2));
        assert_eq!(Side::of_identifier("Ferrothorn"), None);
        assert_eq!(Side::of_identifier(""), None);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Side::P1.opponent(), Side::P2);
        assert_eq!(Side::P2.opponent().index(), 0);
    }
}
