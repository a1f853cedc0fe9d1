//! Move descriptions as seen by the damage estimator.

use serde::{Deserialize, Serialize};

use crate::ids::normalize_id;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// The parts of a move the damage formula cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInfo {
    /// Display name ("Gyro Ball").
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    #[serde(default)]
    pub base_power: u16,
}

impl MoveInfo {
    pub fn new(name: impl Into<String>, move_type: Type, category: MoveCategory, base_power: u16) -> Self {
        Self {
            name: name.into(),
            move_type,
            category,
            base_power,
        }
    }

    pub fn physical(name: impl Into<String>, move_type: Type, base_power: u16) -> Self {
        Self::new(name, move_type, MoveCategory::Physical, base_power)
    }

    pub fn special(name: impl Into<String>, move_type: Type, base_power: u16) -> Self {
        Self::new(name, move_type, MoveCategory::Special, base_power)
    }

    pub fn status(name: impl Into<String>, move_type: Type) -> Self {
        Self::new(name, move_type, MoveCategory::Status, 0)
    }

    /// Normalized identifier ("gyroball").
    pub fn id(&self) -> String {
        normalize_id(&self.name)
    }

    /// Status moves and zero-power moves deal no damage.
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.base_power > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_damaging() {
        assert!(MoveInfo::physical("Knock Off", Type::Dark, 65).is_damaging());
        assert!(!MoveInfo::status("Stealth Rock", Type::Rock).is_damaging());
        assert!(!MoveInfo::special("Night Shade", Type::Ghost, 0).is_damaging());
    }

    #[test]
    fn test_move_from_json() {
        let mv: MoveInfo =
            serde_json::from_str(r#"{"name": "Flamethrower", "type": "fire", "category": "special", "base_power": 90}"#)
                .unwrap();
        assert_eq!(mv.move_type, Type::Fire);
        assert_eq!(mv.category, MoveCategory::Special);
        assert_eq!(mv.id(), "flamethrower");
    }
}
