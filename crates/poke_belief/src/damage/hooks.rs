//! Item and ability damage hooks.
//!
//! Hook tables are static `phf` maps keyed by normalized id. Each entry only
//! sets the hooks it needs and leaves the rest at `NONE`.

use super::formula::apply_modifier;
use super::Modifier;
use crate::ids::normalize_id;
use crate::moves::MoveCategory;
use crate::state::Status;
use crate::types::Type;

/// Facts a hook may look at.
#[derive(Clone, Copy, Debug)]
pub struct HookContext {
    pub category: MoveCategory,
    pub move_type: Type,
    /// 4 = neutral
    pub effectiveness: u8,
    pub attacker_status: Status,
    pub defender_hp_fraction: f64,
}

/// Modifies an attacking or defending stat.
pub type OnModifyStat = fn(ctx: &HookContext, stat: u32) -> u32;

/// Returns a final-damage modifier.
pub type OnFinalModifier = fn(ctx: &HookContext) -> Modifier;

#[derive(Clone, Copy, Default)]
pub struct ItemHooks {
    /// Holder is attacking
    pub on_modify_attack: Option<OnModifyStat>,
    /// Holder is defending
    pub on_modify_defense: Option<OnModifyStat>,
    /// Holder is attacking
    pub on_final_modifier: Option<OnFinalModifier>,
}

impl ItemHooks {
    pub const NONE: Self = Self {
        on_modify_attack: None,
        on_modify_defense: None,
        on_final_modifier: None,
    };
}

#[derive(Clone, Copy, Default)]
pub struct AbilityHooks {
    /// Holder is attacking
    pub on_modify_attack: Option<OnModifyStat>,
    /// Holder is defending; modifies the attacker's stat (Thick Fat)
    pub on_source_modify_attack: Option<OnModifyStat>,
    /// Holder is attacking
    pub on_attacker_final: Option<OnFinalModifier>,
    /// Holder is defending
    pub on_defender_final: Option<OnFinalModifier>,
    /// Burn does not halve the holder's physical damage
    pub ignores_burn: bool,
    /// STAB becomes 2x
    pub adaptability: bool,
}

impl AbilityHooks {
    pub const NONE: Self = Self {
        on_modify_attack: None,
        on_source_modify_attack: None,
        on_attacker_final: None,
        on_defender_final: None,
        ignores_burn: false,
        adaptability: false,
    };
}

// ============================================================================
// Item implementations
// ============================================================================

// Choice Band: 1.5x Atk
fn on_modify_attack_choice_band(ctx: &HookContext, attack: u32) -> u32 {
    if ctx.category == MoveCategory::Physical {
        apply_modifier(attack, Modifier::ONE_POINT_FIVE)
    } else {
        attack
    }
}

// Choice Specs: 1.5x SpA
fn on_modify_attack_choice_specs(ctx: &HookContext, attack: u32) -> u32 {
    if ctx.category == MoveCategory::Special {
        apply_modifier(attack, Modifier::ONE_POINT_FIVE)
    } else {
        attack
    }
}

// Assault Vest: 1.5x SpD
fn on_modify_defense_assault_vest(ctx: &HookContext, defense: u32) -> u32 {
    if ctx.category == MoveCategory::Special {
        apply_modifier(defense, Modifier::ONE_POINT_FIVE).max(1)
    } else {
        defense
    }
}

fn on_final_life_orb(_ctx: &HookContext) -> Modifier {
    Modifier::LIFE_ORB
}

fn on_final_expert_belt(ctx: &HookContext) -> Modifier {
    if ctx.effectiveness > 4 {
        Modifier::EXPERT_BELT
    } else {
        Modifier::ONE
    }
}

static ITEM_HOOKS: phf::Map<&'static str, ItemHooks> = phf::phf_map! {
    "choiceband" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_choice_band),
        ..ItemHooks::NONE
    },
    "choicespecs" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_choice_specs),
        ..ItemHooks::NONE
    },
    "assaultvest" => ItemHooks {
        on_modify_defense: Some(on_modify_defense_assault_vest),
        ..ItemHooks::NONE
    },
    "lifeorb" => ItemHooks {
        on_final_modifier: Some(on_final_life_orb),
        ..ItemHooks::NONE
    },
    "expertbelt" => ItemHooks {
        on_final_modifier: Some(on_final_expert_belt),
        ..ItemHooks::NONE
    },
};

// ============================================================================
// Ability implementations
// ============================================================================

// Huge Power / Pure Power: 2x Atk
fn on_modify_attack_huge_power(ctx: &HookContext, attack: u32) -> u32 {
    if ctx.category == MoveCategory::Physical {
        attack * 2
    } else {
        attack
    }
}

// Guts: 1.5x Atk while statused
fn on_modify_attack_guts(ctx: &HookContext, attack: u32) -> u32 {
    if ctx.category == MoveCategory::Physical && !ctx.attacker_status.is_empty() {
        apply_modifier(attack, Modifier::ONE_POINT_FIVE)
    } else {
        attack
    }
}

// Thick Fat: halves the attacking stat for Fire and Ice moves
fn on_source_modify_attack_thick_fat(ctx: &HookContext, attack: u32) -> u32 {
    if matches!(ctx.move_type, Type::Fire | Type::Ice) {
        apply_modifier(attack, Modifier::HALF)
    } else {
        attack
    }
}

// Multiscale: 0.5x damage at full HP
fn on_defender_final_multiscale(ctx: &HookContext) -> Modifier {
    if ctx.defender_hp_fraction >= 1.0 {
        Modifier::HALF
    } else {
        Modifier::ONE
    }
}

// Filter / Solid Rock / Prism Armor: 0.75x super-effective damage
fn on_defender_final_filter(ctx: &HookContext) -> Modifier {
    if ctx.effectiveness > 4 {
        Modifier::FILTER
    } else {
        Modifier::ONE
    }
}

const HUGE_POWER: AbilityHooks = AbilityHooks {
    on_modify_attack: Some(on_modify_attack_huge_power),
    ..AbilityHooks::NONE
};

const FILTER: AbilityHooks = AbilityHooks {
    on_defender_final: Some(on_defender_final_filter),
    ..AbilityHooks::NONE
};

static ABILITY_HOOKS: phf::Map<&'static str, AbilityHooks> = phf::phf_map! {
    "hugepower" => HUGE_POWER,
    "purepower" => HUGE_POWER,
    "guts" => AbilityHooks {
        on_modify_attack: Some(on_modify_attack_guts),
        ignores_burn: true,
        ..AbilityHooks::NONE
    },
    "adaptability" => AbilityHooks {
        adaptability: true,
        ..AbilityHooks::NONE
    },
    "thickfat" => AbilityHooks {
        on_source_modify_attack: Some(on_source_modify_attack_thick_fat),
        ..AbilityHooks::NONE
    },
    "multiscale" => AbilityHooks {
        on_defender_final: Some(on_defender_final_multiscale),
        ..AbilityHooks::NONE
    },
    "filter" => FILTER,
    "solidrock" => FILTER,
    "prismarmor" => FILTER,
};

/// Hooks for a held item, by any spelling of its name.
pub fn item_hooks(item: Option<&str>) -> ItemHooks {
    item.and_then(|name| ITEM_HOOKS.get(normalize_id(name).as_str()).copied())
        .unwrap_or(ItemHooks::NONE)
}

/// Hooks for an ability, by any spelling of its name.
pub fn ability_hooks(ability: Option<&str>) -> AbilityHooks {
    ability
        .and_then(|name| ABILITY_HOOKS.get(normalize_id(name).as_str()).copied())
        .unwrap_or(AbilityHooks::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(category: MoveCategory, move_type: Type, effectiveness: u8) -> HookContext {
        HookContext {
            category,
            move_type,
            effectiveness,
            attacker_status: Status::NONE,
            defender_hp_fraction: 1.0,
        }
    }

    #[test]
    fn test_choice_items_respect_category() {
        let band = item_hooks(Some("Choice Band")).on_modify_attack.unwrap();
        assert_eq!(band(&ctx(MoveCategory::Physical, Type::Normal, 4), 200), 300);
        assert_eq!(band(&ctx(MoveCategory::Special, Type::Normal, 4), 200), 200);

        let specs = item_hooks(Some("choicespecs")).on_modify_attack.unwrap();
        assert_eq!(specs(&ctx(MoveCategory::Special, Type::Fire, 4), 200), 300);
    }

    #[test]
    fn test_expert_belt_only_super_effective() {
        let belt = item_hooks(Some("Expert Belt")).on_final_modifier.unwrap();
        assert_eq!(belt(&ctx(MoveCategory::Physical, Type::Fire, 8)), Modifier::EXPERT_BELT);
        assert_eq!(belt(&ctx(MoveCategory::Physical, Type::Fire, 4)), Modifier::ONE);
    }

    #[test]
    fn test_unknown_names_have_no_hooks() {
        assert!(item_hooks(Some("Leftovers")).on_modify_attack.is_none());
        assert!(item_hooks(None).on_final_modifier.is_none());
        assert!(!ability_hooks(Some("Iron Barbs")).ignores_burn);
    }

    #[test]
    fn test_guts_needs_status() {
        let guts = ability_hooks(Some("Guts"));
        let on_attack = guts.on_modify_attack.unwrap();
        let mut c = ctx(MoveCategory::Physical, Type::Normal, 4);
        assert_eq!(on_attack(&c, 200), 200);
        c.attacker_status = Status::BURN;
        assert_eq!(on_attack(&c, 200), 300);
        assert!(guts.ignores_burn);
    }

    #[test]
    fn test_thick_fat_types() {
        let thick_fat = ability_hooks(Some("Thick Fat")).on_source_modify_attack.unwrap();
        assert_eq!(thick_fat(&ctx(MoveCategory::Special, Type::Ice, 4), 200), 100);
        assert_eq!(thick_fat(&ctx(MoveCategory::Special, Type::Water, 4), 200), 200);
    }

    #[test]
    fn test_multiscale_full_hp_only() {
        let multiscale = ability_hooks(Some("Multiscale")).on_defender_final.unwrap();
        let mut c = ctx(MoveCategory::Physical, Type::Ice, 16);
        assert_eq!(multiscale(&c), Modifier::HALF);
        c.defender_hp_fraction = 0.9;
        assert_eq!(multiscale(&c), Modifier::ONE);
    }

    #[test]
    fn test_filter_aliases() {
        for name in ["Filter", "Solid Rock", "Prism Armor"] {
            let hook = ability_hooks(Some(name)).on_defender_final.unwrap();
            assert_eq!(hook(&ctx(MoveCategory::Physical, Type::Fire, 8)), Modifier::FILTER);
        }
    }
}
