//! Type-safe damage modifier.

/// A fixed-point damage modifier (4096 scale).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Modifier(pub u16);

impl Default for Modifier {
    fn default() -> Self {
        Self::ONE
    }
}

impl Modifier {
    /// 1.0x modifier (4096).
    pub const ONE: Self = Self(4096);

    /// 0.5x modifier (2048).
    pub const HALF: Self = Self(2048);

    /// 2.0x modifier (8192).
    pub const DOUBLE: Self = Self(8192);

    /// 1.5x modifier (6144).
    pub const ONE_POINT_FIVE: Self = Self(6144);

    /// Expert Belt (4915, approx 1.2x).
    pub const EXPERT_BELT: Self = Self(4915);

    /// Life Orb modifier (5324, approx 1.3x).
    /// Note: 1.3 * 4096 = 5324.8, but Life Orb uses 5324 in Gen 5+.
    pub const LIFE_ORB: Self = Self(5324);

    /// Filter/Solid Rock/Prism Armor (0.75x).
    pub const FILTER: Self = Self(3072);

    /// Create a new modifier from a raw u16 value.
    pub const fn new(val: u16) -> Self {
        Self(val)
    }

    /// Get the raw u16 value.
    pub const fn val(self) -> u16 {
        self.0
    }
}
