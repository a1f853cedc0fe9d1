//! Identifier normalization.
//!
//! Species, moves, items and abilities arrive from the simulator in display
//! form ("Rocky Helmet", "Farfetch’d", "U-turn"). Everything that is compared
//! or used as a map key goes through [`normalize_id`] first.

/// Lowercase and strip everything that is not alphanumeric.
///
/// `"Rocky Helmet"` → `"rockyhelmet"`, `"Mr. Mime"` → `"mrmime"`.
pub fn normalize_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two names by their normalized form without allocating.
pub fn same_id(a: &str, b: &str) -> bool {
    let mut lhs = a.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase);
    let mut rhs = b.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase);
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) if l == r => continue,
            _ => return false,
        }
    }
}
