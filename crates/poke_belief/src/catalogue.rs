//! The build catalogue: every role each species may be running.
//!
//! Loaded once per process from random-battle set data and shared read-only
//! between battles (`Arc<BuildCatalogue>`). Entries are keyed by normalized
//! species id, so "Iron Valiant", "iron-valiant" and "ironvaliant" all hit
//! the same entry.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::CatalogueError;
use crate::ids::normalize_id;
use crate::stats::{EvSpread, DEFAULT_LEVEL};

/// One predefined build of a species.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    name: String,
    abilities: Vec<String>,
    items: Vec<String>,
    moves: Vec<String>,
    tera_types: Vec<String>,
    evs: EvSpread,
    level: u8,

    // Normalized copies of the pools, index-aligned with the display names.
    ability_ids: Vec<String>,
    item_ids: Vec<String>,
    move_ids: Vec<String>,
}

fn to_ids(names: &[String]) -> Vec<String> {
    names.iter().map(|n| normalize_id(n)).collect()
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: Vec::new(),
            items: Vec::new(),
            moves: Vec::new(),
            tera_types: Vec::new(),
            evs: EvSpread::default(),
            level: DEFAULT_LEVEL,
            ability_ids: Vec::new(),
            item_ids: Vec::new(),
            move_ids: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self.ability_ids = to_ids(&self.abilities);
        self
    }

    pub fn items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.item_ids = to_ids(&self.items);
        self
    }

    pub fn moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self.move_ids = to_ids(&self.moves);
        self
    }

    pub fn tera_types<I, S>(mut self, tera_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tera_types = tera_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn evs(mut self, evs: EvSpread) -> Self {
        self.evs = evs.clamped();
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 100);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ability_pool(&self) -> &[String] {
        &self.abilities
    }

    pub fn item_pool(&self) -> &[String] {
        &self.items
    }

    pub fn move_pool(&self) -> &[String] {
        &self.moves
    }

    pub fn tera_pool(&self) -> &[String] {
        &self.tera_types
    }

    pub fn ev_spread(&self) -> &EvSpread {
        &self.evs
    }

    pub fn level_value(&self) -> u8 {
        self.level
    }

    /// Normalized move ids, index-aligned with [`Role::move_pool`].
    pub fn move_ids(&self) -> &[String] {
        &self.move_ids
    }

    /// Normalized item ids, index-aligned with [`Role::item_pool`].
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    /// `id` must already be normalized.
    pub fn has_move_id(&self, id: &str) -> bool {
        self.move_ids.iter().any(|m| m == id)
    }

    /// `id` must already be normalized.
    pub fn has_item_id(&self, id: &str) -> bool {
        self.item_ids.iter().any(|i| i == id)
    }

    /// `id` must already be normalized.
    pub fn has_ability_id(&self, id: &str) -> bool {
        self.ability_ids.iter().any(|a| a == id)
    }

    fn validate(&self, species: &str) -> Result<(), CatalogueError> {
        let empty = |pool: &'static str| CatalogueError::EmptyPool {
            species: species.to_string(),
            role: self.name.clone(),
            pool,
        };
        if self.moves.is_empty() {
            return Err(empty("move"));
        }
        if self.abilities.is_empty() {
            return Err(empty("ability"));
        }
        Ok(())
    }
}

/// All roles one species may appear with.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesEntry {
    name: String,
    roles: Vec<Role>,
}

impl SpeciesEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Read-only species → roles lookup.
#[derive(Debug, Clone, Default)]
pub struct BuildCatalogue {
    entries: HashMap<String, Arc<SpeciesEntry>>,
}

// ============================================================================
// Set-file wire format
// ============================================================================

#[derive(Deserialize)]
struct RawSpecies {
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    roles: BTreeMap<String, RawRole>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRole {
    #[serde(default)]
    abilities: Vec<String>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    moves: Vec<String>,
    #[serde(default)]
    tera_types: Vec<String>,
    #[serde(default)]
    evs: Option<EvSpread>,
    #[serde(default)]
    level: Option<u8>,
}

impl BuildCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-constructed entries, validating each.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = SpeciesEntry>,
    {
        let mut catalogue = Self::new();
        for entry in entries {
            catalogue.insert(entry)?;
        }
        Ok(catalogue)
    }

    /// Parse the random-battle set format:
    /// `{ "Species": { "level": 84, "roles": { "Role": { ... } } } }`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogueError> {
        let raw: BTreeMap<String, RawSpecies> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let raw: BTreeMap<String, RawSpecies> = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_raw(raw: BTreeMap<String, RawSpecies>) -> Result<Self, CatalogueError> {
        let mut catalogue = Self::new();
        for (species, data) in raw {
            let species_level = data.level.unwrap_or(DEFAULT_LEVEL);
            let mut entry = SpeciesEntry::new(species);
            for (role_name, role) in data.roles {
                entry = entry.with_role(
                    Role::new(role_name)
                        .abilities(role.abilities)
                        .items(role.items)
                        .moves(role.moves)
                        .tera_types(role.tera_types)
                        .evs(role.evs.unwrap_or_default())
                        .level(role.level.unwrap_or(species_level)),
                );
            }
            catalogue.insert(entry)?;
        }
        Ok(catalogue)
    }

    /// Add (or replace) an entry, keyed by its normalized species name.
    pub fn insert(&mut self, entry: SpeciesEntry) -> Result<(), CatalogueError> {
        for role in &entry.roles {
            role.validate(&entry.name)?;
        }
        self.entries.insert(normalize_id(&entry.name), Arc::new(entry));
        Ok(())
    }

    /// Look up a species by any spelling of its name.
    pub fn get(&self, species: &str) -> Option<&Arc<SpeciesEntry>> {
        self.entries.get(&normalize_id(species))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
