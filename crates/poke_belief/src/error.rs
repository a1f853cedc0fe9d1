//! Error types.
//!
//! Nothing in the belief/estimator core is fatal. These types exist for the
//! host-facing edges (catalogue loading, config validation), for formula
//! failures the estimator recovers from, and for the one anomaly the belief
//! model must report instead of absorbing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which revealed attribute an observation concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealedAttribute {
    Item,
    Ability,
    Tera,
}

impl fmt::Display for RevealedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevealedAttribute::Item => "item",
            RevealedAttribute::Ability => "ability",
            RevealedAttribute::Tera => "tera type",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BeliefError {
    /// A revealed fact contradicts an earlier reveal of the same attribute.
    /// The upstream observation stream is inconsistent; the earlier value is kept.
    #[error("{species}: {attribute} already revealed as {previous:?}, now observed {observed:?}")]
    RevealConflict {
        species: String,
        attribute: RevealedAttribute,
        previous: String,
        observed: String,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("no pokemon with identifier {0:?}")]
    UnknownPokemon(String),

    #[error("stats for {0:?} are not known")]
    MissingStats(String),
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{species}/{role}: {pool} pool is empty")]
    EmptyPool {
        species: String,
        role: String,
        pool: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside {range}")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: &'static str,
    },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
