use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use poke_belief::{BuildCatalogue, EngineConfig, Side};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Ignore error if a global subscriber is already set
    let _ = if json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };
}

pub fn find_project_root() -> PathBuf {
    let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut dir = start.clone();
    loop {
        if dir.join("Cargo.toml").exists() {
            return dir;
        }
        if !dir.pop() {
            return start;
        }
    }
}

/// Resolve `path` as given, falling back to the project root.
pub fn resolve(path: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }
    let rooted = find_project_root().join(path);
    if rooted.exists() {
        rooted
    } else {
        path.to_path_buf()
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let path = resolve(path);
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_catalogue(path: &Path) -> Result<Arc<BuildCatalogue>> {
    let path = resolve(path);
    let catalogue =
        BuildCatalogue::from_path(&path).with_context(|| format!("loading catalogue {}", path.display()))?;
    info!(path = %path.display(), species = catalogue.len(), "catalogue loaded");
    Ok(Arc::new(catalogue))
}

/// Config file if given, else defaults; `POKE_BELIEF_*` overrides apply on top.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let path = resolve(path);
            EngineConfig::from_path(&path)
                .with_context(|| format!("loading config {}", path.display()))?
                .with_env_overrides()
        }
        None => EngineConfig::from_env(),
    };
    Ok(config)
}

pub fn parse_side(side: &str) -> Result<Side> {
    match side.trim().to_ascii_lowercase().as_str() {
        "p1" => Ok(Side::P1),
        "p2" => Ok(Side::P2),
        other => bail!("unknown side {:?} (expected p1 or p2)", other),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing report")?;
    println!("{}", json);
    Ok(())
}
