use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use storygraph_core::EntityKind;
use storygraph_engine::{KindFilter, Mode};

/// Persisted defaults for the query flags; CLI arguments override these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub mode: Mode,
    pub min_weight: u32,
    /// Empty list means all kinds are visible.
    pub kinds: Vec<EntityKind>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Cumulative,
            min_weight: 1,
            kinds: Vec::new(),
        }
    }
}

impl QueryConfig {
    pub fn kind_filter(&self) -> KindFilter {
        if self.kinds.is_empty() {
            KindFilter::All
        } else {
            KindFilter::Only(HashSet::from_iter(self.kinds.iter().copied()))
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "storygraph")?;
    Some(proj.config_dir().join("query.toml"))
}

pub fn load_or_default() -> QueryConfig {
    let Some(path) = config_file_path() else {
        return QueryConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> QueryConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return QueryConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| QueryConfig::default())
}

pub fn save(cfg: &QueryConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &QueryConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize query config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write query config {}", path.display()))?;
    Ok(())
}
