//! Skill, item and event catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use pack_core::MemoryCatalog;
use pack_core::env::{ItemPrefab, SkillPrefab};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Catalog structure for RON files.
///
/// ```ron
/// (
///     skills: [
///         (nid: "poison", components: [], negative: true),
///         (nid: "luna", components: [Proc((rate: 30, skill: "luna_effect"))]),
///     ],
///     items: [
///         (nid: "venin_edge", components: [StatusOnHit((skill: "poison"))]),
///     ],
///     events: ["wall_slam"],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRon {
    pub skills: Vec<SkillPrefab>,
    pub items: Vec<ItemPrefab>,
    pub events: Vec<String>,
}

/// Loader for the game database from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MemoryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON text, rejecting duplicate nids.
    pub fn parse(content: &str) -> LoadResult<MemoryCatalog> {
        let data: CatalogRon = parse_ron(content, "catalog")?;

        ensure_unique("skill", data.skills.iter().map(|skill| skill.nid.as_str()))?;
        ensure_unique("item", data.items.iter().map(|item| item.nid.as_str()))?;
        ensure_unique("event", data.events.iter().map(String::as_str))?;

        let mut catalog = MemoryCatalog::new();
        let (skills, items, events) = (data.skills.len(), data.items.len(), data.events.len());
        for skill in data.skills {
            catalog.insert_skill(skill);
        }
        for item in data.items {
            catalog.insert_item(item);
        }
        for event in data.events {
            catalog.insert_event(event);
        }
        debug!(target: "pack::content", skills, items, events, "catalog loaded");
        Ok(catalog)
    }
}

fn ensure_unique<'a>(kind: &str, nids: impl Iterator<Item = &'a str>) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for nid in nids {
        if !seen.insert(nid) {
            anyhow::bail!("duplicate {} nid `{}`", kind, nid);
        }
    }
    Ok(())
}
