//! Game-database lookups the pack depends on.
//!
//! The database itself belongs to the host's data editor. Components only ask
//! whether a skill or event exists and which components a skill carries; a
//! missing nid is answered with `None` and the calling effect is skipped.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::{ComponentSet, DataBag, WeaponRange};

/// Skill definition: the components every instance of the skill shares.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillPrefab {
    pub nid: String,
    pub components: ComponentSet,
    /// Negative statuses are removed by restore effects.
    #[cfg_attr(feature = "serde", serde(default))]
    pub negative: bool,
}

/// Item definition used when spawning inventories.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPrefab {
    pub nid: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: WeaponRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: DataBag,
    pub components: ComponentSet,
}

/// Read-only view of the game database.
pub trait CatalogOracle: Send + Sync {
    fn skill(&self, nid: &str) -> Option<&SkillPrefab>;

    fn item(&self, nid: &str) -> Option<&ItemPrefab>;

    fn has_event(&self, nid: &str) -> bool;

    fn has_skill(&self, nid: &str) -> bool {
        self.skill(nid).is_some()
    }
}

/// In-memory catalog, filled by content loaders or tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    skills: BTreeMap<String, SkillPrefab>,
    items: BTreeMap<String, ItemPrefab>,
    events: BTreeSet<String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_skill(&mut self, prefab: SkillPrefab) {
        self.skills.insert(prefab.nid.clone(), prefab);
    }

    pub fn insert_item(&mut self, prefab: ItemPrefab) {
        self.items.insert(prefab.nid.clone(), prefab);
    }

    pub fn insert_event(&mut self, nid: impl Into<String>) {
        self.events.insert(nid.into());
    }

    /// Builder: registers a skill.
    pub fn with_skill(
        mut self,
        nid: impl Into<String>,
        components: ComponentSet,
        negative: bool,
    ) -> Self {
        self.insert_skill(SkillPrefab {
            nid: nid.into(),
            components,
            negative,
        });
        self
    }

    /// Builder: registers an event nid.
    pub fn with_event(mut self, nid: impl Into<String>) -> Self {
        self.insert_event(nid);
        self
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillPrefab> {
        self.skills.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemPrefab> {
        self.items.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(String::as_str)
    }
}

impl CatalogOracle for MemoryCatalog {
    fn skill(&self, nid: &str) -> Option<&SkillPrefab> {
        self.skills.get(nid)
    }

    fn item(&self, nid: &str) -> Option<&ItemPrefab> {
        self.items.get(nid)
    }

    fn has_event(&self, nid: &str) -> bool {
        self.events.contains(nid)
    }
}
