//! Combat scenario loader.
//!
//! A scenario places units on a named map, equips them from the catalog, and
//! scripts a sequence of combats with host-resolved strike outcomes.

use std::path::Path;

use pack_core::env::CatalogOracle;
use pack_core::{
    CombatSpec, ItemUid, MovementGroup, Position, Strike, Team, UnitId, UnitState, WorldState,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// One unit placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: u32,
    pub nid: String,
    pub team: Team,
    pub position: Position,
    pub hp: i32,
    /// Defaults to `hp`.
    #[serde(default)]
    pub max_hp: Option<i32>,
    #[serde(default)]
    pub movement_group: MovementGroup,
    /// Item nids from the catalog, in inventory order.
    #[serde(default)]
    pub items: Vec<String>,
    /// Skill nids from the catalog.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// One scripted combat. Items are named by nid and resolved against the
/// wielder's inventory when the world is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatScript {
    pub attacker: u32,
    #[serde(default)]
    pub attacker_item: Option<String>,
    pub defender: u32,
    #[serde(default)]
    pub defender_item: Option<String>,
    #[serde(default)]
    pub target_position: Option<Position>,
    pub strikes: Vec<Strike>,
}

/// Scenario structure for RON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Map name under `maps/`.
    pub map: String,
    pub units: Vec<UnitSpec>,
    #[serde(default)]
    pub combats: Vec<CombatScript>,
}

impl Scenario {
    /// Builds the starting world, instantiating items and skills from `catalog`.
    pub fn build_world(&self, catalog: &dyn CatalogOracle) -> LoadResult<WorldState> {
        let mut world = WorldState::new();
        for spec in &self.units {
            let mut unit = UnitState::new(
                UnitId(spec.id),
                spec.nid.clone(),
                spec.team,
                spec.position,
                spec.hp,
            );
            unit.max_hp = spec.max_hp.unwrap_or(spec.hp);
            unit.movement_group = spec.movement_group;
            let id = world
                .insert_unit(unit)
                .map_err(|e| anyhow::anyhow!("Cannot place unit `{}`: {}", spec.nid, e))?;

            for nid in &spec.items {
                let prefab = catalog
                    .item(nid)
                    .ok_or_else(|| anyhow::anyhow!("unit `{}`: unknown item `{}`", spec.nid, nid))?;
                let item = world.create_item(
                    nid.clone(),
                    prefab.range,
                    prefab.data.clone(),
                    prefab.components.clone(),
                );
                world.give_item(id, item)?;
            }
            for nid in &spec.skills {
                let prefab = catalog
                    .skill(nid)
                    .ok_or_else(|| anyhow::anyhow!("unit `{}`: unknown skill `{}`", spec.nid, nid))?;
                let skill = world.create_skill(nid.clone(), prefab.components.clone(), None);
                world.give_skill(id, skill)?;
            }
        }
        Ok(world)
    }

    /// Resolves the scripted combats against a world built by [`Self::build_world`].
    pub fn combat_specs(&self, world: &WorldState) -> LoadResult<Vec<CombatSpec>> {
        self.combats
            .iter()
            .map(|script| {
                Ok(CombatSpec {
                    attacker: UnitId(script.attacker),
                    attacker_item: wielded(world, script.attacker, script.attacker_item.as_deref())?,
                    defender: UnitId(script.defender),
                    defender_item: wielded(world, script.defender, script.defender_item.as_deref())?,
                    target_position: script.target_position,
                    strikes: script.strikes.clone(),
                })
            })
            .collect()
    }
}

fn wielded(world: &WorldState, unit: u32, nid: Option<&str>) -> LoadResult<Option<ItemUid>> {
    let Some(nid) = nid else {
        return Ok(None);
    };
    let state = world
        .unit(UnitId(unit))
        .ok_or_else(|| anyhow::anyhow!("combat names unknown unit {}", unit))?;
    state
        .items
        .iter()
        .find(|item| item.nid == nid)
        .map(|item| Some(item.uid))
        .ok_or_else(|| anyhow::anyhow!("unit {} does not carry `{}`", unit, nid))
}

/// Loader for combat scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        parse_ron(content, "scenario")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pack_core::MemoryCatalog;
    use std::sync::Arc;

    const SCENARIO: &str = r#"(
        map: "skirmish",
        units: [
            (id: 1, nid: "eirika", team: Player, position: (x: 2, y: 2), hp: 18, items: ["rapier"]),
            (id: 2, nid: "bandit", team: Enemy, position: (x: 3, y: 2), hp: 20, max_hp: 24),
        ],
        combats: [
            (attacker: 1, attacker_item: Some("rapier"), defender: 2, strikes: [
                (striker: Attacker, outcome: Hit(damage: 7)),
                (striker: Defender, outcome: Miss),
            ]),
        ],
    )"#;

    fn catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.insert_item(pack_core::env::ItemPrefab {
            nid: "rapier".into(),
            range: Default::default(),
            data: Default::default(),
            components: Arc::from(Vec::new()),
        });
        catalog
    }

    #[test]
    fn builds_world_and_resolves_item_names() {
        let scenario = ScenarioLoader::parse(SCENARIO).unwrap();
        let world = scenario.build_world(&catalog()).unwrap();

        let bandit = world.unit(UnitId(2)).unwrap();
        assert_eq!((bandit.hp, bandit.max_hp), (20, 24));

        let specs = scenario.combat_specs(&world).unwrap();
        assert_eq!(specs.len(), 1);
        let rapier = world.unit(UnitId(1)).unwrap().items[0].uid;
        assert_eq!(specs[0].attacker_item, Some(rapier));
        assert_eq!(specs[0].defender_item, None);
        assert_eq!(specs[0].strikes.len(), 2);
    }

    #[test]
    fn negative_hp_is_rejected() {
        let scenario = ScenarioLoader::parse(
            r#"(map: "m", units: [(id: 1, nid: "a", team: Player, position: (x: 0, y: 0), hp: 4, max_hp: -1)])"#,
        )
        .unwrap();
        let err = scenario.build_world(&MemoryCatalog::new()).unwrap_err();
        assert!(err.to_string().contains("negative hp"), "{err}");
    }

    #[test]
    fn unknown_catalog_entries_are_errors() {
        let scenario = ScenarioLoader::parse(
            r#"(map: "m", units: [(id: 1, nid: "a", team: Player, position: (x: 0, y: 0), hp: 1, skills: ["nope"])])"#,
        )
        .unwrap();
        let err = scenario.build_world(&MemoryCatalog::new()).unwrap_err();
        assert!(err.to_string().contains("unknown skill `nope`"));
    }
}
