#![allow(dead_code)]

use std::sync::Arc;

use pack_core::{
    CombatSpec, Component, DataBag, GridMap, ItemUid, MemoryCatalog, Position, SkillUid, Strike,
    StrikeOutcome, Team, UnitId, UnitState, WorldState, state::WeaponRange,
};

pub const ATTACKER: UnitId = UnitId(1);
pub const DEFENDER: UnitId = UnitId(2);

pub fn board() -> GridMap {
    GridMap::new(10, 10)
}

pub fn set(components: Vec<Component>) -> Arc<[Component]> {
    Arc::from(components)
}

/// Catalog shared by the scenarios: one negative status, a proc effect,
/// a stackable skill, and a collision event.
pub fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_skill("poison", set(vec![]), true)
        .with_skill("luna_effect", set(vec![]), false)
        .with_skill("canto_stack", set(vec![]), false)
        .with_skill("wary", set(vec![]), false)
        .with_event("wall_slam")
}

/// Attacker and defender side by side, both with 30 hp.
pub fn duel(attacker_at: Position, defender_at: Position) -> WorldState {
    let mut world = WorldState::new();
    world
        .insert_unit(UnitState::new(ATTACKER, "eirika", Team::Player, attacker_at, 30))
        .expect("attacker");
    world
        .insert_unit(UnitState::new(DEFENDER, "bandit", Team::Enemy, defender_at, 30))
        .expect("defender");
    world
}

pub fn arm(world: &mut WorldState, unit: UnitId, nid: &str, components: Vec<Component>) -> ItemUid {
    arm_with(world, unit, nid, DataBag::new(), components)
}

pub fn arm_with(
    world: &mut WorldState,
    unit: UnitId,
    nid: &str,
    data: DataBag,
    components: Vec<Component>,
) -> ItemUid {
    let item = world.create_item(nid, WeaponRange::new(1, 1), data, set(components));
    world.give_item(unit, item).expect("unit exists")
}

pub fn learn(world: &mut WorldState, unit: UnitId, nid: &str, components: Vec<Component>) -> SkillUid {
    let skill = world.create_skill(nid, set(components), None);
    world.give_skill(unit, skill).expect("unit exists")
}

pub fn hit(damage: i32) -> Strike {
    Strike::attacker(StrikeOutcome::Hit { damage })
}

pub fn miss() -> Strike {
    Strike::attacker(StrikeOutcome::Miss)
}

pub fn combat(attacker_item: Option<ItemUid>, strikes: Vec<Strike>) -> CombatSpec {
    CombatSpec {
        attacker: ATTACKER,
        attacker_item,
        defender: DEFENDER,
        defender_item: None,
        target_position: None,
        strikes,
    }
}

pub fn hp(world: &WorldState, unit: UnitId) -> i32 {
    world.unit(unit).map(|state| state.hp).unwrap_or_default()
}
