//! Pure item and skill predicates the host calls speculatively.
//!
//! Nothing here appends actions or touches scratch, so the host may call
//! these for highlighting and AI evaluation at any time.

use std::collections::BTreeSet;

use crate::aoe::Splash;
use crate::components::{Component, skill_condition};
use crate::env::Env;
use crate::state::{ItemUid, Position, SkillUid, UnitId, WorldState};

use super::context::QueryContext;
use super::hooks::Hooks;
use super::scratch::AttachmentSource;

fn item_query<'a>(
    world: &'a WorldState,
    env: &Env<'a>,
    unit: UnitId,
    item: ItemUid,
) -> Option<(QueryContext<'a>, &'a [Component])> {
    let instance = world.unit(unit)?.item(item)?;
    let query = QueryContext::new(world, *env, unit).with_item(item);
    Some((query, &instance.components))
}

fn declaring(components: &[Component], flag: Hooks) -> impl Iterator<Item = &Component> {
    components
        .iter()
        .filter(move |component| component.hooks().contains(flag))
}

/// True when the unit holds the item and every availability check passes.
pub fn item_available(world: &WorldState, env: &Env<'_>, unit: UnitId, item: ItemUid) -> bool {
    let Some((query, components)) = item_query(world, env, unit, item) else {
        return false;
    };
    declaring(components, Hooks::AVAILABLE).all(|component| component.available(&query))
}

/// True when `target` passes every target restriction of the item.
pub fn item_target_restrict(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    item: ItemUid,
    target: UnitId,
) -> bool {
    let Some((query, components)) = item_query(world, env, unit, item) else {
        return false;
    };
    let query = query
        .with_target(Some(target))
        .with_position(world.unit(target).and_then(|state| state.position));
    declaring(components, Hooks::TARGET_RESTRICT).all(|component| component.target_restrict(&query))
}

/// Living units in the item's range that pass its target restrictions.
pub fn item_valid_targets(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    item: ItemUid,
) -> Vec<UnitId> {
    let Some(user) = world.unit(unit) else {
        return Vec::new();
    };
    let (Some(origin), Some(instance)) = (user.position, user.item(item)) else {
        return Vec::new();
    };
    world
        .units()
        .filter(|other| other.id != unit && other.is_alive())
        .filter(|other| {
            other
                .position
                .is_some_and(|position| instance.range.contains(origin.manhattan(position)))
        })
        .filter(|other| item_target_restrict(world, env, unit, item, other.id))
        .map(|other| other.id)
        .collect()
}

/// Tiles the item affects when aimed at `position`.
///
/// Items without a splash component affect only an occupied `position`.
pub fn item_splash(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    item: ItemUid,
    position: Position,
) -> Splash {
    let single = || Splash {
        primary: world.unit_at(position).map(|_| position),
        secondary: BTreeSet::new(),
    };
    let Some((query, components)) = item_query(world, env, unit, item) else {
        return single();
    };
    declaring(components, Hooks::SPLASH)
        .find_map(|component| component.splash(&query, position))
        .unwrap_or_else(single)
}

/// Tiles to highlight when the item is aimed at `position`, excluding it.
pub fn item_splash_positions(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    item: ItemUid,
    position: Position,
) -> BTreeSet<Position> {
    let Some((query, components)) = item_query(world, env, unit, item) else {
        return BTreeSet::new();
    };
    declaring(components, Hooks::SPLASH)
        .find_map(|component| component.splash_positions(&query, position))
        .unwrap_or_default()
}

/// Sum of the item's damage bonuses against `target`.
pub fn item_damage_bonus(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    item: ItemUid,
    target: Option<UnitId>,
) -> i64 {
    let Some((query, components)) = item_query(world, env, unit, item) else {
        return 0;
    };
    let query = query.with_target(target);
    declaring(components, Hooks::DAMAGE_BONUS)
        .map(|component| component.damage_bonus(&query))
        .sum()
}

/// True when every condition of a held skill holds, given the unit's item.
pub fn skill_active(
    world: &WorldState,
    env: &Env<'_>,
    unit: UnitId,
    skill: SkillUid,
    item: Option<ItemUid>,
) -> bool {
    if world.unit(unit).and_then(|state| state.skill(skill)).is_none() {
        return false;
    }
    let mut query = QueryContext::new(world, *env, unit).with_source(AttachmentSource::Skill(skill));
    query.item = item;
    skill_condition(&query)
}
