mod common;

use common::*;
use pack_core::components::item::{PivotOptions, ShoveOptions};
use pack_core::{
    Action, ActionLog, CombatEngine, Component, Env, ForcedPolicy, GridMap, LiteralEvaluator,
    PcgRng, Position, TerrainKind, UnitId, WorldState,
};

fn position(world: &WorldState, unit: UnitId) -> Position {
    world
        .unit(unit)
        .and_then(|state| state.position)
        .expect("unit on the board")
}

fn shove_blade(magnitude: i32, policy: ForcedPolicy) -> Component {
    Component::Shove(ShoveOptions {
        magnitude,
        policy,
        collision_event: Some("wall_slam".into()),
    })
}

#[test]
fn shove_pushes_away_and_never_toward() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    for (attacker_at, defender_at) in [
        (Position::new(2, 2), Position::new(3, 2)),
        (Position::new(4, 4), Position::new(3, 3)),
        (Position::new(5, 5), Position::new(5, 4)),
    ] {
        let mut world = duel(attacker_at, defender_at);
        let blade = arm(&mut world, ATTACKER, "shove_blade", vec![shove_blade(2, ForcedPolicy::Flexible)]);
        let mut log = ActionLog::new();
        CombatEngine::default()
            .resolve(&mut world, &mut log, &env, &combat(Some(blade), vec![hit(1)]))
            .expect("valid combat");

        let before = attacker_at.chebyshev(defender_at);
        let after = attacker_at.chebyshev(position(&world, DEFENDER));
        assert_eq!(after, before + 2, "shove from {attacker_at} against {defender_at}");
    }
}

#[test]
fn flexible_shove_into_a_wall_collides_once() {
    let map: GridMap = board().with_terrain(Position::new(5, 2), TerrainKind::Wall);
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    let blade = arm(&mut world, ATTACKER, "shove_blade", vec![shove_blade(3, ForcedPolicy::Flexible)]);
    let mut log = ActionLog::new();
    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(blade), vec![hit(1)]))
        .expect("valid combat");

    assert_eq!(position(&world, DEFENDER), Position::new(4, 2));
    assert_eq!(report.playback.with_nid("collision").count(), 1);
    assert_eq!(report.playback.with_nid("shove").count(), 1);

    let events: Vec<&Action> = log
        .actions()
        .filter(|action| matches!(action, Action::TriggerEvent { .. }))
        .collect();
    assert_eq!(events.len(), 1);
    assert_eq!(world.pending_events().len(), 1);
    assert_eq!(world.pending_events()[0].nid, "wall_slam");
    assert_eq!(world.pending_events()[0].position, Some(Position::new(4, 2)));
}

#[test]
fn strict_shove_into_a_wall_does_nothing() {
    let map: GridMap = board().with_terrain(Position::new(5, 2), TerrainKind::Wall);
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    let blade = arm(
        &mut world,
        ATTACKER,
        "shove_blade",
        vec![shove_blade(3, ForcedPolicy::AllOrNothing)],
    );
    let mut log = ActionLog::new();
    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(blade), vec![hit(1)]))
        .expect("valid combat");

    assert_eq!(position(&world, DEFENDER), Position::new(3, 2));
    assert_eq!(report.playback.with_nid("collision").count(), 0);
    assert!(world.pending_events().is_empty());
    assert!(!log.actions().any(|action| matches!(action, Action::ForcedMove { .. })));
}

#[test]
fn anchored_units_ignore_shove() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    learn(&mut world, DEFENDER, "anchor", vec![Component::IgnoreForcedMovement]);
    let blade = arm(&mut world, ATTACKER, "shove_blade", vec![shove_blade(1, ForcedPolicy::Flexible)]);
    let mut log = ActionLog::new();
    CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(blade), vec![hit(1)]))
        .expect("valid combat");

    assert_eq!(position(&world, DEFENDER), Position::new(3, 2));
}

#[test]
fn draw_pulls_the_target_adjacent() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(5, 2));
    let hook = arm(
        &mut world,
        ATTACKER,
        "grapple",
        vec![Component::Draw(ShoveOptions {
            magnitude: 2,
            ..ShoveOptions::default()
        })],
    );
    let mut log = ActionLog::new();
    CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(hook), vec![hit(1)]))
        .expect("valid combat");

    assert_eq!(position(&world, DEFENDER), Position::new(3, 2));
}

#[test]
fn pivot_moves_the_user_past_the_target() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    let lance = arm(
        &mut world,
        ATTACKER,
        "pivot_lance",
        vec![Component::Pivot(PivotOptions::default())],
    );
    let mut log = ActionLog::new();
    CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(lance), vec![hit(1)]))
        .expect("valid combat");

    assert_eq!(position(&world, ATTACKER), Position::new(4, 2));
    assert_eq!(position(&world, DEFENDER), Position::new(3, 2));
}

#[test]
fn forced_moves_rewind_with_the_log() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    let blade = arm(&mut world, ATTACKER, "shove_blade", vec![shove_blade(2, ForcedPolicy::Flexible)]);
    let snapshot = world.clone();
    let mut log = ActionLog::new();
    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(blade), vec![hit(1)]))
        .expect("valid combat");
    assert_eq!(position(&world, DEFENDER), Position::new(5, 2));

    log.rewind_to(&mut world, report.checkpoint);
    assert_eq!(world, snapshot);
}
