mod common;

use common::*;
use pack_core::components::item::EvalTargetRestrict;
use pack_core::lifecycle::{item_splash, item_splash_positions, item_valid_targets};
use pack_core::{
    Component, Env, LiteralEvaluator, PcgRng, Position, SplashAoe, Team, UnitId, UnitState,
};

#[test]
fn big_cleave_highlights_twenty_four_tiles() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(5, 8), Position::new(5, 5));
    let axe = arm(
        &mut world,
        ATTACKER,
        "big_cleaver",
        vec![Component::Aoe(SplashAoe::enemy_big_cleave())],
    );

    let tiles = item_splash_positions(&world, &env, ATTACKER, axe, Position::new(5, 5));
    assert_eq!(tiles.len(), 24);
    assert!(!tiles.contains(&Position::new(5, 5)));
}

#[test]
fn splash_stays_inside_the_highlight() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(0, 0), Position::new(4, 4));
    for (id, team, (x, y)) in [
        (3, Team::Enemy, (4, 5)),
        (4, Team::Enemy, (6, 6)),
        (5, Team::Player, (5, 4)),
        (6, Team::Other, (3, 3)),
        (7, Team::Enemy, (9, 9)),
    ] {
        world
            .insert_unit(UnitState::new(UnitId(id), "extra", team, Position::new(x, y), 10))
            .expect("free tile");
    }

    for aoe in [
        SplashAoe::enemy_cleave(),
        SplashAoe::enemy_big_cleave(),
        SplashAoe::ally_blast(2),
        SplashAoe::self_blast(1),
    ] {
        let mut world = world.clone();
        let item = arm(&mut world, ATTACKER, "tome", vec![Component::Aoe(aoe)]);
        let user = world.unit(ATTACKER).expect("user");

        for x in 0..10 {
            for y in 0..10 {
                let aimed = Position::new(x, y);
                let centre = aoe.centre(user, aimed);
                let highlight = item_splash_positions(&world, &env, ATTACKER, item, aimed);
                let splash = item_splash(&world, &env, ATTACKER, item, aimed);

                for tile in splash.affected() {
                    assert!(
                        tile == centre || highlight.contains(&tile),
                        "{aoe:?} aimed at {aimed}: {tile} affected but not highlighted"
                    );
                    assert!(world.unit_at(tile).is_some());
                }
                if let Some(primary) = splash.primary {
                    assert_eq!(primary, centre);
                }
            }
        }
    }
}

#[test]
fn enemy_cleave_never_hits_allies() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 5), Position::new(4, 4));
    world
        .insert_unit(UnitState::new(UnitId(3), "seth", Team::Player, Position::new(4, 5), 10))
        .expect("free tile");
    world
        .insert_unit(UnitState::new(UnitId(4), "brigand", Team::Enemy, Position::new(5, 5), 10))
        .expect("free tile");
    let axe = arm(&mut world, ATTACKER, "cleaver", vec![Component::Aoe(SplashAoe::enemy_cleave())]);

    let splash = item_splash(&world, &env, ATTACKER, axe, Position::new(4, 4));
    assert_eq!(splash.primary, Some(Position::new(4, 4)));
    assert!(splash.secondary.contains(&Position::new(5, 5)));
    assert!(!splash.secondary.contains(&Position::new(4, 5)));
}

#[test]
fn single_target_items_affect_only_an_occupied_tile() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    let sword = arm(&mut world, ATTACKER, "iron_sword", vec![]);

    let splash = item_splash(&world, &env, ATTACKER, sword, Position::new(3, 2));
    assert_eq!(splash.primary, Some(Position::new(3, 2)));
    assert!(splash.secondary.is_empty());

    let empty = item_splash(&world, &env, ATTACKER, sword, Position::new(7, 7));
    assert_eq!(empty.primary, None);
    assert!(item_splash_positions(&world, &env, ATTACKER, sword, Position::new(3, 2)).is_empty());
}

#[test]
fn valid_targets_respect_range_and_restrictions() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let mut world = duel(Position::new(2, 2), Position::new(3, 2));
    world
        .insert_unit(UnitState::new(UnitId(3), "far", Team::Enemy, Position::new(8, 8), 10))
        .expect("free tile");
    let sword = arm(&mut world, ATTACKER, "iron_sword", vec![]);
    assert_eq!(item_valid_targets(&world, &env, ATTACKER, sword), vec![DEFENDER]);

    let picky = arm(
        &mut world,
        ATTACKER,
        "picky_sword",
        vec![Component::EvalTargetRestrict(EvalTargetRestrict {
            expr: "false".into(),
        })],
    );
    assert!(item_valid_targets(&world, &env, ATTACKER, picky).is_empty());
}
