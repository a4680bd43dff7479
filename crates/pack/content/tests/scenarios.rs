use std::fs;
use std::path::PathBuf;

use pack_content::ContentFactory;
use pack_core::{ActionLog, CombatEngine, Env, LiteralEvaluator, PcgRng, Position, UnitId};

fn shipped_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn shipped_scenarios_load_and_resolve() {
    let factory = ContentFactory::new(shipped_data());
    let config = factory.load_config().expect("config");
    let catalog = factory.load_catalog().expect("catalog");
    let names = factory.scenario_names().expect("scenarios");
    assert!(names.contains(&"poison_duel".to_owned()));

    for name in names {
        let scenario = factory.load_scenario(&name).expect("scenario");
        let map = factory.load_map(&scenario.map).expect("map");
        let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);
        let mut world = scenario.build_world(&catalog).expect("world");
        let specs = scenario.combat_specs(&world).expect("combats");

        let mut engine = CombatEngine::new(config.clone());
        let mut log = ActionLog::new();
        for spec in &specs {
            engine
                .resolve(&mut world, &mut log, &env, spec)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        assert_eq!(engine.arena().open_sessions(), 0, "{name}");
    }
}

#[test]
fn poison_duel_ends_with_a_poisoned_survivor() {
    let factory = ContentFactory::new(shipped_data());
    let catalog = factory.load_catalog().expect("catalog");
    let scenario = factory.load_scenario("poison_duel").expect("scenario");
    let map = factory.load_map(&scenario.map).expect("map");
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);
    let mut world = scenario.build_world(&catalog).expect("world");
    let specs = scenario.combat_specs(&world).expect("combats");

    let mut engine = CombatEngine::default();
    let mut log = ActionLog::new();
    engine
        .resolve(&mut world, &mut log, &env, &specs[0])
        .expect("valid combat");

    let bandit = world.unit(UnitId(2)).expect("bandit");
    assert_eq!(bandit.hp, 1);
    assert_eq!(bandit.stacks("poison"), 2);
}

#[test]
fn shove_wall_requests_the_collision_event() {
    let factory = ContentFactory::new(shipped_data());
    let catalog = factory.load_catalog().expect("catalog");
    let scenario = factory.load_scenario("shove_wall").expect("scenario");
    let map = factory.load_map(&scenario.map).expect("map");
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);
    let mut world = scenario.build_world(&catalog).expect("world");
    let specs = scenario.combat_specs(&world).expect("combats");

    let mut log = ActionLog::new();
    CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &specs[0])
        .expect("valid combat");

    let fighter = world.unit(UnitId(2)).expect("fighter");
    assert_eq!(fighter.position, Some(Position::new(5, 2)));
    let events = world.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].nid, "wall_slam");
}

#[test]
fn factory_reads_a_fresh_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("maps")).expect("maps dir");
    fs::create_dir_all(dir.path().join("scenarios")).expect("scenarios dir");
    fs::write(dir.path().join("config.toml"), "max_strikes = 2\n").expect("config");
    fs::write(
        dir.path().join("catalog.ron"),
        r#"(skills: [(nid: "poison", components: [], negative: true)], events: [])"#,
    )
    .expect("catalog");
    fs::write(dir.path().join("maps/tiny.ron"), "(dimensions: (3, 3))").expect("map");
    fs::write(
        dir.path().join("scenarios/tiny.ron"),
        r#"(
            map: "tiny",
            units: [
                (id: 1, nid: "a", team: Player, position: (x: 0, y: 0), hp: 5),
                (id: 2, nid: "b", team: Enemy, position: (x: 1, y: 0), hp: 5),
            ],
            combats: [(attacker: 1, defender: 2, strikes: [
                (striker: Attacker, outcome: Hit(damage: 1)),
                (striker: Defender, outcome: Hit(damage: 1)),
                (striker: Attacker, outcome: Hit(damage: 1)),
            ])],
        )"#,
    )
    .expect("scenario");
    fs::write(dir.path().join("scenarios/notes.txt"), "ignored").expect("notes");

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().expect("config");
    assert_eq!(config.max_strikes, 2);
    assert_eq!(factory.scenario_names().expect("names"), vec!["tiny".to_owned()]);

    let catalog = factory.load_catalog().expect("catalog");
    let scenario = factory.load_scenario("tiny").expect("scenario");
    let map = factory.load_map(&scenario.map).expect("map");
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);
    let mut world = scenario.build_world(&catalog).expect("world");
    let specs = scenario.combat_specs(&world).expect("combats");

    let mut log = ActionLog::new();
    let rejected = CombatEngine::new(config).resolve(&mut world, &mut log, &env, &specs[0]);
    assert!(rejected.is_err());
    assert!(log.is_empty());
}
