mod common;

use common::*;
use pack_core::components::item::{EventAfterCombat, HealOnHit, StatusAfterCombat, StatusOnHit};
use pack_core::components::skill::{
    ACTIVE, Charge, ChargeVariant, CostUses, LOSE_USES_ON_MISS, Proc, StatusWhenDamaged, USES,
};
use pack_core::{
    ActionLog, CombatEngine, Component, DataBag, Env, LiteralEvaluator, PcgRng, Position, Strike,
    StrikeOutcome,
};

fn tiles() -> (Position, Position) {
    (Position::new(2, 2), Position::new(3, 2))
}

#[test]
fn status_after_combat_grants_once_per_use() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let fang = arm(
        &mut world,
        ATTACKER,
        "venom_fang",
        vec![Component::StatusAfterCombat(StatusAfterCombat {
            skill: "poison".into(),
        })],
    );
    let club = arm(&mut world, ATTACKER, "club", vec![]);
    let mut log = ActionLog::new();
    let mut engine = CombatEngine::default();

    let report = engine
        .resolve(&mut world, &mut log, &env, &combat(Some(fang), vec![miss()]))
        .expect("first combat");
    let defender = world.unit(DEFENDER).expect("defender");
    assert_eq!(defender.stacks("poison"), 1);
    assert_eq!(defender.skill_by_nid("poison").and_then(|s| s.initiator), Some(ATTACKER));
    assert_eq!(report.playback.with_nid("status_hit").count(), 1);

    engine
        .resolve(&mut world, &mut log, &env, &combat(Some(club), vec![hit(1)]))
        .expect("second combat");
    assert_eq!(world.unit(DEFENDER).map(|u| u.stacks("poison")), Some(1));
}

#[test]
fn status_when_damaged_needs_an_actual_wound() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    learn(
        &mut world,
        DEFENDER,
        "vigilance",
        vec![Component::StatusWhenDamaged(StatusWhenDamaged {
            skill: "wary".into(),
        })],
    );
    let mut log = ActionLog::new();
    let mut engine = CombatEngine::default();

    let report = engine
        .resolve(&mut world, &mut log, &env, &combat(None, vec![miss(), miss()]))
        .expect("missed combat");
    assert!(!world.unit(DEFENDER).expect("defender").has_skill("wary"));
    assert_eq!(report.playback.with_nid("status_hit").count(), 0);

    let report = engine
        .resolve(&mut world, &mut log, &env, &combat(None, vec![miss(), hit(4)]))
        .expect("wounding combat");
    let defender = world.unit(DEFENDER).expect("defender");
    assert_eq!(defender.stacks("wary"), 1);
    assert_eq!(defender.skill_by_nid("wary").and_then(|s| s.initiator), Some(ATTACKER));
    assert_eq!(report.playback.with_nid("status_hit").count(), 1);
}

#[test]
fn steal_skips_locked_items_and_the_weapon_in_use() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let gloves = arm(&mut world, ATTACKER, "thief_gloves", vec![Component::StealPlus]);
    let vulnerary = arm(&mut world, DEFENDER, "vulnerary", vec![]);
    let axe = arm(&mut world, DEFENDER, "iron_axe", vec![]);
    let ring = arm_with(
        &mut world,
        DEFENDER,
        "family_ring",
        DataBag::new().with("locked", true),
        vec![],
    );
    let mut spec = combat(Some(gloves), vec![hit(1), hit(1)]);
    spec.defender_item = Some(axe);
    let mut log = ActionLog::new();

    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &spec)
        .expect("valid combat");

    assert_eq!(report.playback.with_nid("steal_hit").count(), 1);
    let attacker = world.unit(ATTACKER).expect("attacker");
    let defender = world.unit(DEFENDER).expect("defender");
    assert!(attacker.item(vulnerary).is_some());
    assert!(defender.item(vulnerary).is_none());
    assert!(defender.item(axe).is_some());
    assert!(defender.item(ring).is_some());
}

#[test]
fn heal_on_hit_restores_the_wielder() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let nosferatu = arm(
        &mut world,
        ATTACKER,
        "nosferatu",
        vec![Component::HealOnHit(HealOnHit { amount: 5 })],
    );
    let counter = Strike::defender(StrikeOutcome::Hit { damage: 10 });
    let mut log = ActionLog::new();

    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(nosferatu), vec![counter, miss(), hit(2)]))
        .expect("valid combat");

    assert_eq!(hp(&world, ATTACKER), 25);
    assert_eq!(hp(&world, DEFENDER), 28);
    assert_eq!(report.playback.with_nid("heal_hit").count(), 1);
}

#[test]
fn restore_strips_only_negative_statuses() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let staff = arm(&mut world, ATTACKER, "restore_staff", vec![Component::RestoreAfterCombat]);
    learn(&mut world, DEFENDER, "poison", vec![]);
    learn(&mut world, DEFENDER, "poison", vec![]);
    learn(&mut world, DEFENDER, "wary", vec![]);
    let mut log = ActionLog::new();

    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(staff), vec![miss()]))
        .expect("valid combat");

    let defender = world.unit(DEFENDER).expect("defender");
    assert_eq!(defender.stacks("poison"), 0);
    assert_eq!(defender.stacks("wary"), 1);
    assert_eq!(report.playback.with_nid("restore").count(), 1);
}

#[test]
fn event_after_combat_queues_only_known_events() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let horn = arm(
        &mut world,
        ATTACKER,
        "war_horn",
        vec![Component::EventAfterCombat(EventAfterCombat {
            event: "wall_slam".into(),
        })],
    );
    let flute = arm(
        &mut world,
        ATTACKER,
        "odd_flute",
        vec![Component::EventAfterCombat(EventAfterCombat {
            event: "no_such_event".into(),
        })],
    );
    let mut log = ActionLog::new();
    let mut engine = CombatEngine::default();

    engine
        .resolve(&mut world, &mut log, &env, &combat(Some(flute), vec![miss()]))
        .expect("unknown event combat");
    assert!(world.pending_events().is_empty());

    engine
        .resolve(&mut world, &mut log, &env, &combat(Some(horn), vec![miss()]))
        .expect("known event combat");
    let events = world.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].nid, "wall_slam");
    assert_eq!(events[0].unit, ATTACKER);
    assert_eq!(events[0].position, Some(to));
}

#[test]
fn once_per_combat_proc_fires_once_and_resets_at_cleanup() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let astra = learn(
        &mut world,
        ATTACKER,
        "astra",
        vec![
            Component::Proc(Proc {
                rate: 100,
                skill: "luna_effect".into(),
                weapon: None,
            }),
            Component::Charge(Charge {
                variant: ChargeVariant::OncePerCombat,
                trigger_at_end_combat: false,
                ..Charge::default()
            }),
        ],
    );
    let mut log = ActionLog::new();
    let mut engine = CombatEngine::default();

    for _ in 0..2 {
        let report = engine
            .resolve(&mut world, &mut log, &env, &combat(None, vec![hit(1); 3]))
            .expect("valid combat");
        assert_eq!(report.playback.with_nid("proc_activated").count(), 1);

        let attacker = world.unit(ATTACKER).expect("attacker");
        assert!(!attacker.has_skill("luna_effect"));
        let skill = attacker.skill(astra).expect("proc skill");
        assert!(!skill.data.flag(ACTIVE));
    }
    assert_eq!(hp(&world, DEFENDER), 24);
}

#[test]
fn cost_uses_on_miss_honours_lose_uses_on_miss() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let lance = arm_with(&mut world, ATTACKER, "iron_lance", DataBag::new().with(USES, 10), vec![]);
    let javelin = arm_with(
        &mut world,
        ATTACKER,
        "javelin",
        DataBag::new().with(USES, 10).with(LOSE_USES_ON_MISS, true),
        vec![],
    );
    learn(
        &mut world,
        ATTACKER,
        "heavy_thrust",
        vec![Component::CostUses(CostUses { amount: 2 })],
    );
    let uses = |world: &pack_core::WorldState, item| world.item(item).and_then(|i| i.data.int(USES));
    let mut log = ActionLog::new();
    let mut engine = CombatEngine::default();

    engine
        .resolve(&mut world, &mut log, &env, &combat(Some(lance), vec![miss()]))
        .expect("lance combat");
    assert_eq!(uses(&world, lance), Some(8));

    engine
        .resolve(&mut world, &mut log, &env, &combat(Some(javelin), vec![miss()]))
        .expect("javelin combat");
    assert_eq!(uses(&world, javelin), Some(9));
}

#[test]
fn crit_falls_back_to_on_hit_effects() {
    let map = board();
    let catalog = catalog();
    let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);

    let (at, to) = tiles();
    let mut world = duel(at, to);
    let venin = arm(
        &mut world,
        ATTACKER,
        "venin_edge",
        vec![Component::StatusOnHit(StatusOnHit {
            skill: "poison".into(),
        })],
    );
    let crit = Strike::attacker(StrikeOutcome::Crit { damage: 9 });
    let mut log = ActionLog::new();

    let report = CombatEngine::default()
        .resolve(&mut world, &mut log, &env, &combat(Some(venin), vec![crit]))
        .expect("valid combat");

    assert_eq!(hp(&world, DEFENDER), 21);
    assert!(world.unit(DEFENDER).expect("defender").has_skill("poison"));
    assert_eq!(report.playback.with_nid("crit_hit").count(), 1);
    assert_eq!(report.playback.with_nid("status_hit").count(), 1);
}
