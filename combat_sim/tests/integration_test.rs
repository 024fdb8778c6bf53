//! Full battles driven through the public driver API

use combat_core::{BehaviorState, CombatEntity, RandomIds, Team};
use combat_sim::{Battle, Outcome, Scenario};

const SKIRMISH: &str = r#"
field_length = 1200
sight_range = 350
max_ms = 60000

[[heroes]]
template = "archer"
count = 3

[[enemies]]
template = "goblin"
"#;

fn battle(content: &str) -> (Battle, f64) {
    let scenario = Scenario::parse(content).unwrap();
    let roster = scenario.roster().unwrap();
    let battle = Battle::from_scenario(&scenario, &roster).unwrap();
    (battle, scenario.max_ms)
}

#[test]
fn test_archers_wipe_a_lone_goblin() {
    let (mut battle, max_ms) = battle(SKIRMISH);
    let report = battle.run(max_ms);

    assert_eq!(report.outcome, Outcome::TeamWiped(Team::Heroes));
    assert_eq!(report.enemies_lost, 1);
    assert_eq!(report.heroes_lost, 0);
    assert!(report.elapsed_ms < max_ms);

    let goblin = report.units.iter().find(|u| u.template == "goblin").unwrap();
    assert_eq!(goblin.state, Some(BehaviorState::Dead));
    assert_eq!(goblin.health, 0.0);

    let dealt: f64 = report
        .units
        .iter()
        .filter(|u| u.team == Team::Heroes)
        .map(|u| u.damage_dealt)
        .sum();
    assert!((dealt - 70.0).abs() < 1e-9);
}

#[test]
fn test_spawn_layout() {
    let (battle, _) = battle(SKIRMISH);
    let ids: Vec<&str> = battle.units().iter().map(|c| c.body().id()).collect();
    assert_eq!(
        ids,
        vec!["heroes-archer-0", "heroes-archer-1", "heroes-archer-2", "enemies-goblin-0"]
    );

    for combatant in battle.units() {
        assert!(combatant.is_in_state(BehaviorState::Moving));
    }
    // heroes face +x from the left base, enemies -x from the right one
    let goblin = battle.combatant("enemies-goblin-0").unwrap();
    assert!((goblin.body().position().x - 1160.0).abs() < 1e-9);
    assert_eq!(battle.structures().len(), 2);
}

#[test]
fn test_builtin_scenario_finishes() {
    let scenario = Scenario::builtin().unwrap();
    let roster = scenario.roster().unwrap();
    let mut battle = Battle::from_scenario(&scenario, &roster)
        .unwrap()
        .with_id_generator(Box::new(RandomIds::seeded(7)));

    let report = battle.run(scenario.max_ms);
    assert!(report.elapsed_ms <= scenario.max_ms + scenario.constants.tick_ms);

    let deaths: u32 = report.units.iter().map(|u| u.deaths).sum();
    assert_eq!(deaths, report.heroes_lost + report.enemies_lost);

    // revives only ever happen for revivable templates
    for unit in report.units.iter().filter(|u| u.template != "knight" && u.template != "paladin") {
        assert!(unit.deaths <= 1);
    }

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["units"].as_array().unwrap().len() == 13);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let scenario = Scenario::builtin().unwrap();
    let roster = scenario.roster().unwrap();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut battle = Battle::from_scenario(&scenario, &roster)
            .unwrap()
            .with_id_generator(Box::new(RandomIds::seeded(42)));
        let report = battle.run(30_000.0);
        runs.push((report.outcome, report.ticks, report.heroes_lost, report.enemies_lost));
    }
    assert_eq!(runs[0], runs[1]);
}
