//! Tests for the battle engine, phase machine and combat systems.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::RngCore;

use buddy_ai::{ActionDecision, ActionPolicy, SpawnPolicy};
use buddy_core::components::{EnemyState, HeroState};
use buddy_core::config::{BattleConfig, UnitStats};
use buddy_core::enums::{BattlePhase, CombatStatus};
use buddy_core::events::BattleEvent;
use buddy_core::signal::WorkSignal;

use crate::engine::{BattleEngine, SavedBattle, SimConfig};
use crate::systems::combat::{enemy_damage, hero_damage};

// ---- Scripted policies ----

/// Always spawns the same template after a fixed delay.
struct ScriptedSpawn {
    template: &'static str,
    delay: f64,
    base: usize,
    per_task: usize,
}

impl SpawnPolicy for ScriptedSpawn {
    fn target_alive_count(&self, open_tasks: u32) -> usize {
        self.base + open_tasks as usize * self.per_task
    }

    fn spawn_delay(&self, _rng: &mut dyn RngCore) -> f64 {
        self.delay
    }

    fn pick_template_id(&self, _rng: &mut dyn RngCore) -> Option<&str> {
        Some(self.template)
    }
}

/// Heroes hit the first living enemy, enemies hit the first fighting hero.
struct FocusFire {
    skill: bool,
}

impl ActionPolicy for FocusFire {
    fn decide_hero_action(
        &self,
        hero: &HeroState,
        enemies: &[EnemyState],
        _busy: bool,
        _rng: &mut dyn RngCore,
    ) -> ActionDecision {
        if !hero.can_fight() {
            return ActionDecision::heal();
        }
        match enemies.iter().find(|e| e.alive) {
            Some(target) if self.skill => ActionDecision::skill(target.id.as_str()),
            Some(target) => ActionDecision::attack(target.id.as_str()),
            None => ActionDecision::idle(),
        }
    }

    fn decide_enemy_action(
        &self,
        enemy: &EnemyState,
        heroes: &[HeroState],
        _rng: &mut dyn RngCore,
    ) -> ActionDecision {
        assert!(enemy.alive, "dead enemy {} was asked to act", enemy.id);
        match heroes.iter().find(|h| h.can_fight()) {
            Some(target) => ActionDecision::attack(target.id.as_str()),
            None => ActionDecision::idle(),
        }
    }
}

/// Nobody does anything.
struct Passive;

impl ActionPolicy for Passive {
    fn decide_hero_action(
        &self,
        _hero: &HeroState,
        _enemies: &[EnemyState],
        _busy: bool,
        _rng: &mut dyn RngCore,
    ) -> ActionDecision {
        ActionDecision::idle()
    }

    fn decide_enemy_action(
        &self,
        _enemy: &EnemyState,
        _heroes: &[HeroState],
        _rng: &mut dyn RngCore,
    ) -> ActionDecision {
        ActionDecision::idle()
    }
}

// ---- Helpers ----

fn config_with_enemy(stats: UnitStats) -> BattleConfig {
    let mut enemy_stats = BTreeMap::new();
    enemy_stats.insert("orc".to_string(), stats);
    BattleConfig {
        enemy_stats,
        ..Default::default()
    }
}

fn orc() -> UnitStats {
    UnitStats {
        hp: 50.0,
        atk: 10.0,
        def: 3.0,
        spd: 0.9,
    }
}

fn scripted_engine(
    config: BattleConfig,
    spawn: ScriptedSpawn,
    action: impl ActionPolicy + 'static,
) -> BattleEngine {
    let mut engine =
        BattleEngine::new(SimConfig::default(), config, Box::new(spawn), Box::new(action)).unwrap();
    engine.add_hero("hero1", "soldier", 100.0);
    engine
}

fn one_orc_spawn(delay: f64) -> ScriptedSpawn {
    ScriptedSpawn {
        template: "orc",
        delay,
        base: 1,
        per_task: 0,
    }
}

/// Tick through Dormant and SessionStart.
fn enter_combat(engine: &mut BattleEngine, signal: &WorkSignal) {
    engine.tick(0.1, signal);
    assert_eq!(engine.phase(), BattlePhase::SessionStart);
    engine.tick(0.1, signal);
    assert_eq!(engine.phase(), BattlePhase::Combat);
}

fn count(events: &[BattleEvent], kind: &str) -> usize {
    events.iter().filter(|e| e.kind() == kind).count()
}

// ---- Phase machine ----

#[test]
fn test_dormant_without_tasks() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), FocusFire { skill: false });
    let signal = WorkSignal::new(0, 0, true);
    for i in 0..500 {
        let events = engine.tick(0.05 * (i % 7) as f64, &signal);
        assert!(events.is_empty());
        assert_eq!(engine.phase(), BattlePhase::Dormant);
    }
    assert!(engine.state().enemies.is_empty());
}

#[test]
fn test_session_start_lasts_one_tick() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), Passive);
    let signal = WorkSignal::new(3, 0, false);

    let events = engine.tick(0.1, &signal);
    assert_eq!(
        events,
        vec![BattleEvent::PhaseChange {
            phase: BattlePhase::SessionStart
        }]
    );

    let events = engine.tick(0.1, &signal);
    assert_eq!(
        events,
        vec![BattleEvent::PhaseChange {
            phase: BattlePhase::Combat
        }]
    );
    assert!(engine.state().enemies.is_empty(), "no spawning on the entrance tick");

    let events = engine.tick(0.1, &signal);
    assert_eq!(count(&events, "enemy_spawn"), 1);
    assert_eq!(count(&events, "phase_change"), 0);
}

#[test]
fn test_task_completion_enters_resolve() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), Passive);
    enter_combat(&mut engine, &WorkSignal::new(5, 0, false));
    engine.tick(0.1, &WorkSignal::new(5, 0, false));

    let events = engine.tick(0.1, &WorkSignal::new(5, 2, false));
    let resolved: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::TodoResolved { count } => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(resolved, vec![2]);
    assert_eq!(engine.phase(), BattlePhase::ResolveTodo);
}

#[test]
fn test_resolve_clears_board_then_returns_to_combat() {
    let spawn = ScriptedSpawn {
        template: "orc",
        delay: 0.1,
        base: 0,
        per_task: 1,
    };
    let mut engine = scripted_engine(BattleConfig::default(), spawn, Passive);
    let signal = WorkSignal::new(3, 0, false);
    enter_combat(&mut engine, &signal);
    for _ in 0..5 {
        engine.tick(0.1, &signal);
    }
    assert_eq!(engine.state().alive_enemy_count(), 3);

    let events = engine.tick(0.1, &WorkSignal::new(3, 1, false));
    assert_eq!(engine.phase(), BattlePhase::ResolveTodo);
    assert_eq!(count(&events, "enemy_death"), 3);
    assert!(engine.state().enemies.is_empty());

    // resolve_duration is 1s; 0.9s remain.
    let events = engine.tick(0.5, &WorkSignal::new(3, 1, false));
    assert!(events.is_empty());
    assert_eq!(engine.phase(), BattlePhase::ResolveTodo);

    let events = engine.tick(0.5, &WorkSignal::new(3, 1, false));
    assert_eq!(
        events,
        vec![BattleEvent::PhaseChange {
            phase: BattlePhase::Combat
        }]
    );
}

#[test]
fn test_victory_emitted_once() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), Passive);
    // Tasks already done when the session is first seen.
    let signal = WorkSignal::new(2, 2, false);
    enter_combat(&mut engine, &signal);

    let mut victories = 0;
    let mut ticks = 0;
    loop {
        let events = engine.tick(0.5, &signal);
        victories += count(&events, "victory");
        ticks += 1;
        if engine.phase() == BattlePhase::Dormant {
            break;
        }
        assert_eq!(engine.phase(), BattlePhase::Victory);
        assert!(ticks < 20, "victory never expired");
    }
    assert_eq!(victories, 1);
    assert_eq!(ticks, 6);
    // Dormant keeps the roster.
    assert_eq!(engine.state().heroes.len(), 1);
}

#[test]
fn test_victory_wins_over_resolve_in_same_tick() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), Passive);
    enter_combat(&mut engine, &WorkSignal::new(2, 0, false));
    engine.tick(0.1, &WorkSignal::new(2, 0, false));

    let events = engine.tick(0.1, &WorkSignal::new(2, 2, false));
    assert_eq!(
        events,
        vec![
            BattleEvent::PhaseChange {
                phase: BattlePhase::ResolveTodo
            },
            BattleEvent::TodoResolved { count: 2 },
            BattleEvent::PhaseChange {
                phase: BattlePhase::Victory
            },
            BattleEvent::Victory,
        ]
    );
    assert_eq!(engine.phase(), BattlePhase::Victory);
    // Victory does not touch entities.
    assert_eq!(engine.state().enemies.len(), 1);
}

#[test]
fn test_completions_outside_combat_are_absorbed() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(1.0), Passive);
    engine.tick(0.1, &WorkSignal::new(4, 1, false));
    engine.tick(0.1, &WorkSignal::new(4, 2, false));
    assert_eq!(engine.phase(), BattlePhase::Combat);

    let events = engine.tick(0.1, &WorkSignal::new(4, 2, false));
    assert_eq!(count(&events, "todo_resolved"), 0);
    assert_eq!(engine.phase(), BattlePhase::Combat);
}

// ---- Spawning ----

#[test]
fn test_spawn_timer_held_at_zero_when_target_met() {
    let mut engine = scripted_engine(BattleConfig::default(), one_orc_spawn(2.0), Passive);
    let signal = WorkSignal::new(1, 0, false);
    enter_combat(&mut engine, &signal);

    engine.tick(0.1, &signal);
    assert_eq!(engine.state().enemies.len(), 1);
    assert_eq!(engine.state().spawn_timer, 2.0);

    engine.tick(0.1, &signal);
    assert_eq!(engine.state().spawn_timer, 0.0);
}

#[test]
fn test_spawn_fills_to_target() {
    let spawn = ScriptedSpawn {
        template: "orc",
        delay: 0.5,
        base: 1,
        per_task: 1,
    };
    let mut engine = scripted_engine(BattleConfig::default(), spawn, Passive);
    let signal = WorkSignal::new(2, 0, false);
    enter_combat(&mut engine, &signal);

    for _ in 0..10 {
        engine.tick(0.5, &signal);
        assert!(engine.state().alive_enemy_count() <= 3);
    }
    let ids: Vec<_> = engine.state().enemies.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["enemy_1", "enemy_2", "enemy_3"]);
}

#[test]
fn test_missing_template_skips_spawn() {
    let spawn = ScriptedSpawn {
        template: "ghost",
        delay: 1.5,
        base: 1,
        per_task: 0,
    };
    let mut engine = scripted_engine(BattleConfig::default(), spawn, Passive);
    let signal = WorkSignal::new(1, 0, false);
    enter_combat(&mut engine, &signal);

    let events = engine.tick(0.1, &signal);
    assert_eq!(count(&events, "enemy_spawn"), 0);
    assert!(engine.state().enemies.is_empty());
    assert_eq!(engine.state().spawn_timer, 1.5);
    assert_eq!(engine.state().enemy_id_counter, 0);
}

#[test]
fn test_enemy_ids_unique_across_respawns() {
    let mut config = config_with_enemy(orc());
    config.hero_base_attack = 1000.0;
    let spawn = ScriptedSpawn {
        template: "orc",
        delay: 0.0,
        base: 2,
        per_task: 0,
    };
    let mut engine = scripted_engine(config, spawn, FocusFire { skill: false });
    let signal = WorkSignal::new(1, 0, false);
    enter_combat(&mut engine, &signal);

    let mut spawned = std::collections::HashSet::new();
    let mut dead = std::collections::HashSet::new();
    for _ in 0..50 {
        for event in engine.tick(0.1, &signal) {
            match event {
                BattleEvent::EnemySpawn { enemy_id, .. } => {
                    assert!(spawned.insert(enemy_id), "duplicate enemy id");
                }
                BattleEvent::EnemyDeath { enemy_id } => {
                    dead.insert(enemy_id);
                }
                _ => {}
            }
        }
        for enemy in &engine.state().enemies {
            assert!(enemy.alive);
            assert!(!dead.contains(&enemy.id), "{} came back", enemy.id);
        }
    }
    assert!(spawned.len() > 10);
}

// ---- Combat ----

#[test]
fn test_damage_formulas() {
    assert_eq!(hero_damage(10.0, 2.0, 3.0), 17.0);
    assert_eq!(hero_damage(10.0, 1.0, 3.0), 7.0);
    assert_eq!(hero_damage(1.0, 1.0, 50.0), 1.0);
    assert_eq!(enemy_damage(10.0, 5.0), 5.0);
    assert_eq!(enemy_damage(2.0, 5.0), 1.0);
}

#[test]
fn test_skill_hit_uses_crit_multiplier() {
    let config = config_with_enemy(UnitStats {
        hp: 100.0,
        atk: 10.0,
        def: 3.0,
        spd: 1.0,
    });
    let mut engine = scripted_engine(config, one_orc_spawn(5.0), FocusFire { skill: true });
    let signal = WorkSignal::new(1, 0, false);
    enter_combat(&mut engine, &signal);

    let events = engine.tick(0.1, &signal);
    assert!(events.contains(&BattleEvent::HeroSkill {
        hero_id: "hero1".into(),
        target_id: "enemy_1".into(),
        damage: 17.0,
        killed: false,
    }));
    assert!(events.contains(&BattleEvent::EnemyAttack {
        enemy_id: "enemy_1".into(),
        target_id: "hero1".into(),
        damage: 5.0,
    }));
    assert_eq!(engine.state().enemies[0].hp, 83.0);
    assert_eq!(engine.state().heroes[0].hp, 95.0);
}

#[test]
fn test_hero_downed_and_recovers_once() {
    let config = config_with_enemy(UnitStats {
        hp: 10_000.0,
        atk: 300.0,
        def: 0.0,
        spd: 1.0,
    });
    let mut engine = scripted_engine(config, one_orc_spawn(5.0), FocusFire { skill: false });
    let signal = WorkSignal::new(1, 0, false);
    enter_combat(&mut engine, &signal);

    let events = engine.tick(0.1, &signal);
    let kinds: Vec<_> = events.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec!["enemy_spawn", "hero_attack", "enemy_attack", "hero_downed"]
    );
    let hero = &engine.state().heroes[0];
    assert_eq!(hero.status, CombatStatus::Downed);
    assert_eq!(hero.hp, 0.0);
    assert_eq!(hero.downtime_remaining, 10.0);

    // Enemies idle while nobody can fight.
    let events = engine.tick(1.0, &signal);
    assert_eq!(count(&events, "enemy_attack"), 0);
    assert!((engine.state().heroes[0].hp - 20.0).abs() < 1e-9);

    let mut recovered = 0;
    for _ in 0..4 {
        let events = engine.tick(1.0, &signal);
        recovered += count(&events, "hero_recovered");
    }
    assert_eq!(recovered, 1);
}

// ---- Determinism and save/restore ----

fn signal_at(step: usize) -> WorkSignal {
    let done = (step / 40).min(5) as u32;
    WorkSignal::new(6, done, step % 9 < 4)
}

fn default_engine(seed: u64) -> BattleEngine {
    let mut engine =
        BattleEngine::with_default_policies(SimConfig { seed }, BattleConfig::default()).unwrap();
    engine.add_hero("hero1", "soldier", 100.0);
    engine.add_hero("hero2", "archer", 80.0);
    engine
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = default_engine(12345);
    let mut engine_b = default_engine(12345);

    for step in 0..300 {
        let signal = signal_at(step);
        let events_a = serde_json::to_string(&engine_a.tick(0.1, &signal)).unwrap();
        let events_b = serde_json::to_string(&engine_b.tick(0.1, &signal)).unwrap();
        assert_eq!(events_a, events_b, "events diverged at step {step}");
    }
    assert_eq!(engine_a.snapshot(), engine_b.snapshot());
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = default_engine(111);
    let mut engine_b = default_engine(222);

    let mut diverged = false;
    for step in 0..300 {
        let signal = signal_at(step);
        if engine_a.tick(0.1, &signal) != engine_b.tick(0.1, &signal) {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent battles");
}

#[test]
fn test_save_restore_resumes_identically() {
    let mut original = default_engine(7);
    for step in 0..60 {
        original.tick(0.1, &signal_at(step));
    }
    assert_eq!(original.phase(), BattlePhase::Combat);

    let json = serde_json::to_string(&original.save()).unwrap();
    let saved: SavedBattle = serde_json::from_str(&json).unwrap();
    let config = BattleConfig::default();
    let mut restored = BattleEngine::restore(
        saved,
        config.clone(),
        Box::new(buddy_ai::DefaultSpawnPolicy::from_config(&config)),
        Box::new(buddy_ai::DefaultActionPolicy::from_config(&config)),
    )
    .unwrap();

    for step in 60..260 {
        let signal = signal_at(step);
        assert_eq!(
            original.tick(0.1, &signal),
            restored.tick(0.1, &signal),
            "resumed run diverged at step {step}"
        );
    }
    assert_eq!(original.snapshot(), restored.snapshot());
}

#[test]
fn test_invalid_config_rejected() {
    let config = BattleConfig {
        heal_interval: 0.0,
        ..Default::default()
    };
    assert!(BattleEngine::with_default_policies(SimConfig::default(), config).is_err());
}

// ---- Properties ----

proptest! {
    #[test]
    fn prop_dormant_without_tasks(
        dts in prop::collection::vec(0.0f64..5.0, 1..50),
        busy in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut engine = default_engine(seed);
        let signal = WorkSignal::new(0, 0, busy);
        for dt in dts {
            let events = engine.tick(dt, &signal);
            prop_assert!(events.is_empty());
            prop_assert_eq!(engine.phase(), BattlePhase::Dormant);
        }
    }

    #[test]
    fn prop_hero_hp_and_spawn_bounds(
        steps in prop::collection::vec((0.0f64..0.5, 0u32..2, any::<bool>()), 1..200),
        seed in any::<u64>(),
    ) {
        let total = 6;
        let mut config = config_with_enemy(UnitStats { hp: 30.0, atk: 40.0, def: 1.0, spd: 1.0 });
        config.spawn.respawn_delay_min = 0.0;
        config.spawn.respawn_delay_max = 0.3;
        let mut engine = BattleEngine::with_default_policies(SimConfig { seed }, config.clone()).unwrap();
        engine.add_hero("hero1", "soldier", 100.0);
        engine.add_hero("hero2", "archer", 60.0);

        let mut done = 0;
        for (dt, completed, busy) in steps {
            // Stop short of victory so leftover enemies never carry over.
            done = (done + completed).min(total - 1);
            let signal = WorkSignal::new(total, done, busy);
            engine.tick(dt, &signal);

            for hero in &engine.state().heroes {
                prop_assert!(hero.hp >= 0.0 && hero.hp <= hero.max_hp);
                if hero.status == CombatStatus::Combat {
                    prop_assert_eq!(hero.downtime_remaining, 0.0);
                }
            }
            if engine.phase() == BattlePhase::Combat {
                let target = (config.spawn.base_alive_count
                    + signal.open_tasks * config.spawn.alive_per_task) as usize;
                prop_assert!(engine.state().alive_enemy_count() <= target + 1);
            }
        }
    }
}
