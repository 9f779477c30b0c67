//! Hero and enemy actions: decisions from the action policy, damage resolved
//! here.

use rand::RngCore;
use tracing::{debug, trace};

use buddy_ai::{ActionDecision, ActionPolicy};
use buddy_core::config::BattleConfig;
use buddy_core::constants::MIN_DAMAGE;
use buddy_core::enums::ActionKind;
use buddy_core::events::BattleEvent;
use buddy_core::state::BattleState;

/// Damage of a hero hit: `max(1, base * multiplier - def)`.
pub fn hero_damage(base_attack: f64, multiplier: f64, target_def: f64) -> f64 {
    (base_attack * multiplier - target_def).max(MIN_DAMAGE)
}

/// Damage of an enemy hit: `max(1, atk - hero_defense)`.
pub fn enemy_damage(enemy_atk: f64, hero_defense: f64) -> f64 {
    (enemy_atk - hero_defense).max(MIN_DAMAGE)
}

/// Every fighting hero picks an action and executes it against the enemies.
pub fn run_heroes(
    state: &mut BattleState,
    policy: &dyn ActionPolicy,
    rng: &mut dyn RngCore,
    busy: bool,
    config: &BattleConfig,
    events: &mut Vec<BattleEvent>,
) {
    for i in 0..state.heroes.len() {
        if !state.heroes[i].can_fight() {
            continue;
        }
        let decision = policy.decide_hero_action(&state.heroes[i], &state.enemies, busy, rng);
        execute_hero_action(state, i, &decision, config, events);
    }
}

fn execute_hero_action(
    state: &mut BattleState,
    hero_index: usize,
    decision: &ActionDecision,
    config: &BattleConfig,
    events: &mut Vec<BattleEvent>,
) {
    let multiplier = match decision.action {
        ActionKind::Attack => 1.0,
        ActionKind::Skill => config.crit_multiplier,
        _ => return,
    };
    let Some(target_id) = decision.target.as_deref() else {
        return;
    };
    let Some(target) = state
        .enemies
        .iter_mut()
        .find(|e| e.id == target_id && e.alive)
    else {
        return;
    };

    let damage = hero_damage(config.hero_base_attack, multiplier, target.def);
    let killed = target.take_damage(damage);
    let hero_id = state.heroes[hero_index].id.clone();
    trace!(hero = %hero_id, target = target_id, damage, killed, "hero hit");

    let target_id = target_id.to_string();
    events.push(if decision.action == ActionKind::Skill {
        BattleEvent::HeroSkill {
            hero_id,
            target_id,
            damage,
            killed,
        }
    } else {
        BattleEvent::HeroAttack {
            hero_id,
            target_id,
            damage,
            killed,
        }
    });
}

/// Every living enemy picks an action and executes it against the heroes.
///
/// A hero dropping to zero hp is downed on the spot and stops being a valid
/// target for the rest of the tick.
pub fn run_enemies(
    state: &mut BattleState,
    policy: &dyn ActionPolicy,
    rng: &mut dyn RngCore,
    config: &BattleConfig,
    events: &mut Vec<BattleEvent>,
) {
    for i in 0..state.enemies.len() {
        if !state.enemies[i].alive {
            continue;
        }
        let decision = policy.decide_enemy_action(&state.enemies[i], &state.heroes, rng);
        state.enemies[i].current_action = decision.action;

        if decision.action != ActionKind::Attack {
            continue;
        }
        let Some(target_id) = decision.target.as_deref() else {
            continue;
        };
        let Some(hero) = state
            .heroes
            .iter_mut()
            .find(|h| h.id == target_id && h.can_fight())
        else {
            continue;
        };

        let enemy = &state.enemies[i];
        let damage = enemy_damage(enemy.atk, config.hero_defense);
        hero.take_damage(damage);
        events.push(BattleEvent::EnemyAttack {
            enemy_id: enemy.id.clone(),
            target_id: hero.id.clone(),
            damage,
        });

        if hero.hp <= 0.0 {
            hero.enter_downed(config.recovery_duration);
            debug!(hero = %hero.id, "hero downed");
            events.push(BattleEvent::HeroDowned {
                hero_id: hero.id.clone(),
            });
        }
    }
}
