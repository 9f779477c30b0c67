//! Per-tick action decisions for heroes and enemies.
//!
//! Decisions only name an action and a target. Damage is resolved by the
//! battle loop.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use buddy_core::components::{EnemyState, HeroState};
use buddy_core::config::BattleConfig;
use buddy_core::constants::{BUSY_IDLE_CHANCE, SKILL_CHANCE};
use buddy_core::enums::ActionKind;

/// What an entity does this tick, and to whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDecision {
    pub action: ActionKind,
    /// Target entity id for `Attack` and `Skill`.
    pub target: Option<String>,
}

impl ActionDecision {
    pub fn idle() -> Self {
        Self::untargeted(ActionKind::Idle)
    }

    pub fn heal() -> Self {
        Self::untargeted(ActionKind::Heal)
    }

    pub fn die() -> Self {
        Self::untargeted(ActionKind::Die)
    }

    pub fn attack(target: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Attack,
            target: Some(target.into()),
        }
    }

    pub fn skill(target: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Skill,
            target: Some(target.into()),
        }
    }

    fn untargeted(action: ActionKind) -> Self {
        Self {
            action,
            target: None,
        }
    }
}

/// Decides what heroes and enemies do.
pub trait ActionPolicy: Send {
    fn decide_hero_action(
        &self,
        hero: &HeroState,
        enemies: &[EnemyState],
        busy: bool,
        rng: &mut dyn RngCore,
    ) -> ActionDecision;

    fn decide_enemy_action(
        &self,
        enemy: &EnemyState,
        heroes: &[HeroState],
        rng: &mut dyn RngCore,
    ) -> ActionDecision;
}

/// Weighted-random policy used by the desktop companion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultActionPolicy {
    /// Chance a fighting hero uses its skill.
    pub skill_chance: f64,
    /// Chance a hero idles while the assistant is busy.
    pub busy_idle_chance: f64,
}

impl Default for DefaultActionPolicy {
    fn default() -> Self {
        Self {
            skill_chance: SKILL_CHANCE,
            busy_idle_chance: BUSY_IDLE_CHANCE,
        }
    }
}

impl DefaultActionPolicy {
    pub fn new(skill_chance: f64, busy_idle_chance: f64) -> Self {
        Self {
            skill_chance,
            busy_idle_chance,
        }
    }

    pub fn from_config(config: &BattleConfig) -> Self {
        Self::new(config.skill_chance, config.busy_idle_chance)
    }
}

impl ActionPolicy for DefaultActionPolicy {
    fn decide_hero_action(
        &self,
        hero: &HeroState,
        enemies: &[EnemyState],
        busy: bool,
        rng: &mut dyn RngCore,
    ) -> ActionDecision {
        if !hero.can_fight() {
            return ActionDecision::heal();
        }

        let alive: Vec<&EnemyState> = enemies.iter().filter(|e| e.alive).collect();
        if alive.is_empty() {
            return ActionDecision::idle();
        }

        // Busy work calms the scene down.
        if busy && rng.gen::<f64>() < self.busy_idle_chance {
            return ActionDecision::idle();
        }

        let use_skill = rng.gen::<f64>() < self.skill_chance;
        let Some(target) = alive.choose(rng) else {
            return ActionDecision::idle();
        };
        if use_skill {
            ActionDecision::skill(target.id.as_str())
        } else {
            ActionDecision::attack(target.id.as_str())
        }
    }

    fn decide_enemy_action(
        &self,
        enemy: &EnemyState,
        heroes: &[HeroState],
        rng: &mut dyn RngCore,
    ) -> ActionDecision {
        if !enemy.alive {
            return ActionDecision::die();
        }

        let fighting: Vec<&HeroState> = heroes.iter().filter(|h| h.can_fight()).collect();
        match fighting.choose(rng) {
            Some(target) => ActionDecision::attack(target.id.as_str()),
            None => ActionDecision::idle(),
        }
    }
}
