//! Battle state aggregate. Owned and mutated only by the battle loop; readers
//! get a shared reference or a clone after each tick.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyState, HeroState};
use crate::constants::ENEMY_ID_PREFIX;
use crate::enums::BattlePhase;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub phase: BattlePhase,
    /// Roster order is preserved and heroes are never removed.
    pub heroes: Vec<HeroState>,
    /// Spawn order.
    pub enemies: Vec<EnemyState>,
    /// Completed-task count seen on the previous tick.
    pub last_done_count: u32,
    pub spawn_timer: f64,
    pub resolve_timer: f64,
    pub victory_timer: f64,
    /// Monotonic counter behind `enemy_<n>` ids.
    pub enemy_id_counter: u64,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hero(&mut self, hero: HeroState) {
        self.heroes.push(hero);
    }

    pub fn add_enemy(&mut self, enemy: EnemyState) {
        self.enemies.push(enemy);
    }

    /// Allocate the next enemy instance id.
    pub fn next_enemy_id(&mut self) -> String {
        self.enemy_id_counter += 1;
        format!("{ENEMY_ID_PREFIX}{}", self.enemy_id_counter)
    }

    /// Drop dead enemies, returning them in their original order.
    pub fn remove_dead_enemies(&mut self) -> Vec<EnemyState> {
        let (alive, dead): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.enemies).into_iter().partition(|e| e.alive);
        self.enemies = alive;
        dead
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn fighting_hero_count(&self) -> usize {
        self.heroes.iter().filter(|h| h.can_fight()).count()
    }

    pub fn hero(&self, id: &str) -> Option<&HeroState> {
        self.heroes.iter().find(|h| h.id == id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Record the latest done count and return how many tasks completed
    /// since the previous observation. Decreases are floored at zero.
    pub fn observe_done_count(&mut self, done_tasks: u32) -> u32 {
        let completed = done_tasks.saturating_sub(self.last_done_count);
        self.last_done_count = done_tasks;
        completed
    }
}
