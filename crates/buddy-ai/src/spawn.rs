//! Spawn pressure: how many enemies should be alive and which to create next.

use rand::{Rng, RngCore};

use buddy_core::config::{BattleConfig, EnemyPoolEntry, SpawnParams};

/// Decides spawn targets, pacing and templates.
pub trait SpawnPolicy: Send {
    /// Enemies that should be alive for the given open task count.
    fn target_alive_count(&self, open_tasks: u32) -> usize;

    /// Seconds until the next spawn attempt.
    fn spawn_delay(&self, rng: &mut dyn RngCore) -> f64;

    /// Template id of the next enemy, or `None` when the pool is empty.
    fn pick_template_id(&self, rng: &mut dyn RngCore) -> Option<&str>;
}

/// Spawn pressure that scales linearly with outstanding work.
#[derive(Debug, Clone)]
pub struct DefaultSpawnPolicy {
    params: SpawnParams,
    pool: Vec<EnemyPoolEntry>,
    total_weight: f64,
}

impl DefaultSpawnPolicy {
    pub fn new(params: SpawnParams, pool: Vec<EnemyPoolEntry>) -> Self {
        let total_weight = pool.iter().map(|e| e.weight).sum();
        Self {
            params,
            pool,
            total_weight,
        }
    }

    pub fn from_config(config: &BattleConfig) -> Self {
        Self::new(config.spawn, config.enemy_pool.clone())
    }

    pub fn params(&self) -> &SpawnParams {
        &self.params
    }
}

impl SpawnPolicy for DefaultSpawnPolicy {
    fn target_alive_count(&self, open_tasks: u32) -> usize {
        let per_task = open_tasks.saturating_mul(self.params.alive_per_task);
        self.params.base_alive_count.saturating_add(per_task) as usize
    }

    fn spawn_delay(&self, rng: &mut dyn RngCore) -> f64 {
        let range = self.params.respawn_delay_max - self.params.respawn_delay_min;
        self.params.respawn_delay_min + rng.gen::<f64>() * range
    }

    fn pick_template_id(&self, rng: &mut dyn RngCore) -> Option<&str> {
        let first = self.pool.first()?;

        let mut roll = rng.gen::<f64>() * self.total_weight;
        for entry in &self.pool {
            roll -= entry.weight;
            if roll <= 0.0 {
                return Some(entry.id.as_str());
            }
        }

        // Rounding left a sliver of weight unclaimed.
        Some(first.id.as_str())
    }
}
