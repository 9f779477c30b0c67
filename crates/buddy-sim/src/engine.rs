//! Battle engine: the per-tick orchestrator.
//!
//! `BattleEngine` owns the `BattleState`, the injected spawn and action
//! policies and the seeded RNG. Each `tick` checks phase transitions, runs the
//! systems for the current phase and returns the events produced. Completely
//! headless, so a fixed seed and signal sequence replays exactly.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use buddy_ai::{ActionPolicy, DefaultActionPolicy, DefaultSpawnPolicy, SpawnPolicy};
use buddy_core::components::HeroState;
use buddy_core::config::{BattleConfig, ConfigError};
use buddy_core::enums::BattlePhase;
use buddy_core::events::BattleEvent;
use buddy_core::signal::WorkSignal;
use buddy_core::state::BattleState;

use crate::phase;
use crate::systems;

/// Configuration for starting a new engine.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Everything needed to resume a battle exactly where it left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBattle {
    pub state: BattleState,
    pub rng: ChaCha8Rng,
}

/// The battle engine. Single writer of the battle state.
pub struct BattleEngine {
    state: BattleState,
    config: BattleConfig,
    spawn_policy: Box<dyn SpawnPolicy>,
    action_policy: Box<dyn ActionPolicy>,
    rng: ChaCha8Rng,
}

impl BattleEngine {
    /// Create an engine with injected policies. Fails on an invalid config.
    pub fn new(
        sim: SimConfig,
        config: BattleConfig,
        spawn_policy: Box<dyn SpawnPolicy>,
        action_policy: Box<dyn ActionPolicy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: BattleState::new(),
            config,
            spawn_policy,
            action_policy,
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
        })
    }

    /// Create an engine with the default weighted-random policies.
    pub fn with_default_policies(sim: SimConfig, config: BattleConfig) -> Result<Self, ConfigError> {
        let spawn = DefaultSpawnPolicy::from_config(&config);
        let action = DefaultActionPolicy::from_config(&config);
        Self::new(sim, config, Box::new(spawn), Box::new(action))
    }

    /// Rebuild an engine from a save. Subsequent ticks match the original run.
    pub fn restore(
        saved: SavedBattle,
        config: BattleConfig,
        spawn_policy: Box<dyn SpawnPolicy>,
        action_policy: Box<dyn ActionPolicy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: saved.state,
            config,
            spawn_policy,
            action_policy,
            rng: saved.rng,
        })
    }

    /// Capture the state and RNG position.
    pub fn save(&self) -> SavedBattle {
        SavedBattle {
            state: self.state.clone(),
            rng: self.rng.clone(),
        }
    }

    /// Add a roster hero at full hp.
    pub fn add_hero(&mut self, id: impl Into<String>, character_id: impl Into<String>, max_hp: f64) {
        self.state.add_hero(HeroState::new(id, character_id, max_hp));
    }

    /// Advance the battle by `dt` seconds and return this tick's events.
    ///
    /// Negative or non-finite `dt` counts as 0; the host clamps spikes.
    pub fn tick(&mut self, dt: f64, signal: &WorkSignal) -> Vec<BattleEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();

        phase::check_work_transitions(&mut self.state, signal, &self.config, &mut events);

        match self.state.phase {
            BattlePhase::Dormant => phase::tick_dormant(&mut self.state, signal, &mut events),
            BattlePhase::SessionStart => phase::tick_session_start(&mut self.state, &mut events),
            BattlePhase::Combat => self.run_combat(dt, signal, &mut events),
            BattlePhase::ResolveTodo => {
                systems::resolve::run(&mut self.state, &mut events);
                phase::tick_resolve_timer(&mut self.state, dt, &mut events);
            }
            BattlePhase::Victory => phase::tick_victory_timer(&mut self.state, dt, &mut events),
        }

        events
    }

    /// Run all combat systems in order.
    fn run_combat(&mut self, dt: f64, signal: &WorkSignal, events: &mut Vec<BattleEvent>) {
        // 1. Downed recovery
        systems::recovery::run(&mut self.state.heroes, dt, &self.config, events);
        // 2. Spawning
        if self.state.phase.can_spawn_enemies() {
            systems::spawner::run(
                &mut self.state,
                self.spawn_policy.as_ref(),
                &mut self.rng,
                &self.config.enemy_stats,
                signal.open_tasks,
                dt,
                events,
            );
        }
        // 3. Hero actions
        systems::combat::run_heroes(
            &mut self.state,
            self.action_policy.as_ref(),
            &mut self.rng,
            signal.busy,
            &self.config,
            events,
        );
        // 4. Enemy actions
        systems::combat::run_enemies(
            &mut self.state,
            self.action_policy.as_ref(),
            &mut self.rng,
            &self.config,
            events,
        );
        // 5. Cleanup
        systems::cleanup::run(&mut self.state, events);
    }

    /// Read-only view of the battle state.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Owned copy of the battle state for readers that outlive the borrow.
    pub fn snapshot(&self) -> BattleState {
        self.state.clone()
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }
}
