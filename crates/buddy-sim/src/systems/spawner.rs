//! Enemy spawning driven by outstanding work.

use std::collections::BTreeMap;

use rand::RngCore;
use tracing::{debug, warn};

use buddy_ai::SpawnPolicy;
use buddy_core::components::EnemyState;
use buddy_core::config::UnitStats;
use buddy_core::events::BattleEvent;
use buddy_core::state::BattleState;

/// Spawn at most one enemy when below the target alive count.
///
/// At or above target the timer is held at zero, so fresh work resumes
/// spawning immediately instead of after a stale countdown. A template missing
/// from the stat table skips the spawn but still resets the timer.
pub fn run(
    state: &mut BattleState,
    policy: &dyn SpawnPolicy,
    rng: &mut dyn RngCore,
    enemy_stats: &BTreeMap<String, UnitStats>,
    open_tasks: u32,
    dt: f64,
    events: &mut Vec<BattleEvent>,
) {
    let target = policy.target_alive_count(open_tasks);
    if state.alive_enemy_count() >= target {
        state.spawn_timer = 0.0;
        return;
    }

    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return;
    }

    match policy.pick_template_id(rng) {
        Some(template_id) => match enemy_stats.get(template_id) {
            Some(stats) => {
                let enemy_id = state.next_enemy_id();
                debug!(enemy = %enemy_id, template = template_id, target, "enemy spawned");
                state.add_enemy(EnemyState::new(enemy_id.as_str(), template_id, stats));
                events.push(BattleEvent::EnemySpawn {
                    enemy_id,
                    template_id: template_id.to_string(),
                });
            }
            None => {
                warn!(template = template_id, "enemy template has no stats; spawn skipped");
            }
        },
        None => warn!("enemy pool is empty; spawn skipped"),
    }

    state.spawn_timer = policy.spawn_delay(rng);
}
