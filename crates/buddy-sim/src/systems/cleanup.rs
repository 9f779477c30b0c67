//! Removal of dead enemies.

use buddy_core::events::BattleEvent;
use buddy_core::state::BattleState;

/// Remove every dead enemy, emitting `EnemyDeath` for each in spawn order.
pub fn run(state: &mut BattleState, events: &mut Vec<BattleEvent>) {
    for enemy in state.remove_dead_enemies() {
        events.push(BattleEvent::EnemyDeath { enemy_id: enemy.id });
    }
}
