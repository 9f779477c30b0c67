//! ResolveTodo clear-the-board beat.

use tracing::debug;

use buddy_core::events::BattleEvent;
use buddy_core::state::BattleState;

use super::cleanup;

/// Deal lethal damage to every living enemy, then clean them up.
pub fn run(state: &mut BattleState, events: &mut Vec<BattleEvent>) {
    let mut cleared = 0;
    for enemy in state.enemies.iter_mut() {
        let lethal = enemy.hp;
        if enemy.take_damage(lethal) {
            cleared += 1;
        }
    }
    if cleared > 0 {
        debug!(cleared, "resolve cleared the board");
    }
    cleanup::run(state, events);
}
