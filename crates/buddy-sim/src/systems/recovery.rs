//! Downed-hero recovery.

use tracing::trace;

use buddy_core::components::{HeroState, RecoveryStep};
use buddy_core::config::BattleConfig;
use buddy_core::events::BattleEvent;

/// Advance every downed hero's recovery and report completed recoveries.
pub fn run(heroes: &mut [HeroState], dt: f64, config: &BattleConfig, events: &mut Vec<BattleEvent>) {
    for hero in heroes.iter_mut() {
        match hero.tick_recovery(dt, config.heal_interval, config.hp_regen_percent) {
            RecoveryStep::Recovered => {
                events.push(BattleEvent::HeroRecovered {
                    hero_id: hero.id.clone(),
                });
            }
            RecoveryStep::Pulse => {
                trace!(hero = %hero.id, hp = hero.hp, "heal pulse");
            }
            RecoveryStep::NotDowned | RecoveryStep::Waiting => {}
        }
    }
}
