//! Battle phase machine.
//!
//! Pure functions over `BattleState` that decide phase transitions. Every real
//! transition pushes a `PhaseChange` event; self-transitions are silent.

use tracing::debug;

use buddy_core::config::BattleConfig;
use buddy_core::enums::BattlePhase;
use buddy_core::events::BattleEvent;
use buddy_core::signal::WorkSignal;
use buddy_core::state::BattleState;

/// Move to `phase`, emitting `PhaseChange` unless already there.
pub fn transition_to(state: &mut BattleState, phase: BattlePhase, events: &mut Vec<BattleEvent>) {
    if state.phase == phase {
        return;
    }
    debug!(from = ?state.phase, to = ?phase, "battle phase change");
    state.phase = phase;
    events.push(BattleEvent::PhaseChange { phase });
}

/// Work-driven transitions, evaluated once per tick before per-phase logic.
///
/// The completed-task count is observed in every phase, so completions seen
/// outside Combat are absorbed rather than replayed later. From Combat, a
/// completion enters ResolveTodo; an all-done signal enters Victory. When both
/// fire in one tick both events are emitted and Victory sticks.
pub fn check_work_transitions(
    state: &mut BattleState,
    signal: &WorkSignal,
    config: &BattleConfig,
    events: &mut Vec<BattleEvent>,
) {
    let completed = state.observe_done_count(signal.done_tasks);
    let in_combat = state.phase == BattlePhase::Combat;

    if in_combat && completed > 0 {
        state.resolve_timer = config.resolve_duration;
        transition_to(state, BattlePhase::ResolveTodo, events);
        events.push(BattleEvent::TodoResolved { count: completed });
    }

    if in_combat && signal.all_tasks_complete() {
        state.victory_timer = config.victory_duration;
        transition_to(state, BattlePhase::Victory, events);
        events.push(BattleEvent::Victory);
    }
}

/// Dormant: wake up once the session has any tasks.
pub fn tick_dormant(state: &mut BattleState, signal: &WorkSignal, events: &mut Vec<BattleEvent>) {
    if signal.total_tasks > 0 {
        transition_to(state, BattlePhase::SessionStart, events);
    }
}

/// SessionStart lasts a single tick.
pub fn tick_session_start(state: &mut BattleState, events: &mut Vec<BattleEvent>) {
    transition_to(state, BattlePhase::Combat, events);
}

/// Count down the resolve beat and return to Combat when it expires.
pub fn tick_resolve_timer(state: &mut BattleState, dt: f64, events: &mut Vec<BattleEvent>) {
    state.resolve_timer -= dt;
    if state.resolve_timer <= 0.0 {
        transition_to(state, BattlePhase::Combat, events);
    }
}

/// Count down the victory beat and go dormant when it expires.
///
/// The roster and any remaining enemies are left untouched.
pub fn tick_victory_timer(state: &mut BattleState, dt: f64, events: &mut Vec<BattleEvent>) {
    state.victory_timer -= dt;
    if state.victory_timer <= 0.0 {
        transition_to(state, BattlePhase::Dormant, events);
    }
}
