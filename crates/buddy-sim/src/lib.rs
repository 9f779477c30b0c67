//! Battle engine for the buddy desktop companion.
//!
//! Owns the battle state, advances the phase machine each tick from the
//! external work signal, runs the per-phase systems and returns the events
//! produced. Headless and single-threaded; the host decides when to tick.

pub mod engine;
pub mod phase;
pub mod systems;

pub use buddy_core as core;
pub use engine::{BattleEngine, SavedBattle, SimConfig};

#[cfg(test)]
mod tests;
