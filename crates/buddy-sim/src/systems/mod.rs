//! Per-tick systems that operate on the battle state.
//!
//! Systems are plain functions over `&mut BattleState` (or parts of it). They
//! do not own state; everything persistent lives in the state aggregate.

pub mod cleanup;
pub mod combat;
pub mod recovery;
pub mod resolve;
pub mod spawner;
