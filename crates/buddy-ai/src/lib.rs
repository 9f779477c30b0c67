//! Decision policies for the buddy battle.
//!
//! Two narrow capabilities are injected into the battle loop: a spawn policy
//! (how many enemies should be alive and which to create next) and an action
//! policy (what each living entity does this tick). Both draw randomness from
//! a caller-supplied `RngCore` so runs can be replayed from a seed.

pub mod action;
pub mod spawn;

pub use action::{ActionDecision, ActionPolicy, DefaultActionPolicy};
pub use buddy_core as core;
pub use spawn::{DefaultSpawnPolicy, SpawnPolicy};
