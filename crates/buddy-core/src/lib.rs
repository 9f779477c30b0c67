//! Core types and definitions for the buddy battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! hero and enemy components, the battle state aggregate, the work signal,
//! emitted events, configuration, and tuning constants.
//! It has no dependency on any policy, engine or host runtime.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod signal;
pub mod state;
