//! Headless host for the buddy battle engine.
//!
//! Runs the engine on its own thread, feeds it the latest work signal and
//! publishes a post-tick snapshot for readers. Rendering is someone else's job.

pub mod game_loop;
pub mod mock;
pub mod state;

pub use buddy_core as core;
