//! DEFGRID headless host.
//!
//! Runs the simulation engine on a fixed-timestep game-loop thread, routes
//! notifications to the audio/log sink, and persists the player profile
//! through a background save worker.

pub mod game_loop;
pub mod save_worker;
pub mod script;
pub mod sink;
pub mod state;

pub use defgrid_core as core;
