//! Simulation engine for DEFGRID.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! applies player commands between ticks, and produces
//! GameStateSnapshots for the host.

pub mod abilities;
pub mod economy;
pub mod engine;
pub mod projectile;
pub mod run;
pub mod scheduler;
pub mod systems;
pub mod targeting;
pub mod world_setup;

pub use defgrid_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use scheduler::FixedTimestep;

#[cfg(test)]
mod tests;
