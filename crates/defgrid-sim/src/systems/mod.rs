//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Entity state lives in components; run economy lives
//! in `RunState` and is passed in explicitly.

pub mod achievements;
pub mod effects;
pub mod enemy_advance;
pub mod projectiles;
pub mod snapshot;
pub mod tower_fire;
pub mod wave_director;
