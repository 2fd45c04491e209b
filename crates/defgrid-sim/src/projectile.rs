//! Projectile component.
//!
//! Lives in the sim crate because it holds hecs entity handles. The target
//! handle is generation-checked: once the enemy is despawned, lookups fail
//! and the projectile is discarded rather than redirected.

use defgrid_core::enums::DamageType;

/// A shot in flight toward one enemy.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Spawn order, used to resolve projectiles deterministically.
    pub seq: u64,
    /// The enemy this projectile homes on.
    pub target: hecs::Entity,
    /// Cells per tick.
    pub speed: f64,
    pub damage: u32,
    pub damage_type: DamageType,
    /// 0 for single-target hits.
    pub splash_radius: f64,
    /// Tower credited with any kill.
    pub origin: Option<hecs::Entity>,
    /// Freezes every enemy it hits.
    pub ice: bool,
    /// Burning applied to every enemy it hits (0 for none).
    pub burn_ticks: u32,
    /// Fired by an ability rather than the tower's own cycle.
    pub is_ability: bool,
}
