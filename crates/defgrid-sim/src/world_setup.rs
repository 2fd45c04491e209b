//! Entity spawning: towers, enemies, projectiles and visual effects.
//!
//! Enemy stats are scaled here at spawn time from the catalog base values.

use hecs::{Entity, World};

use defgrid_core::catalog::{EnemyKind, TowerKind};
use defgrid_core::components::*;
use defgrid_core::constants::{FLOATING_TEXT_LIFE, WAVE_HP_GROWTH};
use defgrid_core::enums::{Difficulty, ParticleKind};
use defgrid_core::path::Path;
use defgrid_core::types::{EnemyId, GridPos, Position, TowerId};

use crate::projectile::Projectile;

/// Monotonic identity counters, scoped to one engine.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_tower: u32,
    next_enemy: u32,
    next_projectile: u64,
}

impl IdAllocator {
    pub fn tower(&mut self) -> TowerId {
        self.next_tower += 1;
        TowerId::new(self.next_tower)
    }

    pub fn enemy(&mut self) -> EnemyId {
        self.next_enemy += 1;
        EnemyId::new(self.next_enemy)
    }

    pub fn projectile(&mut self) -> u64 {
        self.next_projectile += 1;
        self.next_projectile
    }
}

/// Enemy max health for a wave: floor(base * growth^(wave-1) * difficulty).
pub fn scaled_health(kind: EnemyKind, wave: u32, difficulty: Difficulty) -> u32 {
    let base = kind.stats().hp as f64;
    let growth = WAVE_HP_GROWTH.powi(wave.saturating_sub(1) as i32);
    let hp = (base * growth * difficulty.config().enemy_hp_multiplier).floor() as u32;
    hp.max(1)
}

/// Enemy reward, scaled by difficulty only.
pub fn scaled_reward(kind: EnemyKind, difficulty: Difficulty) -> u32 {
    let reward = kind.stats().reward as f64 * difficulty.config().gold_multiplier;
    (reward.floor() as u32).max(1)
}

/// Enemy base speed, scaled by difficulty only.
pub fn scaled_speed(kind: EnemyKind, difficulty: Difficulty) -> f64 {
    kind.stats().speed * difficulty.config().enemy_speed_multiplier
}

/// Place a level-1 tower with full catalog stats.
pub fn spawn_tower(world: &mut World, id: TowerId, kind: TowerKind, tile: GridPos) -> Entity {
    let stats = kind.stats();
    world.spawn((
        Tower {
            id,
            kind,
            tile,
            level: 1,
            ability_cooldown: 0,
            kills: 0,
        },
        Weapon {
            damage: stats.damage,
            range: stats.range,
            max_cooldown: stats.cooldown,
            cooldown: 0,
        },
        tile.center(),
    ))
}

/// Spawn an enemy at the start of the route, scaled for the given wave.
pub fn spawn_enemy(
    world: &mut World,
    path: &Path,
    id: EnemyId,
    kind: EnemyKind,
    wave: u32,
    difficulty: Difficulty,
) -> Entity {
    let stats = kind.stats();
    let speed = scaled_speed(kind, difficulty);
    world.spawn((
        Enemy {
            id,
            kind,
            reward: scaled_reward(kind, difficulty),
            armor: stats.armor,
            flying: stats.flying,
        },
        PathProgress::default(),
        path.start(),
        Health::full(scaled_health(kind, wave, difficulty)),
        Speed {
            base: speed,
            effective: speed,
        },
        StatusEffects::default(),
    ))
}

pub fn spawn_projectile(world: &mut World, position: Position, projectile: Projectile) -> Entity {
    world.spawn((projectile, position))
}

pub fn spawn_particle(
    world: &mut World,
    position: Position,
    kind: ParticleKind,
    life: u32,
    size: f64,
) -> Entity {
    world.spawn((Particle { kind, life, size }, position))
}

pub fn spawn_floating_text(world: &mut World, position: Position, text: impl Into<String>) -> Entity {
    world.spawn((
        FloatingText {
            text: text.into(),
            life: FLOATING_TEXT_LIFE,
        },
        position,
    ))
}

/// Find a tower entity by its id.
pub fn find_tower(world: &World, id: TowerId) -> Option<Entity> {
    world
        .query::<&Tower>()
        .iter()
        .find(|(_, tower)| tower.id == id)
        .map(|(entity, _)| entity)
}

/// Whether a tower already stands on `tile`.
pub fn tile_occupied(world: &World, tile: GridPos) -> bool {
    world
        .query::<&Tower>()
        .iter()
        .any(|(_, tower)| tower.tile == tile)
}
