//! Projectile advance and hit resolution.
//!
//! Projectiles home on a generation-checked enemy handle. If the enemy is
//! gone the projectile is silently discarded. A hit applies armor-reduced
//! damage plus ice/burn status to the target, or to every enemy inside the
//! splash radius of the target.

use hecs::{Entity, World};

use defgrid_core::catalog::EnemyKind;
use defgrid_core::components::*;
use defgrid_core::constants::*;
use defgrid_core::enums::{Achievement, ParticleKind};
use defgrid_core::events::Notification;
use defgrid_core::state::CareerStats;
use defgrid_core::types::Position;

use crate::projectile::Projectile;
use crate::run::RunState;
use crate::systems::achievements;
use crate::targeting;
use crate::world_setup;

/// Advance all projectiles and resolve hits.
pub fn run(
    world: &mut World,
    run: &mut RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut in_flight: Vec<(Entity, Projectile, Position)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, position))| (entity, projectile.clone(), *position))
        .collect();
    in_flight.sort_by_key(|(_, projectile, _)| projectile.seq);

    for (entity, projectile, position) in in_flight {
        // Stale handle: the target died or leaked since launch.
        let target_pos = match world.get::<&Position>(projectile.target) {
            Ok(pos) => *pos,
            Err(_) => {
                despawn_buffer.push(entity);
                continue;
            }
        };

        let dist = position.distance_to(&target_pos);
        if dist < projectile.speed {
            resolve_hit(world, run, career, notifications, &projectile, target_pos);
            despawn_buffer.push(entity);
        } else {
            let step = (target_pos.as_dvec2() - position.as_dvec2()).normalize() * projectile.speed;
            if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                *pos = Position::from_dvec2(pos.as_dvec2() + step);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Apply a projectile's hit at the target's position.
fn resolve_hit(
    world: &mut World,
    run: &mut RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    projectile: &Projectile,
    impact: Position,
) {
    let victims = if projectile.splash_radius > 0.0 {
        world_setup::spawn_particle(
            world,
            impact,
            ParticleKind::Blast,
            SPLASH_PARTICLE_LIFE,
            projectile.splash_radius,
        );
        enemies_within(world, impact, projectile.splash_radius)
    } else {
        vec![projectile.target]
    };

    for victim in victims {
        apply_hit(world, run, career, notifications, projectile, victim);
    }
}

/// Every live enemy within `radius` of `center`, in id order.
pub fn enemies_within(world: &World, center: Position, radius: f64) -> Vec<Entity> {
    let mut hits: Vec<_> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.distance_to(&center) <= radius)
        .map(|(entity, (enemy, _))| (enemy.id, entity))
        .collect();
    hits.sort_by_key(|(id, _)| *id);
    hits.into_iter().map(|(_, entity)| entity).collect()
}

/// Damage one enemy. Flying enemies ignore damage types that cannot reach them.
fn apply_hit(
    world: &mut World,
    run: &mut RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    projectile: &Projectile,
    victim: Entity,
) {
    let (enemy, position, damage, lethal) = {
        let Ok((enemy, health, status, position)) = world
            .query_one_mut::<(&Enemy, &mut Health, &mut StatusEffects, &Position)>(victim)
        else {
            return;
        };
        if !targeting::can_target(projectile.damage_type, enemy.flying) {
            return;
        }
        let damage = projectile.damage.saturating_sub(enemy.armor).max(MIN_HIT_DAMAGE);
        let lethal = health.take(damage);
        if projectile.ice {
            status.frozen_ticks = FREEZE_TICKS;
        }
        if projectile.burn_ticks > 0 {
            status.burning_ticks = projectile.burn_ticks;
        }
        (enemy.clone(), *position, damage, lethal)
    };

    let kind = if projectile.ice {
        ParticleKind::Frost
    } else {
        ParticleKind::Hit
    };
    world_setup::spawn_particle(world, position, kind, HIT_PARTICLE_LIFE, HIT_PARTICLE_SIZE);
    notifications.push(Notification::HitLanded {
        enemy_id: enemy.id,
        damage,
    });

    if lethal {
        let _ = world.despawn(victim);
        credit_kill(world, run, career, notifications, &enemy, position, projectile.origin);
    }
}

/// Grant the rewards for a dead enemy. The caller removes the entity.
pub fn credit_kill(
    world: &mut World,
    run: &mut RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    enemy: &Enemy,
    position: Position,
    origin: Option<Entity>,
) {
    run.award_kill(career, enemy.reward);

    // The origin tower may have been sold while the shot was in flight.
    if let Some(tower) = origin {
        if let Ok(mut tower) = world.get::<&mut Tower>(tower) {
            tower.kills += 1;
        }
    }

    world_setup::spawn_floating_text(world, position, format!("+{}", enemy.reward));
    notifications.push(Notification::EnemyKilled {
        enemy_id: enemy.id,
        kind: enemy.kind,
        reward: enemy.reward,
    });

    if enemy.kind == EnemyKind::Boss {
        achievements::unlock(world, career, notifications, Achievement::BossKiller);
    }
}
