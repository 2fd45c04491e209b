//! Enemy advance: status effects, movement along the route, and leaks.

use hecs::{Entity, World};

use defgrid_core::components::*;
use defgrid_core::constants::{BURN_DAMAGE_PER_TICK, FROZEN_SPEED_FACTOR};
use defgrid_core::events::Notification;
use defgrid_core::path::Path;
use defgrid_core::state::CareerStats;
use defgrid_core::types::Position;

use crate::run::RunState;
use crate::systems::projectiles;

/// Apply status, advance every enemy, and remove those that reach the end.
///
/// Each leak costs one life. Running out of lives does not stop this stage;
/// the engine checks `run.lives` afterwards.
pub fn run(
    world: &mut World,
    path: &Path,
    run: &mut RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let last = path.last_index();
    let mut leaked = Vec::new();
    let mut burned = Vec::new();

    for (entity, (enemy, progress, position, health, speed, status)) in world.query_mut::<(
        &Enemy,
        &mut PathProgress,
        &mut Position,
        &mut Health,
        &mut Speed,
        &mut StatusEffects,
    )>() {
        // Frozen dominates: burning is paused until the freeze wears off.
        // Burning keeps whatever speed the enemy already had.
        if status.frozen_ticks > 0 {
            status.frozen_ticks -= 1;
            speed.effective = speed.base * FROZEN_SPEED_FACTOR;
        } else if status.burning_ticks > 0 {
            status.burning_ticks -= 1;
            if health.take(BURN_DAMAGE_PER_TICK) {
                burned.push((entity, enemy.clone(), *position));
                continue;
            }
        } else {
            speed.effective = speed.base;
        }

        if progress.index < last {
            progress.progress += speed.effective;
            if progress.progress >= 1.0 {
                progress.index += 1;
                progress.progress -= 1.0;
            }
        }

        if progress.index >= last {
            leaked.push((entity, enemy.id));
        } else {
            *position = path.position_at(progress.index, progress.progress);
        }
    }

    for (entity, enemy, position) in burned {
        despawn_buffer.push(entity);
        projectiles::credit_kill(world, run, career, notifications, &enemy, position, None);
    }

    for (entity, enemy_id) in leaked {
        despawn_buffer.push(entity);
        run.lose_life();
        notifications.push(Notification::EnemyLeaked {
            enemy_id,
            lives_left: run.lives,
        });
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
