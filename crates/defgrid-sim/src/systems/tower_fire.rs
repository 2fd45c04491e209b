//! Tower act: cooldowns, target selection and autonomous fire.

use hecs::{Entity, World};

use defgrid_core::components::{Tower, Weapon};
use defgrid_core::constants::PROJECTILE_SPEED;
use defgrid_core::enums::DamageType;
use defgrid_core::events::Notification;
use defgrid_core::types::Position;

use crate::projectile::Projectile;
use crate::targeting;
use crate::world_setup::{self, IdAllocator};

/// Tick every tower in id order, firing those whose cooldown has elapsed.
pub fn run(world: &mut World, ids: &mut IdAllocator, notifications: &mut Vec<Notification>) {
    let mut order: Vec<(Entity, u32)> = world
        .query::<&Tower>()
        .iter()
        .map(|(entity, tower)| (entity, tower.id.get()))
        .collect();
    order.sort_by_key(|(_, id)| *id);

    // Enemies do not move during this stage, so one snapshot serves every tower.
    let candidates = targeting::collect_candidates(world);

    for (entity, _) in order {
        let shot = {
            let Ok((tower, weapon, position)) =
                world.query_one_mut::<(&mut Tower, &mut Weapon, &Position)>(entity)
            else {
                continue;
            };
            weapon.cooldown = weapon.cooldown.saturating_sub(1);
            tower.ability_cooldown = tower.ability_cooldown.saturating_sub(1);

            let stats = tower.kind.stats();
            if tower.kind.is_support() || weapon.damage == 0 || weapon.cooldown > 0 {
                continue;
            }
            let Some(target) =
                targeting::lead_target(&candidates, *position, weapon.range, stats.damage_type)
            else {
                continue;
            };
            weapon.cooldown = weapon.max_cooldown;
            (
                tower.id,
                *position,
                target.entity,
                weapon.damage,
                stats.damage_type,
                stats.splash_radius,
            )
        };

        let (tower_id, origin, target, damage, damage_type, splash_radius) = shot;
        let projectile = Projectile {
            seq: ids.projectile(),
            target,
            speed: PROJECTILE_SPEED,
            damage,
            damage_type,
            splash_radius,
            origin: Some(entity),
            ice: damage_type == DamageType::Ice,
            burn_ticks: 0,
            is_ability: false,
        };
        world_setup::spawn_projectile(world, origin, projectile);
        notifications.push(Notification::ShotFired { tower_id });
    }
}
