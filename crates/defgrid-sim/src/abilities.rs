//! Tower abilities: one-shot volleys triggered by the player.
//!
//! Every ability is expressed as ordinary projectiles flagged `is_ability`,
//! so the effect lands through the normal hit resolution on later ticks.
//! Abilities are weaker than autonomous fire and never re-trigger.

use hecs::{Entity, World};

use defgrid_core::catalog::TowerStats;
use defgrid_core::components::Weapon;
use defgrid_core::constants::*;
use defgrid_core::enums::Ability;
use defgrid_core::types::Position;

use crate::projectile::Projectile;
use crate::targeting;
use crate::world_setup::{self, IdAllocator};

/// Shape of an ability volley.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volley {
    pub max_targets: usize,
    pub damage_factor: f64,
    pub ice: bool,
    pub burn_ticks: u32,
    /// Whether shots inherit the tower's splash radius.
    pub splash: bool,
}

impl Volley {
    pub fn for_ability(ability: Ability) -> Self {
        match ability {
            Ability::Multishot => Volley {
                max_targets: MULTISHOT_TARGETS,
                damage_factor: MULTISHOT_DAMAGE_FACTOR,
                ice: false,
                burn_ticks: 0,
                splash: false,
            },
            Ability::ChainLightning => Volley {
                max_targets: CHAIN_LIGHTNING_TARGETS,
                damage_factor: ABILITY_DAMAGE_FACTOR,
                ice: false,
                burn_ticks: 0,
                splash: false,
            },
            Ability::Blizzard => Volley {
                max_targets: BLIZZARD_TARGETS,
                damage_factor: ABILITY_DAMAGE_FACTOR,
                ice: true,
                burn_ticks: 0,
                splash: false,
            },
            Ability::Napalm => Volley {
                max_targets: 1,
                damage_factor: ABILITY_DAMAGE_FACTOR,
                ice: false,
                burn_ticks: NAPALM_BURN_TICKS,
                splash: true,
            },
        }
    }
}

/// Launch an ability volley from a tower. Returns the number of shots fired.
pub fn launch(
    world: &mut World,
    ids: &mut IdAllocator,
    tower: Entity,
    origin: Position,
    weapon: &Weapon,
    stats: &TowerStats,
    ability: Ability,
) -> usize {
    let volley = Volley::for_ability(ability);
    let candidates = targeting::collect_candidates(world);
    let targets = targeting::select_targets(
        &candidates,
        origin,
        weapon.range,
        stats.damage_type,
        volley.max_targets,
    );
    let damage = (weapon.damage as f64 * volley.damage_factor).floor() as u32;

    for target in &targets {
        let projectile = Projectile {
            seq: ids.projectile(),
            target: target.entity,
            speed: ABILITY_PROJECTILE_SPEED,
            damage,
            damage_type: stats.damage_type,
            splash_radius: if volley.splash {
                stats.splash_radius
            } else {
                0.0
            },
            origin: Some(tower),
            ice: volley.ice,
            burn_ticks: volley.burn_ticks,
            is_ability: true,
        };
        world_setup::spawn_projectile(world, origin, projectile);
    }

    world_setup::spawn_floating_text(world, origin, ability.label());
    targets.len()
}
