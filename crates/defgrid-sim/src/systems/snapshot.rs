//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use defgrid_core::catalog::fire_rate;
use defgrid_core::components::*;
use defgrid_core::enums::RunPhase;
use defgrid_core::events::{CommandRejection, Notification};
use defgrid_core::state::*;
use defgrid_core::types::{Position, SimTime};

use crate::economy;
use crate::projectile::Projectile;
use crate::run::RunState;
use crate::systems::wave_director::WaveDirector;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: RunPhase,
    run: &RunState,
    director: &WaveDirector,
    career: &CareerStats,
    notifications: Vec<Notification>,
    rejections: Vec<CommandRejection>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        map: run.map,
        difficulty: run.difficulty,
        run: run.view(),
        wave: director.view(),
        towers: build_towers(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        particles: build_particles(world),
        floating_texts: build_floating_texts(world),
        achievements: career.achievements.iter().copied().collect(),
        notifications,
        rejections,
    }
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Weapon)>()
        .iter()
        .map(|(_, (tower, weapon))| TowerView {
            tower_id: tower.id,
            kind: tower.kind,
            tile: tower.tile,
            level: tower.level,
            damage: weapon.damage,
            range: weapon.range,
            cooldown: weapon.cooldown,
            max_cooldown: weapon.max_cooldown,
            fire_rate: fire_rate(weapon.max_cooldown),
            ability_cooldown: tower.ability_cooldown,
            kills: tower.kills,
            upgrade_cost: economy::upgrade_cost(tower.kind, tower.level),
            sell_value: economy::sell_refund(tower.kind, tower.level),
        })
        .collect();
    towers.sort_by_key(|t| t.tower_id);
    towers
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &PathProgress, &Position, &Health, &StatusEffects)>()
        .iter()
        .map(|(_, (enemy, progress, pos, health, status))| EnemyView {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            path_index: progress.index,
            progress: progress.progress,
            health: health.current,
            max_health: health.max,
            frozen: status.frozen_ticks > 0,
            burning: status.burning_ticks > 0,
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| {
            (
                projectile.seq,
                ProjectileView {
                    position: *pos,
                    damage_type: projectile.damage_type,
                    splash_radius: projectile.splash_radius,
                    is_ability: projectile.is_ability,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(seq, _)| *seq);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .query::<(&Particle, &Position)>()
        .iter()
        .map(|(_, (particle, pos))| ParticleView {
            position: *pos,
            kind: particle.kind,
            size: particle.size,
            life: particle.life,
        })
        .collect()
}

fn build_floating_texts(world: &World) -> Vec<FloatingTextView> {
    world
        .query::<(&FloatingText, &Position)>()
        .iter()
        .map(|(_, (text, pos))| FloatingTextView {
            position: *pos,
            text: text.text.clone(),
            life: text.life,
        })
        .collect()
}
