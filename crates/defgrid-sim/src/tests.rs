//! Tests for the simulation engine, combat systems, commands and wave director.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use defgrid_core::catalog::{EnemyKind, TowerKind};
use defgrid_core::commands::{CommandOutcome, PlayerCommand};
use defgrid_core::components::*;
use defgrid_core::enums::*;
use defgrid_core::error::CommandError;
use defgrid_core::events::Notification;
use defgrid_core::path::Path;
use defgrid_core::state::{CareerStats, GameStateSnapshot};
use defgrid_core::types::{EnemyId, GridPos, Position, TowerId};

use crate::engine::{SimConfig, SimulationEngine};
use crate::projectile::Projectile;
use crate::run::RunState;
use crate::systems::{projectiles, wave_director};
use crate::world_setup::{self, IdAllocator};

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

/// Select a tile and build on it, returning the new tower's id.
fn build(engine: &mut SimulationEngine, kind: TowerKind, x: i32, y: i32) -> TowerId {
    engine
        .execute(PlayerCommand::SelectTile { x, y })
        .unwrap();
    match engine.execute(PlayerCommand::Build { kind }).unwrap() {
        CommandOutcome::Built { tower_id, .. } => tower_id,
        other => panic!("unexpected outcome {other:?}"),
    }
}

fn start(engine: &mut SimulationEngine) {
    engine.execute(PlayerCommand::StartOrResume).unwrap();
}

fn enemy_entity(engine: &SimulationEngine, id: EnemyId) -> hecs::Entity {
    engine
        .world()
        .query::<&Enemy>()
        .iter()
        .find(|(_, enemy)| enemy.id == id)
        .map(|(entity, _)| entity)
        .expect("enemy should exist")
}

fn enemy_health(engine: &SimulationEngine, id: EnemyId) -> Option<u32> {
    engine
        .world()
        .query::<(&Enemy, &Health)>()
        .iter()
        .find(|(_, (enemy, _))| enemy.id == id)
        .map(|(_, (_, health))| health.current)
}

/// Place an enemy at an exact position in a bare world.
fn place_enemy(world: &mut World, ids: &mut IdAllocator, kind: EnemyKind, at: Position) -> hecs::Entity {
    let path = Path::for_map(MapId::Forest);
    let entity = world_setup::spawn_enemy(world, &path, ids.enemy(), kind, 1, Difficulty::Normal);
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = at;
    }
    entity
}

fn health_of(world: &World, entity: hecs::Entity) -> u32 {
    world.get::<&Health>(entity).map(|h| h.current).unwrap()
}

fn test_projectile(seq: u64, target: hecs::Entity, damage_type: DamageType, splash: f64) -> Projectile {
    Projectile {
        seq,
        target,
        speed: 0.35,
        damage: 10,
        damage_type,
        splash_radius: splash,
        origin: None,
        ice: false,
        burn_ticks: 0,
        is_ability: false,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for engine in [&mut engine_a, &mut engine_b] {
        build(engine, TowerKind::Archer, 1, 3);
        build(engine, TowerKind::Cannon, 3, 3);
        start(engine);
    }

    for _ in 0..1500 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_wave_composition_depends_on_seed() {
    let mut rng_a = ChaCha8Rng::seed_from_u64(111);
    let mut rng_b = ChaCha8Rng::seed_from_u64(222);
    let a: Vec<_> = (1..=12).flat_map(|w| wave_director::compose_wave(&mut rng_a, w)).collect();
    let b: Vec<_> = (1..=12).flat_map(|w| wave_director::compose_wave(&mut rng_b, w)).collect();
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b, "different seeds should roll different waves");
}

// ---- Run phase ----

#[test]
fn test_ready_until_started() {
    let mut engine = engine();
    assert_eq!(engine.phase(), RunPhase::Ready);
    engine.tick();
    assert_eq!(engine.time().tick, 0, "ticks do nothing before start");

    start(&mut engine);
    engine.tick();
    assert_eq!(engine.phase(), RunPhase::Playing);
    assert_eq!(engine.time().tick, 1);
}

#[test]
fn test_pause_stops_time() {
    let mut engine = engine();
    start(&mut engine);
    for _ in 0..10 {
        engine.tick();
    }
    engine.execute(PlayerCommand::Pause).unwrap();
    let id = engine.spawn_enemy(EnemyKind::Goblin);
    let before = engine.snapshot();
    for _ in 0..20 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);
    let after = engine.snapshot();
    assert_eq!(
        before.enemies[0].position, after.enemies[0].position,
        "enemy {id} moved while paused"
    );

    assert_eq!(
        engine.execute(PlayerCommand::Pause),
        Err(CommandError::NotPlaying)
    );
    engine.execute(PlayerCommand::StartOrResume).unwrap();
    assert_eq!(
        engine.execute(PlayerCommand::StartOrResume),
        Err(CommandError::AlreadyPlaying)
    );
    engine.tick();
    assert_eq!(engine.time().tick, 11);
}

#[test]
fn test_queued_rejection_reported_in_snapshot() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::Build {
        kind: TowerKind::Archer,
    });
    let snap = engine.tick();
    assert_eq!(snap.rejections.len(), 1);
    assert_eq!(snap.rejections[0].reason, "No tile selected");
    assert!(engine.tick().rejections.is_empty(), "rejections are drained");
}

#[test]
fn test_queued_batch_applied_in_order() {
    let mut engine = engine();
    engine.queue_commands([
        PlayerCommand::SelectTile { x: 1, y: 3 },
        PlayerCommand::Build {
            kind: TowerKind::Archer,
        },
    ]);
    let snap = engine.tick();
    assert!(snap.rejections.is_empty());
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.run.gold, 240);
}

// ---- Selection ----

#[test]
fn test_select_tile_toggles() {
    let mut engine = engine();
    let outcome = engine.execute(PlayerCommand::SelectTile { x: 3, y: 3 });
    assert_eq!(
        outcome,
        Ok(CommandOutcome::TileSelected {
            tile: Some(GridPos::new(3, 3))
        })
    );
    let outcome = engine.execute(PlayerCommand::SelectTile { x: 3, y: 3 });
    assert_eq!(outcome, Ok(CommandOutcome::TileSelected { tile: None }));

    engine.execute(PlayerCommand::SelectTile { x: 3, y: 3 }).unwrap();
    engine.execute(PlayerCommand::DeselectTile).unwrap();
    assert_eq!(engine.run().selected_tile, None);
}

#[test]
fn test_select_out_of_bounds_rejected() {
    let mut engine = engine();
    assert_eq!(
        engine.execute(PlayerCommand::SelectTile { x: 14, y: 0 }),
        Err(CommandError::OutOfBounds(GridPos::new(14, 0)))
    );
    assert_eq!(
        engine.execute(PlayerCommand::SelectTile { x: 0, y: -1 }),
        Err(CommandError::OutOfBounds(GridPos::new(0, -1)))
    );
}

// ---- Build ----

#[test]
fn test_build_deducts_cost_and_clears_selection() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Archer, 1, 3);
    assert_eq!(id, TowerId::new(1));
    assert_eq!(engine.run().gold, 240);
    assert_eq!(engine.run().selected_tile, None);
    assert_eq!(engine.career().towers_built, 1);

    let snap = engine.tick();
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].level, 1);
    assert_eq!(snap.towers[0].upgrade_cost, Some(90));
    assert!(snap
        .notifications
        .contains(&Notification::TowerBuilt {
            tower_id: id,
            kind: TowerKind::Archer
        }));
}

#[test]
fn test_build_rejections_leave_state_unchanged() {
    let mut engine = SimulationEngine::new(SimConfig {
        loadout: vec![TowerKind::Archer],
        ..Default::default()
    });

    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Archer
        }),
        Err(CommandError::NoTileSelected)
    );

    engine.execute(PlayerCommand::SelectTile { x: 0, y: 4 }).unwrap();
    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Archer
        }),
        Err(CommandError::PathCell(GridPos::new(0, 4)))
    );

    build(&mut engine, TowerKind::Archer, 1, 3);
    engine.execute(PlayerCommand::SelectTile { x: 1, y: 3 }).unwrap();
    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Archer
        }),
        Err(CommandError::TileOccupied(GridPos::new(1, 3)))
    );

    engine.execute(PlayerCommand::SelectTile { x: 3, y: 3 }).unwrap();
    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Cannon
        }),
        Err(CommandError::NotInLoadout(TowerKind::Cannon))
    );

    engine.set_gold(10);
    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Archer
        }),
        Err(CommandError::InsufficientGold {
            needed: 60,
            available: 10
        })
    );
    assert_eq!(engine.run().gold, 10);
    assert_eq!(engine.run().selected_tile, Some(GridPos::new(3, 3)));
    assert_eq!(engine.career().towers_built, 1);
    assert_eq!(engine.world().query::<&Tower>().iter().count(), 1);
}

// ---- Upgrade & sell ----

#[test]
fn test_upgrade_cost_and_stats() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Archer, 1, 3);
    let outcome = engine.execute(PlayerCommand::Upgrade { tower_id: id }).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Upgraded {
            tower_id: id,
            level: 2,
            cost: 90
        }
    );
    assert_eq!(engine.run().gold, 150);

    let snap = engine.snapshot();
    let tower = &snap.towers[0];
    assert_eq!(tower.damage, 21);
    assert!((tower.range - 4.0).abs() < 1e-9);
    assert_eq!(tower.max_cooldown, 25);
    assert_eq!(tower.upgrade_cost, Some(180));
    assert!(snap.floating_texts.iter().any(|t| t.text == "UPGRADED!"));
}

#[test]
fn test_upgrade_limits() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Archer, 1, 3);

    engine.set_gold(50);
    assert_eq!(
        engine.execute(PlayerCommand::Upgrade { tower_id: id }),
        Err(CommandError::InsufficientGold {
            needed: 90,
            available: 50
        })
    );
    assert_eq!(engine.snapshot().towers[0].level, 1);

    engine.set_gold(1000);
    engine.execute(PlayerCommand::Upgrade { tower_id: id }).unwrap();
    engine.execute(PlayerCommand::Upgrade { tower_id: id }).unwrap();
    assert_eq!(
        engine.execute(PlayerCommand::Upgrade { tower_id: id }),
        Err(CommandError::MaxLevel)
    );
    assert_eq!(engine.run().gold, 1000 - 90 - 180);
    assert_eq!(engine.snapshot().towers[0].upgrade_cost, None);
    assert!(engine.career().achievements.contains(&Achievement::MaxTower));

    assert_eq!(
        engine.execute(PlayerCommand::Upgrade {
            tower_id: TowerId::new(99)
        }),
        Err(CommandError::UnknownTower(TowerId::new(99)))
    );
}

#[test]
fn test_sell_level_two_refunds_72() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Archer, 1, 3);
    engine.execute(PlayerCommand::Upgrade { tower_id: id }).unwrap();
    engine.execute(PlayerCommand::SelectTile { x: 5, y: 0 }).unwrap();

    let outcome = engine.execute(PlayerCommand::Sell { tower_id: id }).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Sold {
            tower_id: id,
            refund: 72
        }
    );
    assert_eq!(engine.run().gold, 222);
    assert_eq!(engine.run().selected_tile, None);
    assert!(engine.snapshot().towers.is_empty());
    assert_eq!(
        engine.execute(PlayerCommand::Sell { tower_id: id }),
        Err(CommandError::UnknownTower(id))
    );
}

// ---- Combat ----

#[test]
fn test_archer_kills_goblin_within_two_cycles() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    let goblin = engine.spawn_enemy(EnemyKind::Goblin);
    start(&mut engine);
    let gold_before = engine.run().gold;
    let kills_before = engine.run().kills;

    let mut shots = 0;
    let mut killed = false;
    for _ in 0..80 {
        let snap = engine.tick();
        shots += snap
            .notifications
            .iter()
            .filter(|n| matches!(n, Notification::ShotFired { .. }))
            .count();
        if snap.notifications.iter().any(|n| {
            matches!(n, Notification::EnemyKilled { enemy_id, .. } if *enemy_id == goblin)
        }) {
            killed = true;
            break;
        }
    }

    assert!(killed, "goblin should die");
    assert!(shots <= 2, "took {shots} shots");
    assert_eq!(engine.run().gold, gold_before + 8);
    assert_eq!(engine.run().kills, kills_before + 1);
    assert_eq!(engine.run().score, 80);
    assert_eq!(engine.snapshot().towers[0].kills, 1);
    assert!(engine.career().achievements.contains(&Achievement::FirstBlood));
}

#[test]
fn test_tower_cooldown_resets_and_counts_down() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    engine.spawn_enemy(EnemyKind::Boss);
    start(&mut engine);

    let first = engine.tick();
    assert_eq!(first.towers[0].cooldown, 30, "fired on the first tick");
    assert_eq!(first.projectiles.len(), 1);

    let mut previous = first.towers[0].cooldown;
    for _ in 0..120 {
        let snap = engine.tick();
        let tower = &snap.towers[0];
        assert!(tower.cooldown <= tower.max_cooldown);
        assert!(tower.cooldown == previous - 1 || tower.cooldown == tower.max_cooldown);
        previous = tower.cooldown;
    }
}

#[test]
fn test_splash_hits_only_within_radius() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let target = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(5.0, 5.0));
    let near = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(6.0, 5.0));
    let edge = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(5.0, 6.5));
    let far = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(7.0, 5.0));

    world_setup::spawn_projectile(
        &mut world,
        Position::new(5.1, 5.0),
        test_projectile(1, target, DamageType::Explosive, 1.5),
    );

    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut career = CareerStats::default();
    let mut notifications = Vec::new();
    let mut buffer = Vec::new();
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);

    assert_eq!(health_of(&world, target), 20);
    assert_eq!(health_of(&world, near), 20);
    assert_eq!(health_of(&world, edge), 20, "radius is inclusive");
    assert_eq!(health_of(&world, far), 30);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
    assert!(world
        .query::<&Particle>()
        .iter()
        .any(|(_, p)| p.kind == ParticleKind::Blast));
}

#[test]
fn test_flying_enemies_only_take_magic_damage() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let goblin = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(5.0, 5.0));
    let spirit = place_enemy(&mut world, &mut ids, EnemyKind::Spirit, Position::new(5.5, 5.0));

    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut career = CareerStats::default();
    let mut notifications = Vec::new();
    let mut buffer = Vec::new();

    world_setup::spawn_projectile(
        &mut world,
        Position::new(5.0, 5.0),
        test_projectile(1, goblin, DamageType::Explosive, 1.5),
    );
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);
    assert_eq!(health_of(&world, goblin), 20);
    assert_eq!(health_of(&world, spirit), 40, "splash skips flying enemies");

    world_setup::spawn_projectile(
        &mut world,
        Position::new(5.5, 5.0),
        test_projectile(2, spirit, DamageType::Magic, 0.0),
    );
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);
    assert_eq!(health_of(&world, spirit), 30);
}

#[test]
fn test_archer_ignores_spirit_but_magic_fires() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    engine.spawn_enemy(EnemyKind::Spirit);
    start(&mut engine);
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());

    let mut engine = SimulationEngine::new(SimConfig::default());
    build(&mut engine, TowerKind::Magic, 1, 3);
    engine.spawn_enemy(EnemyKind::Spirit);
    start(&mut engine);
    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].damage_type, DamageType::Magic);
}

#[test]
fn test_armor_floor_is_one_damage() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let boss = place_enemy(&mut world, &mut ids, EnemyKind::Boss, Position::new(5.0, 5.0));
    let mut projectile = test_projectile(1, boss, DamageType::Physical, 0.0);
    projectile.damage = 3;
    world_setup::spawn_projectile(&mut world, Position::new(5.0, 5.0), projectile);

    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut career = CareerStats::default();
    let mut notifications = Vec::new();
    let mut buffer = Vec::new();
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);

    assert_eq!(health_of(&world, boss), 499);
    assert_eq!(
        notifications,
        vec![Notification::HitLanded {
            enemy_id: EnemyId::new(1),
            damage: 1
        }]
    );
}

#[test]
fn test_projectile_discarded_when_target_gone() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let goblin = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(5.0, 5.0));
    let other = place_enemy(&mut world, &mut ids, EnemyKind::Goblin, Position::new(9.0, 5.0));
    world_setup::spawn_projectile(
        &mut world,
        Position::new(1.0, 1.0),
        test_projectile(1, goblin, DamageType::Physical, 0.0),
    );
    world.despawn(goblin).unwrap();

    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut career = CareerStats::default();
    let mut notifications = Vec::new();
    let mut buffer = Vec::new();
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);

    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
    assert_eq!(health_of(&world, other), 30, "never redirected");
    assert!(notifications.is_empty());
}

#[test]
fn test_health_never_increases() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    build(&mut engine, TowerKind::Ice, 3, 3);
    let boss = engine.spawn_enemy(EnemyKind::Boss);
    start(&mut engine);

    let mut last = enemy_health(&engine, boss).unwrap();
    for _ in 0..300 {
        engine.tick();
        let Some(current) = enemy_health(&engine, boss) else {
            break;
        };
        assert!(current <= last);
        last = current;
    }
}

// ---- Status effects ----

#[test]
fn test_frozen_dominates_burning() {
    let mut engine = engine();
    let id = engine.spawn_enemy(EnemyKind::Goblin);
    let entity = enemy_entity(&engine, id);
    if let Ok(mut status) = engine.world().get::<&mut StatusEffects>(entity) {
        status.frozen_ticks = 10;
        status.burning_ticks = 10;
    }
    start(&mut engine);
    let snap = engine.tick();

    let status = *engine.world().get::<&StatusEffects>(entity).unwrap();
    assert_eq!(status.frozen_ticks, 9);
    assert_eq!(status.burning_ticks, 10, "burning paused while frozen");
    assert_eq!(snap.enemies[0].health, 30);
    assert!((snap.enemies[0].progress - 0.0225).abs() < 1e-9, "half speed");
}

#[test]
fn test_burning_keeps_speed_after_freeze_ends() {
    let mut engine = engine();
    let id = engine.spawn_enemy(EnemyKind::Goblin);
    let entity = enemy_entity(&engine, id);
    if let Ok(mut status) = engine.world().get::<&mut StatusEffects>(entity) {
        status.frozen_ticks = 1;
        status.burning_ticks = 10;
    }
    start(&mut engine);

    let frozen = engine.tick();
    assert!((frozen.enemies[0].progress - 0.0225).abs() < 1e-9);
    let burning = engine.tick();
    assert_eq!(burning.enemies[0].health, 28);
    assert!(
        (burning.enemies[0].progress - 0.045).abs() < 1e-9,
        "still half speed while burning"
    );

    let mut last = burning;
    for _ in 0..9 {
        last = engine.tick();
    }
    assert_eq!(last.enemies[0].health, 10);
    assert!((last.enemies[0].progress - 0.2475).abs() < 1e-9);

    let recovered = engine.tick();
    let step = recovered.enemies[0].progress - last.enemies[0].progress;
    assert!((step - 0.045).abs() < 1e-9, "base speed once statuses clear");
}

#[test]
fn test_burn_death_is_credited() {
    let mut engine = engine();
    let id = engine.spawn_enemy(EnemyKind::Goblin);
    let entity = enemy_entity(&engine, id);
    if let Ok(mut status) = engine.world().get::<&mut StatusEffects>(entity) {
        status.burning_ticks = 300;
    }
    if let Ok(mut health) = engine.world().get::<&mut Health>(entity) {
        health.current = 3;
    }
    start(&mut engine);

    engine.tick();
    assert_eq!(enemy_health(&engine, id), Some(1));
    let snap = engine.tick();
    assert!(snap.enemies.is_empty());
    assert_eq!(engine.run().gold, 308);
    assert_eq!(engine.run().kills, 1);
    assert!(snap.floating_texts.iter().any(|t| t.text == "+8"));
}

#[test]
fn test_effects_expire() {
    let mut world = World::new();
    world_setup::spawn_particle(&mut world, Position::new(1.0, 1.0), ParticleKind::Hit, 2, 0.3);
    world_setup::spawn_floating_text(&mut world, Position::new(1.0, 1.0), "+8");
    let mut buffer = Vec::new();

    crate::systems::effects::run(&mut world, &mut buffer);
    assert_eq!(world.query::<&Particle>().iter().count(), 1);
    let y = world
        .query::<(&FloatingText, &Position)>()
        .iter()
        .map(|(_, (_, p))| p.y)
        .next()
        .unwrap();
    assert!((y - 0.98).abs() < 1e-9);

    crate::systems::effects::run(&mut world, &mut buffer);
    assert_eq!(world.query::<&Particle>().iter().count(), 0);
    for _ in 0..48 {
        crate::systems::effects::run(&mut world, &mut buffer);
    }
    assert_eq!(world.query::<&FloatingText>().iter().count(), 0);
}

// ---- Abilities ----

#[test]
fn test_multishot_fires_three_and_recharges() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Archer, 1, 3);
    for i in 0..4 {
        engine.spawn_enemy_at(EnemyKind::Goblin, 0, i as f64 * 0.2);
    }

    let outcome = engine
        .execute(PlayerCommand::UseAbility { tower_id: id })
        .unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::AbilityUsed {
            tower_id: id,
            ability: Ability::Multishot,
            targets: 3
        }
    );
    let snap = engine.snapshot();
    assert_eq!(snap.projectiles.len(), 3);
    assert!(snap.projectiles.iter().all(|p| p.is_ability));
    assert!(snap.floating_texts.iter().any(|t| t.text == "MULTISHOT!"));
    assert_eq!(snap.towers[0].ability_cooldown, 180);

    assert_eq!(
        engine.execute(PlayerCommand::UseAbility { tower_id: id }),
        Err(CommandError::AbilityCoolingDown { remaining: 180 })
    );

    start(&mut engine);
    engine.tick();
    assert_eq!(engine.snapshot().towers[0].ability_cooldown, 179);
}

#[test]
fn test_ability_without_targets_still_labels() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Ice, 1, 3);
    let outcome = engine
        .execute(PlayerCommand::UseAbility { tower_id: id })
        .unwrap();
    assert!(matches!(
        outcome,
        CommandOutcome::AbilityUsed { targets: 0, .. }
    ));
    assert!(engine
        .snapshot()
        .floating_texts
        .iter()
        .any(|t| t.text == "BLIZZARD!"));
}

#[test]
fn test_napalm_sets_burning() {
    let mut engine = engine();
    let id = build(&mut engine, TowerKind::Cannon, 1, 3);
    let boss = engine.spawn_enemy(EnemyKind::Boss);
    engine
        .execute(PlayerCommand::UseAbility { tower_id: id })
        .unwrap();
    start(&mut engine);

    let mut burning = false;
    for _ in 0..20 {
        let snap = engine.tick();
        if snap
            .enemies
            .iter()
            .any(|e| e.enemy_id == boss && e.burning)
        {
            burning = true;
            break;
        }
    }
    assert!(burning, "napalm should set the boss burning");
}

#[test]
fn test_support_tower_is_inert() {
    let mut engine = SimulationEngine::new(SimConfig {
        loadout: vec![TowerKind::Buff],
        ..Default::default()
    });
    engine.set_gold(10_000);
    let id = build(&mut engine, TowerKind::Buff, 1, 3);
    engine.spawn_enemy(EnemyKind::Goblin);
    start(&mut engine);

    for _ in 0..30 {
        let snap = engine.tick();
        assert!(snap.projectiles.is_empty());
    }
    assert_eq!(
        engine.execute(PlayerCommand::UseAbility { tower_id: id }),
        Err(CommandError::NoAbility(TowerKind::Buff))
    );
    assert_eq!(engine.snapshot().towers[0].fire_rate, None);
}

// ---- Leaks & game over ----

#[test]
fn test_leak_on_last_life_ends_run() {
    let mut engine = engine();
    engine.set_lives(1);
    let last = engine.path().last_index();
    let id = engine.spawn_enemy_at(EnemyKind::Speedy, last - 1, 0.99);
    start(&mut engine);

    let snap = engine.tick();
    assert_eq!(engine.run().lives, 0);
    assert_eq!(engine.phase(), RunPhase::GameOver);
    assert!(snap.notifications.contains(&Notification::EnemyLeaked {
        enemy_id: id,
        lives_left: 0
    }));
    assert!(snap
        .notifications
        .iter()
        .any(|n| matches!(n, Notification::GameOver { .. })));
    assert_eq!(engine.career().high_scores.len(), 1);

    let frozen: GameStateSnapshot = engine.tick();
    let json = serde_json::to_string(&frozen).unwrap();
    for _ in 0..30 {
        assert_eq!(serde_json::to_string(&engine.tick()).unwrap(), json);
    }

    assert_eq!(
        engine.execute(PlayerCommand::Build {
            kind: TowerKind::Archer
        }),
        Err(CommandError::RunOver)
    );
    assert_eq!(
        engine.execute(PlayerCommand::StartOrResume),
        Err(CommandError::RunOver)
    );
}

#[test]
fn test_leak_costs_one_life() {
    let mut engine = engine();
    let last = engine.path().last_index();
    engine.spawn_enemy_at(EnemyKind::Goblin, last - 1, 0.99);
    start(&mut engine);
    engine.tick();
    assert_eq!(engine.run().lives, 19);
    assert_eq!(engine.phase(), RunPhase::Playing);
}

// ---- Restart ----

#[test]
fn test_restart_resets_run_and_keeps_career() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    engine.spawn_enemy(EnemyKind::Goblin);
    start(&mut engine);
    for _ in 0..80 {
        engine.tick();
    }
    assert_eq!(engine.run().kills, 1);

    engine
        .execute(PlayerCommand::SetDifficulty {
            difficulty: Difficulty::Hard,
        })
        .unwrap();
    assert_eq!(engine.run().difficulty, Difficulty::Normal, "applies on restart");
    engine.execute(PlayerCommand::Restart).unwrap();

    assert_eq!(engine.phase(), RunPhase::Playing);
    assert_eq!(engine.run().gold, 250);
    assert_eq!(engine.run().lives, 15);
    assert_eq!(engine.run().wave, 1);
    assert_eq!(engine.run().score, 0);
    assert_eq!(engine.run().difficulty, Difficulty::Hard);
    assert_eq!(engine.world().len(), 0);

    let career = engine.career();
    assert_eq!(career.total_kills, 1);
    assert_eq!(career.towers_built, 1);
    assert_eq!(career.high_scores.len(), 1);
    assert_eq!(career.high_scores[0].score, 80);
    assert_eq!(career.highest_wave, 1);
    assert!(career.achievements.contains(&Achievement::FirstBlood));
}

#[test]
fn test_game_over_then_restart_records_once() {
    let mut engine = engine();
    engine.set_lives(1);
    let last = engine.path().last_index();
    engine.spawn_enemy_at(EnemyKind::Goblin, last - 1, 0.99);
    start(&mut engine);
    engine.tick();
    assert_eq!(engine.phase(), RunPhase::GameOver);

    engine.execute(PlayerCommand::Restart).unwrap();
    assert_eq!(engine.career().high_scores.len(), 1);
    engine.tick();
    engine.execute(PlayerCommand::Restart).unwrap();
    assert_eq!(engine.career().high_scores.len(), 2);
}

#[test]
fn test_restart_without_ticks_records_nothing() {
    let mut engine = engine();
    engine.execute(PlayerCommand::Restart).unwrap();
    assert!(engine.career().high_scores.is_empty(), "restart from ready");

    engine.execute(PlayerCommand::Restart).unwrap();
    assert!(engine.career().high_scores.is_empty(), "back-to-back restart");
    assert_eq!(engine.career().highest_wave, 0);

    engine.tick();
    engine.conclude();
    assert_eq!(engine.career().high_scores.len(), 1);
}

#[test]
fn test_restart_drops_pending_spawns() {
    let mut engine = engine();
    start(&mut engine);
    let mut started = false;
    for _ in 0..800 {
        let snap = engine.tick();
        if snap
            .notifications
            .iter()
            .any(|n| matches!(n, Notification::WaveStarted { .. }))
        {
            started = true;
            break;
        }
    }
    assert!(started);
    assert!(engine.director().pending.len() > 1);

    engine.execute(PlayerCommand::Restart).unwrap();
    for _ in 0..300 {
        let snap = engine.tick();
        assert!(snap.enemies.is_empty(), "stale spawn released after restart");
    }
}

#[test]
fn test_stale_epoch_spawn_dropped() {
    let mut world = World::new();
    let mut director = wave_director::WaveDirector {
        phase: WavePhase::Spawning,
        countdown: 0,
        pending: [wave_director::PendingSpawn {
            due_tick: 0,
            kind: EnemyKind::Goblin,
            epoch: 0,
        }]
        .into_iter()
        .collect(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ids = IdAllocator::default();
    let path = Path::for_map(MapId::Forest);
    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut notifications = Vec::new();

    wave_director::run(
        &mut world,
        &mut director,
        &mut rng,
        &mut ids,
        &path,
        &mut run,
        1,
        10,
        &mut notifications,
    );
    assert!(director.pending.is_empty());
    assert_eq!(world.query::<&Enemy>().iter().count(), 0);
}

// ---- Wave director ----

#[test]
fn test_wave_composition() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let wave1 = wave_director::compose_wave(&mut rng, 1);
    assert_eq!(wave1.len(), 6);
    assert!(wave1.iter().all(|k| *k == EnemyKind::Goblin));

    let wave3 = wave_director::compose_wave(&mut rng, 3);
    assert_eq!(wave3.len(), 9);
    assert!(!wave3.contains(&EnemyKind::Spirit));
    assert!(!wave3.contains(&EnemyKind::Boss));

    let wave5 = wave_director::compose_wave(&mut rng, 5);
    assert_eq!(wave5.len(), 12);
    assert_eq!(wave5.last(), Some(&EnemyKind::Boss));
    assert_eq!(wave5.iter().filter(|k| **k == EnemyKind::Boss).count(), 1);

    let wave10 = wave_director::compose_wave(&mut rng, 10);
    assert_eq!(wave10.len(), 20);
    assert_eq!(wave10.last(), Some(&EnemyKind::Boss));

    let wave7 = wave_director::compose_wave(&mut rng, 7);
    assert!(!wave7.contains(&EnemyKind::Boss));
}

#[test]
fn test_countdown_then_staggered_spawns() {
    let mut engine = engine();
    start(&mut engine);

    let snap = engine.tick();
    assert_eq!(snap.wave.phase, WavePhase::CountingDown);
    assert_eq!(snap.wave.countdown_secs, 12);

    let mut wave_tick = None;
    for _ in 0..800 {
        let snap = engine.tick();
        if snap
            .notifications
            .contains(&Notification::WaveStarted { wave: 1, enemies: 6 })
        {
            wave_tick = Some(snap.time.tick);
            assert_eq!(snap.enemies.len(), 1);
            assert_eq!(snap.wave.pending_spawns, 5);
            assert_eq!(snap.wave.phase, WavePhase::Spawning);
            break;
        }
    }
    let wave_tick = wave_tick.expect("wave 1 should start");
    assert_eq!(wave_tick, 721);

    for _ in 0..42 {
        engine.tick();
    }
    assert_eq!(engine.snapshot().enemies.len(), 2);
}

#[test]
fn test_wave_counter_advances_after_clear() {
    let mut engine = engine();
    build(&mut engine, TowerKind::Archer, 1, 3);
    build(&mut engine, TowerKind::Cannon, 3, 3);
    build(&mut engine, TowerKind::Archer, 4, 3);
    start(&mut engine);

    let mut cleared = false;
    for _ in 0..3000 {
        engine.tick();
        if engine.run().wave == 2 {
            cleared = true;
            break;
        }
    }
    assert!(cleared, "wave 1 should be cleared by three towers");
    assert_eq!(engine.run().lives, 20);
    assert_eq!(engine.run().kills, 6);
}

// ---- Achievements ----

#[test]
fn test_achievements_unlock_once() {
    let mut engine = engine();
    engine.set_gold(5000);
    build(&mut engine, TowerKind::Archer, 1, 3);
    let unlocked: Vec<_> = engine.tick().notifications;
    assert!(unlocked.contains(&Notification::AchievementUnlocked {
        achievement: Achievement::Rich
    }));

    start(&mut engine);
    for _ in 0..5 {
        let snap = engine.tick();
        assert!(!snap
            .notifications
            .iter()
            .any(|n| matches!(n, Notification::AchievementUnlocked { .. })));
    }
    assert_eq!(engine.snapshot().achievements, vec![Achievement::Rich]);
}

#[test]
fn test_boss_kill_unlocks_boss_killer() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let boss = place_enemy(&mut world, &mut ids, EnemyKind::Boss, Position::new(5.0, 5.0));
    if let Ok(mut health) = world.get::<&mut Health>(boss) {
        health.current = 1;
    }
    world_setup::spawn_projectile(
        &mut world,
        Position::new(5.0, 5.0),
        test_projectile(1, boss, DamageType::Physical, 0.0),
    );
    let mut run = RunState::new(Difficulty::Normal, MapId::Forest);
    let mut career = CareerStats::default();
    let mut notifications = Vec::new();
    let mut buffer = Vec::new();
    projectiles::run(&mut world, &mut run, &mut career, &mut notifications, &mut buffer);

    assert!(career.achievements.contains(&Achievement::BossKiller));
    assert_eq!(run.gold, 400);
    assert_eq!(run.score, 1000);
    assert!(world.query::<&Enemy>().iter().next().is_none());
}

#[test]
fn test_conclude_records_run_once() {
    let mut engine = engine();
    start(&mut engine);
    for _ in 0..10 {
        engine.tick();
    }

    let summary = engine.conclude();
    assert_eq!(summary.wave, 1);
    let again = engine.conclude();
    assert_eq!(summary, again);
    assert_eq!(engine.career().high_scores.len(), 1);
    assert_eq!(engine.career().highest_wave, 1);
}
