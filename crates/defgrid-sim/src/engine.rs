//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the run economy and the
//! career record, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use defgrid_core::catalog::{EnemyKind, TowerKind};
use defgrid_core::commands::{CommandOutcome, PlayerCommand};
use defgrid_core::components::{Tower, Weapon};
use defgrid_core::enums::{Difficulty, MapId, RunPhase};
use defgrid_core::error::CommandError;
use defgrid_core::events::{CommandRejection, Notification};
use defgrid_core::path::Path;
use defgrid_core::state::{CareerStats, GameStateSnapshot, HighScore, RunSummary};
use defgrid_core::types::{EnemyId, GridPos, Position, SimTime, TowerId};

use crate::abilities;
use crate::economy;
use crate::run::RunState;
use crate::systems;
use crate::systems::wave_director::WaveDirector;
use crate::world_setup::{self, IdAllocator};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub map: MapId,
    pub difficulty: Difficulty,
    /// Tower kinds the player may build this session.
    pub loadout: Vec<TowerKind>,
    /// Career carried in from the player's profile.
    pub career: CareerStats,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map: MapId::default(),
            difficulty: Difficulty::default(),
            loadout: TowerKind::BATTLE.to_vec(),
            career: CareerStats::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: RunPhase,
    rng: ChaCha8Rng,
    path: Path,
    ids: IdAllocator,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    notifications: Vec<Notification>,
    rejections: Vec<CommandRejection>,

    run: RunState,
    career: CareerStats,
    director: WaveDirector,
    loadout: Vec<TowerKind>,
    /// Difficulty the next restart will use.
    next_difficulty: Difficulty,
    /// Bumped on restart; pending spawns from older epochs are dropped.
    epoch: u64,
    /// Whether this run's high score has been written to the career.
    run_recorded: bool,
    /// Whether this run has simulated at least one tick.
    run_played: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: RunPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            path: Path::for_map(config.map),
            ids: IdAllocator::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            notifications: Vec::new(),
            rejections: Vec::new(),
            run: RunState::new(config.difficulty, config.map),
            career: config.career,
            director: WaveDirector::default(),
            loadout: config.loadout,
            next_difficulty: config.difficulty,
            epoch: 0,
            run_recorded: false,
            run_played: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Outside `Playing` only queued commands are applied.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == RunPhase::Playing {
            self.run_played = true;
            self.run_systems();
            self.time.advance();
        }

        let notifications = std::mem::take(&mut self.notifications);
        let rejections = std::mem::take(&mut self.rejections);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.run,
            &self.director,
            &self.career,
            notifications,
            rejections,
        )
    }

    /// Current state without advancing or draining notifications.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.run,
            &self.director,
            &self.career,
            Vec::new(),
            Vec::new(),
        )
    }

    /// Get the current run phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn career(&self) -> &CareerStats {
        &self.career
    }

    pub fn loadout(&self) -> &[TowerKind] {
        &self.loadout
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// End-of-run figures for the profile.
    pub fn run_summary(&self) -> RunSummary {
        self.run.summary()
    }

    /// Close out the current run for the host: record its high score if
    /// game over has not already done so, and return the summary.
    pub fn conclude(&mut self) -> RunSummary {
        self.finish_run();
        self.run.summary()
    }

    /// Spawn one enemy at the start of the route, scaled for the current wave.
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> EnemyId {
        let id = self.ids.enemy();
        world_setup::spawn_enemy(
            &mut self.world,
            &self.path,
            id,
            kind,
            self.run.wave,
            self.run.difficulty,
        );
        id
    }

    /// Spawn an enemy part-way along the route (for tests).
    #[cfg(test)]
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, index: usize, progress: f64) -> EnemyId {
        use defgrid_core::components::{Enemy, PathProgress};

        let id = self.spawn_enemy(kind);
        let position = self.path.position_at(index, progress);
        for (_, (enemy, path_progress, pos)) in self
            .world
            .query_mut::<(&Enemy, &mut PathProgress, &mut Position)>()
        {
            if enemy.id == id {
                *path_progress = PathProgress { index, progress };
                *pos = position;
            }
        }
        id
    }

    #[cfg(test)]
    pub fn set_lives(&mut self, lives: u32) {
        self.run.lives = lives;
    }

    #[cfg(test)]
    pub fn set_gold(&mut self, gold: u32) {
        self.run.gold = gold;
    }

    #[cfg(test)]
    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    /// Apply a command immediately, between ticks.
    pub fn execute(&mut self, command: PlayerCommand) -> Result<CommandOutcome, CommandError> {
        if self.phase == RunPhase::GameOver
            && matches!(
                command,
                PlayerCommand::Build { .. }
                    | PlayerCommand::Upgrade { .. }
                    | PlayerCommand::Sell { .. }
                    | PlayerCommand::UseAbility { .. }
            )
        {
            return Err(CommandError::RunOver);
        }

        match command {
            PlayerCommand::SelectTile { x, y } => self.select_tile(GridPos::new(x, y)),
            PlayerCommand::DeselectTile => {
                self.run.selected_tile = None;
                Ok(CommandOutcome::TileSelected { tile: None })
            }
            PlayerCommand::Build { kind } => self.build(kind),
            PlayerCommand::Upgrade { tower_id } => self.upgrade(tower_id),
            PlayerCommand::Sell { tower_id } => self.sell(tower_id),
            PlayerCommand::UseAbility { tower_id } => self.use_ability(tower_id),
            PlayerCommand::StartOrResume => match self.phase {
                RunPhase::Ready | RunPhase::Paused => {
                    if self.phase == RunPhase::Ready {
                        info!(map = ?self.run.map, difficulty = ?self.run.difficulty, "run started");
                    }
                    self.phase = RunPhase::Playing;
                    Ok(CommandOutcome::Started)
                }
                RunPhase::Playing => Err(CommandError::AlreadyPlaying),
                RunPhase::GameOver => Err(CommandError::RunOver),
            },
            PlayerCommand::Pause => {
                if self.phase != RunPhase::Playing {
                    return Err(CommandError::NotPlaying);
                }
                self.phase = RunPhase::Paused;
                Ok(CommandOutcome::Paused)
            }
            PlayerCommand::Restart => {
                self.restart();
                Ok(CommandOutcome::Restarted)
            }
            PlayerCommand::SetDifficulty { difficulty } => {
                self.next_difficulty = difficulty;
                Ok(CommandOutcome::DifficultySet { difficulty })
            }
        }
    }

    /// Process all queued commands, recording rejections for the snapshot.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.execute(command.clone()) {
                debug!(?command, reason = %err, "command rejected");
                self.rejections.push(CommandRejection {
                    command,
                    reason: err.to_string(),
                    tick: self.time.tick,
                });
            }
        }
    }

    /// Run all systems in order for one tick.
    fn run_systems(&mut self) {
        // 1. Enemy advance: status, movement, leaks
        systems::enemy_advance::run(
            &mut self.world,
            &self.path,
            &mut self.run,
            &mut self.career,
            &mut self.notifications,
            &mut self.despawn_buffer,
        );
        if self.run.lives == 0 {
            self.game_over();
            return;
        }

        // 2. Tower act: cooldowns, targeting, fire
        systems::tower_fire::run(&mut self.world, &mut self.ids, &mut self.notifications);

        // 3. Projectile advance and hit resolution
        systems::projectiles::run(
            &mut self.world,
            &mut self.run,
            &mut self.career,
            &mut self.notifications,
            &mut self.despawn_buffer,
        );

        // 4. Effect bookkeeping
        systems::effects::run(&mut self.world, &mut self.despawn_buffer);

        // 5. Achievement re-evaluation
        systems::achievements::run(
            &mut self.world,
            &self.run,
            &mut self.career,
            &mut self.notifications,
        );

        // 6. Wave director
        systems::wave_director::run(
            &mut self.world,
            &mut self.director,
            &mut self.rng,
            &mut self.ids,
            &self.path,
            &mut self.run,
            self.epoch,
            self.time.tick,
            &mut self.notifications,
        );
    }

    fn game_over(&mut self) {
        self.phase = RunPhase::GameOver;
        info!(
            wave = self.run.wave,
            score = self.run.score,
            kills = self.run.kills,
            "game over"
        );
        self.notifications.push(Notification::GameOver {
            wave: self.run.wave,
            score: self.run.score,
        });
        self.finish_run();
    }

    /// Write this run's result into the career once.
    ///
    /// A run that never simulated a tick leaves no high-score entry.
    fn finish_run(&mut self) {
        if self.run_recorded || !self.run_played {
            return;
        }
        self.run_recorded = true;
        self.career.record_high_score(HighScore {
            score: self.run.score,
            wave: self.run.wave,
            difficulty: self.run.difficulty,
            map: self.run.map,
        });
        self.career.highest_wave = self.career.highest_wave.max(self.run.wave);
    }

    fn restart(&mut self) {
        self.finish_run();
        self.world.clear();
        self.run = RunState::new(self.next_difficulty, self.run.map);
        self.epoch += 1;
        self.director.reset();
        self.run_recorded = false;
        self.run_played = false;
        self.phase = RunPhase::Playing;
        info!(
            difficulty = ?self.run.difficulty,
            epoch = self.epoch,
            "run restarted"
        );
    }

    fn select_tile(&mut self, tile: GridPos) -> Result<CommandOutcome, CommandError> {
        if !tile.in_bounds() {
            return Err(CommandError::OutOfBounds(tile));
        }
        self.run.selected_tile = if self.run.selected_tile == Some(tile) {
            None
        } else {
            Some(tile)
        };
        Ok(CommandOutcome::TileSelected {
            tile: self.run.selected_tile,
        })
    }

    fn build(&mut self, kind: TowerKind) -> Result<CommandOutcome, CommandError> {
        let tile = self.run.selected_tile.ok_or(CommandError::NoTileSelected)?;
        if self.path.is_path_cell(tile.x, tile.y) {
            return Err(CommandError::PathCell(tile));
        }
        if world_setup::tile_occupied(&self.world, tile) {
            return Err(CommandError::TileOccupied(tile));
        }
        if !self.loadout.contains(&kind) {
            return Err(CommandError::NotInLoadout(kind));
        }
        let cost = kind.stats().cost;
        self.run.spend(cost)?;

        let tower_id = self.ids.tower();
        world_setup::spawn_tower(&mut self.world, tower_id, kind, tile);
        self.career.towers_built += 1;
        self.run.selected_tile = None;
        self.notifications
            .push(Notification::TowerBuilt { tower_id, kind });
        systems::achievements::run(
            &mut self.world,
            &self.run,
            &mut self.career,
            &mut self.notifications,
        );
        Ok(CommandOutcome::Built {
            tower_id,
            kind,
            cost,
        })
    }

    fn upgrade(&mut self, tower_id: TowerId) -> Result<CommandOutcome, CommandError> {
        let entity = world_setup::find_tower(&self.world, tower_id)
            .ok_or(CommandError::UnknownTower(tower_id))?;
        let (kind, level) = {
            let tower = self
                .world
                .get::<&Tower>(entity)
                .map_err(|_| CommandError::UnknownTower(tower_id))?;
            (tower.kind, tower.level)
        };
        let cost = economy::upgrade_cost(kind, level).ok_or(CommandError::MaxLevel)?;
        self.run.spend(cost)?;

        let (new_level, position) = {
            let Ok((tower, weapon, position)) = self
                .world
                .query_one_mut::<(&mut Tower, &mut Weapon, &Position)>(entity)
            else {
                return Err(CommandError::UnknownTower(tower_id));
            };
            tower.level += 1;
            economy::apply_upgrade(weapon);
            (tower.level, *position)
        };

        world_setup::spawn_floating_text(&mut self.world, position, "UPGRADED!");
        self.notifications.push(Notification::TowerUpgraded {
            tower_id,
            level: new_level,
        });
        systems::achievements::run(
            &mut self.world,
            &self.run,
            &mut self.career,
            &mut self.notifications,
        );
        Ok(CommandOutcome::Upgraded {
            tower_id,
            level: new_level,
            cost,
        })
    }

    fn sell(&mut self, tower_id: TowerId) -> Result<CommandOutcome, CommandError> {
        let entity = world_setup::find_tower(&self.world, tower_id)
            .ok_or(CommandError::UnknownTower(tower_id))?;
        let refund = {
            let tower = self
                .world
                .get::<&Tower>(entity)
                .map_err(|_| CommandError::UnknownTower(tower_id))?;
            economy::sell_refund(tower.kind, tower.level)
        };
        let _ = self.world.despawn(entity);
        self.run.refund(refund);
        self.run.selected_tile = None;
        Ok(CommandOutcome::Sold { tower_id, refund })
    }

    fn use_ability(&mut self, tower_id: TowerId) -> Result<CommandOutcome, CommandError> {
        let entity = world_setup::find_tower(&self.world, tower_id)
            .ok_or(CommandError::UnknownTower(tower_id))?;
        let (stats, ability, weapon, origin) = {
            let Ok((tower, weapon, position)) = self
                .world
                .query_one_mut::<(&mut Tower, &Weapon, &Position)>(entity)
            else {
                return Err(CommandError::UnknownTower(tower_id));
            };
            let stats = tower.kind.stats();
            let ability = stats.ability.ok_or(CommandError::NoAbility(tower.kind))?;
            if tower.ability_cooldown > 0 {
                return Err(CommandError::AbilityCoolingDown {
                    remaining: tower.ability_cooldown,
                });
            }
            tower.ability_cooldown = stats.ability_cooldown;
            (stats, ability, weapon.clone(), *position)
        };

        let targets = abilities::launch(
            &mut self.world,
            &mut self.ids,
            entity,
            origin,
            &weapon,
            &stats,
            ability,
        );
        self.notifications
            .push(Notification::AbilityUsed { tower_id, ability });
        Ok(CommandOutcome::AbilityUsed {
            tower_id,
            ability,
            targets,
        })
    }

    /// Number of live floating texts (for tests).
    #[cfg(test)]
    pub fn floating_text_count(&self) -> usize {
        use defgrid_core::components::FloatingText;

        self.world.query::<&FloatingText>().iter().count()
    }
}
