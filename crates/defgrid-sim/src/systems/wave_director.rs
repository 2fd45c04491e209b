//! Wave director: countdown between waves, composition and staggered spawns.
//!
//! Spawns are pending records with a due tick and the run epoch they were
//! scheduled under. A restart bumps the epoch, so anything scheduled by an
//! earlier run is dropped instead of released.

use std::collections::VecDeque;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use defgrid_core::catalog::EnemyKind;
use defgrid_core::components::Enemy;
use defgrid_core::constants::*;
use defgrid_core::enums::WavePhase;
use defgrid_core::events::Notification;
use defgrid_core::path::Path;
use defgrid_core::state::WaveView;

use crate::run::RunState;
use crate::world_setup::{self, IdAllocator};

/// One enemy waiting to enter the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSpawn {
    pub due_tick: u64,
    pub kind: EnemyKind,
    pub epoch: u64,
}

/// Wave state machine. Owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    pub phase: WavePhase,
    /// Ticks left in the current countdown.
    pub countdown: u32,
    pub pending: VecDeque<PendingSpawn>,
}

impl WaveDirector {
    /// Back to Idle with nothing scheduled.
    pub fn reset(&mut self) {
        self.phase = WavePhase::Idle;
        self.countdown = 0;
        self.pending.clear();
    }

    pub fn view(&self) -> WaveView {
        let countdown_secs = if self.phase == WavePhase::CountingDown {
            self.countdown.div_ceil(TICK_RATE)
        } else {
            0
        };
        WaveView {
            phase: self.phase,
            countdown_secs,
            pending_spawns: self.pending.len() as u32,
        }
    }
}

/// Number of enemies in wave `wave`.
pub fn wave_size(wave: u32) -> usize {
    (WAVE_BASE_COUNT + (wave as f64 * WAVE_COUNT_PER_WAVE).floor() as u32) as usize
}

/// Whether wave `wave` ends with a boss.
pub fn is_boss_wave(wave: u32) -> bool {
    wave >= BOSS_WAVE_INTERVAL && wave % BOSS_WAVE_INTERVAL == 0
}

/// Roll the enemy list for a wave.
///
/// Later overrides win: a high roll on wave 4+ becomes a SPIRIT even though
/// it also qualified as ORC and SPEEDY.
pub fn compose_wave(rng: &mut impl Rng, wave: u32) -> Vec<EnemyKind> {
    let count = wave_size(wave);
    let mut kinds: Vec<EnemyKind> = (0..count)
        .map(|_| {
            let r: f64 = rng.gen();
            let mut kind = EnemyKind::Goblin;
            if wave >= 2 && r > 0.7 {
                kind = EnemyKind::Orc;
            }
            if wave >= 3 && r > 0.85 {
                kind = EnemyKind::Speedy;
            }
            if wave >= 4 && r > 0.9 {
                kind = EnemyKind::Spirit;
            }
            kind
        })
        .collect();

    if is_boss_wave(wave) {
        if let Some(last) = kinds.last_mut() {
            *last = EnemyKind::Boss;
        }
    }
    kinds
}

/// Advance the wave state machine, then release due spawns.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    director: &mut WaveDirector,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    path: &Path,
    run: &mut RunState,
    epoch: u64,
    current_tick: u64,
    notifications: &mut Vec<Notification>,
) {
    let field_clear = world.query::<&Enemy>().iter().next().is_none();

    match director.phase {
        WavePhase::Idle => {
            if field_clear && director.pending.is_empty() {
                director.phase = WavePhase::CountingDown;
                director.countdown = WAVE_INTERVAL_TICKS;
            }
        }
        WavePhase::CountingDown => {
            director.countdown = director.countdown.saturating_sub(1);
            if director.countdown == 0 {
                let kinds = compose_wave(rng, run.wave);
                let enemies = kinds.len() as u32;
                director.pending.extend(kinds.into_iter().enumerate().map(|(i, kind)| {
                    PendingSpawn {
                        due_tick: current_tick + i as u64 * SPAWN_STAGGER_TICKS,
                        kind,
                        epoch,
                    }
                }));
                director.phase = WavePhase::Spawning;
                tracing::debug!(wave = run.wave, enemies, "wave started");
                notifications.push(Notification::WaveStarted {
                    wave: run.wave,
                    enemies,
                });
            }
        }
        WavePhase::Spawning => {
            if field_clear && director.pending.is_empty() {
                tracing::debug!(wave = run.wave, "wave cleared");
                run.wave += 1;
                director.phase = WavePhase::Idle;
            }
        }
    }

    while director
        .pending
        .front()
        .is_some_and(|spawn| spawn.due_tick <= current_tick)
    {
        let Some(spawn) = director.pending.pop_front() else {
            break;
        };
        if spawn.epoch != epoch {
            tracing::debug!(kind = ?spawn.kind, "dropping stale spawn");
            continue;
        }
        let id = ids.enemy();
        world_setup::spawn_enemy(world, path, id, spawn.kind, run.wave, run.difficulty);
        tracing::trace!(%id, kind = ?spawn.kind, "enemy spawned");
    }
}
