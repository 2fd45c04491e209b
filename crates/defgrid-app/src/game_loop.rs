//! Game loop thread: runs the simulation engine at a fixed 60 Hz timestep.
//!
//! The engine is created and owned by this thread. Commands arrive via an
//! `mpsc` channel. Snapshots go to the notification sink and are stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, info};

use defgrid_core::enums::RunPhase;
use defgrid_core::state::{CareerStats, GameStateSnapshot, RunSummary};
use defgrid_sim::{FixedTimestep, SimConfig, SimulationEngine};

use crate::sink::NotificationSink;
use crate::state::{GameLoopCommand, LoopHandle, SharedSnapshot};

/// How long and how fast the loop runs.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks.
    pub max_ticks: u64,
    /// Pace ticks against the wall clock. Otherwise run flat out.
    pub realtime: bool,
    /// Stop as soon as the run is lost.
    pub stop_on_game_over: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: 60 * 60,
            realtime: false,
            stop_on_game_over: true,
        }
    }
}

/// What the loop hands back when it exits.
#[derive(Debug, Clone)]
pub struct LoopReport {
    pub ticks: u64,
    pub phase: RunPhase,
    pub summary: RunSummary,
    /// The engine's cumulative career, ready to fold into the profile.
    pub career: CareerStats,
}

/// Spawns the game loop in a new thread.
///
/// Returns the host handle and the join handle yielding the final report.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    mut sink: NotificationSink,
) -> std::io::Result<(LoopHandle, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let join = std::thread::Builder::new()
        .name("defgrid-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config);
            run_game_loop(&mut engine, &cmd_rx, options, &mut sink, &shared)
        })?;

    Ok((
        LoopHandle {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        join,
    ))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick budget,
/// or (optionally) game over.
pub fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    options: LoopOptions,
    sink: &mut NotificationSink,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopReport {
    let mut timestep = FixedTimestep::default();
    let mut last_frame = Instant::now();
    let mut ticks = 0u64;

    'frames: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shutdown requested");
                    break 'frames;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'frames,
            }
        }

        // 2. Work out how many ticks this frame owes
        let due = if options.realtime {
            let now = Instant::now();
            let due = timestep.advance(now - last_frame);
            last_frame = now;
            due
        } else {
            1
        };

        // 3. Advance, publishing every snapshot
        let mut latest = None;
        for _ in 0..due {
            let snapshot = engine.tick();
            ticks += 1;
            sink.publish(&snapshot);
            latest = Some(snapshot);
            if ticks >= options.max_ticks {
                break;
            }
        }

        // 4. Store latest snapshot for polling
        if let Some(snapshot) = latest {
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        if ticks >= options.max_ticks {
            debug!(ticks, "tick budget reached");
            break;
        }
        if options.stop_on_game_over && engine.phase() == RunPhase::GameOver {
            break;
        }

        // 5. Sleep until the next tick is due
        if options.realtime {
            std::thread::sleep(timestep.step());
        }
    }

    let summary = engine.conclude();
    info!(
        ticks,
        wave = summary.wave,
        score = summary.score,
        kills = summary.kills,
        "game loop finished"
    );
    LoopReport {
        ticks,
        phase: engine.phase(),
        summary,
        career: engine.career().clone(),
    }
}
