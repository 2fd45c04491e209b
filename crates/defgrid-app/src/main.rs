use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use defgrid_app::game_loop::{self, LoopOptions};
use defgrid_app::script::Placement;
use defgrid_app::save_worker::SaveWorker;
use defgrid_app::sink::NotificationSink;
use defgrid_core::catalog::TowerKind;
use defgrid_core::commands::PlayerCommand;
use defgrid_core::enums::{Difficulty, MapId};
use defgrid_profile::{FileStore, Profile, ProfileRepository};
use defgrid_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "defgrid")]
#[command(about = "Headless host for the DEFGRID tower-defense simulation")]
struct Cli {
    /// Directory holding profile.json
    #[arg(long, global = true, default_value = "./defgrid-data")]
    profile_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scripted run and fold the result into the profile
    Play(PlayArgs),
    /// Inspect or change the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// FOREST, DESERT or VOLCANO (defaults to the profile setting)
    #[arg(long, value_parser = parse_map)]
    map: Option<MapId>,

    /// easy, normal or hard (defaults to the profile setting)
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Tick budget for the run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Pace ticks at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Tower to build before starting, e.g. ARCHER@1,3 (repeatable)
    #[arg(long = "build")]
    builds: Vec<Placement>,

    /// Write the final snapshot as JSON to this file
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    /// Print coins, deck, career and the tower store
    Show,
    /// Unlock a tower with coins
    Buy { tower: String },
    /// Edit the active deck
    Deck {
        #[command(subcommand)]
        action: DeckAction,
    },
    /// Change settings
    Settings {
        #[arg(long)]
        sound: Option<bool>,
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        #[arg(long, value_parser = parse_map)]
        map: Option<MapId>,
    },
}

#[derive(Subcommand, Debug)]
enum DeckAction {
    Add { tower: String },
    Remove { tower: String },
}

fn parse_map(s: &str) -> Result<MapId, String> {
    match s.to_ascii_uppercase().as_str() {
        "FOREST" => Ok(MapId::Forest),
        "DESERT" => Ok(MapId::Desert),
        "VOLCANO" => Ok(MapId::Volcano),
        _ => Err(format!("unknown map {s:?}")),
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    match s.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        _ => Err(format!("unknown difficulty {s:?}")),
    }
}

fn parse_tower(id: &str) -> Result<TowerKind> {
    match TowerKind::from_id(id) {
        Some(kind) => Ok(kind),
        None => bail!("unknown tower {id:?}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    fs::create_dir_all(&cli.profile_dir).with_context(|| {
        format!(
            "creating profile directory {}",
            cli.profile_dir.display()
        )
    })?;
    let repository = ProfileRepository::new(FileStore::new(&cli.profile_dir));

    match cli.command {
        Command::Play(args) => play(repository, args),
        Command::Profile { action } => edit_profile(&repository, action),
    }
}

fn play(repository: ProfileRepository<FileStore>, args: PlayArgs) -> Result<()> {
    let mut profile = repository.load_profile();
    let config = SimConfig {
        seed: args.seed,
        map: args.map.unwrap_or(profile.settings.map),
        difficulty: args.difficulty.unwrap_or(profile.settings.difficulty),
        loadout: profile.loadout(),
        career: profile.career.clone(),
    };
    info!(
        seed = config.seed,
        map = ?config.map,
        difficulty = ?config.difficulty,
        loadout = ?config.loadout,
        "starting run"
    );

    let options = LoopOptions {
        max_ticks: args.ticks,
        realtime: args.realtime,
        stop_on_game_over: true,
    };
    let sink = NotificationSink::new(profile.settings.sound_enabled);
    let (handle, join) = game_loop::spawn_game_loop(config, options, sink)
        .context("spawning game loop thread")?;

    for placement in &args.builds {
        for command in placement.commands() {
            handle.send(command);
        }
    }
    handle.send(PlayerCommand::StartOrResume);

    let report = match join.join() {
        Ok(report) => report,
        Err(_) => bail!("game loop thread panicked"),
    };

    let coins = profile.record_run(&report.summary, &report.career);
    let worker = SaveWorker::spawn(repository).context("spawning save worker")?;
    worker.save(&profile);
    let failures = worker.shutdown();

    println!(
        "Run over after {} ticks ({:?}): wave {}, score {}, kills {}, +{} coins (balance {})",
        report.ticks,
        report.phase,
        report.summary.wave,
        report.summary.score,
        report.summary.kills,
        coins,
        profile.coins
    );
    if failures > 0 {
        println!("Warning: the profile could not be saved");
    }

    if let Some(path) = args.snapshot_out {
        let snapshot = handle
            .snapshot()
            .context("game loop produced no snapshot")?;
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        fs::write(&path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
    }
    Ok(())
}

fn edit_profile(
    repository: &ProfileRepository<FileStore>,
    action: ProfileAction,
) -> Result<()> {
    let mut profile = repository.load_profile();

    match action {
        ProfileAction::Show => {
            print_profile(&profile);
            return Ok(());
        }
        ProfileAction::Buy { tower } => {
            let kind = parse_tower(&tower)?;
            let price = profile.buy_tower(kind)?;
            println!("Unlocked {kind} for {price} coins ({} left)", profile.coins);
        }
        ProfileAction::Deck { action } => match action {
            DeckAction::Add { tower } => {
                let kind = parse_tower(&tower)?;
                profile.add_to_deck(kind)?;
                println!("Added {kind} to the deck");
            }
            DeckAction::Remove { tower } => {
                let kind = parse_tower(&tower)?;
                profile.remove_from_deck(kind)?;
                println!("Removed {kind} from the deck");
            }
        },
        ProfileAction::Settings {
            sound,
            difficulty,
            map,
        } => {
            if let Some(sound) = sound {
                profile.settings.sound_enabled = sound;
            }
            if let Some(difficulty) = difficulty {
                profile.settings.difficulty = difficulty;
            }
            if let Some(map) = map {
                profile.settings.map = map;
            }
            println!("Settings: {:?}", profile.settings);
        }
    }

    if !repository.save_profile(&profile) {
        bail!(
            "could not save profile to {}",
            repository.store().dir().display()
        );
    }
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("Coins: {}", profile.coins);
    println!("Games played: {}", profile.games_played);
    let deck: Vec<_> = profile.deck.iter().map(|k| k.id()).collect();
    println!("Deck: {}", deck.join(", "));

    let career = &profile.career;
    println!(
        "Career: {} kills, {} gold earned, {} towers built, highest wave {}",
        career.total_kills, career.total_gold_earned, career.towers_built, career.highest_wave
    );
    for achievement in &career.achievements {
        println!("  * {}", achievement.title());
    }
    for (rank, entry) in career.high_scores.iter().enumerate() {
        println!(
            "  {:>2}. {:>6} (wave {}, {:?}, {:?})",
            rank + 1,
            entry.score,
            entry.wave,
            entry.difficulty,
            entry.map
        );
    }

    println!("Store:");
    for entry in profile.store() {
        let status = if entry.in_deck {
            "in deck"
        } else if entry.unlocked {
            "owned"
        } else {
            ""
        };
        println!(
            "  {:<8} {:<14} {:>5} coins  {}",
            entry.kind.id(),
            entry.name,
            entry.price,
            status
        );
    }
}
