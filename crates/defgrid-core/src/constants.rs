//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Grid ---

/// Grid width in cells.
pub const GRID_WIDTH: i32 = 14;

/// Grid height in cells.
pub const GRID_HEIGHT: i32 = 9;

// --- Waves ---

/// Countdown between waves (seconds).
pub const WAVE_INTERVAL_SECS: u32 = 12;

/// Countdown between waves (ticks).
pub const WAVE_INTERVAL_TICKS: u32 = WAVE_INTERVAL_SECS * TICK_RATE;

/// Delay between consecutive spawns of one wave (milliseconds).
pub const SPAWN_STAGGER_MS: u32 = 700;

/// Delay between consecutive spawns of one wave (ticks).
pub const SPAWN_STAGGER_TICKS: u64 = (SPAWN_STAGGER_MS * TICK_RATE / 1000) as u64;

/// Base number of enemies in a wave.
pub const WAVE_BASE_COUNT: u32 = 5;

/// Additional enemies per wave number (floored).
pub const WAVE_COUNT_PER_WAVE: f64 = 1.5;

/// A boss closes every wave that is a multiple of this.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// Per-wave enemy health growth factor.
pub const WAVE_HP_GROWTH: f64 = 1.15;

// --- Enemy status ---

/// Speed multiplier while frozen.
pub const FROZEN_SPEED_FACTOR: f64 = 0.5;

/// Frozen duration applied by an ice hit (ticks).
pub const FREEZE_TICKS: u32 = 90;

/// Health lost per tick while burning.
pub const BURN_DAMAGE_PER_TICK: u32 = 2;

/// Minimum damage dealt by any hit after armor.
pub const MIN_HIT_DAMAGE: u32 = 1;

// --- Projectiles ---

/// Speed of a regular tower projectile (cells per tick).
pub const PROJECTILE_SPEED: f64 = 0.35;

/// Speed of an ability projectile (cells per tick).
pub const ABILITY_PROJECTILE_SPEED: f64 = 0.4;

// --- Economy ---

/// Upgrade cost factor: floor(base_cost * factor * level).
pub const UPGRADE_COST_FACTOR: f64 = 1.5;

/// Sell refund factor: floor(base_cost * factor * level).
pub const SELL_REFUND_FACTOR: f64 = 0.6;

/// Score awarded per gold of enemy reward.
pub const SCORE_PER_REWARD: u32 = 10;

// --- Upgrades ---

/// Maximum tower level.
pub const MAX_TOWER_LEVEL: u32 = 3;

/// Damage multiplier per upgrade (floored).
pub const UPGRADE_DAMAGE_FACTOR: f64 = 1.4;

/// Range added per upgrade (cells).
pub const UPGRADE_RANGE_BONUS: f64 = 0.5;

/// Max-cooldown multiplier per upgrade (floored).
pub const UPGRADE_COOLDOWN_FACTOR: f64 = 0.85;

/// Max-cooldown never drops below this after an upgrade (ticks).
pub const MIN_UPGRADED_COOLDOWN: u32 = 15;

// --- Abilities ---

/// Damage multiplier for MULTISHOT volleys.
pub const MULTISHOT_DAMAGE_FACTOR: f64 = 0.8;

/// Targets hit by a MULTISHOT volley.
pub const MULTISHOT_TARGETS: usize = 3;

/// Targets struck by CHAIN_LIGHTNING.
pub const CHAIN_LIGHTNING_TARGETS: usize = 3;

/// Targets chilled by BLIZZARD.
pub const BLIZZARD_TARGETS: usize = 5;

/// Damage multiplier for CHAIN_LIGHTNING, BLIZZARD and NAPALM.
pub const ABILITY_DAMAGE_FACTOR: f64 = 0.5;

/// Burning duration applied by NAPALM (ticks).
pub const NAPALM_BURN_TICKS: u32 = 300;

// --- Effects ---

/// Lifetime of a hit particle (ticks).
pub const HIT_PARTICLE_LIFE: u32 = 10;

/// Lifetime of a splash particle (ticks).
pub const SPLASH_PARTICLE_LIFE: u32 = 20;

/// Size of a hit particle (cells).
pub const HIT_PARTICLE_SIZE: f64 = 0.3;

/// Lifetime of a floating text (ticks).
pub const FLOATING_TEXT_LIFE: u32 = 50;

/// Upward drift of a floating text per tick (cells).
pub const FLOATING_TEXT_DRIFT: f64 = 0.02;

// --- Achievements ---

/// Gold on hand for the `rich` achievement.
pub const RICH_GOLD_THRESHOLD: u32 = 1000;

/// Towers built for the `tower_master` achievement.
pub const TOWER_MASTER_THRESHOLD: u32 = 10;

// --- Career ---

/// Number of high scores kept.
pub const HIGH_SCORE_LIMIT: usize = 10;

// --- Deck ---

/// Minimum towers in the active deck.
pub const DECK_MIN: usize = 2;

/// Maximum towers in the active deck.
pub const DECK_MAX: usize = 5;

/// Profile coins awarded per wave cleared in a run.
pub const COINS_PER_WAVE_CLEARED: u32 = 5;
