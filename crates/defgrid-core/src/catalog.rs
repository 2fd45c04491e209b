//! Static tower and enemy definitions.
//!
//! Pure data: upgrades and wave scaling are computed from these bases and
//! never write back into them.

use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;
use crate::enums::{Ability, DamageType, Difficulty, TowerCategory};

/// Every tower in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TowerKind {
    // --- Starter ---
    Archer,
    Cannon,
    Ice,
    // --- Basic ---
    Magic,
    Poison,
    // --- Advanced ---
    Sniper,
    Tesla,
    Wind,
    Bomb,
    Laser,
    // --- Elemental ---
    Fire,
    Storm,
    Earth,
    Water,
    // --- Support ---
    Buff,
    Slow,
    Gold,
    Heal,
    // --- Special ---
    Void,
    Solar,
    Lunar,
    Star,
    // --- Legendary ---
    Plasma,
    Death,
    Crystal,
    Gravity,
    Rocket,
    // --- Mythic ---
    Omega,
    Divine,
    Chaos,
}

/// Base stats of a tower type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TowerStats {
    pub name: &'static str,
    /// Gold cost to build in a run.
    pub cost: u32,
    /// Targeting range (cells).
    pub range: f64,
    pub damage: u32,
    /// Ticks between shots.
    pub cooldown: u32,
    /// Splash radius (cells), 0 for single-target.
    pub splash_radius: f64,
    pub damage_type: DamageType,
    pub ability: Option<Ability>,
    /// Ticks between ability uses.
    pub ability_cooldown: u32,
    pub category: TowerCategory,
    /// Coin price to unlock in the store.
    pub price: u32,
}

/// Every enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Spirit,
    Boss,
    Speedy,
}

/// Base stats of an enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyStats {
    pub name: &'static str,
    pub hp: u32,
    /// Path progress per tick.
    pub speed: f64,
    /// Gold granted on death.
    pub reward: u32,
    /// Flat damage reduction per hit.
    pub armor: u32,
    pub flying: bool,
}

/// Per-difficulty scaling and starting resources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub enemy_hp_multiplier: f64,
    pub enemy_speed_multiplier: f64,
    pub gold_multiplier: f64,
    pub starting_gold: u32,
    pub starting_lives: u32,
}

#[allow(clippy::too_many_arguments)]
const fn tower(
    name: &'static str,
    cost: u32,
    range: f64,
    damage: u32,
    cooldown: u32,
    splash_radius: f64,
    damage_type: DamageType,
    category: TowerCategory,
    price: u32,
) -> TowerStats {
    TowerStats {
        name,
        cost,
        range,
        damage,
        cooldown,
        splash_radius,
        damage_type,
        ability: None,
        ability_cooldown: 0,
        category,
        price,
    }
}

const fn with_ability(stats: TowerStats, ability: Ability, ability_cooldown: u32) -> TowerStats {
    TowerStats {
        ability: Some(ability),
        ability_cooldown,
        ..stats
    }
}

impl TowerKind {
    pub const ALL: [TowerKind; 30] = [
        TowerKind::Archer,
        TowerKind::Cannon,
        TowerKind::Ice,
        TowerKind::Magic,
        TowerKind::Poison,
        TowerKind::Sniper,
        TowerKind::Tesla,
        TowerKind::Wind,
        TowerKind::Bomb,
        TowerKind::Laser,
        TowerKind::Fire,
        TowerKind::Storm,
        TowerKind::Earth,
        TowerKind::Water,
        TowerKind::Buff,
        TowerKind::Slow,
        TowerKind::Gold,
        TowerKind::Heal,
        TowerKind::Void,
        TowerKind::Solar,
        TowerKind::Lunar,
        TowerKind::Star,
        TowerKind::Plasma,
        TowerKind::Death,
        TowerKind::Crystal,
        TowerKind::Gravity,
        TowerKind::Rocket,
        TowerKind::Omega,
        TowerKind::Divine,
        TowerKind::Chaos,
    ];

    /// The four towers that carry abilities, available in every default run.
    pub const BATTLE: [TowerKind; 4] = [
        TowerKind::Archer,
        TowerKind::Cannon,
        TowerKind::Magic,
        TowerKind::Ice,
    ];

    /// Towers unlocked on a fresh profile.
    pub const STARTER: [TowerKind; 3] = [TowerKind::Archer, TowerKind::Cannon, TowerKind::Ice];

    pub fn stats(self) -> TowerStats {
        use DamageType as D;
        use TowerCategory as C;
        match self {
            TowerKind::Archer => with_ability(
                tower("Ballista", 60, 3.5, 15, 30, 0.0, D::Physical, C::Starter, 0),
                Ability::Multishot,
                180,
            ),
            TowerKind::Cannon => with_ability(
                tower("Blaster", 120, 2.5, 40, 90, 1.5, D::Explosive, C::Starter, 0),
                Ability::Napalm,
                240,
            ),
            TowerKind::Ice => with_ability(
                tower("Cryo", 180, 3.0, 10, 40, 0.0, D::Ice, C::Starter, 0),
                Ability::Blizzard,
                220,
            ),
            TowerKind::Magic => with_ability(
                tower("Arcane", 150, 4.0, 25, 45, 0.0, D::Magic, C::Basic, 100),
                Ability::ChainLightning,
                200,
            ),
            TowerKind::Poison => tower("Toxin", 200, 2.8, 8, 35, 0.0, D::Poison, C::Basic, 250),
            TowerKind::Sniper => tower("Railgun", 250, 6.0, 100, 120, 0.0, D::Physical, C::Advanced, 350),
            TowerKind::Tesla => tower("Tesla Coil", 220, 3.0, 20, 25, 0.0, D::Electric, C::Advanced, 300),
            TowerKind::Wind => tower("Gale Force", 180, 3.5, 12, 20, 0.0, D::Wind, C::Advanced, 280),
            TowerKind::Bomb => tower("Demolisher", 280, 2.0, 80, 150, 2.0, D::Explosive, C::Advanced, 400),
            TowerKind::Laser => tower("Beam Cannon", 300, 5.0, 5, 5, 0.0, D::Energy, C::Advanced, 450),
            TowerKind::Fire => tower("Inferno", 240, 2.5, 35, 60, 1.2, D::Fire, C::Elemental, 420),
            TowerKind::Storm => tower("Tempest", 320, 4.0, 30, 80, 0.0, D::Storm, C::Elemental, 500),
            TowerKind::Earth => tower("Quake", 260, 2.0, 50, 100, 1.8, D::Earth, C::Elemental, 480),
            TowerKind::Water => tower("Tsunami", 280, 3.5, 25, 70, 0.0, D::Water, C::Elemental, 460),
            TowerKind::Buff => tower("War Banner", 200, 3.0, 0, 0, 0.0, D::Support, C::Support, 350),
            TowerKind::Slow => tower("Time Warp", 220, 3.5, 0, 0, 0.0, D::Support, C::Support, 380),
            TowerKind::Gold => tower("Treasury", 350, 2.0, 0, 0, 0.0, D::Support, C::Support, 500),
            TowerKind::Heal => tower("Sanctuary", 400, 0.0, 0, 0, 0.0, D::Support, C::Support, 600),
            TowerKind::Void => tower("Void Rift", 400, 3.0, 60, 100, 0.0, D::Void, C::Special, 650),
            TowerKind::Solar => tower("Sun Spire", 380, 4.5, 45, 80, 0.0, D::Light, C::Special, 700),
            TowerKind::Lunar => tower("Moon Tower", 360, 4.0, 35, 60, 0.0, D::Dark, C::Special, 680),
            TowerKind::Star => tower("Starfall", 450, 5.0, 70, 120, 0.0, D::Cosmic, C::Special, 750),
            TowerKind::Plasma => tower("Plasma Core", 500, 4.0, 55, 50, 0.0, D::Plasma, C::Legendary, 850),
            TowerKind::Death => tower("Reaper", 550, 3.5, 999, 300, 0.0, D::Death, C::Legendary, 1000),
            TowerKind::Crystal => tower("Prism", 480, 4.5, 40, 40, 0.0, D::Crystal, C::Legendary, 900),
            TowerKind::Gravity => tower("Singularity", 520, 3.0, 30, 80, 2.5, D::Gravity, C::Legendary, 950),
            TowerKind::Rocket => tower("Missile Silo", 600, 6.0, 120, 180, 2.0, D::Explosive, C::Legendary, 1100),
            TowerKind::Omega => tower("Omega Cannon", 800, 5.5, 200, 200, 0.0, D::Ultimate, C::Mythic, 1500),
            TowerKind::Divine => tower("Divine Light", 750, 5.0, 80, 60, 0.0, D::Holy, C::Mythic, 1800),
            TowerKind::Chaos => tower("Chaos Engine", 700, 4.0, 50, 30, 0.0, D::Chaos, C::Mythic, 2000),
        }
    }

    /// Support towers have no weapon and never fire.
    pub fn is_support(self) -> bool {
        self.stats().category == TowerCategory::Support
    }

    /// Parse a catalog id such as `"ARCHER"` (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }

    /// Catalog id, e.g. `"ARCHER"`.
    pub fn id(self) -> &'static str {
        match self {
            TowerKind::Archer => "ARCHER",
            TowerKind::Cannon => "CANNON",
            TowerKind::Ice => "ICE",
            TowerKind::Magic => "MAGIC",
            TowerKind::Poison => "POISON",
            TowerKind::Sniper => "SNIPER",
            TowerKind::Tesla => "TESLA",
            TowerKind::Wind => "WIND",
            TowerKind::Bomb => "BOMB",
            TowerKind::Laser => "LASER",
            TowerKind::Fire => "FIRE",
            TowerKind::Storm => "STORM",
            TowerKind::Earth => "EARTH",
            TowerKind::Water => "WATER",
            TowerKind::Buff => "BUFF",
            TowerKind::Slow => "SLOW",
            TowerKind::Gold => "GOLD",
            TowerKind::Heal => "HEAL",
            TowerKind::Void => "VOID",
            TowerKind::Solar => "SOLAR",
            TowerKind::Lunar => "LUNAR",
            TowerKind::Star => "STAR",
            TowerKind::Plasma => "PLASMA",
            TowerKind::Death => "DEATH",
            TowerKind::Crystal => "CRYSTAL",
            TowerKind::Gravity => "GRAVITY",
            TowerKind::Rocket => "ROCKET",
            TowerKind::Omega => "OMEGA",
            TowerKind::Divine => "DIVINE",
            TowerKind::Chaos => "CHAOS",
        }
    }
}

impl std::fmt::Display for TowerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl TowerStats {
    /// Shots per second for display.
    ///
    /// `None` when the cooldown is zero (continuous beam or support tower).
    pub fn fire_rate(&self) -> Option<f64> {
        fire_rate(self.cooldown)
    }
}

/// Shots per second for a cooldown in ticks, guarding the zero case.
pub fn fire_rate(cooldown_ticks: u32) -> Option<f64> {
    if cooldown_ticks == 0 {
        None
    } else {
        Some(TICK_RATE as f64 / cooldown_ticks as f64)
    }
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Goblin,
        EnemyKind::Orc,
        EnemyKind::Spirit,
        EnemyKind::Boss,
        EnemyKind::Speedy,
    ];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Goblin => EnemyStats {
                name: "Scout",
                hp: 30,
                speed: 0.045,
                reward: 8,
                armor: 0,
                flying: false,
            },
            EnemyKind::Orc => EnemyStats {
                name: "Tank",
                hp: 80,
                speed: 0.025,
                reward: 15,
                armor: 5,
                flying: false,
            },
            EnemyKind::Spirit => EnemyStats {
                name: "Wraith",
                hp: 40,
                speed: 0.04,
                reward: 12,
                armor: 0,
                flying: true,
            },
            EnemyKind::Boss => EnemyStats {
                name: "TITAN",
                hp: 500,
                speed: 0.015,
                reward: 100,
                armor: 10,
                flying: false,
            },
            EnemyKind::Speedy => EnemyStats {
                name: "Runner",
                hp: 20,
                speed: 0.065,
                reward: 10,
                armor: 0,
                flying: false,
            },
        }
    }
}

impl Difficulty {
    pub fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                enemy_hp_multiplier: 0.7,
                enemy_speed_multiplier: 0.8,
                gold_multiplier: 1.5,
                starting_gold: 400,
                starting_lives: 25,
            },
            Difficulty::Normal => DifficultyConfig {
                enemy_hp_multiplier: 1.0,
                enemy_speed_multiplier: 1.0,
                gold_multiplier: 1.0,
                starting_gold: 300,
                starting_lives: 20,
            },
            Difficulty::Hard => DifficultyConfig {
                enemy_hp_multiplier: 1.5,
                enemy_speed_multiplier: 1.2,
                gold_multiplier: 0.8,
                starting_gold: 250,
                starting_lives: 15,
            },
        }
    }
}
