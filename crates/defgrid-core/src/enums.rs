//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Run set up, waiting for the first start.
    #[default]
    Ready,
    /// Ticks advance the simulation.
    Playing,
    /// Tick processing suspended by the player.
    Paused,
    /// Lives exhausted. Only a restart leaves this phase.
    GameOver,
}

/// Difficulty preset selecting enemy scaling and starting resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Playable maps. Each has a fixed route (see `path`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MapId {
    #[default]
    Forest,
    Desert,
    Volcano,
}

/// Damage tag carried by towers and their projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    #[default]
    Physical,
    Explosive,
    Magic,
    Ice,
    Poison,
    Electric,
    Wind,
    Energy,
    Fire,
    Storm,
    Earth,
    Water,
    Support,
    Void,
    Light,
    Dark,
    Cosmic,
    Plasma,
    Death,
    Crystal,
    Gravity,
    Ultimate,
    Holy,
    Chaos,
}

/// Store grouping of a tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerCategory {
    #[default]
    Starter,
    Basic,
    Advanced,
    Elemental,
    Support,
    Special,
    Legendary,
    Mythic,
}

/// Manually triggered tower ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ability {
    /// Volley at several targets at reduced damage.
    Multishot,
    /// Fire that sets every splashed enemy burning.
    Napalm,
    /// Arcs to several targets at reduced damage.
    ChainLightning,
    /// Chilling volley that freezes several targets.
    Blizzard,
}

/// Milestones derived from run and career counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "first_blood")]
    FirstBlood,
    #[serde(rename = "wave_5")]
    Wave5,
    #[serde(rename = "wave_10")]
    Wave10,
    #[serde(rename = "wave_20")]
    Wave20,
    #[serde(rename = "tower_master")]
    TowerMaster,
    #[serde(rename = "max_tower")]
    MaxTower,
    #[serde(rename = "rich")]
    Rich,
    #[serde(rename = "boss_killer")]
    BossKiller,
}

/// Visual flavor of a particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    #[default]
    Hit,
    Frost,
    Blast,
}

/// Wave director state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the field to clear.
    #[default]
    Idle,
    /// Counting down to the next wave.
    CountingDown,
    /// Releasing staggered spawns and waiting for them to resolve.
    Spawning,
}

impl DamageType {
    /// Whether projectiles of this type can target and damage flying enemies.
    pub fn hits_flying(self) -> bool {
        self == DamageType::Magic
    }
}

impl Achievement {
    pub const ALL: [Achievement; 8] = [
        Achievement::FirstBlood,
        Achievement::Wave5,
        Achievement::Wave10,
        Achievement::Wave20,
        Achievement::TowerMaster,
        Achievement::MaxTower,
        Achievement::Rich,
        Achievement::BossKiller,
    ];

    /// Display name.
    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::Wave5 => "Survivor",
            Achievement::Wave10 => "Veteran",
            Achievement::Wave20 => "Legend",
            Achievement::TowerMaster => "Tower Master",
            Achievement::MaxTower => "Perfectionist",
            Achievement::Rich => "Wealthy",
            Achievement::BossKiller => "Boss Slayer",
        }
    }
}

impl Ability {
    /// Short label shown as floating text when the ability fires.
    pub fn label(self) -> &'static str {
        match self {
            Ability::Multishot => "MULTISHOT!",
            Ability::Napalm => "NAPALM!",
            Ability::ChainLightning => "CHAIN!",
            Ability::Blizzard => "BLIZZARD!",
        }
    }
}
