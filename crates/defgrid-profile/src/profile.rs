//! The player profile and its store/deck rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use defgrid_core::catalog::TowerKind;
use defgrid_core::constants::{COINS_PER_WAVE_CLEARED, DECK_MAX, DECK_MIN};
use defgrid_core::enums::{Difficulty, MapId};
use defgrid_core::state::{CareerStats, RunSummary};

use crate::error::ProfileError;

/// Player preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub difficulty: Difficulty,
    pub map: MapId,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            difficulty: Difficulty::default(),
            map: MapId::default(),
        }
    }
}

/// Everything about the player that survives between runs.
///
/// Missing fields in stored JSON fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Store currency.
    pub coins: u32,
    pub unlocked: BTreeSet<TowerKind>,
    /// Towers brought into a run, DECK_MIN..=DECK_MAX entries.
    pub deck: Vec<TowerKind>,
    pub games_played: u32,
    pub career: CareerStats,
    pub settings: Settings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: 0,
            unlocked: TowerKind::STARTER.into_iter().collect(),
            deck: TowerKind::STARTER.to_vec(),
            games_played: 0,
            career: CareerStats::default(),
            settings: Settings::default(),
        }
    }
}

/// One line of the tower store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreEntry {
    pub kind: TowerKind,
    pub name: &'static str,
    pub price: u32,
    pub unlocked: bool,
    pub in_deck: bool,
}

impl Profile {
    pub fn is_unlocked(&self, kind: TowerKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Unlock a tower for its store price.
    pub fn buy_tower(&mut self, kind: TowerKind) -> Result<u32, ProfileError> {
        if self.is_unlocked(kind) {
            return Err(ProfileError::AlreadyUnlocked(kind));
        }
        let price = kind.stats().price;
        if self.coins < price {
            return Err(ProfileError::InsufficientCoins {
                needed: price,
                available: self.coins,
            });
        }
        self.coins -= price;
        self.unlocked.insert(kind);
        Ok(price)
    }

    pub fn add_to_deck(&mut self, kind: TowerKind) -> Result<(), ProfileError> {
        if !self.is_unlocked(kind) {
            return Err(ProfileError::NotUnlocked(kind));
        }
        if self.deck.contains(&kind) {
            return Err(ProfileError::AlreadyInDeck(kind));
        }
        if self.deck.len() >= DECK_MAX {
            return Err(ProfileError::DeckFull);
        }
        self.deck.push(kind);
        Ok(())
    }

    pub fn remove_from_deck(&mut self, kind: TowerKind) -> Result<(), ProfileError> {
        if self.deck.len() <= DECK_MIN {
            return Err(ProfileError::DeckTooSmall);
        }
        let index = self
            .deck
            .iter()
            .position(|k| *k == kind)
            .ok_or(ProfileError::NotInDeck(kind))?;
        self.deck.remove(index);
        Ok(())
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Fold a finished run into the profile. Returns the coins awarded.
    ///
    /// `career` is the engine's cumulative record and replaces the stored one.
    pub fn record_run(&mut self, summary: &RunSummary, career: &CareerStats) -> u32 {
        let coins = coins_for_run(summary);
        self.games_played += 1;
        self.career = career.clone();
        self.add_coins(coins);
        coins
    }

    /// Bring a deck read from storage back within the deck rules.
    ///
    /// Locked and repeated towers are dropped and the deck is capped at
    /// `DECK_MAX`. If fewer than `DECK_MIN` remain, the starter deck is
    /// restored. Returns true if anything changed.
    pub fn repair_deck(&mut self) -> bool {
        let mut seen = BTreeSet::new();
        let mut deck: Vec<TowerKind> = self
            .deck
            .iter()
            .copied()
            .filter(|kind| self.unlocked.contains(kind) && seen.insert(*kind))
            .take(DECK_MAX)
            .collect();
        if deck.len() < DECK_MIN {
            self.unlocked.extend(TowerKind::STARTER);
            deck = TowerKind::STARTER.to_vec();
        }
        let changed = deck != self.deck;
        self.deck = deck;
        changed
    }

    /// Tower kinds a new run may build.
    pub fn loadout(&self) -> Vec<TowerKind> {
        self.deck.clone()
    }

    /// The full store, in catalog order.
    pub fn store(&self) -> Vec<StoreEntry> {
        TowerKind::ALL
            .into_iter()
            .map(|kind| {
                let stats = kind.stats();
                StoreEntry {
                    kind,
                    name: stats.name,
                    price: stats.price,
                    unlocked: self.is_unlocked(kind),
                    in_deck: self.deck.contains(&kind),
                }
            })
            .collect()
    }
}

/// Coins for a run: one per kill plus a bonus per wave cleared.
///
/// `summary.wave` is the wave being fought when the run ended, so the
/// waves cleared are the ones before it.
pub fn coins_for_run(summary: &RunSummary) -> u32 {
    let waves_cleared = summary.wave.saturating_sub(1);
    summary
        .kills
        .saturating_add(waves_cleared.saturating_mul(COINS_PER_WAVE_CLEARED))
}
