//! Run state: the economy and progress of a single play-through.
//!
//! Owned by `SimulationEngine`, NOT stored in the ECS.

use defgrid_core::catalog::DifficultyConfig;
use defgrid_core::constants::SCORE_PER_REWARD;
use defgrid_core::enums::{Difficulty, MapId};
use defgrid_core::error::CommandError;
use defgrid_core::state::{CareerStats, RunSummary, RunView};
use defgrid_core::types::GridPos;

/// Mutable per-run state. Reset by a restart.
#[derive(Debug, Clone)]
pub struct RunState {
    pub gold: u32,
    pub lives: u32,
    /// Wave currently being fought (starts at 1).
    pub wave: u32,
    pub score: u32,
    pub kills: u32,
    pub gold_earned: u32,
    pub selected_tile: Option<GridPos>,
    pub difficulty: Difficulty,
    pub map: MapId,
}

impl RunState {
    pub fn new(difficulty: Difficulty, map: MapId) -> Self {
        let DifficultyConfig {
            starting_gold,
            starting_lives,
            ..
        } = difficulty.config();
        Self {
            gold: starting_gold,
            lives: starting_lives,
            wave: 1,
            score: 0,
            kills: 0,
            gold_earned: 0,
            selected_tile: None,
            difficulty,
            map,
        }
    }

    /// Deduct `cost` gold, or reject without touching the balance.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if self.gold < cost {
            return Err(CommandError::InsufficientGold {
                needed: cost,
                available: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn refund(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Credit a kill to the run and the career.
    pub fn award_kill(&mut self, career: &mut CareerStats, reward: u32) {
        self.gold = self.gold.saturating_add(reward);
        self.score = self
            .score
            .saturating_add(reward.saturating_mul(SCORE_PER_REWARD));
        self.kills += 1;
        self.gold_earned = self.gold_earned.saturating_add(reward);
        career.total_kills += 1;
        career.total_gold_earned = career.total_gold_earned.saturating_add(reward);
    }

    /// Remove one life. Returns true when none are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            wave: self.wave,
            score: self.score,
            kills: self.kills,
            gold_earned: self.gold_earned,
            difficulty: self.difficulty,
            map: self.map,
        }
    }

    pub fn view(&self) -> RunView {
        RunView {
            gold: self.gold,
            lives: self.lives,
            wave: self.wave,
            score: self.score,
            kills: self.kills,
            selected_tile: self.selected_tile,
        }
    }
}
