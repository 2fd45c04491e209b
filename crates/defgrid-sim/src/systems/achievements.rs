//! Milestone tracking. Unlocks are informational and never affect play.

use hecs::World;

use defgrid_core::components::Tower;
use defgrid_core::constants::*;
use defgrid_core::enums::Achievement;
use defgrid_core::events::Notification;
use defgrid_core::state::CareerStats;
use defgrid_core::types::Position;

use crate::run::RunState;
use crate::world_setup;

/// Re-evaluate every condition-based milestone. Idempotent.
pub fn run(
    world: &mut World,
    run: &RunState,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
) {
    let max_tower = world
        .query::<&Tower>()
        .iter()
        .any(|(_, tower)| tower.level >= MAX_TOWER_LEVEL);

    let reached = [
        (Achievement::FirstBlood, career.total_kills >= 1),
        (Achievement::Wave5, run.wave >= 5),
        (Achievement::Wave10, run.wave >= 10),
        (Achievement::Wave20, run.wave >= 20),
        (
            Achievement::TowerMaster,
            career.towers_built >= TOWER_MASTER_THRESHOLD,
        ),
        (Achievement::MaxTower, max_tower),
        (Achievement::Rich, run.gold >= RICH_GOLD_THRESHOLD),
    ];

    for (achievement, condition) in reached {
        if condition {
            unlock(world, career, notifications, achievement);
        }
    }
}

/// Record an achievement. Returns false if it was already unlocked.
pub fn unlock(
    world: &mut World,
    career: &mut CareerStats,
    notifications: &mut Vec<Notification>,
    achievement: Achievement,
) -> bool {
    if !career.achievements.insert(achievement) {
        return false;
    }
    tracing::info!(achievement = achievement.title(), "achievement unlocked");
    notifications.push(Notification::AchievementUnlocked { achievement });
    let center = Position::new(GRID_WIDTH as f64 / 2.0, GRID_HEIGHT as f64 / 2.0);
    world_setup::spawn_floating_text(world, center, "Achievement!");
    true
}
