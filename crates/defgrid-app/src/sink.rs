//! Notification sink: the host side of the fire-and-forget audio channel.
//!
//! Notifications are logged and mapped to sound cues. Cues are only
//! "played" when the profile has sound enabled.

use tracing::{debug, info, trace, warn};

use defgrid_core::events::Notification;
use defgrid_core::state::GameStateSnapshot;

/// Sound cue for a notification, if it has one.
pub fn cue_for(notification: &Notification) -> Option<&'static str> {
    match notification {
        Notification::ShotFired { .. } => Some("shoot"),
        Notification::HitLanded { .. } => Some("hit"),
        Notification::TowerBuilt { .. } => Some("build"),
        Notification::TowerUpgraded { .. } => Some("upgrade"),
        Notification::EnemyKilled { .. } => Some("kill"),
        Notification::EnemyLeaked { .. } => Some("leak"),
        Notification::WaveStarted { .. } => Some("wave"),
        Notification::AbilityUsed { .. } => Some("ability"),
        Notification::AchievementUnlocked { .. } => Some("achievement"),
        Notification::GameOver { .. } => Some("gameover"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationSink {
    sound_enabled: bool,
    cues_played: u64,
}

impl NotificationSink {
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            sound_enabled,
            cues_played: 0,
        }
    }

    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }

    /// Consume the notifications and rejections of one snapshot.
    pub fn publish(&mut self, snapshot: &GameStateSnapshot) {
        for rejection in &snapshot.rejections {
            warn!(
                tick = rejection.tick,
                command = ?rejection.command,
                reason = %rejection.reason,
                "command rejected"
            );
        }

        for notification in &snapshot.notifications {
            match notification {
                Notification::WaveStarted { wave, enemies } => {
                    info!(wave, enemies, "wave incoming");
                }
                Notification::EnemyLeaked {
                    enemy_id,
                    lives_left,
                } => {
                    info!(%enemy_id, lives_left, "enemy leaked");
                }
                other => debug!(notification = ?other),
            }

            if self.sound_enabled {
                if let Some(cue) = cue_for(notification) {
                    self.cues_played += 1;
                    trace!(cue, "play");
                }
            }
        }
    }
}
