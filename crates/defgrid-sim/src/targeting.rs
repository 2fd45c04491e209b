//! Target selection shared by autonomous fire and abilities.
//!
//! Priority is "leak priority": the enemy furthest along the route first,
//! ties broken by the lower enemy id so selection is deterministic.

use std::cmp::Ordering;

use hecs::{Entity, World};

use defgrid_core::components::{Enemy, PathProgress};
use defgrid_core::enums::DamageType;
use defgrid_core::types::{EnemyId, Position};

/// A live enemy as seen by a tower this tick.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub id: EnemyId,
    pub position: Position,
    /// Path index + progress.
    pub travelled: f64,
    pub flying: bool,
}

impl Candidate {
    /// Ordering with the highest-priority target first.
    fn priority(&self, other: &Candidate) -> Ordering {
        other
            .travelled
            .total_cmp(&self.travelled)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Snapshot every live enemy, sorted by leak priority.
pub fn collect_candidates(world: &World) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = world
        .query::<(&Enemy, &PathProgress, &Position)>()
        .iter()
        .map(|(entity, (enemy, progress, position))| Candidate {
            entity,
            id: enemy.id,
            position: *position,
            travelled: progress.distance_travelled(),
            flying: enemy.flying,
        })
        .collect();
    candidates.sort_by(|a, b| a.priority(b));
    candidates
}

/// Whether a damage type may target a candidate at all.
pub fn can_target(damage_type: DamageType, flying: bool) -> bool {
    !flying || damage_type.hits_flying()
}

/// Up to `limit` valid targets within `range` of `origin`, best first.
///
/// `candidates` must already be in priority order (see `collect_candidates`).
pub fn select_targets(
    candidates: &[Candidate],
    origin: Position,
    range: f64,
    damage_type: DamageType,
    limit: usize,
) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| can_target(damage_type, c.flying))
        .filter(|c| origin.distance_to(&c.position) <= range)
        .take(limit)
        .copied()
        .collect()
}

/// The single best target, if any.
pub fn lead_target(
    candidates: &[Candidate],
    origin: Position,
    range: f64,
    damage_type: DamageType,
) -> Option<Candidate> {
    select_targets(candidates, origin, range, damage_type, 1)
        .into_iter()
        .next()
}
