//! Map routes: the fixed waypoint polyline enemies follow.
//!
//! Enemies interpolate strictly between consecutive waypoints. There is no
//! pathfinding and no obstacle handling; the route is the only traversable
//! set of cells and towers may never be placed on it.

use crate::enums::MapId;
use crate::types::{GridPos, Position};

const fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

const FOREST: [GridPos; 28] = [
    p(0, 4), p(1, 4), p(2, 4), p(2, 3), p(2, 2),
    p(3, 2), p(4, 2), p(5, 2), p(5, 3), p(5, 4),
    p(5, 5), p(5, 6), p(6, 6), p(7, 6), p(8, 6),
    p(8, 5), p(8, 4), p(8, 3), p(8, 2), p(9, 2),
    p(10, 2), p(10, 3), p(10, 4), p(10, 5), p(10, 6),
    p(11, 6), p(12, 6), p(13, 6),
];

const DESERT: [GridPos; 22] = [
    p(0, 7), p(1, 7), p(2, 7), p(3, 7), p(3, 6),
    p(3, 5), p(3, 4), p(4, 4), p(5, 4), p(6, 4),
    p(7, 4), p(8, 4), p(8, 3), p(8, 2), p(9, 2),
    p(10, 2), p(11, 2), p(11, 3), p(11, 4), p(11, 5),
    p(12, 5), p(13, 5),
];

const VOLCANO: [GridPos; 23] = [
    p(0, 1), p(1, 1), p(2, 1), p(2, 2), p(2, 3),
    p(2, 4), p(3, 4), p(4, 4), p(5, 4), p(5, 5),
    p(5, 6), p(5, 7), p(6, 7), p(7, 7), p(8, 7),
    p(9, 7), p(10, 7), p(10, 6), p(10, 5), p(10, 4),
    p(11, 4), p(12, 4), p(13, 4),
];

/// An immutable waypoint route.
#[derive(Debug, Clone, Copy)]
pub struct Path {
    waypoints: &'static [GridPos],
}

impl Path {
    /// Route for the given map.
    pub fn for_map(map: MapId) -> Self {
        let waypoints: &'static [GridPos] = match map {
            MapId::Forest => &FOREST,
            MapId::Desert => &DESERT,
            MapId::Volcano => &VOLCANO,
        };
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &'static [GridPos] {
        self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the final waypoint. Reaching it is a leak.
    pub fn last_index(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Exact membership test against the waypoint list.
    pub fn is_path_cell(&self, x: i32, y: i32) -> bool {
        self.waypoints.iter().any(|w| w.x == x && w.y == y)
    }

    /// Spawn point (first waypoint).
    pub fn start(&self) -> Position {
        self.waypoints.first().map(GridPos::center).unwrap_or_default()
    }

    /// Position at `index` plus fractional `progress` toward the next waypoint.
    ///
    /// Indices at or past the last waypoint clamp to it.
    pub fn position_at(&self, index: usize, progress: f64) -> Position {
        let last = self.last_index();
        if index >= last {
            return self.waypoints.get(last).map(GridPos::center).unwrap_or_default();
        }
        let curr = self.waypoints[index];
        let next = self.waypoints[index + 1];
        Position::new(
            curr.x as f64 + (next.x - curr.x) as f64 * progress,
            curr.y as f64 + (next.y - curr.y) as f64 * progress,
        )
    }
}

/// Leak-priority measure: how far along the route an enemy has travelled.
pub fn path_progress(index: usize, progress: f64) -> f64 {
    index as f64 + progress
}
