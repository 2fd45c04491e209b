//! Scripted tower placements for headless runs, e.g. `ARCHER@1,3`.

use std::str::FromStr;

use defgrid_core::catalog::TowerKind;
use defgrid_core::commands::PlayerCommand;
use defgrid_core::types::GridPos;

/// A tower to build before the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: TowerKind,
    pub tile: GridPos,
}

impl Placement {
    /// The select-then-build command pair for this placement.
    pub fn commands(&self) -> [PlayerCommand; 2] {
        [
            PlayerCommand::SelectTile {
                x: self.tile.x,
                y: self.tile.y,
            },
            PlayerCommand::Build { kind: self.kind },
        ]
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, coords) = s
            .split_once('@')
            .ok_or_else(|| format!("expected KIND@x,y, got {s:?}"))?;
        let kind = TowerKind::from_id(kind.trim())
            .ok_or_else(|| format!("unknown tower {:?}", kind.trim()))?;
        let (x, y) = coords
            .split_once(',')
            .ok_or_else(|| format!("expected x,y after '@', got {coords:?}"))?;
        let x = x
            .trim()
            .parse()
            .map_err(|e| format!("bad x coordinate {x:?}: {e}"))?;
        let y = y
            .trim()
            .parse()
            .map_err(|e| format!("bad y coordinate {y:?}: {e}"))?;
        Ok(Placement {
            kind,
            tile: GridPos::new(x, y),
        })
    }
}
