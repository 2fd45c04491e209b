//! Tower upgrade and sale economics.

use defgrid_core::catalog::TowerKind;
use defgrid_core::components::Weapon;
use defgrid_core::constants::*;

/// Gold to raise a tower from `current_level` to the next.
/// Returns None if already at max level.
pub fn upgrade_cost(kind: TowerKind, current_level: u32) -> Option<u32> {
    if current_level >= MAX_TOWER_LEVEL {
        return None;
    }
    let base = kind.stats().cost as f64;
    Some((base * UPGRADE_COST_FACTOR * current_level as f64).floor() as u32)
}

/// Gold returned when selling a tower at `level`.
pub fn sell_refund(kind: TowerKind, level: u32) -> u32 {
    let base = kind.stats().cost as f64;
    (base * SELL_REFUND_FACTOR * level as f64).floor() as u32
}

/// Apply one level of upgrade growth to a weapon.
pub fn apply_upgrade(weapon: &mut Weapon) {
    weapon.damage = (weapon.damage as f64 * UPGRADE_DAMAGE_FACTOR).floor() as u32;
    weapon.range += UPGRADE_RANGE_BONUS;
    let reduced = (weapon.max_cooldown as f64 * UPGRADE_COOLDOWN_FACTOR).floor() as u32;
    weapon.max_cooldown = reduced.max(MIN_UPGRADED_COOLDOWN);
    weapon.cooldown = weapon.cooldown.min(weapon.max_cooldown);
}
