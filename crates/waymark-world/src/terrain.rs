//! Downward ground scan used by terrain following.

use serde::Deserialize;
use waymark_geom::BlockPos;

use crate::WorldQuery;

/// Bounds of the vertical scan, in cells relative to the probe position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan starts this many cells above the probe.
    pub scan_start_offset: i32,
    /// Scan ends this many cells below the probe (inclusive).
    pub scan_max_depth: i32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_start_offset: 20,
            scan_max_depth: 50,
        }
    }
}

/// Returns the Y a player would stand at above the first solid cell found
/// scanning down through `pos`'s column, or `None` if the column is empty
/// within the scan range.
///
/// Leaves, plants and fire are stepped over so flora does not register as a
/// terrain step. Replaceable cells (air, tall grass) are treated as empty.
pub fn detect_ground_level<W>(pos: BlockPos, world: &W, scan: ScanConfig) -> Option<i32>
where
    W: WorldQuery + ?Sized,
{
    let start_y = pos.y + scan.scan_start_offset;
    let min_y = pos.y - scan.scan_max_depth;
    for y in (min_y..=start_y).rev() {
        let id = world.block_at(pos.with_y(y));
        let class = world.ground_class(id);
        if class.is_ignorable() {
            continue;
        }
        if class.is_standable() {
            return Some(y + 1);
        }
    }
    log::trace!(target: "terrain", "no ground in column {} within scan range", pos);
    None
}
