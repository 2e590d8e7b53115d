//! Terrain following: pick the elevation and pattern variant for the next stamp.

use std::fmt;

use waymark_geom::{BlockPos, Direction};
use waymark_pattern::Pattern;
use waymark_world::{ScanConfig, WorldQuery, detect_ground_level};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternType {
    Normal,
    TransitionUp,
    TransitionDown,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternType::Normal => "normal",
            PatternType::TransitionUp => "transition-up",
            PatternType::TransitionDown => "transition-down",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub position: BlockPos,
    pub pattern_type: PatternType,
}

/// Probes the ground `lookahead` cells past `base` and classifies the step.
///
/// A rise lifts the stamp one cell; a drop keeps the current height and
/// leaves the step to the transition pattern.
pub fn plan<W>(base: BlockPos, dir: Direction, lookahead: i32, world: &W, scan: ScanConfig) -> Plan
where
    W: WorldQuery + ?Sized,
{
    let probe = base.offset(dir, lookahead);
    let Some(ground) = detect_ground_level(probe, world, scan) else {
        return Plan {
            position: base,
            pattern_type: PatternType::Normal,
        };
    };
    let delta = ground - base.y;
    let plan = if delta > 0 {
        Plan {
            position: base.with_y(base.y + 1),
            pattern_type: PatternType::TransitionUp,
        }
    } else if delta <= -1 {
        Plan {
            position: base,
            pattern_type: PatternType::TransitionDown,
        }
    } else {
        Plan {
            position: base,
            pattern_type: PatternType::Normal,
        }
    };
    log::trace!(
        target: "terrain",
        "probe {} ground {} delta {} -> {}",
        probe,
        ground,
        delta,
        plan.pattern_type
    );
    plan
}

/// Variant to stamp for a pattern type; missing transitions fall back to the base.
pub fn select_pattern(pattern: &Pattern, ty: PatternType) -> &Pattern {
    match ty {
        PatternType::Normal => pattern,
        PatternType::TransitionUp => pattern.transition_up().unwrap_or(pattern),
        PatternType::TransitionDown => pattern.transition_down().unwrap_or(pattern),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use waymark_blocks::BlockRegistry;
    use waymark_pattern::defaults;
    use waymark_world::VoxelWorld;

    fn stepped(step_top: i32) -> VoxelWorld {
        let reg = Arc::new(BlockRegistry::from_toml_str("[[blocks]]\nname = \"rock\"\n").unwrap());
        let rock = reg.id_by_name("rock").unwrap();
        let mut w = VoxelWorld::new(reg);
        for x in 0..16 {
            let top = if x >= 7 { step_top } else { 63 };
            w.fill_column(x, 0, 40, top, rock);
        }
        w
    }

    #[test]
    fn classifies_steps() {
        let base = BlockPos::new(6, 64, 0);
        let scan = ScanConfig::default();
        let up = plan(base, Direction::East, 1, &stepped(64), scan);
        assert_eq!(up.pattern_type, PatternType::TransitionUp);
        assert_eq!(up.position, BlockPos::new(6, 65, 0));

        let down = plan(base, Direction::East, 1, &stepped(62), scan);
        assert_eq!(down.pattern_type, PatternType::TransitionDown);
        assert_eq!(down.position, base);

        let flat = plan(base, Direction::East, 1, &stepped(63), scan);
        assert_eq!(flat, Plan { position: base, pattern_type: PatternType::Normal });
    }

    #[test]
    fn tall_rise_still_lifts_one_cell() {
        let up = plan(BlockPos::new(6, 64, 0), Direction::East, 1, &stepped(70), ScanConfig::default());
        assert_eq!(up.position.y, 65);
    }

    #[test]
    fn no_ground_holds_elevation() {
        let base = BlockPos::new(6, 64, 5);
        let p = plan(base, Direction::East, 1, &stepped(63), ScanConfig::default());
        assert_eq!(p, Plan { position: base, pattern_type: PatternType::Normal });
    }

    #[test]
    fn missing_transitions_fall_back_to_base() {
        let mut road = defaults::default_road();
        assert_eq!(select_pattern(&road, PatternType::TransitionUp).name, "Default Road");
        road.transition_down = Some(Box::new(defaults::narrow_path()));
        assert_eq!(select_pattern(&road, PatternType::TransitionDown).name, "Narrow Path");
        assert_eq!(select_pattern(&road, PatternType::Normal).name, "Default Road");
    }
}
