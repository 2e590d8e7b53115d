use std::path::PathBuf;
use std::sync::Arc;

use waymark_blocks::BlockRegistry;
use waymark_geom::Vec3;
use waymark_pattern::{PatternSet, defaults, load_directory};
use waymark_placement::{PatternBuilder, PatternType, TickOutcome, WaymarkConfig};
use waymark_world::VoxelWorld;

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn registry() -> BlockRegistry {
    BlockRegistry::load_from_path(root().join("assets/blocks.toml")).unwrap()
}

#[test]
fn shipped_patterns_all_validate() {
    let reg = registry();
    let report = load_directory(root().join("assets/patterns"), &reg).unwrap();
    assert!(report.rejected.is_empty(), "{:?}", report.rejected);
    assert!(report.skipped.is_empty());
    assert_eq!(report.patterns.len(), 6);
    for (slot, _, builtin) in defaults::builtin_patterns() {
        let shipped = &report.patterns[&slot];
        assert_eq!(shipped.name, builtin.name);
        assert_eq!(shipped.slices, builtin.slices);
        assert_eq!(shipped.symbols, builtin.symbols);
        assert_eq!(shipped.mode, builtin.mode);
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let cfg = WaymarkConfig::load_from_path(root().join("waymark.toml")).unwrap();
    assert_eq!(cfg, WaymarkConfig::default());
}

#[test]
fn stair_road_climbs_with_stairs() {
    let reg = Arc::new(registry());
    let rock = reg.id_by_name("rock-granite").unwrap();
    let stairs_east = reg.id_by_name("stairs-granite-up-east-free").unwrap();
    let report = load_directory(root().join("assets/patterns"), &*reg).unwrap();

    let mut world = VoxelWorld::new(reg.clone());
    let heights = [64, 64, 64, 64, 65, 65, 65];
    for (x, h) in heights.iter().enumerate() {
        for z in -4..=4 {
            world.fill_column(x as i32, z, 50, h - 1, rock);
        }
    }
    let mut b = PatternBuilder::new(WaymarkConfig::default(), PatternSet::from_patterns(report.patterns));
    b.switch_to_slot(6).unwrap();
    b.set_building_enabled(true, Some(Vec3::new(0.5, 64.0, 0.5)));

    let mut climbs = Vec::new();
    for x in 1..3 {
        let player = Vec3::new(x as f32 + 0.5, heights[x] as f32, 0.5);
        if let TickOutcome::Placed(r) = b.tick(Some(player), &mut world) {
            if r.pattern_type == PatternType::TransitionUp {
                climbs.push(r);
            }
        }
    }
    assert_eq!(climbs.len(), 1);
    let r = &climbs[0];
    assert_eq!(r.origin.y, 65);
    assert!(r.writes.iter().any(|w| w.block == stairs_east));
}
