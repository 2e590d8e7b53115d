use std::collections::BTreeMap;
use std::sync::Arc;

use waymark_blocks::{AIR, BlockId, BlockRegistry};
use waymark_geom::{BlockPos, Direction};
use waymark_pattern::{Mode, Pattern, Resolver};
use waymark_placement::{Placement, StampIssue, StampParams, stamp, tally};
use waymark_world::{VoxelWorld, WorldMutation};

const BLOCKS: &str = r#"
[[blocks]]
name = "soil-medium-normal"

[[blocks]]
name = "rock"

[[blocks]]
name = "woodenfence-oak"
"#;

fn world() -> VoxelWorld {
    VoxelWorld::new(Arc::new(BlockRegistry::from_toml_str(BLOCKS).unwrap()))
}

fn id(w: &VoxelWorld, name: &str) -> BlockId {
    w.registry().id_by_name(name).unwrap()
}

fn road(mode: Mode) -> Pattern {
    Pattern {
        name: "strip".into(),
        description: String::new(),
        width: 3,
        height: 2,
        mode,
        slices: vec!["DDD,_P_".into()],
        symbols: BTreeMap::from([('D', "game:soil-medium-normal".to_string())]),
        transition_up: None,
        transition_down: None,
    }
}

fn params(pattern: &Pattern, facing: Direction) -> StampParams<'_> {
    StampParams {
        pattern,
        slice_index: 0,
        origin: BlockPos::new(10, 64, 10),
        facing,
        carve_allowed: true,
    }
}

fn apply(w: &mut VoxelWorld, writes: &[Placement]) {
    for p in writes {
        w.set_block(p.block, p.pos);
    }
}

#[test]
fn adaptive_strip_lands_one_below_anchor() {
    let w = world();
    let d = id(&w, "soil-medium-normal");
    let p = road(Mode::Adaptive);
    let out = stamp(&params(&p, Direction::North), &Resolver::default(), &w);
    let got: Vec<(BlockPos, BlockId)> = out.writes.iter().map(|p| (p.pos, p.block)).collect();
    assert_eq!(
        got,
        vec![
            (BlockPos::new(9, 63, 10), d),
            (BlockPos::new(10, 63, 10), d),
            (BlockPos::new(11, 63, 10), d),
        ]
    );
    assert!(out.issues.is_empty());
    assert!(out.writes.iter().all(|p| !p.auto_connect));
}

#[test]
fn east_facing_spreads_along_z() {
    let w = world();
    let p = road(Mode::Adaptive);
    let out = stamp(&params(&p, Direction::East), &Resolver::default(), &w);
    let cells: Vec<BlockPos> = out.writes.iter().map(|p| p.pos).collect();
    assert_eq!(
        cells,
        vec![
            BlockPos::new(10, 63, 9),
            BlockPos::new(10, 63, 10),
            BlockPos::new(10, 63, 11),
        ]
    );
}

#[test]
fn carve_clears_empty_cells_but_not_the_player_cell() {
    let mut w = world();
    let rock = id(&w, "rock");
    w.fill_box(BlockPos::new(9, 64, 10), BlockPos::new(11, 64, 10), rock);
    let p = road(Mode::Carve);
    let out = stamp(&params(&p, Direction::North), &Resolver::default(), &w);
    let air: Vec<BlockPos> = out
        .writes
        .iter()
        .filter(|p| p.block == AIR)
        .map(|p| p.pos)
        .collect();
    assert_eq!(air, vec![BlockPos::new(9, 64, 10), BlockPos::new(11, 64, 10)]);
    assert_eq!(out.writes.len(), 5);
    assert_eq!(tally(&out.writes).values().sum::<u32>(), 3);
}

#[test]
fn carve_is_off_when_not_allowed() {
    let mut w = world();
    let rock = id(&w, "rock");
    w.fill_box(BlockPos::new(9, 64, 10), BlockPos::new(11, 64, 10), rock);
    let p = road(Mode::Carve);
    let mut prm = params(&p, Direction::North);
    prm.carve_allowed = false;
    let out = stamp(&prm, &Resolver::default(), &w);
    assert!(out.writes.iter().all(|p| p.block != AIR));
}

#[test]
fn second_stamp_writes_nothing() {
    for mode in [Mode::Adaptive, Mode::Carve] {
        let p = road(mode);
        for facing in Direction::ALL {
            let mut w = world();
            let rock = id(&w, "rock");
            w.fill_box(BlockPos::new(8, 62, 8), BlockPos::new(12, 66, 12), rock);
            let prm = params(&p, facing);
            let first = stamp(&prm, &Resolver::default(), &w);
            assert!(!first.writes.is_empty());
            apply(&mut w, &first.writes);
            let second = stamp(&prm, &Resolver::default(), &w);
            assert!(second.writes.is_empty(), "{:?} {:?}", mode, facing);
        }
    }
}

#[test]
fn unresolved_cells_are_skipped_with_a_diagnostic() {
    let w = world();
    let mut p = road(Mode::Adaptive);
    p.slices = vec!["DXD,_P_".into()];
    p.symbols.insert('X', "game:marble".into());
    let out = stamp(&params(&p, Direction::North), &Resolver::default(), &w);
    assert_eq!(out.writes.len(), 2);
    assert_eq!(
        out.issues,
        vec![StampIssue::Unresolved {
            pos: BlockPos::new(10, 63, 10),
            reference: "game:marble".into()
        }]
    );
}

#[test]
fn auto_cells_are_flagged() {
    let w = world();
    let mut p = road(Mode::Adaptive);
    p.slices = vec!["DFD,_P_".into()];
    p.symbols.insert('F', "woodenfence-oak|auto".into());
    let out = stamp(&params(&p, Direction::North), &Resolver::default(), &w);
    let flagged: Vec<_> = out.writes.iter().filter(|p| p.auto_connect).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].block, id(&w, "woodenfence-oak"));
}

#[test]
fn slice_index_wraps_by_pattern_depth() {
    let w = world();
    let mut p = road(Mode::Adaptive);
    p.slices = vec!["DDD,_P_".into(), "D__,_P_".into()];
    let mut prm = params(&p, Direction::North);
    prm.slice_index = 3;
    assert_eq!(stamp(&prm, &Resolver::default(), &w).writes.len(), 1);
}

#[test]
fn broken_slice_yields_no_writes() {
    let w = world();
    let mut p = road(Mode::Adaptive);
    p.slices = vec!["DDD,_P".into()];
    let out = stamp(&params(&p, Direction::North), &Resolver::default(), &w);
    assert!(out.writes.is_empty());
    assert!(matches!(out.issues.as_slice(), [StampIssue::Slice { index: 0, .. }]));
}
