use proptest::prelude::*;
use waymark_blocks::BlockRegistry;
use waymark_blocks::config::{BlockDef, BlocksConfig};
use waymark_pattern::{Cell, Mode, Pattern, PatternError, ValidationError};

fn registry() -> BlockRegistry {
    BlockRegistry::from_config(BlocksConfig {
        blocks: [
            "soil-medium-normal",
            "gravel-granite",
            "stairs-granite-up-north-free",
            "stairs-granite-up-south-free",
        ]
        .into_iter()
        .map(BlockDef::named)
        .collect(),
    })
    .unwrap()
}

fn pattern(width: usize, height: usize, slices: &[&str], symbols: &[(char, &str)]) -> Pattern {
    Pattern {
        name: "test".into(),
        description: String::new(),
        width,
        height,
        mode: Mode::Adaptive,
        slices: slices.iter().map(|s| s.to_string()).collect(),
        symbols: symbols.iter().map(|&(c, r)| (c, r.to_string())).collect(),
        transition_up: None,
        transition_down: None,
    }
}

#[test]
fn rows_are_bottom_up_and_cells_map_to_references() {
    let p = pattern(3, 2, &["DDD,_P_"], &[('D', "game:soil-medium-normal")]);
    let grid = p.select_slice(0).unwrap();
    assert_eq!(p.find_player_anchor(0), Ok((1, 1)));
    assert_eq!(p.block_at(&grid, 0, 0), Ok(Cell::Block("game:soil-medium-normal")));
    assert_eq!(p.block_at(&grid, 0, 1), Ok(Cell::Empty));
    assert_eq!(p.block_at(&grid, 1, 1), Ok(Cell::Player));
    assert!(p.block_at(&grid, 1, 1).unwrap().is_air());
    assert_eq!(p.block_at(&grid, 3, 0), Err(PatternError::OutOfBounds { x: 3, y: 0 }));
}

#[test]
fn slice_access_reports_shape_errors() {
    let p = pattern(3, 2, &["DDD,_P_", "DDD", "DD,_P_"], &[('D', "soil-medium-normal")]);
    assert_eq!(
        p.select_slice(3).unwrap_err(),
        PatternError::IndexOutOfRange { index: 3, depth: 3 }
    );
    assert_eq!(
        p.select_slice(1).unwrap_err(),
        PatternError::RowCountMismatch { expected: 2, found: 1 }
    );
    assert_eq!(
        p.select_slice(2).unwrap_err(),
        PatternError::RowWidthMismatch { row: 0, expected: 3, found: 2 }
    );
}

#[test]
fn unknown_symbol_surfaces_on_access() {
    let p = pattern(2, 1, &["XP"], &[]);
    let grid = p.select_slice(0).unwrap();
    assert_eq!(p.block_at(&grid, 0, 0), Err(PatternError::UnknownSymbol { symbol: 'X' }));
}

#[test]
fn valid_pattern_has_no_errors() {
    let reg = registry();
    let p = pattern(
        3,
        2,
        &["DGD,_P_", "SSS,_P_"],
        &[
            ('D', "soil-medium-normal"),
            ('G', "game:gravel-*"),
            ('S', "game:stairs-granite|f|auto"),
        ],
    );
    assert!(p.validate(&reg).is_empty());
}

#[test]
fn validation_collects_every_defect() {
    let reg = registry();
    let p = pattern(
        2,
        2,
        &["DD,__", "DX,PP", "D"],
        &[('D', "game:soil-medium-normal"), ('Q', "game:nope")],
    );
    let errors = p.validate(&reg);
    assert!(errors.contains(&ValidationError::MissingPlayerMarker { slice: 0 }));
    assert!(errors.contains(&ValidationError::MultiplePlayerMarkers { slice: 1, count: 2 }));
    assert!(errors.contains(&ValidationError::UnknownSymbol { slice: 1, symbol: 'X' }));
    assert!(errors.iter().any(|e| matches!(e, ValidationError::Slice { slice: 2, .. })));
    // Unused symbols are not looked up.
    assert!(!errors.iter().any(|e| matches!(e, ValidationError::UnresolvableBlock { .. })));
}

#[test]
fn unresolvable_blocks_and_bad_transitions_are_reported() {
    let reg = registry();
    let mut p = pattern(1, 2, &["M,P"], &[('M', "game:marble")]);
    p.transition_up = Some(Box::new(pattern(1, 2, &["G,_"], &[('G', "gravel-granite")])));
    let errors = p.validate(&reg);
    assert_eq!(
        errors,
        vec![
            ValidationError::UnresolvableBlock {
                symbol: 'M',
                reference: "game:marble".into()
            },
            ValidationError::Nested {
                layer: "transition_up",
                error: Box::new(ValidationError::MissingPlayerMarker { slice: 0 }),
            },
        ]
    );
    assert!(errors[1].to_string().starts_with("transition_up: slice 0"));
}

#[test]
fn directional_reference_needs_some_variant() {
    let reg = registry();
    let ok = pattern(1, 2, &["S,P"], &[('S', "stairs-granite|b")]);
    assert!(ok.validate(&reg).is_empty());
    let bad = pattern(1, 2, &["S,P"], &[('S', "stairs-marble|b")]);
    assert_eq!(bad.validate(&reg).len(), 1);
}

#[test]
fn zero_sized_and_empty_patterns_fail() {
    let reg = registry();
    let p = pattern(0, 0, &[], &[]);
    let errors = p.validate(&reg);
    assert!(errors.contains(&ValidationError::EmptyDimensions { width: 0, height: 0 }));
    assert!(errors.contains(&ValidationError::NoSlices));
}

fn slice_strategy() -> impl Strategy<Value = (usize, usize, Vec<String>)> {
    (1usize..6, 1usize..5, 1usize..4).prop_flat_map(|(w, h, depth)| {
        let slice = (0..w * h, prop::collection::vec(prop::sample::select(vec!['_', 'G']), w * h))
            .prop_map(move |(p, mut cells)| {
                cells[p] = 'P';
                cells
                    .chunks(w)
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join(",")
            });
        (Just(w), Just(h), prop::collection::vec(slice, depth))
    })
}

proptest! {
    #[test]
    fn anchor_is_the_only_marker((w, h, slices) in slice_strategy()) {
        let p = Pattern {
            slices,
            ..pattern(w, h, &[], &[('G', "game:gravel-granite")])
        };
        prop_assert!(p.validate(&registry()).is_empty());
        for i in 0..p.depth() {
            let grid = p.select_slice(i).unwrap();
            let (ax, ay) = p.find_player_anchor(i).unwrap();
            prop_assert_eq!(grid.get(ax, ay), Some('P'));
            prop_assert_eq!(grid.count('P'), 1);
            prop_assert_eq!(p.find_player_anchor(i).unwrap(), (ax, ay));
        }
    }
}

#[test]
fn symbols_ignore_reserved_player_entry() {
    let reg = registry();
    let mut p = pattern(1, 2, &["G,P"], &[('G', "gravel-granite")]);
    p.symbols.insert('P', "player".into());
    assert!(p.validate(&reg).is_empty());
    p.symbols.insert('_', "game:gravel-granite".into());
    assert_eq!(p.validate(&reg), vec![ValidationError::ReservedSymbol { symbol: '_' }]);
}
