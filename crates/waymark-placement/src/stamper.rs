//! Pattern slice -> world writes.

use std::collections::BTreeMap;
use std::fmt;

use waymark_blocks::{AIR, BlockId};
use waymark_geom::{Axis, BlockPos, Direction};
use waymark_pattern::{BlockReference, Cell, Mode, Pattern, PatternError, Resolver};
use waymark_world::WorldQuery;

/// One resolved cell write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub pos: BlockPos,
    pub block: BlockId,
    /// Run the neighbor-update pass on this cell once the batch is written.
    pub auto_connect: bool,
}

/// Per-cell problem; the rest of the stamp still goes ahead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StampIssue {
    Slice { index: usize, error: PatternError },
    Cell { pos: BlockPos, error: PatternError },
    Unresolved { pos: BlockPos, reference: String },
}

impl fmt::Display for StampIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampIssue::Slice { index, error } => write!(f, "slice {}: {}", index, error),
            StampIssue::Cell { pos, error } => write!(f, "cell {}: {}", pos, error),
            StampIssue::Unresolved { pos, reference } => {
                write!(f, "cell {}: cannot resolve '{}'", pos, reference)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stamp {
    pub writes: Vec<Placement>,
    pub issues: Vec<StampIssue>,
}

/// Everything needed to lay one slice into the world.
#[derive(Copy, Clone, Debug)]
pub struct StampParams<'a> {
    pub pattern: &'a Pattern,
    /// Wrapped by the pattern's own depth, so transitions can be shallower.
    pub slice_index: usize,
    /// World cell the slice's `P` lands on.
    pub origin: BlockPos,
    pub facing: Direction,
    pub carve_allowed: bool,
}

/// World cell for grid cell `(x, y)` given anchor `(ax, ay)`. Width runs
/// across the travel axis.
#[inline]
pub fn cell_position(origin: BlockPos, facing: Direction, anchor: (usize, usize), x: usize, y: usize) -> BlockPos {
    let dh = x as i32 - anchor.0 as i32;
    let dy = y as i32 - anchor.1 as i32;
    match facing.axis() {
        Axis::NorthSouth => BlockPos::new(origin.x + dh, origin.y + dy, origin.z),
        Axis::EastWest => BlockPos::new(origin.x, origin.y + dy, origin.z + dh),
    }
}

/// Resolves every cell the slice would write, without consulting the world.
/// Air cells are included only for carve patterns when carving is allowed.
pub fn resolve_cells<L>(params: &StampParams<'_>, resolver: &Resolver, lookup: &L) -> Stamp
where
    L: waymark_blocks::BlockLookup + ?Sized,
{
    let mut out = Stamp::default();
    let pattern = params.pattern;
    let depth = pattern.depth();
    if depth == 0 {
        out.issues.push(StampIssue::Slice {
            index: params.slice_index,
            error: PatternError::IndexOutOfRange { index: params.slice_index, depth },
        });
        return out;
    }
    let index = params.slice_index % depth;
    let grid = match pattern.select_slice(index) {
        Ok(g) => g,
        Err(error) => {
            out.issues.push(StampIssue::Slice { index, error });
            return out;
        }
    };
    let Some(anchor) = grid.anchor() else {
        out.issues.push(StampIssue::Slice {
            index,
            error: PatternError::NoPlayerMarker { slice: index },
        });
        return out;
    };
    let carve = pattern.mode == Mode::Carve && params.carve_allowed;

    for (x, y, _) in grid.cells() {
        let pos = cell_position(params.origin, params.facing, anchor, x, y);
        match pattern.block_at(&grid, x, y) {
            Ok(Cell::Player) => {}
            Ok(Cell::Empty) => {
                if carve {
                    out.writes.push(Placement {
                        pos,
                        block: AIR,
                        auto_connect: false,
                    });
                }
            }
            Ok(Cell::Block(reference)) => {
                let parsed = BlockReference::parse(reference);
                match resolver.resolve_reference(&parsed, params.facing, lookup) {
                    Some(r) => out.writes.push(Placement {
                        pos,
                        block: r.block,
                        auto_connect: r.auto_connect,
                    }),
                    None => out.issues.push(StampIssue::Unresolved {
                        pos,
                        reference: reference.to_string(),
                    }),
                }
            }
            Err(error) => out.issues.push(StampIssue::Cell { pos, error }),
        }
    }
    out
}

/// Writes needed to stamp the slice. Cells already holding the resolved
/// block are dropped, so an immediate second stamp yields nothing.
pub fn stamp<W>(params: &StampParams<'_>, resolver: &Resolver, world: &W) -> Stamp
where
    W: WorldQuery + ?Sized,
{
    let mut out = resolve_cells(params, resolver, world);
    out.writes.retain(|p| world.block_at(p.pos) != p.block);
    for issue in &out.issues {
        log::warn!(target: "placement", "{}: {}", params.pattern.name, issue);
    }
    out
}

/// Non-air blocks a batch consumes, by id.
pub fn tally(writes: &[Placement]) -> BTreeMap<BlockId, u32> {
    let mut counts = BTreeMap::new();
    for p in writes.iter().filter(|p| p.block != AIR) {
        *counts.entry(p.block).or_insert(0) += 1;
    }
    counts
}
