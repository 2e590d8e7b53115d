//! Lookahead preview for a renderer.

use waymark_blocks::{AIR, BlockId};
use waymark_geom::{BlockPos, Direction};
use waymark_world::WorldQuery;

use crate::stamper::Placement;

/// How a preview cell relates to what is already in the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Target is currently air.
    Air,
    /// Target holds a different block.
    Replace,
    /// Target already holds this block.
    Same,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreviewCell {
    pub pos: BlockPos,
    pub block: BlockId,
    pub tint: Tint,
}

/// Inputs a preview depends on; unchanged key means no recompute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreviewKey {
    pub anchor: BlockPos,
    pub facing: Direction,
    pub slot: u32,
    pub slice: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Preview {
    key: Option<PreviewKey>,
    cells: Vec<PreviewCell>,
}

impl Preview {
    pub fn tint_for<W>(world: &W, pos: BlockPos, block: BlockId) -> Tint
    where
        W: WorldQuery + ?Sized,
    {
        let existing = world.block_at(pos);
        if existing == block {
            Tint::Same
        } else if existing == AIR {
            Tint::Air
        } else {
            Tint::Replace
        }
    }

    /// Recomputes the cells when `key` differs from the last one.
    /// Returns whether anything was recomputed.
    pub fn refresh<W, F>(&mut self, key: PreviewKey, world: &W, cells: F) -> bool
    where
        W: WorldQuery + ?Sized,
        F: FnOnce() -> Vec<Placement>,
    {
        if self.key == Some(key) {
            return false;
        }
        self.cells = cells()
            .into_iter()
            .map(|p| PreviewCell {
                pos: p.pos,
                block: p.block,
                tint: Self::tint_for(world, p.pos, p.block),
            })
            .collect();
        self.key = Some(key);
        true
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.cells.clear();
    }

    pub fn cells(&self) -> &[PreviewCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
