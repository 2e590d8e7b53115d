//! World access seams, an in-memory voxel world, and ground detection.
#![forbid(unsafe_code)]

pub mod store;
pub mod terrain;

use waymark_blocks::{BlockId, BlockLookup, GroundClass};
use waymark_geom::BlockPos;

pub use store::{VoxelWorld, WorldStats};
pub use terrain::{ScanConfig, detect_ground_level};

/// Read side of the host world.
pub trait WorldQuery: BlockLookup {
    fn block_at(&self, pos: BlockPos) -> BlockId;
    fn ground_class(&self, id: BlockId) -> GroundClass;
}

/// Write side of the host world. Calls are fire-and-forget.
pub trait WorldMutation {
    fn set_block(&mut self, id: BlockId, pos: BlockPos);
    /// Re-run connection logic (fences, walls) around `pos`.
    fn trigger_neighbor_update(&mut self, pos: BlockPos);
}
