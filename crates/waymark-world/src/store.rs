use std::sync::Arc;

use hashbrown::HashMap;
use waymark_blocks::{AIR, BlockId, BlockLookup, BlockRegistry, GroundClass};
use waymark_geom::BlockPos;

use crate::{WorldMutation, WorldQuery};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    pub chunk_entries: usize,
    pub blocks: usize,
    pub writes: u64,
    /// Neighbor updates requested over the world's lifetime.
    pub neighbor_updates: u64,
}

/// Sparse chunk-keyed world. Cells never written read as air.
pub struct VoxelWorld {
    registry: Arc<BlockRegistry>,
    sx: i32,
    sy: i32,
    sz: i32,
    // Map per-chunk: key=(cx,cy,cz) -> map of world cell -> block
    inner: HashMap<(i32, i32, i32), HashMap<BlockPos, BlockId>>,
    neighbor_updates: Vec<BlockPos>,
    neighbor_update_count: u64,
    writes: u64,
}

impl VoxelWorld {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self::with_chunk_size(registry, 32, 32, 32)
    }

    pub fn with_chunk_size(registry: Arc<BlockRegistry>, sx: i32, sy: i32, sz: i32) -> Self {
        Self {
            registry,
            sx,
            sy,
            sz,
            inner: HashMap::new(),
            neighbor_updates: Vec::new(),
            neighbor_update_count: 0,
            writes: 0,
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    #[inline]
    fn chunk_key(&self, pos: BlockPos) -> (i32, i32, i32) {
        (
            pos.x.div_euclid(self.sx),
            pos.y.div_euclid(self.sy),
            pos.z.div_euclid(self.sz),
        )
    }

    pub fn get(&self, pos: BlockPos) -> BlockId {
        let k = self.chunk_key(pos);
        self.inner
            .get(&k)
            .and_then(|m| m.get(&pos).copied())
            .unwrap_or(AIR)
    }

    /// Writes without counting toward stats; used to build test terrain.
    pub fn set(&mut self, pos: BlockPos, id: BlockId) {
        let k = self.chunk_key(pos);
        if id == AIR {
            if let Some(m) = self.inner.get_mut(&k) {
                m.remove(&pos);
                if m.is_empty() {
                    self.inner.remove(&k);
                }
            }
            return;
        }
        self.inner.entry(k).or_default().insert(pos, id);
    }

    /// Fills `bottom..=top` of one column.
    pub fn fill_column(&mut self, x: i32, z: i32, bottom: i32, top: i32, id: BlockId) {
        for y in bottom..=top {
            self.set(BlockPos::new(x, y, z), id);
        }
    }

    /// Fills an inclusive box.
    pub fn fill_box(&mut self, min: BlockPos, max: BlockPos, id: BlockId) {
        for x in min.x..=max.x {
            for z in min.z..=max.z {
                self.fill_column(x, z, min.y, max.y, id);
            }
        }
    }

    /// Positions handed to `trigger_neighbor_update` since the last
    /// `take_neighbor_updates`, oldest first.
    pub fn neighbor_updates(&self) -> &[BlockPos] {
        &self.neighbor_updates
    }

    /// Hands the pending neighbor updates to the caller and clears them.
    pub fn take_neighbor_updates(&mut self) -> Vec<BlockPos> {
        std::mem::take(&mut self.neighbor_updates)
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            chunk_entries: self.inner.len(),
            blocks: self.inner.values().map(|m| m.len()).sum(),
            writes: self.writes,
            neighbor_updates: self.neighbor_update_count,
        }
    }
}

impl BlockLookup for VoxelWorld {
    fn block_id(&self, code: &str) -> Option<BlockId> {
        self.registry.block_id(code)
    }

    fn search_wildcard(&self, pattern: &str) -> Vec<BlockId> {
        self.registry.search_wildcard(pattern)
    }
}

impl WorldQuery for VoxelWorld {
    fn block_at(&self, pos: BlockPos) -> BlockId {
        self.get(pos)
    }

    fn ground_class(&self, id: BlockId) -> GroundClass {
        self.registry.ground_class(id)
    }
}

impl WorldMutation for VoxelWorld {
    fn set_block(&mut self, id: BlockId, pos: BlockPos) {
        self.writes += 1;
        self.set(pos, id);
    }

    fn trigger_neighbor_update(&mut self, pos: BlockPos) {
        self.neighbor_update_count += 1;
        self.neighbor_updates.push(pos);
    }
}
