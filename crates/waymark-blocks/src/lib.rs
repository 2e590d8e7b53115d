//! Block codes, ground classes, and the block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod material;
pub mod registry;
pub mod types;
pub mod wildcard;

pub use material::GroundClass;
pub use registry::{BlockLookup, BlockRegistry};
pub use types::{AIR, BlockId, BlockType, normalize_code};
