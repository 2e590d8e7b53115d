//! Patterns: slices, block references, slot registry, and pattern files.
#![forbid(unsafe_code)]

pub mod defaults;
pub mod file;
pub mod loader;
pub mod model;
pub mod reference;
pub mod resolve;
pub mod set;

pub use file::PatternFile;
pub use loader::{LoadError, LoadReport, load_directory, load_pattern_file, write_default_patterns};
pub use model::{Cell, Mode, Pattern, PatternError, SliceGrid, ValidationError};
pub use reference::{AxisHint, BlockReference, RelativeDirection};
pub use resolve::{Handedness, Resolution, Resolver};
pub use set::{MAX_SLOTS, PatternSet, SlotError};
