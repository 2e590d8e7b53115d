//! Terrain-following pattern placement driven by player movement.
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod gate;
pub mod planner;
pub mod preview;
pub mod session;
pub mod stamper;

pub use builder::{PatternBuilder, PatternInfo, PlacementReport, TickOutcome};
pub use config::{ConfigError, PlacementConfig, ResolverConfig, WaymarkConfig};
pub use gate::{AlwaysApprove, BlockBudget, PlacementGate};
pub use planner::{PatternType, Plan, plan, select_pattern};
pub use preview::{Preview, PreviewCell, PreviewKey, Tint};
pub use session::{Session, SliceStep};
pub use stamper::{Placement, Stamp, StampIssue, StampParams, cell_position, resolve_cells, stamp, tally};
