//! Block reference -> concrete block id, given the player's facing.

use serde::{Deserialize, Serialize};
use waymark_blocks::{BlockId, BlockLookup};
use waymark_geom::Direction;

use crate::reference::{AxisHint, BlockReference, RelativeDirection};

/// Which relative-direction table turns `l`/`r` into cardinals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Table the mod shipped with: facing North, `l` is East.
    #[default]
    Classic,
    /// Left/right as seen by a player looking along the facing.
    Geometric,
}

impl Handedness {
    pub fn absolute(self, facing: Direction, rel: Option<RelativeDirection>) -> Direction {
        use Direction::*;
        let rel = match rel {
            None | Some(RelativeDirection::Up) | Some(RelativeDirection::Down) => return facing,
            Some(RelativeDirection::Front) => return facing,
            Some(RelativeDirection::Back) => return facing.opposite(),
            Some(r) => r,
        };
        let left = rel == RelativeDirection::Left;
        match (self, facing) {
            (Handedness::Classic, North) => if left { East } else { West },
            (Handedness::Classic, East) => if left { North } else { South },
            (Handedness::Classic, South) => if left { West } else { East },
            (Handedness::Classic, West) => if left { South } else { North },
            (Handedness::Geometric, North) => if left { West } else { East },
            (Handedness::Geometric, East) => if left { North } else { South },
            (Handedness::Geometric, South) => if left { East } else { West },
            (Handedness::Geometric, West) => if left { South } else { North },
        }
    }
}

/// Outcome of resolving one cell's reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub block: BlockId,
    pub auto_connect: bool,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Resolver {
    pub handedness: Handedness,
}

impl Resolver {
    pub fn new(handedness: Handedness) -> Self {
        Self { handedness }
    }

    pub fn resolve<L>(&self, reference: &str, facing: Direction, lookup: &L) -> Option<BlockId>
    where
        L: BlockLookup + ?Sized,
    {
        self.resolve_reference(&BlockReference::parse(reference), facing, lookup)
            .map(|r| r.block)
    }

    pub fn resolve_reference<L>(
        &self,
        reference: &BlockReference,
        facing: Direction,
        lookup: &L,
    ) -> Option<Resolution>
    where
        L: BlockLookup + ?Sized,
    {
        let base = reference.base.as_str();
        let block = if !reference.is_directional() {
            lookup.lookup(base)
        } else {
            let dir = self.handedness.absolute(facing, reference.direction);
            candidates(reference, dir)
                .iter()
                .find_map(|code| lookup.lookup(code))
                .or_else(|| lookup.first_match(&format!("{}*", base)))
        };
        block.map(|block| Resolution {
            block,
            auto_connect: reference.auto_connect,
        })
    }
}

/// Variant codes to try, most specific first. An explicit `horizontal`
/// hint outranks `up`/`down`.
pub fn candidates(reference: &BlockReference, dir: Direction) -> Vec<String> {
    let b = reference.base.as_str();
    if reference.axis == Some(AxisHint::Horizontal) {
        let (abbr, full) = match dir.axis() {
            waymark_geom::Axis::NorthSouth => ("ns", "northsouth"),
            waymark_geom::Axis::EastWest => ("ew", "eastwest"),
        };
        return vec![
            format!("{b}-{abbr}"),
            format!("{b}-{abbr}-*"),
            format!("{b}-{full}"),
            format!("{b}-{full}-*"),
        ];
    }
    if reference.is_vertical() {
        return ["ud", "up", "down"]
            .iter()
            .flat_map(|s| [format!("{b}-{s}"), format!("{b}-{s}-*")])
            .collect();
    }
    let (full, abbr) = (dir.name(), dir.abbr());
    vec![
        format!("{b}-up-{full}-*"),
        format!("{b}-up-{abbr}-*"),
        format!("{b}-down-{full}-*"),
        format!("{b}-down-{abbr}-*"),
        format!("{b}-*-{full}-*"),
        format!("{b}-*-{abbr}-*"),
        format!("{b}-{abbr}"),
        format!("{b}-{abbr}-*"),
        format!("{b}-{full}"),
        format!("{b}-{full}-*"),
        format!("{b}*"),
    ]
}
