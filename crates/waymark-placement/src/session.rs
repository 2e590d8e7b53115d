//! Per-player movement state between ticks.

use waymark_geom::{BlockPos, Direction};

use crate::planner::PatternType;

/// What a placement does to the active slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliceStep {
    /// First placement: `forward` is set, slice unchanged.
    Anchor,
    Advance,
    Retreat,
    /// Sideways turn: `forward` follows the new heading, slice unchanged.
    Turn,
}

/// Created when building is switched on, dropped when it is switched off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub last_placement: Option<BlockPos>,
    pub last_direction: Option<Direction>,
    pub forward: Option<Direction>,
    pub last_pattern_type: Option<PatternType>,
}

impl Session {
    pub fn starting_at(pos: Option<BlockPos>) -> Self {
        Self {
            last_placement: pos,
            ..Self::default()
        }
    }

    /// Travel heading since the last placement. No horizontal movement
    /// (standing still or a pure drop) reads as North.
    pub fn heading(&self, last: BlockPos, current: BlockPos) -> Direction {
        Direction::of_travel(last, current)
    }

    /// Whether this tick should place.
    ///
    /// Once a descent is under way, further transition-down stamps wait for
    /// the player to actually drop; everything else is distance gated.
    pub fn should_place(
        &self,
        last: BlockPos,
        current: BlockPos,
        peek: PatternType,
        threshold: f64,
    ) -> bool {
        if peek == PatternType::TransitionDown
            && self.last_pattern_type == Some(PatternType::TransitionDown)
        {
            return current.y < last.y;
        }
        last.distance(current) > threshold
    }

    /// Updates `forward` for a placement heading `dir`.
    pub fn step_slice(&mut self, dir: Direction) -> SliceStep {
        match self.forward {
            None => {
                self.forward = Some(dir);
                SliceStep::Anchor
            }
            Some(f) if f == dir => SliceStep::Advance,
            Some(f) if f.opposite() == dir => SliceStep::Retreat,
            Some(_) => {
                self.forward = Some(dir);
                SliceStep::Turn
            }
        }
    }

    pub fn record(&mut self, at: BlockPos, dir: Direction, ty: PatternType) {
        self.last_placement = Some(at);
        self.last_direction = Some(dir);
        self.last_pattern_type = Some(ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slice_steps_follow_forward() {
        let mut s = Session::default();
        assert_eq!(s.step_slice(Direction::East), SliceStep::Anchor);
        assert_eq!(s.step_slice(Direction::East), SliceStep::Advance);
        assert_eq!(s.step_slice(Direction::West), SliceStep::Retreat);
        assert_eq!(s.forward, Some(Direction::East));
        assert_eq!(s.step_slice(Direction::North), SliceStep::Turn);
        assert_eq!(s.forward, Some(Direction::North));
        assert_eq!(s.step_slice(Direction::South), SliceStep::Retreat);
    }

    #[test]
    fn descent_waits_for_a_drop() {
        let mut s = Session::default();
        let last = BlockPos::new(0, 64, 0);
        let ahead = BlockPos::new(3, 64, 0);
        // First transition-down of a run is distance gated.
        assert!(s.should_place(last, ahead, PatternType::TransitionDown, 0.6));
        s.record(last, Direction::East, PatternType::TransitionDown);
        assert!(!s.should_place(last, ahead, PatternType::TransitionDown, 0.6));
        assert!(s.should_place(last, BlockPos::new(1, 63, 0), PatternType::TransitionDown, 0.6));
        // Leaving the descent goes back to distance.
        assert!(s.should_place(last, ahead, PatternType::Normal, 0.6));
        assert!(!s.should_place(last, last, PatternType::Normal, 0.6));
    }

    #[test]
    fn vertical_moves_read_as_north() {
        let mut s = Session::default();
        let p = BlockPos::new(5, 64, 5);
        assert_eq!(s.heading(p, p), Direction::North);
        s.record(p, Direction::East, PatternType::Normal);
        assert_eq!(s.heading(p, p.with_y(63)), Direction::North);
        assert_eq!(s.heading(p, p.with_y(66)), Direction::North);
        assert_eq!(s.heading(p, BlockPos::new(6, 63, 5)), Direction::East);
    }

    proptest! {
        #[test]
        fn flat_moves_place_once_past_threshold(dx in -3i32..=3, dz in -3i32..=3) {
            let s = Session::default();
            let last = BlockPos::new(0, 64, 0);
            let cur = BlockPos::new(dx, 64, dz);
            prop_assert_eq!(s.should_place(last, cur, PatternType::Normal, 0.6), dx != 0 || dz != 0);
        }
    }
}
