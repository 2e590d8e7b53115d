//! The building session a host drives: enable/disable, slot switching, and
//! one `tick` per sample of the player's position.

use std::collections::BTreeMap;
use std::time::Duration;

use waymark_blocks::BlockId;
use waymark_geom::{BlockPos, Direction, Vec3};
use waymark_pattern::{Mode, Pattern, PatternSet, Resolver, SlotError};
use waymark_world::{WorldMutation, WorldQuery};

use crate::config::WaymarkConfig;
use crate::gate::{AlwaysApprove, PlacementGate};
use crate::planner::{PatternType, Plan, plan, select_pattern};
use crate::preview::{Preview, PreviewCell, PreviewKey};
use crate::session::{Session, SliceStep};
use crate::stamper::{Placement, StampIssue, StampParams, resolve_cells, stamp, tally};

/// Summary of the active pattern for a status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternInfo {
    pub slot: u32,
    pub name: String,
    pub description: String,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub mode: Mode,
    /// 1-based.
    pub slice: usize,
}

/// One applied placement event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementReport {
    pub origin: BlockPos,
    pub direction: Direction,
    pub pattern_type: PatternType,
    pub slice_index: usize,
    pub writes: Vec<Placement>,
    pub issues: Vec<StampIssue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Disabled,
    NoPlayer,
    /// Enabled, but nothing to place this tick.
    Idle,
    Placed(PlacementReport),
    /// The gate refused the batch; building is now off.
    Vetoed { required: BTreeMap<BlockId, u32> },
}

pub struct PatternBuilder {
    config: WaymarkConfig,
    resolver: Resolver,
    patterns: PatternSet,
    session: Option<Session>,
    preview: Preview,
    preview_enabled: bool,
    tick_interval: Duration,
    gate: Box<dyn PlacementGate>,
}

impl PatternBuilder {
    pub fn new(config: WaymarkConfig, patterns: PatternSet) -> Self {
        Self {
            resolver: Resolver::new(config.resolver.handedness),
            preview_enabled: config.placement.preview_enabled,
            tick_interval: config.placement.normal_tick(),
            config,
            patterns,
            session: None,
            preview: Preview::default(),
            gate: Box::new(AlwaysApprove),
        }
    }

    pub fn with_gate(mut self, gate: impl PlacementGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    pub fn config(&self) -> &WaymarkConfig {
        &self.config
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Interval the host should wait before the next `tick`.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Switching on starts measuring from `player`; switching off forgets
    /// heading and descent state and clears the preview.
    pub fn set_building_enabled(&mut self, enabled: bool, player: Option<Vec3>) {
        if enabled == self.is_enabled() {
            return;
        }
        if enabled {
            let start = player.map(Vec3::block_pos);
            self.session = Some(Session::starting_at(start));
            log::info!(target: "placement", "building enabled ({})", self.patterns.current_pattern().name);
        } else {
            self.session = None;
            self.preview.clear();
            self.tick_interval = self.config.placement.normal_tick();
            log::info!(target: "placement", "building disabled");
        }
    }

    pub fn switch_to_slot(&mut self, slot: u32) -> Result<(), SlotError> {
        self.patterns.switch_to(slot)?;
        self.preview.clear();
        Ok(())
    }

    pub fn reload_patterns(&mut self, patterns: BTreeMap<u32, Pattern>) {
        self.patterns.load(patterns);
        self.preview.clear();
    }

    pub fn current_pattern_info(&self) -> PatternInfo {
        let p = self.patterns.current_pattern();
        PatternInfo {
            slot: self.patterns.current_slot(),
            name: p.name.clone(),
            description: p.description.clone(),
            width: p.width,
            height: p.height,
            depth: p.depth(),
            mode: p.mode,
            slice: self.patterns.slice_index() + 1,
        }
    }

    pub fn set_preview_enabled(&mut self, on: bool) {
        self.preview_enabled = on;
        if !on {
            self.preview.clear();
        }
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.set_preview_enabled(!self.preview_enabled);
        self.preview_enabled
    }

    pub fn preview(&self) -> &[PreviewCell] {
        self.preview.cells()
    }

    /// Required blocks for a stamp at `origin` without writing anything.
    pub fn preview_tally<W>(&self, origin: BlockPos, facing: Direction, world: &W) -> BTreeMap<BlockId, u32>
    where
        W: WorldQuery + ?Sized,
    {
        let params = self.stamp_params(self.patterns.current_pattern(), origin, facing);
        tally(&stamp(&params, &self.resolver, world).writes)
    }

    fn stamp_params<'a>(&self, pattern: &'a Pattern, origin: BlockPos, facing: Direction) -> StampParams<'a> {
        StampParams {
            pattern,
            slice_index: self.patterns.slice_index(),
            origin,
            facing,
            carve_allowed: self.config.placement.allow_carving,
        }
    }

    /// Planner result for stamping one cell ahead of `current`. Carve
    /// patterns never follow terrain.
    fn plan_ahead<W>(&self, current: BlockPos, dir: Direction, world: &W) -> Plan
    where
        W: WorldQuery + ?Sized,
    {
        let base = current.offset(dir, 1);
        if self.patterns.current_pattern().mode == Mode::Carve {
            return Plan {
                position: base,
                pattern_type: PatternType::Normal,
            };
        }
        plan(base, dir, self.config.placement.lookahead, world, self.config.terrain)
    }

    fn set_tick_interval(&mut self, peek: PatternType) {
        let next = if peek == PatternType::TransitionDown {
            self.config.placement.fast_tick()
        } else {
            self.config.placement.normal_tick()
        };
        if next != self.tick_interval {
            log::debug!(target: "placement", "tick interval {:?} -> {:?}", self.tick_interval, next);
            self.tick_interval = next;
        }
    }

    fn refresh_preview<W>(&mut self, current: BlockPos, dir: Direction, world: &W)
    where
        W: WorldQuery + ?Sized,
    {
        if !self.preview_enabled {
            return;
        }
        let anchor = current.offset(dir, self.config.placement.preview_distance);
        let key = PreviewKey {
            anchor,
            facing: dir,
            slot: self.patterns.current_slot(),
            slice: self.patterns.slice_index(),
        };
        let params = self.stamp_params(self.patterns.current_pattern(), anchor, dir);
        let resolver = self.resolver;
        self.preview
            .refresh(key, world, || resolve_cells(&params, &resolver, world).writes);
    }

    /// One sample of the player. Never panics and never fails; anything that
    /// goes wrong degrades to doing nothing this tick.
    pub fn tick<W>(&mut self, player: Option<Vec3>, world: &mut W) -> TickOutcome
    where
        W: WorldQuery + WorldMutation + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Disabled;
        };
        let Some(player) = player else {
            return TickOutcome::NoPlayer;
        };
        let current = player.block_pos();
        let Some(last) = session.last_placement else {
            session.last_placement = Some(current);
            return TickOutcome::Idle;
        };
        let dir = session.heading(last, current);

        let peek = self.plan_ahead(current, dir, &*world).pattern_type;
        self.set_tick_interval(peek);

        let threshold = self.config.placement.distance_threshold;
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Disabled;
        };
        if !session.should_place(last, current, peek, threshold) {
            self.refresh_preview(current, dir, &*world);
            return TickOutcome::Idle;
        }

        match session.step_slice(dir) {
            SliceStep::Advance => self.patterns.increment_slice(),
            SliceStep::Retreat => self.patterns.decrement_slice(),
            SliceStep::Anchor | SliceStep::Turn => {}
        }

        let planned = self.plan_ahead(current, dir, &*world);
        let pattern = select_pattern(self.patterns.current_pattern(), planned.pattern_type);
        let params = self.stamp_params(pattern, planned.position, dir);
        let result = stamp(&params, &self.resolver, &*world);

        let required = tally(&result.writes);
        if !self.gate.approve(&required) {
            log::info!(target: "placement", "placement at {} refused; building disabled", planned.position);
            self.set_building_enabled(false, None);
            return TickOutcome::Vetoed { required };
        }

        for p in &result.writes {
            world.set_block(p.block, p.pos);
        }
        for p in result.writes.iter().filter(|p| p.auto_connect) {
            world.trigger_neighbor_update(p.pos);
        }
        log::info!(
            target: "placement",
            "{} '{}' slice {} at {} facing {}: {} write(s)",
            planned.pattern_type,
            pattern.name,
            self.patterns.slice_index() + 1,
            planned.position,
            dir,
            result.writes.len()
        );

        let report = PlacementReport {
            origin: planned.position,
            direction: dir,
            pattern_type: planned.pattern_type,
            slice_index: self.patterns.slice_index(),
            writes: result.writes,
            issues: result.issues,
        };
        if let Some(session) = self.session.as_mut() {
            session.record(current, dir, planned.pattern_type);
        }
        // After the slice step and the writes, so tints and slice are current.
        self.refresh_preview(current, dir, &*world);
        TickOutcome::Placed(report)
    }
}
