use std::collections::BTreeMap;
use std::fmt;

use crate::defaults;
use crate::model::Pattern;

/// Highest usable slot number.
pub const MAX_SLOTS: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    InvalidSlot(u32),
    EmptySlot(u32),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::InvalidSlot(s) => write!(f, "slot {} is outside 1..={}", s, MAX_SLOTS),
            SlotError::EmptySlot(s) => write!(f, "slot {} has no pattern", s),
        }
    }
}

impl std::error::Error for SlotError {}

/// Loaded patterns by slot, plus the active slot and slice.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: BTreeMap<u32, Pattern>,
    current_slot: u32,
    slice_index: usize,
    fallback: Pattern,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSet {
    pub fn new() -> Self {
        Self {
            patterns: BTreeMap::new(),
            current_slot: 1,
            slice_index: 0,
            fallback: defaults::default_road(),
        }
    }

    pub fn from_patterns(patterns: BTreeMap<u32, Pattern>) -> Self {
        let mut set = Self::new();
        set.load(patterns);
        set
    }

    /// Replaces every slot. Keeps the active slot when it is still occupied,
    /// otherwise moves to the lowest occupied slot (or slot 1).
    pub fn load(&mut self, patterns: BTreeMap<u32, Pattern>) {
        let before = self.current_slot;
        self.patterns = patterns
            .into_iter()
            .filter(|(slot, p)| {
                let ok = (1..=MAX_SLOTS).contains(slot);
                if !ok {
                    log::warn!(target: "patterns", "dropping '{}': slot {} out of range", p.name, slot);
                }
                ok
            })
            .collect();
        if !self.patterns.contains_key(&self.current_slot) {
            self.current_slot = self.patterns.keys().next().copied().unwrap_or(1);
        }
        if self.current_slot != before || self.slice_index >= self.current_pattern().depth() {
            self.slice_index = 0;
        }
        log::info!(
            target: "patterns",
            "pattern set loaded: {} slot(s), active slot {}",
            self.patterns.len(),
            self.current_slot
        );
    }

    pub fn switch_to(&mut self, slot: u32) -> Result<(), SlotError> {
        if !(1..=MAX_SLOTS).contains(&slot) {
            return Err(SlotError::InvalidSlot(slot));
        }
        let Some(p) = self.patterns.get(&slot) else {
            return Err(SlotError::EmptySlot(slot));
        };
        log::info!(target: "patterns", "switched to slot {}: {}", slot, p.name);
        self.current_slot = slot;
        self.slice_index = 0;
        Ok(())
    }

    /// Active pattern; the built-in road when the active slot is empty.
    pub fn current_pattern(&self) -> &Pattern {
        self.patterns
            .get(&self.current_slot)
            .unwrap_or(&self.fallback)
    }

    #[inline]
    pub fn current_slot(&self) -> u32 {
        self.current_slot
    }

    #[inline]
    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn increment_slice(&mut self) {
        let depth = self.current_pattern().depth();
        if depth == 0 {
            return;
        }
        self.slice_index = (self.slice_index + 1) % depth;
        log::debug!(target: "patterns", "slice -> {}/{}", self.slice_index + 1, depth);
    }

    pub fn decrement_slice(&mut self) {
        let depth = self.current_pattern().depth();
        if depth == 0 {
            return;
        }
        self.slice_index = (self.slice_index + depth - 1) % depth;
        log::debug!(target: "patterns", "slice -> {}/{}", self.slice_index + 1, depth);
    }

    pub fn reset_slice(&mut self) {
        self.slice_index = 0;
    }

    pub fn has_pattern(&self, slot: u32) -> bool {
        self.patterns.contains_key(&slot)
    }

    pub fn get(&self, slot: u32) -> Option<&Pattern> {
        self.patterns.get(&slot)
    }

    /// `(slot, name)` in ascending slot order.
    pub fn pattern_names(&self) -> Vec<(u32, &str)> {
        self.patterns
            .iter()
            .map(|(&slot, p)| (slot, p.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
