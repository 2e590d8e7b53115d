use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use waymark_blocks::BlockLookup;
use waymark_blocks::wildcard::is_wildcard;

use crate::reference::BlockReference;

/// Grid symbol for an empty cell.
pub const EMPTY_SYMBOL: char = '_';
/// Grid symbol marking the player's feet.
pub const PLAYER_SYMBOL: char = 'P';
/// Separator between rows inside one slice string.
pub const ROW_SEPARATOR: char = ',';

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only solid cells are written; existing terrain is kept elsewhere.
    #[default]
    Adaptive,
    /// Empty cells are written as air, clearing a tunnel.
    Carve,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Adaptive => f.write_str("adaptive"),
            Mode::Carve => f.write_str("carve"),
        }
    }
}

/// A named, multi-slice block pattern. Read-only once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub name: String,
    pub description: String,
    pub width: usize,
    pub height: usize,
    pub mode: Mode,
    /// One string per slice: rows joined by `,`, bottom row first.
    pub slices: Vec<String>,
    /// Symbol -> block reference. `_` and `P` are never looked up here.
    pub symbols: BTreeMap<char, String>,
    pub transition_up: Option<Box<Pattern>>,
    pub transition_down: Option<Box<Pattern>>,
}

/// What a grid cell stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell<'a> {
    Empty,
    Player,
    Block(&'a str),
}

impl Cell<'_> {
    /// `_` and `P` both place air; the player cell is never solid.
    #[inline]
    pub fn is_air(&self) -> bool {
        !matches!(self, Cell::Block(_))
    }
}

/// Parsed slice: `width * height` symbols, row-major with row 0 at the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl SliceGrid {
    pub fn parse(raw: &str, width: usize, height: usize) -> Result<SliceGrid, PatternError> {
        let rows: Vec<&str> = raw.split(ROW_SEPARATOR).collect();
        if rows.len() != height {
            return Err(PatternError::RowCountMismatch {
                expected: height,
                found: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(row.chars());
            let found = cells.len() - before;
            if found != width {
                return Err(PatternError::RowWidthMismatch {
                    row: y,
                    expected: width,
                    found,
                });
            }
        }
        Ok(SliceGrid {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// First `P` in row-major order (bottom row first, left to right).
    pub fn anchor(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&c| c == PLAYER_SYMBOL)
            .map(|i| (i % self.width, i / self.width))
    }

    pub fn count(&self, symbol: char) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }

    /// `(x, y, symbol)` for every cell, bottom row first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % w, i / w, c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    IndexOutOfRange { index: usize, depth: usize },
    RowCountMismatch { expected: usize, found: usize },
    RowWidthMismatch { row: usize, expected: usize, found: usize },
    NoPlayerMarker { slice: usize },
    UnknownSymbol { symbol: char },
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::IndexOutOfRange { index, depth } => {
                write!(f, "slice {} out of range (depth {})", index, depth)
            }
            PatternError::RowCountMismatch { expected, found } => {
                write!(f, "expected {} rows, found {}", expected, found)
            }
            PatternError::RowWidthMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} symbols, expected {}",
                row, found, expected
            ),
            PatternError::NoPlayerMarker { slice } => {
                write!(f, "slice {} has no 'P' player marker", slice)
            }
            PatternError::UnknownSymbol { symbol } => {
                write!(f, "symbol '{}' has no block mapping", symbol)
            }
            PatternError::OutOfBounds { x, y } => write!(f, "cell ({}, {}) is outside the slice", x, y),
        }
    }
}

impl std::error::Error for PatternError {}

/// Definition defect found while validating a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDimensions { width: usize, height: usize },
    NoSlices,
    Slice { slice: usize, error: PatternError },
    MissingPlayerMarker { slice: usize },
    MultiplePlayerMarkers { slice: usize, count: usize },
    UnknownSymbol { slice: usize, symbol: char },
    UnresolvableBlock { symbol: char, reference: String },
    BadSymbolKey { key: String },
    ReservedSymbol { symbol: char },
    Nested { layer: &'static str, error: Box<ValidationError> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDimensions { width, height } => {
                write!(f, "pattern dimensions must be non-zero (width={}, height={})", width, height)
            }
            ValidationError::NoSlices => f.write_str("pattern has no slices"),
            ValidationError::Slice { slice, error } => {
                write!(f, "slice {}: {} - check dimensions match pattern string", slice, error)
            }
            ValidationError::MissingPlayerMarker { slice } => write!(
                f,
                "slice {}: missing 'P' (player) marker - pattern needs player position",
                slice
            ),
            ValidationError::MultiplePlayerMarkers { slice, count } => {
                write!(f, "slice {}: {} 'P' markers, exactly one allowed", slice, count)
            }
            ValidationError::UnknownSymbol { slice, symbol } => {
                write!(f, "slice {}: symbol '{}' is not in the block table", slice, symbol)
            }
            ValidationError::UnresolvableBlock { symbol, reference } => {
                write!(f, "invalid block code: '{}' -> {}", symbol, reference)
            }
            ValidationError::BadSymbolKey { key } => {
                write!(f, "block table key {:?} must be a single character", key)
            }
            ValidationError::ReservedSymbol { symbol } => {
                write!(f, "symbol '{}' is reserved and cannot map to a block", symbol)
            }
            ValidationError::Nested { layer, error } => write!(f, "{}: {}", layer, error),
        }
    }
}

impl std::error::Error for ValidationError {}

impl Pattern {
    /// Number of slices.
    #[inline]
    pub fn depth(&self) -> usize {
        self.slices.len()
    }

    pub fn select_slice(&self, index: usize) -> Result<SliceGrid, PatternError> {
        let raw = self.slices.get(index).ok_or(PatternError::IndexOutOfRange {
            index,
            depth: self.depth(),
        })?;
        SliceGrid::parse(raw, self.width, self.height)
    }

    pub fn find_player_anchor(&self, slice: usize) -> Result<(usize, usize), PatternError> {
        self.select_slice(slice)?
            .anchor()
            .ok_or(PatternError::NoPlayerMarker { slice })
    }

    pub fn block_at<'a>(
        &'a self,
        grid: &SliceGrid,
        x: usize,
        y: usize,
    ) -> Result<Cell<'a>, PatternError> {
        match grid.get(x, y) {
            None => Err(PatternError::OutOfBounds { x, y }),
            Some(EMPTY_SYMBOL) => Ok(Cell::Empty),
            Some(PLAYER_SYMBOL) => Ok(Cell::Player),
            Some(symbol) => self
                .symbols
                .get(&symbol)
                .map(|r| Cell::Block(r.as_str()))
                .ok_or(PatternError::UnknownSymbol { symbol }),
        }
    }

    /// Transition sub-pattern for a rising step, if any.
    pub fn transition_up(&self) -> Option<&Pattern> {
        self.transition_up.as_deref()
    }

    pub fn transition_down(&self) -> Option<&Pattern> {
        self.transition_down.as_deref()
    }

    /// Every definition defect, including those of the transition layers.
    /// An empty list means the pattern is usable.
    pub fn validate<L>(&self, lookup: &L) -> Vec<ValidationError>
    where
        L: BlockLookup + ?Sized,
    {
        let mut errors = Vec::new();
        if self.width == 0 || self.height == 0 {
            errors.push(ValidationError::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.slices.is_empty() {
            errors.push(ValidationError::NoSlices);
        }
        for symbol in [EMPTY_SYMBOL, PLAYER_SYMBOL] {
            if let Some(reference) = self.symbols.get(&symbol) {
                // Files conventionally carry `P = "player"`; anything else is a mistake.
                if !(symbol == PLAYER_SYMBOL && reference.eq_ignore_ascii_case("player")) {
                    errors.push(ValidationError::ReservedSymbol { symbol });
                }
            }
        }

        let mut used: BTreeSet<char> = BTreeSet::new();
        let mut unknown: BTreeSet<char> = BTreeSet::new();
        for index in 0..self.depth() {
            let grid = match self.select_slice(index) {
                Ok(g) => g,
                Err(error) => {
                    errors.push(ValidationError::Slice {
                        slice: index,
                        error,
                    });
                    continue;
                }
            };
            match grid.count(PLAYER_SYMBOL) {
                0 => errors.push(ValidationError::MissingPlayerMarker { slice: index }),
                1 => {}
                count => errors.push(ValidationError::MultiplePlayerMarkers {
                    slice: index,
                    count,
                }),
            }
            for (_, _, c) in grid.cells() {
                if c == EMPTY_SYMBOL || c == PLAYER_SYMBOL {
                    continue;
                }
                if self.symbols.contains_key(&c) {
                    used.insert(c);
                } else if unknown.insert(c) {
                    errors.push(ValidationError::UnknownSymbol {
                        slice: index,
                        symbol: c,
                    });
                }
            }
        }

        for symbol in used {
            let reference = &self.symbols[&symbol];
            if !reference_exists(reference, lookup) {
                errors.push(ValidationError::UnresolvableBlock {
                    symbol,
                    reference: reference.clone(),
                });
            }
        }

        for (layer, nested) in [
            ("transition_up", self.transition_up()),
            ("transition_down", self.transition_down()),
        ] {
            if let Some(p) = nested {
                errors.extend(p.validate(lookup).into_iter().map(|e| {
                    ValidationError::Nested {
                        layer,
                        error: Box::new(e),
                    }
                }));
            }
        }
        errors
    }
}

/// Best-effort existence check. Wildcards are accepted unseen; directional
/// references only need some block sharing the base code.
fn reference_exists<L>(reference: &str, lookup: &L) -> bool
where
    L: BlockLookup + ?Sized,
{
    let parsed = BlockReference::parse(reference);
    if is_wildcard(&parsed.base) {
        return true;
    }
    if parsed.is_directional() {
        return lookup.block_id(&parsed.base).is_some()
            || lookup.first_match(&format!("{}*", parsed.base)).is_some();
    }
    lookup.block_id(&parsed.base).is_some()
}
