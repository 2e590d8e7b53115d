//! `base|dir|axis|auto` block references.

/// Relative direction directive, read against the player's facing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum RelativeDirection {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl RelativeDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "f" => Some(RelativeDirection::Front),
            "b" => Some(RelativeDirection::Back),
            "l" => Some(RelativeDirection::Left),
            "r" => Some(RelativeDirection::Right),
            "up" => Some(RelativeDirection::Up),
            "down" => Some(RelativeDirection::Down),
            _ => None,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, RelativeDirection::Up | RelativeDirection::Down)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisHint {
    Horizontal,
    Vertical,
}

impl AxisHint {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "horizontal" => Some(AxisHint::Horizontal),
            "vertical" => Some(AxisHint::Vertical),
            _ => None,
        }
    }
}

/// A parsed block reference. Directives after the first `|` are
/// case-insensitive; the first direction and the first axis win and
/// unknown tokens are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockReference {
    pub base: String,
    pub direction: Option<RelativeDirection>,
    pub axis: Option<AxisHint>,
    pub auto_connect: bool,
}

impl BlockReference {
    pub fn parse(raw: &str) -> BlockReference {
        let mut parts = raw.split('|');
        let base = parts.next().unwrap_or("").trim();
        let mut reference = BlockReference {
            base: if base.is_empty() { "air".to_string() } else { base.to_string() },
            direction: None,
            axis: None,
            auto_connect: false,
        };
        for token in parts {
            let token = token.trim().to_ascii_lowercase();
            if token == "auto" {
                reference.auto_connect = true;
            } else if let Some(d) = RelativeDirection::from_token(&token) {
                reference.direction.get_or_insert(d);
            } else if let Some(a) = AxisHint::from_token(&token) {
                reference.axis.get_or_insert(a);
            } else if !token.is_empty() {
                log::debug!(target: "patterns", "ignoring directive {:?} in {:?}", token, raw);
            }
        }
        reference
    }

    /// Direction or axis present; an `auto` flag alone keeps literal lookup.
    #[inline]
    pub fn is_directional(&self) -> bool {
        self.direction.is_some() || self.axis.is_some()
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.axis == Some(AxisHint::Vertical) || self.direction.is_some_and(|d| d.is_vertical())
    }
}
