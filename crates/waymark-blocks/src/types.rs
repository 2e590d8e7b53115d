use crate::material::GroundClass;

/// Runtime block id. Id 0 is always air.
pub type BlockId = u16;

pub const AIR: BlockId = 0;

/// Code of the air block after normalisation.
pub const AIR_CODE: &str = "game:air";

/// Domain assumed when a code has none (`gravel-granite` -> `game:gravel-granite`).
pub const DEFAULT_DOMAIN: &str = "game";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    /// Fully qualified code, `domain:path`.
    pub name: String,
    pub ground: GroundClass,
}

impl BlockType {
    pub(crate) fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            ground: GroundClass::Replaceable,
        }
    }

    /// Path component of the code (after the domain).
    pub fn path(&self) -> &str {
        self.name
            .split_once(':')
            .map(|(_, p)| p)
            .unwrap_or(&self.name)
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == AIR
    }
}

/// Lowercases and qualifies a block code with the default domain.
pub fn normalize_code(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    if code.contains(':') {
        code
    } else {
        format!("{DEFAULT_DOMAIN}:{code}")
    }
}
