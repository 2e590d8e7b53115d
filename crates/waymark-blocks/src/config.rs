use serde::Deserialize;

use crate::material::GroundClass;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    // Inferred from the code when absent (flora fragments, leaves, air).
    #[serde(default)]
    pub ground: Option<GroundClass>,
}

impl BlockDef {
    pub fn named(name: impl Into<String>) -> Self {
        BlockDef {
            name: name.into(),
            id: None,
            ground: None,
        }
    }

    pub fn with_ground(mut self, ground: GroundClass) -> Self {
        self.ground = Some(ground);
        self
    }
}
