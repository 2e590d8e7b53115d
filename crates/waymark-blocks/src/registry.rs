use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::material::GroundClass;
use super::types::{AIR, AIR_CODE, BlockId, BlockType, normalize_code};
use super::wildcard::{is_wildcard, wildcard_match};

/// Code lookups the resolver and validator need from the host registry.
pub trait BlockLookup {
    /// Exact lookup of a (possibly unqualified) code.
    fn block_id(&self, code: &str) -> Option<BlockId>;

    /// Every block whose code matches `pattern`, in ascending id order.
    fn search_wildcard(&self, pattern: &str) -> Vec<BlockId>;

    fn first_match(&self, pattern: &str) -> Option<BlockId> {
        self.search_wildcard(pattern).into_iter().next()
    }

    /// Exact lookup for plain codes, first wildcard match for `*` codes.
    fn lookup(&self, code: &str) -> Option<BlockId> {
        if is_wildcard(code) {
            self.first_match(code)
        } else {
            self.block_id(code)
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Registry holding only air.
    pub fn new() -> Self {
        let air = BlockType {
            id: AIR,
            name: AIR_CODE.to_string(),
            ground: GroundClass::Replaceable,
        };
        Self {
            by_name: HashMap::from([(air.name.clone(), AIR)]),
            blocks: vec![air],
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|t| !t.name.is_empty())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(&normalize_code(name)).copied()
    }

    pub fn name_of(&self, id: BlockId) -> &str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or("<unknown>")
    }

    /// Ground class for the scanner; unknown ids read as empty.
    pub fn ground_class(&self, id: BlockId) -> GroundClass {
        self.get(id)
            .map(|t| t.ground)
            .unwrap_or(GroundClass::Replaceable)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let name = normalize_code(&def.name);
            if is_wildcard(&name) {
                return Err(format!("block name may not contain '*': {}", def.name).into());
            }
            if name == AIR_CODE {
                continue;
            }
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            if id == AIR {
                return Err(format!("block id 0 is reserved for air ({})", name).into());
            }
            let path = name.split_once(':').map(|(_, p)| p).unwrap_or(&name);
            let ground = GroundClass::for_code(path, def.ground);
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            if !reg.blocks[id as usize].name.is_empty() {
                log::warn!(
                    "block id {} assigned twice ({} replaces {})",
                    id,
                    name,
                    reg.blocks[id as usize].name
                );
            }
            reg.blocks[id as usize] = BlockType { id, name, ground };
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        log::debug!("block registry ready: {} block types", reg.by_name.len());
        Ok(reg)
    }
}

impl BlockLookup for BlockRegistry {
    fn block_id(&self, code: &str) -> Option<BlockId> {
        self.id_by_name(code)
    }

    fn search_wildcard(&self, pattern: &str) -> Vec<BlockId> {
        let pattern = normalize_code(pattern);
        self.blocks
            .iter()
            .filter(|t| !t.name.is_empty() && wildcard_match(&pattern, &t.name))
            .map(|t| t.id)
            .collect()
    }
}
