//! On-disk pattern schema (TOML).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Mode, Pattern, ValidationError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternFile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<String>,
    // Single-slice files written before `slices` existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub blocks: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_up: Option<Box<PatternFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_down: Option<Box<PatternFile>>,
}

impl TryFrom<PatternFile> for Pattern {
    type Error = ValidationError;

    fn try_from(file: PatternFile) -> Result<Self, Self::Error> {
        let mut symbols = BTreeMap::new();
        for (key, reference) in file.blocks {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    symbols.insert(c, reference);
                }
                _ => return Err(ValidationError::BadSymbolKey { key }),
            }
        }
        let slices = if file.slices.is_empty() {
            file.pattern.into_iter().collect()
        } else {
            file.slices
        };
        let nested = |layer: &'static str, f: Option<Box<PatternFile>>| {
            f.map(|f| Pattern::try_from(*f).map(Box::new))
                .transpose()
                .map_err(|e| ValidationError::Nested {
                    layer,
                    error: Box::new(e),
                })
        };
        Ok(Pattern {
            name: file.name,
            description: file.description,
            width: file.width,
            height: file.height,
            mode: file.mode,
            slices,
            symbols,
            transition_up: nested("transition_up", file.transition_up)?,
            transition_down: nested("transition_down", file.transition_down)?,
        })
    }
}

impl From<&Pattern> for PatternFile {
    fn from(p: &Pattern) -> Self {
        PatternFile {
            name: p.name.clone(),
            description: p.description.clone(),
            width: p.width,
            height: p.height,
            mode: p.mode,
            slices: p.slices.clone(),
            pattern: None,
            blocks: p
                .symbols
                .iter()
                .map(|(c, r)| (c.to_string(), r.clone()))
                .collect(),
            transition_up: p.transition_up().map(|t| Box::new(PatternFile::from(t))),
            transition_down: p.transition_down().map(|t| Box::new(PatternFile::from(t))),
        }
    }
}
