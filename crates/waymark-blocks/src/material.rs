use serde::{Deserialize, Serialize};

/// How a block behaves when the terrain scanner looks for ground.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundClass {
    /// Standable surface.
    #[default]
    Solid,
    /// Air and placeholders (tall grass, snow layers) that count as empty.
    Replaceable,
    Leaves,
    Plant,
    Fire,
}

/// Code fragments that mark flora regardless of the configured class.
const FLORA_FRAGMENTS: [&str; 2] = ["tallgrass", "flower"];

impl GroundClass {
    /// True for blocks the scanner reports as ground.
    #[inline]
    pub fn is_standable(self) -> bool {
        matches!(self, GroundClass::Solid)
    }

    /// Flora and fire: skipped by the scanner without ending the scan.
    #[inline]
    pub fn is_ignorable(self) -> bool {
        matches!(self, GroundClass::Leaves | GroundClass::Plant | GroundClass::Fire)
    }

    /// Class a registry entry ends up with. Flora fragments in the code win
    /// over a configured class, so tall grass never reads as ground.
    pub fn for_code(path: &str, configured: Option<GroundClass>) -> GroundClass {
        if FLORA_FRAGMENTS.iter().any(|f| path.contains(f)) {
            return GroundClass::Plant;
        }
        configured.unwrap_or_else(|| GroundClass::infer(path))
    }

    /// Class for a block code when the config does not name one.
    pub fn infer(path: &str) -> GroundClass {
        if path == "air" {
            GroundClass::Replaceable
        } else if FLORA_FRAGMENTS.iter().any(|f| path.contains(f)) {
            GroundClass::Plant
        } else if path.starts_with("leaves") {
            GroundClass::Leaves
        } else {
            GroundClass::Solid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_flags_flora() {
        assert_eq!(GroundClass::infer("tallgrass-long-free"), GroundClass::Plant);
        assert_eq!(GroundClass::infer("flower-lilyofthevalley-free"), GroundClass::Plant);
        assert_eq!(GroundClass::infer("leaves-grown-oak"), GroundClass::Leaves);
        assert_eq!(GroundClass::infer("air"), GroundClass::Replaceable);
        assert_eq!(GroundClass::infer("rock-granite"), GroundClass::Solid);
    }

    #[test]
    fn flora_fragments_override_configured_class() {
        assert_eq!(
            GroundClass::for_code("tallgrass-eaten-free", Some(GroundClass::Solid)),
            GroundClass::Plant
        );
        assert_eq!(
            GroundClass::for_code("flower-catmint-free", Some(GroundClass::Replaceable)),
            GroundClass::Plant
        );
        assert_eq!(
            GroundClass::for_code("water-still-7", Some(GroundClass::Replaceable)),
            GroundClass::Replaceable
        );
        assert_eq!(GroundClass::for_code("leaves-grown-oak", None), GroundClass::Leaves);
    }

    #[test]
    fn only_solid_is_standable() {
        assert!(GroundClass::Solid.is_standable());
        for c in [
            GroundClass::Replaceable,
            GroundClass::Leaves,
            GroundClass::Plant,
            GroundClass::Fire,
        ] {
            assert!(!c.is_standable());
        }
        assert!(!GroundClass::Replaceable.is_ignorable());
    }
}
