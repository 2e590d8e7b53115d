//! Built-in patterns. Slot 1 doubles as the never-empty fallback.

use std::collections::BTreeMap;

use crate::model::{Mode, Pattern};

const SOIL: &str = "game:soil-medium-normal";
const GRAVEL: &str = "game:gravel-granite";
const STONE_BRICKS: &str = "game:stonebricks-granite";

fn pattern(
    name: &str,
    description: &str,
    width: usize,
    height: usize,
    mode: Mode,
    slice: &str,
    symbols: &[(char, &str)],
) -> Pattern {
    Pattern {
        name: name.to_string(),
        description: description.to_string(),
        width,
        height,
        mode,
        slices: vec![slice.to_string()],
        symbols: symbols
            .iter()
            .map(|&(c, r)| (c, r.to_string()))
            .collect::<BTreeMap<_, _>>(),
        transition_up: None,
        transition_down: None,
    }
}

pub fn default_road() -> Pattern {
    pattern(
        "Default Road",
        "3-wide gravel road on a soil bed",
        3,
        4,
        Mode::Adaptive,
        "DDD,GGG,_P_,___",
        &[('D', SOIL), ('G', GRAVEL)],
    )
}

pub fn narrow_path() -> Pattern {
    pattern(
        "Narrow Path",
        "1-wide gravel path",
        1,
        4,
        Mode::Adaptive,
        "D,G,P,_",
        &[('D', SOIL), ('G', GRAVEL)],
    )
}

pub fn wide_road() -> Pattern {
    pattern(
        "Wide Road",
        "5-wide gravel road",
        5,
        4,
        Mode::Adaptive,
        "SSSSS,GGGGG,__P__,_____",
        &[('S', SOIL), ('G', GRAVEL)],
    )
}

pub fn stone_wall() -> Pattern {
    pattern(
        "Stone Wall",
        "Path with a stone brick wall on the left",
        3,
        4,
        Mode::Adaptive,
        "CSS,CP_,C__,C__",
        &[('C', STONE_BRICKS), ('S', SOIL)],
    )
}

pub fn default_tunnel() -> Pattern {
    pattern(
        "Default Tunnel",
        "5x5 stone brick tunnel, clears the interior",
        5,
        5,
        Mode::Carve,
        "SSSSS,S_P_S,S___S,S___S,SSSSS",
        &[('S', STONE_BRICKS)],
    )
}

/// `(slot, file stem, pattern)` for every built-in.
pub fn builtin_patterns() -> Vec<(u32, &'static str, Pattern)> {
    vec![
        (1, "default_road", default_road()),
        (2, "narrow_path", narrow_path()),
        (3, "wide_road", wide_road()),
        (4, "stone_wall", stone_wall()),
        (5, "default_tunnel", default_tunnel()),
    ]
}
