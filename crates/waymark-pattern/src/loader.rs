//! Pattern directory: one `slot<N>_<name>.toml` file per slot.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use waymark_blocks::BlockLookup;

use crate::defaults::builtin_patterns;
use crate::file::PatternFile;
use crate::model::{Pattern, ValidationError};
use crate::set::MAX_SLOTS;

#[derive(Debug)]
pub enum LoadError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(PathBuf, toml::ser::Error),
    Definition(PathBuf, Vec<ValidationError>),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(p, e) => write!(f, "{}: {}", p.display(), e),
            LoadError::Parse(p, e) => write!(f, "{}: {}", p.display(), e),
            LoadError::Serialize(p, e) => write!(f, "{}: {}", p.display(), e),
            LoadError::Definition(p, errors) => {
                write!(f, "{}: {} definition error(s)", p.display(), errors.len())?;
                for e in errors {
                    write!(f, "\n  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(_, e) => Some(e),
            LoadError::Parse(_, e) => Some(e),
            LoadError::Serialize(_, e) => Some(e),
            LoadError::Definition(..) => None,
        }
    }
}

/// Result of scanning a pattern directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub patterns: BTreeMap<u32, Pattern>,
    pub rejected: Vec<LoadError>,
    /// Files that do not follow the slot naming scheme, or repeat a slot.
    pub skipped: Vec<PathBuf>,
}

/// Slot number from `slot<N>_<anything>.toml`, `N` in `1..=MAX_SLOTS`.
pub fn parse_slot_number(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".toml")?;
    let rest = stem.strip_prefix("slot")?;
    let (digits, _) = rest.split_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let slot: u32 = digits.parse().ok()?;
    (1..=MAX_SLOTS).contains(&slot).then_some(slot)
}

pub fn parse_pattern<L>(path: &Path, text: &str, lookup: &L) -> Result<Pattern, LoadError>
where
    L: BlockLookup + ?Sized,
{
    let file: PatternFile =
        toml::from_str(text).map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;
    let pattern =
        Pattern::try_from(file).map_err(|e| LoadError::Definition(path.to_path_buf(), vec![e]))?;
    let errors = pattern.validate(lookup);
    if !errors.is_empty() {
        return Err(LoadError::Definition(path.to_path_buf(), errors));
    }
    Ok(pattern)
}

pub fn load_pattern_file<L>(path: impl AsRef<Path>, lookup: &L) -> Result<Pattern, LoadError>
where
    L: BlockLookup + ?Sized,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    parse_pattern(path, &text, lookup)
}

/// Loads every slot file in `dir`. Only a directory read failure is an
/// error; bad files land in the report.
pub fn load_directory<L>(dir: impl AsRef<Path>, lookup: &L) -> Result<LoadReport, LoadError>
where
    L: BlockLookup + ?Sized,
{
    let dir = dir.as_ref();
    let rd = fs::read_dir(dir).map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;
    let mut paths: Vec<PathBuf> = rd
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|x| x == "toml"))
        .collect();
    paths.sort();

    let mut report = LoadReport::default();
    for path in paths {
        let slot = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_slot_number);
        let Some(slot) = slot else {
            log::warn!(target: "patterns", "skipping {}: expected slot<N>_<name>.toml", path.display());
            report.skipped.push(path);
            continue;
        };
        if report.patterns.contains_key(&slot) {
            log::warn!(target: "patterns", "skipping {}: slot {} already loaded", path.display(), slot);
            report.skipped.push(path);
            continue;
        }
        match load_pattern_file(&path, lookup) {
            Ok(p) => {
                log::info!(
                    target: "patterns",
                    "slot {}: '{}' ({}x{}x{}, {})",
                    slot,
                    p.name,
                    p.width,
                    p.height,
                    p.depth(),
                    p.mode
                );
                report.patterns.insert(slot, p);
            }
            Err(e) => {
                log::warn!(target: "patterns", "rejected {}", e);
                report.rejected.push(e);
            }
        }
    }
    Ok(report)
}

pub fn save_pattern(path: impl AsRef<Path>, pattern: &Pattern) -> Result<(), LoadError> {
    let path = path.as_ref();
    let text = toml::to_string_pretty(&PatternFile::from(pattern))
        .map_err(|e| LoadError::Serialize(path.to_path_buf(), e))?;
    fs::write(path, text).map_err(|e| LoadError::Io(path.to_path_buf(), e))
}

/// Writes the built-ins into `dir` for every slot that has no file yet.
/// Returns the files written.
pub fn write_default_patterns(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;
    let mut occupied = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LoadError::Io(dir.to_path_buf(), e))? {
        let entry = entry.map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;
        if let Some(slot) = entry.file_name().to_str().and_then(parse_slot_number) {
            occupied.push(slot);
        }
    }
    let mut written = Vec::new();
    for (slot, stem, pattern) in builtin_patterns() {
        if occupied.contains(&slot) {
            continue;
        }
        let path = dir.join(format!("slot{}_{}.toml", slot, stem));
        save_pattern(&path, &pattern)?;
        log::info!(target: "patterns", "wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
