use std::error::Error;
use std::path::{Path, PathBuf};

use waymark_blocks::BlockRegistry;
use waymark_pattern::{LoadReport, PatternSet, load_directory, write_default_patterns};
use waymark_placement::WaymarkConfig;

#[derive(Clone, Debug)]
pub struct Paths {
    pub blocks: PathBuf,
    pub patterns: PathBuf,
    pub config: PathBuf,
}

pub fn load_registry(path: &Path) -> Result<BlockRegistry, Box<dyn Error>> {
    BlockRegistry::load_from_path(path)
        .map_err(|e| format!("failed to load blocks from {}: {}", path.display(), e).into())
}

/// `waymark.toml` is optional; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<WaymarkConfig, Box<dyn Error>> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(WaymarkConfig::default());
    }
    Ok(WaymarkConfig::load_from_path(path)?)
}

pub fn load_patterns(paths: &Paths, reg: &BlockRegistry) -> Result<LoadReport, Box<dyn Error>> {
    let report = load_directory(&paths.patterns, reg)?;
    log::info!(
        "{}: {} pattern(s) loaded, {} rejected, {} skipped",
        paths.patterns.display(),
        report.patterns.len(),
        report.rejected.len(),
        report.skipped.len()
    );
    Ok(report)
}

pub fn validate(paths: &Paths) -> Result<(), Box<dyn Error>> {
    let reg = load_registry(&paths.blocks)?;
    let report = load_patterns(paths, &reg)?;
    for (slot, p) in &report.patterns {
        println!("ok     slot {:>2}  {}", slot, p.name);
    }
    for e in &report.rejected {
        println!("error  {}", e);
    }
    for p in &report.skipped {
        println!("skip   {}", p.display());
    }
    if report.rejected.is_empty() {
        Ok(())
    } else {
        Err(format!("{} pattern file(s) failed validation", report.rejected.len()).into())
    }
}

pub fn list(paths: &Paths) -> Result<(), Box<dyn Error>> {
    let reg = load_registry(&paths.blocks)?;
    let set = PatternSet::from_patterns(load_patterns(paths, &reg)?.patterns);
    if set.is_empty() {
        println!("no patterns in {} (run `waymark init`)", paths.patterns.display());
        return Ok(());
    }
    for (slot, name) in set.pattern_names() {
        let Some(p) = set.get(slot) else { continue };
        println!(
            "{:>2}  {:<20} {}x{}x{} {:<8} {}",
            slot,
            name,
            p.width,
            p.height,
            p.depth(),
            p.mode,
            p.description
        );
    }
    Ok(())
}

pub fn init(paths: &Paths) -> Result<(), Box<dyn Error>> {
    let written = write_default_patterns(&paths.patterns)?;
    if written.is_empty() {
        println!("all built-in slots already present in {}", paths.patterns.display());
    }
    for p in written {
        println!("wrote {}", p.display());
    }
    Ok(())
}
