use std::error::Error;
use std::sync::mpsc;
use std::time::Duration;

use waymark_pattern::PatternSet;

use crate::commands::{self, Paths};

/// Editors write files in bursts; wait this long for the burst to settle.
const SETTLE: Duration = Duration::from_millis(250);

pub fn run(paths: &Paths) -> Result<(), Box<dyn Error>> {
    let reg = commands::load_registry(&paths.blocks)?;
    let mut set = PatternSet::from_patterns(commands::load_patterns(paths, &reg)?.patterns);

    let (tx, rx) = mpsc::channel::<()>();
    let dir = paths.patterns.clone();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any => {
                        if event
                            .paths
                            .iter()
                            .any(|p| p.extension().is_some_and(|e| e == "toml"))
                        {
                            let _ = tx.send(());
                        }
                    }
                    _ => {}
                }
            }
        });
        match watcher {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(dir.as_path(), RecursiveMode::NonRecursive) {
                    log::error!("cannot watch {}: {}", dir.display(), e);
                    return;
                }
                loop {
                    std::thread::sleep(Duration::from_secs(3600));
                }
            }
            Err(e) => log::error!("file watcher unavailable: {}", e),
        }
    });

    log::info!("watching {} (ctrl-c to stop)", paths.patterns.display());
    while rx.recv().is_ok() {
        std::thread::sleep(SETTLE);
        while rx.try_recv().is_ok() {}
        match commands::load_patterns(paths, &reg) {
            Ok(report) => {
                set.load(report.patterns);
                for (slot, name) in set.pattern_names() {
                    log::info!("  slot {:>2}: {}", slot, name);
                }
            }
            Err(e) => log::error!("reload failed: {}", e),
        }
    }
    Err("file watcher stopped".into())
}
