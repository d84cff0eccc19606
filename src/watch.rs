//! # Watch Mode
//!
//! Re-runs generation when the symbol export or the configuration file
//! changes. The parent directory of every watched file is observed
//! (editors often replace files instead of writing in place) and events
//! are filtered down to the watched file names.
//!
//! Change notifications travel over a channel so that the rerun happens
//! on the caller's thread. Bursts of events (one save often produces
//! several) are collapsed by [`run_on_change`].

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tracing::{debug, error, info};

/// Quiet period after the last event before a rerun starts
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Watch `files`, calling `on_change` with the changed path
///
/// The returned watcher must be kept alive for events to flow.
pub fn watch_files<F>(files: &[PathBuf], mut on_change: F) -> notify::Result<RecommendedWatcher>
where
    F: FnMut(&Path) + Send + 'static,
{
    let targets: BTreeSet<PathBuf> = files.iter().map(|f| normalize(f)).collect();
    let names: BTreeSet<std::ffi::OsString> = files
        .iter()
        .filter_map(|f| f.file_name().map(|n| n.to_os_string()))
        .collect();
    let folders: BTreeSet<PathBuf> = targets
        .iter()
        .map(|t| match t.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
        .collect();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                for path in &event.paths {
                    let hit = targets.contains(&normalize(path))
                        || path.file_name().map(|n| names.contains(n)).unwrap_or(false);
                    if hit {
                        debug!(path = %path.display(), "Watched file changed");
                        on_change(path);
                        break;
                    }
                }
            }
            Err(e) => error!(error = %e, "watch error"),
        },
        Config::default(),
    )?;
    for folder in &folders {
        watcher.watch(folder, RecursiveMode::NonRecursive)?;
    }
    info!(files = files.len(), "Watching for changes");
    Ok(watcher)
}

/// Call `rerun` once per burst of notifications until the channel closes
///
/// A failing rerun is logged and the loop keeps waiting; the previous
/// output stays in place.
pub fn run_on_change<F>(events: Receiver<()>, debounce: Duration, mut rerun: F) -> usize
where
    F: FnMut() -> anyhow::Result<()>,
{
    let mut runs = 0;
    while events.recv().is_ok() {
        // drain the burst
        while events.recv_timeout(debounce).is_ok() {}
        runs += 1;
        if let Err(e) = rerun() {
            let message = format!("{:#}", e);
            error!(error = %message, "Regeneration failed");
        }
    }
    runs
}

/// Block the current thread, rerunning on every change of `files`
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
pub fn watch_and_rerun<F>(files: &[PathBuf], rerun: F) -> anyhow::Result<()>
where
    F: FnMut() -> anyhow::Result<()>,
{
    let (tx, rx) = mpsc::channel();
    let _watcher = watch_files(files, move |_| {
        if tx.send(()).is_err() {
            debug!("Change receiver gone");
        }
    })?;
    run_on_change(rx, DEFAULT_DEBOUNCE, rerun);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_collapses_into_one_rerun() {
        let (tx, rx) = mpsc::channel();
        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        drop(tx);
        let mut calls = 0;
        let runs = run_on_change(rx, Duration::from_millis(10), || {
            calls += 1;
            Ok(())
        });
        assert_eq!(runs, 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_watcher_starts_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let symbols = dir.path().join("symbols.yaml");
        std::fs::write(&symbols, "types: []").unwrap();
        let watcher = watch_files(&[symbols], |_| {});
        assert!(watcher.is_ok());
    }

    #[test]
    fn test_failed_rerun_keeps_waiting() {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            tx.send(()).unwrap();
            std::thread::sleep(Duration::from_millis(100));
            tx.send(()).unwrap();
        });
        let runs = run_on_change(rx, Duration::from_millis(10), || anyhow::bail!("broken"));
        handle.join().unwrap();
        assert_eq!(runs, 2);
    }
}
