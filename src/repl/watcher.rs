//! Pattern file watching
//!
//! Editors often write a file several times per save (truncate, write,
//! touch metadata), and notify reports each write. [`FileWatcher`] turns
//! that stream into at most one reload per file per [`RELOAD_DEBOUNCE`].

use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Changes to one file closer together than this reload it once
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches pattern files on notify's own threads and forwards events to a channel
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    last_reload: HashMap<PathBuf, Instant>,
}

impl FileWatcher {
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // the receiver is gone once the REPL exits
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            last_reload: HashMap::new(),
        })
    }

    /// Watch a single file
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        self.watcher
            .watch(path.as_ref(), RecursiveMode::NonRecursive)
    }

    /// Files `event` says should be reloaded at `now`: written or created,
    /// and not already reloaded within the debounce window.
    pub fn paths_to_reload(&mut self, event: &Event, now: Instant) -> Vec<PathBuf> {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return Vec::new();
        }

        let mut due = Vec::new();
        for path in &event.paths {
            let fresh = match self.last_reload.get(path) {
                Some(last) => now.saturating_duration_since(*last) >= RELOAD_DEBOUNCE,
                None => true,
            };
            if fresh && !due.contains(path) {
                self.last_reload.insert(path.clone(), now);
                due.push(path.clone());
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind};

    fn watcher() -> FileWatcher {
        let (tx, _rx) = unbounded();
        FileWatcher::new(tx).unwrap()
    }

    fn modified(path: &str) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from(path))
    }

    #[test]
    fn test_watch_missing_file_fails() {
        let mut watcher = watcher();
        assert!(watcher.watch("/definitely/not/here.strudel").is_err());
    }

    #[test]
    fn test_watch_existing_file() {
        let mut watcher = watcher();
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(watcher.watch(file.path()).is_ok());
    }

    #[test]
    fn test_burst_of_writes_reloads_once() {
        let mut watcher = watcher();
        let start = Instant::now();
        assert_eq!(
            watcher.paths_to_reload(&modified("a.strudel"), start),
            vec![PathBuf::from("a.strudel")]
        );
        let soon = start + Duration::from_millis(50);
        assert!(watcher.paths_to_reload(&modified("a.strudel"), soon).is_empty());

        let later = start + RELOAD_DEBOUNCE;
        assert_eq!(watcher.paths_to_reload(&modified("a.strudel"), later).len(), 1);
    }

    #[test]
    fn test_files_debounce_independently() {
        let mut watcher = watcher();
        let now = Instant::now();
        watcher.paths_to_reload(&modified("a.strudel"), now);
        assert_eq!(
            watcher.paths_to_reload(&modified("b.strudel"), now),
            vec![PathBuf::from("b.strudel")]
        );
    }

    #[test]
    fn test_only_writes_and_creates_reload() {
        let mut watcher = watcher();
        let now = Instant::now();
        let read = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("a.strudel"));
        assert!(watcher.paths_to_reload(&read, now).is_empty());

        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("a.strudel"))
            .add_path(PathBuf::from("a.strudel"));
        assert_eq!(watcher.paths_to_reload(&created, now).len(), 1);
    }
}
