//! Prompt History Service
//!
//! Keeps executed prompts in memory, newest first, and persists them to
//! `prompt_history.json`. Persistence is fire-and-forget: the write happens
//! off the caller's path when a runtime is available, and a failed write is
//! logged, never surfaced to the prompt that produced the entry.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::models::history::{PromptHistory, PromptHistoryItem};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_promptpack_dir, history_path};

/// In-memory prompt history with JSON persistence.
pub struct HistoryService {
    path: PathBuf,
    items: Arc<Mutex<Vec<PromptHistoryItem>>>,
    // Serializes file writes. Writers snapshot the item list only after
    // acquiring this gate, so the last write always carries every entry
    // recorded before it.
    write_gate: Arc<Mutex<()>>,
}

impl HistoryService {
    /// History backed by the default `~/.promptpack/prompt_history.json`.
    pub fn new() -> AppResult<Self> {
        ensure_promptpack_dir()?;
        Self::at_path(history_path()?)
    }

    /// History backed by an explicit file path.
    pub fn at_path(path: PathBuf) -> AppResult<Self> {
        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let history: PromptHistory = serde_json::from_str(&content)?;
            history.items
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            items: Arc::new(Mutex::new(items)),
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Prepend an item and persist the updated history. The write is pushed
    /// onto the runtime's blocking pool when one is running; failures are
    /// logged, not returned.
    pub fn add_item(&self, item: PromptHistoryItem) {
        match self.items.lock() {
            Ok(mut items) => items.insert(0, item),
            Err(_) => {
                warn!("prompt history lock poisoned, dropping entry");
                return;
            }
        }

        let path = self.path.clone();
        let items = Arc::clone(&self.items);
        let gate = Arc::clone(&self.write_gate);
        let write = move || {
            if let Err(err) = persist_current(&path, &items, &gate) {
                warn!(error = %err, "failed to persist prompt history");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(write);
            }
            Err(_) => write(),
        }
    }

    /// Snapshot of the current items, newest first.
    pub fn items(&self) -> Vec<PromptHistoryItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    /// Remove all items and persist the empty history.
    pub fn clear(&self) -> AppResult<()> {
        if let Ok(mut items) = self.items.lock() {
            items.clear();
        }
        persist_current(&self.path, &self.items, &self.write_gate)
    }
}

/// Write the current item list under the write gate. The snapshot is taken
/// after the gate is held, so concurrent writers cannot clobber a newer
/// state with an older one.
fn persist_current(
    path: &Path,
    items: &Mutex<Vec<PromptHistoryItem>>,
    gate: &Mutex<()>,
) -> AppResult<()> {
    let _write = gate
        .lock()
        .map_err(|_| AppError::internal("history write gate poisoned"))?;
    let snapshot = items
        .lock()
        .map(|items| items.clone())
        .map_err(|_| AppError::internal("prompt history lock poisoned"))?;
    let history = PromptHistory { items: snapshot };
    let content = serde_json::to_string_pretty(&history)?;
    fs::write(path, content).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (HistoryService, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let service = HistoryService::at_path(tmp.path().join("history.json")).unwrap();
        (service, tmp)
    }

    #[test]
    fn test_items_are_newest_first() {
        let (service, _tmp) = service();
        service.add_item(PromptHistoryItem::new("first", "p1", "r1", None));
        service.add_item(PromptHistoryItem::new("second", "p2", "r2", None));
        let items = service.items();
        assert_eq!(items[0].user_task, "second");
        assert_eq!(items[1].user_task, "first");
    }

    #[test]
    fn test_history_survives_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.json");
        {
            let service = HistoryService::at_path(path.clone()).unwrap();
            service.add_item(PromptHistoryItem::new("task", "prompt", "response", None));
        }
        let reloaded = HistoryService::at_path(path).unwrap();
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].user_task, "task");
    }

    #[test]
    fn test_concurrent_writers_lose_no_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.json");
        let service = std::sync::Arc::new(HistoryService::at_path(path.clone()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || {
                    service.add_item(PromptHistoryItem::new(
                        format!("task {}", i),
                        "p",
                        "r",
                        None,
                    ));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.items().len(), 8);
        let content = fs::read_to_string(&path).unwrap();
        let persisted: PromptHistory = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted.items.len(), 8);
    }

    #[test]
    fn test_clear_empties_file_and_memory() {
        let (service, _tmp) = service();
        service.add_item(PromptHistoryItem::new("task", "p", "r", None));
        service.clear().unwrap();
        assert!(service.items().is_empty());

        let content = fs::read_to_string(&service.path).unwrap();
        let history: PromptHistory = serde_json::from_str(&content).unwrap();
        assert!(history.items.is_empty());
    }
}
