// src/storage.rs
//
// JSON-file-backed implementation of the core KvStore trait. One flat JSON
// object per file, read once at open, rewritten in full on every set. Every
// failure path is logged and swallowed — the store's contract is best-effort
// and non-throwing, so a read-only disk just means settings don't survive
// the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use streampeek_core::KvStore;

use crate::speek_log;

pub struct JsonFileStore {
    path: PathBuf,
    cache: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Read and parse the file at `path`; any failure (missing file, bad
    /// JSON, not an object) yields an empty store.
    pub fn open(path: PathBuf) -> Self {
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    speek_log!("[storage] {} unparsable ({err}) — starting empty", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(), // first run — no file yet
        };
        Self { path, cache }
    }

    fn flush(&self) {
        if let Some(dir) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(dir) {
                speek_log!("[storage] create {} failed: {err}", dir.display());
                return;
            }
        }
        let json = match serde_json::to_string_pretty(&self.cache) {
            Ok(j) => j,
            Err(err) => {
                speek_log!("[storage] serialize failed: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            speek_log!("[storage] write {} failed: {err}", self.path.display());
        }
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|v| v.to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        // Values arrive JSON-encoded from the settings store; keep the file
        // readable by storing them as real JSON values, not nested strings.
        let parsed = serde_json::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        self.cache.insert(key.to_string(), parsed);
        self.flush();
    }
}
