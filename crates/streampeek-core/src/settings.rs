// crates/streampeek-core/src/settings.rs
//
// User-configurable preferences behind a best-effort key-value store.
//
// The store is injected (Box<dyn KvStore>) rather than ambient, so tests can
// run many independent instances and the UI can decide where values actually
// live. Every field loads independently at startup and falls back to its
// compiled-in default on a missing key, a parse error, or an out-of-range
// value — one corrupt key never poisons the others. Setters validate, keep
// the prior value on rejection, and write through immediately on accept;
// persistence failures are swallowed (the in-memory value still updates).

use std::collections::BTreeSet;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_PANEL_WIDTH: u32 = 460;
pub const DEFAULT_PANEL_HEIGHT: u32 = 290;
pub const DEFAULT_HOVER_DELAY_MS: u64 = 500;
pub const DEFAULT_HIDE_DELAY_MS: u64 = 300;

/// Reserved site routes that are never channel names.
const DEFAULT_BLOCKED_ROUTES: [&str; 10] = [
    "directory",
    "downloads",
    "jobs",
    "p",
    "search",
    "settings",
    "subscriptions",
    "turbo",
    "wallet",
    "videos",
];

// ── Validated ranges ─────────────────────────────────────────────────────────

pub const PANEL_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 200..=1200;
pub const PANEL_HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 150..=800;
pub const DELAY_RANGE_MS: std::ops::RangeInclusive<u64> = 0..=5000;

// ── Storage keys ─────────────────────────────────────────────────────────────

const KEY_PANEL_WIDTH: &str = "panel_width";
const KEY_PANEL_HEIGHT: &str = "panel_height";
const KEY_HOVER_DELAY_MS: &str = "hover_delay_ms";
const KEY_HIDE_DELAY_MS: &str = "hide_delay_ms";
const KEY_BLOCKED_ROUTES: &str = "blocked_routes";

/// External key-value persistence. Both operations are best-effort and
/// non-throwing from the caller's perspective — a failing `set` simply
/// doesn't persist, a failing `get` reads as absent.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Plain preference values. `blocked_routes` entries are stored lowercase.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub panel_width: u32,
    pub panel_height: u32,
    pub hover_delay_ms: u64,
    pub hide_delay_ms: u64,
    pub blocked_routes: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panel_width: DEFAULT_PANEL_WIDTH,
            panel_height: DEFAULT_PANEL_HEIGHT,
            hover_delay_ms: DEFAULT_HOVER_DELAY_MS,
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            blocked_routes: DEFAULT_BLOCKED_ROUTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub struct SettingsStore {
    values: Settings,
    store: Box<dyn KvStore>,
}

impl SettingsStore {
    /// Load every field from `store`, each independently falling back to its
    /// default.
    pub fn load(store: Box<dyn KvStore>) -> Self {
        let defaults = Settings::default();
        let values = Settings {
            panel_width: read_or(&*store, KEY_PANEL_WIDTH, defaults.panel_width, |v| {
                PANEL_WIDTH_RANGE.contains(v)
            }),
            panel_height: read_or(&*store, KEY_PANEL_HEIGHT, defaults.panel_height, |v| {
                PANEL_HEIGHT_RANGE.contains(v)
            }),
            hover_delay_ms: read_or(&*store, KEY_HOVER_DELAY_MS, defaults.hover_delay_ms, |v| {
                DELAY_RANGE_MS.contains(v)
            }),
            hide_delay_ms: read_or(&*store, KEY_HIDE_DELAY_MS, defaults.hide_delay_ms, |v| {
                DELAY_RANGE_MS.contains(v)
            }),
            blocked_routes: read_or(&*store, KEY_BLOCKED_ROUTES, defaults.blocked_routes, |_| {
                true
            }),
        };
        Self { values, store }
    }

    // ── Read accessors ───────────────────────────────────────────────────────

    pub fn panel_width(&self) -> u32 {
        self.values.panel_width
    }

    pub fn panel_height(&self) -> u32 {
        self.values.panel_height
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.values.hover_delay_ms)
    }

    pub fn hover_delay_ms(&self) -> u64 {
        self.values.hover_delay_ms
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.values.hide_delay_ms)
    }

    pub fn hide_delay_ms(&self) -> u64 {
        self.values.hide_delay_ms
    }

    pub fn blocked_routes(&self) -> &BTreeSet<String> {
        &self.values.blocked_routes
    }

    // ── Validated setters ────────────────────────────────────────────────────
    // Out-of-range input is rejected (returns false, prior value retained) —
    // never an error surfaced to the user.

    pub fn set_panel_width(&mut self, v: u32) -> bool {
        if !PANEL_WIDTH_RANGE.contains(&v) {
            return false;
        }
        self.values.panel_width = v;
        self.persist(KEY_PANEL_WIDTH, &v);
        true
    }

    pub fn set_panel_height(&mut self, v: u32) -> bool {
        if !PANEL_HEIGHT_RANGE.contains(&v) {
            return false;
        }
        self.values.panel_height = v;
        self.persist(KEY_PANEL_HEIGHT, &v);
        true
    }

    pub fn set_hover_delay_ms(&mut self, v: u64) -> bool {
        if !DELAY_RANGE_MS.contains(&v) {
            return false;
        }
        self.values.hover_delay_ms = v;
        self.persist(KEY_HOVER_DELAY_MS, &v);
        true
    }

    pub fn set_hide_delay_ms(&mut self, v: u64) -> bool {
        if !DELAY_RANGE_MS.contains(&v) {
            return false;
        }
        self.values.hide_delay_ms = v;
        self.persist(KEY_HIDE_DELAY_MS, &v);
        true
    }

    /// Replace the blocked-routes set. Entries are trimmed and lowercased;
    /// empties are dropped. Always accepted.
    pub fn set_blocked_routes<I>(&mut self, routes: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.values.blocked_routes = routes
            .into_iter()
            .map(|s| s.as_ref().trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let routes = self.values.blocked_routes.clone();
        self.persist(KEY_BLOCKED_ROUTES, &routes);
    }

    /// Restore every field to its compiled-in default and persist each.
    pub fn reset_all(&mut self) {
        let d = Settings::default();
        self.values = d.clone();
        self.persist(KEY_PANEL_WIDTH, &d.panel_width);
        self.persist(KEY_PANEL_HEIGHT, &d.panel_height);
        self.persist(KEY_HOVER_DELAY_MS, &d.hover_delay_ms);
        self.persist(KEY_HIDE_DELAY_MS, &d.hide_delay_ms);
        self.persist(KEY_BLOCKED_ROUTES, &d.blocked_routes);
    }

    fn persist<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.store.set(key, &json);
        }
    }
}

fn read_or<T, F>(store: &dyn KvStore, key: &str, default: T, valid: F) -> T
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    store
        .get(key)
        .and_then(|raw| serde_json::from_str::<T>(&raw).ok())
        .filter(|v| valid(v))
        .unwrap_or(default)
}

// ── Test stores ──────────────────────────────────────────────────────────────

/// In-memory store for tests (and for the controller's own test scenarios).
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemStore {
    pub map: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// A store whose writes all silently fail and whose reads are always absent.
#[cfg(test)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl KvStore for BrokenStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}
}
