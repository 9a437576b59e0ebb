// crates/streampeek-core/src/links.rs
//
// Decides whether a hovered anchor is an in-scope channel link, and which
// channel it targets. Pure functions over plain data — the UI hands us the
// href string and the bounding rect of the enclosing navigation rail.

use std::collections::BTreeSet;
use std::fmt;

use crate::geometry::Rect;

// ── Sidebar heuristic ────────────────────────────────────────────────────────
// Tuned to one specific layout: a narrow rail hugging the left edge. If the
// rail moves, the numbers stop matching and hover previews stop firing.
// Best-effort only — do not widen these to "fix" a layout change elsewhere.
const SIDEBAR_MAX_LEFT: f32 = 80.0;
const SIDEBAR_MAX_WIDTH: f32 = 500.0;

/// Validated channel name: 2–25 chars of `[a-z0-9_]` (matched
/// case-insensitively). The stored value keeps the href's original casing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelId(String);

impl ChannelId {
    /// Validate `candidate` against the channel-name pattern.
    /// Returns None for anything out of shape — callers simply do nothing.
    pub fn new(candidate: &str) -> Option<Self> {
        let len = candidate.chars().count();
        if !(2..=25).contains(&len) {
            return None;
        }
        let ok = candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !ok {
            return None;
        }
        Some(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True iff the anchor sits inside a navigation rail whose bounding box hugs
/// the left edge (`left < 80`) and is narrow (`width < 500`). An anchor with
/// no enclosing rail is never a sidebar link.
pub fn is_sidebar_link(nav_rect: Option<Rect>) -> bool {
    match nav_rect {
        Some(r) => r.left() < SIDEBAR_MAX_LEFT && r.width() < SIDEBAR_MAX_WIDTH,
        None => false,
    }
}

/// Extract the channel id from an anchor href.
///
/// The href must be site-relative (start with `/`). Query string and fragment
/// are stripped, the path is split on `/`, and the first non-empty segment is
/// the candidate. Rejected when there is no segment, when the candidate is in
/// `blocked` (case-insensitive — `blocked` holds lowercase entries), or when
/// it fails the channel-name pattern. The returned id preserves the href's
/// original casing.
pub fn extract_channel_id(href: &str, blocked: &BTreeSet<String>) -> Option<ChannelId> {
    if !href.starts_with('/') {
        return None;
    }

    let clean = href
        .split('?')
        .next()
        .unwrap_or("")
        .split('#')
        .next()
        .unwrap_or("");

    let candidate = clean.split('/').find(|s| !s.is_empty())?;

    if blocked.contains(&candidate.to_ascii_lowercase()) {
        return None;
    }

    ChannelId::new(candidate)
}
