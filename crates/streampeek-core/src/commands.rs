// crates/streampeek-core/src/commands.rs
//
// Every user action on the preview overlay is expressed as a PanelCommand.
// UI modules emit these; app.rs processes them after the UI pass.
// Adding a new interaction = add a variant here + one match arm in app.rs.

use crate::geometry::{Pos, Rect};
use crate::links::ChannelId;

#[derive(Debug, Clone)]
pub enum PanelCommand {
    // ── Pointer wiring (synthesized by the sidebar / panel modules) ──────────
    /// Pointer moved onto a classified sidebar channel link.
    HoverLink { channel: ChannelId, link_rect: Rect },
    /// Pointer left the link it was on.
    LinkOut,
    /// Pointer entered the preview panel itself (cancels a pending hide so
    /// moving from link to panel doesn't flicker).
    PanelEnter,
    /// Pointer left the preview panel.
    PanelLeave,

    // ── Header controls ──────────────────────────────────────────────────────
    TogglePin,
    ToggleSettings,
    /// Explicit close button — hides immediately, teardown 200 ms later.
    ClosePanel,
    /// Open the canonical channel page in the default browser.
    OpenChannelPage,

    // ── Drag handle ──────────────────────────────────────────────────────────
    BeginDrag { pointer: Pos, panel_rect: Rect },
    DragTo { pointer: Pos },
    EndDrag { pointer: Pos },

    // ── Settings form ────────────────────────────────────────────────────────
    /// Save button. Unparsable fields arrive as None and are skipped;
    /// out-of-range values are rejected by the validated setters — either
    /// way the prior value is silently retained.
    ApplySettings {
        panel_width: Option<u32>,
        panel_height: Option<u32>,
        hover_delay_ms: Option<u64>,
        hide_delay_ms: Option<u64>,
        blocked_routes: Vec<String>,
    },
    ResetSettings,

    // ── Followed-channel rail ────────────────────────────────────────────────
    Follow(ChannelId),
    Unfollow(ChannelId),
}

impl PanelCommand {
    /// Commands that arm the hide timer — the pointer leaving a link or the
    /// panel — as opposed to ones that cancel it.
    fn arms_hide(&self) -> bool {
        matches!(self, PanelCommand::LinkOut | PanelCommand::PanelLeave)
    }
}

/// Reorder one frame's commands so hide-arming exits land before everything
/// else (stable within each class).
///
/// Emission order follows module run order, so a pointer crossing from a
/// link into the panel within a single frame can surface as PanelEnter
/// followed by LinkOut. Processed as emitted, the enter cancels a hide that
/// isn't armed yet and the out then arms one that fires with the pointer
/// resting inside the panel. Exits-first restores the guarantee that a
/// cancel always lands after the arm it is meant to kill, in either crossing
/// direction.
pub fn order_for_dispatch(cmds: Vec<PanelCommand>) -> Vec<PanelCommand> {
    let (exits, rest): (Vec<_>, Vec<_>) =
        cmds.into_iter().partition(PanelCommand::arms_hide);
    exits.into_iter().chain(rest).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exits_are_dispatched_before_enters() {
        let frame = vec![
            PanelCommand::PanelEnter,
            PanelCommand::LinkOut,
            PanelCommand::TogglePin,
        ];
        let ordered = order_for_dispatch(frame);
        assert!(matches!(ordered[0], PanelCommand::LinkOut));
        assert!(matches!(ordered[1], PanelCommand::PanelEnter));
        assert!(matches!(ordered[2], PanelCommand::TogglePin));
    }

    #[test]
    fn relative_order_within_each_class_is_kept() {
        let frame = vec![
            PanelCommand::PanelEnter,
            PanelCommand::PanelLeave,
            PanelCommand::LinkOut,
            PanelCommand::ToggleSettings,
        ];
        let ordered = order_for_dispatch(frame);
        assert!(matches!(ordered[0], PanelCommand::PanelLeave));
        assert!(matches!(ordered[1], PanelCommand::LinkOut));
        assert!(matches!(ordered[2], PanelCommand::PanelEnter));
        assert!(matches!(ordered[3], PanelCommand::ToggleSettings));
    }
}
