// crates/streampeek-core/src/controller.rs
//
// The hover/show/hide/drag state machine. Owns the panel state, the two
// named timer slots, the drag controller, and the settings store — one
// instance per app, constructed at startup and dropped at exit.
//
// Nothing here blocks or fails: pointer events mutate state synchronously,
// delayed transitions are deadlines polled from `tick`, and the host asks
// `next_deadline` when to wake up next.

use std::time::{Duration, Instant};

use crate::drag::{DragController, DragEnd};
use crate::embed::{build_embed_url, channel_page_url};
use crate::geometry::{Pos, Rect, Size};
use crate::links::ChannelId;
use crate::settings::SettingsStore;
use crate::state::PanelState;
use crate::timers::{Deadline, TimerBank};

/// Fixed wait after assigning the embed source before `loading` clears —
/// a heuristic "probably loaded" stand-in for a real load event.
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Fixed wait between hiding the panel and clearing channel + embed source,
/// so content doesn't snap away mid fade-out.
pub const TEARDOWN_DELAY: Duration = Duration::from_millis(200);

// Panel placement relative to the hovered link.
const ANCHOR_GAP: f32 = 15.0;
const ANCHOR_RAISE: f32 = 20.0;
const VIEWPORT_MARGIN: f32 = 10.0;

/// Which deadline fired — used only by `tick` to order a coarse poll.
#[derive(Clone, Copy)]
enum Slot {
    Hover,
    Hide,
    Settle,
    Teardown,
}

pub struct PreviewController {
    state: PanelState,
    settings: SettingsStore,
    timers: TimerBank,
    drag: DragController,
    /// Channel + link rect waiting for the hover deadline to confirm.
    pending_hover: Option<(ChannelId, Rect)>,
    settle: Deadline,
    teardown: Deadline,
    /// Hostname passed as the embed's parent parameter.
    parent_host: String,
}

impl PreviewController {
    pub fn new(settings: SettingsStore, parent_host: impl Into<String>) -> Self {
        Self {
            state: PanelState::default(),
            settings,
            timers: TimerBank::default(),
            drag: DragController::default(),
            pending_hover: None,
            settle: Deadline::default(),
            teardown: Deadline::default(),
            parent_host: parent_host.into(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Panel dimensions from settings, as a size the drag/placement math uses.
    pub fn panel_size(&self) -> Size {
        Size::new(self.settings.panel_width() as f32, self.settings.panel_height() as f32)
    }

    // ── Link hover (transitions 1–2) ─────────────────────────────────────────

    /// Pointer moved onto a classified sidebar channel link.
    pub fn on_link_hover(&mut self, channel: ChannelId, link_rect: Rect, now: Instant) {
        self.timers.cancel_hide();

        // Already showing this channel — nothing to re-arm.
        if self.state.visible && self.state.channel.as_ref() == Some(&channel) {
            return;
        }

        self.pending_hover = Some((channel, link_rect));
        self.timers.set_hover(now, self.settings.hover_delay());
    }

    /// Pointer left the link before (or after) the hover confirmed.
    pub fn on_link_out(&mut self, now: Instant) {
        self.timers.cancel_hover();
        self.pending_hover = None;
        self.request_hide(now);
    }

    // ── Hide scheduling (transitions 3–5) ────────────────────────────────────

    /// Arm the hide timer — inert while pinned or dragging.
    pub fn request_hide(&mut self, now: Instant) {
        if self.state.pinned || self.drag.is_dragging() {
            return;
        }
        self.timers.schedule_hide(now, self.settings.hide_delay());
    }

    /// Pointer entered the panel — moving from link to panel must not flicker.
    pub fn on_panel_enter(&mut self) {
        self.timers.cancel_hide();
    }

    pub fn on_panel_leave(&mut self, now: Instant) {
        self.request_hide(now);
    }

    // ── Pin / settings / close / open (transitions 6, 9–11) ──────────────────

    pub fn toggle_pin(&mut self) {
        self.state.pinned = !self.state.pinned;
    }

    /// Independent of the hover state machine — the panel keeps hiding and
    /// showing while the form is open.
    pub fn toggle_settings(&mut self) {
        self.state.settings_open = !self.state.settings_open;
    }

    /// Hide immediately; channel and embed source are cleared only after the
    /// teardown delay so the fade-out still has content behind it.
    pub fn close(&mut self, now: Instant) {
        self.state.visible = false;
        self.state.pinned = false;
        self.teardown.arm(now, TEARDOWN_DELAY);
    }

    /// Canonical page for the shown channel — Some only while a channel is
    /// set. Opening it is the host's side effect; panel state is untouched.
    pub fn channel_page_url(&self) -> Option<String> {
        self.state.channel.as_ref().map(channel_page_url)
    }

    // ── Drag (transitions 7–8) ───────────────────────────────────────────────

    pub fn begin_drag(&mut self, pointer: Pos, panel_rect: Rect, _now: Instant) {
        self.timers.cancel_hide();
        self.drag.begin(pointer, panel_rect);
    }

    pub fn drag_to(&mut self, pointer: Pos, viewport: Size) {
        if !self.drag.is_dragging() {
            return;
        }
        self.state.position = self.drag.drag_to(pointer, viewport, self.panel_size());
    }

    /// Release the drag; if the pointer ended outside the panel and the panel
    /// isn't pinned, auto-hide resumes.
    pub fn end_drag(&mut self, pointer: Pos, now: Instant) {
        let rect = Rect::from_pos_size(self.state.position, self.panel_size());
        if self.drag.end(pointer, rect) == DragEnd::Outside && !self.state.pinned {
            self.request_hide(now);
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Poll every deadline. Call once per host frame (or after the wakeup
    /// requested via `next_deadline`).
    ///
    /// A coarse tick can find several deadlines due at once; they fire in
    /// chronological order, each cascading arm dated at its own fire time,
    /// so a delayed tick reaches the same end state as per-deadline wakeups.
    pub fn tick(&mut self, now: Instant, viewport: Size) {
        loop {
            let due = [
                self.timers.hover.at().map(|at| (at, Slot::Hover)),
                self.timers.hide.at().map(|at| (at, Slot::Hide)),
                self.settle.at().map(|at| (at, Slot::Settle)),
                self.teardown.at().map(|at| (at, Slot::Teardown)),
            ]
            .into_iter()
            .flatten()
            .filter(|(at, _)| *at <= now)
            .min_by_key(|(at, _)| *at);

            let Some((at, slot)) = due else { break };
            match slot {
                Slot::Hover => {
                    if self.timers.hover.fire_due(now) {
                        if let Some((channel, link_rect)) = self.pending_hover.take() {
                            self.show_panel(channel, link_rect, viewport, at);
                        }
                    }
                }
                Slot::Hide => {
                    if self.timers.hide.fire_due(now) {
                        self.close(at);
                    }
                }
                Slot::Settle => {
                    if self.settle.fire_due(now) {
                        self.state.loading = false;
                    }
                }
                Slot::Teardown => {
                    if self.teardown.fire_due(now) {
                        self.state.channel = None;
                        self.state.embed_url = None;
                        self.state.loading = false;
                    }
                }
            }
        }
    }

    /// Earliest pending deadline, if any — the host sleeps until then.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.timers.hover.at(),
            self.timers.hide.at(),
            self.settle.at(),
            self.teardown.at(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Cancel everything pending. Dropping the controller releases the rest.
    pub fn clear_timers(&mut self) {
        self.timers.clear_all();
        self.settle.cancel();
        self.teardown.cancel();
        self.pending_hover = None;
        self.drag.cancel();
    }

    // ── Show ─────────────────────────────────────────────────────────────────

    fn show_panel(&mut self, channel: ChannelId, link_rect: Rect, viewport: Size, now: Instant) {
        // A teardown from a just-hidden panel must not null the new channel.
        self.teardown.cancel();

        self.state.embed_url = Some(build_embed_url(&channel, &self.parent_host));
        self.state.channel = Some(channel);
        self.state.loading = true;
        self.state.visible = true;
        self.settle.arm(now, SETTLE_DELAY);

        let panel = self.panel_size();

        // Prefer the link's right side; flip to the left on overflow.
        let mut left = link_rect.right() + ANCHOR_GAP;
        let mut top = link_rect.top() - ANCHOR_RAISE;
        if left + panel.w > viewport.w {
            left = link_rect.left() - panel.w - ANCHOR_GAP;
        }
        if top + panel.h > viewport.h {
            top = viewport.h - panel.h - VIEWPORT_MARGIN;
        }
        if top < VIEWPORT_MARGIN {
            top = VIEWPORT_MARGIN;
        }
        self.state.position = Pos::new(left, top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{order_for_dispatch, PanelCommand};
    use crate::settings::{MemStore, SettingsStore, DEFAULT_HIDE_DELAY_MS, DEFAULT_HOVER_DELAY_MS};

    const VIEWPORT: Size = Size { w: 1920.0, h: 1080.0 };

    fn controller() -> PreviewController {
        PreviewController::new(SettingsStore::load(Box::new(MemStore::default())), "localhost")
    }

    fn chan(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }

    fn link_rect() -> Rect {
        // A row in a left rail: x 0..240, somewhere mid-screen.
        Rect::new(0.0, 400.0, 240.0, 40.0)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Hover long enough for the hover deadline, then tick past it.
    fn show(ctrl: &mut PreviewController, name: &str, start: Instant) -> Instant {
        ctrl.on_link_hover(chan(name), link_rect(), start);
        let after = start + ms(DEFAULT_HOVER_DELAY_MS);
        ctrl.tick(after, VIEWPORT);
        after
    }

    /// Apply one frame's worth of emitted pointer commands the way the host
    /// does: ordered for dispatch, then routed to the controller.
    fn dispatch(ctrl: &mut PreviewController, frame: Vec<PanelCommand>, now: Instant) {
        for c in order_for_dispatch(frame) {
            match c {
                PanelCommand::HoverLink { channel, link_rect } => {
                    ctrl.on_link_hover(channel, link_rect, now)
                }
                PanelCommand::LinkOut => ctrl.on_link_out(now),
                PanelCommand::PanelEnter => ctrl.on_panel_enter(),
                PanelCommand::PanelLeave => ctrl.on_panel_leave(now),
                _ => {}
            }
        }
    }

    #[test]
    fn hover_past_delay_shows_panel_loading() {
        let t0 = Instant::now();
        let mut ctrl = controller();

        ctrl.on_link_hover(chan("somechannel"), link_rect(), t0);
        // Not yet — delay hasn't elapsed.
        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS - 1), VIEWPORT);
        assert!(!ctrl.state().visible);

        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS), VIEWPORT);
        let st = ctrl.state();
        assert!(st.visible);
        assert!(st.loading);
        assert_eq!(st.channel.as_ref().map(|c| c.as_str()), Some("somechannel"));
        assert_eq!(
            st.embed_url.as_deref(),
            Some("https://player.twitch.tv/?channel=somechannel&parent=localhost&muted=true&autoplay=true")
        );

        // Settle delay clears loading.
        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS) + SETTLE_DELAY, VIEWPORT);
        assert!(!ctrl.state().loading);
    }

    #[test]
    fn mouse_out_before_delay_never_shows() {
        let t0 = Instant::now();
        let mut ctrl = controller();

        ctrl.on_link_hover(chan("somechannel"), link_rect(), t0);
        ctrl.on_link_out(t0 + ms(100)); // leave before the 500 ms confirm
        ctrl.tick(t0 + ms(10_000), VIEWPORT);
        assert!(!ctrl.state().visible);
        assert!(ctrl.state().channel.is_none());
    }

    #[test]
    fn leaving_panel_hides_then_tears_down() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.on_panel_leave(shown);
        let hidden = shown + ms(DEFAULT_HIDE_DELAY_MS);
        ctrl.tick(hidden, VIEWPORT);
        assert!(!ctrl.state().visible);
        // Channel survives until the teardown delay so the fade has content.
        assert!(ctrl.state().channel.is_some());

        ctrl.tick(hidden + TEARDOWN_DELAY, VIEWPORT);
        assert!(ctrl.state().channel.is_none());
        assert!(ctrl.state().embed_url.is_none());
    }

    #[test]
    fn link_to_panel_crossing_in_one_frame_keeps_panel_open() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        // The pointer jumps the anchor gap within a single frame. With the
        // panel module running first, the raw emission order is
        // enter-then-out; dispatch ordering must still leave the hide
        // cancelled.
        dispatch(
            &mut ctrl,
            vec![PanelCommand::PanelEnter, PanelCommand::LinkOut],
            shown,
        );
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(
            ctrl.state().visible,
            "hide fired with the pointer resting inside the panel"
        );
    }

    #[test]
    fn panel_to_link_crossing_in_one_frame_keeps_panel_open() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        // Crossing back out onto the link, with the sidebar module running
        // first: hover-then-leave.
        dispatch(
            &mut ctrl,
            vec![
                PanelCommand::HoverLink { channel: chan("somechannel"), link_rect: link_rect() },
                PanelCommand::PanelLeave,
            ],
            shown,
        );
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn reentering_panel_cancels_pending_hide() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.on_panel_leave(shown);
        ctrl.on_panel_enter(); // back before the hide fires
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn pinned_panel_never_hides() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.toggle_pin();
        ctrl.on_panel_leave(shown);
        ctrl.tick(shown + ms(60_000), VIEWPORT);
        assert!(ctrl.state().visible);
        // The hide timer was never armed, not merely ignored: once the settle
        // deadline has fired, nothing at all is pending.
        assert!(ctrl.next_deadline().is_none());
    }

    #[test]
    fn hovering_the_shown_channel_again_is_inert() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        // Leaving the panel arms a hide; re-hovering the same link cancels it
        // without arming a fresh hover.
        ctrl.on_panel_leave(shown);
        ctrl.on_link_hover(chan("somechannel"), link_rect(), shown + ms(100));
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn hovering_a_different_channel_switches_after_delay() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "first", t0);

        show(&mut ctrl, "second", shown + ms(50));
        assert_eq!(ctrl.state().channel.as_ref().map(|c| c.as_str()), Some("second"));
        assert!(ctrl.state().visible);
    }

    #[test]
    fn close_clears_pin_and_tears_down() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.toggle_pin();
        ctrl.close(shown);
        assert!(!ctrl.state().visible);
        assert!(!ctrl.state().pinned);
        ctrl.tick(shown + TEARDOWN_DELAY, VIEWPORT);
        assert!(ctrl.state().channel.is_none());
    }

    #[test]
    fn rehover_during_teardown_shows_cleanly() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.close(shown);
        // New hover confirms while the 200 ms teardown is still pending.
        let reshown = show(&mut ctrl, "somechannel", shown + ms(50));
        ctrl.tick(reshown + ms(10_000), VIEWPORT);
        // The stale teardown must not null the freshly shown channel.
        assert!(ctrl.state().visible);
        assert!(ctrl.state().channel.is_some());
    }

    #[test]
    fn drag_moves_and_clamps_position() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        let pos = ctrl.state().position;
        ctrl.begin_drag(Pos::new(pos.x + 5.0, pos.y + 5.0), Rect::from_pos_size(pos, ctrl.panel_size()), shown);
        assert!(ctrl.is_dragging());

        // Way off the right edge — clamped to viewport − panel width.
        ctrl.drag_to(Pos::new(10_000.0, pos.y + 5.0), VIEWPORT);
        let panel = ctrl.panel_size();
        assert_eq!(ctrl.state().position.x, VIEWPORT.w - panel.w);

        // Release inside the panel: no hide scheduled.
        let inside = Pos::new(ctrl.state().position.x + 5.0, ctrl.state().position.y + 5.0);
        ctrl.end_drag(inside, shown);
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn drag_released_outside_resumes_auto_hide() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        let pos = ctrl.state().position;
        ctrl.begin_drag(Pos::new(pos.x + 5.0, pos.y + 5.0), Rect::from_pos_size(pos, ctrl.panel_size()), shown);
        ctrl.end_drag(Pos::new(-50.0, -50.0), shown);
        ctrl.tick(shown + ms(DEFAULT_HIDE_DELAY_MS), VIEWPORT);
        assert!(!ctrl.state().visible);
    }

    #[test]
    fn hide_requests_are_inert_while_dragging() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        let pos = ctrl.state().position;
        ctrl.begin_drag(Pos::new(pos.x + 5.0, pos.y + 5.0), Rect::from_pos_size(pos, ctrl.panel_size()), shown);
        ctrl.on_panel_leave(shown); // pointer inevitably leaves during a fast drag
        ctrl.tick(shown + ms(10_000), VIEWPORT);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn panel_flips_left_when_right_side_overflows() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        // A rail hugging the right half is unrealistic for the classifier,
        // but placement math only cares about the link rect.
        let rect = Rect::new(1700.0, 400.0, 200.0, 40.0);
        ctrl.on_link_hover(chan("somechannel"), rect, t0);
        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS), VIEWPORT);

        let panel = ctrl.panel_size();
        assert_eq!(ctrl.state().position.x, rect.left() - panel.w - ANCHOR_GAP);
    }

    #[test]
    fn panel_vertical_position_is_clamped_into_margin() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        // Link at the very top of the rail.
        ctrl.on_link_hover(chan("somechannel"), Rect::new(0.0, 0.0, 240.0, 40.0), t0);
        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS), VIEWPORT);
        assert_eq!(ctrl.state().position.y, VIEWPORT_MARGIN);

        // Link at the very bottom.
        let mut ctrl = controller();
        ctrl.on_link_hover(chan("somechannel"), Rect::new(0.0, 1060.0, 240.0, 40.0), t0);
        ctrl.tick(t0 + ms(DEFAULT_HOVER_DELAY_MS), VIEWPORT);
        let panel = ctrl.panel_size();
        assert_eq!(ctrl.state().position.y, VIEWPORT.h - panel.h - VIEWPORT_MARGIN);
    }

    #[test]
    fn channel_page_url_requires_a_channel() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        assert!(ctrl.channel_page_url().is_none());
        show(&mut ctrl, "somechannel", t0);
        assert_eq!(
            ctrl.channel_page_url().as_deref(),
            Some("https://www.twitch.tv/somechannel")
        );
    }

    #[test]
    fn settings_toggle_is_independent_of_hide_logic() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);

        ctrl.toggle_settings();
        assert!(ctrl.state().settings_open);
        ctrl.on_panel_leave(shown);
        ctrl.tick(shown + ms(DEFAULT_HIDE_DELAY_MS), VIEWPORT);
        // Panel hid on schedule; the settings flag is untouched.
        assert!(!ctrl.state().visible);
        assert!(ctrl.state().settings_open);
    }

    #[test]
    fn clear_timers_drops_every_pending_deadline() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        ctrl.on_link_hover(chan("somechannel"), link_rect(), t0);
        assert!(ctrl.next_deadline().is_some());
        ctrl.clear_timers();
        assert!(ctrl.next_deadline().is_none());
        ctrl.tick(t0 + ms(10_000), VIEWPORT);
        assert!(!ctrl.state().visible);
    }

    #[test]
    fn next_deadline_reports_the_earliest() {
        let t0 = Instant::now();
        let mut ctrl = controller();
        let shown = show(&mut ctrl, "somechannel", t0);
        // Settle (800 ms) is pending; leaving the panel arms hide (300 ms),
        // which is now the earliest.
        ctrl.on_panel_leave(shown);
        assert_eq!(ctrl.next_deadline(), Some(shown + ms(DEFAULT_HIDE_DELAY_MS)));
    }
}
