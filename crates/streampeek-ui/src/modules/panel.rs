// src/modules/panel.rs
//
// Contents of the floating preview panel: header strip (drag handle, pin,
// open, settings, close) over the player surface. The module draws inside
// the Area that app.rs positions from controller state; pointer containment
// is diffed per frame into PanelEnter / PanelLeave commands, which is what
// keeps the hide timer from firing while the pointer rests on the panel.

use egui::{
    Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2,
};
use streampeek_core::commands::PanelCommand;
use streampeek_core::PreviewController;

use super::UiModule;
use crate::follows::FollowList;
use crate::theme::{DARK_BG_0, DARK_TEXT, DARK_TEXT_DIM, LIVE_RED};

const HEADER_H: f32 = 30.0;
const FOOTER_H: f32 = 22.0;

#[derive(Default)]
pub struct PanelModule {
    prev_inside: bool,
}

impl PanelModule {
    /// Forget pointer containment. app.rs calls this while the panel is
    /// hidden so a stale "inside" from the previous showing cannot leak a
    /// spurious PanelLeave into a fresh one.
    pub fn reset(&mut self) {
        self.prev_inside = false;
    }
}

impl UiModule for PanelModule {
    fn name(&self) -> &str {
        "Preview panel"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        ctrl: &PreviewController,
        _follows: &FollowList,
        cmd: &mut Vec<PanelCommand>,
    ) {
        let state = ctrl.state();
        let size = ctrl.panel_size();
        // The frame app.rs wraps us in adds a 6 px margin on each side; the
        // content is sized so the framed panel matches panel_size, which is
        // what the placement and drag clamping are computed against.
        ui.set_width(size.w - 12.0);

        let panel_rect = Rect::from_min_size(
            Pos2::new(state.position.x, state.position.y),
            Vec2::new(size.w, size.h),
        );

        // ── Header ───────────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.set_height(HEADER_H);

            let name = state
                .channel
                .as_ref()
                .map(|c| c.as_str().to_owned())
                .unwrap_or_default();

            // The channel name is the drag handle.
            let handle = ui.add(
                egui::Label::new(
                    RichText::new(format!("● {name}"))
                        .color(LIVE_RED)
                        .size(13.0)
                        .strong(),
                )
                .sense(Sense::drag()),
            );
            if handle.drag_started() {
                if let Some(pointer) = handle.interact_pointer_pos() {
                    cmd.push(PanelCommand::BeginDrag {
                        pointer: super::core_pos(pointer),
                        panel_rect: super::core_rect(panel_rect),
                    });
                }
            }
            if handle.hovered() || ctrl.is_dragging() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }

            ui.label(
                RichText::new("LIVE")
                    .size(10.0)
                    .strong()
                    .color(Color32::WHITE)
                    .background_color(LIVE_RED),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Close").clicked() {
                    cmd.push(PanelCommand::ClosePanel);
                }
                if ui.small_button("⚙").on_hover_text("Settings").clicked() {
                    cmd.push(PanelCommand::ToggleSettings);
                }
                if ui.small_button("↗").on_hover_text("Open channel page").clicked() {
                    cmd.push(PanelCommand::OpenChannelPage);
                }
                let pin_label = if state.pinned {
                    RichText::new("📌").color(DARK_TEXT)
                } else {
                    RichText::new("📌").color(DARK_TEXT_DIM)
                };
                let pin_tip = if state.pinned { "Unpin" } else { "Pin open" };
                if ui.small_button(pin_label).on_hover_text(pin_tip).clicked() {
                    cmd.push(PanelCommand::TogglePin);
                }
            });
        });

        // ── Player surface ───────────────────────────────────────────────────
        let canvas_h = (size.h - HEADER_H - FOOTER_H - 12.0).max(0.0);
        let (canvas, _) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), canvas_h), Sense::hover());
        ui.painter().rect_filled(canvas, 4.0, DARK_BG_0);

        if state.loading {
            ui.painter().text(
                canvas.center() + Vec2::new(0.0, 32.0),
                Align2::CENTER_CENTER,
                "Loading preview…",
                FontId::proportional(12.0),
                DARK_TEXT_DIM,
            );
            ui.put(
                Rect::from_center_size(canvas.center(), Vec2::splat(28.0)),
                egui::Spinner::new().size(28.0),
            );
        } else {
            // Placeholder video frame: play glyph over black.
            let painter = ui.painter();
            let c = canvas.center();
            let r = 18.0;
            painter.circle_stroke(c, r + 8.0, Stroke::new(1.5, DARK_TEXT_DIM));
            painter.add(egui::Shape::convex_polygon(
                vec![
                    c + Vec2::new(-r * 0.5, -r * 0.8),
                    c + Vec2::new(r * 0.9, 0.0),
                    c + Vec2::new(-r * 0.5, r * 0.8),
                ],
                DARK_TEXT,
                Stroke::NONE,
            ));
        }

        // ── Footer ───────────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.set_height(FOOTER_H);
            if let Some(url) = &state.embed_url {
                ui.hyperlink_to(RichText::new("Open player ↗").size(11.0), url);
            }
        });

        // ── Enter/leave diff ─────────────────────────────────────────────────
        let inside = ui.rect_contains_pointer(panel_rect);
        if inside != self.prev_inside {
            cmd.push(if inside {
                PanelCommand::PanelEnter
            } else {
                PanelCommand::PanelLeave
            });
            self.prev_inside = inside;
        }
    }
}
