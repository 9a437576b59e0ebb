// src/modules/sidebar.rs
//
// The left channel rail. Every row carries a site-relative href; hover
// transitions are diffed per frame and run through the link classifier
// before anything reaches the controller.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use streampeek_core::commands::PanelCommand;
use streampeek_core::links::{extract_channel_id, is_sidebar_link};
use streampeek_core::{ChannelId, PreviewController};

use super::UiModule;
use crate::follows::FollowList;
use crate::theme::{DARK_BG_3, DARK_TEXT, DARK_TEXT_DIM, LIVE_RED};

const ROW_H: f32 = 30.0;

/// Static navigation entries above the follow list. Their hrefs are real
/// blocked routes, so hovering them exercises the classifier's rejection
/// path at runtime rather than just in tests.
const NAV_ROWS: [(&str, &str); 3] = [
    ("Directory", "/directory"),
    ("Search", "/search"),
    ("Settings", "/settings"),
];

#[derive(Default)]
pub struct SidebarModule {
    /// href of the row the pointer was on last frame — the diff against the
    /// current frame synthesizes hover-in / hover-out events.
    prev_href: Option<String>,
    follow_input: String,
}

impl SidebarModule {
    /// One rail row. Returns (row response, clicked unfollow) — the ✕ is
    /// only drawn for channel rows.
    fn row(
        ui: &mut Ui,
        label: &str,
        live: bool,
        closable: bool,
    ) -> (egui::Response, bool) {
        let width = ui.available_width();
        let (rect, resp) = ui.allocate_exact_size(Vec2::new(width, ROW_H), Sense::click());
        let painter = ui.painter();

        if resp.hovered() {
            painter.rect_filled(rect, 4.0, DARK_BG_3);
        }

        let mut x = rect.left() + 10.0;
        if live {
            painter.circle_filled(Pos2::new(x, rect.center().y), 3.5, LIVE_RED);
            x += 10.0;
        }
        painter.text(
            Pos2::new(x, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            if resp.hovered() { DARK_TEXT } else { DARK_TEXT_DIM },
        );

        let mut unfollow = false;
        if closable && resp.hovered() {
            let cx = Pos2::new(rect.right() - 14.0, rect.center().y);
            let x_rect = Rect::from_center_size(cx, Vec2::splat(16.0));
            let x_resp = ui.interact(x_rect, resp.id.with("unfollow"), Sense::click());
            let col = if x_resp.hovered() { Color32::WHITE } else { DARK_TEXT_DIM };
            painter.line_segment(
                [cx + Vec2::new(-4.0, -4.0), cx + Vec2::new(4.0, 4.0)],
                Stroke::new(1.5, col),
            );
            painter.line_segment(
                [cx + Vec2::new(4.0, -4.0), cx + Vec2::new(-4.0, 4.0)],
                Stroke::new(1.5, col),
            );
            unfollow = x_resp.clicked();
        }

        (resp, unfollow)
    }
}

impl UiModule for SidebarModule {
    fn name(&self) -> &str {
        "Sidebar"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        ctrl: &PreviewController,
        follows: &FollowList,
        cmd: &mut Vec<PanelCommand>,
    ) {
        // The rail itself is the "nav landmark" the classifier inspects.
        let nav_rect = super::core_rect(ui.max_rect());

        let mut hovered_now: Option<(String, Rect)> = None;

        ui.add_space(4.0);
        ui.label(egui::RichText::new("BROWSE").size(11.0).strong().color(DARK_TEXT_DIM));
        for (label, href) in NAV_ROWS {
            let (resp, _) = Self::row(ui, label, false, false);
            if resp.hovered() {
                hovered_now = Some((href.to_string(), resp.rect));
            }
            // The Settings nav row doubles as the modal's entry point.
            if resp.clicked() && href == "/settings" {
                cmd.push(PanelCommand::ToggleSettings);
            }
        }

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("FOLLOWED CHANNELS")
                .size(11.0)
                .strong()
                .color(DARK_TEXT_DIM),
        );

        if follows.is_empty() {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("Follow a channel below to get hover previews.")
                    .size(12.0)
                    .color(DARK_TEXT_DIM),
            );
        }

        for channel in follows.channels().to_vec() {
            let (resp, unfollow) = Self::row(ui, channel.as_str(), true, true);
            if resp.hovered() {
                hovered_now = Some((format!("/{channel}"), resp.rect));
            }
            if unfollow {
                cmd.push(PanelCommand::Unfollow(channel));
            }
        }

        // ── Hover diff → pointer events ──────────────────────────────────────
        let now_href = hovered_now.as_ref().map(|(href, _)| href.clone());
        if self.prev_href != now_href {
            if self.prev_href.is_some() {
                cmd.push(PanelCommand::LinkOut);
            }
            if let Some((href, rect)) = &hovered_now {
                if is_sidebar_link(Some(nav_rect)) {
                    if let Some(channel) =
                        extract_channel_id(href, ctrl.settings().blocked_routes())
                    {
                        cmd.push(PanelCommand::HoverLink {
                            channel,
                            link_rect: super::core_rect(*rect),
                        });
                    }
                }
            }
            self.prev_href = now_href;
        }

        // ── Follow input ─────────────────────────────────────────────────────
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.follow_input)
                    .hint_text("channel name")
                    .desired_width(ui.available_width() - 70.0),
            );
            let submitted =
                edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Follow").clicked() || submitted {
                // Invalid names are silently ignored — same degrade-to-nothing
                // rule as every other malformed input here.
                if let Some(channel) = ChannelId::new(self.follow_input.trim()) {
                    cmd.push(PanelCommand::Follow(channel));
                    self.follow_input.clear();
                }
            }
        });
    }
}
