// src/app.rs
//
// Application root. One frame is:
//   1. route global pointer input to the drag controller
//   2. run the UI modules, collecting PanelCommands
//   3. process the commands against the controller
//   4. tick the controller's deadlines and schedule the next repaint
//
// Commands are reordered through order_for_dispatch before processing, so a
// pointer crossing between link and panel within a single frame resolves the
// same way no matter which module ran first.

use std::time::Instant;

use egui::{CornerRadius, Stroke};
use streampeek_core::commands::{order_for_dispatch, PanelCommand};
use streampeek_core::geometry::Size;
use streampeek_core::{PreviewController, SettingsStore};

use crate::follows::FollowList;
use crate::modules::panel::PanelModule;
use crate::modules::settings_modal::SettingsModal;
use crate::modules::sidebar::SidebarModule;
use crate::modules::{core_pos, UiModule};
use crate::storage::JsonFileStore;
use crate::theme::{DARK_BG_1, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM};
use crate::{paths, speek_log};

const SIDEBAR_WIDTH: f32 = 240.0;

/// Host name reported to the player as the embedding parent.
const PARENT_HOST: &str = "localhost";

pub struct StreamPeekApp {
    ctrl:           PreviewController,
    follows:        FollowList,
    sidebar:        SidebarModule,
    panel:          PanelModule,
    settings_modal: SettingsModal,
}

impl StreamPeekApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings =
            SettingsStore::load(Box::new(JsonFileStore::open(paths::settings_file())));
        let follows = FollowList::load(Box::new(JsonFileStore::open(paths::follows_file())));
        speek_log!("[app] started, data dir {}", paths::app_data_dir().display());

        Self {
            ctrl: PreviewController::new(settings, PARENT_HOST),
            follows,
            sidebar: SidebarModule::default(),
            panel: PanelModule::default(),
            settings_modal: SettingsModal::default(),
        }
    }

    fn process_command(
        &mut self,
        ctx: &egui::Context,
        cmd: PanelCommand,
        now: Instant,
        viewport: Size,
    ) {
        match cmd {
            PanelCommand::HoverLink { channel, link_rect } => {
                self.ctrl.on_link_hover(channel, link_rect, now)
            }
            PanelCommand::LinkOut => self.ctrl.on_link_out(now),
            PanelCommand::PanelEnter => self.ctrl.on_panel_enter(),
            PanelCommand::PanelLeave => self.ctrl.on_panel_leave(now),
            PanelCommand::TogglePin => self.ctrl.toggle_pin(),
            PanelCommand::ToggleSettings => self.ctrl.toggle_settings(),
            PanelCommand::ClosePanel => self.ctrl.close(now),
            PanelCommand::OpenChannelPage => {
                if let Some(url) = self.ctrl.channel_page_url() {
                    ctx.open_url(egui::OpenUrl::new_tab(url));
                }
            }
            PanelCommand::BeginDrag { pointer, panel_rect } => {
                self.ctrl.begin_drag(pointer, panel_rect, now)
            }
            PanelCommand::DragTo { pointer } => self.ctrl.drag_to(pointer, viewport),
            PanelCommand::EndDrag { pointer } => self.ctrl.end_drag(pointer, now),
            PanelCommand::ApplySettings {
                panel_width,
                panel_height,
                hover_delay_ms,
                hide_delay_ms,
                blocked_routes,
            } => {
                let s = self.ctrl.settings_mut();
                if let Some(v) = panel_width {
                    s.set_panel_width(v);
                }
                if let Some(v) = panel_height {
                    s.set_panel_height(v);
                }
                if let Some(v) = hover_delay_ms {
                    s.set_hover_delay_ms(v);
                }
                if let Some(v) = hide_delay_ms {
                    s.set_hide_delay_ms(v);
                }
                s.set_blocked_routes(blocked_routes);
            }
            PanelCommand::ResetSettings => self.ctrl.settings_mut().reset_all(),
            PanelCommand::Follow(channel) => self.follows.follow(channel),
            PanelCommand::Unfollow(channel) => self.follows.unfollow(&channel),
        }
    }

    fn panel_frame(&self) -> egui::Frame {
        egui::Frame::new()
            .fill(DARK_BG_1)
            .stroke(Stroke::new(1.0, DARK_BORDER))
            .corner_radius(CornerRadius::same(6))
            .inner_margin(6)
            .shadow(egui::Shadow {
                offset: [0, 4],
                blur:   16,
                spread: 0,
                color:  egui::Color32::from_black_alpha(120),
            })
    }
}

impl eframe::App for StreamPeekApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let screen = ctx.screen_rect();
        let viewport = Size::new(screen.width(), screen.height());
        let mut cmd: Vec<PanelCommand> = Vec::new();

        // ── Global drag routing ──────────────────────────────────────────────
        // While a drag is live the pointer can leave every widget, so raw
        // pointer input is routed straight to the controller.
        if self.ctrl.is_dragging() {
            ctx.input(|i| {
                if let Some(p) = i.pointer.latest_pos() {
                    if i.pointer.primary_down() {
                        cmd.push(PanelCommand::DragTo { pointer: core_pos(p) });
                    } else {
                        cmd.push(PanelCommand::EndDrag { pointer: core_pos(p) });
                    }
                }
            });
        }

        // ── Preview panel ────────────────────────────────────────────────────
        let fade_id = egui::Id::new("panel_fade");
        if self.ctrl.state().visible {
            let opacity = ctx.animate_bool(fade_id, true);
            let pos = self.ctrl.state().position;
            let frame = self.panel_frame();
            egui::Area::new(egui::Id::new("preview_panel"))
                .order(egui::Order::Foreground)
                .fixed_pos(egui::pos2(pos.x, pos.y))
                .show(ctx, |ui| {
                    // Fading a panel mid-drag makes it chase the pointer
                    // half-transparent; snap to opaque instead.
                    if !self.ctrl.is_dragging() {
                        ui.set_opacity(opacity);
                    }
                    frame.show(ui, |ui| {
                        self.panel.ui(ui, &self.ctrl, &self.follows, &mut cmd);
                    });
                });
        } else {
            ctx.animate_bool(fade_id, false);
            self.panel.reset();
        }

        // ── Sidebar rail ─────────────────────────────────────────────────────
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .frame(egui::Frame::new().fill(DARK_BG_1).inner_margin(8))
            .show(ctx, |ui| {
                self.sidebar.ui(ui, &self.ctrl, &self.follows, &mut cmd);
            });

        // ── Main area ────────────────────────────────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(DARK_BG_2))
            .show(ctx, |ui| {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.heading("StreamPeek");
                    ui.label(
                        egui::RichText::new(
                            "Hover a followed channel in the rail to preview it.",
                        )
                        .color(DARK_TEXT_DIM),
                    );
                });
            });

        // ── Settings modal ───────────────────────────────────────────────────
        if self.ctrl.state().settings_open {
            let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
                self.settings_modal.ui(ui, &self.ctrl, &self.follows, &mut cmd);
            });
            if modal.should_close() {
                cmd.push(PanelCommand::ToggleSettings);
            }
        } else {
            self.settings_modal.reset();
        }

        // ── Commands, then deadlines ─────────────────────────────────────────
        for c in order_for_dispatch(cmd) {
            self.process_command(ctx, c, now, viewport);
        }
        self.ctrl.tick(now, viewport);

        if let Some(deadline) = self.ctrl.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
