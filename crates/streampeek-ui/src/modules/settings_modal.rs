// src/modules/settings_modal.rs
//
// Settings form shown in a modal. Edits happen in string buffers so the
// user can type freely; nothing touches the store until Save, and values
// that fail to parse or fall outside the accepted ranges are simply left
// at their previous setting.

use egui::{RichText, Ui};
use streampeek_core::commands::PanelCommand;
use streampeek_core::PreviewController;

use super::UiModule;
use crate::follows::FollowList;
use crate::theme::DARK_TEXT_DIM;

#[derive(Default)]
pub struct SettingsModal {
    width: String,
    height: String,
    hover_ms: String,
    hide_ms: String,
    blocked: String,
    was_open: bool,
    refresh: bool,
}

impl SettingsModal {
    /// Forget that the modal was showing. app.rs calls this while the modal
    /// is closed so the next opening re-reads the store into the buffers.
    pub fn reset(&mut self) {
        self.was_open = false;
    }

    fn refresh_from(&mut self, ctrl: &PreviewController) {
        let s = ctrl.settings();
        self.width = s.panel_width().to_string();
        self.height = s.panel_height().to_string();
        self.hover_ms = s.hover_delay_ms().to_string();
        self.hide_ms = s.hide_delay_ms().to_string();
        self.blocked = s
            .blocked_routes()
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
    }

    fn labeled_field(ui: &mut Ui, label: &str, buf: &mut String, hint: &str) {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(buf).desired_width(80.0));
        ui.label(RichText::new(hint).size(11.0).color(DARK_TEXT_DIM));
        ui.end_row();
    }
}

impl UiModule for SettingsModal {
    fn name(&self) -> &str {
        "Settings"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        ctrl: &PreviewController,
        _follows: &FollowList,
        cmd: &mut Vec<PanelCommand>,
    ) {
        // Only called while the modal is showing, so "first call since
        // reset" is the opening edge.
        if !self.was_open || self.refresh {
            self.refresh_from(ctrl);
            self.refresh = false;
        }
        self.was_open = true;

        ui.set_width(320.0);
        ui.heading("Preview settings");
        ui.add_space(8.0);

        egui::Grid::new("settings_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                Self::labeled_field(ui, "Panel width (px)", &mut self.width, "200–1200");
                Self::labeled_field(ui, "Panel height (px)", &mut self.height, "150–800");
                Self::labeled_field(ui, "Hover delay (ms)", &mut self.hover_ms, "0–5000");
                Self::labeled_field(ui, "Hide delay (ms)", &mut self.hide_ms, "0–5000");
            });

        ui.add_space(8.0);
        ui.label("Blocked routes (one per line)");
        ui.add(
            egui::TextEdit::multiline(&mut self.blocked)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.label(
            RichText::new("Links to these paths never open a preview.")
                .size(11.0)
                .color(DARK_TEXT_DIM),
        );

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                cmd.push(PanelCommand::ApplySettings {
                    panel_width: self.width.trim().parse().ok(),
                    panel_height: self.height.trim().parse().ok(),
                    hover_delay_ms: self.hover_ms.trim().parse().ok(),
                    hide_delay_ms: self.hide_ms.trim().parse().ok(),
                    // Newline-separated in the box, but commas work too.
                    blocked_routes: self
                        .blocked
                        .split([',', '\n'])
                        .map(str::to_owned)
                        .collect(),
                });
                cmd.push(PanelCommand::ToggleSettings);
            }
            if ui.button("Reset to defaults").clicked() {
                cmd.push(PanelCommand::ResetSettings);
                // Store updates after the UI pass; re-read it next frame.
                self.refresh = true;
            }
            if ui.button("Cancel").clicked() {
                cmd.push(PanelCommand::ToggleSettings);
            }
        });
    }
}
