// src/modules/mod.rs
//
// Module registry. To add a new surface:
//   1. Create modules/mysurface.rs implementing UiModule
//   2. Add `pub mod mysurface;` below
//   3. Call it from the update loop in app.rs

pub mod panel;
pub mod settings_modal;
pub mod sidebar;

use egui::Ui;
use streampeek_core::commands::PanelCommand;
use streampeek_core::{geometry, PreviewController};

use crate::follows::FollowList;

/// egui geometry → controller geometry. The core crate has no egui
/// dependency, so the boundary conversion lives here.
pub fn core_rect(r: egui::Rect) -> geometry::Rect {
    geometry::Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn core_pos(p: egui::Pos2) -> geometry::Pos {
    geometry::Pos::new(p.x, p.y)
}

/// Every overlay surface implements this trait. app.rs owns the containers
/// (side panel, floating area, modal) and hands each module its `Ui`.
/// Modules read controller state, emit commands — they never mutate state
/// directly (app.rs processes the commands after the UI pass).
pub trait UiModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui: &mut Ui,
        ctrl: &PreviewController,
        follows: &FollowList,
        cmd: &mut Vec<PanelCommand>,
    );
}
