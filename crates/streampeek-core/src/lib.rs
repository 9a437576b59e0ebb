// crates/streampeek-core/src/lib.rs
//
// No egui dependency — pure hover/show/hide/drag logic over plain geometry
// and deadline types. The UI crate feeds pointer events in and renders
// whatever PanelState says.
//
// To add a new panel behaviour:
//   1. Add the state field / deadline to controller.rs
//   2. Add a PanelCommand variant in commands.rs
//   3. Handle it in streampeek-ui/src/app.rs

pub mod commands;
pub mod controller;
pub mod drag;
pub mod embed;
pub mod geometry;
pub mod links;
pub mod settings;
pub mod state;
pub mod timers;

// Re-export the main public API so streampeek-ui imports are simple.
pub use controller::PreviewController;
pub use links::ChannelId;
pub use settings::{KvStore, Settings, SettingsStore};
pub use state::PanelState;
