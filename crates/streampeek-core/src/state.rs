// crates/streampeek-core/src/state.rs
//
// What the presentation layer needs to render the preview panel. Runtime-only
// — never serialized. Mutated exclusively by PreviewController so the
// invariants below hold everywhere the UI looks.
//
// Invariants:
//   channel == None  ⇒  visible == false and embed_url == None
//   pinned           ⇒  no hide is ever scheduled
//   dragging         ⇒  no hide is ever scheduled (flag lives on DragController)

use crate::geometry::Pos;
use crate::links::ChannelId;

#[derive(Debug, Default)]
pub struct PanelState {
    /// Channel currently shown (or being torn down). None = fully hidden.
    pub channel: Option<ChannelId>,
    /// True between show and the 800 ms settle deadline — the UI paints a
    /// spinner overlay while set.
    pub loading: bool,
    pub visible: bool,
    /// Suppresses all automatic hiding until explicitly un-set.
    pub pinned: bool,
    /// The settings form is an independent surface — the panel's own
    /// hide/show logic keeps running while it is open.
    pub settings_open: bool,
    /// Panel top-left in screen coordinates.
    pub position: Pos,
    /// Source currently assigned to the embed surface. Cleared together with
    /// `channel` at teardown.
    pub embed_url: Option<String>,
}
