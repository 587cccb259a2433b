//! Engine behind the mtag day timeline.
//!
//! The host owns the canvases and the event loop. It forwards pointer,
//! wheel, resize and date events into a [`TimelineController`] and draws
//! through its own [`render::DrawSurface`] implementation.

pub mod api;
pub mod categories;
pub mod controller;
pub mod gesture;
pub mod minimap;
pub mod models;
pub mod render;
pub mod settings;
pub mod timeline;
pub mod utils;

pub use api::{HttpTimelineApi, TimelineApi};
pub use controller::{LoadOutcome, LoadTicket, TimelineController, TimelineState};
pub use gesture::{GestureOutcome, GestureState, GestureStateMachine, PointerButton, PointerEvent};
pub use minimap::{Minimap, MinimapPointer};
pub use models::{CalendarDay, EntryKind, EntryPayload, IntervalRecord};
pub use settings::{SettingsStore, TimelineSettings};
pub use timeline::{IntervalSeries, TimeAxis, ViewportController};
pub use utils::init_logging;
