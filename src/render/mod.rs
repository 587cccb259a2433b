pub mod minimap;
pub mod overlay;
pub mod palette;
pub mod surface;
pub mod timeline;

pub use minimap::render_minimap;
pub use overlay::{render_overlay, tooltip_box, OverlayScene, TooltipBox};
pub use surface::{DrawCall, DrawSurface, RecordingSurface, Rgba, TextAlign, TextMetrics};
pub use timeline::{render_timeline, TimelineScene};
