//! Fixed colours of the timeline, overlay and minimap layers.

use super::surface::Rgba;

pub const BACKGROUND: Rgba = Rgba::rgb(255, 255, 255);
pub const FALLBACK_ENTRY: Rgba = Rgba::rgb(128, 128, 128);
pub const SIDE_PADDING: Rgba = Rgba::rgba(128, 128, 128, 0.5);

pub const RULER_BACKGROUND: Rgba = Rgba::rgb(0x59, 0x59, 0x59);
pub const RULER_TICK: Rgba = Rgba::rgb(0xb3, 0xb3, 0xb3);
pub const RULER_HOUR_LABEL: Rgba = Rgba::rgb(0xe6, 0xe6, 0x4c);
pub const RULER_LABEL: Rgba = Rgba::rgb(0x33, 0xcc, 0xff);

pub const CROSSHAIR: Rgba = Rgba::rgb(0x44, 0x44, 0x44);
pub const ZOOM_SELECTION: Rgba = Rgba::rgba(51, 154, 51, 0.4);
pub const TAG_SELECTION: Rgba = Rgba::rgba(51, 51, 51, 0.4);
pub const HOVER_HIGHLIGHT: Rgba = Rgba::rgba(179, 179, 179, 0.7);
pub const TOOLTIP_BACKGROUND: Rgba = Rgba::rgba(75, 75, 175, 0.75);
pub const TOOLTIP_BORDER: Rgba = Rgba::rgba(205, 154, 51, 0.8);
pub const TOOLTIP_TEXT: Rgba = Rgba::rgb(255, 255, 0);

pub const MINIMAP_HOUR_LABEL: Rgba = Rgba::rgb(0x77, 0x77, 0x77);
pub const MINIMAP_TAGGED: Rgba = Rgba::rgb(255, 163, 0);
pub const MINIMAP_LOGGED: Rgba = Rgba::rgb(77, 77, 205);
pub const MINIMAP_VIEWPORT: Rgba = Rgba::rgba(102, 102, 102, 0.5);
