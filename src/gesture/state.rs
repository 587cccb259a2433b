use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::EntryKind;

/// Press position and live position of a modifier-drag, in raw pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomDrag {
    pub initial_x: f64,
    pub current_x: f64,
}

/// A drag selecting the span of a new tagged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDrag {
    pub initial: NaiveDateTime,
    /// Free range around `initial`; the live endpoint never leaves it.
    pub range_start: NaiveDateTime,
    pub range_stop: NaiveDateTime,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl TagDrag {
    pub fn begin(initial: NaiveDateTime, range: (NaiveDateTime, NaiveDateTime)) -> Self {
        let (range_start, range_stop) = range;
        Self {
            initial,
            range_start,
            range_stop,
            start: initial,
            stop: initial,
        }
    }

    /// Move the live endpoint to `time`, clamped into the free range.
    /// Returns the endpoint actually used.
    pub fn drag_to(&mut self, time: NaiveDateTime) -> NaiveDateTime {
        let endpoint = time.clamp(self.range_start, self.range_stop);
        self.start = self.initial.min(endpoint);
        self.stop = self.initial.max(endpoint);
        endpoint
    }

    pub fn is_click(&self) -> bool {
        self.start == self.stop
    }

    pub fn held_range(&self) -> HeldRange {
        HeldRange {
            start: self.range_start,
            stop: self.range_stop,
        }
    }
}

/// Range kept after a zero-length tag click, offered to a following
/// double-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldRange {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GestureState {
    Idle,
    Hovering,
    ZoomDragging(ZoomDrag),
    TagDragging(TagDrag),
    TagDragHeldForDoubleClick(HeldRange),
}

impl Default for GestureState {
    fn default() -> Self {
        GestureState::Idle
    }
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            GestureState::ZoomDragging(_) | GestureState::TagDragging(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoveredEntry {
    pub kind: EntryKind,
    /// Index into the series' records.
    pub index: usize,
}

/// Where the pointer is and what the overlay should show for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    /// Time directly under the pointer.
    pub time: NaiveDateTime,
    /// Time the crosshair is drawn at: snapped to a tagged edge while
    /// hovering, clamped to the free range while tag-dragging.
    pub crosshair: NaiveDateTime,
    pub hovered: Option<HoveredEntry>,
}
