//! Pointer gesture interpretation.
//!
//! All transitions go through [`GestureStateMachine::handle`]. The machine
//! never touches the axis or the series itself: it reads them through a
//! [`GestureContext`] and reports what should happen as a [`GestureOutcome`].
//! After the owner applies an outcome that changes the axis it calls
//! [`GestureStateMachine::refresh_pointer`] so hover state follows the new
//! pixel positions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::EntryKind;
use crate::timeline::{BandLayout, IntervalSeries, TimeAxis};

use super::state::{GestureState, HoveredEntry, PointerState, TagDrag, ZoomDrag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    #[serde(rename_all = "camelCase")]
    Down {
        x: f64,
        y: f64,
        button: PointerButton,
        /// Zoom modifier (shift) held.
        modifier: bool,
    },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    DoubleClick { x: f64, y: f64 },
    #[serde(rename_all = "camelCase")]
    Wheel {
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
    },
    ContextMenu { x: f64, y: f64 },
}

/// Requests produced by a gesture, applied by the owner of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureOutcome {
    #[serde(rename_all = "camelCase")]
    Zoom {
        zooming_in: bool,
        anchor: NaiveDateTime,
    },
    #[serde(rename_all = "camelCase")]
    Pan { moving_left: bool },
    SetBoundaries {
        start: NaiveDateTime,
        stop: NaiveDateTime,
    },
    CreateTaggedEntry {
        start: NaiveDateTime,
        stop: NaiveDateTime,
    },
    EditTaggedEntry { id: i64 },
}

/// Read-only view of the timeline a gesture is interpreted against.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub axis: &'a TimeAxis,
    pub layout: &'a BandLayout,
    pub tagged: &'a IntervalSeries,
    pub logged: &'a IntervalSeries,
}

impl GestureContext<'_> {
    fn hovered_at(&self, x: f64, y: f64) -> Option<HoveredEntry> {
        let kind = self.layout.band_at(y)?;
        let series = match kind {
            EntryKind::Tagged => self.tagged,
            EntryKind::Logged => self.logged,
            EntryKind::Activity => return None,
        };
        series
            .hit_test(x)
            .map(|index| HoveredEntry { kind, index })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureStateMachine {
    state: GestureState,
    pointer: Option<PointerState>,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// `None` while the pointer is outside the canvas.
    pub fn pointer(&self) -> Option<&PointerState> {
        self.pointer.as_ref()
    }

    /// Drop every gesture and hover, e.g. when the day changes.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        if let Some(pointer) = self.pointer.as_mut() {
            pointer.hovered = None;
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        context: &GestureContext<'_>,
    ) -> Option<GestureOutcome> {
        match event {
            PointerEvent::Move { x, y } => {
                self.on_move(x, y, context);
                None
            }
            PointerEvent::Down {
                x,
                y,
                button: PointerButton::Primary,
                modifier,
            } => {
                self.on_primary_down(x, y, modifier, context);
                None
            }
            PointerEvent::Down { .. } => None,
            PointerEvent::Up { x, y } => self.on_up(x, y, context),
            PointerEvent::Leave => {
                self.on_leave();
                None
            }
            PointerEvent::DoubleClick { .. } => self.on_double_click(),
            PointerEvent::Wheel {
                x,
                y,
                delta_x,
                delta_y,
            } => {
                self.update_pointer(x, y, context);
                if delta_y != 0.0 {
                    Some(GestureOutcome::Zoom {
                        zooming_in: delta_y < 0.0,
                        anchor: context.axis.pixel_to_time(x),
                    })
                } else if delta_x != 0.0 {
                    Some(GestureOutcome::Pan {
                        moving_left: delta_x < 0.0,
                    })
                } else {
                    None
                }
            }
            PointerEvent::ContextMenu { x, y } => self.on_context_menu(x, y, context),
        }
    }

    /// Recompute hover and crosshair for the last pointer position against
    /// a changed axis or changed series.
    pub fn refresh_pointer(&mut self, context: &GestureContext<'_>) {
        if let Some(pointer) = self.pointer {
            self.update_pointer(pointer.x, pointer.y, context);
        }
    }

    fn on_move(&mut self, x: f64, y: f64, context: &GestureContext<'_>) {
        if let GestureState::ZoomDragging(drag) = &mut self.state {
            drag.current_x = x;
        } else if matches!(self.state, GestureState::Idle) {
            self.state = GestureState::Hovering;
        }
        self.update_pointer(x, y, context);
    }

    fn on_primary_down(&mut self, x: f64, y: f64, modifier: bool, context: &GestureContext<'_>) {
        if self.state.is_dragging() {
            return;
        }
        self.update_pointer(x, y, context);

        self.state = if modifier {
            GestureState::ZoomDragging(ZoomDrag {
                initial_x: x,
                current_x: x,
            })
        } else {
            let initial = self
                .pointer
                .map(|pointer| pointer.crosshair)
                .unwrap_or_else(|| context.axis.pixel_to_time(x));
            let range = context.tagged.free_range_around(
                initial,
                context.axis.boundary_start(),
                context.axis.boundary_stop(),
            );
            GestureState::TagDragging(TagDrag::begin(initial, range))
        };
    }

    fn on_up(&mut self, x: f64, y: f64, context: &GestureContext<'_>) -> Option<GestureOutcome> {
        match self.state {
            GestureState::ZoomDragging(drag) => {
                self.state = GestureState::Idle;
                self.update_pointer(x, y, context);

                let a = context.axis.pixel_to_time(drag.initial_x);
                let b = context.axis.pixel_to_time(x);
                if a == b {
                    return None;
                }
                Some(GestureOutcome::SetBoundaries {
                    start: a.min(b),
                    stop: a.max(b),
                })
            }
            GestureState::TagDragging(mut drag) => {
                drag.drag_to(context.axis.pixel_to_time(x));
                if drag.is_click() {
                    self.state = GestureState::TagDragHeldForDoubleClick(drag.held_range());
                    self.update_pointer(x, y, context);
                    return None;
                }

                self.state = GestureState::Idle;
                self.update_pointer(x, y, context);
                Some(GestureOutcome::CreateTaggedEntry {
                    start: drag.start,
                    stop: drag.stop,
                })
            }
            _ => None,
        }
    }

    fn on_leave(&mut self) {
        self.pointer = None;
        if !self.state.is_dragging() {
            self.state = GestureState::Idle;
        }
    }

    fn on_double_click(&mut self) -> Option<GestureOutcome> {
        let GestureState::TagDragHeldForDoubleClick(held) = self.state else {
            return None;
        };
        self.state = GestureState::Idle;
        if held.start >= held.stop {
            return None;
        }
        Some(GestureOutcome::CreateTaggedEntry {
            start: held.start,
            stop: held.stop,
        })
    }

    fn on_context_menu(
        &mut self,
        x: f64,
        y: f64,
        context: &GestureContext<'_>,
    ) -> Option<GestureOutcome> {
        if context.layout.band_at(y) != Some(EntryKind::Tagged) {
            return None;
        }
        let index = context.tagged.hit_test(x)?;
        let id = context.tagged.get(index)?.tagged_id()?;
        Some(GestureOutcome::EditTaggedEntry { id })
    }

    fn update_pointer(&mut self, x: f64, y: f64, context: &GestureContext<'_>) {
        let time = context.axis.pixel_to_time(x);
        let crosshair = match &mut self.state {
            GestureState::TagDragging(drag) => drag.drag_to(time),
            _ => context.tagged.snap_time(time).unwrap_or(time),
        };

        self.pointer = Some(PointerState {
            x,
            y,
            time,
            crosshair,
            hovered: context.hovered_at(x, y),
        });
    }
}
