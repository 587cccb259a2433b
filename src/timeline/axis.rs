//! Time ↔ pixel conversion for one canvas.
//!
//! A [`TimeAxis`] is an immutable snapshot: the visible range, the canvas
//! width and the derived scale are computed together in [`TimeAxis::build`],
//! and every change produces a new axis. There is no separate "update" step
//! that callers could forget.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::models::CalendarDay;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    day: CalendarDay,
    boundary_start: NaiveDateTime,
    boundary_stop: NaiveDateTime,
    canvas_width: f64,
    side_padding: f64,
    // Derived
    delta_ms: f64,
    drawable_width: f64,
}

impl TimeAxis {
    /// Axis showing the whole day, `00:00:00.000` to `23:59:59.999`.
    pub fn full_day(day: CalendarDay, canvas_width: f64, side_padding: f64) -> Self {
        Self::build(
            day,
            day.start_of_day(),
            day.end_of_day(),
            canvas_width,
            side_padding,
        )
    }

    /// Axis over an explicit range. Returns `None` unless
    /// `start < stop` and both lie within the day.
    pub fn new(
        day: CalendarDay,
        start: NaiveDateTime,
        stop: NaiveDateTime,
        canvas_width: f64,
        side_padding: f64,
    ) -> Option<Self> {
        if start >= stop || !day.contains(start) || !day.contains(stop) {
            return None;
        }
        Some(Self::build(day, start, stop, canvas_width, side_padding))
    }

    fn build(
        day: CalendarDay,
        boundary_start: NaiveDateTime,
        boundary_stop: NaiveDateTime,
        canvas_width: f64,
        side_padding: f64,
    ) -> Self {
        let canvas_width = canvas_width.max(0.0);
        let delta_ms = (boundary_stop - boundary_start).num_milliseconds() as f64;
        Self {
            day,
            boundary_start,
            boundary_stop,
            canvas_width,
            side_padding,
            delta_ms,
            drawable_width: canvas_width - side_padding * 2.0,
        }
    }

    /// Same scale and padding, new range. See [`TimeAxis::new`] for validity.
    pub fn with_boundaries(&self, start: NaiveDateTime, stop: NaiveDateTime) -> Option<Self> {
        Self::new(self.day, start, stop, self.canvas_width, self.side_padding)
    }

    /// Same range, new canvas width.
    pub fn with_canvas_width(&self, canvas_width: f64) -> Self {
        Self::build(
            self.day,
            self.boundary_start,
            self.boundary_stop,
            canvas_width,
            self.side_padding,
        )
    }

    pub fn day(&self) -> CalendarDay {
        self.day
    }

    pub fn boundary_start(&self) -> NaiveDateTime {
        self.boundary_start
    }

    pub fn boundary_stop(&self) -> NaiveDateTime {
        self.boundary_stop
    }

    pub fn boundary_delta(&self) -> Duration {
        self.boundary_stop - self.boundary_start
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn side_padding(&self) -> f64 {
        self.side_padding
    }

    /// Width between the two padding strips.
    pub fn drawable_width(&self) -> f64 {
        self.drawable_width
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.boundary_start <= time && time <= self.boundary_stop
    }

    /// Horizontal position of `time`. Not clamped: times outside the
    /// viewport map outside the drawable area.
    pub fn time_to_pixel(&self, time: NaiveDateTime) -> f64 {
        let offset_ms = (time - self.boundary_start).num_milliseconds() as f64;
        self.side_padding + offset_ms / self.delta_ms * self.drawable_width
    }

    /// Time under `x`. Anything at or beyond the padding edges maps exactly
    /// to the boundary on that side.
    pub fn pixel_to_time(&self, x: f64) -> NaiveDateTime {
        if x - self.side_padding <= 0.0 {
            return self.boundary_start;
        }
        if x >= self.canvas_width - self.side_padding {
            return self.boundary_stop;
        }

        let relative = (x - self.side_padding) / self.drawable_width;
        let offset_ms = (relative * self.delta_ms).round() as i64;
        (self.boundary_start + Duration::milliseconds(offset_ms)).min(self.boundary_stop)
    }

    /// Milliseconds of timeline covered by one pixel.
    pub fn ms_per_pixel(&self) -> f64 {
        if self.drawable_width <= 0.0 {
            return self.delta_ms;
        }
        self.delta_ms / self.drawable_width
    }
}
