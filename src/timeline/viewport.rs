//! Zoom, pan and explicit range changes.
//!
//! Every operation takes the current axis and returns the next one. `None`
//! means the request was refused and the caller keeps what it had.

use chrono::{Duration, NaiveDateTime};

use crate::models::{CalendarDay, MAX_BOUNDARY_MS};
use crate::settings::TimelineSettings;
use crate::timeline::axis::TimeAxis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    zoom_factor: f64,
    move_factor: f64,
    minimum_zoom_step_ms: i64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&TimelineSettings::default())
    }
}

impl ViewportController {
    pub fn new(settings: &TimelineSettings) -> Self {
        Self {
            zoom_factor: settings.zoom_factor,
            move_factor: settings.move_factor,
            minimum_zoom_step_ms: settings.minimum_zoom_step_ms,
        }
    }

    /// Zoom about `anchor`, keeping its relative position in the viewport.
    ///
    /// Zooming in stops once a step would be shorter than the minimum zoom
    /// step. Zooming out stops once the viewport spans the whole day; a step
    /// that would overshoot lands exactly on the full day instead.
    pub fn zoom(&self, axis: &TimeAxis, zooming_in: bool, anchor: NaiveDateTime) -> Option<TimeAxis> {
        let day = axis.day();
        let delta_ms = axis.boundary_delta().num_milliseconds();
        let step_ms = (delta_ms as f64 * self.zoom_factor).round() as i64;

        let new_delta_ms = if zooming_in {
            if step_ms < self.minimum_zoom_step_ms {
                return None;
            }
            delta_ms - step_ms
        } else {
            if delta_ms >= MAX_BOUNDARY_MS {
                return None;
            }
            let grown = delta_ms + step_ms;
            if grown >= MAX_BOUNDARY_MS {
                let start = day.start_of_day();
                return axis.with_boundaries(start, start + Duration::milliseconds(MAX_BOUNDARY_MS));
            }
            grown
        };
        if new_delta_ms <= 0 {
            return None;
        }

        let anchor = axis.day().clamp(anchor);
        let old_offset_ms = (anchor - axis.boundary_start()).num_milliseconds();
        let relative = old_offset_ms as f64 / delta_ms as f64;
        let new_offset_ms = (new_delta_ms as f64 * relative).floor() as i64;
        let start = axis.boundary_start() + Duration::milliseconds(old_offset_ms - new_offset_ms);

        let (start, stop) = clamp_window(day, start, Duration::milliseconds(new_delta_ms));
        axis.with_boundaries(start, stop)
    }

    /// Shift the viewport by a fraction of its width, never past the day edges.
    pub fn pan(&self, axis: &TimeAxis, moving_left: bool) -> Option<TimeAxis> {
        let day = axis.day();
        let desired_ms = (axis.boundary_delta().num_milliseconds() as f64 * self.move_factor).round() as i64;

        let room = if moving_left {
            axis.boundary_start() - day.start_of_day()
        } else {
            day.end_of_day() - axis.boundary_stop()
        };
        let step = Duration::milliseconds(desired_ms).min(room);
        if step <= Duration::zero() {
            return None;
        }

        let step = if moving_left { -step } else { step };
        axis.with_boundaries(axis.boundary_start() + step, axis.boundary_stop() + step)
    }

    /// Replace the viewport. Refused unless `start < stop` and both are
    /// within the day.
    pub fn set_boundaries(
        &self,
        axis: &TimeAxis,
        start: NaiveDateTime,
        stop: NaiveDateTime,
    ) -> Option<TimeAxis> {
        axis.with_boundaries(start, stop)
    }

    /// Move the viewport so `time` sits in its middle, keeping its width.
    pub fn centre_on(&self, axis: &TimeAxis, time: NaiveDateTime) -> TimeAxis {
        let delta = axis.boundary_delta();
        let start = time - delta / 2;
        let (start, stop) = clamp_window(axis.day(), start, delta);
        axis.with_boundaries(start, stop).unwrap_or(*axis)
    }
}

/// Shift a window of width `delta` starting at `start` until it fits in `day`.
fn clamp_window(
    day: CalendarDay,
    start: NaiveDateTime,
    delta: Duration,
) -> (NaiveDateTime, NaiveDateTime) {
    let mut start = start.max(day.start_of_day());
    let mut stop = start + delta;
    if stop > day.end_of_day() {
        stop = day.end_of_day();
        start = (stop - delta).max(day.start_of_day());
    }
    (start, stop)
}
