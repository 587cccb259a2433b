//! Ruler tick spacing.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::timeline::axis::TimeAxis;
use crate::utils::time_text::hour_minute_text;

/// Used when the canvas has no width yet or the range is empty.
const FALLBACK_INCREMENT_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub time: NaiveDateTime,
    pub x: f64,
    pub label: String,
    pub is_hour: bool,
}

/// Minutes between ruler labels so that labels `label_width` pixels wide
/// (plus `label_padding`) never overlap.
///
/// The breakpoints are fixed: more than 59 minutes of label rounds up to the
/// next whole hour, then 60, 30, 15, 10, 5 and finally 1.
pub fn minute_increment(
    label_width: f64,
    label_padding: f64,
    canvas_width: f64,
    boundary_delta: Duration,
) -> i64 {
    let delta_seconds = boundary_delta.num_milliseconds() as f64 / 1000.0;
    if canvas_width <= 0.0 || delta_seconds <= 0.0 {
        return FALLBACK_INCREMENT_MINUTES;
    }
    let pixels_per_second = canvas_width / delta_seconds;
    let label_minutes = (label_width + label_padding) / pixels_per_second / 60.0;
    if !label_minutes.is_finite() || label_minutes < 0.0 {
        return FALLBACK_INCREMENT_MINUTES;
    }

    if label_minutes > 59.0 {
        ((label_minutes / 60.0).floor() as i64 + 1) * 60
    } else if label_minutes > 29.0 {
        60
    } else if label_minutes > 14.0 {
        30
    } else if label_minutes > 9.0 {
        15
    } else if label_minutes > 4.0 {
        10
    } else if label_minutes >= 1.0 {
        5
    } else {
        1
    }
}

/// Ticks from the top of the hour containing the viewport start until one
/// increment past its stop.
pub fn ticks(axis: &TimeAxis, increment_minutes: i64) -> Vec<Tick> {
    let increment = Duration::minutes(increment_minutes.max(1));
    let start = axis.boundary_start();
    let Some(mut current) = start
        .date()
        .and_hms_opt(start.hour(), 0, 0)
    else {
        return Vec::new();
    };
    let end = axis.boundary_stop() + increment;

    let mut ticks = Vec::new();
    while current < end {
        ticks.push(Tick {
            time: current,
            x: axis.time_to_pixel(current),
            label: hour_minute_text(current),
            is_hour: current.minute() == 0,
        });
        current += increment;
    }
    ticks
}
