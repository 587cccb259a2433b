//! Interval records shown on the timeline.
//!
//! All three series share one record type; what differs between them is the
//! [`EntryPayload`] variant. Pixel spans are a cache recomputed whenever the
//! axis changes and are never part of the record's identity.

use anyhow::{ensure, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timeline::axis::TimeAxis;
use crate::utils::string_to_color;

pub const ACTIVE_COLOR: &str = "#8AD98A";
pub const INACTIVE_COLOR: &str = "#808080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Logged,
    Tagged,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EntryPayload {
    /// Automatically recorded application usage.
    Logged { application: String, title: String },
    /// User-assigned category.
    Tagged {
        id: Option<i64>,
        category: String,
        category_str: String,
        url: Option<String>,
    },
    /// Device active/inactive span.
    Activity { active: bool },
}

impl EntryPayload {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryPayload::Logged { .. } => EntryKind::Logged,
            EntryPayload::Tagged { .. } => EntryKind::Tagged,
            EntryPayload::Activity { .. } => EntryKind::Activity,
        }
    }

    fn display_color(&self) -> String {
        match self {
            EntryPayload::Logged { application, .. } => string_to_color(application),
            EntryPayload::Tagged { category_str, .. } => string_to_color(category_str),
            EntryPayload::Activity { active: true } => ACTIVE_COLOR.to_string(),
            EntryPayload::Activity { active: false } => INACTIVE_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    start: NaiveDateTime,
    stop: NaiveDateTime,
    payload: EntryPayload,
    color: String,
    #[serde(skip)]
    start_pixel: i64,
    #[serde(skip)]
    stop_pixel: i64,
}

impl IntervalRecord {
    /// Build a record; `start` must be strictly before `stop`.
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime, payload: EntryPayload) -> Result<Self> {
        ensure!(
            start < stop,
            "interval start {start} is not before stop {stop}"
        );

        let color = payload.display_color();
        Ok(Self {
            start,
            stop,
            payload,
            color,
            start_pixel: 0,
            stop_pixel: 0,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn stop(&self) -> NaiveDateTime {
        self.stop
    }

    pub fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn start_pixel(&self) -> i64 {
        self.start_pixel
    }

    pub fn stop_pixel(&self) -> i64 {
        self.stop_pixel
    }

    pub fn pixel_width(&self) -> i64 {
        self.stop_pixel - self.start_pixel
    }

    /// Identifier of a tagged entry, if the server sent one.
    pub fn tagged_id(&self) -> Option<i64> {
        match &self.payload {
            EntryPayload::Tagged { id, .. } => *id,
            _ => None,
        }
    }

    pub fn contains_time(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.stop
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.start_pixel as f64 <= x && x <= self.stop_pixel as f64
    }

    /// True unless the record lies entirely before or after `[start, stop]`.
    pub fn overlaps(&self, start: NaiveDateTime, stop: NaiveDateTime) -> bool {
        !(self.stop < start || stop < self.start)
    }

    /// Texts listed in the hover tooltip.
    pub fn texts(&self) -> Vec<String> {
        match &self.payload {
            EntryPayload::Logged { application, title } => {
                vec![application.clone(), title.clone()]
            }
            EntryPayload::Tagged { category_str, .. } => vec![category_str.clone()],
            EntryPayload::Activity { active: true } => vec!["## Active ##".to_string()],
            EntryPayload::Activity { active: false } => vec!["## Inactive ##".to_string()],
        }
    }

    pub(crate) fn update_pixels(&mut self, axis: &TimeAxis) {
        self.start_pixel = axis.time_to_pixel(self.start).floor() as i64;
        self.stop_pixel = axis.time_to_pixel(self.stop).ceil() as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn logged(app: &str) -> EntryPayload {
        EntryPayload::Logged {
            application: app.into(),
            title: "main.rs".into(),
        }
    }

    #[test]
    fn rejects_empty_or_inverted_intervals() {
        assert!(IntervalRecord::new(at(9, 0), at(9, 0), logged("code")).is_err());
        assert!(IntervalRecord::new(at(9, 30), at(9, 0), logged("code")).is_err());
        assert!(IntervalRecord::new(at(9, 0), at(9, 30), logged("code")).is_ok());
    }

    #[test]
    fn colors_follow_payload() {
        let a = IntervalRecord::new(at(9, 0), at(9, 30), logged("code")).unwrap();
        let b = IntervalRecord::new(at(11, 0), at(12, 0), logged("code")).unwrap();
        assert_eq!(a.color(), b.color());
        assert_eq!(a.color(), string_to_color("code"));

        let idle = IntervalRecord::new(
            at(9, 0),
            at(9, 30),
            EntryPayload::Activity { active: false },
        )
        .unwrap();
        assert_eq!(idle.color(), INACTIVE_COLOR);
        assert_eq!(idle.texts(), vec!["## Inactive ##".to_string()]);
    }

    #[test]
    fn tagged_texts_and_id() {
        let tagged = IntervalRecord::new(
            at(10, 0),
            at(10, 30),
            EntryPayload::Tagged {
                id: Some(7),
                category: "review".into(),
                category_str: "work >> review".into(),
                url: None,
            },
        )
        .unwrap();
        assert_eq!(tagged.kind(), EntryKind::Tagged);
        assert_eq!(tagged.tagged_id(), Some(7));
        assert_eq!(tagged.texts(), vec!["work >> review".to_string()]);
        assert_eq!(tagged.color(), string_to_color("work >> review"));
    }

    #[test]
    fn overlap_is_inclusive_at_edges() {
        let record = IntervalRecord::new(at(10, 0), at(10, 30), logged("code")).unwrap();
        assert!(record.overlaps(at(10, 30), at(11, 0)));
        assert!(record.overlaps(at(9, 0), at(10, 0)));
        assert!(!record.overlaps(at(10, 31), at(11, 0)));
        assert!(!record.overlaps(at(8, 0), at(9, 59)));
    }
}
