use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::time_text::date_text;

/// Length of the widest viewport, 23:59:59.
pub const MAX_BOUNDARY_MS: i64 = (23 * 3600 + 59 * 60 + 59) * 1000;

const DAY_MS: i64 = 24 * 3600 * 1000;

/// The calendar day under view. Replaced wholesale when the user navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDay {
    date: NaiveDate,
}

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Midnight.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// 23:59:59.999.
    pub fn end_of_day(&self) -> NaiveDateTime {
        self.start_of_day() + Duration::milliseconds(DAY_MS - 1)
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start_of_day() <= time && time <= self.end_of_day()
    }

    pub fn clamp(&self, time: NaiveDateTime) -> NaiveDateTime {
        time.clamp(self.start_of_day(), self.end_of_day())
    }

    /// The day `days` away; stays put if the result would overflow chrono's range.
    pub fn shift_days(&self, days: i64) -> Self {
        let date = self
            .date
            .checked_add_signed(Duration::days(days))
            .unwrap_or(self.date);
        Self { date }
    }

    /// `YYYY-MM-DD`.
    pub fn path_segment(&self) -> String {
        date_text(self.date)
    }
}
