use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// `HH:MM`, used for ruler labels.
pub fn hour_minute_text(time: NaiveDateTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// `HH:MM:SS`, used for the crosshair tooltip and dialog spans.
pub fn hour_minute_second_text(time: NaiveDateTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// `YYYY-MM-DD`, the path segment of `GET /entries/{date}`.
pub fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DDTHH:MM:SS`, the timestamp format the server accepts.
pub fn local_iso_text(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Render a duration as `HH:MM:SS`, truncating sub-second parts.
/// Negative durations render as zero.
pub fn duration_text(duration: Duration) -> String {
    seconds_text(duration.num_seconds())
}

pub fn seconds_text(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds - hours * 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Text shown in the create-tagged-entry dialog: `HH:MM:SS - HH:MM:SS (HH:MM:SS)`.
pub fn span_text(start: NaiveDateTime, stop: NaiveDateTime) -> String {
    format!(
        "{} - {} ({})",
        hour_minute_second_text(start),
        hour_minute_second_text(stop),
        duration_text(stop - start)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn formats_clock_texts() {
        assert_eq!(hour_minute_text(at(9, 5, 59)), "09:05");
        assert_eq!(hour_minute_second_text(at(9, 5, 59)), "09:05:59");
        assert_eq!(local_iso_text(at(23, 0, 1)), "2025-01-15T23:00:01");
        assert_eq!(date_text(at(0, 0, 0).date()), "2025-01-15");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(seconds_text(0), "00:00:00");
        assert_eq!(seconds_text(3_725), "01:02:05");
        assert_eq!(seconds_text(-4), "00:00:00");
        assert_eq!(duration_text(Duration::milliseconds(61_999)), "00:01:01");
    }

    #[test]
    fn formats_dialog_span() {
        assert_eq!(
            span_text(at(10, 30, 0), at(11, 0, 0)),
            "10:30:00 - 11:00:00 (00:30:00)"
        );
    }
}
