use chrono::Duration;
use serde::Serialize;

use crate::models::{CalendarDay, EntryPayload};
use crate::timeline::IntervalSeries;
use crate::utils::time_text::duration_text;

/// Placeholder in a category URL template replaced by the viewed date.
pub const DATE_PLACEHOLDER: &str = "{{date}}";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub url: Option<String>,
    #[serde(skip)]
    pub duration: Duration,
    pub duration_text: String,
}

/// Tagged time of one day, grouped by category in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub categories: Vec<CategorySummary>,
    #[serde(skip)]
    pub total: Duration,
    pub total_text: String,
}

impl DaySummary {
    pub fn from_tagged(day: CalendarDay, tagged: &IntervalSeries) -> Self {
        let mut categories: Vec<CategorySummary> = Vec::new();
        let mut total = Duration::zero();

        for record in tagged.records() {
            let EntryPayload::Tagged {
                category_str, url, ..
            } = record.payload()
            else {
                continue;
            };
            let duration = record.stop() - record.start();
            total = total + duration;

            match categories
                .iter_mut()
                .find(|summary| &summary.category == category_str)
            {
                Some(summary) => summary.duration = summary.duration + duration,
                None => categories.push(CategorySummary {
                    category: category_str.clone(),
                    url: url.as_deref().map(|template| expand_url(template, day)),
                    duration,
                    duration_text: String::new(),
                }),
            }
        }

        for summary in &mut categories {
            summary.duration_text = duration_text(summary.duration);
        }

        Self {
            categories,
            total,
            total_text: duration_text(total),
        }
    }
}

pub fn expand_url(template: &str, day: CalendarDay) -> String {
    template.replace(DATE_PLACEHOLDER, &day.path_segment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, IntervalRecord};
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn day() -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().date().and_hms_opt(h, m, 0).unwrap()
    }

    fn tagged(start: NaiveDateTime, stop: NaiveDateTime, category: &str, url: Option<&str>) -> IntervalRecord {
        IntervalRecord::new(
            start,
            stop,
            EntryPayload::Tagged {
                id: None,
                category: category.into(),
                category_str: category.into(),
                url: url.map(str::to_string),
            },
        )
        .unwrap()
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let series = IntervalSeries::from_records(
            EntryKind::Tagged,
            vec![
                tagged(at(9, 0), at(9, 30), "work >> mail", Some("https://mail/{{date}}")),
                tagged(at(10, 0), at(11, 15), "reading", None),
                tagged(at(13, 0), at(13, 10), "work >> mail", None),
            ],
        );

        let summary = DaySummary::from_tagged(day(), &series);

        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].category, "work >> mail");
        assert_eq!(summary.categories[0].duration_text, "00:40:00");
        assert_eq!(
            summary.categories[0].url.as_deref(),
            Some("https://mail/2025-01-15")
        );
        assert_eq!(summary.categories[1].url, None);
        assert_eq!(summary.categories[1].duration_text, "01:15:00");
        assert_eq!(summary.total, Duration::minutes(115));
        assert_eq!(summary.total_text, "01:55:00");
    }

    #[test]
    fn empty_day_totals_zero() {
        let summary = DaySummary::from_tagged(day(), &IntervalSeries::new(EntryKind::Tagged));
        assert!(summary.categories.is_empty());
        assert_eq!(summary.total_text, "00:00:00");
    }
}
