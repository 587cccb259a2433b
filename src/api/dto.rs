//! JSON bodies exchanged with the mtag web server.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{EntryPayload, IntervalRecord};

/// Timestamps are local wall-clock time without an offset.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::WIRE_DATETIME_FORMAT;
    use crate::utils::time_text::local_iso_text;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&local_iso_text(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, WIRE_DATETIME_FORMAT)
            .or_else(|_| text.parse::<NaiveDateTime>())
            .map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWindowDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    pub application: ApplicationDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEntryDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    #[serde(with = "wire_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub stop: NaiveDateTime,
    pub application_window: ApplicationWindowDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedCategoryDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEntryDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    #[serde(with = "wire_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub stop: NaiveDateTime,
    pub category: TaggedCategoryDto,
    pub category_str: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntryDto {
    #[serde(default)]
    pub db_id: Option<i64>,
    pub active: bool,
    #[serde(with = "wire_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub stop: NaiveDateTime,
}

/// `GET /entries/{date}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayEntriesDto {
    #[serde(default)]
    pub logged_entries: Vec<LoggedEntryDto>,
    #[serde(default)]
    pub tagged_entries: Vec<TaggedEntryDto>,
    #[serde(default)]
    pub activity_entries: Vec<ActivityEntryDto>,
}

/// A day's entries converted into records, one vector per series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEntries {
    pub logged: Vec<IntervalRecord>,
    pub tagged: Vec<IntervalRecord>,
    pub activity: Vec<IntervalRecord>,
}

impl DayEntriesDto {
    /// Convert into records. Entries whose start is not before their stop are
    /// dropped with a warning instead of failing the whole day.
    pub fn into_entries(self) -> DayEntries {
        DayEntries {
            logged: convert(self.logged_entries, |entry| {
                (
                    entry.start,
                    entry.stop,
                    EntryPayload::Logged {
                        application: entry.application_window.application.name,
                        title: entry.application_window.title.unwrap_or_default(),
                    },
                )
            }),
            tagged: convert(self.tagged_entries, |entry| {
                (
                    entry.start,
                    entry.stop,
                    EntryPayload::Tagged {
                        id: entry.db_id,
                        category: entry.category.name,
                        category_str: entry.category_str,
                        url: entry.category.url.filter(|url| !url.trim().is_empty()),
                    },
                )
            }),
            activity: convert(self.activity_entries, |entry| {
                (
                    entry.start,
                    entry.stop,
                    EntryPayload::Activity {
                        active: entry.active,
                    },
                )
            }),
        }
    }
}

fn convert<T>(
    entries: Vec<T>,
    split: impl Fn(T) -> (NaiveDateTime, NaiveDateTime, EntryPayload),
) -> Vec<IntervalRecord> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let (start, stop, payload) = split(entry);
            match IntervalRecord::new(start, stop, payload) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("Skipping entry from server: {err}");
                    None
                }
            }
        })
        .collect()
}

/// `POST /taggedentry/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaggedEntry {
    pub main: String,
    pub sub: Option<String>,
    #[serde(with = "wire_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub stop: NaiveDateTime,
}

/// `POST /category/edit` and `POST /taggedentry/edit`. Ids travel as digit
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEdit {
    pub id: String,
    pub name: String,
    pub url: String,
    pub parent_id: Option<String>,
}

/// `GET /category/statistics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub seconds: i64,
}
