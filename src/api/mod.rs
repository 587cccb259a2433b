//! The server capabilities the timeline consumes.

pub mod client;
pub mod dto;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{CategoryDetail, CategoryTree};

pub use client::HttpTimelineApi;
pub use dto::{CategoryEdit, CategoryStatistics, DayEntries, DayEntriesDto, NewTaggedEntry};

/// Fetch and store operations backing the timeline page.
///
/// Any non-2xx answer is an error; callers log it and treat the operation as
/// a no-op.
#[async_trait]
pub trait TimelineApi: Send + Sync {
    async fn fetch_entries(&self, date: NaiveDate) -> Result<DayEntries>;

    async fn fetch_categories(&self) -> Result<Vec<CategoryTree>>;

    async fn fetch_category(&self, id: i64) -> Result<CategoryDetail>;

    /// Seconds previously tagged with `main` or `main >> sub`. An empty `sub`
    /// means the main category as a whole.
    async fn fetch_category_statistics(&self, main: &str, sub: &str) -> Result<i64>;

    async fn add_tagged_entry(&self, entry: &NewTaggedEntry) -> Result<()>;

    async fn edit_category(&self, edit: &CategoryEdit) -> Result<()>;

    async fn edit_tagged_entry(&self, edit: &CategoryEdit) -> Result<()>;

    async fn delete_tagged_entry(&self, id: i64) -> Result<()>;

    async fn delete_category(&self, id: i64) -> Result<()>;
}
