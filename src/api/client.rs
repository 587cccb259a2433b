use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{CalendarDay, CategoryDetail, CategoryTree};
use crate::settings::TimelineSettings;
use crate::{log_error, log_info, log_warn};

use super::dto::{CategoryEdit, CategoryStatistics, DayEntries, DayEntriesDto, NewTaggedEntry};
use super::TimelineApi;

const ENABLE_LOGS: bool = true;

/// [`TimelineApi`] over HTTP against the mtag web server.
#[derive(Debug, Clone)]
pub struct HttpTimelineApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTimelineApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                log_warn!("HTTP client without a {timeout:?} timeout: {err}");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &TimelineSettings) -> Self {
        Self::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;
        ensure_success(response, "GET", path)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("GET {path} returned malformed JSON"))
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))?;
        ensure_success(response, "POST", path).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .with_context(|| format!("DELETE {path} failed"))?;
        ensure_success(response, "DELETE", path).await?;
        Ok(())
    }
}

/// Turn a non-2xx status into an error carrying the response body.
async fn ensure_success(response: Response, method: &str, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log_error!("{method} {path} answered {status}");
    if status == StatusCode::NOT_FOUND {
        bail!("{method} {path}: not found");
    }
    bail!("{method} {path}: unexpected status {status}: {body}");
}

#[async_trait]
impl TimelineApi for HttpTimelineApi {
    async fn fetch_entries(&self, date: NaiveDate) -> Result<DayEntries> {
        let path = format!("/entries/{}", CalendarDay::new(date).path_segment());
        let dto: DayEntriesDto = self.get_json(&path).await?;
        let entries = dto.into_entries();
        log_info!(
            "Fetched {} logged, {} tagged and {} activity entries for {date}",
            entries.logged.len(),
            entries.tagged.len(),
            entries.activity.len()
        );
        Ok(entries)
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryTree>> {
        self.get_json("/categories").await
    }

    async fn fetch_category(&self, id: i64) -> Result<CategoryDetail> {
        self.get_json(&format!("/category/{id}")).await
    }

    async fn fetch_category_statistics(&self, main: &str, sub: &str) -> Result<i64> {
        let path = "/category/statistics";
        let mut query = vec![("main", main)];
        if !sub.is_empty() {
            query.push(("sub", sub));
        }
        let response = self
            .client
            .get(self.url(path))
            .query(&query)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;
        let statistics: CategoryStatistics = ensure_success(response, "GET", path)
            .await?
            .json()
            .await
            .with_context(|| format!("GET {path} returned malformed JSON"))?;
        Ok(statistics.seconds)
    }

    async fn add_tagged_entry(&self, entry: &NewTaggedEntry) -> Result<()> {
        self.post_json("/taggedentry/add", entry).await?;
        log_info!(
            "Stored tagged entry {:?} >> {:?} from {} to {}",
            entry.main,
            entry.sub,
            entry.start,
            entry.stop
        );
        Ok(())
    }

    async fn edit_category(&self, edit: &CategoryEdit) -> Result<()> {
        self.post_json("/category/edit", edit).await
    }

    async fn edit_tagged_entry(&self, edit: &CategoryEdit) -> Result<()> {
        self.post_json("/taggedentry/edit", edit).await
    }

    async fn delete_tagged_entry(&self, id: i64) -> Result<()> {
        self.delete(&format!("/taggedentry/{id}")).await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.delete(&format!("/category/{id}")).await
    }
}
