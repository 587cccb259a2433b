//! The timeline page: synchronous state plus the network round-trips that
//! feed it.

pub mod state;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use crate::api::{HttpTimelineApi, NewTaggedEntry, TimelineApi};
use crate::categories::{
    category_options, parse_category_input, parse_database_id, statistics_query,
    CategoryEditForm, CategoryInputError,
};
use crate::models::{CategoryDetail, EntryPayload, IntervalRecord};
use crate::settings::TimelineSettings;
use crate::utils::time_text::span_text;
use crate::{log_error, log_info, log_warn};

pub use state::{LoadTicket, TimelineState};

const ENABLE_LOGS: bool = true;

/// How a load of a day's entries ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadOutcome {
    Applied,
    /// A newer load started before this one finished.
    Stale,
    /// The request failed; the series keep what they had.
    Failed,
}

#[derive(Clone)]
pub struct TimelineController {
    state: Arc<Mutex<TimelineState>>,
    api: Arc<dyn TimelineApi>,
}

impl TimelineController {
    pub fn new(state: TimelineState, api: Arc<dyn TimelineApi>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            api,
        }
    }

    /// Controller talking HTTP to `settings.api_base_url`.
    pub fn from_settings(settings: TimelineSettings, date: NaiveDate) -> Self {
        let api = Arc::new(HttpTimelineApi::from_settings(&settings));
        Self::new(TimelineState::new(settings, date), api)
    }

    /// Lock the state for event handling or drawing. Never hold the guard
    /// across a network call.
    pub async fn lock(&self) -> MutexGuard<'_, TimelineState> {
        self.state.lock().await
    }

    pub async fn set_date(&self, date: NaiveDate) -> LoadOutcome {
        let ticket = self.state.lock().await.set_date(date);
        self.load(ticket, date).await
    }

    pub async fn shift_days(&self, days: i64) -> LoadOutcome {
        let (ticket, date) = {
            let mut state = self.state.lock().await;
            let ticket = state.shift_days(days);
            (ticket, state.day().date())
        };
        self.load(ticket, date).await
    }

    /// Refetch the current day without clearing what is shown.
    pub async fn reload(&self) -> LoadOutcome {
        let (ticket, date) = {
            let mut state = self.state.lock().await;
            (state.begin_load(), state.day().date())
        };
        self.load(ticket, date).await
    }

    async fn load(&self, ticket: LoadTicket, date: NaiveDate) -> LoadOutcome {
        let LoadTicket { generation, token } = ticket;
        let result = tokio::select! {
            _ = token.cancelled() => {
                log_info!("Load {generation} for {date} superseded");
                return LoadOutcome::Stale;
            }
            result = self.api.fetch_entries(date) => result,
        };

        let mut state = self.state.lock().await;
        state.finish_load(generation);
        match result {
            Ok(entries) => {
                if state.apply_entries(generation, entries) {
                    LoadOutcome::Applied
                } else {
                    LoadOutcome::Stale
                }
            }
            Err(err) if state.is_current(generation) => {
                log_error!("Failed to load entries for {date}: {err:#}");
                LoadOutcome::Failed
            }
            Err(_) => LoadOutcome::Stale,
        }
    }

    /// Store a tagged entry for `input` (`main` or `main >> sub`), show it
    /// right away and reload the day.
    ///
    /// Invalid input is rejected before any request. `Ok(false)` means the
    /// server could not store it; nothing changed locally.
    pub async fn submit_tagged_entry(
        &self,
        input: &str,
        start: NaiveDateTime,
        stop: NaiveDateTime,
    ) -> Result<bool, CategoryInputError> {
        let category = parse_category_input(input)?;
        let entry = NewTaggedEntry {
            main: category.main.clone(),
            sub: category.sub.clone(),
            start,
            stop,
        };

        if let Err(err) = self.api.add_tagged_entry(&entry).await {
            log_error!("Unable to save {}: {err:#}", category.display());
            return Ok(false);
        }
        log_info!("Saved {} as {}", span_text(start, stop), category.display());

        let payload = EntryPayload::Tagged {
            id: None,
            category: category.sub.clone().unwrap_or_else(|| category.main.clone()),
            category_str: category.display(),
            url: None,
        };
        match IntervalRecord::new(start, stop, payload) {
            Ok(record) => {
                self.state.lock().await.append_tagged(record);
            }
            Err(err) => log_warn!("Not showing the new entry before reload: {err}"),
        }

        self.reload().await;
        Ok(true)
    }

    /// Delete a tagged entry and reload. `Ok(false)` leaves it in place.
    pub async fn delete_tagged_entry(&self, id: &str) -> Result<bool, CategoryInputError> {
        let id = parse_database_id(id)?;
        if let Err(err) = self.api.delete_tagged_entry(id).await {
            log_error!("Unable to delete tagged entry {id}: {err:#}");
            return Ok(false);
        }
        self.reload().await;
        Ok(true)
    }

    /// Options for the create dialog; empty if categories cannot be fetched.
    pub async fn category_options(&self) -> Vec<String> {
        match self.api.fetch_categories().await {
            Ok(trees) => category_options(&trees),
            Err(err) => {
                log_error!("Unable to fetch categories: {err:#}");
                Vec::new()
            }
        }
    }

    /// Seconds already tagged with what the user has typed so far. `None`
    /// when there is no main category yet or the request failed.
    pub async fn previously_tagged_seconds(
        &self,
        input: &str,
    ) -> Result<Option<i64>, CategoryInputError> {
        let Some((main, sub)) = statistics_query(input)? else {
            return Ok(None);
        };
        match self.api.fetch_category_statistics(&main, &sub).await {
            Ok(seconds) => Ok(Some(seconds)),
            Err(err) => {
                log_error!("Unable to fetch statistics for {main}: {err:#}");
                Ok(None)
            }
        }
    }

    pub async fn category_detail(&self, id: &str) -> Result<Option<CategoryDetail>, CategoryInputError> {
        let id = parse_database_id(id)?;
        match self.api.fetch_category(id).await {
            Ok(detail) => Ok(Some(detail)),
            Err(err) => {
                log_error!("Unable to fetch category {id}: {err:#}");
                Ok(None)
            }
        }
    }

    /// Validate and store a category edit, then reload so renamed categories
    /// show up in the tagged band.
    pub async fn edit_category(&self, form: &CategoryEditForm) -> Result<bool, CategoryInputError> {
        let has_subs = match self.category_detail(&form.id).await? {
            Some(detail) => detail.has_subs,
            None => false,
        };
        let edit = form.validate(has_subs)?;

        if let Err(err) = self.api.edit_category(&edit).await {
            log_error!("Unable to edit category {}: {err:#}", edit.id);
            return Ok(false);
        }
        self.reload().await;
        Ok(true)
    }

    /// Validate and store an edit of a tagged entry, then reload.
    pub async fn edit_tagged_entry(&self, form: &CategoryEditForm) -> Result<bool, CategoryInputError> {
        let edit = form.validate(false)?;
        if let Err(err) = self.api.edit_tagged_entry(&edit).await {
            log_error!("Unable to edit tagged entry {}: {err:#}", edit.id);
            return Ok(false);
        }
        self.reload().await;
        Ok(true)
    }

    pub async fn delete_category(&self, id: &str) -> Result<bool, CategoryInputError> {
        let id = parse_database_id(id)?;
        if let Err(err) = self.api.delete_category(id).await {
            log_error!("Unable to delete category {id}: {err:#}");
            return Ok(false);
        }
        self.reload().await;
        Ok(true)
    }
}
