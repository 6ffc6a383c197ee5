//! The update service: owner of all mutable dashboard state.
//!
//! Every shared container — task queue, update registry, news display list,
//! seen titles, covid snapshot — lives inside one mutex here, so all
//! mutation is serialized onto whichever caller holds the lock. The engine
//! makes progress only when the serving path calls [`UpdateService::poll`];
//! there is no background worker and no blocking wait anywhere.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use covdash_core::{clock, AppConfig};
use covdash_data::{build_snapshot, CovidClient, CovidSnapshot, DataError, NewsClient};

use crate::error::ScheduleError;
use crate::queue::TaskQueue;
use crate::registry::UpdateRegistry;
use crate::updates::{NewsItem, ScheduledUpdate, UpdateEntry, UpdateRequest};

/// Repeating updates re-arm this far ahead, under the same name.
const REPEAT_INTERVAL_SECS: i64 = 86_400;

/// Everything a dashboard render needs from the engine.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub covid: CovidSnapshot,
    pub news: Vec<NewsItem>,
    pub updates: Vec<UpdateEntry>,
}

#[derive(Default)]
struct DashboardState {
    queue: TaskQueue<ScheduledUpdate>,
    registry: UpdateRegistry,
    news: Vec<NewsItem>,
    // Titles surfaced at least once. Grows without bound and is never
    // pruned; deleted headlines stay here so a refresh cannot re-add them.
    seen_titles: HashSet<String>,
    snapshot: CovidSnapshot,
}

pub struct UpdateService {
    covid: CovidClient,
    news: NewsClient,
    city: String,
    nation: String,
    news_terms: String,
    state: Mutex<DashboardState>,
}

impl UpdateService {
    /// Build the engine and its API clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] when either HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, DataError> {
        let covid = CovidClient::new(config.request_timeout_secs, &config.user_agent)?;
        let news = NewsClient::new(
            &config.news_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::with_clients(
            covid,
            news,
            &config.city,
            &config.nation,
            &config.news_terms,
        ))
    }

    /// Build the engine around preconstructed clients. Tests point these at
    /// mock servers.
    #[must_use]
    pub fn with_clients(
        covid: CovidClient,
        news: NewsClient,
        city: &str,
        nation: &str,
        news_terms: &str,
    ) -> Self {
        Self {
            covid,
            news,
            city: city.to_owned(),
            nation: nation.to_owned(),
            news_terms: news_terms.to_owned(),
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// Schedule a future refresh from a user request.
    ///
    /// The delay is the wall-clock distance from now to the requested
    /// `HH:MM` today; a time that already passed yields a negative delay,
    /// which means "run on the next poll".
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::NothingRequested`] when neither refresh flag is
    ///   set (logged and dropped; not an end-user error).
    /// - [`ScheduleError::InvalidInterval`] when the interval is malformed.
    /// - [`ScheduleError::DuplicateName`] when an update with the same
    ///   composed label is already registered.
    pub async fn schedule_update(&self, request: UpdateRequest) -> Result<(), ScheduleError> {
        self.schedule_update_at(request, Utc::now()).await
    }

    /// Like [`UpdateService::schedule_update`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`UpdateService::schedule_update`].
    pub async fn schedule_update_at(
        &self,
        request: UpdateRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ScheduleError> {
        if !request.refresh_covid && !request.refresh_news {
            tracing::warn!(name = %request.name, "update requested no data; dropping");
            return Err(ScheduleError::NothingRequested);
        }

        let delay = clock::seconds_until(&request.interval, now.time())?;
        let update = ScheduledUpdate::from_request(&request);

        let mut state = self.state.lock().await;
        if state.registry.contains(&update.name) {
            tracing::warn!(name = %update.name, "duplicate update name rejected");
            return Err(ScheduleError::DuplicateName(update.name));
        }

        let task = state.queue.schedule_after(now, delay, update.clone());
        state.registry.insert(&update, task);
        tracing::info!(
            name = %update.name,
            at = %update.display_interval,
            delay,
            "update scheduled"
        );
        Ok(())
    }

    /// Cancel a pending update before it fires, removing its display entry
    /// and its queued task together.
    ///
    /// Unknown names are a logged no-op; returns whether anything was
    /// removed.
    pub async fn cancel_update(&self, name: &str) -> bool {
        let mut state = self.state.lock().await;
        match state.registry.remove(name) {
            Some(task) => {
                state.queue.cancel(task);
                tracing::info!(name, "update cancelled");
                true
            }
            None => {
                tracing::warn!(name, "no update with that name to cancel");
                false
            }
        }
    }

    /// Remove the first headline whose title matches from the display list.
    ///
    /// The title stays in the seen set, so an identical headline will not be
    /// re-added by later refreshes. Unknown titles are a logged no-op.
    pub async fn delete_news(&self, title: &str) -> bool {
        let mut state = self.state.lock().await;
        if let Some(pos) = state.news.iter().position(|item| item.title == title) {
            state.news.remove(pos);
            tracing::info!(title, "headline removed from display");
            true
        } else {
            tracing::warn!(title, "no headline with that title to remove");
            false
        }
    }

    /// Execute every update that is due, in fire-time order, then return.
    ///
    /// Never waits for future tasks; a poll with nothing due is free. The
    /// serving path calls this on every request.
    pub async fn poll(&self) {
        self.poll_at(Utc::now()).await;
    }

    /// Like [`UpdateService::poll`] with an explicit clock.
    pub async fn poll_at(&self, now: DateTime<Utc>) {
        let mut state = self.state.lock().await;
        while let Some((_, update)) = state.queue.pop_due(now) {
            self.run_update(&mut state, update, now).await;
        }
    }

    /// Cloned view of the current dashboard state.
    pub async fn dashboard(&self) -> DashboardData {
        let state = self.state.lock().await;
        DashboardData {
            covid: state.snapshot.clone(),
            news: state.news.clone(),
            updates: state.registry.entries().to_vec(),
        }
    }

    /// Fire time of the pending task registered under `name`, if any.
    pub async fn pending_fire_at(&self, name: &str) -> Option<DateTime<Utc>> {
        let state = self.state.lock().await;
        let task = state.registry.handle(name)?;
        state.queue.fire_at(task)
    }

    /// Number of tasks still waiting to fire.
    pub async fn pending_tasks(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    async fn run_update(
        &self,
        state: &mut DashboardState,
        update: ScheduledUpdate,
        now: DateTime<Utc>,
    ) {
        if !update.refresh_covid && !update.refresh_news {
            // Unreachable through schedule_update, which rejects such
            // requests; a task that slips through deregisters itself.
            tracing::warn!(name = %update.name, "fired update had nothing to refresh");
            state.registry.remove(&update.name);
            return;
        }

        if update.repeat {
            let task = state
                .queue
                .schedule_after(now, REPEAT_INTERVAL_SECS, update.clone());
            state.registry.rearm(&update.name, task);
            tracing::info!(name = %update.name, "repeating update re-armed for tomorrow");
        }

        if update.refresh_covid {
            self.refresh_covid(state, now).await;
        }
        if update.refresh_news {
            self.refresh_news(state).await;
        }

        if !update.repeat {
            state.registry.remove(&update.name);
        }
    }

    /// Rebuild the covid snapshot from fresh local and national series.
    ///
    /// Upstream failures are logged and keep the previous snapshot; a failed
    /// refresh must not take the serving loop down with it.
    async fn refresh_covid(&self, state: &mut DashboardState, now: DateTime<Utc>) {
        let local = match self.covid.area_cases(&self.city).await {
            Ok(records) => records,
            Err(error) => {
                tracing::error!(%error, "local covid fetch failed; keeping stale data");
                return;
            }
        };
        let national = match self.covid.national_series(&self.nation).await {
            Ok(records) => records,
            Err(error) => {
                tracing::error!(%error, "national covid fetch failed; keeping stale data");
                return;
            }
        };

        state.snapshot = build_snapshot(&local, &national, now.date_naive());
        tracing::info!("covid data refreshed");
    }

    /// Fetch headlines and append the never-before-seen ones to the display
    /// list.
    async fn refresh_news(&self, state: &mut DashboardState) {
        let articles = match self.news.top_headlines(&self.news_terms).await {
            Ok(articles) => articles,
            Err(error) => {
                tracing::error!(%error, "news fetch failed; keeping stale headlines");
                return;
            }
        };

        let mut added = 0_usize;
        for article in articles {
            if !state.seen_titles.insert(article.title.clone()) {
                continue;
            }
            state.news.push(NewsItem {
                title: article.title,
                content: article.description.unwrap_or_default(),
            });
            added += 1;
        }
        tracing::info!(added, "news refreshed");
    }
}
