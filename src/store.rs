//! Client-side store for fetched backend data.
//!
//! Each [`QueryKey`] maps to an entry holding the last data, a status and the
//! time of the last successful fetch. Mutations invalidate keys; an
//! invalidated key that has been fetched before is fetched again. A key is
//! never fetched twice concurrently.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::api::{ApiError, PortfolioApi};
use crate::models::{DashboardStats, Project, RecentActivity, Skill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Projects,
    Skills,
    DashboardStats,
    RecentActivity,
}

impl QueryKey {
    pub fn name(self) -> &'static str {
        match self {
            QueryKey::Projects => "projects",
            QueryKey::Skills => "skills",
            QueryKey::DashboardStats => "dashboard-stats",
            QueryKey::RecentActivity => "recent-activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Projects(Vec<Project>),
    Skills(Vec<Skill>),
    DashboardStats(DashboardStats),
    RecentActivity(Vec<RecentActivity>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub data: Option<QueryData>,
    pub status: QueryStatus,
    pub updated_at: Option<DateTime<Local>>,
    pub stale: bool,
    in_flight: bool,
    invalidated_in_flight: bool,
}

impl QueryEntry {
    fn loading() -> Self {
        Self {
            data: None,
            status: QueryStatus::Loading,
            updated_at: None,
            stale: true,
            in_flight: false,
            invalidated_in_flight: false,
        }
    }

    #[cfg(test)]
    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }
}

/// What a view should render for one key.
#[derive(Debug, PartialEq)]
pub enum QueryView<'a, T> {
    Loading,
    Failed(&'a str),
    Ready(&'a T),
}

#[derive(Debug, Default)]
pub struct QueryStore {
    entries: HashMap<QueryKey, QueryEntry>,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: QueryKey) -> Option<&QueryEntry> {
        self.entries.get(&key)
    }

    /// Mark the key as in flight. Returns `false` when a fetch is already
    /// running, in which case the caller must not issue another one.
    pub fn begin_fetch(&mut self, key: QueryKey) -> bool {
        let entry = self.entries.entry(key).or_insert_with(QueryEntry::loading);
        if entry.in_flight {
            debug!(key = key.name(), "Fetch already in flight");
            return false;
        }

        entry.in_flight = true;
        entry.invalidated_in_flight = false;
        if entry.data.is_none() {
            entry.status = QueryStatus::Loading;
        }
        debug!(key = key.name(), "Fetch started");
        true
    }

    /// Store a fetch result. Returns `true` when the key was invalidated
    /// while the fetch ran and has to be fetched again.
    pub fn finish_fetch(&mut self, key: QueryKey, result: Result<QueryData, String>) -> bool {
        let entry = self.entries.entry(key).or_insert_with(QueryEntry::loading);
        entry.in_flight = false;

        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.status = QueryStatus::Success;
                entry.updated_at = Some(Local::now());
                entry.stale = entry.invalidated_in_flight;
            }
            Err(message) => {
                debug!(key = key.name(), %message, "Fetch failed");
                entry.status = QueryStatus::Error(message);
                entry.stale = true;
            }
        }

        let again = entry.invalidated_in_flight;
        entry.invalidated_in_flight = false;
        again
    }

    /// Mark the key stale. Returns `true` when a fetch should be issued now:
    /// the key has been fetched before and nothing is in flight for it.
    pub fn invalidate(&mut self, key: QueryKey) -> bool {
        match self.entries.get_mut(&key) {
            None => false,
            Some(entry) => {
                debug!(key = key.name(), "Invalidated");
                entry.stale = true;
                if entry.in_flight {
                    entry.invalidated_in_flight = true;
                    false
                } else {
                    true
                }
            }
        }
    }

    fn view<T>(&self, key: QueryKey, pick: impl Fn(&QueryData) -> Option<&T>) -> QueryView<'_, T> {
        let Some(entry) = self.entries.get(&key) else {
            return QueryView::Loading;
        };

        if let Some(data) = entry.data.as_ref().and_then(pick) {
            return QueryView::Ready(data);
        }
        match &entry.status {
            QueryStatus::Error(message) => QueryView::Failed(message.as_str()),
            _ => QueryView::Loading,
        }
    }

    pub fn projects(&self) -> QueryView<'_, Vec<Project>> {
        self.view(QueryKey::Projects, |data| match data {
            QueryData::Projects(projects) => Some(projects),
            _ => None,
        })
    }

    pub fn skills(&self) -> QueryView<'_, Vec<Skill>> {
        self.view(QueryKey::Skills, |data| match data {
            QueryData::Skills(skills) => Some(skills),
            _ => None,
        })
    }

    pub fn dashboard_stats(&self) -> QueryView<'_, DashboardStats> {
        self.view(QueryKey::DashboardStats, |data| match data {
            QueryData::DashboardStats(stats) => Some(stats),
            _ => None,
        })
    }

    pub fn recent_activity(&self) -> QueryView<'_, Vec<RecentActivity>> {
        self.view(QueryKey::RecentActivity, |data| match data {
            QueryData::RecentActivity(activity) => Some(activity),
            _ => None,
        })
    }

    /// Error of the last fetch, shown next to data that is still displayed.
    pub fn error(&self, key: QueryKey) -> Option<&str> {
        match &self.entries.get(&key)?.status {
            QueryStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Issue the request behind a key.
pub async fn fetch(api: &dyn PortfolioApi, key: QueryKey) -> Result<QueryData, ApiError> {
    Ok(match key {
        QueryKey::Projects => QueryData::Projects(api.list_projects().await?),
        QueryKey::Skills => QueryData::Skills(api.list_skills().await?),
        QueryKey::DashboardStats => QueryData::DashboardStats(api.dashboard_stats().await?),
        QueryKey::RecentActivity => QueryData::RecentActivity(api.recent_activity().await?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;

    #[test]
    fn unknown_key_renders_loading() {
        let store = QueryStore::new();
        assert!(store.entry(QueryKey::Projects).is_none());
        assert_eq!(store.projects(), QueryView::Loading);
    }

    #[test]
    fn in_flight_fetches_are_deduplicated() {
        let mut store = QueryStore::new();
        assert!(store.begin_fetch(QueryKey::Skills));
        assert!(!store.begin_fetch(QueryKey::Skills));
        assert!(store.entry(QueryKey::Skills).unwrap().is_fetching());
    }

    #[test]
    fn successful_fetch_is_fresh_and_timestamped() {
        let mut store = QueryStore::new();
        store.begin_fetch(QueryKey::Projects);
        let again = store.finish_fetch(QueryKey::Projects, Ok(QueryData::Projects(Vec::new())));

        assert!(!again);
        let entry = store.entry(QueryKey::Projects).unwrap();
        assert!(!entry.stale);
        assert_eq!(entry.status, QueryStatus::Success);
        assert!(entry.updated_at.is_some());
        assert!(matches!(store.projects(), QueryView::Ready(projects) if projects.is_empty()));
    }

    #[test]
    fn failed_first_fetch_renders_error_not_loading() {
        let mut store = QueryStore::new();
        store.begin_fetch(QueryKey::DashboardStats);
        store.finish_fetch(QueryKey::DashboardStats, Err("connection refused".into()));

        assert_eq!(store.dashboard_stats(), QueryView::Failed("connection refused"));
        assert!(store.entry(QueryKey::DashboardStats).unwrap().stale);
    }

    #[test]
    fn failed_refetch_keeps_previous_data() {
        let mut store = QueryStore::new();
        store.begin_fetch(QueryKey::Skills);
        store.finish_fetch(QueryKey::Skills, Ok(QueryData::Skills(Vec::new())));
        store.invalidate(QueryKey::Skills);
        store.begin_fetch(QueryKey::Skills);
        store.finish_fetch(QueryKey::Skills, Err("timeout".into()));

        assert!(matches!(store.skills(), QueryView::Ready(_)));
        assert_eq!(store.error(QueryKey::Skills), Some("timeout"));
    }

    #[test]
    fn invalidating_unfetched_key_does_nothing() {
        let mut store = QueryStore::new();
        assert!(!store.invalidate(QueryKey::Projects));
        assert!(store.entry(QueryKey::Projects).is_none());
    }

    #[test]
    fn invalidating_fetched_key_requests_refetch() {
        let mut store = QueryStore::new();
        store.begin_fetch(QueryKey::Projects);
        store.finish_fetch(QueryKey::Projects, Ok(QueryData::Projects(Vec::new())));

        assert!(store.invalidate(QueryKey::Projects));
        assert!(store.entry(QueryKey::Projects).unwrap().stale);
    }

    #[test]
    fn invalidation_during_flight_schedules_one_more_fetch() {
        let mut store = QueryStore::new();
        store.begin_fetch(QueryKey::Projects);

        assert!(!store.invalidate(QueryKey::Projects));
        assert!(store.finish_fetch(QueryKey::Projects, Ok(QueryData::Projects(Vec::new()))));
        assert!(store.entry(QueryKey::Projects).unwrap().stale);
    }

    #[tokio::test]
    async fn fetch_dispatches_by_key() {
        let api = FakeApi::new();
        let data = fetch(&api, QueryKey::RecentActivity).await.unwrap();

        assert_eq!(data, QueryData::RecentActivity(Vec::new()));
        assert_eq!(api.calls(), ["recent_activity"]);
    }
}
