//! REST access to the portfolio backend.
//!
//! Every route lives under [`API_PREFIX`]. Views talk to the backend only
//! through the [`PortfolioApi`] trait so the controller can be driven by an
//! in-memory implementation in tests.

mod client;
#[cfg(test)]
pub mod fake;

use std::fmt;

use async_trait::async_trait;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::SelectedFile;
use crate::models::{
    DashboardStats, Project, ProjectPayload, RecentActivity, Skill, SkillPayload, TimelineEntry,
};

pub use client::ApiClient;

pub const API_PREFIX: &str = "/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Status {
        status: u16,
        message: String,
        body: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, pulling the backend's `message` out of the body when it has one.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = backend_message(&body).unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("request failed")
                .to_string()
        });

        ApiError::Status { status, message, body }
    }
}

/// Extract `message` from an error body. Validation errors send a list of strings.
fn backend_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Message {
        One(String),
        Many(Vec<String>),
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: Message,
    }

    match serde_json::from_str::<ErrorBody>(body).ok()?.message {
        Message::One(message) => Some(message),
        Message::Many(messages) if !messages.is_empty() => Some(messages.join("; ")),
        Message::Many(_) => None,
    }
}

/// Response of the icon upload endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
}

/// Skills grouped by the backend, keyed by category name. Categories keep
/// the order the backend sent them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsByCategory(pub Vec<(String, Vec<Skill>)>);

impl<'de> Deserialize<'de> for SkillsByCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = SkillsByCategory;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to skills")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<Skill>>()? {
                    groups.push(entry);
                }
                Ok(SkillsByCategory(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

impl Serialize for SkillsByCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, skills) in &self.0 {
            map.serialize_entry(category, skills)?;
        }
        map.end()
    }
}

#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn get_project(&self, id: &str) -> Result<Project, ApiError>;
    async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, ApiError>;
    async fn update_project(&self, id: &str, payload: &ProjectPayload) -> Result<Project, ApiError>;
    async fn delete_project(&self, id: &str) -> Result<(), ApiError>;

    async fn list_skills(&self) -> Result<Vec<Skill>, ApiError>;
    async fn get_skill(&self, id: &str) -> Result<Skill, ApiError>;
    async fn skills_by_category(&self) -> Result<SkillsByCategory, ApiError>;
    async fn create_skill(&self, payload: &SkillPayload) -> Result<Skill, ApiError>;
    async fn update_skill(&self, id: &str, payload: &SkillPayload) -> Result<Skill, ApiError>;
    async fn delete_skill(&self, id: &str) -> Result<(), ApiError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ApiError>;
    async fn recent_activity(&self) -> Result<Vec<RecentActivity>, ApiError>;

    async fn upload_project_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError>;
    async fn upload_skill_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError>;
}
