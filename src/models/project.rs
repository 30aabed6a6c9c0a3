use serde::{Deserialize, Serialize};

use super::{EntityId, deserialize_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    #[default]
    Developer,
    Manager,
    Both,
    /// A role this console does not know; it must be replaced before saving.
    #[serde(other)]
    Unknown,
}

impl ProjectRole {
    pub const ALL: [ProjectRole; 3] = [ProjectRole::Developer, ProjectRole::Manager, ProjectRole::Both];

    pub fn label(self) -> &'static str {
        match self {
            ProjectRole::Developer => "Développeur",
            ProjectRole::Manager => "Manager",
            ProjectRole::Both => "Les deux",
            ProjectRole::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "termine")]
    Completed,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "futur")]
    Future,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Completed,
        ProjectStatus::InProgress,
        ProjectStatus::Future,
    ];

    /// Badge text shown next to a project
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Terminé",
            ProjectStatus::InProgress => "En cours",
            ProjectStatus::Future => "Futur",
            ProjectStatus::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub role: ProjectRole,
    #[serde(default)]
    pub role_description: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl Project {
    /// The first `limit` technologies plus how many were left out.
    pub fn technology_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.technologies.len().min(limit);
        (&self.technologies[..shown], self.technologies.len() - shown)
    }
}

/// Body sent on create (POST) and update (PATCH).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: String,
    pub category: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: ProjectRole,
    pub role_description: String,
    pub team: String,
    pub duration: String,
    pub github_link: String,
    pub demo_link: String,
    pub status: ProjectStatus,
    pub icon: String,
    pub color: String,
    pub order: i64,
}
