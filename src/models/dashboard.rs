use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardOverview {
    pub total_projects: u64,
    pub completed_projects: u64,
    pub in_progress_projects: u64,
    pub total_skills: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectsByStatus {
    pub completed: u64,
    pub in_progress: u64,
    pub future: u64,
}

impl ProjectsByStatus {
    /// Chart slices with their share of the total, in percent.
    pub fn slices(&self) -> [(&'static str, u64, u64); 3] {
        let total = self.completed + self.in_progress + self.future;
        let share = |value: u64| if total == 0 { 0 } else { (value * 100 + total / 2) / total };

        [
            ("Terminés", self.completed, share(self.completed)),
            ("En cours", self.in_progress, share(self.in_progress)),
            ("Futurs", self.future, share(self.future)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardCharts {
    pub projects_by_status: ProjectsByStatus,
    pub skills_by_category: Vec<CategoryCount>,
}

/// Aggregates computed by the backend on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub overview: DashboardOverview,
    pub charts: DashboardCharts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Project,
    Skill,
    #[serde(other)]
    Unknown,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Project => "Projet",
            ActivityKind::Skill => "Compétence",
            ActivityKind::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub action: String,
    pub date: String,
}

impl RecentActivity {
    /// Date rendered the way the fr-FR locale prints it (dd/mm/yyyy).
    pub fn display_date(&self) -> String {
        format_fr_date(&self.date)
    }
}

/// Formats an ISO-8601 timestamp or date as dd/mm/yyyy in local time.
/// Unparseable input is returned as-is.
pub fn format_fr_date(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.with_timezone(&Local).format("%d/%m/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Row of the project timeline. The backend shape is loose, so every
/// field but the title is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
