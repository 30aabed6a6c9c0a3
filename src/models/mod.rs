mod project;
mod skill;
mod dashboard;

pub use project::{Project, ProjectPayload, ProjectRole, ProjectStatus};
pub use skill::{Skill, SkillCategory, SkillLevel, SkillPayload, group_by_category};
pub use dashboard::{ActivityKind, DashboardStats, RecentActivity, TimelineEntry};

use serde::{Deserialize, Deserializer};

/// Backend identifiers arrive as JSON strings or numbers; both are kept as strings.
pub type EntityId = String;

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
