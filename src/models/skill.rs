use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EntityId, deserialize_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
    #[serde(other)]
    Unknown,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    /// Badge text shown next to a skill
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Débutant",
            SkillLevel::Intermediate => "Intermédiaire",
            SkillLevel::Advanced => "Avancé",
            SkillLevel::Expert => "Expert",
            SkillLevel::Unknown => "",
        }
    }
}

/// Skill categories offered by the form. Categories the backend knows
/// but the console does not are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillCategory {
    #[default]
    Frontend,
    Backend,
    DatabaseAndOther,
    Management,
    Cybersecurity,
    Design,
    Other(String),
}

impl SkillCategory {
    pub const KNOWN: [SkillCategory; 6] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::DatabaseAndOther,
        SkillCategory::Management,
        SkillCategory::Cybersecurity,
        SkillCategory::Design,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::DatabaseAndOther => "Database & Other",
            SkillCategory::Management => "Management",
            SkillCategory::Cybersecurity => "Cybersécurité",
            SkillCategory::Design => "Design",
            SkillCategory::Other(name) => name,
        }
    }
}

impl From<String> for SkillCategory {
    fn from(value: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == value)
            .unwrap_or(SkillCategory::Other(value))
    }
}

impl From<SkillCategory> for String {
    fn from(value: SkillCategory) -> Self {
        match value {
            SkillCategory::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default)]
    pub level: SkillLevel,
    #[serde(default)]
    pub percentage: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Body sent on create (POST) and update (PATCH).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub percentage: u8,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub order: i64,
    pub is_active: bool,
}

/// Group skills by category. Groups appear in the order their category is
/// first seen; skills keep their relative order inside a group.
pub fn group_by_category(skills: &[Skill]) -> Vec<(&SkillCategory, Vec<&Skill>)> {
    let mut groups: Vec<(&SkillCategory, Vec<&Skill>)> = Vec::new();

    for skill in skills {
        match groups.iter_mut().find(|(category, _)| **category == skill.category) {
            Some((_, members)) => members.push(skill),
            None => groups.push((&skill.category, vec![skill])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, category: &str) -> Skill {
        Skill {
            id: id.to_string(),
            name: format!("skill-{id}"),
            category: SkillCategory::from(category.to_string()),
            level: SkillLevel::Intermediate,
            percentage: 50,
            description: None,
            icon: None,
            color: None,
            order: 0,
            is_active: true,
        }
    }

    #[test]
    fn groups_preserve_first_seen_and_relative_order() {
        let skills = vec![skill("a", "Frontend"), skill("b", "Backend"), skill("c", "Frontend")];

        let groups = group_by_category(&skills);
        assert_eq!(groups.len(), 2);

        let (category, members) = &groups[0];
        assert_eq!(**category, SkillCategory::Frontend);
        let ids: Vec<&str> = members.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);

        assert_eq!(*groups[1].0, SkillCategory::Backend);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn grouping_empty_list_yields_no_groups() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn category_round_trips_known_and_unknown_names() {
        assert_eq!(SkillCategory::from("Cybersécurité".to_string()), SkillCategory::Cybersecurity);
        assert_eq!(SkillCategory::from("Database & Other".to_string()), SkillCategory::DatabaseAndOther);

        let other = SkillCategory::from("DevOps".to_string());
        assert_eq!(other, SkillCategory::Other("DevOps".to_string()));
        assert_eq!(String::from(other), "DevOps");
    }

    #[test]
    fn decodes_backend_skill_with_defaults() {
        let json = r#"{"id": "s1", "name": "React", "category": "Frontend", "level": "expert", "percentage": 95}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();

        assert_eq!(skill.category, SkillCategory::Frontend);
        assert_eq!(skill.level, SkillLevel::Expert);
        assert_eq!(skill.level.label(), "Expert");
        assert!(skill.is_active);
        assert_eq!(skill.icon, None);
    }

    #[test]
    fn unrecognized_level_decodes_with_blank_badge() {
        let json = r#"{"id": "s2", "name": "Go", "category": "Backend", "level": "master", "percentage": 70}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();

        assert_eq!(skill.level, SkillLevel::Unknown);
        assert_eq!(skill.level.label(), "");
    }

    #[test]
    fn payload_serializes_category_as_plain_string() {
        let payload = SkillPayload {
            name: "Figma".into(),
            category: SkillCategory::Design,
            level: SkillLevel::Advanced,
            percentage: 80,
            description: String::new(),
            icon: String::new(),
            color: "blue".into(),
            order: 1,
            is_active: false,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["category"], "Design");
        assert_eq!(value["level"], "advanced");
        assert_eq!(value["isActive"], false);
    }
}
