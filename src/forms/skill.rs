use super::{Draft, FieldKind, FormError, FormMsg, SubmitRequest, cycle, parse_in_range, require};
use crate::assets::SelectedFile;
use crate::models::{EntityId, Skill, SkillCategory, SkillLevel, SkillPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillField {
    Name,
    Category,
    Level,
    Percentage,
    Description,
    Icon,
    Color,
    Order,
    IsActive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub percentage: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub order: String,
    pub is_active: bool,
    pub selected_file: Option<SelectedFile>,
}

impl Default for SkillDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            category: SkillCategory::Frontend,
            level: SkillLevel::Intermediate,
            percentage: "50".to_string(),
            description: String::new(),
            icon: String::new(),
            color: String::new(),
            order: "0".to_string(),
            is_active: true,
            selected_file: None,
        }
    }
}

impl SkillDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_existing(skill: &Skill) -> Self {
        Self {
            id: Some(skill.id.clone()),
            name: skill.name.clone(),
            category: skill.category.clone(),
            level: skill.level,
            percentage: skill.percentage.to_string(),
            description: skill.description.clone().unwrap_or_default(),
            icon: skill.icon.clone().unwrap_or_default(),
            color: skill.color.clone().unwrap_or_default(),
            order: skill.order.to_string(),
            is_active: skill.is_active,
            selected_file: None,
        }
    }

    fn text_mut(&mut self, field: SkillField) -> Option<&mut String> {
        match field {
            SkillField::Name => Some(&mut self.name),
            SkillField::Percentage => Some(&mut self.percentage),
            SkillField::Description => Some(&mut self.description),
            SkillField::Color => Some(&mut self.color),
            SkillField::Order => Some(&mut self.order),
            _ => None,
        }
    }

    pub fn to_payload(&self) -> Result<SkillPayload, FormError> {
        let percentage = parse_in_range(&self.percentage, "percentage", 0, 100)?;
        if self.level == SkillLevel::Unknown {
            return Err(FormError::Required("level"));
        }

        Ok(SkillPayload {
            name: require(&self.name, "name")?,
            category: self.category.clone(),
            level: self.level,
            percentage: percentage as u8,
            description: self.description.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            order: parse_in_range(&self.order, "order", 0, i64::MAX)?,
            is_active: self.is_active,
        })
    }
}

impl Draft for SkillDraft {
    type Field = SkillField;

    const FIELDS: &'static [SkillField] = &[
        SkillField::Name,
        SkillField::Category,
        SkillField::Level,
        SkillField::Percentage,
        SkillField::Description,
        SkillField::Icon,
        SkillField::Color,
        SkillField::Order,
        SkillField::IsActive,
    ];

    fn title(&self) -> &'static str {
        if self.id.is_some() { "Modifier la compétence" } else { "Nouvelle compétence" }
    }

    fn label(field: SkillField) -> &'static str {
        match field {
            SkillField::Name => "Nom",
            SkillField::Category => "Catégorie",
            SkillField::Level => "Niveau",
            SkillField::Percentage => "Pourcentage (0-100)",
            SkillField::Description => "Description",
            SkillField::Icon => "Icône",
            SkillField::Color => "Couleur",
            SkillField::Order => "Ordre",
            SkillField::IsActive => "Compétence active (affichée sur le portfolio)",
        }
    }

    fn kind(field: SkillField) -> FieldKind {
        match field {
            SkillField::Category | SkillField::Level => FieldKind::Choice,
            SkillField::Percentage | SkillField::Order => FieldKind::Number,
            SkillField::Icon => FieldKind::File,
            SkillField::IsActive => FieldKind::Toggle,
            _ => FieldKind::Text,
        }
    }

    fn required(field: SkillField) -> bool {
        matches!(
            field,
            SkillField::Name | SkillField::Category | SkillField::Level | SkillField::Percentage
        )
    }

    fn display(&self, field: SkillField) -> String {
        match field {
            SkillField::Name => self.name.clone(),
            SkillField::Category => self.category.to_string(),
            SkillField::Level => self.level.label().to_string(),
            SkillField::Percentage => self.percentage.clone(),
            SkillField::Description => self.description.clone(),
            SkillField::Icon => self.icon.clone(),
            SkillField::Color => self.color.clone(),
            SkillField::Order => self.order.clone(),
            SkillField::IsActive => if self.is_active { "[x]" } else { "[ ]" }.to_string(),
        }
    }

    fn apply(&mut self, msg: FormMsg<SkillField>) {
        match msg {
            FormMsg::SetText(field, value) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = value;
                }
            }
            FormMsg::Cycle(SkillField::Category, forward) => {
                self.category = cycle(&SkillCategory::KNOWN, &self.category, forward);
            }
            FormMsg::Cycle(SkillField::Level, forward) => {
                self.level = cycle(&SkillLevel::ALL, &self.level, forward);
            }
            FormMsg::Toggle(SkillField::IsActive) => {
                self.is_active = !self.is_active;
            }
            FormMsg::Cycle(..) | FormMsg::Toggle(_) => {}
            FormMsg::SelectFile(file) => {
                self.selected_file = Some(file);
            }
            FormMsg::RemoveImage => {
                self.selected_file = None;
                self.icon.clear();
            }
        }
    }

    fn is_new(&self) -> bool {
        self.id.is_none()
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    fn submit_request(&self) -> Result<SubmitRequest, FormError> {
        Ok(SubmitRequest::Skill {
            id: self.id.clone(),
            payload: self.to_payload()?,
            file: self.selected_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(percentage: &str) -> SkillDraft {
        let mut draft = SkillDraft::new();
        draft.apply(FormMsg::SetText(SkillField::Name, "Rust".into()));
        draft.apply(FormMsg::SetText(SkillField::Percentage, percentage.into()));
        draft
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert_eq!(named("0").to_payload().unwrap().percentage, 0);
        assert_eq!(named("100").to_payload().unwrap().percentage, 100);
    }

    #[test]
    fn percentage_outside_range_is_rejected() {
        let expected = Err(FormError::OutOfRange { field: "percentage", min: 0, max: 100 });
        assert_eq!(named("101").to_payload(), expected);
        assert_eq!(named("-1").to_payload(), expected);
        assert_eq!(named("abc").to_payload(), Err(FormError::NotANumber("percentage")));
    }

    #[test]
    fn name_is_required() {
        let mut draft = named("50");
        draft.apply(FormMsg::SetText(SkillField::Name, String::new()));
        assert_eq!(draft.to_payload(), Err(FormError::Required("name")));
    }

    #[test]
    fn unrecognized_level_is_not_sent_back() {
        let mut draft = named("50");
        draft.level = SkillLevel::Unknown;
        assert_eq!(draft.to_payload(), Err(FormError::Required("level")));
    }

    #[test]
    fn defaults_match_a_new_skill() {
        let payload = named("50").to_payload().unwrap();
        assert_eq!(payload.category, SkillCategory::Frontend);
        assert_eq!(payload.level, SkillLevel::Intermediate);
        assert_eq!(payload.percentage, 50);
        assert!(payload.is_active);
        assert_eq!(payload.order, 0);
    }

    #[test]
    fn toggles_and_choices_go_through_the_reducer() {
        let mut draft = named("50");
        draft.apply(FormMsg::Toggle(SkillField::IsActive));
        draft.apply(FormMsg::Cycle(SkillField::Category, false));
        draft.apply(FormMsg::Cycle(SkillField::Level, true));

        assert!(!draft.is_active);
        assert_eq!(draft.category, SkillCategory::Design);
        assert_eq!(draft.level, SkillLevel::Advanced);
        assert_eq!(draft.display(SkillField::IsActive), "[ ]");
    }

    #[test]
    fn editing_keeps_existing_values() {
        let skill = Skill {
            id: "s9".into(),
            name: "Docker".into(),
            category: SkillCategory::Other("DevOps".into()),
            level: SkillLevel::Beginner,
            percentage: 0,
            description: Some("Containers".into()),
            icon: None,
            color: Some("cyan".into()),
            order: 4,
            is_active: false,
        };

        let draft = SkillDraft::from_existing(&skill);
        assert_eq!(draft.title(), "Modifier la compétence");
        assert_eq!(draft.percentage, "0");

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.category, SkillCategory::Other("DevOps".into()));
        assert_eq!(payload.percentage, 0);
        assert!(!payload.is_active);
    }
}
