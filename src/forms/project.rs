use super::{Draft, FieldKind, FormError, FormMsg, SubmitRequest, cycle, parse_in_range, require};
use crate::assets::SelectedFile;
use crate::models::{EntityId, Project, ProjectPayload, ProjectRole, ProjectStatus};

pub const DEFAULT_PROJECT_COLOR: &str = "from-blue-500 to-purple-500";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Category,
    Description,
    Technologies,
    Role,
    RoleDescription,
    Team,
    Duration,
    GithubLink,
    DemoLink,
    Status,
    Order,
    Icon,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub id: Option<EntityId>,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Comma separated, split only on submit
    pub technologies: String,
    pub role: ProjectRole,
    pub role_description: String,
    pub team: String,
    pub duration: String,
    pub github_link: String,
    pub demo_link: String,
    pub status: ProjectStatus,
    pub order: String,
    pub icon: String,
    pub color: String,
    pub selected_file: Option<SelectedFile>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            category: String::new(),
            description: String::new(),
            technologies: String::new(),
            role: ProjectRole::Developer,
            role_description: String::new(),
            team: String::new(),
            duration: String::new(),
            github_link: String::new(),
            demo_link: String::new(),
            status: ProjectStatus::Completed,
            order: "0".to_string(),
            icon: String::new(),
            color: DEFAULT_PROJECT_COLOR.to_string(),
            selected_file: None,
        }
    }
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_existing(project: &Project) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            id: Some(project.id.clone()),
            title: project.title.clone(),
            category: project.category.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            role: project.role,
            role_description: text(&project.role_description),
            team: text(&project.team),
            duration: text(&project.duration),
            github_link: text(&project.github_link),
            demo_link: text(&project.demo_link),
            status: project.status,
            order: project.order.to_string(),
            icon: text(&project.icon),
            color: project
                .color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            selected_file: None,
        }
    }

    fn text(&self, field: ProjectField) -> Option<&str> {
        Some(match field {
            ProjectField::Title => self.title.as_str(),
            ProjectField::Category => self.category.as_str(),
            ProjectField::Description => self.description.as_str(),
            ProjectField::Technologies => self.technologies.as_str(),
            ProjectField::RoleDescription => self.role_description.as_str(),
            ProjectField::Team => self.team.as_str(),
            ProjectField::Duration => self.duration.as_str(),
            ProjectField::GithubLink => self.github_link.as_str(),
            ProjectField::DemoLink => self.demo_link.as_str(),
            ProjectField::Order => self.order.as_str(),
            ProjectField::Color => self.color.as_str(),
            ProjectField::Role | ProjectField::Status | ProjectField::Icon => return None,
        })
    }

    fn text_mut(&mut self, field: ProjectField) -> Option<&mut String> {
        Some(match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Category => &mut self.category,
            ProjectField::Description => &mut self.description,
            ProjectField::Technologies => &mut self.technologies,
            ProjectField::RoleDescription => &mut self.role_description,
            ProjectField::Team => &mut self.team,
            ProjectField::Duration => &mut self.duration,
            ProjectField::GithubLink => &mut self.github_link,
            ProjectField::DemoLink => &mut self.demo_link,
            ProjectField::Order => &mut self.order,
            ProjectField::Color => &mut self.color,
            ProjectField::Role | ProjectField::Status | ProjectField::Icon => return None,
        })
    }

    pub fn to_payload(&self) -> Result<ProjectPayload, FormError> {
        let technologies = split_technologies(&self.technologies);
        if technologies.is_empty() {
            return Err(FormError::Required("technologies"));
        }
        if self.role == ProjectRole::Unknown {
            return Err(FormError::Required("role"));
        }
        if self.status == ProjectStatus::Unknown {
            return Err(FormError::Required("status"));
        }

        Ok(ProjectPayload {
            title: require(&self.title, "title")?,
            category: require(&self.category, "category")?,
            description: require(&self.description, "description")?,
            technologies,
            role: self.role,
            role_description: self.role_description.clone(),
            team: self.team.clone(),
            duration: self.duration.clone(),
            github_link: self.github_link.clone(),
            demo_link: self.demo_link.clone(),
            status: self.status,
            icon: self.icon.clone(),
            color: self.color.clone(),
            order: parse_in_range(&self.order, "order", 0, i64::MAX)?,
        })
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(str::to_string)
        .collect()
}

impl Draft for ProjectDraft {
    type Field = ProjectField;

    const FIELDS: &'static [ProjectField] = &[
        ProjectField::Title,
        ProjectField::Category,
        ProjectField::Description,
        ProjectField::Technologies,
        ProjectField::Role,
        ProjectField::RoleDescription,
        ProjectField::Team,
        ProjectField::Duration,
        ProjectField::GithubLink,
        ProjectField::DemoLink,
        ProjectField::Status,
        ProjectField::Order,
        ProjectField::Icon,
        ProjectField::Color,
    ];

    fn title(&self) -> &'static str {
        if self.id.is_some() { "Modifier le projet" } else { "Nouveau projet" }
    }

    fn label(field: ProjectField) -> &'static str {
        match field {
            ProjectField::Title => "Titre",
            ProjectField::Category => "Catégorie",
            ProjectField::Description => "Description",
            ProjectField::Technologies => "Technologies (séparées par des virgules)",
            ProjectField::Role => "Rôle",
            ProjectField::RoleDescription => "Description du rôle",
            ProjectField::Team => "Équipe",
            ProjectField::Duration => "Durée",
            ProjectField::GithubLink => "Lien GitHub",
            ProjectField::DemoLink => "Lien Démo",
            ProjectField::Status => "Statut",
            ProjectField::Order => "Ordre",
            ProjectField::Icon => "Icône du projet",
            ProjectField::Color => "Couleur (gradient Tailwind)",
        }
    }

    fn kind(field: ProjectField) -> FieldKind {
        match field {
            ProjectField::Role | ProjectField::Status => FieldKind::Choice,
            ProjectField::Order => FieldKind::Number,
            ProjectField::Icon => FieldKind::File,
            _ => FieldKind::Text,
        }
    }

    fn required(field: ProjectField) -> bool {
        matches!(
            field,
            ProjectField::Title
                | ProjectField::Category
                | ProjectField::Description
                | ProjectField::Technologies
                | ProjectField::Role
                | ProjectField::Status
        )
    }

    fn display(&self, field: ProjectField) -> String {
        match field {
            ProjectField::Role => self.role.label().to_string(),
            ProjectField::Status => self.status.label().to_string(),
            ProjectField::Icon => self.icon.clone(),
            _ => self.text(field).map(str::to_string).unwrap_or_default(),
        }
    }

    fn apply(&mut self, msg: FormMsg<ProjectField>) {
        match msg {
            FormMsg::SetText(field, value) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = value;
                }
            }
            FormMsg::Cycle(ProjectField::Role, forward) => {
                self.role = cycle(&ProjectRole::ALL, &self.role, forward);
            }
            FormMsg::Cycle(ProjectField::Status, forward) => {
                self.status = cycle(&ProjectStatus::ALL, &self.status, forward);
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
        Ok(SubmitRequest::Project {
            id: self.id.clone(),
            payload: self.to_payload()?,
            file: self.selected_file.clone(),
        })
    }
}
