//! In-memory backend that records every call, for controller and form tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{ApiError, PortfolioApi, SkillsByCategory, UploadedAsset};
use crate::assets::SelectedFile;
use crate::models::{
    DashboardStats, Project, ProjectPayload, RecentActivity, Skill, SkillPayload, TimelineEntry,
    group_by_category,
};

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    pub projects: Mutex<Vec<Project>>,
    pub skills: Mutex<Vec<Skill>>,
    pub project_payloads: Mutex<Vec<ProjectPayload>>,
    pub skill_payloads: Mutex<Vec<SkillPayload>>,
    pub stats: Mutex<DashboardStats>,
    pub activity: Mutex<Vec<RecentActivity>>,
    pub fail_uploads: AtomicBool,
    pub fail_mutations: AtomicBool,
    pub fail_lists: AtomicBool,
    pub fail_stats: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        let api = Self::new();
        *api.projects.lock().unwrap() = projects;
        api
    }

    pub fn with_skills(skills: Vec<Skill>) -> Self {
        let api = Self::new();
        *api.skills.lock().unwrap() = skills;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn check(flag: &AtomicBool, status: u16, message: &str) -> Result<(), ApiError> {
        if flag.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status,
                message: message.to_string(),
                body: String::new(),
            });
        }
        Ok(())
    }

    fn project_from(id: String, payload: &ProjectPayload) -> Project {
        Project {
            id,
            title: payload.title.clone(),
            category: payload.category.clone(),
            description: payload.description.clone(),
            technologies: payload.technologies.clone(),
            role: payload.role,
            role_description: Some(payload.role_description.clone()),
            team: Some(payload.team.clone()),
            duration: Some(payload.duration.clone()),
            github_link: Some(payload.github_link.clone()),
            demo_link: Some(payload.demo_link.clone()),
            status: payload.status,
            icon: Some(payload.icon.clone()),
            color: Some(payload.color.clone()),
            order: payload.order,
        }
    }

    fn skill_from(id: String, payload: &SkillPayload) -> Skill {
        Skill {
            id,
            name: payload.name.clone(),
            category: payload.category.clone(),
            level: payload.level,
            percentage: payload.percentage,
            description: Some(payload.description.clone()),
            icon: Some(payload.icon.clone()),
            color: Some(payload.color.clone()),
            order: payload.order,
            is_active: payload.is_active,
        }
    }
}

#[async_trait]
impl PortfolioApi for FakeApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record("list_projects");
        Self::check(&self.fail_lists, 500, "Internal Server Error")?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.record(format!("get_project:{id}"));
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, String::new()))
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.record("create_project");
        Self::check(&self.fail_mutations, 400, "title should not be empty")?;
        self.project_payloads.lock().unwrap().push(payload.clone());

        let mut projects = self.projects.lock().unwrap();
        let project = Self::project_from(format!("p{}", projects.len() + 1), payload);
        projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.record(format!("update_project:{id}"));
        Self::check(&self.fail_mutations, 400, "title should not be empty")?;
        self.project_payloads.lock().unwrap().push(payload.clone());
        Ok(Self::project_from(id.to_string(), payload))
    }

    async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_project:{id}"));
        Self::check(&self.fail_mutations, 404, "Project not found")?;
        self.projects.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
        self.record("list_skills");
        Self::check(&self.fail_lists, 500, "Internal Server Error")?;
        Ok(self.skills.lock().unwrap().clone())
    }

    async fn get_skill(&self, id: &str) -> Result<Skill, ApiError> {
        self.record(format!("get_skill:{id}"));
        self.skills
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, String::new()))
    }

    async fn skills_by_category(&self) -> Result<SkillsByCategory, ApiError> {
        self.record("skills_by_category");
        let skills = self.skills.lock().unwrap();
        let grouped = group_by_category(&skills)
            .into_iter()
            .map(|(category, members)| (category.to_string(), members.into_iter().cloned().collect()))
            .collect();
        Ok(SkillsByCategory(grouped))
    }

    async fn create_skill(&self, payload: &SkillPayload) -> Result<Skill, ApiError> {
        self.record("create_skill");
        Self::check(&self.fail_mutations, 400, "name should not be empty")?;
        self.skill_payloads.lock().unwrap().push(payload.clone());

        let mut skills = self.skills.lock().unwrap();
        let skill = Self::skill_from(format!("s{}", skills.len() + 1), payload);
        skills.push(skill.clone());
        Ok(skill)
    }

    async fn update_skill(&self, id: &str, payload: &SkillPayload) -> Result<Skill, ApiError> {
        self.record(format!("update_skill:{id}"));
        Self::check(&self.fail_mutations, 400, "name should not be empty")?;
        self.skill_payloads.lock().unwrap().push(payload.clone());
        Ok(Self::skill_from(id.to_string(), payload))
    }

    async fn delete_skill(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_skill:{id}"));
        Self::check(&self.fail_mutations, 404, "Skill not found")?;
        self.skills.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record("dashboard_stats");
        Self::check(&self.fail_lists, 500, "Internal Server Error")?;
        Self::check(&self.fail_stats, 500, "Internal Server Error")?;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ApiError> {
        self.record("timeline");
        Ok(Vec::new())
    }

    async fn recent_activity(&self) -> Result<Vec<RecentActivity>, ApiError> {
        self.record("recent_activity");
        Self::check(&self.fail_lists, 500, "Internal Server Error")?;
        Ok(self.activity.lock().unwrap().clone())
    }

    async fn upload_project_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError> {
        self.record(format!("upload_project_icon:{}", file.file_name));
        Self::check(&self.fail_uploads, 413, "File too large")?;
        Ok(UploadedAsset {
            url: format!("/uploads/projects/{}", file.file_name),
        })
    }

    async fn upload_skill_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError> {
        self.record(format!("upload_skill_icon:{}", file.file_name));
        Self::check(&self.fail_uploads, 413, "File too large")?;
        Ok(UploadedAsset {
            url: format!("/uploads/skills/{}", file.file_name),
        })
    }
}
