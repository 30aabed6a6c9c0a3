//! `reqwest` implementation of [`PortfolioApi`].

use core::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::{API_PREFIX, ApiError, PortfolioApi, SkillsByCategory, UploadedAsset};
use crate::assets::SelectedFile;
use crate::config::normalize_base_url;
use crate::models::{
    DashboardStats, Project, ProjectPayload, RecentActivity, Skill, SkillPayload, TimelineEntry,
};

/// HTTP client bound to one backend origin.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url`, which is normalized first.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        info!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        info!(%method, %url, "Sending");

        let response = self.client.request(method, &url).json(body).send().await?;
        read_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        info!(%url, "DELETE");

        let response = self.client.delete(&url).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn upload(&self, path: &str, file: &SelectedFile) -> Result<UploadedAsset, ApiError> {
        let url = self.url(path);
        info!(%url, file = %file.file_name, size = file.bytes.len(), "Uploading icon");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime.essence_str())?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %body, "Backend returned an error");
    Err(ApiError::from_status(status.as_u16(), body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl PortfolioApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects").await
    }

    async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{id}")).await
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.send_json(Method::POST, "/projects", payload).await
    }

    async fn update_project(&self, id: &str, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.send_json(Method::PATCH, &format!("/projects/{id}"), payload).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{id}")).await
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
        self.get("/skills").await
    }

    async fn get_skill(&self, id: &str) -> Result<Skill, ApiError> {
        self.get(&format!("/skills/{id}")).await
    }

    async fn skills_by_category(&self) -> Result<SkillsByCategory, ApiError> {
        self.get("/skills/by-categories").await
    }

    async fn create_skill(&self, payload: &SkillPayload) -> Result<Skill, ApiError> {
        self.send_json(Method::POST, "/skills", payload).await
    }

    async fn update_skill(&self, id: &str, payload: &SkillPayload) -> Result<Skill, ApiError> {
        self.send_json(Method::PATCH, &format!("/skills/{id}"), payload).await
    }

    async fn delete_skill(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/skills/{id}")).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats").await
    }

    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ApiError> {
        self.get("/dashboard/timeline").await
    }

    async fn recent_activity(&self) -> Result<Vec<RecentActivity>, ApiError> {
        self.get("/dashboard/recent-activity").await
    }

    async fn upload_project_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError> {
        self.upload("/upload/project-icon", file).await
    }

    async fn upload_skill_icon(&self, file: &SelectedFile) -> Result<UploadedAsset, ApiError> {
        self.upload("/upload/skill-icon", file).await
    }
}
