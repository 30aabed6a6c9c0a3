//! Upload-then-save pipeline shared by both forms.

use thiserror::Error;
use tracing::{info, warn};

use super::FormError;
use crate::api::{ApiError, PortfolioApi};
use crate::assets::SelectedFile;
use crate::models::{EntityId, ProjectPayload, SkillPayload};
use crate::store::QueryKey;

/// Where a form submission currently stands.
#[derive(Debug, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Uploading,
    Submitting,
    Done,
    Failed(SubmitError),
}

impl SubmitPhase {
    /// Submitting is refused while this is true.
    pub fn in_flight(&self) -> bool {
        matches!(self, SubmitPhase::Uploading | SubmitPhase::Submitting)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error("Erreur lors de l'upload de l'image : {0}")]
    Upload(#[source] ApiError),

    #[error("Erreur : {0}")]
    Mutation(#[source] ApiError),
}

impl SubmitError {
    /// Upload failures block the form behind an alert; other failures are shown inline.
    pub fn is_blocking(&self) -> bool {
        matches!(self, SubmitError::Upload(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Project {
        id: Option<EntityId>,
        payload: ProjectPayload,
        file: Option<SelectedFile>,
    },
    Skill {
        id: Option<EntityId>,
        payload: SkillPayload,
        file: Option<SelectedFile>,
    },
}

impl SubmitRequest {
    /// List that has to be invalidated once the request succeeds.
    pub fn owner(&self) -> QueryKey {
        match self {
            SubmitRequest::Project { .. } => QueryKey::Projects,
            SubmitRequest::Skill { .. } => QueryKey::Skills,
        }
    }
}

/// Run a submission: upload the staged icon if there is one, then create or
/// update. `report` sees every phase change before the phase's request starts.
pub async fn run(
    api: &dyn PortfolioApi,
    request: SubmitRequest,
    report: impl Fn(SubmitPhase) + Send + Sync,
) -> Result<(), SubmitError> {
    match request {
        SubmitRequest::Project { id, mut payload, file } => {
            if let Some(file) = file {
                report(SubmitPhase::Uploading);
                payload.icon = api
                    .upload_project_icon(&file)
                    .await
                    .map_err(upload_failed)?
                    .url;
            }

            report(SubmitPhase::Submitting);
            let saved = match id {
                Some(id) => api.update_project(&id, &payload).await,
                None => api.create_project(&payload).await,
            }
            .map_err(SubmitError::Mutation)?;
            info!(id = %saved.id, title = %saved.title, "Project saved");
        }
        SubmitRequest::Skill { id, mut payload, file } => {
            if let Some(file) = file {
                report(SubmitPhase::Uploading);
                payload.icon = api
                    .upload_skill_icon(&file)
                    .await
                    .map_err(upload_failed)?
                    .url;
            }

            report(SubmitPhase::Submitting);
            let saved = match id {
                Some(id) => api.update_skill(&id, &payload).await,
                None => api.create_skill(&payload).await,
            }
            .map_err(SubmitError::Mutation)?;
            info!(id = %saved.id, name = %saved.name, "Skill saved");
        }
    }

    Ok(())
}

fn upload_failed(err: ApiError) -> SubmitError {
    warn!(error = %err, "Icon upload failed");
    SubmitError::Upload(err)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::forms::project::ProjectField;
    use crate::forms::skill::SkillField;
    use crate::forms::{Draft, FormMsg, ProjectDraft, SkillDraft};

    fn project_draft() -> ProjectDraft {
        let mut draft = ProjectDraft::new();
        draft.apply(FormMsg::SetText(ProjectField::Title, "TogoSchool".into()));
        draft.apply(FormMsg::SetText(ProjectField::Category, "Education".into()));
        draft.apply(FormMsg::SetText(ProjectField::Description, "School platform".into()));
        draft.apply(FormMsg::SetText(ProjectField::Technologies, "React, NestJS".into()));
        draft.icon = "/uploads/projects/existing.png".into();
        draft
    }

    fn png(name: &str) -> SelectedFile {
        SelectedFile {
            path: name.into(),
            file_name: name.into(),
            mime: mime::IMAGE_PNG,
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            preview: "data:image/png;base64,iVBORw==".into(),
        }
    }

    fn phase_name(phase: &SubmitPhase) -> &'static str {
        match phase {
            SubmitPhase::Idle => "idle",
            SubmitPhase::Uploading => "uploading",
            SubmitPhase::Submitting => "submitting",
            SubmitPhase::Done => "done",
            SubmitPhase::Failed(_) => "failed",
        }
    }

    #[tokio::test]
    async fn create_without_file_keeps_icon_and_skips_upload() {
        let api = FakeApi::new();
        let request = project_draft().submit_request().unwrap();
        let phases = Mutex::new(Vec::new());

        run(&api, request, |phase| phases.lock().unwrap().push(phase_name(&phase)))
            .await
            .unwrap();

        assert_eq!(api.calls(), ["create_project"]);
        assert_eq!(*phases.lock().unwrap(), ["submitting"]);
        let sent = api.project_payloads.lock().unwrap();
        assert_eq!(sent[0].icon, "/uploads/projects/existing.png");
    }

    #[tokio::test]
    async fn selected_file_is_uploaded_before_create() {
        let api = FakeApi::new();
        let mut draft = project_draft();
        draft.apply(FormMsg::SelectFile(png("logo.png")));
        let phases = Mutex::new(Vec::new());

        run(&api, draft.submit_request().unwrap(), |phase| {
            phases.lock().unwrap().push(phase_name(&phase))
        })
        .await
        .unwrap();

        assert_eq!(api.calls(), ["upload_project_icon:logo.png", "create_project"]);
        assert_eq!(*phases.lock().unwrap(), ["uploading", "submitting"]);
        let sent = api.project_payloads.lock().unwrap();
        assert_eq!(sent[0].icon, "/uploads/projects/logo.png");
    }

    #[tokio::test]
    async fn existing_id_updates_instead_of_creating() {
        let api = FakeApi::new();
        let mut draft = SkillDraft::new();
        draft.id = Some("s3".into());
        draft.apply(FormMsg::SetText(SkillField::Name, "Rust".into()));
        draft.apply(FormMsg::SelectFile(png("rust.png")));

        run(&api, draft.submit_request().unwrap(), |_| {}).await.unwrap();

        assert_eq!(api.calls(), ["upload_skill_icon:rust.png", "update_skill:s3"]);
        assert_eq!(api.skill_payloads.lock().unwrap()[0].icon, "/uploads/skills/rust.png");
    }

    #[tokio::test]
    async fn upload_failure_blocks_the_mutation() {
        let api = FakeApi::new();
        api.fail_uploads.store(true, Ordering::SeqCst);
        let mut draft = project_draft();
        draft.apply(FormMsg::SelectFile(png("huge.png")));

        let err = run(&api, draft.submit_request().unwrap(), |_| {}).await.unwrap_err();

        assert!(err.is_blocking());
        assert_eq!(api.calls(), ["upload_project_icon:huge.png"]);
    }

    #[tokio::test]
    async fn mutation_failure_is_reported_inline() {
        let api = FakeApi::new();
        api.fail_mutations.store(true, Ordering::SeqCst);

        let err = run(&api, project_draft().submit_request().unwrap(), |_| {})
            .await
            .unwrap_err();

        assert!(!err.is_blocking());
        assert_eq!(err.to_string(), "Erreur : title should not be empty (HTTP 400)");
    }

    #[test]
    fn requests_know_their_owning_list() {
        let request = project_draft().submit_request().unwrap();
        assert_eq!(request.owner(), QueryKey::Projects);
    }
}
