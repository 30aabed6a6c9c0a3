//! Application controller: owns the query store and the API handle, turns
//! key events into page actions, and applies results reported by background
//! tasks.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::api::PortfolioApi;
use crate::config::Config;
use crate::forms::{self, ProjectDraft, SkillDraft, SubmitPhase, SubmitRequest};
use crate::models::{EntityId, Project, Skill};
use crate::store::{self, QueryData, QueryKey, QueryStore, QueryView};
use crate::ui::form::{FormAction, FormState};
use crate::ui::projects::{self, ProjectAction, ProjectsState};
use crate::ui::skills::{self, SkillAction, SkillsState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Projects,
    Skills,
    Settings,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Projects, Page::Skills, Page::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Projects => "Projets",
            Page::Skills => "Compétences",
            Page::Settings => "Paramètres",
        }
    }

    /// Keys fetched when the page is shown.
    pub fn keys(self) -> &'static [QueryKey] {
        match self {
            Page::Dashboard => &[QueryKey::DashboardStats, QueryKey::RecentActivity],
            Page::Projects => &[QueryKey::Projects],
            Page::Skills => &[QueryKey::Skills],
            Page::Settings => &[],
        }
    }

    pub fn hints(self) -> &'static str {
        match self {
            Page::Dashboard => "R - Actualiser",
            Page::Projects | Page::Skills => {
                "Up/Down - Naviguer | N - Nouveau | E - Éditer | D - Supprimer | R - Actualiser"
            }
            Page::Settings => "",
        }
    }

    fn from_digit(digit: char) -> Option<Page> {
        let index = digit.to_digit(10)? as usize;
        Page::ALL.get(index.checked_sub(1)?).copied()
    }

    fn next(self) -> Page {
        let index = Page::ALL.iter().position(|page| *page == self).unwrap_or(0);
        Page::ALL[(index + 1) % Page::ALL.len()]
    }

    fn previous(self) -> Page {
        let index = Page::ALL.iter().position(|page| *page == self).unwrap_or(0);
        Page::ALL[(index + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

pub enum Modal {
    Project(FormState<ProjectDraft>),
    Skill(FormState<SkillDraft>),
}

impl Modal {
    fn phase_mut(&mut self) -> &mut SubmitPhase {
        match self {
            Modal::Project(form) => &mut form.phase,
            Modal::Skill(form) => &mut form.phase,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        match self {
            Modal::Project(form) => form.handle_key(key),
            Modal::Skill(form) => form.handle_key(key),
        }
    }
}

/// Results sent back by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    Fetched {
        key: QueryKey,
        result: Result<QueryData, String>,
    },
    Deleted {
        key: QueryKey,
        id: EntityId,
        result: Result<(), String>,
    },
    Submitted {
        owner: QueryKey,
        phase: SubmitPhase,
    },
}

pub struct App {
    api: Arc<dyn PortfolioApi>,
    pub config: Config,
    pub store: QueryStore,
    pub page: Page,
    pub sidebar_open: bool,
    pub projects_state: ProjectsState,
    pub skills_state: SkillsState,
    pub modal: Option<Modal>,
    pub notice: Option<String>,
    pub should_quit: bool,
    tx: UnboundedSender<AppMessage>,
    rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(api: Arc<dyn PortfolioApi>, config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            api,
            config,
            store: QueryStore::new(),
            page: Page::Dashboard,
            sidebar_open: true,
            projects_state: ProjectsState::new(),
            skills_state: SkillsState::new(),
            modal: None,
            notice: None,
            should_quit: false,
            tx,
            rx,
        }
    }

    /// Show a page and fetch everything it displays.
    pub fn open_page(&mut self, page: Page) {
        if page != self.page {
            self.notice = None;
        }
        self.page = page;
        for key in page.keys() {
            self.spawn_fetch(*key);
        }
    }

    fn spawn_fetch(&mut self, key: QueryKey) {
        if !self.store.begin_fetch(key) {
            return;
        }

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store::fetch(api.as_ref(), key).await.map_err(|err| {
                warn!(key = key.name(), error = %err, "Fetch failed");
                err.to_string()
            });
            let _ = tx.send(AppMessage::Fetched { key, result });
        });
    }

    fn invalidate(&mut self, key: QueryKey) {
        if self.store.invalidate(key) {
            self.spawn_fetch(key);
        }
    }

    fn delete(&mut self, key: QueryKey, id: EntityId) {
        info!(key = key.name(), %id, "Deleting");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match key {
                QueryKey::Skills => api.delete_skill(&id).await,
                _ => api.delete_project(&id).await,
            }
            .map_err(|err| err.to_string());
            let _ = tx.send(AppMessage::Deleted { key, id, result });
        });
    }

    fn submit(&mut self, request: SubmitRequest) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.phase_mut().in_flight() {
            return;
        }

        let uploads = matches!(
            &request,
            SubmitRequest::Project { file: Some(_), .. } | SubmitRequest::Skill { file: Some(_), .. }
        );
        *modal.phase_mut() = if uploads {
            SubmitPhase::Uploading
        } else {
            SubmitPhase::Submitting
        };

        let owner = request.owner();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let report = |phase: SubmitPhase| {
                let _ = tx.send(AppMessage::Submitted { owner, phase });
            };
            let phase = match forms::submit::run(api.as_ref(), request, report).await {
                Ok(()) => SubmitPhase::Done,
                Err(err) => SubmitPhase::Failed(err),
            };
            let _ = tx.send(AppMessage::Submitted { owner, phase });
        });
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Fetched { key, result } => {
                if self.store.finish_fetch(key, result) {
                    self.spawn_fetch(key);
                }
                self.clamp_selections();
            }
            AppMessage::Deleted { key, id, result } => match result {
                Ok(()) => {
                    info!(key = key.name(), %id, "Deleted");
                    self.notice = Some("Élément supprimé".to_string());
                    self.invalidate(key);
                }
                Err(message) => {
                    warn!(key = key.name(), %id, error = %message, "Delete failed");
                    self.notice = Some(format!("Erreur lors de la suppression : {message}"));
                }
            },
            AppMessage::Submitted { owner, phase } => match phase {
                SubmitPhase::Done => {
                    self.modal = None;
                    self.notice = Some(match owner {
                        QueryKey::Skills => "Compétence enregistrée".to_string(),
                        _ => "Projet enregistré".to_string(),
                    });
                    self.invalidate(owner);
                }
                phase => {
                    if let Some(modal) = self.modal.as_mut() {
                        *modal.phase_mut() = phase;
                    }
                }
            },
        }
    }

    fn clamp_selections(&mut self) {
        if let QueryView::Ready(projects) = self.store.projects() {
            self.projects_state.clamp(projects.len());
        }
        if let QueryView::Ready(skills) = self.store.skills() {
            self.skills_state.clamp(skills.len());
        }
    }

    fn is_confirming(&self) -> bool {
        match self.page {
            Page::Projects => self.projects_state.is_confirming(),
            Page::Skills => self.skills_state.is_confirming(),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(modal) = self.modal.as_mut() {
            match modal.handle_key(key) {
                Some(FormAction::Cancel) => self.modal = None,
                Some(FormAction::Submit(request)) => self.submit(request),
                None => {}
            }
            return;
        }

        if !self.is_confirming() && self.handle_global_key(key) {
            return;
        }

        match self.page {
            Page::Dashboard => {
                if key.code == KeyCode::Char('r') {
                    self.open_page(Page::Dashboard);
                }
            }
            Page::Projects => self.handle_projects_key(key),
            Page::Skills => self.handle_skills_key(key),
            Page::Settings => {}
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') => self.sidebar_open = !self.sidebar_open,
            KeyCode::Tab => self.open_page(self.page.next()),
            KeyCode::BackTab => self.open_page(self.page.previous()),
            KeyCode::Char(digit) => match Page::from_digit(digit) {
                Some(page) => self.open_page(page),
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn handle_projects_key(&mut self, key: KeyEvent) {
        let projects: &[Project] = match self.store.projects() {
            QueryView::Ready(projects) => projects.as_slice(),
            _ => &[],
        };

        match projects::handle_input(&mut self.projects_state, key, projects) {
            Some(ProjectAction::NewProject) => {
                self.modal = Some(Modal::Project(FormState::new(ProjectDraft::new())));
            }
            Some(ProjectAction::EditProject(project)) => {
                self.modal = Some(Modal::Project(FormState::new(ProjectDraft::from_existing(&project))));
            }
            Some(ProjectAction::DeleteProject(id)) => self.delete(QueryKey::Projects, id),
            Some(ProjectAction::Retry) => self.spawn_fetch(QueryKey::Projects),
            None => {}
        }
    }

    fn handle_skills_key(&mut self, key: KeyEvent) {
        let skills: &[Skill] = match self.store.skills() {
            QueryView::Ready(skills) => skills.as_slice(),
            _ => &[],
        };

        match skills::handle_input(&mut self.skills_state, key, skills) {
            Some(SkillAction::NewSkill) => {
                self.modal = Some(Modal::Skill(FormState::new(SkillDraft::new())));
            }
            Some(SkillAction::EditSkill(skill)) => {
                self.modal = Some(Modal::Skill(FormState::new(SkillDraft::from_existing(&skill))));
            }
            Some(SkillAction::DeleteSkill(id)) => self.delete(QueryKey::Skills, id),
            Some(SkillAction::Retry) => self.spawn_fetch(QueryKey::Skills),
            None => {}
        }
    }

    /// Wait for the next task result and apply it.
    #[cfg(test)]
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }

    /// Apply every result that is already waiting.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }
}
