use crossterm::event::{KeyCode, KeyEvent};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::{Project, ProjectStatus};
use crate::store::QueryView;
use crate::ui::components::{popup, truncate};

// Represents the state of the projects page
#[derive(Default)]
pub struct ProjectsState {
    list_state: ListState,
    show_delete_confirmation: bool,
}

impl ProjectsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        self.list_state.select(Some(i));
    }

    /// Keep the selection inside the list after it was re-fetched.
    pub fn clamp(&mut self, len: usize) {
        self.list_state.select(match (self.list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        });
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn is_confirming(&self) -> bool {
        self.show_delete_confirmation
    }

    pub fn selected<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        self.list_state.selected().and_then(|i| projects.get(i))
    }
}

pub enum ProjectAction {
    NewProject,
    EditProject(Project),
    DeleteProject(String),
    Retry,
}

pub fn status_style(status: ProjectStatus) -> Style {
    let color = match status {
        ProjectStatus::Completed => Color::Green,
        ProjectStatus::InProgress => Color::Yellow,
        ProjectStatus::Future => Color::Blue,
        ProjectStatus::Unknown => Color::DarkGray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn render_projects<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    state: &mut ProjectsState,
    view: QueryView<'_, Vec<Project>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(area);

    let block = Block::default()
        .title("Projets - Gérez vos projets de portfolio")
        .borders(Borders::ALL);

    let projects = match view {
        QueryView::Loading => {
            let loading = Paragraph::new("Chargement des projets...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, chunks[0]);
            return;
        }
        QueryView::Failed(message) => {
            let failed = Paragraph::new(vec![
                Spans::from(Span::styled("Impossible de charger les projets", Style::default().fg(Color::Red))),
                Spans::from(message.to_string()),
                Spans::from(""),
                Spans::from("<R> Réessayer"),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(failed, chunks[0]);
            return;
        }
        QueryView::Ready(projects) => projects,
    };

    if projects.is_empty() {
        let empty = Paragraph::new(vec![
            Spans::from(""),
            Spans::from("Aucun projet pour le moment"),
            Spans::from(""),
            Spans::from("<N> Créer votre premier projet"),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, chunks[0]);
    } else {
        let width = chunks[0].width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = projects.iter().map(|project| project_item(project, width)).collect();

        let projects_list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(projects_list, chunks[0], &mut state.list_state);
    }

    let buttons_text = if state.selected(projects).is_some() {
        "<N> Nouveau projet | <E> Modifier | <D> Supprimer | <R> Rafraîchir"
    } else {
        "<N> Nouveau projet | <R> Rafraîchir"
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        popup::render_delete_confirmation(frame, area, "Êtes-vous sûr de vouloir supprimer ce projet ?");
    }
}

fn project_item(project: &Project, width: usize) -> ListItem<'static> {
    let (shown, hidden) = project.technology_preview(3);
    let mut technologies = shown.join(", ");
    if hidden > 0 {
        technologies.push_str(&format!(" +{hidden}"));
    }

    ListItem::new(vec![
        Spans::from(vec![
            Span::styled(project.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("[{}]", project.status.label()), status_style(project.status)),
            Span::raw("  "),
            Span::styled(project.category.clone(), Style::default().fg(Color::Gray)),
        ]),
        Spans::from(format!("  {}", truncate(&project.description, width))),
        Spans::from(Span::styled(format!("  {technologies}"), Style::default().fg(Color::Cyan))),
    ])
}

pub fn handle_input(state: &mut ProjectsState, key: KeyEvent, projects: &[Project]) -> Option<ProjectAction> {
    if state.show_delete_confirmation {
        match key.code {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state
                    .selected(projects)
                    .map(|project| ProjectAction::DeleteProject(project.id.clone()));
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => state.toggle_delete_confirmation(),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('n') => return Some(ProjectAction::NewProject),
        KeyCode::Char('r') => return Some(ProjectAction::Retry),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state
                .selected(projects)
                .map(|project| ProjectAction::EditProject(project.clone()));
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if state.selected(projects).is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.next(projects.len()),
        KeyCode::Up => state.previous(projects.len()),
        _ => {}
    }
    None
}
