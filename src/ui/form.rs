//! Modal form shared by the project and skill pages.

use crossterm::event::{KeyCode, KeyEvent};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::assets::{SelectedFile, preview_source};
use crate::forms::{Draft, FieldKind, FormError, FormMsg, SubmitPhase, SubmitRequest};
use crate::ui::components::{popup, truncate};

pub enum FormAction {
    Cancel,
    Submit(SubmitRequest),
}

pub struct FormState<D: Draft> {
    pub draft: D,
    pub phase: SubmitPhase,
    field_index: usize,
    editing: bool,
    file_input: String,
    file_error: Option<String>,
    validation: Option<FormError>,
}

impl<D: Draft> FormState<D> {
    pub fn new(draft: D) -> Self {
        Self {
            draft,
            phase: SubmitPhase::Idle,
            field_index: 0,
            editing: false,
            file_input: String::new(),
            file_error: None,
            validation: None,
        }
    }

    pub fn current_field(&self) -> D::Field {
        D::FIELDS[self.field_index]
    }

    fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % D::FIELDS.len();
    }

    fn previous_field(&mut self) {
        self.field_index = (self.field_index + D::FIELDS.len() - 1) % D::FIELDS.len();
    }

    fn start_editing(&mut self) {
        let field = self.current_field();
        match D::kind(field) {
            FieldKind::Text | FieldKind::Number => self.editing = true,
            FieldKind::File => {
                self.editing = true;
                self.file_input.clear();
                self.file_error = None;
            }
            FieldKind::Choice => self.draft.apply(FormMsg::Cycle(field, true)),
            FieldKind::Toggle => self.draft.apply(FormMsg::Toggle(field)),
        }
    }

    fn edit_current_field(&mut self, key: KeyCode) {
        let field = self.current_field();
        let kind = D::kind(field);

        if kind == FieldKind::File {
            match key {
                KeyCode::Char(c) => self.file_input.push(c),
                KeyCode::Backspace => {
                    self.file_input.pop();
                }
                _ => {}
            }
            return;
        }

        let mut value = self.draft.display(field);
        match key {
            KeyCode::Char(c) if kind == FieldKind::Number && !(c.is_ascii_digit() || c == '-') => return,
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        self.draft.apply(FormMsg::SetText(field, value));
    }

    fn finish_editing(&mut self) {
        self.editing = false;
        if D::kind(self.current_field()) != FieldKind::File || self.file_input.trim().is_empty() {
            return;
        }

        match SelectedFile::load(self.file_input.trim()) {
            Ok(file) => {
                self.file_error = None;
                self.draft.apply(FormMsg::SelectFile(file));
            }
            Err(err) => self.file_error = Some(err.to_string()),
        }
    }

    fn submit(&mut self) -> Option<FormAction> {
        if self.phase.in_flight() {
            return None;
        }
        match self.draft.submit_request() {
            Ok(request) => {
                self.validation = None;
                Some(FormAction::Submit(request))
            }
            Err(err) => {
                self.validation = Some(err);
                None
            }
        }
    }

    fn blocking_error(&self) -> Option<String> {
        match &self.phase {
            SubmitPhase::Failed(err) if err.is_blocking() => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        if self.phase.in_flight() {
            return None;
        }

        if self.blocking_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.phase = SubmitPhase::Idle;
            }
            return None;
        }

        if self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.finish_editing(),
                code => self.edit_current_field(code),
            }
            return None;
        }

        let field = self.current_field();
        match key.code {
            KeyCode::Esc => return Some(FormAction::Cancel),
            KeyCode::Char('s') => return self.submit(),
            KeyCode::Up | KeyCode::BackTab => self.previous_field(),
            KeyCode::Down | KeyCode::Tab => self.next_field(),
            KeyCode::Enter => self.start_editing(),
            KeyCode::Left if D::kind(field) == FieldKind::Choice => {
                self.draft.apply(FormMsg::Cycle(field, false));
            }
            KeyCode::Right if D::kind(field) == FieldKind::Choice => {
                self.draft.apply(FormMsg::Cycle(field, true));
            }
            KeyCode::Char(' ') if D::kind(field) == FieldKind::Toggle => {
                self.draft.apply(FormMsg::Toggle(field));
            }
            KeyCode::Char('x') if D::kind(field) == FieldKind::File => {
                self.file_error = None;
                self.draft.apply(FormMsg::RemoveImage);
            }
            _ => {}
        }
        None
    }

    fn submit_label(&self) -> &'static str {
        match self.phase {
            SubmitPhase::Uploading => "Upload en cours...",
            SubmitPhase::Submitting => "Enregistrement...",
            _ if self.draft.is_new() => "<S> Créer",
            _ => "<S> Mettre à jour",
        }
    }
}

pub fn render_form<B: Backend, D: Draft>(frame: &mut Frame<B>, area: Rect, state: &FormState<D>, origin: &str) {
    let popup_area = popup::centered_rect(80, 90, area);
    frame.render_widget(Clear, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(D::FIELDS.len() as u16 + 2),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(popup_area);

    render_fields(frame, chunks[0], state, origin);
    render_status(frame, chunks[1], state);

    let help = if state.editing {
        "Enter - Valider le champ | Esc - Terminer"
    } else {
        "Up/Down - Champs | Enter - Éditer | Left/Right - Choix | Espace - Cocher | X - Retirer l'image | Esc - Annuler"
    };
    let footer = Paragraph::new(Spans::from(vec![
        Span::styled(state.submit_label(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(help, Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    if let Some(message) = state.blocking_error() {
        popup::render_alert(frame, area, &message);
    }
}

fn render_fields<B: Backend, D: Draft>(frame: &mut Frame<B>, area: Rect, state: &FormState<D>, origin: &str) {
    let width = area.width.saturating_sub(30) as usize;

    let items: Vec<ListItem> = D::FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.field_index;
            let marker = if D::required(*field) { " *" } else { "" };
            let label = format!("{}{}: ", D::label(*field), marker);

            let value = match D::kind(*field) {
                FieldKind::File if selected && state.editing => format!("Chemin: {}|", state.file_input),
                FieldKind::File => icon_summary(state, origin, width),
                FieldKind::Choice => format!("< {} >", state.draft.display(*field)),
                _ if selected && state.editing => format!("{}|", state.draft.display(*field)),
                _ => truncate(&state.draft.display(*field), width),
            };

            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value_style = if selected && state.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Spans::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(state.draft.title()));
    frame.render_widget(list, area);
}

fn icon_summary<D: Draft>(state: &FormState<D>, origin: &str, width: usize) -> String {
    let selected = state.draft.selected_file();
    let summary = match (selected, preview_source(selected, state.draft.icon(), origin)) {
        (Some(file), Some(preview)) => format!("{} ({}, {}) {}", file.file_name, file.mime.essence_str(), file.size_label(), preview),
        (None, Some(url)) => url,
        (_, None) => "Aucune image (Enter pour choisir un fichier PNG, JPG, SVG, WebP, max 5MB)".to_string(),
    };
    truncate(&summary, width)
}

fn render_status<B: Backend, D: Draft>(frame: &mut Frame<B>, area: Rect, state: &FormState<D>) {
    let (message, color) = match (&state.phase, &state.validation, &state.file_error) {
        (SubmitPhase::Failed(err), _, _) if !err.is_blocking() => (err.to_string(), Color::Red),
        (_, Some(err), _) => (err.to_string(), Color::Red),
        (_, _, Some(err)) => (err.clone(), Color::Red),
        (SubmitPhase::Uploading, _, _) => ("Upload de l'image...".to_string(), Color::Yellow),
        (SubmitPhase::Submitting, _, _) => ("Enregistrement...".to_string(), Color::Yellow),
        _ => ("* champs obligatoires".to_string(), Color::Gray),
    };

    let status = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
