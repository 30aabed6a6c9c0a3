use crossterm::event::{KeyCode, KeyEvent};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::assets::resolve_asset_url;
use crate::models::{Skill, SkillLevel, group_by_category};
use crate::store::QueryView;
use crate::ui::components::{percent_bar, popup, truncate};

/// State of the skills page. The selection indexes skills in display
/// order, i.e. grouped by category.
#[derive(Default)]
pub struct SkillsState {
    selected: Option<usize>,
    show_delete_confirmation: bool,
}

impl SkillsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        });
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn is_confirming(&self) -> bool {
        self.show_delete_confirmation
    }

    pub fn selected<'a>(&self, skills: &'a [Skill]) -> Option<&'a Skill> {
        let index = self.selected?;
        display_order(skills).get(index).copied()
    }
}

pub enum SkillAction {
    NewSkill,
    EditSkill(Skill),
    DeleteSkill(String),
    Retry,
}

/// Skills in the order the page lists them.
pub fn display_order(skills: &[Skill]) -> Vec<&Skill> {
    group_by_category(skills)
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect()
}

pub fn level_style(level: SkillLevel) -> Style {
    let color = match level {
        SkillLevel::Beginner => Color::Gray,
        SkillLevel::Intermediate => Color::Blue,
        SkillLevel::Advanced => Color::Green,
        SkillLevel::Expert => Color::Magenta,
        SkillLevel::Unknown => Color::DarkGray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn render_skills<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    state: &mut SkillsState,
    view: QueryView<'_, Vec<Skill>>,
    origin: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(area);

    let block = Block::default()
        .title("Compétences - Gérez vos compétences techniques et soft skills")
        .borders(Borders::ALL);

    let skills = match view {
        QueryView::Loading => {
            let loading = Paragraph::new("Chargement des compétences...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, chunks[0]);
            return;
        }
        QueryView::Failed(message) => {
            let failed = Paragraph::new(vec![
                Spans::from(Span::styled("Impossible de charger les compétences", Style::default().fg(Color::Red))),
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
        QueryView::Ready(skills) => skills,
    };

    if skills.is_empty() {
        let empty = Paragraph::new(vec![
            Spans::from(""),
            Spans::from("Aucune compétence pour le moment"),
            Spans::from(""),
            Spans::from("<N> Ajouter votre première compétence"),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, chunks[0]);
    } else {
        let width = chunks[0].width.saturating_sub(8) as usize;
        let mut items = Vec::new();
        let mut rows = Vec::new();

        for (category, members) in group_by_category(skills) {
            items.push(ListItem::new(Spans::from(Span::styled(
                format!("{} ({})", category, members.len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            for skill in members {
                rows.push(items.len());
                items.push(skill_item(skill, width, origin));
            }
        }

        let mut list_state = ListState::default();
        list_state.select(state.selected.and_then(|i| rows.get(i).copied()));

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    let buttons_text = if state.selected(skills).is_some() {
        "<N> Nouvelle compétence | <E> Modifier | <D> Supprimer | <R> Rafraîchir"
    } else {
        "<N> Nouvelle compétence | <R> Rafraîchir"
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        popup::render_delete_confirmation(frame, area, "Êtes-vous sûr de vouloir supprimer cette compétence ?");
    }
}

fn skill_item(skill: &Skill, width: usize, origin: &str) -> ListItem<'static> {
    let mut header = vec![
        Span::raw("  "),
        Span::styled(skill.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!("[{}]", skill.level.label()), level_style(skill.level)),
        Span::raw(format!("  {} {}%", percent_bar(u64::from(skill.percentage), 20), skill.percentage)),
    ];
    if !skill.is_active {
        header.push(Span::styled("  (inactive)", Style::default().fg(Color::DarkGray)));
    }

    let mut lines = vec![Spans::from(header)];
    if let Some(description) = skill.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Spans::from(format!("    {}", truncate(description, width))));
    }
    if let Some(icon) = skill.icon.as_deref().filter(|i| !i.is_empty()) {
        lines.push(Spans::from(Span::styled(
            format!("    {}", truncate(&resolve_asset_url(icon, origin), width)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

pub fn handle_input(state: &mut SkillsState, key: KeyEvent, skills: &[Skill]) -> Option<SkillAction> {
    if state.show_delete_confirmation {
        match key.code {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state
                    .selected(skills)
                    .map(|skill| SkillAction::DeleteSkill(skill.id.clone()));
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => state.toggle_delete_confirmation(),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('n') => return Some(SkillAction::NewSkill),
        KeyCode::Char('r') => return Some(SkillAction::Retry),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state.selected(skills).map(|skill| SkillAction::EditSkill(skill.clone()));
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if state.selected(skills).is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.next(skills.len()),
        KeyCode::Up => state.previous(skills.len()),
        _ => {}
    }
    None
}
