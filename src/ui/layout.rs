//! Shell drawn around every page: header, sidebar, content, footer, and the
//! form modal on top.

use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Modal, Page};
use crate::store::QueryKey;
use crate::ui::{dashboard, form, projects, settings, skills};

const SIDEBAR_WIDTH: u16 = 22;

pub fn draw<B: Backend>(frame: &mut Frame<B>, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)].as_ref())
        .split(frame.size());

    render_header(frame, rows[0], app);

    let body = if app.sidebar_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)].as_ref())
            .split(rows[1]);
        render_sidebar(frame, columns[0], app.page);
        columns[1]
    } else {
        rows[1]
    };

    render_page(frame, body, app);
    render_footer(frame, rows[2], app);

    let area = frame.size();
    let origin = app.config.api_url.as_str();
    match &app.modal {
        Some(Modal::Project(state)) => form::render_form(frame, area, state, origin),
        Some(Modal::Skill(state)) => form::render_form(frame, area, state, origin),
        None => {}
    }
}

fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect, app: &App) {
    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Portfolio Admin", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::raw(app.page.title()),
        Span::styled(format!("  |  API : {}", app.config.api_url), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_sidebar<B: Backend>(frame: &mut Frame<B>, area: Rect, current: Page) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if *page == current {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {} {}", i + 1, page.title()), style))
        })
        .collect();

    let sidebar = List::new(items).block(Block::default().title("Navigation").borders(Borders::ALL));
    frame.render_widget(sidebar, area);
}

fn render_page<B: Backend>(frame: &mut Frame<B>, area: Rect, app: &mut App) {
    let origin = app.config.api_url.as_str();
    match app.page {
        Page::Dashboard => {
            dashboard::render_dashboard(frame, area, app.store.dashboard_stats(), app.store.recent_activity())
        }
        Page::Projects => projects::render_projects(frame, area, &mut app.projects_state, app.store.projects()),
        Page::Skills => skills::render_skills(frame, area, &mut app.skills_state, app.store.skills(), origin),
        Page::Settings => settings::render_settings(frame, area, &app.config),
    }
}

fn render_footer<B: Backend>(frame: &mut Frame<B>, area: Rect, app: &App) {
    let hints = match app.page.hints() {
        "" => "1-4/Tab - Pages | B - Menu | Q - Quitter".to_string(),
        page => format!("1-4/Tab - Pages | B - Menu | Q - Quitter | {page}"),
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::Gray))];

    let stale_error = app
        .page
        .keys()
        .iter()
        .find_map(|key| app.store.error(*key).filter(|_| has_data(app, *key)));

    if let Some(notice) = &app.notice {
        let color = if notice.starts_with("Erreur") { Color::Red } else { Color::Green };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(color)));
    } else if let Some(message) = stale_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Actualisation impossible : {message}"),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(updated) = app
        .page
        .keys()
        .first()
        .and_then(|key| app.store.entry(*key))
        .and_then(|entry| entry.updated_at)
    {
        spans.push(Span::styled(
            format!("  Mis à jour à {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    let footer = Paragraph::new(Spans::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn has_data(app: &App, key: QueryKey) -> bool {
    app.store.entry(key).is_some_and(|entry| entry.data.is_some())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::api::{fake::FakeApi, PortfolioApi};
    use crate::config::{Config, Profile};
    use crate::store::QueryData;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    fn app() -> App {
        let config = Config {
            api_url: "https://backend.example.com".into(),
            portfolio_url: "https://portfolio.example.com".into(),
            log_file: "admin.log".into(),
            profile: Profile::default(),
        };
        App::new(Arc::new(FakeApi::new()) as Arc<dyn PortfolioApi>, config)
    }

    #[test]
    fn header_shows_the_api_origin() {
        let mut app = app();
        let screen = rendered(&mut app);
        assert!(screen.contains("https://backend.example.com"));
        assert!(screen.contains("Navigation"));
    }

    #[test]
    fn collapsed_sidebar_is_not_drawn() {
        let mut app = app();
        app.sidebar_open = false;
        let screen = rendered(&mut app);
        assert!(!screen.contains("Navigation"));
    }

    #[test]
    fn settings_page_lists_docs_link() {
        let mut app = app();
        app.page = Page::Settings;
        let screen = rendered(&mut app);
        assert!(screen.contains("https://backend.example.com/api/docs"));
        assert!(screen.contains("https://portfolio.example.com"));
    }

    #[test]
    fn settings_page_shows_reference_profile() {
        let mut app = app();
        app.page = Page::Settings;
        let screen = rendered(&mut app);
        assert!(screen.contains("Informations du Portfolio"));
        assert!(screen.contains("ADOBOE Comlan Julien"));
        assert!(screen.contains("non renseigné"));
    }

    fn load(app: &mut App, key: QueryKey, result: Result<QueryData, String>) {
        app.store.begin_fetch(key);
        app.store.finish_fetch(key, result);
    }

    fn activity(title: &str) -> QueryData {
        let json = format!(r#"[{{"type": "skill", "title": "{title}", "action": "Mis à jour", "date": "2024-03-15"}}]"#);
        QueryData::RecentActivity(serde_json::from_str(&json).unwrap())
    }

    #[test]
    fn dashboard_shows_cards_charts_and_dated_activity() {
        let mut app = app();
        let stats = serde_json::from_str(
            r#"{
                "overview": {"totalProjects": 6, "completedProjects": 3, "inProgressProjects": 2, "totalSkills": 14},
                "charts": {
                    "projectsByStatus": {"completed": 3, "inProgress": 2, "future": 1},
                    "skillsByCategory": [{"category": "Frontend", "count": 5}]
                }
            }"#,
        )
        .unwrap();
        load(&mut app, QueryKey::DashboardStats, Ok(QueryData::DashboardStats(stats)));
        load(&mut app, QueryKey::RecentActivity, Ok(activity("Rust")));

        let screen = rendered(&mut app);
        assert!(screen.contains("Total Projets"));
        assert!(screen.contains("Total Compétences"));
        assert!(screen.contains("14"));
        assert!(screen.contains("50% (3)"));
        assert!(screen.contains("Compétences par catégorie"));
        assert!(screen.contains("Rust"));
        assert!(screen.contains("15/03/2024"));
    }

    #[test]
    fn failed_stats_still_show_recent_activity() {
        let mut app = app();
        load(&mut app, QueryKey::DashboardStats, Err("boom".into()));
        load(&mut app, QueryKey::RecentActivity, Ok(activity("ActivityVisible")));

        let screen = rendered(&mut app);
        assert!(screen.contains("Impossible de charger les statistiques"));
        assert!(screen.contains("boom"));
        assert!(screen.contains("ActivityVisible"));
        assert!(screen.contains("15/03/2024"));
    }
}
