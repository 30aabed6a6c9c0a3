use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{ActivityKind, DashboardStats, RecentActivity};
use crate::store::QueryView;
use crate::ui::components::{percent_bar, truncate};

const SLICE_COLORS: [Color; 3] = [Color::Green, Color::Yellow, Color::Magenta];

pub fn render_dashboard<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    stats: QueryView<'_, DashboardStats>,
    activity: QueryView<'_, Vec<RecentActivity>>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)].as_ref())
        .split(area);

    // The activity feed has its own query and renders whatever the stats do.
    match stats {
        QueryView::Ready(stats) => render_overview(frame, rows[0], stats),
        QueryView::Loading => {
            let loading = Paragraph::new("Chargement du tableau de bord...")
                .alignment(Alignment::Center)
                .block(Block::default().title("Dashboard").borders(Borders::ALL));
            frame.render_widget(loading, rows[0]);
        }
        QueryView::Failed(message) => {
            let failed = Paragraph::new(vec![
                Spans::from(Span::styled("Impossible de charger les statistiques", Style::default().fg(Color::Red))),
                Spans::from(message.to_string()),
                Spans::from(""),
                Spans::from("<R> Réessayer"),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().title("Dashboard").borders(Borders::ALL));
            frame.render_widget(failed, rows[0]);
        }
    }

    render_activity(frame, rows[1], activity);
}

fn render_overview<B: Backend>(frame: &mut Frame<B>, area: Rect, stats: &DashboardStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)].as_ref())
        .split(area);

    render_stat_cards(frame, chunks[0], stats);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(chunks[1]);
    render_status_chart(frame, charts[0], stats);
    render_category_chart(frame, charts[1], stats);
}

fn render_stat_cards<B: Backend>(frame: &mut Frame<B>, area: Rect, stats: &DashboardStats) {
    let overview = &stats.overview;
    let cards = [
        ("Total Projets", overview.total_projects, Color::Blue),
        ("Projets Terminés", overview.completed_projects, Color::Green),
        ("En Cours", overview.in_progress_projects, Color::Yellow),
        ("Total Compétences", overview.total_skills, Color::Magenta),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4].as_ref())
        .split(area);

    for ((title, value, color), column) in cards.into_iter().zip(columns) {
        let card = Paragraph::new(Spans::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(card, column);
    }
}

fn render_status_chart<B: Backend>(frame: &mut Frame<B>, area: Rect, stats: &DashboardStats) {
    let bar_width = area.width.saturating_sub(24).max(5) as usize;

    let lines: Vec<Spans> = stats
        .charts
        .projects_by_status
        .slices()
        .into_iter()
        .zip(SLICE_COLORS)
        .flat_map(|((name, count, share), color)| {
            [
                Spans::from(vec![
                    Span::styled(format!("{name:<9}"), Style::default().fg(color)),
                    Span::raw(format!(" {share:>3}% ({count})")),
                ]),
                Spans::from(Span::styled(percent_bar(share, bar_width), Style::default().fg(color))),
            ]
        })
        .collect();

    let chart = Paragraph::new(lines).block(
        Block::default()
            .title("Projets par statut")
            .borders(Borders::ALL),
    );
    frame.render_widget(chart, area);
}

fn render_category_chart<B: Backend>(frame: &mut Frame<B>, area: Rect, stats: &DashboardStats) {
    let categories = &stats.charts.skills_by_category;
    let bar_width: u16 = 10;
    let labels: Vec<String> = categories
        .iter()
        .map(|entry| truncate(&entry.category, bar_width as usize))
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(categories)
        .map(|(label, entry)| (label.as_str(), entry.count))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title("Compétences par catégorie").borders(Borders::ALL))
        .data(&data)
        .bar_width(bar_width)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

fn render_activity<B: Backend>(frame: &mut Frame<B>, area: Rect, activity: QueryView<'_, Vec<RecentActivity>>) {
    let block = Block::default().title("Activité récente").borders(Borders::ALL);

    let items: Vec<ListItem> = match activity {
        QueryView::Loading => vec![ListItem::new("Chargement...")],
        QueryView::Failed(message) => vec![ListItem::new(Span::styled(
            format!("Erreur : {message}"),
            Style::default().fg(Color::Red),
        ))],
        QueryView::Ready(entries) if entries.is_empty() => vec![ListItem::new("Aucune activité récente")],
        QueryView::Ready(entries) => entries.iter().map(activity_item).collect(),
    };

    frame.render_widget(List::new(items).block(block), area);
}

fn activity_item(activity: &RecentActivity) -> ListItem<'static> {
    let color = match activity.kind {
        ActivityKind::Project => Color::Blue,
        ActivityKind::Skill => Color::Magenta,
        ActivityKind::Unknown => Color::Gray,
    };

    ListItem::new(Spans::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(activity.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {} • {}", activity.kind.label(), activity.action),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(format!("  {}", activity.display_date())),
    ]))
}
