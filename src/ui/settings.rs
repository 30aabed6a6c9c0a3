use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::{Config, Profile};

pub fn render_settings<B: Backend>(frame: &mut Frame<B>, area: Rect, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(4), Constraint::Min(6)].as_ref())
        .split(area);

    let label = Style::default().fg(Color::Yellow);

    let api = Paragraph::new(vec![
        Spans::from(vec![Span::styled("URL de l'API : ", label), Span::raw(config.api_url.clone())]),
        Spans::from(vec![Span::styled("Swagger Docs : ", label), Span::raw(config.docs_url())]),
        Spans::from(vec![Span::styled("Journal : ", label), Span::raw(config.log_file.display().to_string())]),
        Spans::from(""),
        Spans::from(Span::styled("Pour modifier l'URL de l'API", Style::default().add_modifier(Modifier::BOLD))),
        Spans::from("1. Définissez API_URL dans .env (ou passez --api-url)"),
        Spans::from("2. Relancez la console"),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Configuration de l'API").borders(Borders::ALL));
    frame.render_widget(api, chunks[0]);

    let links = Paragraph::new(vec![
        Spans::from(vec![Span::styled("Portfolio : ", label), Span::raw(config.portfolio_url.clone())]),
        Spans::from(vec![Span::styled("API Docs : ", label), Span::raw(config.docs_url())]),
    ])
    .block(Block::default().title("Liens rapides").borders(Borders::ALL));
    frame.render_widget(links, chunks[1]);

    render_profile(frame, chunks[2], &config.profile);
}

fn render_profile<B: Backend>(frame: &mut Frame<B>, area: Rect, profile: &Profile) {
    let label = Style::default().fg(Color::Yellow);
    let unset = Span::styled("non renseigné", Style::default().fg(Color::DarkGray));
    let link = |value: &Option<String>| match value {
        Some(url) => Span::raw(url.clone()),
        None => unset.clone(),
    };

    let lines = vec![
        Spans::from(vec![
            Span::styled("Nom complet : ", label),
            Span::raw(profile.name.clone()),
            Span::styled("   Titre : ", label),
            Span::raw(profile.title.clone()),
        ]),
        Spans::from(vec![Span::styled("Bio : ", label), Span::raw(profile.bio.clone())]),
        Spans::from(vec![
            Span::styled("Email : ", label),
            Span::raw(profile.email.clone()),
            Span::styled("   Téléphone : ", label),
            Span::raw(profile.phone.clone()),
        ]),
        Spans::from(vec![Span::styled("LinkedIn : ", label), link(&profile.linkedin)]),
        Spans::from(vec![Span::styled("GitHub : ", label), link(&profile.github)]),
        Spans::from(vec![
            Span::styled("Note : ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("ces informations sont pour référence uniquement et ne sont pas enregistrées."),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Informations du Portfolio").borders(Borders::ALL));
    frame.render_widget(panel, area);
}
