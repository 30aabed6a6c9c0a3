mod api;
mod app;
mod assets;
mod config;
mod forms;
mod logging;
mod models;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::{ApiClient, PortfolioApi};
use crate::app::{App, Page};
use crate::config::Config;
use crate::logging::LogTarget;

const TICK: Duration = Duration::from_millis(100);

/// Terminal console for the portfolio backend
#[derive(Parser)]
#[command(name = "portfolio-admin")]
#[command(about = "Manage portfolio projects and skills from the terminal")]
#[command(version)]
struct Cli {
    /// Backend origin, overrides API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log file for the interactive console, overrides LOG_FILE
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Tui,

    /// Print a backend resource as JSON
    Dump {
        #[arg(value_enum)]
        resource: Resource,

        /// Fetch a single project or skill by id
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Resource {
    Projects,
    Skills,
    SkillsByCategory,
    Stats,
    Timeline,
    Activity,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::init()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    let api = ApiClient::new(&config.api_url)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init(LogTarget::File(config.log_file.clone()), cli.verbose)?;
            run_tui(api, config).await
        }
        Commands::Dump { resource, id } => {
            logging::init(LogTarget::Stderr, cli.verbose)?;
            println!("{}", dump(&api, resource, id.as_deref()).await?);
            Ok(())
        }
    }
}

async fn run_tui(api: ApiClient, config: Config) -> Result<()> {
    info!(api = %api.base_url(), "Starting console");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(api), config);
    app.open_page(Page::Dashboard);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        println!("Error: {}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::layout::draw(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.drain_messages();

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn dump(api: &dyn PortfolioApi, resource: Resource, id: Option<&str>) -> Result<String> {
    let json = match (resource, id) {
        (Resource::Projects, Some(id)) => serde_json::to_string_pretty(&api.get_project(id).await?)?,
        (Resource::Projects, None) => serde_json::to_string_pretty(&api.list_projects().await?)?,
        (Resource::Skills, Some(id)) => serde_json::to_string_pretty(&api.get_skill(id).await?)?,
        (Resource::Skills, None) => serde_json::to_string_pretty(&api.list_skills().await?)?,
        (_, Some(_)) => bail!("--id only applies to projects and skills"),
        (Resource::SkillsByCategory, None) => serde_json::to_string_pretty(&api.skills_by_category().await?)?,
        (Resource::Stats, None) => serde_json::to_string_pretty(&api.dashboard_stats().await?)?,
        (Resource::Timeline, None) => serde_json::to_string_pretty(&api.timeline().await?)?,
        (Resource::Activity, None) => serde_json::to_string_pretty(&api.recent_activity().await?)?,
    };
    Ok(json)
}
