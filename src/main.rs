mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{Result, SkycastError};
use logic::WeatherService;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::screens::dashboard::SearchOverlay;
use ui::screens::DashboardScreen;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Load configuration
    let config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Set OPENWEATHER_API_KEY or create config/config.yaml");
            std::process::exit(1);
        }
    };

    let service = WeatherService::new(config.clone());

    if let Some(Commands::Check) = cli.command {
        return run_check(&service).await;
    }

    let mut app = App::new(config);

    // Resolve the starting location and fetch the first snapshot
    if let Some(city) = cli.city {
        match service.search_city(&city).await {
            Ok(snapshot) => app.apply_snapshot(snapshot),
            Err(e) => {
                app.loading = false;
                app.set_status(&format!("Search failed: {}", e));
            }
        }
    } else {
        let resolved = service.resolve_location().await;
        if let Some(ref notice) = resolved.notice {
            app.set_status(notice);
        }
        app.location = Some(resolved.coordinates);

        match service.refresh(resolved.coordinates).await {
            Ok(snapshot) => app.apply_snapshot(snapshot),
            Err(e) => {
                tracing::warn!("Initial weather fetch failed: {}", e);
                app.loading = false;
                app.set_status(&format!("Weather fetch failed: {}", e));
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_check(service: &WeatherService) -> Result<()> {
    if service.test_connection().await {
        println!("OpenWeatherMap: OK");
        Ok(())
    } else {
        println!("OpenWeatherMap: FAILED");
        Err(SkycastError::DataSourceUnavailable(
            "connection check failed".to_string(),
        ))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &WeatherService,
) -> Result<()> {
    let clock_tick = Duration::from_secs(app.config.display.clock_tick_seconds.max(1));
    let mut last_tick = Instant::now();

    loop {
        // Draw UI
        let timeline = app.timeline();
        terminal.draw(|f| {
            let search = if app.search_state.active {
                Some(SearchOverlay {
                    buffer: &app.search_state.buffer,
                    error: app.search_state.error.as_deref(),
                })
            } else {
                None
            };

            let screen = DashboardScreen::new(app.snapshot.as_ref(), &timeline, app.clock)
                .loading(app.loading)
                .with_status(app.status_message.as_deref())
                .with_search(search);
            f.render_widget(screen, f.area());
        })?;

        // Handle input with a timeout so async work below still runs
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.quit();
                } else if app.search_state.active {
                    handle_search_input(app, key.code);
                } else {
                    handle_global_input(app, key.code);
                }
            }
        }

        // Periodic wall-clock refresh, independent of data fetching
        if last_tick.elapsed() >= clock_tick {
            app.tick_clock();
            last_tick = Instant::now();
        }

        // Handle refresh request for the active coordinates
        if app.needs_refresh {
            app.needs_refresh = false;
            if let Some(coordinates) = app.location {
                match service.refresh(coordinates).await {
                    Ok(snapshot) => {
                        app.apply_snapshot(snapshot);
                        app.set_status("Weather refreshed");
                    }
                    Err(e) => {
                        // Last-known snapshot stays on screen
                        app.set_status(&format!("Refresh failed: {}", e));
                    }
                }
            }
        }

        // Handle a submitted city search
        if let Some(query) = app.pending_search.take() {
            match service.search_city(&query).await {
                Ok(snapshot) => {
                    app.apply_snapshot(snapshot);
                    app.search_state.close();
                    app.clear_status();
                }
                Err(SkycastError::CityNotFound(_)) => {
                    app.search_state.error =
                        Some("City not found. Please try again.".to_string());
                }
                Err(e) => {
                    app.search_state.error = Some(format!("Search failed: {}", e));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_global_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('/') | KeyCode::Char('s') => app.search_state.open(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.search_state.close(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            app.search_state.buffer.pop();
        }
        KeyCode::Char(c) => {
            app.search_state.buffer.push(c);
        }
        _ => {}
    }
}
