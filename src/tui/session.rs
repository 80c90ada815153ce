use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::time::Instant;
use alert_events::{
    app::{AlertForm, AppState, Mode, SyncStatus},
    export::{build_ics, ics_file_name},
    input::{command_mode, insert_mode, normal_mode, search_mode},
    storage::config::{FileSettingsStore, Settings, SettingsStore},
    sync::{sync_engine::SyncEngine, weather::WeatherClient},
    ui::theme::Theme,
};
use crate::tui::{
    presentation::ui,
    sample_alerts::add_sample_alerts,
};

const KEY_POLL: Duration = Duration::from_millis(250);

/// Network access for the session. Sample mode keeps every change in memory.
struct Session {
    engine: SyncEngine,
    weather: WeatherClient,
    store: FileSettingsStore,
    settings: Settings,
    offline: bool,
}

pub async fn run_tui(sample: bool) -> anyhow::Result<()> {
    let store = FileSettingsStore::default_location();
    let settings = store.load().context("Failed to load settings")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::get_by_name(&settings.theme);
    let mut app = AppState::new().with_theme(theme);
    app.lead_days = settings.lead_days;

    let mut session = Session {
        engine: SyncEngine::new(settings.clone()),
        weather: WeatherClient::new(),
        store,
        settings,
        offline: sample,
    };

    if sample {
        add_sample_alerts(&mut app);
        app.sync_status = SyncStatus::Offline;
    } else {
        sync_and_refresh(&mut terminal, &mut app, &session).await?;
    }

    let res = run_app(&mut terminal, &mut app, &mut session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    session: &mut Session,
) -> io::Result<()> {
    let interval = session.engine.sync_interval();
    let mut next_sync = Instant::now() + interval;

    loop {
        app.today = Local::now().date_naive();
        terminal.draw(|f| ui(f, app))?;

        if !session.offline && Instant::now() >= next_sync {
            tracing::debug!("Scheduled re-sync");
            sync_and_refresh(terminal, app, session).await?;
            next_sync = Instant::now() + interval;
            continue;
        }

        if !event::poll(KEY_POLL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let quit = match app.mode {
                Mode::Normal => handle_normal_mode(key.code, app, terminal, session).await?,
                Mode::Search => {
                    search_mode::handle_key(key.code, app);
                    false
                }
                Mode::Command => handle_command_mode(key.code, app, terminal, session).await?,
                Mode::Insert => {
                    handle_insert_mode(key.code, app, terminal, session).await?;
                    false
                }
                Mode::ConfirmDelete => {
                    handle_delete_confirmation(key.code, app, terminal, session).await?;
                    false
                }
            };

            if quit {
                return Ok(());
            }
        }
    }
}

async fn handle_normal_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    session: &Session,
) -> io::Result<bool> {
    if app.show_help {
        handle_help_keys(code, app);
        return Ok(false);
    }

    match code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('r') => sync_and_refresh(terminal, app, session).await?,
        KeyCode::Char('e') => export_selected(app),
        _ => normal_mode::handle_key(code, app),
    }
    Ok(false)
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

async fn sync_alerts<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    session: &Session,
) -> io::Result<()> {
    if session.offline {
        app.status_message = Some("Sample mode: nothing to sync".to_string());
        return Ok(());
    }

    app.sync_status = SyncStatus::Syncing;
    terminal.draw(|f| ui(f, app))?;

    match session.engine.sync_now().await {
        Ok(alerts) => {
            app.set_alerts(alerts);
            app.sync_status = SyncStatus::Synced;
        }
        Err(e) => {
            tracing::error!("Sync failed: {}", e);
            app.sync_status = SyncStatus::Error(format!("Sync failed: {}", e));
        }
    }
    Ok(())
}

/// Pulls the alert list, then the weather line.
async fn sync_and_refresh<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    session: &Session,
) -> io::Result<()> {
    sync_alerts(terminal, app, session).await?;
    if !session.offline {
        refresh_weather(app, session).await;
    }
    Ok(())
}

async fn refresh_weather(app: &mut AppState, session: &Session) {
    let settings = &session.settings;
    match session.weather.current(settings.weather_lat, settings.weather_lon).await {
        Ok(report) => app.weather_line = Some(report.summary_line()),
        Err(e) => {
            tracing::warn!("Weather fetch failed: {}", e);
            app.weather_line = Some("Weather unavailable".to_string());
        }
    }
}

fn export_selected(app: &mut AppState) {
    let Some(alert) = app.selected_alert() else {
        return;
    };

    let message = match build_ics(alert, app.lead_days, Utc::now()) {
        None => "This alert has no readable date".to_string(),
        Some(ics) => {
            let path = PathBuf::from(ics_file_name(&alert.title));
            match std::fs::write(&path, ics) {
                Ok(()) => {
                    tracing::info!("Exported alert {} to {}", alert.id, path.display());
                    format!("Exported {}", path.display())
                }
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    format!("Export failed: {}", e)
                }
            }
        }
    };
    app.status_message = Some(message);
}

async fn handle_command_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    session: &mut Session,
) -> io::Result<bool> {
    match code {
        KeyCode::Enter => {
            let cmd = command_mode::parse_command(&app.command_buffer);
            app.command_buffer.clear();
            app.mode = Mode::Normal;

            match cmd {
                command_mode::Command::Quit => return Ok(true),
                command_mode::Command::Sync => {
                    sync_and_refresh(terminal, app, session).await?;
                }
                command_mode::Command::Help => {
                    app.show_help = true;
                    app.help_scroll = 0;
                }
                command_mode::Command::Theme(theme_name) => {
                    app.theme = Theme::get_by_name(&theme_name);
                    match session.store.save_theme(&app.theme.name) {
                        Ok(settings) => session.settings = settings,
                        Err(e) => {
                            tracing::error!("Failed to save theme: {}", e);
                            app.status_message = Some(format!("Theme not saved: {}", e));
                        }
                    }
                }
                command_mode::Command::NewAlert(title) => {
                    app.alert_form = Some(AlertForm::new(title.unwrap_or_default()));
                    app.mode = Mode::Insert;
                }
                command_mode::Command::Error(message) => {
                    app.status_message = Some(message);
                }
            }
            Ok(false)
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            Ok(false)
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            Ok(false)
        }
        _ => Ok(false)
    }
}

async fn handle_insert_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    session: &Session,
) -> io::Result<()> {
    match code {
        KeyCode::Esc => {
            app.alert_form = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let Some(mut form) = app.alert_form.take() else {
                app.mode = Mode::Normal;
                return Ok(());
            };

            if let Err(e) = form.draft.validate() {
                form.error = Some(e.to_string());
                app.alert_form = Some(form);
                return Ok(());
            }

            if session.offline {
                if let Ok(alert) = form.draft.into_alert() {
                    app.add_alert(alert);
                }
                app.status_message = Some("Saved locally".to_string());
                app.mode = Mode::Normal;
                return Ok(());
            }

            app.sync_status = SyncStatus::Syncing;
            terminal.draw(|f| ui(f, app))?;

            match session.engine.save(form.draft.clone()).await {
                Ok(saved) => {
                    app.add_alert(saved);
                    app.status_message = Some("Saved".to_string());
                    app.mode = Mode::Normal;
                    sync_alerts(terminal, app, session).await?;
                }
                Err(e) => {
                    tracing::error!("Failed to save alert: {}", e);
                    app.sync_status = SyncStatus::Error(format!("Save failed: {}", e));
                    form.error = Some(e.to_string());
                    app.alert_form = Some(form);
                }
            }
        }
        _ => insert_mode::handle_key(code, app),
    }
    Ok(())
}

async fn handle_delete_confirmation<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    session: &Session,
) -> io::Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.mode = Mode::Normal;
            let Some(alert_id) = app.delete_confirmation_id.take() else {
                return Ok(());
            };

            if session.offline {
                app.remove_alert(&alert_id);
                return Ok(());
            }

            app.sync_status = SyncStatus::Syncing;
            terminal.draw(|f| ui(f, app))?;

            match session.engine.delete(&alert_id).await {
                Ok(()) => {
                    app.remove_alert(&alert_id);
                    app.status_message = Some("Deleted".to_string());
                    sync_alerts(terminal, app, session).await?;
                }
                Err(e) => {
                    tracing::error!("Failed to delete alert: {}", e);
                    app.sync_status = SyncStatus::Error(format!("Delete failed: {}", e));
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation_id = None;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    Ok(())
}
