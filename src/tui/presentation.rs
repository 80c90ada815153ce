use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use alert_events::{
    alerts::{AlertView, ViewStats},
    app::{AppState, Mode, SyncStatus},
};
use crate::tui::{alert_table, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let view = app.view();

    render_header(f, app, chunks[0]);
    render_stats(f, app, &view.stats, chunks[1]);
    render_weather(f, app, chunks[2]);
    alert_table::render(f, app, &view, chunks[3]);
    render_status_bar(f, app, &view, chunks[4]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.alert_form.is_some() {
        dialogs::alert_form::render(f, app);
    }

    if app.delete_confirmation_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let last_sync = app
        .last_sync
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());

    let sync_label = match &app.sync_status {
        SyncStatus::Synced => format!("Last sync {}", last_sync),
        SyncStatus::Syncing => "Syncing…".to_string(),
        SyncStatus::Offline => "Offline sample data".to_string(),
        SyncStatus::Error(message) => message.clone(),
    };

    let title_text = format!(
        "Alert Events - {} - {}",
        app.today.format("%a %b %d, %Y"),
        sync_label
    );

    let color = if matches!(app.sync_status, SyncStatus::Error(_)) {
        app.theme.error
    } else {
        app.theme.title
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_stats(f: &mut Frame, app: &AppState, stats: &ViewStats, area: Rect) {
    let theme = &app.theme;
    let stat = |label: &'static str, value: usize, color| {
        vec![
            Span::styled(format!("{} ", label), Style::default().fg(theme.muted)),
            Span::styled(value.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ]
    };

    let spans: Vec<Span> = [
        stat("Total", stats.total, theme.upcoming),
        stat("Tomorrow", stats.tomorrow, theme.tomorrow),
        stat("Today", stats.today, theme.today),
        stat("Next 7 days", stats.next7, theme.upcoming),
        stat("Overdue", stats.overdue, theme.overdue),
    ]
    .into_iter()
    .flatten()
    .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_weather(f: &mut Frame, app: &AppState, area: Rect) {
    let text = app.weather_line.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(app.theme.muted))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &AppState, view: &AlertView<'_>, area: Rect) {
    let (status_text, alignment) = match app.mode {
        Mode::Command => (app.command_buffer.clone(), Alignment::Left),
        Mode::Search => (format!("/{}", app.query.search), Alignment::Left),
        _ => {
            let filters = format!(
                "category: {} | status: {}{}",
                app.query.category.choice(),
                app.query.status.choice(),
                if app.query.search.is_empty() {
                    String::new()
                } else {
                    format!(" | search: {}", app.query.search)
                }
            );
            let text = match &app.status_message {
                Some(message) => format!("{} | {}", message, filters),
                None => format!("{} shown | {} | '?' for help, 'q' to quit", view.ordered.len(), filters),
            };
            (text, Alignment::Center)
        }
    };

    let status_color = if matches!(app.mode, Mode::Command | Mode::Search) {
        app.theme.command_mode
    } else {
        app.theme.status_bar
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(alignment)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
