use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use alert_events::{
    alerts::{relative_label, AlertView, AnnotatedAlert, DayBucket, Priority},
    app::AppState,
};

pub fn render(f: &mut Frame, app: &AppState, view: &AlertView<'_>, area: Rect) {
    let theme = &app.theme;

    let header = Row::new(["When", "Title", "Owner", "Category", "Status"])
        .style(Style::default().fg(theme.column_header).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view.ordered.iter().map(|row| alert_row(app, row)).collect();

    let block_title = if view.ordered.is_empty() {
        " Alerts (none match) ".to_string()
    } else {
        format!(" Alerts ({}) ", view.ordered.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(block_title))
    .highlight_style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if !view.ordered.is_empty() {
        state.select(Some(app.selected_index.min(view.ordered.len() - 1)));
    }

    f.render_stateful_widget(table, area, &mut state);
}

fn alert_row<'a>(app: &AppState, row: &AnnotatedAlert<'a>) -> Row<'a> {
    let theme = &app.theme;
    let alert = row.alert;

    let when = match row.date {
        Some(date) => {
            let mut text = format!("{} {}", date.format("%b %d"), alert.time.trim());
            text.push_str(&format!(" ({})", relative_label(row.offset)));
            text
        }
        None if alert.date.trim().is_empty() => "No date".to_string(),
        None => alert.date.clone(),
    };
    let when_color = theme.bucket_color(DayBucket::from_offset(row.offset));

    let priority = alert.priority_level();
    let mut title_spans = Vec::new();
    if priority != Priority::Normal {
        title_spans.push(Span::styled(
            format!("[{}] ", priority.label()),
            Style::default().fg(theme.priority_color(priority)).add_modifier(Modifier::BOLD),
        ));
    }
    title_spans.push(Span::raw(alert.title.as_str()));

    let status = Span::styled(
        alert.status.as_str(),
        Style::default().fg(theme.status_color(alert.status_tone())),
    );

    Row::new([
        Cell::from(when).style(Style::default().fg(when_color)),
        Cell::from(Line::from(title_spans)),
        Cell::from(alert.owner.as_str()),
        Cell::from(alert.category.as_str()),
        Cell::from(Line::from(status)),
    ])
}
