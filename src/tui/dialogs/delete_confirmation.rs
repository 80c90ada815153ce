use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use alert_events::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(alert_id) = &app.delete_confirmation_id else {
        return;
    };

    let alert_title = app
        .alerts
        .iter()
        .find(|alert| &alert.id == alert_id)
        .map(|alert| alert.title.as_str())
        .unwrap_or("this alert");

    let area = f.size();
    let dialog_width = 60u16.min(area.width);
    let dialog_height = 9u16.min(area.height);
    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = ratatui::layout::Rect {
        x,
        y,
        width: dialog_width,
        height: dialog_height,
    };

    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled("Delete Alert?", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Remove "),
            Span::styled(alert_title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" from the team sheet?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green)),
            Span::raw(" = Yes, delete | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = No, keep it"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Delete ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, dialog_area);
}
