use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use alert_events::{app::AppState, ui::theme::Theme};

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60u16.min(area.width);
    let help_height = 23u16.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.help_section);

    let help_text = vec![
        Line::from(vec![Span::styled("Alert Events Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  j/k      - Next/previous alert"),
        Line::from("  g/G      - First/last alert"),
        Line::from(""),
        Line::from(vec![Span::styled("Filtering:", section)]),
        Line::from("  /        - Search (Enter keeps, Esc clears)"),
        Line::from("  c        - Cycle category filter"),
        Line::from("  s        - Cycle status filter"),
        Line::from(""),
        Line::from(vec![Span::styled("Alerts:", section)]),
        Line::from("  a        - Add alert"),
        Line::from("  E/Enter  - Edit selected alert"),
        Line::from("  x        - Delete selected alert"),
        Line::from("  e        - Export selected alert as .ics"),
        Line::from("  r        - Sync with the team sheet"),
        Line::from(""),
        Line::from(vec![Span::styled("Commands:", section)]),
        Line::from("  :q       - Quit"),
        Line::from("  :w       - Sync (also :sync)"),
        Line::from("  :new     - New alert (:new [title])"),
        Line::from(format!("  :theme   - Change theme ({})", Theme::available_themes().join(", "))),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
