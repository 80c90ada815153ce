use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use alert_events::app::{AppState, FormField};

fn field_hint(field: FormField) -> &'static str {
    match field {
        FormField::Date => " (YYYY-MM-DD or M/D/YYYY)",
        FormField::Time => " (HH:MM or 2:30 pm)",
        FormField::Priority => " (Critical, High, Normal, Low)",
        _ => "",
    }
}

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.alert_form else {
        return;
    };

    let area = f.size();
    let form_width = 70u16.min(area.width);
    let form_height = 24u16.min(area.height);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;

    let form_title = if form.is_editing() { "Edit Alert" } else { "New Alert" };

    let mut form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
    ];

    for field in FormField::ALL {
        let active = form.active_field == field;
        let required = matches!(field, FormField::Date | FormField::Title);
        let label = format!("{}{}: ", field.label(), if required { "*" } else { "" });

        form_text.push(Line::from(vec![
            Span::styled(label, Style::default().fg(if active { active_color } else { inactive_color })),
            Span::raw(form.value(field)),
            Span::styled(if active { field_hint(field) } else { "" }, Style::default().fg(Color::DarkGray)),
        ]));
        form_text.push(Line::from(""));
    }

    if let Some(error) = &form.error {
        form_text.push(Line::from(vec![Span::styled(
            error.as_str(),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )]));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Save | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ]));

    let block_title = format!(" {} ", form_title);

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
