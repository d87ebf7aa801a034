// Filter bar rendering.
// Company selector, search input, and recency selector side by side.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::Focus;

fn control_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title))
}

fn selector_line(value: &str, focused: bool) -> Line<'static> {
    let arrow = Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray });
    Line::from(vec![
        Span::styled("◂ ", arrow),
        Span::styled(value.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(" ▸", arrow),
    ])
}

/// Draw the filter controls.
pub fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Company
            Constraint::Percentage(40), // Search
            Constraint::Percentage(25), // Recency
        ])
        .split(area);

    let form = &app.form;

    // Company
    let focused = form.focus == Focus::Company;
    let company = form.company();
    let title = format!(
        "Company {}/{}",
        form.company_position(),
        form.company_option_count()
    );
    let widget = Paragraph::new(selector_line(company.label(), focused))
        .block(control_block(&title, focused));
    frame.render_widget(widget, chunks[0]);

    // Search
    let focused = form.focus == Focus::Search;
    let line = if form.query.is_empty() && !focused {
        Line::from(Span::styled(
            "e.g. Two Sum",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(form.query.as_str())];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };
    let widget = Paragraph::new(line).block(control_block("Search", focused));
    frame.render_widget(widget, chunks[1]);

    // Recency
    let focused = form.focus == Focus::Recency;
    let widget = Paragraph::new(selector_line(form.recency.label(), focused))
        .block(control_block("Frequency Range", focused));
    frame.render_widget(widget, chunks[2]);
}
