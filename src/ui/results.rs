// Results table rendering.
// Shows matching rows with loading, empty, and error states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::data::MergedTable;
use crate::state::{LoadingState, Notice, NoticeKind, ResultsState, ResultsView};

/// Widest a column is allowed to grow.
const MAX_COLUMN_WIDTH: usize = 60;

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(text, area);
}

/// Icon and color for a notice.
fn notice_style(kind: NoticeKind) -> (&'static str, Color) {
    match kind {
        NoticeKind::Info => ("ℹ️", Color::Cyan),
        NoticeKind::Success => ("✅", Color::Green),
        NoticeKind::Warning => ("⚠️", Color::Yellow),
        NoticeKind::Error => ("❌", Color::Red),
    }
}

/// One styled notice line.
pub fn notice_line(notice: &Notice) -> Line<'_> {
    let (icon, color) = notice_style(notice.kind);
    Line::from(vec![
        Span::raw(format!(" {} ", icon)),
        Span::styled(notice.message.as_str(), Style::default().fg(color)),
    ])
}

/// Render the results area for the current data state.
pub fn render_results(
    frame: &mut Frame,
    data: &LoadingState<MergedTable>,
    results: &mut ResultsState,
    area: Rect,
) {
    if data.is_loading() {
        render_loading(frame, area, "Loading problems from cache or GitHub");
        return;
    }

    match &results.view {
        ResultsView::NoData => render_empty(frame, area, "No data loaded"),
        ResultsView::Failed(e) => render_error(frame, area, e),
        ResultsView::Matches(table) if table.is_empty() => {
            render_empty(frame, area, "No results found")
        }
        ResultsView::Matches(table) => {
            render_table(frame, table, &mut results.table_state, area)
        }
    }
}

/// Render the visible window of `table` around the selected row.
fn render_table(frame: &mut Frame, table: &MergedTable, state: &mut TableState, area: Rect) {
    // Borders plus the header row.
    let visible = (area.height.saturating_sub(3) as usize).max(1);
    let selected = state.selected().unwrap_or(0);

    let mut offset = state.offset();
    if selected < offset {
        offset = selected;
    } else if selected >= offset + visible {
        offset = selected + 1 - visible;
    }
    *state.offset_mut() = offset;

    let order = table.display_columns();
    let window = &table.rows()[offset..(offset + visible).min(table.len())];

    let widths: Vec<Constraint> = order
        .iter()
        .map(|&c| {
            let header = table.columns()[c].chars().count();
            let content = window
                .iter()
                .filter_map(|row| row[c].as_deref())
                .map(|v| v.chars().count())
                .max()
                .unwrap_or(0);
            Constraint::Length(header.max(content).min(MAX_COLUMN_WIDTH) as u16)
        })
        .collect();

    let header = Row::new(order.iter().map(|&c| {
        Cell::from(table.columns()[c].as_str()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = window.iter().map(|row| {
        Row::new(
            order
                .iter()
                .map(|&c| Cell::from(row[c].as_deref().unwrap_or(""))),
        )
    });

    let title = format!(" Results [{}/{}] ", selected + 1, table.len());
    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut window_state = TableState::default().with_selected(selected - offset);
    frame.render_stateful_widget(widget, area, &mut window_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
