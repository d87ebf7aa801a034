// UI module for rendering the TUI.
// Contains widgets for tabs, filter controls, results table, and console.

mod filters;
mod results;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::{ConsoleLevel, Focus};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Tab bar
    tabs::draw_tabs(frame, app, chunks[0]);

    // Main content area
    match app.active_tab {
        Tab::Problems => draw_problems_tab(frame, app, chunks[1]),
        Tab::Console => draw_console_tab(frame, app, chunks[1]),
    }

    // Status bar
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the Problems tab: filters, notices, and results.
fn draw_problems_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Length(2), // Notices
            Constraint::Min(1),    // Results
        ])
        .split(area);

    filters::draw_filter_bar(frame, app, chunks[0]);

    let mut notices = Vec::new();
    if let Some(notice) = &app.data_notice {
        notices.push(results::notice_line(notice));
    }
    let results_notice = app.results.notice();
    if app.data.data().is_some() {
        notices.push(results::notice_line(&results_notice));
    }
    frame.render_widget(Paragraph::new(notices), chunks[1]);

    results::render_results(frame, &app.data, &mut app.results, chunks[2]);
}

/// Draw the Console tab with activity messages.
fn draw_console_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");

    if app.console.messages.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
    } else {
        // Show newest messages first (reverse order)
        let items: Vec<ListItem> = app
            .console
            .messages
            .iter()
            .rev()
            .map(|msg| {
                let (icon, color) = match msg.level {
                    ConsoleLevel::Error => ("❌", Color::Red),
                    ConsoleLevel::Warn => ("⚠️", Color::Yellow),
                    ConsoleLevel::Info => ("ℹ️", Color::Cyan),
                };

                let time = results::format_relative_time(&msg.timestamp);

                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", icon)),
                    Span::styled(time, Style::default().fg(Color::DarkGray)),
                    Span::raw(" "),
                    Span::styled(msg.message.clone(), Style::default().fg(color)),
                ]))
            })
            .collect();

        let list_widget = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list_widget, area, &mut app.console.list_state);
    }
}

/// Draw the status bar with keybinding hints, cache age, and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::raw(key),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]
    };

    let mut hints: Vec<Span> = Vec::new();
    let focus = app.form.focus;
    if app.active_tab == Tab::Problems {
        hints.extend(hint(" Tab ", "Focus"));
        match focus {
            Focus::Company | Focus::Recency => hints.extend(hint("  ←→ ", "Change")),
            Focus::Search => hints.extend(hint("  Esc ", "Clear")),
            Focus::Results => hints.extend(hint("  ↑↓ ", "Scroll")),
        }
    } else {
        hints.extend(hint(" ↑↓ ", "Scroll"));
    }
    hints.extend(hint("  F2 ", "Switch"));
    hints.extend(hint("  ^R ", "Refresh"));
    if focus != Focus::Search || app.active_tab != Tab::Problems {
        hints.extend(hint("  ? ", "Help"));
        hints.extend(hint("  q ", "Quit"));
    } else {
        hints.extend(hint("  ^C ", "Quit"));
    }

    if let Some(cached_at) = &app.cached_at {
        hints.push(Span::styled(
            format!("  cached {}", results::format_relative_time(cached_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Add rate limit info on the right if available
    let rate = app.client.rate_limit();
    if rate.is_known() {
        let rate_color = if rate.remaining < 5 {
            Color::Red
        } else if rate.remaining < 20 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        hints.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 56;
    let popup_height = 19;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("Tab/Shift-Tab", "Move focus between controls"),
        key("←/→ or h/l", "Change company / frequency range"),
        key("type", "Edit search (when focused)"),
        key("Esc", "Clear search / close help"),
        key("↑/↓ or j/k", "Scroll results"),
        key("PgUp/PgDn", "Page through results"),
        key("Home/End g/G", "Jump to first/last result"),
        key("/", "Focus search"),
        key("F2", "Switch tabs"),
        key("Ctrl-R or r", "Refresh data from GitHub"),
        key("?", "Show/hide this help"),
        key("q or Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
