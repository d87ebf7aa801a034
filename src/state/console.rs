// Console tab state.
// Activity log of load/refresh events with an unread-error badge.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Messages shown in the Console tab.
#[derive(Debug, Default)]
pub struct ConsoleLog {
    pub messages: Vec<ConsoleMessage>,
    /// Errors and warnings logged since the tab was last viewed.
    pub unread: usize,
    pub list_state: ListState,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::new(ConsoleLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::new(ConsoleLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::new(ConsoleLevel::Error, message));
    }

    fn push(&mut self, message: ConsoleMessage) {
        if message.level != ConsoleLevel::Info {
            self.unread += 1;
        }
        self.messages.push(message);
        // Newest messages render first.
        self.list_state.select(Some(0));
    }

    /// Clear the unread badge.
    pub fn mark_read(&mut self) {
        self.unread = 0;
    }

    /// Select previous (newer) message.
    pub fn select_prev(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }

    /// Select next (older) message.
    pub fn select_next(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let last = self.messages.len() - 1;
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_counts_problems_only() {
        let mut log = ConsoleLog::new();
        log.info("Loaded 10 problems from cache");
        log.warn("Skipped google/All.csv");
        log.error("Failed to fetch file list");

        assert_eq!(log.messages.len(), 3);
        assert_eq!(log.unread, 2);

        log.mark_read();
        assert_eq!(log.unread, 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut log = ConsoleLog::new();
        log.select_next();
        assert_eq!(log.list_state.selected(), None);

        log.info("a");
        log.info("b");
        assert_eq!(log.list_state.selected(), Some(0));

        log.select_next();
        log.select_next();
        assert_eq!(log.list_state.selected(), Some(1));

        log.select_prev();
        log.select_prev();
        assert_eq!(log.list_state.selected(), Some(0));
    }
}
