// State management module.
// Filter form, filtered results, and console log for the TUI.

pub mod console;
pub mod filters;
pub mod results;

pub use console::{ConsoleLevel, ConsoleLog};
pub use filters::{FilterForm, Focus};
pub use results::{LoadingState, Notice, NoticeKind, ResultsState, ResultsView};
