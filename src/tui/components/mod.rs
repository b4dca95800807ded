//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and implement [`Component`]:
//! - `TitleBar`: filter, loading indicator, status message
//! - `PaginationBar`: page label and prev/next arrows
//! - `BotPanel`: bot status and control hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent `*State` lives in `TuiState`; a transient wrapper borrows it
//! for each frame:
//! - `TalkList`: small talk page with selection and delete confirmation
//! - `AnswerList`: answers of the selected talk
//! - `Form`: modal create/edit/filter form
//!
//! [`Component`]: crate::tui::component::Component

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod answer_list;
pub mod bot_panel;
pub mod form;
pub mod pagination;
pub mod talk_list;
pub mod title_bar;

pub use answer_list::{AnswerList, AnswerListEvent, AnswerListState};
pub use bot_panel::BotPanel;
pub use form::{Form, FormEvent, FormKind, FormState};
pub use pagination::PaginationBar;
pub use talk_list::{TalkList, TalkListEvent, TalkListState};
pub use title_bar::TitleBar;

/// Truncate a string to fit within `max_width` terminal columns, adding "..." if needed.
///
/// Hangul is two columns wide, so this counts display width, not chars.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// Moves a list cursor by `delta`, staying inside `0..len`.
pub(crate) fn step_index(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0).min(len - 1) as isize;
    Some((current + delta).clamp(0, len as isize - 1) as usize)
}
