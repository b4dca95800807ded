//! # Talk List Component
//!
//! The current page of small talks. Highlight moves with ↑/↓, Enter selects
//! (loads answers), and the single-letter keys ask the coordinator for
//! create/edit/delete/filter/refresh.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TalkListState` lives in `TuiState`
//! - `TalkList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use super::truncate_str;
use crate::api::SmallTalk;
use crate::api::types::display_date;
use crate::tui::event::TuiEvent;

/// Persistent state for the talk list pane.
#[derive(Default)]
pub struct TalkListState {
    pub list_state: ListState,
    /// Talk armed by the first `d` press.
    pub confirm_delete: Option<i64>,
}

/// Events emitted by the talk list.
#[derive(Debug, Clone, PartialEq)]
pub enum TalkListEvent {
    Select(SmallTalk),
    New,
    Edit(SmallTalk),
    Delete(i64),
    Filter,
    Refresh,
    PrevPage,
    NextPage,
}

impl TalkListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The talk under the cursor.
    pub fn highlighted<'a>(&self, talks: &'a [SmallTalk]) -> Option<&'a SmallTalk> {
        self.list_state.selected().and_then(|i| talks.get(i))
    }

    /// Disarms a pending delete.
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Keeps the cursor valid after the page was replaced.
    pub fn sync(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Handle a key event, returning a TalkListEvent if the coordinator should act.
    pub fn handle_event(&mut self, event: &TuiEvent, talks: &[SmallTalk]) -> Option<TalkListEvent> {
        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = None;
        }

        match event {
            TuiEvent::CursorUp => {
                let next = super::step_index(self.list_state.selected(), -1, talks.len());
                self.list_state.select(next);
                None
            }
            TuiEvent::CursorDown => {
                let next = super::step_index(self.list_state.selected(), 1, talks.len());
                self.list_state.select(next);
                None
            }
            TuiEvent::CursorLeft | TuiEvent::InputChar('[') => Some(TalkListEvent::PrevPage),
            TuiEvent::CursorRight | TuiEvent::InputChar(']') => Some(TalkListEvent::NextPage),
            TuiEvent::Submit => self
                .highlighted(talks)
                .map(|talk| TalkListEvent::Select(talk.clone())),
            TuiEvent::InputChar('n') => Some(TalkListEvent::New),
            TuiEvent::InputChar('e') => self
                .highlighted(talks)
                .map(|talk| TalkListEvent::Edit(talk.clone())),
            TuiEvent::InputChar('/') => Some(TalkListEvent::Filter),
            TuiEvent::InputChar('r') => Some(TalkListEvent::Refresh),
            TuiEvent::InputChar('d') => {
                let Some(talk_id) = self.highlighted(talks).map(|t| t.talk_id) else {
                    self.confirm_delete = None;
                    return None;
                };
                // Only the talk that was armed can be deleted; a different
                // row under the cursor re-arms instead
                if self.confirm_delete.take() == Some(talk_id) {
                    Some(TalkListEvent::Delete(talk_id))
                } else {
                    self.confirm_delete = Some(talk_id);
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the talk list pane.
pub struct TalkList<'a> {
    pub state: &'a mut TalkListState,
    pub talks: &'a [SmallTalk],
    pub selected_id: Option<i64>,
    pub is_loading: bool,
    pub focused: bool,
}

impl TalkList<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_delete.is_some() {
            " Press d again to delete | any key cancels "
        } else {
            " n New  e Edit  d Delete  / Filter  ←/→ Page "
        };
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Small Talks ")
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.talks.is_empty() {
            let text = if self.is_loading {
                "Loading..."
            } else {
                "No small talks found."
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .talks
            .iter()
            .map(|talk| talk_item(talk, self.selected_id == Some(talk.talk_id), inner_width))
            .collect();

        let highlight = if self.state.confirm_delete.is_some() {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };

        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn talk_item(talk: &SmallTalk, is_selected: bool, width: usize) -> ListItem<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let text_width = width.saturating_sub(2);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                truncate_str(&talk.eng_sentence, text_width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_str(&talk.kor_sentence, text_width),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    if let Some(note) = talk.annotation() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_str(&format!("({note})"), text_width),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("[{}]", talk.tag_label()),
            Style::default().fg(Color::Blue),
        ),
        Span::raw(" "),
        Span::styled(
            display_date(&talk.update_at),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    ListItem::new(lines)
}
