//! # Answer List Component
//!
//! Answers of the currently selected small talk. Empty (with a hint) until
//! a talk is selected.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use super::truncate_str;
use crate::api::types::display_date;
use crate::api::{Answer, SmallTalk};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct AnswerListState {
    pub list_state: ListState,
    pub confirm_delete: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerListEvent {
    New,
    Edit(Answer),
    Delete(i64),
}

impl AnswerListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted<'a>(&self, answers: &'a [Answer]) -> Option<&'a Answer> {
        self.list_state.selected().and_then(|i| answers.get(i))
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn sync(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, answers: &[Answer]) -> Option<AnswerListEvent> {
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = None;
        }

        match event {
            TuiEvent::CursorUp => {
                let next = super::step_index(self.list_state.selected(), -1, answers.len());
                self.list_state.select(next);
                None
            }
            TuiEvent::CursorDown => {
                let next = super::step_index(self.list_state.selected(), 1, answers.len());
                self.list_state.select(next);
                None
            }
            TuiEvent::InputChar('n') => Some(AnswerListEvent::New),
            TuiEvent::InputChar('e') | TuiEvent::Submit => self
                .highlighted(answers)
                .map(|answer| AnswerListEvent::Edit(answer.clone())),
            TuiEvent::InputChar('d') => {
                let Some(answer_id) = self.highlighted(answers).map(|a| a.answer_id) else {
                    self.confirm_delete = None;
                    return None;
                };
                if self.confirm_delete.take() == Some(answer_id) {
                    Some(AnswerListEvent::Delete(answer_id))
                } else {
                    self.confirm_delete = Some(answer_id);
                    None
                }
            }
            _ => None,
        }
    }
}

pub struct AnswerList<'a> {
    pub state: &'a mut AnswerListState,
    pub talk: Option<&'a SmallTalk>,
    pub answers: &'a [Answer],
    pub is_loading: bool,
    pub focused: bool,
}

impl AnswerList<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(4) as usize;
        let title = match self.talk {
            Some(talk) => format!(
                " Answers: {} ",
                truncate_str(&talk.eng_sentence, inner_width.saturating_sub(12))
            ),
            None => " Answers ".to_string(),
        };
        let help_text = if self.state.confirm_delete.is_some() {
            " Press d again to delete | any key cancels "
        } else {
            " n New  e Edit  d Delete "
        };
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let placeholder = match (self.talk, self.is_loading) {
            (None, _) => Some("Select a small talk to see its answers."),
            (Some(_), true) if self.answers.is_empty() => Some("Loading..."),
            (Some(_), false) if self.answers.is_empty() => Some("No answers yet."),
            _ => None,
        };
        if let Some(text) = placeholder {
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .answers
            .iter()
            .map(|answer| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        truncate_str(&answer.eng_sentence, inner_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        truncate_str(&answer.kor_sentence, inner_width),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(Span::styled(
                        display_date(&answer.update_at),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{answer, talk};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(answer_list: &mut AnswerList<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                answer_list.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_edit_and_delete_highlighted() {
        let answers = vec![answer(10, 1), answer(11, 1)];
        let mut state = AnswerListState::new();
        state.sync(answers.len());
        state.handle_event(&TuiEvent::CursorDown, &answers);

        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e'), &answers),
            Some(AnswerListEvent::Edit(answers[1].clone()))
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &answers), None);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &answers),
            Some(AnswerListEvent::Delete(11))
        );
    }

    #[test]
    fn test_delete_confirmation_follows_answer_id() {
        let mut state = AnswerListState::new();
        let before = vec![answer(10, 1)];
        state.sync(before.len());
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &before), None);
        assert_eq!(state.confirm_delete, Some(10));

        // A refetch swapped the row under the cursor
        let after = vec![answer(12, 1)];
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &after), None);
        assert_eq!(state.confirm_delete, Some(12));

        state.cancel_delete();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &after), None);
    }

    #[test]
    fn test_placeholder_without_selection() {
        let mut state = AnswerListState::new();
        let text = render_text(&mut AnswerList {
            state: &mut state,
            talk: None,
            answers: &[],
            is_loading: false,
            focused: false,
        });
        assert!(text.contains("Select a small talk"));
    }

    #[test]
    fn test_renders_answers_of_selected_talk() {
        let selected = talk(1, "greeting");
        let answers = vec![answer(10, 1)];
        let mut state = AnswerListState::new();
        state.sync(answers.len());
        let text = render_text(&mut AnswerList {
            state: &mut state,
            talk: Some(&selected),
            answers: &answers,
            is_loading: false,
            focused: true,
        });
        assert!(text.contains("Answers: Sentence 1"));
        assert!(text.contains("Answer 10"));
    }
}
