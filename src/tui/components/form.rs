//! # Form Overlay
//!
//! Modal form used for every write: new/edit small talk, new/edit answer and
//! the tag filter. While open it receives all key events.
//!
//! - Tab / ↓ and Shift+Tab / ↑ move between fields
//! - Enter submits (required fields must be non-blank)
//! - Esc cancels
//!
//! `FormState` owns the field buffers; `Form` borrows it for one frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::{Answer, SmallTalk};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// What the form is for. Edit variants carry the record being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    NewTalk,
    EditTalk(SmallTalk),
    NewAnswer,
    EditAnswer(Answer),
    Filter,
}

impl FormKind {
    fn title(&self) -> &'static str {
        match self {
            FormKind::NewTalk => " New Small Talk ",
            FormKind::EditTalk(_) => " Edit Small Talk ",
            FormKind::NewAnswer => " New Answer ",
            FormKind::EditAnswer(_) => " Edit Answer ",
            FormKind::Filter => " Filter by Tag ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>, required: bool) -> Self {
        Self {
            label,
            value: value.into(),
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Trimmed field values, in field order.
    Submit(FormKind, Vec<String>),
    Cancel,
}

pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub error: Option<String>,
}

impl FormState {
    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focused: 0,
            error: None,
        }
    }

    fn talk_fields(eng: &str, kor: &str, parenthesis: &str, tag: &str) -> Vec<FormField> {
        vec![
            FormField::new("English Sentence", eng, true),
            FormField::new("Korean Sentence", kor, true),
            FormField::new("Parenthesis", parenthesis, false),
            FormField::new("Tag", tag, true),
        ]
    }

    fn answer_fields(eng: &str, kor: &str) -> Vec<FormField> {
        vec![
            FormField::new("English Sentence", eng, true),
            FormField::new("Korean Sentence", kor, true),
        ]
    }

    pub fn new_talk() -> Self {
        Self::with_fields(FormKind::NewTalk, Self::talk_fields("", "", "", ""))
    }

    pub fn edit_talk(talk: &SmallTalk) -> Self {
        let fields = Self::talk_fields(
            &talk.eng_sentence,
            &talk.kor_sentence,
            talk.parenthesis.as_deref().unwrap_or(""),
            talk.tag_label(),
        );
        Self::with_fields(FormKind::EditTalk(talk.clone()), fields)
    }

    pub fn new_answer() -> Self {
        Self::with_fields(FormKind::NewAnswer, Self::answer_fields("", ""))
    }

    pub fn edit_answer(answer: &Answer) -> Self {
        let fields = Self::answer_fields(&answer.eng_sentence, &answer.kor_sentence);
        Self::with_fields(FormKind::EditAnswer(answer.clone()), fields)
    }

    /// Prefilled with the active tag; submitting a blank tag clears the filter.
    pub fn filter(current: Option<&str>) -> Self {
        let fields = vec![FormField::new("Tag", current.unwrap_or(""), false)];
        Self::with_fields(FormKind::Filter, fields)
    }

    fn focused_value(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.focused).map(|f| &mut f.value)
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        self.focused = if forward {
            (self.focused + 1) % len
        } else {
            (self.focused + len - 1) % len
        };
    }

    fn submit(&mut self) -> Option<FormEvent> {
        if let Some((index, field)) = self
            .fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.required && f.value.trim().is_empty())
        {
            self.error = Some(format!("{} is required", field.label));
            self.focused = index;
            return None;
        }
        let values = self.fields.iter().map(|f| f.value.trim().to_string()).collect();
        Some(FormEvent::Submit(self.kind.clone(), values))
    }
}

impl EventHandler for FormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => Some(FormEvent::Cancel),
            TuiEvent::Submit => self.submit(),
            TuiEvent::FocusNext | TuiEvent::CursorDown => {
                self.move_focus(true);
                None
            }
            TuiEvent::FocusPrev | TuiEvent::CursorUp => {
                self.move_focus(false);
                None
            }
            TuiEvent::InputChar(c) => {
                self.error = None;
                if let Some(value) = self.focused_value() {
                    value.push(*c);
                }
                None
            }
            TuiEvent::Paste(text) => {
                self.error = None;
                // Single-line fields
                let flat = text.replace(['\r', '\n'], " ");
                if let Some(value) = self.focused_value() {
                    value.push_str(&flat);
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(value) = self.focused_value() {
                    value.pop();
                }
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the form overlay.
pub struct Form<'a> {
    pub state: &'a FormState,
}

impl Form<'_> {
    /// Rows: one bordered input per field, the error line, and the outer border.
    fn overlay_rect(&self, outer: Rect) -> Rect {
        let height = (self.state.fields.len() as u16 * 3 + 3).min(outer.height);
        let width = (outer.width * 6 / 10).max(40).min(outer.width);
        Rect {
            x: outer.x + (outer.width - width) / 2,
            y: outer.y + (outer.height - height) / 2,
            width,
            height,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = self.overlay_rect(area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.state.kind.title())
            .title_bottom(Line::from(" Enter Save | Tab Next | Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let mut constraints: Vec<Constraint> =
            self.state.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (index, field) in self.state.fields.iter().enumerate() {
            let focused = index == self.state.focused;
            let border = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let label = if field.required {
                format!(" {} * ", field.label)
            } else {
                format!(" {} ", field.label)
            };
            let input = Paragraph::new(field.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(label),
            );
            frame.render_widget(input, rows[index]);

            if focused {
                let row = rows[index];
                frame.set_cursor_position((cursor_column(row, &field.value), row.y + 1));
            }
        }

        if let Some(error) = &self.state.error {
            let line = Paragraph::new(error.as_str()).style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_widget(line, rows[self.state.fields.len()]);
        }
    }
}

/// Column right after `value` inside a bordered input row, pinned to the
/// last inner column once the text no longer fits.
fn cursor_column(row: Rect, value: &str) -> u16 {
    let text_width = u16::try_from(value.width()).unwrap_or(u16::MAX);
    let max_x = row.x.saturating_add(row.width.saturating_sub(2));
    row.x.saturating_add(1).saturating_add(text_width).min(max_x)
}
