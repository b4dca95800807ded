//! # TitleBar Component
//!
//! Top line: app name, active tag filter, loading indicator and the status
//! message. Purely presentational; every field is a prop.
//!
//! ```text
//! Small Talk Admin | tag: greeting | Loading... | Saved small talk #12
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub filter: Option<String>,
    pub is_loading: bool,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(filter: Option<String>, is_loading: bool, status_message: String) -> Self {
        Self {
            filter,
            is_loading,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            "Small Talk Admin",
            Style::default().add_modifier(Modifier::BOLD),
        )];

        let filter_text = match &self.filter {
            Some(tag) => format!("tag: {tag}"),
            None => String::from("all tags"),
        };
        spans.push(separator.clone());
        spans.push(Span::styled(filter_text, Style::default().fg(Color::Blue)));

        if self.is_loading {
            spans.push(separator.clone());
            spans.push(Span::styled("Loading...", Style::default().fg(Color::Yellow)));
        }

        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::raw(self.status_message.clone()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
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
    fn test_title_bar_with_filter_and_loading() {
        let text = render_text(&mut TitleBar::new(
            Some("greeting".to_string()),
            true,
            "Saved".to_string(),
        ));
        assert!(text.contains("Small Talk Admin"));
        assert!(text.contains("tag: greeting"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Saved"));
    }

    #[test]
    fn test_title_bar_idle_without_filter() {
        let text = render_text(&mut TitleBar::new(None, false, String::new()));
        assert!(text.contains("all tags"));
        assert!(!text.contains("Loading"));
        assert!(!text.contains(" | Saved"));
    }
}
