//! # Pagination Bar
//!
//! One line under the talk list: `◀ Page X of Y (N items) ▶`. Renders
//! nothing when there are no items. Arrows for unreachable pages are dimmed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::pagination::Pagination;
use crate::tui::component::Component;

pub struct PaginationBar {
    pub pagination: Pagination,
}

fn arrow_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

impl Component for PaginationBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = &self.pagination;
        if p.is_hidden() {
            return;
        }

        let noun = if p.total_items == 1 { "item" } else { "items" };
        let line = Line::from(vec![
            Span::styled("◀ ", arrow_style(p.has_prev())),
            Span::raw(p.label()),
            Span::styled(
                format!(" ({} {noun})", p.total_items),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" ▶", arrow_style(p.has_next())),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }
}
