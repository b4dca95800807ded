//! # Bot Panel
//!
//! Shows the last polled bot status and the two control hints. "Send Message
//! Now" is dimmed while the bot is stopped, with a note explaining why.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::api::BotStatus;
use crate::tui::component::Component;

pub struct BotPanel {
    pub status: BotStatus,
    /// A start/stop request is in flight.
    pub busy: bool,
    /// A send-now request is in flight.
    pub sending: bool,
    pub focused: bool,
}

impl Component for BotPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Bot Control ")
            .padding(Padding::horizontal(1));

        let (state_text, state_color) = if self.status.running {
            ("Running", Color::Green)
        } else {
            ("Stopped", Color::Red)
        };
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let toggle_label = match (self.busy, self.status.running) {
            (true, _) => "Processing...",
            (false, true) => "Stop Bot",
            (false, false) => "Start Bot",
        };
        let send_label = if self.sending {
            "Sending..."
        } else {
            "Send Message Now"
        };
        let send_enabled = self.status.running && !self.sending;

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(
                    state_text,
                    Style::default()
                        .fg(state_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("Active jobs: {}", self.status.job_count())),
            Line::default(),
            Line::from(vec![
                Span::styled("b ", if self.busy { dim } else { key }),
                Span::raw(toggle_label),
            ]),
            Line::from(vec![
                Span::styled("s ", if send_enabled { key } else { dim }),
                Span::styled(send_label, if send_enabled { Style::default() } else { dim }),
            ]),
        ];

        if !self.status.running {
            lines.push(Line::from(Span::styled(
                "Note: Bot must be running to send immediate messages",
                dim.add_modifier(Modifier::ITALIC),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
