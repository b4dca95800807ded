use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    AnswerList, BotPanel, Form, PaginationBar, TalkList, TitleBar, centered_rect,
};
use crate::tui::{Pane, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

/// Bot panel: 2 status lines, a gap, 2 hints, the note (may wrap), borders.
const BOT_PANEL_HEIGHT: u16 = 9;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let area = frame.area();
    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let [left, right] = Layout::horizontal([Percentage(55), Percentage(45)]).areas(main_area);
    let [talks_area, pagination_area] = Layout::vertical([Min(0), Length(1)]).areas(left);
    let [answers_area, bot_area] =
        Layout::vertical([Min(0), Length(BOT_PANEL_HEIGHT)]).areas(right);

    TitleBar::new(
        app.filter_tag.clone(),
        app.is_loading,
        app.status_message.clone(),
    )
    .render(frame, title_area);

    TalkList {
        state: &mut tui.talk_list,
        talks: &app.talks,
        selected_id: app.selected_talk_id(),
        is_loading: app.is_loading,
        focused: tui.focus == Pane::Talks,
    }
    .render(frame, talks_area);

    PaginationBar {
        pagination: app.pagination(),
    }
    .render(frame, pagination_area);

    AnswerList {
        state: &mut tui.answer_list,
        talk: app.selected.as_ref(),
        answers: &app.answers,
        is_loading: app.answers_loading,
        focused: tui.focus == Pane::Answers,
    }
    .render(frame, answers_area);

    BotPanel {
        status: app.bot.clone(),
        busy: app.bot_busy,
        sending: app.sending_now,
        focused: tui.focus == Pane::Bot,
    }
    .render(frame, bot_area);

    let footer = Paragraph::new(" Tab Switch pane | Enter Select | q Quit | Ctrl+C Force quit ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if let Some(form) = &tui.form {
        Form { state: form }.render(frame, area);
    }

    // Alert sits above everything, including an open form
    if let Some(message) = &app.alert {
        draw_alert(frame, area, message);
    }
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
    let overlay = centered_rect(60, 30, area);
    frame.render_widget(Clear, overlay);

    let alert = Paragraph::new(message)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .title_bottom(Line::from(" Enter/Esc Dismiss ").centered())
                .padding(Padding::uniform(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(alert, overlay);
}
