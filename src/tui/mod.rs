//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Each key goes to exactly one place, first match wins:
//!
//! 1. Ctrl+C quits from anywhere
//! 2. An open alert swallows everything (Enter/Esc dismiss it)
//! 3. An open form receives everything
//! 4. Global keys: `Tab` focus, `b` start/stop bot, `s` send now, `q` quit
//! 5. The focused pane
//!
//! A pending two-press delete only survives keys that reach the focused
//! pane. Anything claimed earlier disarms both lists.
//!
//! ## Redraw Strategy
//!
//! Only draws after an input event or a background result. The poll timeout
//! is short while any request is in flight so results show up promptly, and
//! long when idle.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, error, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{AdminApi, AnswerUpdate, HttpClient, NewSmallTalk, SmallTalkPatch};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::dispatch::{spawn_bot_poller, spawn_effect};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AnswerListEvent, AnswerListState, FormEvent, FormKind, FormState, TalkListEvent,
    TalkListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keys that no overlay or global binding claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Talks,
    Answers,
    Bot,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Talks => Pane::Answers,
            Pane::Answers => Pane::Bot,
            Pane::Bot => Pane::Talks,
        }
    }

    fn prev(self) -> Self {
        match self {
            Pane::Talks => Pane::Bot,
            Pane::Answers => Pane::Talks,
            Pane::Bot => Pane::Answers,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Pane,
    pub talk_list: TalkListState,
    pub answer_list: AnswerListState,
    // Form overlay (None = hidden)
    pub form: Option<FormState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Pane::Talks,
            talk_list: TalkListState::new(),
            answer_list: AnswerListState::new(),
            form: None,
        }
    }

    /// Keeps list cursors inside the data they point at.
    pub fn sync(&mut self, app: &App) {
        self.talk_list.sync(app.talks.len());
        self.answer_list.sync(app.answers.len());
    }

    pub fn cancel_deletes(&mut self) {
        self.talk_list.cancel_delete();
        self.answer_list.cancel_delete();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock, // Non-blinking: draw() resets the blink timer
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Turns a submitted form into the action it stands for.
///
/// Returns `None` when the values don't match the form's shape.
pub fn form_action(kind: FormKind, values: &[String]) -> Option<Action> {
    let action = match (kind, values) {
        (FormKind::NewTalk, [eng, kor, parenthesis, tag]) => Action::CreateTalk(NewSmallTalk {
            eng_sentence: eng.clone(),
            kor_sentence: kor.clone(),
            parenthesis: parenthesis.clone(),
            tag: tag.clone(),
        }),
        (FormKind::EditTalk(original), [eng, kor, parenthesis, tag]) => {
            let edited = NewSmallTalk {
                eng_sentence: eng.clone(),
                kor_sentence: kor.clone(),
                parenthesis: parenthesis.clone(),
                tag: tag.clone(),
            };
            Action::EditTalk {
                talk_id: original.talk_id,
                patch: SmallTalkPatch::diff(&original, &edited),
            }
        }
        (FormKind::NewAnswer, [eng, kor]) => Action::CreateAnswer {
            eng_sentence: eng.clone(),
            kor_sentence: kor.clone(),
        },
        (FormKind::EditAnswer(answer), [eng, kor]) => Action::EditAnswer {
            answer_id: answer.answer_id,
            update: AnswerUpdate {
                eng_sentence: eng.clone(),
                kor_sentence: kor.clone(),
            },
        },
        (FormKind::Filter, [tag]) => Action::SetFilter(Some(tag.clone())),
        _ => return None,
    };
    Some(action)
}

/// Routes one key event. Returns the action to feed to `update`, if any.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.alert.is_some() {
        tui.cancel_deletes();
        return matches!(event, TuiEvent::Submit | TuiEvent::Escape)
            .then_some(Action::DismissAlert);
    }

    if tui.form.is_some() {
        tui.cancel_deletes();
    }
    if let Some(form) = tui.form.as_mut() {
        return match form.handle_event(&event)? {
            FormEvent::Cancel => {
                tui.form = None;
                None
            }
            FormEvent::Submit(kind, values) => {
                tui.form = None;
                form_action(kind, &values)
            }
        };
    }

    if matches!(
        event,
        TuiEvent::FocusNext | TuiEvent::FocusPrev | TuiEvent::InputChar('q' | 'b' | 's')
    ) {
        tui.cancel_deletes();
    }
    match event {
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return None;
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            return None;
        }
        TuiEvent::InputChar('q') => return Some(Action::Quit),
        TuiEvent::InputChar('b') => return Some(Action::ToggleBot),
        TuiEvent::InputChar('s') => return Some(Action::SendNow),
        _ => {}
    }

    match tui.focus {
        Pane::Talks => match tui.talk_list.handle_event(&event, &app.talks)? {
            TalkListEvent::Select(talk) => Some(Action::SelectTalk(talk)),
            TalkListEvent::New => {
                tui.form = Some(FormState::new_talk());
                None
            }
            TalkListEvent::Edit(talk) => {
                tui.form = Some(FormState::edit_talk(&talk));
                None
            }
            TalkListEvent::Delete(talk_id) => Some(Action::DeleteTalk(talk_id)),
            TalkListEvent::Filter => {
                tui.form = Some(FormState::filter(app.filter_tag.as_deref()));
                None
            }
            TalkListEvent::Refresh => Some(Action::Refresh),
            TalkListEvent::PrevPage => app.pagination().prev().map(Action::ChangePage),
            TalkListEvent::NextPage => app.pagination().next().map(Action::ChangePage),
        },
        Pane::Answers => match tui.answer_list.handle_event(&event, &app.answers)? {
            AnswerListEvent::New => {
                if app.selected.is_some() {
                    tui.form = Some(FormState::new_answer());
                } else {
                    app.status_message = String::from("Select a small talk first");
                }
                None
            }
            AnswerListEvent::Edit(answer) => {
                tui.form = Some(FormState::edit_answer(&answer));
                None
            }
            AnswerListEvent::Delete(answer_id) => Some(Action::DeleteAnswer(answer_id)),
        },
        Pane::Bot => matches!(event, TuiEvent::Submit).then_some(Action::ToggleBot),
    }
}

/// Feeds one action through `update` and starts its effect.
/// Returns true when the app should quit.
fn apply(
    app: &mut App,
    action: Action,
    api: &Arc<dyn AdminApi>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        effect => {
            spawn_effect(Arc::clone(api), effect, tx.clone());
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = HttpClient::new(&config.base_url, Some(config.request_timeout)).map_err(|e| {
        error!("Could not build API client: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    info!("Admin client targeting {}", client.base_url());
    let api: Arc<dyn AdminApi> = Arc::new(client);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Polling stops when this handle drops at the end of `run`
    let _poller = spawn_bot_poller(config.poll_interval, tx.clone());

    apply(&mut app, Action::Mount, &api, &tx);

    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        if needs_redraw {
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let in_flight = app.is_loading || app.answers_loading || app.bot_busy || app.sending_now;
        let timeout = if in_flight {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&mut app, &mut tui, event)
                && apply(&mut app, action, &api, &tx)
            {
                break 'event_loop;
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, action, &api, &tx) {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
