//! # Actions
//!
//! Everything that can happen in the admin client becomes an `Action`.
//! User picks a talk? That's `Action::SelectTalk(talk)`.
//! The backend answers? That's `Action::TalksLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the runtime should perform next.
//! No I/O happens here; `crate::dispatch` turns effects into requests and
//! their results back into actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{
    Answer, AnswerUpdate, ApiError, BotStatus, Confirmation, NewAnswer, NewSmallTalk, SmallTalk,
    SmallTalkPatch, TalkPage,
};
use crate::core::state::App;

/// Status line text after a failed talk listing.
pub const LOAD_FAILED_STATUS: &str = "Could not load small talks";

/// Which answer mutation a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOp {
    Create,
    Update,
    Delete,
}

impl AnswerOp {
    fn verb(self) -> &'static str {
        match self {
            AnswerOp::Create => "create",
            AnswerOp::Update => "update",
            AnswerOp::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial load when the view comes up.
    Mount,
    /// Re-fetch the current page as-is.
    Refresh,
    SetFilter(Option<String>),
    ChangePage(u32),
    TalksLoaded {
        request: u64,
        result: Result<TalkPage, ApiError>,
    },
    SelectTalk(SmallTalk),
    AnswersLoaded {
        request: u64,
        talk_id: i64,
        result: Result<Vec<Answer>, ApiError>,
    },
    CreateTalk(NewSmallTalk),
    EditTalk {
        talk_id: i64,
        patch: SmallTalkPatch,
    },
    TalkSaved(Result<SmallTalk, ApiError>),
    DeleteTalk(i64),
    TalkDeleted {
        talk_id: i64,
        result: Result<Confirmation, ApiError>,
    },
    /// New answer for the currently selected talk.
    CreateAnswer {
        eng_sentence: String,
        kor_sentence: String,
    },
    EditAnswer {
        answer_id: i64,
        update: AnswerUpdate,
    },
    DeleteAnswer(i64),
    AnswerMutated {
        op: AnswerOp,
        result: Result<(), ApiError>,
    },
    ToggleBot,
    BotToggled(Result<(), ApiError>),
    SendNow,
    SendNowDone(Result<(), ApiError>),
    PollBotStatus,
    BotStatusLoaded(Result<BotStatus, ApiError>),
    DismissAlert,
    Quit,
}

/// Work the runtime must do after an `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchTalks {
        request: u64,
        tag: Option<String>,
        limit: u32,
        offset: u64,
    },
    FetchAnswers {
        request: u64,
        talk_id: i64,
    },
    CreateTalk(NewSmallTalk),
    UpdateTalk {
        talk_id: i64,
        patch: SmallTalkPatch,
    },
    DeleteTalk(i64),
    CreateAnswer(NewAnswer),
    UpdateAnswer {
        answer_id: i64,
        update: AnswerUpdate,
    },
    DeleteAnswer(i64),
    FetchBotStatus,
    SetBotRunning(bool),
    SendNow,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount | Action::Refresh => fetch_talks(app),

        Action::SetFilter(tag) => {
            app.filter_tag = tag
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());
            app.current_page = 1;
            info!("Filter set to {:?}", app.filter_tag);
            fetch_talks(app)
        }

        Action::ChangePage(page) => {
            let target = app.pagination().clamp(page);
            if target == app.current_page {
                return Effect::None;
            }
            app.current_page = target;
            fetch_talks(app)
        }

        Action::TalksLoaded { request, result } => {
            if request != app.talks_request {
                debug!(
                    "Dropping stale talk page (request {}, latest {})",
                    request, app.talks_request
                );
                return Effect::None;
            }
            app.is_loading = false;
            match result {
                Ok(page) => {
                    app.talks = page.items;
                    app.total = page.total;
                    if app.status_message == LOAD_FAILED_STATUS {
                        app.status_message.clear();
                    }

                    let last_page = app.pagination().total_pages();
                    if app.total > 0 && app.current_page > last_page {
                        info!(
                            "Page {} is past the end ({} pages), moving back",
                            app.current_page, last_page
                        );
                        app.current_page = last_page;
                        return fetch_talks(app);
                    }
                    Effect::None
                }
                Err(e) => {
                    warn!("Failed to load small talks: {}", e);
                    app.talks.clear();
                    app.total = 0;
                    app.status_message = String::from(LOAD_FAILED_STATUS);
                    Effect::None
                }
            }
        }

        Action::SelectTalk(talk) => {
            let talk_id = talk.talk_id;
            app.selected = Some(talk);
            app.answers.clear();
            fetch_answers(app, talk_id)
        }

        Action::AnswersLoaded {
            request,
            talk_id,
            result,
        } => {
            if request != app.answers_request || app.selected_talk_id() != Some(talk_id) {
                debug!(
                    "Dropping answers for talk {} (request {}, latest {})",
                    talk_id, request, app.answers_request
                );
                return Effect::None;
            }
            app.answers_loading = false;
            match result {
                Ok(answers) => app.answers = answers,
                Err(e) => {
                    warn!("Failed to load answers for talk {}: {}", talk_id, e);
                    app.answers.clear();
                }
            }
            Effect::None
        }

        Action::CreateTalk(talk) => Effect::CreateTalk(talk),

        Action::EditTalk { talk_id, patch } => {
            if patch.is_empty() {
                app.status_message = String::from("No changes to save");
                return Effect::None;
            }
            Effect::UpdateTalk { talk_id, patch }
        }

        Action::TalkSaved(result) => match result {
            Ok(talk) => {
                info!("Saved small talk {}", talk.talk_id);
                app.status_message = format!("Saved small talk #{}", talk.talk_id);
                if app.selected_talk_id() == Some(talk.talk_id) {
                    app.selected = Some(talk);
                }
                app.current_page = 1;
                fetch_talks(app)
            }
            Err(e) => {
                app.alert = Some(format!("Failed to save small talk. {}", e.message()));
                Effect::None
            }
        },

        Action::DeleteTalk(talk_id) => Effect::DeleteTalk(talk_id),

        Action::TalkDeleted { talk_id, result } => {
            let deleted = match result {
                Ok(_) => true,
                Err(e) if app.tolerate_delete_errors && e.is_transport() => {
                    warn!(
                        "Delete of talk {} reported a transport error, assuming it went through: {}",
                        talk_id, e
                    );
                    true
                }
                Err(e) => {
                    app.alert = Some(format!("Failed to delete small talk. {}", e.message()));
                    false
                }
            };
            if !deleted {
                return Effect::None;
            }

            info!("Deleted small talk {}", talk_id);
            app.status_message = format!("Deleted small talk #{talk_id}");
            if app.selected_talk_id() == Some(talk_id) {
                app.selected = None;
                app.answers.clear();
                app.answers_loading = false;
            }
            fetch_talks(app)
        }

        Action::CreateAnswer {
            eng_sentence,
            kor_sentence,
        } => match app.selected_talk_id() {
            Some(talk_id) => Effect::CreateAnswer(NewAnswer {
                talk_id,
                eng_sentence,
                kor_sentence,
            }),
            None => {
                app.status_message = String::from("Select a small talk first");
                Effect::None
            }
        },

        Action::EditAnswer { answer_id, update } => Effect::UpdateAnswer { answer_id, update },

        Action::DeleteAnswer(answer_id) => Effect::DeleteAnswer(answer_id),

        Action::AnswerMutated { op, result } => match result {
            Ok(()) => match app.selected_talk_id() {
                Some(talk_id) => fetch_answers(app, talk_id),
                None => Effect::None,
            },
            Err(e) => {
                app.alert = Some(format!("Failed to {} answer. {}", op.verb(), e.message()));
                Effect::None
            }
        },

        Action::ToggleBot => {
            if app.bot_busy {
                return Effect::None;
            }
            app.bot_busy = true;
            Effect::SetBotRunning(!app.bot.running)
        }

        Action::BotToggled(result) => {
            app.bot_busy = false;
            if let Err(e) = result {
                warn!("Bot start/stop failed: {}", e);
                app.status_message = format!("Bot control failed: {}", e.message());
            }
            Effect::FetchBotStatus
        }

        Action::SendNow => {
            if !app.can_send_now() {
                return Effect::None;
            }
            app.sending_now = true;
            Effect::SendNow
        }

        Action::SendNowDone(result) => {
            app.sending_now = false;
            match result {
                Ok(()) => app.status_message = String::from("Message sent"),
                Err(e) => {
                    warn!("Send-now failed: {}", e);
                    app.status_message = format!("Send failed: {}", e.message());
                }
            }
            Effect::FetchBotStatus
        }

        Action::PollBotStatus => Effect::FetchBotStatus,

        Action::BotStatusLoaded(result) => {
            match result {
                Ok(status) => app.bot = status,
                Err(e) => warn!("Failed to fetch bot status: {}", e),
            }
            Effect::None
        }

        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Starts a new talk page request for the current filter and page.
fn fetch_talks(app: &mut App) -> Effect {
    app.talks_request += 1;
    app.is_loading = true;
    Effect::FetchTalks {
        request: app.talks_request,
        tag: app.filter_tag.clone(),
        limit: app.page_size,
        offset: app.pagination().offset(),
    }
}

/// Starts a new answer request for `talk_id`; earlier ones become stale.
fn fetch_answers(app: &mut App, talk_id: i64) -> Effect {
    app.answers_request += 1;
    app.answers_loading = true;
    Effect::FetchAnswers {
        request: app.answers_request,
        talk_id,
    }
}
