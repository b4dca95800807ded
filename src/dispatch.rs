//! # Effect Dispatch
//!
//! Runs the [`Effect`]s returned by `core::action::update` against an
//! [`AdminApi`] and turns each outcome back into the [`Action`] that reports
//! it. Every effect is one task; nothing is retried or cancelled once sent.
//!
//! Also owns the bot status poller, whose lifetime is tied to a [`PollHandle`].

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::AdminApi;
use crate::core::action::{Action, AnswerOp, Effect};

/// Performs one effect and returns the action that reports its outcome.
///
/// `Effect::None` and `Effect::Quit` have no I/O and yield `None`.
pub async fn perform(api: &dyn AdminApi, effect: Effect) -> Option<Action> {
    let action = match effect {
        Effect::None | Effect::Quit => return None,
        Effect::FetchTalks {
            request,
            tag,
            limit,
            offset,
        } => Action::TalksLoaded {
            request,
            result: api.list_small_talks(tag.as_deref(), limit, offset).await,
        },
        Effect::FetchAnswers { request, talk_id } => Action::AnswersLoaded {
            request,
            talk_id,
            result: api.list_answers(talk_id).await,
        },
        Effect::CreateTalk(talk) => Action::TalkSaved(api.create_small_talk(&talk).await),
        Effect::UpdateTalk { talk_id, patch } => {
            Action::TalkSaved(api.update_small_talk(talk_id, &patch).await)
        }
        Effect::DeleteTalk(talk_id) => Action::TalkDeleted {
            talk_id,
            result: api.delete_small_talk(talk_id).await,
        },
        Effect::CreateAnswer(answer) => Action::AnswerMutated {
            op: AnswerOp::Create,
            result: api.create_answer(&answer).await.map(|_| ()),
        },
        Effect::UpdateAnswer { answer_id, update } => Action::AnswerMutated {
            op: AnswerOp::Update,
            result: api.update_answer(answer_id, &update).await.map(|_| ()),
        },
        Effect::DeleteAnswer(answer_id) => Action::AnswerMutated {
            op: AnswerOp::Delete,
            result: api.delete_answer(answer_id).await.map(|_| ()),
        },
        Effect::FetchBotStatus => Action::BotStatusLoaded(api.bot_status().await),
        Effect::SetBotRunning(running) => {
            Action::BotToggled(api.set_bot_running(running).await.map(|_| ()))
        }
        Effect::SendNow => Action::SendNowDone(api.send_now().await.map(|_| ())),
    };
    Some(action)
}

/// Runs `effect` on a tokio task and sends the resulting action to `tx`.
pub fn spawn_effect(api: Arc<dyn AdminApi>, effect: Effect, tx: Sender<Action>) {
    if matches!(effect, Effect::None | Effect::Quit) {
        return;
    }
    debug!("Spawning effect: {:?}", effect);
    tokio::spawn(async move {
        if let Some(action) = perform(api.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver effect result: receiver dropped");
        }
    });
}

/// Owns the bot status polling task. Dropping it stops the polling.
pub struct PollHandle {
    abort: AbortHandle,
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        debug!("Stopping bot status poller");
        self.abort.abort();
    }
}

/// Sends `Action::PollBotStatus` right away and then every `period`.
pub fn spawn_bot_poller(period: Duration, tx: Sender<Action>) -> PollHandle {
    info!("Polling bot status every {:?}", period);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.send(Action::PollBotStatus).is_err() {
                debug!("Bot poller stopping: receiver dropped");
                return;
            }
        }
    });
    PollHandle {
        abort: handle.abort_handle(),
    }
}
