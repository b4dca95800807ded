//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    AdminApi, Answer, AnswerUpdate, ApiError, BotStatus, Confirmation, NewAnswer, NewSmallTalk,
    SmallTalk, SmallTalkPatch, TalkPage,
};
use crate::core::state::App;

pub fn talk(talk_id: i64, tag: &str) -> SmallTalk {
    SmallTalk {
        talk_id,
        eng_sentence: format!("Sentence {talk_id}"),
        kor_sentence: format!("문장 {talk_id}"),
        parenthesis: None,
        tag: Some(tag.to_string()),
        update_at: "2024-03-01T09:30:00".to_string(),
    }
}

pub fn answer(answer_id: i64, talk_id: i64) -> Answer {
    Answer {
        answer_id,
        talk_id,
        eng_sentence: format!("Answer {answer_id}"),
        kor_sentence: format!("대답 {answer_id}"),
        update_at: "2024-03-01T09:30:00".to_string(),
    }
}

pub fn page(items: Vec<SmallTalk>, total: u64) -> TalkPage {
    TalkPage { items, total }
}

/// An `App` sitting on `current_page` with a settled (not loading) page.
pub fn loaded_app(page_size: u32, current_page: u32, total: u64) -> App {
    let mut app = App::new(page_size);
    app.current_page = current_page;
    app.total = total;
    let first = i64::from((current_page - 1) * page_size) + 1;
    let remaining = total.saturating_sub(u64::from((current_page - 1) * page_size));
    let count = remaining.min(u64::from(page_size)) as i64;
    app.talks = (first..first + count).map(|id| talk(id, "greeting")).collect();
    app
}

/// In-memory `AdminApi`. Serves fixed data and records every call by name.
#[derive(Default)]
pub struct FakeApi {
    pub talks: Vec<SmallTalk>,
    pub answers: HashMap<i64, Vec<Answer>>,
    pub bot: Mutex<BotStatus>,
    /// Returned by every mutating call when set.
    pub fail_with: Option<ApiError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_small_talks(
        &self,
        tag: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<TalkPage, ApiError> {
        self.record(format!("list {:?} {} {}", tag, limit, offset));
        let filtered: Vec<_> = self
            .talks
            .iter()
            .filter(|t| tag.is_none_or(|tag| t.tag.as_deref() == Some(tag)))
            .cloned()
            .collect();
        let total = filtered.len() as u64;
        let items = filtered
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(TalkPage { items, total })
    }

    async fn list_answers(&self, talk_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.record(format!("answers {talk_id}"));
        Ok(self.answers.get(&talk_id).cloned().unwrap_or_default())
    }

    async fn create_small_talk(&self, new: &NewSmallTalk) -> Result<SmallTalk, ApiError> {
        self.record("create_talk".to_string());
        self.check()?;
        let mut created = talk(1000, &new.tag);
        created.eng_sentence = new.eng_sentence.clone();
        created.kor_sentence = new.kor_sentence.clone();
        Ok(created)
    }

    async fn update_small_talk(
        &self,
        talk_id: i64,
        _patch: &SmallTalkPatch,
    ) -> Result<SmallTalk, ApiError> {
        self.record(format!("update_talk {talk_id}"));
        self.check()?;
        Ok(talk(talk_id, "greeting"))
    }

    async fn delete_small_talk(&self, talk_id: i64) -> Result<Confirmation, ApiError> {
        self.record(format!("delete_talk {talk_id}"));
        self.check()?;
        Ok(Confirmation::default())
    }

    async fn create_answer(&self, new: &NewAnswer) -> Result<Answer, ApiError> {
        self.record(format!("create_answer {}", new.talk_id));
        self.check()?;
        Ok(answer(500, new.talk_id))
    }

    async fn update_answer(
        &self,
        answer_id: i64,
        _update: &AnswerUpdate,
    ) -> Result<Answer, ApiError> {
        self.record(format!("update_answer {answer_id}"));
        self.check()?;
        Ok(answer(answer_id, 1))
    }

    async fn delete_answer(&self, answer_id: i64) -> Result<Confirmation, ApiError> {
        self.record(format!("delete_answer {answer_id}"));
        self.check()?;
        Ok(Confirmation::default())
    }

    async fn bot_status(&self) -> Result<BotStatus, ApiError> {
        self.record("bot_status".to_string());
        Ok(self.bot.lock().unwrap().clone())
    }

    async fn set_bot_running(&self, running: bool) -> Result<BotStatus, ApiError> {
        self.record(format!("set_bot_running {running}"));
        self.check()?;
        let mut bot = self.bot.lock().unwrap();
        bot.running = running;
        Ok(bot.clone())
    }

    async fn send_now(&self) -> Result<Confirmation, ApiError> {
        self.record("send_now".to_string());
        self.check()?;
        Ok(Confirmation::default())
    }
}
