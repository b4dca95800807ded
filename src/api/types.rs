//! Wire types for the small talk backend.
//!
//! Field names follow the backend's JSON exactly (`talk_id`, `eng_sentence`,
//! ...), so no serde renames are needed on the entity types.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A canonical English/Korean sentence pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SmallTalk {
    pub talk_id: i64,
    pub eng_sentence: String,
    pub kor_sentence: String,
    #[serde(default)]
    pub parenthesis: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub update_at: String,
}

impl SmallTalk {
    /// The annotation, if it has any visible content.
    pub fn annotation(&self) -> Option<&str> {
        self.parenthesis.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn tag_label(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }
}

/// A response sentence pair scoped to one small talk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Answer {
    pub answer_id: i64,
    pub talk_id: i64,
    pub eng_sentence: String,
    pub kor_sentence: String,
    #[serde(default)]
    pub update_at: String,
}

/// Polled snapshot of the background bot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BotStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub jobs: Option<Vec<serde_json::Value>>,
}

impl BotStatus {
    pub fn job_count(&self) -> usize {
        self.jobs.as_ref().map_or(0, Vec::len)
    }
}

/// One page of small talks plus the total under the same filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalkPage {
    pub items: Vec<SmallTalk>,
    pub total: u64,
}

/// Generic acknowledgement for delete and trigger endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Confirmation {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for `POST /small-talk`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct NewSmallTalk {
    pub eng_sentence: String,
    pub kor_sentence: String,
    pub parenthesis: String,
    pub tag: String,
}

/// Body for `PATCH /small-talk/{id}`. Only `Some` fields are sent.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SmallTalkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eng_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kor_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parenthesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SmallTalkPatch {
    /// Builds a patch holding only the fields of `edited` that differ from `original`.
    pub fn diff(original: &SmallTalk, edited: &NewSmallTalk) -> Self {
        fn changed(before: &str, after: &str) -> Option<String> {
            (before != after).then(|| after.to_string())
        }

        Self {
            eng_sentence: changed(&original.eng_sentence, &edited.eng_sentence),
            kor_sentence: changed(&original.kor_sentence, &edited.kor_sentence),
            parenthesis: changed(
                original.parenthesis.as_deref().unwrap_or(""),
                &edited.parenthesis,
            ),
            tag: changed(original.tag_label(), &edited.tag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.eng_sentence.is_none()
            && self.kor_sentence.is_none()
            && self.parenthesis.is_none()
            && self.tag.is_none()
    }
}

/// Body for `POST /answers`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewAnswer {
    pub talk_id: i64,
    pub eng_sentence: String,
    pub kor_sentence: String,
}

/// Body for `PUT /answers/{id}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnswerUpdate {
    pub eng_sentence: String,
    pub kor_sentence: String,
}

/// `GET /small-talk` is documented as a bare array, but the backend also
/// serves a paginated envelope. Both shapes are accepted.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum TalkListBody {
    Bare(Vec<SmallTalk>),
    Envelope { items: Vec<SmallTalk> },
}

impl TalkListBody {
    pub(crate) fn into_items(self) -> Vec<SmallTalk> {
        match self {
            TalkListBody::Bare(items) | TalkListBody::Envelope { items } => items,
        }
    }
}

/// `GET /small-talk/count` body.
#[derive(Deserialize, Debug)]
pub(crate) struct CountBody {
    pub total: u64,
}

/// Formats a backend timestamp as a calendar date (`2024-03-01`).
///
/// Accepts RFC 3339 and the offset-less form the backend emits. Anything else
/// is shown verbatim.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
