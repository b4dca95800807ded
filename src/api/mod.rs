//! # Backend API
//!
//! Typed access to the small talk REST backend. Nothing in here holds state;
//! the coordinator in [`crate::core`] decides when to call what.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AdminApi, HttpClient};
pub use error::ApiError;
pub use types::{
    Answer, AnswerUpdate, BotStatus, Confirmation, NewAnswer, NewSmallTalk, SmallTalk,
    SmallTalkPatch, TalkPage,
};
