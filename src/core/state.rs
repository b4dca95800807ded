//! # Application State
//!
//! The one container that owns every piece of client-side state. No
//! ratatui types here; presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── talks: Vec<SmallTalk>        // current page, replaced wholesale
//! ├── total: u64                   // count under the current filter
//! ├── is_loading: bool             // talk page request in flight
//! ├── filter_tag: Option<String>   // server-side tag filter
//! ├── current_page / page_size     // 1-based pagination
//! ├── selected: Option<SmallTalk>  // talk whose answers are shown
//! ├── answers: Vec<Answer>         // answers of `selected` only
//! ├── bot: BotStatus               // last polled snapshot
//! ├── bot_busy / sending_now       // control requests in flight
//! ├── alert: Option<String>        // mutation failure shown to the user
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{Answer, BotStatus, SmallTalk};
use crate::core::config::ResolvedConfig;
use crate::core::pagination::Pagination;

pub struct App {
    pub talks: Vec<SmallTalk>,
    pub total: u64,
    pub is_loading: bool,
    pub filter_tag: Option<String>,
    pub current_page: u32,
    pub page_size: u32,
    pub selected: Option<SmallTalk>,
    pub answers: Vec<Answer>,
    pub answers_loading: bool,
    pub bot: BotStatus,
    pub bot_busy: bool,
    pub sending_now: bool,
    pub alert: Option<String>,
    pub status_message: String,
    /// Treat transport-level delete failures as success.
    pub tolerate_delete_errors: bool,
    /// Sequence number of the newest talk page request; older responses are dropped.
    pub(crate) talks_request: u64,
    /// Same, for answer requests.
    pub(crate) answers_request: u64,
}

impl App {
    pub fn new(page_size: u32) -> Self {
        Self {
            talks: Vec::new(),
            total: 0,
            is_loading: false,
            filter_tag: None,
            current_page: 1,
            page_size: page_size.max(1),
            selected: None,
            answers: Vec::new(),
            answers_loading: false,
            bot: BotStatus::default(),
            bot_busy: false,
            sending_now: false,
            alert: None,
            status_message: String::from("Welcome to Small Talk Admin"),
            tolerate_delete_errors: true,
            talks_request: 0,
            answers_request: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.page_size);
        app.tolerate_delete_errors = config.tolerate_delete_errors;
        app
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.total, self.page_size)
    }

    pub fn selected_talk_id(&self) -> Option<i64> {
        self.selected.as_ref().map(|t| t.talk_id)
    }

    /// "Send Message Now" is only offered while the bot runs and no send is pending.
    pub fn can_send_now(&self) -> bool {
        self.bot.running && !self.sending_now
    }
}
