//! # Core Application Logic
//!
//! The client-side state and every rule for changing it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Pagination (math)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │ dispatch (tokio tasks)  │──► api::AdminApi ──► backend
//!                    └───────────┬─────────────┘
//!                                │ Action
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │  TUI adapter (ratatui)  │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all client-side state in one place
//! - [`action`]: The `Action` enum, the `Effect` enum and `update()`
//! - [`pagination`]: Page count and boundary math
//! - [`config`]: Layered settings (file, env, CLI)

pub mod action;
pub mod config;
pub mod pagination;
pub mod state;
