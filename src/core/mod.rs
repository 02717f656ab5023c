//! # Core Application Logic
//!
//! This module contains GameFinder's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • pages (search, chat, │
//!                    │    detail)              │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  storage   │      │    API     │
//!     │  Adapter   │      │ (JSON slot)│      │  (reqwest) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`search`], [`chat`], [`detail`]: per-page state machines
//! - [`storage`]: the `selectedGame` hand-off slot
//! - [`preview`]: timed image rotation (hero carousel, card hover)
//! - [`route`]: page routes
//! - [`config`]: layered configuration

pub mod action;
pub mod chat;
pub mod config;
pub mod detail;
pub mod preview;
pub mod route;
pub mod search;
pub mod state;
pub mod storage;
