//! # Core Application Logic
//!
//! This module contains meganav's navigation logic.
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
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`desktop`]: Mega menu overlay controller (wide viewports)
//! - [`navigator`]: Drill-down view stack (tablet and mobile)
//! - [`view`]: Per-frame content rendering
//! - [`hover`]: Cancellable hover-intent deadlines
//! - [`responsive`]: Viewport classification and breakpoint crossings
//! - [`content`]: Menu content model and loading
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod content;
pub mod desktop;
pub mod frame;
pub mod hover;
pub mod navigator;
pub mod responsive;
pub mod state;
pub mod view;
