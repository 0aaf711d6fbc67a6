//! # Actions
//!
//! Everything that can happen in meganav becomes an `Action`.
//! Pointer enters the "Products" trigger? That's `Action::TriggerEnter`.
//! A hover deadline passes? That's `Action::Tick(now)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the adapter to carry out.
//! No I/O here: opening a browser happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Time is part of the action (`HoverEnter { now }`, `Tick(now)`), which
//! keeps every transition replayable in tests.

use log::{debug, info};
use std::time::Instant;

use crate::core::desktop::Activation;
use crate::core::frame::{NavFrame, Position};
use crate::core::hover::{HoverGroup, HoverTarget};
use crate::core::responsive::ViewportClass;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Desktop overlay
    TriggerEnter(String),
    TriggerClick(String),
    BackdropClick,
    SearchClick,
    PanelEnter,
    PanelLeave(Instant),
    HoverEnter { target: HoverTarget, now: Instant },
    HoverLeave(HoverGroup),
    /// Click on an item inside the open panel.
    Activate(Activation),
    FocusNext,
    FocusPrev,
    FocusActivate,

    // Drill-down menu
    ToggleDrillDown,
    Push { frame: NavFrame, position: Position },
    NavigateTo(usize),
    Back,
    DrillAccordionToggle(usize),

    // Shared
    FollowLink(String),
    Escape,
    /// New viewport width in pixels.
    Resize(u32),
    Tick(Instant),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Leave the menu for `url`. With `after_close` the adapter plays the
    /// drill-down close slide first.
    Redirect { url: String, after_close: bool },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    let viewport = app.viewport();

    match action {
        Action::TriggerEnter(panel) => {
            if viewport == ViewportClass::Desktop {
                app.desktop.trigger_enter(&panel, &app.content);
            }
            Effect::None
        }
        Action::TriggerClick(panel) => {
            if viewport == ViewportClass::Desktop {
                app.desktop.trigger_click(&panel, &app.content);
            }
            Effect::None
        }
        Action::BackdropClick | Action::SearchClick => {
            app.desktop.close();
            Effect::None
        }
        Action::PanelEnter => {
            app.desktop.panel_enter();
            Effect::None
        }
        Action::PanelLeave(now) => {
            app.desktop.panel_leave(now);
            Effect::None
        }
        Action::HoverEnter { target, now } => {
            if app.desktop.is_open() {
                app.desktop.hover_enter(target, now);
            }
            Effect::None
        }
        Action::HoverLeave(group) => {
            app.desktop.hover_leave(group);
            Effect::None
        }
        Action::Activate(activation) => activate(app, activation),
        Action::FocusNext => {
            let count = app.desktop_view().focusables.len();
            app.desktop.move_focus(true, count);
            Effect::None
        }
        Action::FocusPrev => {
            let count = app.desktop_view().focusables.len();
            app.desktop.move_focus(false, count);
            Effect::None
        }
        Action::FocusActivate => {
            let focused = app.desktop_view().focused().map(|f| f.activation.clone());
            match focused {
                Some(activation) => activate(app, activation),
                None => Effect::None,
            }
        }

        Action::ToggleDrillDown => {
            if app.drill_open {
                close_drill_down(app);
            } else if viewport != ViewportClass::Desktop {
                info!("Opening drill-down menu ({})", viewport.label());
                app.drill_open = true;
                app.navigator.open(viewport);
                app.refresh_plan();
            }
            Effect::None
        }
        Action::Push { frame, position } => {
            if app.drill_open {
                app.status_message = frame.label.clone();
                app.navigator.push(frame, position);
                app.refresh_plan();
            }
            Effect::None
        }
        Action::NavigateTo(index) => {
            if app.drill_open {
                app.navigator.navigate_to(index, viewport);
                app.refresh_plan();
            }
            Effect::None
        }
        Action::Back => {
            if app.drill_open {
                app.navigator.back(viewport);
                app.refresh_plan();
            }
            Effect::None
        }
        Action::DrillAccordionToggle(index) => {
            if app.drill_open {
                app.navigator.toggle_accordion(index);
                app.refresh_plan();
            }
            Effect::None
        }

        Action::FollowLink(url) => follow_link(app, url),
        Action::Escape => {
            app.desktop.close();
            close_drill_down(app);
            Effect::None
        }
        Action::Resize(width) => {
            let outcome = app.responsive.observe(width);
            if outcome.crossed {
                info!(
                    "Viewport crossed into {} at {}px",
                    outcome.class.label(),
                    width
                );
                app.desktop.close();
                if outcome.class == ViewportClass::Desktop {
                    close_drill_down(app);
                } else {
                    app.refresh_plan();
                }
            } else if outcome.below_overlay_width && app.desktop.is_open() {
                info!("Closing overlay on resize to {}px", width);
                app.desktop.close();
            }
            Effect::None
        }
        Action::Tick(now) => {
            app.desktop.tick(now, &app.content);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn activate(app: &mut App, activation: Activation) -> Effect {
    match app.desktop.activate(activation, &app.content) {
        Some(url) => follow_link(app, url),
        None => Effect::None,
    }
}

fn follow_link(app: &mut App, url: String) -> Effect {
    info!("Following link {}", url);
    app.status_message = format!("Opening {url}");
    let after_close = app.drill_open;
    app.desktop.close();
    close_drill_down(app);
    Effect::Redirect { url, after_close }
}

fn close_drill_down(app: &mut App) {
    if app.drill_open {
        info!("Closing drill-down menu");
    }
    app.drill_open = false;
    app.navigator.close();
    app.plan = None;
}
