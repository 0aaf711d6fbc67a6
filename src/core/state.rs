//! # Application State
//!
//! Core state for meganav. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── content: MenuContent          // what the menus show
//! ├── desktop: DesktopPanel         // overlay open/closed + selections
//! ├── navigator: ViewStack          // drill-down frames
//! ├── drill_open: bool              // hamburger menu shown
//! ├── responsive: ResponsiveSwitch  // current viewport class
//! ├── plan: Option<RenderPlan>      // last drill-down render
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! `plan` is recomputed there after every navigator mutation, so it always
//! reflects the current stack.

use crate::core::config::ResolvedConfig;
use crate::core::content::MenuContent;
use crate::core::desktop::{DesktopPanel, DesktopView};
use crate::core::navigator::{RenderPlan, ViewStack};
use crate::core::responsive::{ResponsiveSwitch, ViewportClass};

pub struct App {
    pub content: MenuContent,
    pub desktop: DesktopPanel,
    pub navigator: ViewStack,
    pub drill_open: bool,
    pub responsive: ResponsiveSwitch,
    /// Drill-down paint instructions. `None` while the drill-down is closed.
    pub plan: Option<RenderPlan>,
    pub status_message: String,
}

impl App {
    /// `width_px` is the starting viewport width in pixels.
    pub fn new(content: MenuContent, config: &ResolvedConfig, width_px: u32) -> Self {
        Self {
            content,
            desktop: DesktopPanel::new(config.timing),
            navigator: ViewStack::new(),
            drill_open: false,
            responsive: ResponsiveSwitch::new(config.breakpoints, config.viewport, width_px),
            plan: None,
            status_message: String::new(),
        }
    }

    pub fn viewport(&self) -> ViewportClass {
        self.responsive.class()
    }

    pub fn desktop_view(&self) -> DesktopView {
        self.desktop.view(&self.content)
    }

    /// Re-render the drill-down against the current viewport.
    pub(crate) fn refresh_plan(&mut self) {
        self.plan = if self.drill_open {
            Some(self.navigator.render(self.viewport(), &self.content))
        } else {
            None
        };
    }
}
