//! # Responsive Mode Switch
//!
//! Classifies a viewport width into `Desktop`, `Tablet` or `Mobile` and
//! reports when a resize crosses one of the two breakpoints.
//!
//! ```text
//!   0 ─────── 767 │ 768 ────── 1024 │ 1025 ───────▶
//!      Mobile     │     Tablet      │    Desktop
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl ViewportClass {
    pub fn label(&self) -> &'static str {
        match self {
            ViewportClass::Desktop => "desktop",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Largest mobile width (inclusive).
    pub mobile_max: u32,
    /// Largest tablet width (inclusive).
    pub tablet_max: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 767,
            tablet_max: 1024,
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, width: u32) -> ViewportClass {
        if width <= self.mobile_max {
            ViewportClass::Mobile
        } else if width <= self.tablet_max {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }
}

/// What a resize means for the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub class: ViewportClass,
    /// A breakpoint was crossed: the overlay closes and the drill-down
    /// re-renders against `class`.
    pub crossed: bool,
    /// Plain-resize safety net: the width is at or below the tablet
    /// breakpoint, so an open overlay must close even without a crossing.
    pub below_overlay_width: bool,
}

#[derive(Debug, Clone)]
pub struct ResponsiveSwitch {
    breakpoints: Breakpoints,
    /// Pins the class regardless of width.
    forced: Option<ViewportClass>,
    class: ViewportClass,
}

impl ResponsiveSwitch {
    pub fn new(breakpoints: Breakpoints, forced: Option<ViewportClass>, width: u32) -> Self {
        let class = forced.unwrap_or_else(|| breakpoints.classify(width));
        Self {
            breakpoints,
            forced,
            class,
        }
    }

    pub fn class(&self) -> ViewportClass {
        self.class
    }

    /// Record a new width and report the consequences.
    pub fn observe(&mut self, width: u32) -> ResizeOutcome {
        let class = self
            .forced
            .unwrap_or_else(|| self.breakpoints.classify(width));
        let crossed = class != self.class;
        self.class = class;

        // A forced desktop keeps the overlay usable on any terminal size.
        let below_overlay_width =
            width <= self.breakpoints.tablet_max && self.forced != Some(ViewportClass::Desktop);

        ResizeOutcome {
            class,
            crossed,
            below_overlay_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let bp = Breakpoints::default();
        assert_eq!(bp.classify(0), ViewportClass::Mobile);
        assert_eq!(bp.classify(767), ViewportClass::Mobile);
        assert_eq!(bp.classify(768), ViewportClass::Tablet);
        assert_eq!(bp.classify(1024), ViewportClass::Tablet);
        assert_eq!(bp.classify(1025), ViewportClass::Desktop);
    }

    #[test]
    fn test_observe_reports_crossing_once() {
        let mut switch = ResponsiveSwitch::new(Breakpoints::default(), None, 1280);
        assert_eq!(switch.class(), ViewportClass::Desktop);

        let outcome = switch.observe(900);
        assert!(outcome.crossed);
        assert_eq!(outcome.class, ViewportClass::Tablet);
        assert!(outcome.below_overlay_width);

        let outcome = switch.observe(880);
        assert!(!outcome.crossed);
        assert!(outcome.below_overlay_width);
    }

    #[test]
    fn test_wide_resize_is_not_below_overlay_width() {
        let mut switch = ResponsiveSwitch::new(Breakpoints::default(), None, 1280);
        let outcome = switch.observe(1600);
        assert!(!outcome.crossed);
        assert!(!outcome.below_overlay_width);
    }

    #[test]
    fn test_forced_class_ignores_width() {
        let mut switch =
            ResponsiveSwitch::new(Breakpoints::default(), Some(ViewportClass::Tablet), 2000);
        assert_eq!(switch.class(), ViewportClass::Tablet);
        let outcome = switch.observe(300);
        assert!(!outcome.crossed);
        assert_eq!(outcome.class, ViewportClass::Tablet);
    }

    #[test]
    fn test_custom_breakpoints() {
        let bp = Breakpoints {
            mobile_max: 80,
            tablet_max: 120,
        };
        assert_eq!(bp.classify(100), ViewportClass::Tablet);
    }

    #[test]
    fn test_overlay_width_follows_custom_breakpoints() {
        let bp = Breakpoints {
            mobile_max: 599,
            tablet_max: 899,
        };
        let mut switch = ResponsiveSwitch::new(bp, None, 1000);
        assert_eq!(switch.class(), ViewportClass::Desktop);

        // Height-only resize at a desktop width keeps the overlay.
        let outcome = switch.observe(1000);
        assert!(!outcome.crossed);
        assert!(!outcome.below_overlay_width);

        let outcome = switch.observe(899);
        assert!(outcome.crossed);
        assert!(outcome.below_overlay_width);
    }
}
