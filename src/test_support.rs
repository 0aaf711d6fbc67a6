//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::content::MenuContent;
use crate::core::responsive::ViewportClass;
use crate::core::state::App;

/// The embedded sample content.
pub fn test_content() -> MenuContent {
    MenuContent::builtin()
}

/// A representative pixel width for each class.
pub fn width_for(viewport: ViewportClass) -> u32 {
    match viewport {
        ViewportClass::Desktop => 1280,
        ViewportClass::Tablet => 900,
        ViewportClass::Mobile => 400,
    }
}

/// Creates a test App on the builtin content, sized for `viewport` but not
/// pinned to it, so resizes still cross breakpoints.
pub fn test_app(viewport: ViewportClass) -> App {
    App::new(test_content(), &ResolvedConfig::default(), width_for(viewport))
}
