use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::ui::HitRegion;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to:
/// 1. Record the hit regions of whatever they painted.
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Interactive regions painted by the last `render`, in paint order.
    fn hit_regions(&mut self) -> Vec<HitRegion> {
        Vec::new()
    }
}
