//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `NavBar`: Top row with the menu triggers or the hamburger
//!
//! ### Transient Wrappers Over Persistent State
//!
//! Created each frame around props from core plus `&mut` scroll state owned
//! by `TuiState`:
//! - `MegaPanel`: Desktop overlay (products columns, cards, tabs)
//! - `DrillDown`: Tablet/mobile breadcrumb and columns, with slide motion
//!
//! ## Design Philosophy
//!
//! ### Props-Based Data Flow
//!
//! Components receive the derived core projections (`DesktopView`,
//! `RenderPlan`) as props and never read `App` directly. Everything they
//! paint that reacts to the pointer is reported back as a `HitRegion`, so
//! the event loop hit-tests exactly what was drawn.
//!
//! ```rust,ignore
//! let mut bar = NavBar::new(&view, app.viewport(), app.drill_open, status);
//! bar.render(frame, bar_area);
//! tui.hits.extend(bar.hit_regions());
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── nav_bar.rs      (Top bar)
//! ├── mega_panel.rs   (Desktop overlay)
//! └── drill_down.rs   (Tablet/mobile menu)
//! ```

mod drill_down;
mod mega_panel;
mod nav_bar;

pub use drill_down::DrillDown;
pub use mega_panel::MegaPanel;
pub use nav_bar::NavBar;
