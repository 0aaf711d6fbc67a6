//! # View Stack Navigator
//!
//! The drill-down menu's navigation state: an ordered stack of frames with
//! the root at index 0. What is visible is derived from the tail of the
//! stack and the viewport class:
//!
//! ```text
//!  stack:   [ root | products | crypto-types | crypto-detail ]
//!                     ╰── crumbs ──╯
//!  tablet:                        master column │ detail column
//!
//!  stack:   [ root | products | crypto-types ]
//!                    ╰crumbs╯
//!  mobile:                        single column
//! ```
//!
//! Every mutation records a pending direction. The next `render` compares
//! each column's new frame against the one it painted last time and attaches
//! a slide to the columns whose frame changed; the direction is then cleared
//! so repeated renders are idempotent paints.

use log::debug;

use crate::core::content::MenuContent;
use crate::core::frame::{Direction, NavFrame, Position, Slide, View, ViewKind};
use crate::core::responsive::ViewportClass;
use crate::core::view::{ViewContent, ViewContext, render_view};

/// The two physical columns of the drill-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Tablet master column; the only column on mobile when at the root.
    Root,
    /// Tablet detail column; the mobile column for anything below the root.
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPaint {
    pub column: Column,
    /// Position clicks in this column push with.
    pub position: Position,
    pub frame: NavFrame,
    pub content: ViewContent,
    pub slide: Option<Slide>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Stack index `navigate_to` is called with.
    pub target: usize,
}

/// Result of one render: what each column shows and the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub viewport: ViewportClass,
    pub columns: Vec<ColumnPaint>,
    /// Column hidden in single-column mode.
    pub hidden: Option<Column>,
    pub breadcrumb: Vec<Crumb>,
}

impl RenderPlan {
    pub fn column(&self, column: Column) -> Option<&ColumnPaint> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn is_animated(&self) -> bool {
        self.columns.iter().any(|c| c.slide.is_some())
    }
}

#[derive(Debug, Default)]
pub struct ViewStack {
    frames: Vec<NavFrame>,
    direction: Option<Direction>,
    /// Kind last painted into the root column.
    prev_root: Option<ViewKind>,
    /// Full view last painted into the detail column.
    prev_detail: Option<View>,
    /// Column visible after the last single-column render.
    visible: Option<Column>,
    /// Open group of the detail column's accordion list.
    expanded: Option<usize>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Seed the stack for a freshly opened menu.
    pub fn open(&mut self, viewport: ViewportClass) {
        self.frames = vec![NavFrame::root()];
        self.direction = None;
        self.pad_for(viewport);
        debug!("View stack opened for {}: {} frame(s)", viewport.label(), self.frames.len());
    }

    /// Show `frame`. From the master column it replaces the detail half;
    /// anywhere else it stacks on top.
    pub fn push(&mut self, frame: NavFrame, position: Position) {
        if self.frames.is_empty() {
            debug!("Ignoring push of {:?} while closed", frame.view.kind());
            return;
        }
        match position {
            Position::Left if self.frames.len() > 1 => {
                let last = self.frames.len() - 1;
                self.frames[last] = frame;
            }
            _ => self.frames.push(frame),
        }
        self.direction = Some(Direction::Forward);
    }

    /// Truncate back to `index` (inclusive).
    pub fn navigate_to(&mut self, index: usize, viewport: ViewportClass) {
        if self.frames.is_empty() {
            return;
        }
        let keep = (index + 1).min(self.frames.len());
        self.frames.truncate(keep);
        self.pad_for(viewport);
        self.direction = Some(Direction::Back);
    }

    /// Step back one level.
    pub fn back(&mut self, viewport: ViewportClass) {
        if self.frames.len() >= 2 {
            self.navigate_to(self.frames.len() - 2, viewport);
        }
    }

    pub fn toggle_accordion(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn close(&mut self) {
        self.frames.clear();
        self.direction = None;
        self.prev_root = None;
        self.prev_detail = None;
        self.visible = None;
        self.expanded = None;
    }

    /// Tablet always keeps a detail frame.
    fn pad_for(&mut self, viewport: ViewportClass) {
        if viewport == ViewportClass::Tablet && self.frames.len() < 2 {
            self.frames.push(NavFrame::tablet_default());
        }
    }

    pub fn render(&mut self, viewport: ViewportClass, content: &MenuContent) -> RenderPlan {
        if self.frames.is_empty() {
            return RenderPlan {
                viewport,
                columns: Vec::new(),
                hidden: None,
                breadcrumb: Vec::new(),
            };
        }
        self.pad_for(viewport);

        let plan = if viewport == ViewportClass::Tablet {
            self.render_two_columns(content)
        } else {
            self.render_single_column(viewport, content)
        };

        self.direction = None;
        plan
    }

    fn render_two_columns(&mut self, content: &MenuContent) -> RenderPlan {
        let len = self.frames.len();
        let left = self.frames[len - 2].clone();
        let right = self.frames[len - 1].clone();

        let left_changed = self.prev_root != Some(left.view.kind());
        let right_changed = self.prev_detail.as_ref() != Some(&right.view);
        if right_changed {
            self.reset_accordion(&right.view, content);
        }

        let left_paint = ColumnPaint {
            column: Column::Root,
            position: Position::Left,
            content: render_view(
                &left,
                &ViewContext {
                    content,
                    position: Position::Left,
                    viewport: ViewportClass::Tablet,
                    detail: Some(&right.view),
                    expanded: None,
                },
            ),
            slide: self.slide_if(left_changed),
            frame: left,
        };
        let right_paint = ColumnPaint {
            column: Column::Detail,
            position: Position::Right,
            content: render_view(
                &right,
                &ViewContext {
                    content,
                    position: Position::Right,
                    viewport: ViewportClass::Tablet,
                    detail: None,
                    expanded: self.expanded,
                },
            ),
            slide: self.slide_if(right_changed),
            frame: right,
        };

        self.prev_root = Some(left_paint.frame.view.kind());
        self.prev_detail = Some(right_paint.frame.view.clone());
        self.visible = None;

        RenderPlan {
            viewport: ViewportClass::Tablet,
            columns: vec![left_paint, right_paint],
            hidden: None,
            breadcrumb: self.breadcrumb(2),
        }
    }

    fn render_single_column(&mut self, viewport: ViewportClass, content: &MenuContent) -> RenderPlan {
        let len = self.frames.len();
        let tail = self.frames[len - 1].clone();
        let target = if len <= 1 { Column::Root } else { Column::Detail };

        let changed = match target {
            Column::Root => self.prev_root != Some(tail.view.kind()),
            Column::Detail => self.prev_detail.as_ref() != Some(&tail.view),
        };
        if target == Column::Detail && changed {
            self.reset_accordion(&tail.view, content);
        }
        // A column sliding into view is already moving; only slide content
        // inside a column that was on screen.
        let already_visible = self.visible == Some(target);

        let paint = ColumnPaint {
            column: target,
            position: Position::Single,
            content: render_view(
                &tail,
                &ViewContext {
                    content,
                    position: Position::Single,
                    viewport,
                    detail: None,
                    expanded: self.expanded,
                },
            ),
            slide: self.slide_if(changed && already_visible),
            frame: tail,
        };

        match target {
            Column::Root => self.prev_root = Some(paint.frame.view.kind()),
            Column::Detail => self.prev_detail = Some(paint.frame.view.clone()),
        }
        self.visible = Some(target);

        let hidden = match target {
            Column::Root => Column::Detail,
            Column::Detail => Column::Root,
        };
        RenderPlan {
            viewport,
            columns: vec![paint],
            hidden: Some(hidden),
            breadcrumb: self.breadcrumb(1),
        }
    }

    fn slide_if(&self, changed: bool) -> Option<Slide> {
        self.direction.filter(|_| changed).map(Slide::from)
    }

    /// A newly shown accordion list opens its first group.
    fn reset_accordion(&mut self, view: &View, content: &MenuContent) {
        self.expanded = match view {
            View::CryptoDetail { crypto_id } if !content.crypto_groups(crypto_id).is_empty() => Some(0),
            _ => None,
        };
    }

    /// Frames strictly between the root and the `visible` tail frames.
    fn breadcrumb(&self, visible: usize) -> Vec<Crumb> {
        let end = self.frames.len().saturating_sub(visible);
        if end <= 1 {
            return Vec::new();
        }
        self.frames[1..end]
            .iter()
            .enumerate()
            .map(|(i, frame)| Crumb {
                label: frame.label.clone(),
                target: i + 1,
            })
            .collect()
    }
}
