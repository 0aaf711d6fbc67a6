//! # DrillDown Component
//!
//! Tablet and mobile navigation: a breadcrumb row above one column (mobile)
//! or a master/detail pair (tablet), painted from a core `RenderPlan`.
//!
//! ## Motion
//!
//! Columns whose paint carries a `Slide` are offset horizontally by the
//! remaining fraction of the animation: `FromRight` starts shifted right,
//! `FromLeft` starts clipped on the right. While closing, every column
//! slides out to the right and no hit regions are recorded.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_scrollview::ScrollViewState;
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::frame::Slide;
use crate::core::navigator::{Column, ColumnPaint, RenderPlan};
use crate::core::view::{CardLayout, EntryAction, ViewContent};
use crate::tui::component::Component;
use crate::tui::ui::{HitRegion, HitTarget, Row, render_rows, truncate};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Still,
    /// Slide-in progress, 0.0 to 1.0.
    SlideIn(f32),
    /// Close progress, 0.0 to 1.0.
    Closing(f32),
}

pub struct DrillDown<'a> {
    pub plan: &'a RenderPlan,
    root_scroll: &'a mut ScrollViewState,
    detail_scroll: &'a mut ScrollViewState,
    motion: Motion,
    hits: Vec<HitRegion>,
    /// Resting slot of each painted column, ignoring motion.
    slots: Vec<(Column, Rect)>,
}

impl<'a> DrillDown<'a> {
    pub fn new(
        plan: &'a RenderPlan,
        root_scroll: &'a mut ScrollViewState,
        detail_scroll: &'a mut ScrollViewState,
    ) -> Self {
        Self {
            plan,
            root_scroll,
            detail_scroll,
            motion: Motion::Still,
            hits: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn sliding(mut self, progress: f32) -> Self {
        self.motion = if progress >= 1.0 {
            Motion::Still
        } else {
            Motion::SlideIn(progress.max(0.0))
        };
        self
    }

    pub fn closing(mut self, progress: f32) -> Self {
        self.motion = Motion::Closing(progress.clamp(0.0, 1.0));
        self
    }

    /// Where each column was laid out by the last `render`.
    pub fn column_slots(&mut self) -> Vec<(Column, Rect)> {
        std::mem::take(&mut self.slots)
    }

    fn column_area(&self, paint: &ColumnPaint, area: Rect) -> Rect {
        let shift = |fraction: f32| (area.width as f32 * fraction).round() as u16;
        match (self.motion, paint.slide) {
            (Motion::Closing(p), _) | (Motion::SlideIn(p), Some(Slide::FromRight)) => {
                let off = if matches!(self.motion, Motion::Closing(_)) {
                    shift(p)
                } else {
                    shift(1.0 - p)
                };
                Rect {
                    x: area.x + off.min(area.width),
                    width: area.width.saturating_sub(off),
                    ..area
                }
            }
            (Motion::SlideIn(p), Some(Slide::FromLeft)) => Rect {
                width: area.width.saturating_sub(shift(1.0 - p)),
                ..area
            },
            _ => area,
        }
    }

    fn render_breadcrumb(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span<'static>> = vec![Span::styled("‹ ", Style::default().fg(Color::DarkGray))];
        let mut x = area.x + 2;
        let end = area.x + area.width;
        for (i, crumb) in self.plan.breadcrumb.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
                x += 3;
            }
            let label = truncate(&crumb.label, end.saturating_sub(x) as usize);
            let width = label.width() as u16;
            if width == 0 {
                break;
            }
            self.hits.push(HitRegion {
                area: Rect::new(x, area.y, width, 1),
                target: HitTarget::Click(Action::NavigateTo(crumb.target)),
            });
            spans.push(Span::styled(
                label,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ));
            x += width;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_column(&mut self, frame: &mut Frame, paint: &ColumnPaint, area: Rect) {
        self.slots.push((paint.column, area));
        let area = self.column_area(paint, area);
        if area.is_empty() {
            return;
        }
        frame.render_widget(Clear, area);

        let mut block = Block::default();
        if self.plan.columns.len() > 1 && paint.column == Column::Detail {
            block = block
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(Color::DarkGray));
        }
        if !paint.frame.label.is_empty() {
            block = block.title(Span::styled(
                format!(" {} ", paint.frame.label),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = column_rows(paint, inner.width.saturating_sub(1));
        let mut hits = Vec::new();
        let scroll = match paint.column {
            Column::Root => &mut *self.root_scroll,
            Column::Detail => &mut *self.detail_scroll,
        };
        render_rows(frame, inner, rows, scroll, &mut hits);
        if !matches!(self.motion, Motion::Closing(_)) {
            self.hits.extend(hits);
        }
    }
}

fn entry_target(action: &EntryAction, paint: &ColumnPaint) -> Option<HitTarget> {
    match action {
        EntryAction::Push(frame) => Some(HitTarget::Click(Action::Push {
            frame: frame.clone(),
            position: paint.position,
        })),
        EntryAction::Link(url) => Some(HitTarget::Click(Action::FollowLink(url.clone()))),
        EntryAction::Inert => None,
    }
}

fn styled_entry(text: String, style: Style, target: Option<HitTarget>) -> Row {
    match target {
        Some(target) => Row::interactive(Span::styled(text, style), target),
        None => Row::plain(Span::styled(text, style.fg(Color::DarkGray))),
    }
}

fn column_rows(paint: &ColumnPaint, width: u16) -> Vec<Row> {
    let width = width as usize;
    let mut rows = Vec::new();
    match &paint.content {
        ViewContent::List(entries) => {
            for entry in entries {
                let style = if entry.active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let chevron = if entry.has_children { " ›" } else { "" };
                let label = truncate(&entry.label, width.saturating_sub(chevron.width()));
                rows.push(styled_entry(
                    format!("{label}{chevron}"),
                    style,
                    entry_target(&entry.action, paint),
                ));
            }
        }
        ViewContent::Accordions(groups) => {
            for (index, group) in groups.iter().enumerate() {
                let marker = if group.expanded { "−" } else { "+" };
                rows.push(Row::interactive(
                    Span::styled(
                        truncate(&format!("{marker} {}", group.title), width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    HitTarget::Click(Action::DrillAccordionToggle(index)),
                ));
                if group.expanded {
                    for (label, action) in &group.links {
                        rows.push(styled_entry(
                            truncate(&format!("   {label}"), width),
                            Style::default().fg(Color::Blue),
                            entry_target(action, paint),
                        ));
                    }
                }
            }
        }
        ViewContent::Cards { layout, cards } => {
            for card in cards {
                let title = match (layout, &card.icon) {
                    (CardLayout::Single, Some(_)) => format!("◆ {}", card.title),
                    _ => card.title.clone(),
                };
                rows.push(styled_entry(
                    truncate(&title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                    entry_target(&card.action, paint),
                ));
                if let Some(desc) = &card.desc {
                    rows.push(Row::plain(Span::styled(
                        truncate(&format!("  {desc}"), width),
                        Style::default().fg(Color::Gray),
                    )));
                }
                if *layout == CardLayout::Single {
                    rows.push(Row::plain(""));
                }
            }
        }
    }
    if rows.is_empty() {
        rows.push(Row::plain(Span::styled(
            "Nothing here yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    rows
}

impl Component for DrillDown<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        self.slots.clear();

        let body = if self.plan.breadcrumb.is_empty() {
            area
        } else {
            let [crumbs, body] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            self.render_breadcrumb(frame, crumbs);
            body
        };

        let plan = self.plan;
        match plan.columns.as_slice() {
            [root, detail] => {
                let [left, right] =
                    Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                        .areas(body);
                self.render_column(frame, root, left);
                self.render_column(frame, detail, right);
            }
            [single] => self.render_column(frame, single, body),
            _ => {}
        }
        if matches!(self.motion, Motion::Closing(_)) {
            self.hits.clear();
        }
    }

    fn hit_regions(&mut self) -> Vec<HitRegion> {
        std::mem::take(&mut self.hits)
    }
}
