//! # NavBar Component
//!
//! Top row of the screen: the menu triggers on desktop, the hamburger
//! everywhere else, plus a viewport tag and the status message.
//!
//! ## Conditional Layout
//!
//! 1. **Desktop**: `Products ▾  Applications ▾ … ⌕ Search      desktop | status`
//! 2. **Tablet / mobile**: `☰ Menu      tablet | status` (`✕ Close` while open)
//!
//! The bar is stateless: it gets the derived `DesktopView` as a prop and
//! records where each trigger landed so the event loop can hit-test it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::desktop::DesktopView;
use crate::core::responsive::ViewportClass;
use crate::tui::component::Component;
use crate::tui::ui::{HitRegion, HitTarget, truncate};

const GAP: u16 = 2;

pub struct NavBar<'a> {
    pub view: &'a DesktopView,
    pub viewport: ViewportClass,
    pub drill_open: bool,
    pub status_message: String,
    hits: Vec<HitRegion>,
}

impl<'a> NavBar<'a> {
    pub fn new(
        view: &'a DesktopView,
        viewport: ViewportClass,
        drill_open: bool,
        status_message: String,
    ) -> Self {
        Self {
            view,
            viewport,
            drill_open,
            status_message,
            hits: Vec::new(),
        }
    }

    fn push_item(
        &mut self,
        spans: &mut Vec<Span<'static>>,
        x: &mut u16,
        area: Rect,
        text: String,
        style: Style,
        target: HitTarget,
    ) {
        let width = text.width() as u16;
        if *x + width > area.x + area.width {
            return;
        }
        self.hits.push(HitRegion {
            area: Rect::new(*x, area.y, width, 1),
            target,
        });
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" ".repeat(GAP as usize)));
        *x += width + GAP;
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];
        let mut x = area.x + 1;

        let view = self.view;
        if self.viewport == ViewportClass::Desktop {
            for trigger in &view.triggers {
                let (text, style) = if trigger.expanded {
                    (
                        format!("{} ▴", trigger.label),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    )
                } else {
                    (format!("{} ▾", trigger.label), Style::default())
                };
                self.push_item(&mut spans, &mut x, area, text, style, HitTarget::Trigger(trigger.id.clone()));
            }
            if let Some(search) = &view.search {
                self.push_item(
                    &mut spans,
                    &mut x,
                    area,
                    format!("⌕ {search}"),
                    Style::default().fg(Color::DarkGray),
                    HitTarget::Search,
                );
            }
        } else {
            let text = if self.drill_open { "✕ Close" } else { "☰ Menu" };
            self.push_item(
                &mut spans,
                &mut x,
                area,
                text.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
                HitTarget::Hamburger,
            );
        }

        // Right side: viewport tag and status, truncated to what is left.
        let remaining = (area.x + area.width).saturating_sub(x) as usize;
        let right = if self.status_message.is_empty() {
            self.viewport.label().to_string()
        } else {
            format!("{} | {}", self.viewport.label(), self.status_message)
        };
        let right = truncate(&right, remaining.saturating_sub(1));
        let pad = remaining.saturating_sub(right.width() + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn hit_regions(&mut self) -> Vec<HitRegion> {
        std::mem::take(&mut self.hits)
    }
}
