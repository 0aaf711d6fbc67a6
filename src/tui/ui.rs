use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::action::Action;
use crate::core::desktop::Activation;
use crate::core::hover::HoverTarget;
use crate::core::responsive::ViewportClass;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DrillDown, MegaPanel, NavBar};

/// Tallest the desktop overlay gets; the rest of the body is backdrop.
const PANEL_MAX_HEIGHT: u16 = 18;

// ============================================================================
// Hit Testing
// ============================================================================

/// What a painted element does under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// Top-level nav trigger: hover opens, click toggles.
    Trigger(String),
    Search,
    Hamburger,
    /// Column item or tab: hover schedules intent, click activates at once.
    Item { hover: HoverTarget, click: Activation },
    /// Click-only element.
    Click(Action),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

/// Topmost region under `(col, row)`. Later regions paint over earlier ones.
pub fn hit_test(regions: &[HitRegion], col: u16, row: u16) -> Option<&HitRegion> {
    regions
        .iter()
        .rev()
        .find(|r| r.area.contains(Position { x: col, y: row }))
}

// ============================================================================
// Rows
// ============================================================================

/// One painted line, optionally interactive.
pub struct Row {
    pub line: Line<'static>,
    pub target: Option<HitTarget>,
    /// Holds keyboard focus.
    pub focused: bool,
}

impl Row {
    pub fn plain(line: impl Into<Line<'static>>) -> Self {
        Self {
            line: line.into(),
            target: None,
            focused: false,
        }
    }

    pub fn interactive(line: impl Into<Line<'static>>, target: HitTarget) -> Self {
        Self {
            line: line.into(),
            target: Some(target),
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Scroll so the focused row in `rows` sits inside a viewport `height` rows tall.
pub fn scroll_to_focus(rows: &[Row], scroll: &mut ScrollViewState, height: u16) {
    let Some(index) = rows.iter().position(|r| r.focused) else {
        return;
    };
    let y = u16::try_from(index).unwrap_or(u16::MAX);
    let offset = scroll.offset();
    if y < offset.y {
        scroll.set_offset(Position { x: offset.x, y });
    } else if height > 0 && y - offset.y >= height {
        scroll.set_offset(Position {
            x: offset.x,
            y: y + 1 - height,
        });
    }
}

/// Paint `rows` into a vertically scrollable area and record the regions of
/// the interactive rows that ended up on screen.
pub fn render_rows(
    frame: &mut Frame,
    area: Rect,
    rows: Vec<Row>,
    scroll: &mut ScrollViewState,
    hits: &mut Vec<HitRegion>,
) {
    if area.is_empty() {
        return;
    }
    let content_width = area.width.saturating_sub(1);
    let total_height = rows.len() as u16;

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    let mut targets = Vec::new();
    for (y, row) in rows.into_iter().enumerate() {
        let y = y as u16;
        scroll_view.render_widget(Paragraph::new(row.line), Rect::new(0, y, content_width, 1));
        if let Some(target) = row.target {
            targets.push((y, target));
        }
    }

    frame.render_stateful_widget(scroll_view, area, scroll);

    let offset = scroll.offset().y;
    for (y, target) in targets {
        if y < offset || y - offset >= area.height {
            continue;
        }
        hits.push(HitRegion {
            area: Rect::new(area.x, area.y + (y - offset), content_width, 1),
            target,
        });
    }
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ============================================================================
// Frame
// ============================================================================

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [bar_area, body_area] = layout.areas(frame.area());

    tui.hits.clear();
    tui.column_slots.clear();
    tui.panel_area = None;
    tui.body_area = body_area;

    let view = app.desktop_view();

    let mut bar = NavBar::new(
        &view,
        app.viewport(),
        app.drill_open,
        app.status_message.clone(),
    );
    bar.render(frame, bar_area);
    tui.hits.extend(bar.hit_regions());

    if let Some(closing) = &tui.closing {
        let progress = tui.slide_progress(closing.started, now);
        let mut drill = DrillDown::new(
            &closing.plan,
            &mut tui.root_scroll,
            &mut tui.detail_scroll,
        )
        .closing(progress);
        drill.render(frame, body_area);
        // No hit regions while the menu slides away.
        return;
    }

    if app.viewport() == ViewportClass::Desktop {
        if let Some(panel) = &view.panel {
            if tui.scroll_epoch != view.scroll_epoch {
                tui.panel_scroll.scroll_to_top();
                tui.scroll_epoch = view.scroll_epoch;
            }
            let follow_focus = tui.panel_focus != view.focus;
            tui.panel_focus = view.focus;
            draw_backdrop(frame, body_area);
            let panel_area = overlay_rect(body_area);
            let mut mega = MegaPanel::new(&view, panel, &app.content, &mut tui.panel_scroll)
                .follow_focus(follow_focus);
            mega.render(frame, panel_area);
            tui.hits.extend(mega.hit_regions());
            tui.panel_area = Some(panel_area);
            return;
        }
    } else if let Some(plan) = &app.plan {
        let progress = match tui.slide_started {
            Some(started) => tui.slide_progress(started, now),
            None => 1.0,
        };
        let mut drill = DrillDown::new(plan, &mut tui.root_scroll, &mut tui.detail_scroll)
            .sliding(progress);
        drill.render(frame, body_area);
        tui.hits.extend(drill.hit_regions());
        tui.column_slots = drill.column_slots();
        return;
    }

    draw_idle(frame, body_area, app.viewport());
}

/// Area the desktop overlay panel occupies within the body.
pub fn overlay_rect(body: Rect) -> Rect {
    Rect {
        height: body.height.min(PANEL_MAX_HEIGHT),
        ..body
    }
}

fn draw_backdrop(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM)),
        area,
    );
}

fn draw_idle(frame: &mut Frame, area: Rect, viewport: ViewportClass) {
    let hint = match viewport {
        ViewportClass::Desktop => "Hover or click a menu item above. q quits.",
        _ => "Press m or click ☰ to open the menu. q quits.",
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )]))
    .block(Block::default().padding(ratatui::widgets::Padding::uniform(1)));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::core::navigator::Column;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_hit_test_prefers_last_region() {
        let regions = vec![
            HitRegion {
                area: Rect::new(0, 0, 10, 5),
                target: HitTarget::Search,
            },
            HitRegion {
                area: Rect::new(2, 2, 2, 1),
                target: HitTarget::Hamburger,
            },
        ];
        assert_eq!(hit_test(&regions, 2, 2).map(|r| &r.target), Some(&HitTarget::Hamburger));
        assert_eq!(hit_test(&regions, 0, 0).map(|r| &r.target), Some(&HitTarget::Search));
        assert!(hit_test(&regions, 20, 0).is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Products", 20), "Products");
        assert_eq!(truncate("Cryptographic Hardware", 8), "Cryptog…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_draw_idle_desktop() {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = test_app(ViewportClass::Desktop);
        let mut tui = TuiState::new(Default::default());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, Instant::now()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Products"));
        assert!(text.contains("Hover or click"));
        assert!(tui.panel_area.is_none());
        assert!(
            tui.hits
                .iter()
                .any(|h| h.target == HitTarget::Trigger("products".into()))
        );
    }

    #[test]
    fn test_draw_products_panel_registers_items() {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app(ViewportClass::Desktop);
        update(&mut app, Action::TriggerClick("products".into()));
        let mut tui = TuiState::new(Default::default());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, Instant::now()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Product Overview"));
        assert!(text.contains("Cryptographic Hardware"));
        assert!(tui.panel_area.is_some());
        assert!(tui.hits.iter().any(|h| matches!(
            &h.target,
            HitTarget::Item { hover: HoverTarget::Category(id), .. } if id == "hardware"
        )));
    }

    #[test]
    fn test_draw_mobile_drill_down() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app(ViewportClass::Mobile);
        update(&mut app, Action::ToggleDrillDown);
        let mut tui = TuiState::new(Default::default());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, Instant::now()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Products"));
        assert!(text.contains("Company"));
        assert!(
            tui.hits
                .iter()
                .any(|h| matches!(&h.target, HitTarget::Click(Action::Push { .. })))
        );
    }

    #[test]
    fn test_draw_tablet_records_column_slots() {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app(ViewportClass::Tablet);
        update(&mut app, Action::ToggleDrillDown);
        let mut tui = TuiState::new(Default::default());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, Instant::now()))
            .unwrap();

        let columns: Vec<Column> = tui.column_slots.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![Column::Root, Column::Detail]);
        let (_, left) = tui.column_slots[0];
        let (_, right) = tui.column_slots[1];
        assert_eq!(left.x + left.width, right.x);
        assert_eq!(right.x + right.width, tui.body_area.x + tui.body_area.width);
    }
}
