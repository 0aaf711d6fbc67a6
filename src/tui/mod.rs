//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Pointer Model
//!
//! Every frame records the `HitRegion`s it painted. Pointer moves are
//! hit-tested against them; a change of target becomes leave/enter actions
//! (hover intent lives in core), and crossing the overlay border becomes
//! `PanelEnter`/`PanelLeave`. Terminal cells are scaled to pixels with
//! `px_per_column` so the breakpoints keep their usual values.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (slide in/out): draws every ~16ms.
//! - **Idle**: sleeps until the next event, the next hover deadline, or
//!   500ms, whichever comes first.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{LinkMode, ResolvedConfig};
use crate::core::content::MenuContent;
use crate::core::navigator::{Column, RenderPlan};
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{HitRegion, HitTarget, hit_test};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// A drill-down close slide that ends in a redirect.
pub struct Closing {
    pub plan: RenderPlan,
    pub started: Instant,
    pub url: String,
}

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    // Hit testing, rebuilt every frame
    pub hits: Vec<HitRegion>,
    pub body_area: Rect,
    pub panel_area: Option<Rect>,
    /// Drill-down column slots from the last frame.
    pub column_slots: Vec<(Column, Rect)>,
    // Pointer tracking
    pub hovered: Option<HitTarget>,
    pub pointer_in_panel: bool,
    // Scroll state
    pub panel_scroll: ScrollViewState,
    pub scroll_epoch: u64,
    /// Focus index the panel scroll last followed.
    pub panel_focus: Option<usize>,
    pub root_scroll: ScrollViewState,
    pub detail_scroll: ScrollViewState,
    // Animation
    pub slide_duration: Duration,
    pub slide_started: Option<Instant>,
    pub closing: Option<Closing>,
    /// Last plan seen from core, to notice changes.
    pub last_plan: Option<RenderPlan>,
    pub px_per_column: u32,
}

impl TuiState {
    pub fn new(slide_duration: Duration) -> Self {
        Self {
            hits: Vec::new(),
            body_area: Rect::default(),
            panel_area: None,
            column_slots: Vec::new(),
            hovered: None,
            pointer_in_panel: false,
            panel_scroll: ScrollViewState::default(),
            scroll_epoch: 0,
            panel_focus: None,
            root_scroll: ScrollViewState::default(),
            detail_scroll: ScrollViewState::default(),
            slide_duration,
            slide_started: None,
            closing: None,
            last_plan: None,
            px_per_column: crate::core::config::DEFAULT_PX_PER_COLUMN,
        }
    }

    pub fn slide_progress(&self, started: Instant, now: Instant) -> f32 {
        if self.slide_duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        (elapsed / self.slide_duration.as_secs_f32()).min(1.0)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.closing.is_some()
            || self
                .slide_started
                .is_some_and(|started| self.slide_progress(started, now) < 1.0)
    }

    /// Note a new plan from core: restart the slide clock when it animates
    /// and scroll columns whose frame changed back to the top.
    pub fn sync_plan(&mut self, plan: Option<&RenderPlan>, now: Instant) {
        if plan == self.last_plan.as_ref() {
            return;
        }
        if let Some(plan) = plan {
            for paint in &plan.columns {
                let before = self
                    .last_plan
                    .as_ref()
                    .and_then(|p| p.column(paint.column))
                    .map(|p| &p.frame);
                if before != Some(&paint.frame) {
                    match paint.column {
                        Column::Root => self.root_scroll.scroll_to_top(),
                        Column::Detail => self.detail_scroll.scroll_to_top(),
                    }
                }
            }
            self.slide_started = plan.is_animated().then_some(now);
        } else {
            self.slide_started = None;
        }
        self.last_plan = plan.cloned();
    }
}

/// Carries out redirects according to the link mode.
struct Redirector {
    mode: LinkMode,
    printed: Vec<String>,
}

impl Redirector {
    fn follow(&mut self, url: String, app: &mut App) {
        match self.mode {
            LinkMode::Open => {
                info!("Opening {} in browser", url);
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {}: {}", url, e);
                    app.status_message = format!("Could not open {url}");
                }
            }
            LinkMode::Print => {
                info!("Queued {} for printing", url);
                self.printed.push(url);
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture, Show);
    }
}

/// Translate one terminal event into core actions, updating pointer
/// tracking along the way.
fn translate(event: &TuiEvent, app: &App, tui: &mut TuiState, now: Instant) -> Vec<Action> {
    match *event {
        TuiEvent::Quit | TuiEvent::ForceQuit => vec![Action::Quit],
        TuiEvent::Escape => vec![Action::Escape],
        TuiEvent::ToggleMenu => vec![Action::ToggleDrillDown],
        TuiEvent::FocusNext => vec![Action::FocusNext],
        TuiEvent::FocusPrev => vec![Action::FocusPrev],
        TuiEvent::Submit => vec![Action::FocusActivate],
        TuiEvent::Back => vec![Action::Back],
        TuiEvent::Resize(width, _) => vec![Action::Resize(width as u32 * tui.px_per_column)],
        TuiEvent::MouseMove(col, row) => pointer_moved(tui, col, row, now),
        TuiEvent::MouseClick(col, row) => {
            let target = hit_test(&tui.hits, col, row).map(|h| h.target.clone());
            match target {
                Some(HitTarget::Trigger(id)) => vec![Action::TriggerClick(id)],
                Some(HitTarget::Search) => vec![Action::SearchClick],
                Some(HitTarget::Hamburger) => vec![Action::ToggleDrillDown],
                Some(HitTarget::Item { click, .. }) => vec![Action::Activate(click)],
                Some(HitTarget::Click(action)) => vec![action],
                None => {
                    let point = Position { x: col, y: row };
                    let in_panel = tui.panel_area.is_some_and(|a| a.contains(point));
                    if app.desktop.is_open() && tui.body_area.contains(point) && !in_panel {
                        vec![Action::BackdropClick]
                    } else {
                        Vec::new()
                    }
                }
            }
        }
        TuiEvent::ScrollUp(col, row) | TuiEvent::ScrollDown(col, row) => {
            let down = matches!(event, TuiEvent::ScrollDown(..));
            if let Some(scroll) = scroll_state_at(app, tui, col, row) {
                if down {
                    scroll.scroll_down();
                } else {
                    scroll.scroll_up();
                }
            }
            Vec::new()
        }
    }
}

fn pointer_moved(tui: &mut TuiState, col: u16, row: u16, now: Instant) -> Vec<Action> {
    let mut actions = Vec::new();

    let inside = tui
        .panel_area
        .is_some_and(|a| a.contains(Position { x: col, y: row }));
    if inside != tui.pointer_in_panel {
        actions.push(if inside {
            Action::PanelEnter
        } else {
            Action::PanelLeave(now)
        });
        tui.pointer_in_panel = inside;
    }

    let hit = hit_test(&tui.hits, col, row).map(|h| h.target.clone());
    if hit != tui.hovered {
        if let Some(HitTarget::Item { hover, .. }) = &tui.hovered {
            actions.push(Action::HoverLeave(hover.group()));
        }
        match &hit {
            Some(HitTarget::Trigger(id)) => actions.push(Action::TriggerEnter(id.clone())),
            Some(HitTarget::Item { hover, .. }) => actions.push(Action::HoverEnter {
                target: hover.clone(),
                now,
            }),
            _ => {}
        }
        tui.hovered = hit;
    }
    actions
}

fn scroll_state_at<'a>(
    app: &App,
    tui: &'a mut TuiState,
    col: u16,
    row: u16,
) -> Option<&'a mut ScrollViewState> {
    let point = Position { x: col, y: row };
    if tui.panel_area.is_some_and(|a| a.contains(point)) {
        return Some(&mut tui.panel_scroll);
    }
    if app.plan.is_none() {
        return None;
    }
    let column = tui
        .column_slots
        .iter()
        .find(|(_, area)| area.contains(point))
        .map(|(column, _)| *column)?;
    Some(match column {
        Column::Root => &mut tui.root_scroll,
        Column::Detail => &mut tui.detail_scroll,
    })
}

/// Apply one action and carry out its effect. Returns true on quit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    redirector: &mut Redirector,
    action: Action,
    now: Instant,
) -> bool {
    let effect = update(app, action);
    let quit = match effect {
        Effect::Quit => true,
        Effect::Redirect { url, after_close } => {
            match tui.last_plan.clone() {
                Some(plan) if after_close && !tui.slide_duration.is_zero() => {
                    tui.closing = Some(Closing {
                        plan,
                        started: now,
                        url,
                    });
                }
                _ => redirector.follow(url, app),
            }
            false
        }
        Effect::None => false,
    };
    tui.sync_plan(app.plan.as_ref(), now);
    quit
}

/// Run the menu until quit. Returns the links collected in print mode.
pub fn run(config: ResolvedConfig, content: MenuContent) -> std::io::Result<Vec<String>> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let size = terminal.size()?;
    let width_px = size.width as u32 * config.px_per_column;
    let mut app = App::new(content, &config, width_px);
    let mut tui = TuiState::new(config.slide);
    tui.px_per_column = config.px_per_column;
    let mut redirector = Redirector {
        mode: config.link_mode,
        printed: Vec::new(),
    };
    info!(
        "Starting in {} mode at {}px ({} columns)",
        app.viewport().label(),
        width_px,
        size.width
    );

    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        let animating = tui.is_animating(now);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            needs_redraw = false;
        }

        // Sleep until the next event, hover deadline, or animation frame
        let mut timeout = if animating { FRAME_INTERVAL } else { IDLE_POLL };
        if let Some(deadline) = app.desktop.next_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(Instant::now()));
        }
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let now = Instant::now();
            // Input is ignored while the menu slides away, except quitting
            if tui.closing.is_some() && !matches!(event, TuiEvent::Quit | TuiEvent::ForceQuit) {
                continue;
            }
            for action in translate(&event, &app, &mut tui, now) {
                if dispatch(&mut app, &mut tui, &mut redirector, action, now) {
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }

        // Fire due hover timers
        let now = Instant::now();
        if app.desktop.next_deadline().is_some_and(|d| d <= now) {
            dispatch(&mut app, &mut tui, &mut redirector, Action::Tick(now), now);
            needs_redraw = true;
        }

        // Finish a close slide with its redirect
        let finished = tui
            .closing
            .as_ref()
            .is_some_and(|c| tui.slide_progress(c.started, now) >= 1.0);
        if finished && let Some(closing) = tui.closing.take() {
            redirector.follow(closing.url, &mut app);
            needs_redraw = true;
        }
    }

    ratatui::restore();
    Ok(redirector.printed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::desktop::Activation;
    use crate::core::hover::{HoverGroup, HoverTarget};
    use crate::core::responsive::ViewportClass;
    use crate::test_support::test_app;

    fn item(id: &str) -> HitTarget {
        HitTarget::Item {
            hover: HoverTarget::Category(id.into()),
            click: Activation::Category(id.into()),
        }
    }

    fn tui_with_regions() -> TuiState {
        let mut tui = TuiState::new(Duration::from_millis(100));
        tui.body_area = Rect::new(0, 1, 100, 30);
        tui.panel_area = Some(Rect::new(0, 1, 100, 10));
        tui.hits = vec![
            HitRegion {
                area: Rect::new(0, 0, 10, 1),
                target: HitTarget::Trigger("products".into()),
            },
            HitRegion {
                area: Rect::new(1, 2, 20, 1),
                target: item("software"),
            },
            HitRegion {
                area: Rect::new(1, 3, 20, 1),
                target: item("hardware"),
            },
        ];
        tui
    }

    #[test]
    fn test_pointer_moves_become_enter_and_leave() {
        let app = test_app(ViewportClass::Desktop);
        let mut tui = tui_with_regions();
        let now = Instant::now();

        let actions = translate(&TuiEvent::MouseMove(2, 0), &app, &mut tui, now);
        assert_eq!(actions, vec![Action::TriggerEnter("products".into())]);

        let actions = translate(&TuiEvent::MouseMove(2, 2), &app, &mut tui, now);
        assert_eq!(
            actions,
            vec![
                Action::PanelEnter,
                Action::HoverEnter {
                    target: HoverTarget::Category("software".into()),
                    now
                }
            ]
        );

        // Same target: nothing new.
        assert!(translate(&TuiEvent::MouseMove(5, 2), &app, &mut tui, now).is_empty());

        let actions = translate(&TuiEvent::MouseMove(2, 3), &app, &mut tui, now);
        assert_eq!(
            actions,
            vec![
                Action::HoverLeave(HoverGroup::Column1),
                Action::HoverEnter {
                    target: HoverTarget::Category("hardware".into()),
                    now
                }
            ]
        );

        let actions = translate(&TuiEvent::MouseMove(2, 20), &app, &mut tui, now);
        assert_eq!(
            actions,
            vec![Action::PanelLeave(now), Action::HoverLeave(HoverGroup::Column1)]
        );
    }

    #[test]
    fn test_click_outside_panel_is_backdrop() {
        let mut app = test_app(ViewportClass::Desktop);
        update(&mut app, Action::TriggerClick("products".into()));
        let mut tui = tui_with_regions();
        let now = Instant::now();

        assert_eq!(
            translate(&TuiEvent::MouseClick(50, 20), &app, &mut tui, now),
            vec![Action::BackdropClick]
        );
        assert!(translate(&TuiEvent::MouseClick(50, 5), &app, &mut tui, now).is_empty());
        assert_eq!(
            translate(&TuiEvent::MouseClick(3, 3), &app, &mut tui, now),
            vec![Action::Activate(Activation::Category("hardware".into()))]
        );
    }

    #[test]
    fn test_wheel_scrolls_the_column_under_the_pointer() {
        let mut app = test_app(ViewportClass::Tablet);
        update(&mut app, Action::ToggleDrillDown);
        let mut tui = TuiState::new(Duration::ZERO);
        tui.body_area = Rect::new(0, 1, 60000, 20);
        tui.column_slots = vec![
            (Column::Root, Rect::new(0, 1, 24000, 20)),
            (Column::Detail, Rect::new(24000, 1, 36000, 20)),
        ];
        let now = Instant::now();

        translate(&TuiEvent::ScrollDown(40000, 5), &app, &mut tui, now);
        assert_eq!(tui.detail_scroll.offset().y, 1);
        assert_eq!(tui.root_scroll.offset().y, 0);

        translate(&TuiEvent::ScrollDown(23999, 5), &app, &mut tui, now);
        assert_eq!(tui.root_scroll.offset().y, 1);

        // Outside every slot nothing scrolls.
        translate(&TuiEvent::ScrollDown(100, 0), &app, &mut tui, now);
        assert_eq!(tui.root_scroll.offset().y, 1);
        assert_eq!(tui.detail_scroll.offset().y, 1);
    }

    #[test]
    fn test_resize_scales_columns_to_pixels() {
        let app = test_app(ViewportClass::Desktop);
        let mut tui = TuiState::new(Duration::ZERO);
        tui.px_per_column = 8;
        assert_eq!(
            translate(&TuiEvent::Resize(100, 40), &app, &mut tui, Instant::now()),
            vec![Action::Resize(800)]
        );
    }

    #[test]
    fn test_sync_plan_starts_slide_only_on_animated_change() {
        let mut app = test_app(ViewportClass::Mobile);
        let mut tui = TuiState::new(Duration::from_millis(100));
        let t0 = Instant::now();
        let mut redirector = Redirector {
            mode: LinkMode::Print,
            printed: Vec::new(),
        };

        dispatch(&mut app, &mut tui, &mut redirector, Action::ToggleDrillDown, t0);
        assert!(tui.last_plan.is_some());
        assert!(tui.slide_started.is_none());

        // Root to products: the detail column was hidden, so no slide.
        let products = crate::core::frame::NavFrame::new(crate::core::frame::View::Products, "Products");
        dispatch(
            &mut app,
            &mut tui,
            &mut redirector,
            Action::Push {
                frame: products,
                position: crate::core::frame::Position::Single,
            },
            t0,
        );
        assert!(tui.slide_started.is_none());

        dispatch(&mut app, &mut tui, &mut redirector, Action::Back, t0);
        assert!(tui.slide_started.is_none());
        assert!(!tui.is_animating(t0));
    }

    #[test]
    fn test_drill_link_plays_close_slide_before_redirect() {
        let mut app = test_app(ViewportClass::Mobile);
        let mut tui = TuiState::new(Duration::from_millis(100));
        let t0 = Instant::now();
        let mut redirector = Redirector {
            mode: LinkMode::Print,
            printed: Vec::new(),
        };

        dispatch(&mut app, &mut tui, &mut redirector, Action::ToggleDrillDown, t0);
        dispatch(
            &mut app,
            &mut tui,
            &mut redirector,
            Action::FollowLink("https://example.com/".into()),
            t0,
        );
        assert!(redirector.printed.is_empty());
        let closing = tui.closing.as_ref().expect("close slide running");
        assert_eq!(closing.url, "https://example.com/");
        assert!(tui.is_animating(t0));
        assert!(tui.last_plan.is_none());
    }

    #[test]
    fn test_desktop_link_redirects_at_once() {
        let mut app = test_app(ViewportClass::Desktop);
        let mut tui = TuiState::new(Duration::from_millis(100));
        let mut redirector = Redirector {
            mode: LinkMode::Print,
            printed: Vec::new(),
        };
        dispatch(
            &mut app,
            &mut tui,
            &mut redirector,
            Action::FollowLink("https://example.com/x".into()),
            Instant::now(),
        );
        assert_eq!(redirector.printed, vec!["https://example.com/x".to_string()]);
        assert!(tui.closing.is_none());
    }
}
