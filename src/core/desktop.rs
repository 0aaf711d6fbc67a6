//! # Desktop Panel Controller
//!
//! The wide-viewport mega menu: at most one overlay panel open at a time,
//! plus the selections nested inside it.
//!
//! ```text
//!            hover/click trigger
//!   Closed ───────────────────────▶ Open(panel)
//!     ▲                               │  click same trigger, backdrop,
//!     └───────────────────────────────┘  Escape, search, leave timer
//! ```
//!
//! The products panel has three columns: categories, crypto types (only
//! while the crypto category is selected) and a detail column. Column items
//! and tabs activate through hover intent; see [`crate::core::hover`].
//!
//! State here is authoritative. [`DesktopPanel::view`] derives everything a
//! painter needs, including the ARIA-style expanded/hidden flags.

use log::{debug, info};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::core::content::MenuContent;
use crate::core::hover::{HOVER_INTENT, HoverGroup, HoverIntent, HoverTarget, LEAVE_INTENT};
use crate::core::view::{AccordionView, CardView, EntryAction, link_action};

pub const PRODUCTS_PANEL: &str = "products";
pub const APPLICATIONS_PANEL: &str = "applications";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTiming {
    pub hover_intent: Duration,
    pub leave_intent: Duration,
}

impl Default for HoverTiming {
    fn default() -> Self {
        Self {
            hover_intent: HOVER_INTENT,
            leave_intent: LEAVE_INTENT,
        }
    }
}

/// Keyboard/click activation of something inside the open panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Category(String),
    Crypto(String),
    Tab { panel: String, tab: String },
    Accordion { crypto_id: String, index: usize },
    Link(String),
}

#[derive(Debug, Default)]
pub struct DesktopPanel {
    current_menu: Option<String>,
    current_category: Option<String>,
    current_crypto: Option<String>,
    active_tabs: HashMap<String, String>,
    /// Open accordion per crypto section.
    sections: HashMap<String, Option<usize>>,
    focus: Option<usize>,
    /// Bumped on every category/crypto change; the detail column scrolls to
    /// top when it moves.
    scroll_epoch: u64,
    hover: HoverIntent,
    timing: HoverTiming,
}

impl DesktopPanel {
    pub fn new(timing: HoverTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn current_menu(&self) -> Option<&str> {
        self.current_menu.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.current_menu.is_some()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn current_crypto(&self) -> Option<&str> {
        self.current_crypto.as_deref()
    }

    pub fn active_tab(&self, panel: &str) -> Option<&str> {
        self.active_tabs.get(panel).map(String::as_str)
    }

    pub fn open_accordion(&self, crypto_id: &str) -> Option<usize> {
        self.sections.get(crypto_id).copied().flatten()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.hover.next_deadline()
    }

    // ------------------------------------------------------------------
    // Open / close
    // ------------------------------------------------------------------

    pub fn open(&mut self, panel: &str, content: &MenuContent) {
        info!("Opening desktop panel '{}'", panel);
        self.current_menu = Some(panel.to_string());
        self.focus = None;
        self.hover.cancel(HoverGroup::OverlayLeave);

        if panel == PRODUCTS_PANEL {
            let default = content.products.default_category.clone();
            self.activate_category(&default, content);
        }
        if let Some(first) = content.tabs_for(panel).first() {
            self.active_tabs
                .entry(panel.to_string())
                .or_insert_with(|| first.id.clone());
        }
    }

    pub fn close(&mut self) {
        if self.current_menu.is_some() {
            info!("Closing desktop panel");
        }
        self.current_menu = None;
        self.current_category = None;
        self.current_crypto = None;
        self.active_tabs.clear();
        self.sections.clear();
        self.focus = None;
        self.hover.cancel_all();
    }

    /// Pointer entered a trigger. Hover opens, never closes.
    pub fn trigger_enter(&mut self, panel: &str, content: &MenuContent) {
        self.hover.cancel(HoverGroup::OverlayLeave);
        if self.current_menu() != Some(panel) {
            self.open(panel, content);
        }
    }

    pub fn trigger_click(&mut self, panel: &str, content: &MenuContent) {
        if self.current_menu() == Some(panel) {
            self.close();
        } else {
            self.open(panel, content);
        }
    }

    pub fn panel_leave(&mut self, now: Instant) {
        if self.is_open() {
            self.hover.schedule(
                HoverGroup::OverlayLeave,
                HoverTarget::CloseOverlay,
                self.timing.leave_intent,
                now,
            );
        }
    }

    pub fn panel_enter(&mut self) {
        self.hover.cancel(HoverGroup::OverlayLeave);
    }

    // ------------------------------------------------------------------
    // Hover intent
    // ------------------------------------------------------------------

    /// Pointer entered a hover-capable item. Schedules its activation unless
    /// it is already the active selection.
    pub fn hover_enter(&mut self, target: HoverTarget, now: Instant) {
        if target == HoverTarget::CloseOverlay {
            return;
        }
        let group = target.group();
        self.hover.cancel(group);
        if self.is_active(&target) {
            return;
        }
        self.hover.schedule(group, target, self.timing.hover_intent, now);
    }

    pub fn hover_leave(&mut self, group: HoverGroup) {
        self.hover.cancel(group);
    }

    fn is_active(&self, target: &HoverTarget) -> bool {
        match target {
            HoverTarget::Category(id) => self.current_category() == Some(id),
            HoverTarget::Crypto(id) => self.current_crypto() == Some(id),
            HoverTarget::Tab { panel, tab } => self.active_tab(panel) == Some(tab),
            HoverTarget::CloseOverlay => false,
        }
    }

    /// Fire every due timer. Returns true when anything changed.
    pub fn tick(&mut self, now: Instant, content: &MenuContent) -> bool {
        let due = self.hover.take_due(now);
        let changed = !due.is_empty();
        for (group, target) in due {
            debug!("Hover intent fired for {:?}: {:?}", group, target);
            self.apply(target, content);
        }
        changed
    }

    fn apply(&mut self, target: HoverTarget, content: &MenuContent) {
        match target {
            HoverTarget::Category(id) => self.activate_category(&id, content),
            HoverTarget::Crypto(id) => self.activate_crypto(&id, content),
            HoverTarget::Tab { panel, tab } => self.activate_tab(&panel, &tab),
            HoverTarget::CloseOverlay => self.close(),
        }
    }

    // ------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------

    pub fn activate_category(&mut self, id: &str, content: &MenuContent) {
        if !self.is_open() {
            return;
        }
        self.current_category = Some(id.to_string());
        self.scroll_epoch += 1;
        if id == content.products.crypto_category {
            let default = content.products.default_crypto.clone();
            self.activate_crypto(&default, content);
        }
    }

    /// Select a crypto type: its section shows with only the first
    /// accordion open.
    pub fn activate_crypto(&mut self, id: &str, content: &MenuContent) {
        if !self.is_open() {
            return;
        }
        self.current_crypto = Some(id.to_string());
        let first = (!content.crypto_groups(id).is_empty()).then_some(0);
        self.sections.insert(id.to_string(), first);
        self.scroll_epoch += 1;
    }

    pub fn activate_tab(&mut self, panel: &str, tab: &str) {
        if self.current_menu() != Some(panel) {
            return;
        }
        self.active_tabs.insert(panel.to_string(), tab.to_string());
    }

    /// Toggle one accordion of a crypto section. Siblings in the same
    /// section close; other sections are untouched.
    pub fn toggle_accordion(&mut self, crypto_id: &str, index: usize) {
        let slot = self.sections.entry(crypto_id.to_string()).or_default();
        *slot = if *slot == Some(index) { None } else { Some(index) };
    }

    /// Apply an activation immediately, bypassing hover intent. Returns the
    /// link to follow, if the activation was one.
    pub fn activate(&mut self, activation: Activation, content: &MenuContent) -> Option<String> {
        match activation {
            Activation::Category(id) => self.activate_category(&id, content),
            Activation::Crypto(id) => self.activate_crypto(&id, content),
            Activation::Tab { panel, tab } => self.activate_tab(&panel, &tab),
            Activation::Accordion { crypto_id, index } => self.toggle_accordion(&crypto_id, index),
            Activation::Link(href) => return Some(href),
        }
        None
    }

    // ------------------------------------------------------------------
    // Focus trap
    // ------------------------------------------------------------------

    /// Move focus within the open panel, wrapping at both ends.
    pub fn move_focus(&mut self, forward: bool, count: usize) {
        if !self.is_open() || count == 0 {
            self.focus = None;
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    pub fn view(&self, content: &MenuContent) -> DesktopView {
        let triggers = content
            .nav
            .iter()
            .map(|item| TriggerView {
                id: item.id.clone(),
                label: item.label.clone(),
                expanded: self.current_menu() == Some(item.id.as_str()),
            })
            .collect();

        let panel = self.current_menu().map(|id| self.panel_view(id, content));
        let focusables = panel.as_ref().map(focusables_of).unwrap_or_default();
        let focus = self.focus.filter(|i| *i < focusables.len());

        DesktopView {
            triggers,
            search: content.search.clone(),
            panel,
            scroll_epoch: self.scroll_epoch,
            focusables,
            focus,
        }
    }

    fn panel_view(&self, id: &str, content: &MenuContent) -> PanelView {
        if id == PRODUCTS_PANEL {
            return self.products_view(content);
        }
        if id == APPLICATIONS_PANEL {
            return PanelView::Cards(
                content
                    .applications
                    .iter()
                    .map(|card| CardView {
                        title: card.title.clone(),
                        desc: card.desc.clone(),
                        icon: card.icon.clone(),
                        action: link_action(card.href.as_deref()),
                    })
                    .collect(),
            );
        }

        let tabs = content.tabs_for(id);
        if tabs.is_empty() {
            return PanelView::Empty;
        }
        let active = self.active_tab(id);
        let items = tabs
            .iter()
            .map(|tab| ColumnItem {
                id: tab.id.clone(),
                label: tab.label.clone(),
                icon: tab.icon.clone(),
                href: tab.href.clone(),
                active: active == Some(tab.id.as_str()),
            })
            .collect();
        let selected = tabs.iter().find(|tab| Some(tab.id.as_str()) == active).map(|tab| TabContent {
            title: tab.label.clone(),
            desc: tab.desc.clone(),
            background: tab.background.clone(),
            links: tab
                .href
                .iter()
                .map(|href| (format!("Explore {}", tab.label), link_action(Some(href.as_str()))))
                .chain(
                    tab.links
                        .iter()
                        .map(|link| (link.label.clone(), link_action(Some(link.href.as_str())))),
                )
                .collect(),
        });
        PanelView::Tabbed {
            panel: id.to_string(),
            tabs: items,
            content: selected,
        }
    }

    fn products_view(&self, content: &MenuContent) -> PanelView {
        let products = &content.products;
        let category = self.current_category();

        let categories = products
            .categories
            .iter()
            .map(|c| ColumnItem {
                id: c.id.clone(),
                label: c.label.clone(),
                icon: None,
                href: c.href.clone(),
                active: category == Some(c.id.as_str()),
            })
            .collect();

        let show_crypto = category == Some(products.crypto_category.as_str());
        let crypto = show_crypto.then(|| {
            products
                .crypto
                .iter()
                .map(|c| ColumnItem {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    icon: c.icon.clone(),
                    href: c.href.clone(),
                    active: self.current_crypto() == Some(c.id.as_str()),
                })
                .collect()
        });

        let detail = match (show_crypto, self.current_crypto(), category) {
            (true, Some(crypto_id), _) => {
                let open = self.open_accordion(crypto_id);
                ProductDetail::Accordions {
                    crypto_id: crypto_id.to_string(),
                    groups: content
                        .crypto_groups(crypto_id)
                        .iter()
                        .enumerate()
                        .map(|(i, group)| AccordionView {
                            title: group.title.clone(),
                            expanded: open == Some(i),
                            links: group
                                .links
                                .iter()
                                .map(|l| (l.label.clone(), link_action(Some(l.href.as_str()))))
                                .collect(),
                        })
                        .collect(),
                }
            }
            (_, _, Some(category_id)) if !show_crypto => ProductDetail::Cards(
                content
                    .cards_for(category_id)
                    .iter()
                    .map(|card| CardView {
                        title: card.title.clone(),
                        desc: card.desc.clone(),
                        icon: card.icon.clone(),
                        action: link_action(card.href.as_deref()),
                    })
                    .collect(),
            ),
            _ => ProductDetail::Cards(Vec::new()),
        };

        PanelView::Products {
            categories,
            crypto,
            detail,
        }
    }
}

fn focusables_of(panel: &PanelView) -> Vec<Focusable> {
    let mut out = Vec::new();
    let push_link = |label: &str, action: &EntryAction, out: &mut Vec<Focusable>| {
        if let EntryAction::Link(href) = action {
            out.push(Focusable {
                label: label.to_string(),
                activation: Activation::Link(href.clone()),
            });
        }
    };

    match panel {
        PanelView::Products {
            categories,
            crypto,
            detail,
        } => {
            out.extend(categories.iter().map(|c| Focusable {
                label: c.label.clone(),
                activation: Activation::Category(c.id.clone()),
            }));
            if let Some(crypto) = crypto {
                out.extend(crypto.iter().map(|c| Focusable {
                    label: c.label.clone(),
                    activation: Activation::Crypto(c.id.clone()),
                }));
            }
            match detail {
                ProductDetail::Accordions { crypto_id, groups } => {
                    for (index, group) in groups.iter().enumerate() {
                        out.push(Focusable {
                            label: group.title.clone(),
                            activation: Activation::Accordion {
                                crypto_id: crypto_id.clone(),
                                index,
                            },
                        });
                        if group.expanded {
                            for (label, action) in &group.links {
                                push_link(label, action, &mut out);
                            }
                        }
                    }
                }
                ProductDetail::Cards(cards) => {
                    for card in cards {
                        push_link(&card.title, &card.action, &mut out);
                    }
                }
            }
        }
        PanelView::Cards(cards) => {
            for card in cards {
                push_link(&card.title, &card.action, &mut out);
            }
        }
        PanelView::Tabbed {
            panel,
            tabs,
            content,
        } => {
            out.extend(tabs.iter().map(|t| Focusable {
                label: t.label.clone(),
                activation: Activation::Tab {
                    panel: panel.clone(),
                    tab: t.id.clone(),
                },
            }));
            if let Some(content) = content {
                for (label, action) in &content.links {
                    push_link(label, action, &mut out);
                }
            }
        }
        PanelView::Empty => {}
    }
    out
}

// ============================================================================
// Projection types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopView {
    pub triggers: Vec<TriggerView>,
    pub search: Option<String>,
    /// `None` means the overlay (and its backdrop) is hidden.
    pub panel: Option<PanelView>,
    pub scroll_epoch: u64,
    pub focusables: Vec<Focusable>,
    pub focus: Option<usize>,
}

impl DesktopView {
    pub fn focused(&self) -> Option<&Focusable> {
        self.focus.and_then(|i| self.focusables.get(i))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub id: String,
    pub label: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnItem {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub href: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetail {
    Accordions { crypto_id: String, groups: Vec<AccordionView> },
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabContent {
    pub title: String,
    pub desc: Option<String>,
    pub background: Option<String>,
    pub links: Vec<(String, EntryAction)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Products {
        categories: Vec<ColumnItem>,
        /// `None` while column 2 is hidden.
        crypto: Option<Vec<ColumnItem>>,
        detail: ProductDetail,
    },
    Cards(Vec<CardView>),
    Tabbed {
        panel: String,
        tabs: Vec<ColumnItem>,
        content: Option<TabContent>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable {
    pub label: String,
    pub activation: Activation,
}
