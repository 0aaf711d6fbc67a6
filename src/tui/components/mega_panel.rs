//! # MegaPanel Component
//!
//! The desktop overlay: products (three columns), a card grid, or a tabbed
//! panel, depending on which trigger is open.
//!
//! ## Architecture
//!
//! `MegaPanel` is a transient component (created each frame) that wraps the
//! derived `DesktopView` (props) and `&'a mut ScrollViewState` for the detail
//! column. The parent resets that scroll state whenever the view's scroll
//! epoch moves, so a new selection always starts at the top.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding};
use tui_scrollview::ScrollViewState;

use crate::core::action::Action;
use crate::core::content::MenuContent;
use crate::core::desktop::{
    Activation, ColumnItem, DesktopView, PanelView, ProductDetail, TabContent,
};
use crate::core::hover::HoverTarget;
use crate::core::view::{AccordionView, CardView, EntryAction};
use crate::tui::component::Component;
use crate::tui::ui::{HitRegion, HitTarget, Row, render_rows, scroll_to_focus, truncate};

const LIST_COLUMN_WIDTH: u16 = 34;

pub struct MegaPanel<'a> {
    pub view: &'a DesktopView,
    pub panel: &'a PanelView,
    pub content: &'a MenuContent,
    scroll: &'a mut ScrollViewState,
    /// Scroll the focused entry into view on this frame.
    follow_focus: bool,
    hits: Vec<HitRegion>,
}

impl<'a> MegaPanel<'a> {
    pub fn new(
        view: &'a DesktopView,
        panel: &'a PanelView,
        content: &'a MenuContent,
        scroll: &'a mut ScrollViewState,
    ) -> Self {
        Self {
            view,
            panel,
            content,
            scroll,
            follow_focus: false,
            hits: Vec::new(),
        }
    }

    pub fn follow_focus(mut self, follow: bool) -> Self {
        self.follow_focus = follow;
        self
    }

    /// Paint rows into the scrollable detail area.
    fn render_detail(&mut self, frame: &mut Frame, area: Rect, rows: Vec<Row>) {
        if self.follow_focus {
            scroll_to_focus(&rows, self.scroll, area.height);
        }
        render_rows(frame, area, rows, self.scroll, &mut self.hits);
    }

    fn is_focused(&self, activation: &Activation) -> bool {
        self.view
            .focused()
            .is_some_and(|f| &f.activation == activation)
    }

    fn item_style(&self, active: bool, activation: &Activation) -> Style {
        let mut style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        if self.is_focused(activation) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    /// Rows for a hover-capable column (categories, crypto types, tabs).
    fn column_rows(
        &self,
        items: &[ColumnItem],
        width: u16,
        hover: impl Fn(&ColumnItem) -> HoverTarget,
        click: impl Fn(&ColumnItem) -> Activation,
    ) -> Vec<Row> {
        items
            .iter()
            .map(|item| {
                let activation = click(item);
                let marker = if item.active { "▸ " } else { "  " };
                let label = truncate(&item.label, width.saturating_sub(3) as usize);
                let focused = self.is_focused(&activation);
                Row::interactive(
                    Span::styled(format!("{marker}{label}"), self.item_style(item.active, &activation)),
                    HitTarget::Item {
                        hover: hover(item),
                        click: activation,
                    },
                )
                .focused(focused)
            })
            .collect()
    }

    fn link_row(&self, label: &str, action: &EntryAction, indent: &str, width: u16) -> Row {
        let text = truncate(&format!("{indent}{label}"), width as usize);
        match action {
            EntryAction::Link(href) => {
                let activation = Activation::Link(href.clone());
                let focused = self.is_focused(&activation);
                Row::interactive(
                    Span::styled(text, self.item_style(false, &activation).fg(Color::Blue)),
                    HitTarget::Click(Action::Activate(activation)),
                )
                .focused(focused)
            }
            _ => Row::plain(Span::styled(text, Style::default().fg(Color::DarkGray))),
        }
    }

    fn accordion_rows(&self, crypto_id: &str, groups: &[AccordionView], width: u16) -> Vec<Row> {
        let mut rows = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            let activation = Activation::Accordion {
                crypto_id: crypto_id.to_string(),
                index,
            };
            let marker = if group.expanded { "▾" } else { "▸" };
            let focused = self.is_focused(&activation);
            rows.push(
                Row::interactive(
                    Span::styled(
                        truncate(&format!("{marker} {}", group.title), width as usize),
                        self.item_style(group.expanded, &activation),
                    ),
                    HitTarget::Click(Action::Activate(activation)),
                )
                .focused(focused),
            );
            if group.expanded {
                for (label, action) in &group.links {
                    rows.push(self.link_row(label, action, "    ", width));
                }
            }
        }
        rows
    }

    fn card_rows(&self, cards: &[CardView], width: u16) -> Vec<Row> {
        let mut rows = Vec::new();
        for card in cards {
            let icon = card.icon.as_deref().map(|_| "◆ ").unwrap_or("");
            rows.push(self.link_row(&format!("{icon}{}", card.title), &card.action, "", width));
            if let Some(desc) = &card.desc {
                rows.push(Row::plain(Span::styled(
                    truncate(&format!("  {desc}"), width as usize),
                    Style::default().fg(Color::Gray),
                )));
            }
            rows.push(Row::plain(""));
        }
        rows
    }

    fn tab_rows(&self, tab: &TabContent, width: u16) -> Vec<Row> {
        let mut rows = vec![Row::plain(Span::styled(
            truncate(&tab.title, width as usize),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(desc) = &tab.desc {
            rows.push(Row::plain(truncate(desc, width as usize)));
        }
        if let Some(background) = &tab.background {
            rows.push(Row::plain(Span::styled(
                truncate(&format!("[{background}]"), width as usize),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
        rows.push(Row::plain(""));
        for (label, action) in &tab.links {
            rows.push(self.link_row(label, action, "→ ", width));
        }
        rows
    }

    fn render_products(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        categories: &[ColumnItem],
        crypto: Option<&[ColumnItem]>,
        detail: &ProductDetail,
    ) {
        let crypto_width = if crypto.is_some() { LIST_COLUMN_WIDTH } else { 0 };
        let [col1, col2, col3] = Layout::horizontal([
            Constraint::Length(LIST_COLUMN_WIDTH),
            Constraint::Length(crypto_width),
            Constraint::Min(0),
        ])
        .areas(area);

        let rows = self.column_rows(
            categories,
            col1.width,
            |c| HoverTarget::Category(c.id.clone()),
            |c| Activation::Category(c.id.clone()),
        );
        render_column(frame, col1, rows, &mut self.hits);

        if let Some(crypto) = crypto {
            let rows = self.column_rows(
                crypto,
                col2.width,
                |c| HoverTarget::Crypto(c.id.clone()),
                |c| Activation::Crypto(c.id.clone()),
            );
            render_column(frame, col2, rows, &mut self.hits);
        }

        let width = col3.width.saturating_sub(1);
        let rows = match detail {
            ProductDetail::Accordions { crypto_id, groups } => {
                self.accordion_rows(crypto_id, groups, width)
            }
            ProductDetail::Cards(cards) => self.card_rows(cards, width),
        };
        self.render_detail(frame, col3, rows);
    }
}

/// A list column with a separator on its right edge. It only scrolls as far
/// as the focused entry needs.
fn render_column(frame: &mut Frame, area: Rect, rows: Vec<Row>, hits: &mut Vec<HitRegion>) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let mut scroll = ScrollViewState::default();
    scroll_to_focus(&rows, &mut scroll, inner.height);
    render_rows(frame, inner, rows, &mut scroll, hits);
}

impl Component for MegaPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        frame.render_widget(Clear, area);

        let title = self
            .view
            .triggers
            .iter()
            .find(|t| t.expanded)
            .and_then(|t| self.content.nav_label(&t.id))
            .unwrap_or_default();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(format!(" {title} ")))
            .title_bottom(Line::from(" Tab Focus  Enter Select  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let panel = self.panel;
        match panel {
            PanelView::Products {
                categories,
                crypto,
                detail,
            } => self.render_products(frame, inner, categories, crypto.as_deref(), detail),
            PanelView::Cards(cards) => {
                let rows = self.card_rows(cards, inner.width.saturating_sub(1));
                self.render_detail(frame, inner, rows);
            }
            PanelView::Tabbed {
                panel: panel_id,
                tabs,
                content,
            } => {
                let [sidebar, body] = Layout::horizontal([
                    Constraint::Length(LIST_COLUMN_WIDTH),
                    Constraint::Min(0),
                ])
                .areas(inner);
                let rows = self.column_rows(
                    tabs,
                    sidebar.width,
                    |t| HoverTarget::Tab {
                        panel: panel_id.clone(),
                        tab: t.id.clone(),
                    },
                    |t| Activation::Tab {
                        panel: panel_id.clone(),
                        tab: t.id.clone(),
                    },
                );
                render_column(frame, sidebar, rows, &mut self.hits);
                if let Some(tab) = content {
                    let body = body.inner(ratatui::layout::Margin::new(1, 0));
                    let rows = self.tab_rows(tab, body.width.saturating_sub(1));
                    self.render_detail(frame, body, rows);
                }
            }
            PanelView::Empty => {
                frame.render_widget(
                    Span::styled("Nothing here yet.", Style::default().fg(Color::DarkGray)),
                    inner,
                );
            }
        }
    }

    fn hit_regions(&mut self) -> Vec<HitRegion> {
        std::mem::take(&mut self.hits)
    }
}
