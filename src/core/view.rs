//! # View Renderers
//!
//! Turns one `NavFrame` into `ViewContent`: the data a column paints. Each
//! renderer is a pure function of the frame, the content model and a little
//! context about where the frame is shown. Entries carry the action a click
//! produces, so painting code never decides navigation.
//!
//! Adding a view means adding a `View` variant and one arm to
//! [`render_view`]; the compiler points at every other match to update.

use crate::core::content::{Card, MenuContent, Tab, is_navigable};
use crate::core::frame::{NavFrame, Position, View};
use crate::core::responsive::ViewportClass;

/// What clicking an entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Drill into a new frame.
    Push(NavFrame),
    /// Leave the menu for a real link.
    Link(String),
    /// Nothing: placeholder links and unknown ids.
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub icon: Option<String>,
    pub active: bool,
    pub has_children: bool,
    pub action: EntryAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionView {
    pub title: String,
    pub expanded: bool,
    pub links: Vec<(String, EntryAction)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub desc: Option<String>,
    pub icon: Option<String>,
    pub action: EntryAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Multi-column grid (applications, product cards).
    Grid,
    /// One card per row with icon, title and description.
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContent {
    List(Vec<ListEntry>),
    Accordions(Vec<AccordionView>),
    Cards { layout: CardLayout, cards: Vec<CardView> },
}

impl ViewContent {
    pub fn is_empty(&self) -> bool {
        match self {
            ViewContent::List(entries) => entries.is_empty(),
            ViewContent::Accordions(groups) => groups.is_empty(),
            ViewContent::Cards { cards, .. } => cards.is_empty(),
        }
    }
}

/// Where and alongside what a frame is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub content: &'a MenuContent,
    pub position: Position,
    pub viewport: ViewportClass,
    /// The frame shown in the detail column, when rendering the master column.
    pub detail: Option<&'a View>,
    /// Open group of the drill-down accordion list.
    pub expanded: Option<usize>,
}

pub fn render_view(frame: &NavFrame, ctx: &ViewContext<'_>) -> ViewContent {
    match &frame.view {
        View::MainNav => render_main_nav(ctx),
        View::Products => render_products(ctx),
        View::CryptoTypes => render_crypto_types(ctx),
        View::CryptoDetail { crypto_id } => render_crypto_detail(crypto_id, ctx),
        View::ProductCards { category_id } => ViewContent::Cards {
            layout: CardLayout::Grid,
            cards: ctx.content.cards_for(category_id).iter().map(card_view).collect(),
        },
        View::Applications => ViewContent::Cards {
            layout: CardLayout::Grid,
            cards: ctx.content.applications.iter().map(card_view).collect(),
        },
        View::Insights => render_tab_cards(ctx.content.tabs_for("insights")),
        View::Newsroom => render_tab_cards(ctx.content.tabs_for("newsroom")),
        View::Company => render_tab_cards(ctx.content.tabs_for("company")),
    }
}

pub(crate) fn link_action(href: Option<&str>) -> EntryAction {
    match href {
        Some(h) if is_navigable(Some(h)) => EntryAction::Link(h.to_string()),
        _ => EntryAction::Inert,
    }
}

fn render_main_nav(ctx: &ViewContext<'_>) -> ViewContent {
    // Tablet highlights whatever the detail column shows; otherwise the
    // first entry is highlighted.
    let active_id = match (ctx.viewport, ctx.detail) {
        (ViewportClass::Tablet, Some(detail)) => detail.nav_id(),
        _ => ctx.content.nav.first().map(|item| item.id.as_str()),
    };

    let entries = ctx
        .content
        .nav
        .iter()
        .map(|item| {
            let action = View::from_nav_id(&item.id)
                .map(|view| EntryAction::Push(NavFrame::new(view, item.label.clone())))
                .unwrap_or(EntryAction::Inert);
            ListEntry {
                label: item.label.clone(),
                icon: None,
                active: active_id == Some(item.id.as_str()),
                has_children: matches!(action, EntryAction::Push(_)),
                action,
            }
        })
        .collect();
    ViewContent::List(entries)
}

fn render_products(ctx: &ViewContext<'_>) -> ViewContent {
    let products = &ctx.content.products;
    let active_id: Option<&str> = match (ctx.position, ctx.detail) {
        (Position::Left, Some(View::CryptoTypes | View::CryptoDetail { .. })) => {
            Some(products.crypto_category.as_str())
        }
        (Position::Left, Some(View::ProductCards { category_id })) => Some(category_id.as_str()),
        _ => None,
    };

    let entries = products
        .categories
        .iter()
        .map(|category| {
            let action = match &category.href {
                Some(href) => link_action(Some(href.as_str())),
                None if category.id == products.crypto_category => {
                    EntryAction::Push(NavFrame::new(View::CryptoTypes, category.label.clone()))
                }
                None => EntryAction::Push(NavFrame::new(
                    View::ProductCards {
                        category_id: category.id.clone(),
                    },
                    category.label.clone(),
                )),
            };
            ListEntry {
                label: category.label.clone(),
                icon: None,
                active: active_id == Some(category.id.as_str()),
                has_children: category.href.is_none(),
                action,
            }
        })
        .collect();
    ViewContent::List(entries)
}

fn render_crypto_types(ctx: &ViewContext<'_>) -> ViewContent {
    let active_id = match (ctx.position, ctx.detail) {
        (Position::Left, Some(View::CryptoDetail { crypto_id })) => Some(crypto_id.as_str()),
        _ => None,
    };

    let entries = ctx
        .content
        .products
        .crypto
        .iter()
        .map(|crypto| ListEntry {
            label: crypto.label.clone(),
            icon: crypto.icon.clone(),
            active: active_id == Some(crypto.id.as_str()),
            has_children: true,
            action: EntryAction::Push(NavFrame::new(
                View::CryptoDetail {
                    crypto_id: crypto.id.clone(),
                },
                crypto.label.trim(),
            )),
        })
        .collect();
    ViewContent::List(entries)
}

fn render_crypto_detail(crypto_id: &str, ctx: &ViewContext<'_>) -> ViewContent {
    let groups = ctx
        .content
        .crypto_groups(crypto_id)
        .iter()
        .enumerate()
        .map(|(i, group)| AccordionView {
            title: group.title.clone(),
            expanded: ctx.expanded == Some(i),
            links: group
                .links
                .iter()
                .map(|link| (link.label.clone(), link_action(Some(link.href.as_str()))))
                .collect(),
        })
        .collect();
    ViewContent::Accordions(groups)
}

fn card_view(card: &Card) -> CardView {
    CardView {
        title: card.title.clone(),
        desc: card.desc.clone(),
        icon: card.icon.clone(),
        action: link_action(card.href.as_deref()),
    }
}

fn render_tab_cards(tabs: &[Tab]) -> ViewContent {
    let cards = tabs
        .iter()
        .map(|tab| CardView {
            title: tab.label.clone(),
            desc: tab.desc.clone(),
            icon: tab.icon.clone(),
            action: link_action(tab.href.as_deref()),
        })
        .collect();
    ViewContent::Cards {
        layout: CardLayout::Single,
        cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_content;

    fn ctx<'a>(content: &'a MenuContent, position: Position, detail: Option<&'a View>) -> ViewContext<'a> {
        ViewContext {
            content,
            position,
            viewport: ViewportClass::Tablet,
            detail,
            expanded: None,
        }
    }

    fn list(content: ViewContent) -> Vec<ListEntry> {
        match content {
            ViewContent::List(entries) => entries,
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn test_main_nav_pushes_views() {
        let content = test_content();
        let entries = list(render_view(&NavFrame::root(), &ctx(&content, Position::Single, None)));
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[0].action,
            EntryAction::Push(NavFrame::new(View::Products, "Products"))
        );
        assert!(entries[0].active);
    }

    #[test]
    fn test_main_nav_highlights_detail_on_tablet() {
        let content = test_content();
        let detail = View::Newsroom;
        let entries = list(render_view(
            &NavFrame::root(),
            &ctx(&content, Position::Left, Some(&detail)),
        ));
        let active: Vec<&str> = entries.iter().filter(|e| e.active).map(|e| e.label.as_str()).collect();
        assert_eq!(active, vec!["Newsroom"]);
    }

    #[test]
    fn test_products_routes_categories() {
        let content = test_content();
        let entries = list(render_view(
            &NavFrame::new(View::Products, "Products"),
            &ctx(&content, Position::Single, None),
        ));
        assert_eq!(
            entries[0].action,
            EntryAction::Link("https://fortifyiq.com/products-overview/".to_string())
        );
        assert!(!entries[0].has_children);
        assert_eq!(
            entries[1].action,
            EntryAction::Push(NavFrame::new(View::CryptoTypes, "Cryptographic Hardware IP Cores"))
        );
        assert_eq!(
            entries[2].action,
            EntryAction::Push(NavFrame::new(
                View::ProductCards {
                    category_id: "software".to_string()
                },
                "Cryptographic Software Libraries"
            ))
        );
    }

    #[test]
    fn test_products_highlights_hardware_for_crypto_detail() {
        let content = test_content();
        let detail = View::CryptoDetail {
            crypto_id: "aes".to_string(),
        };
        let entries = list(render_view(
            &NavFrame::new(View::Products, "Products"),
            &ctx(&content, Position::Left, Some(&detail)),
        ));
        let active: Vec<&str> = entries.iter().filter(|e| e.active).map(|e| e.label.as_str()).collect();
        assert_eq!(active, vec!["Cryptographic Hardware IP Cores"]);
    }

    #[test]
    fn test_crypto_types_highlight_only_in_master_column() {
        let content = test_content();
        let detail = View::CryptoDetail {
            crypto_id: "hmac".to_string(),
        };
        let frame = NavFrame::new(View::CryptoTypes, "Cryptographic Hardware IP Cores");

        let left = list(render_view(&frame, &ctx(&content, Position::Left, Some(&detail))));
        assert!(left.iter().any(|e| e.active && e.label == "HMAC SHA2"));

        let single = list(render_view(&frame, &ctx(&content, Position::Single, Some(&detail))));
        assert!(single.iter().all(|e| !e.active));
    }

    #[test]
    fn test_crypto_detail_marks_expanded_group() {
        let content = test_content();
        let frame = NavFrame::new(
            View::CryptoDetail {
                crypto_id: "aes".to_string(),
            },
            "AES",
        );
        let mut context = ctx(&content, Position::Right, None);
        context.expanded = Some(1);
        match render_view(&frame, &context) {
            ViewContent::Accordions(groups) => {
                assert_eq!(groups.len(), 3);
                let expanded: Vec<bool> = groups.iter().map(|g| g.expanded).collect();
                assert_eq!(expanded, vec![false, true, false]);
            }
            other => panic!("expected accordions, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_ids_render_empty_containers() {
        let content = test_content();
        let cards = NavFrame::new(
            View::ProductCards {
                category_id: "missing".to_string(),
            },
            "Missing",
        );
        let detail = NavFrame::new(
            View::CryptoDetail {
                crypto_id: "missing".to_string(),
            },
            "Missing",
        );
        let context = ctx(&content, Position::Right, None);
        assert!(render_view(&cards, &context).is_empty());
        assert!(render_view(&detail, &context).is_empty());
    }

    #[test]
    fn test_placeholder_links_are_inert() {
        let content = test_content();
        let frame = NavFrame::new(View::Applications, "Applications");
        match render_view(&frame, &ctx(&content, Position::Right, None)) {
            ViewContent::Cards { layout, cards } => {
                assert_eq!(layout, CardLayout::Grid);
                let edge = cards.iter().find(|c| c.title == "Edge Devices").unwrap();
                assert_eq!(edge.action, EntryAction::Inert);
            }
            other => panic!("expected cards, got {other:?}"),
        }
    }

    #[test]
    fn test_tab_panels_render_single_cards() {
        let content = test_content();
        let frame = NavFrame::new(View::Company, "Company");
        match render_view(&frame, &ctx(&content, Position::Right, None)) {
            ViewContent::Cards { layout, cards } => {
                assert_eq!(layout, CardLayout::Single);
                assert_eq!(cards.len(), 4);
                assert_eq!(cards[0].title, "About Us");
            }
            other => panic!("expected cards, got {other:?}"),
        }
    }
}
