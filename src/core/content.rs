//! # Menu Content Model
//!
//! The static data every menu view is a projection of: top-level nav items,
//! product categories, crypto types with their accordion groups, info cards,
//! application cards and tabbed panels.
//!
//! ```text
//! MenuContent
//! ├── nav: Vec<NavItem>                       // top-level triggers
//! ├── search: Option<String>                  // optional search trigger
//! ├── products: ProductsContent
//! │   ├── categories: Vec<Category>           // column 1
//! │   ├── crypto: Vec<CryptoType>             // column 2
//! │   ├── crypto_details: id → [AccordionGroup]
//! │   └── cards: category id → [Card]
//! ├── applications: Vec<Card>
//! └── tabs: panel id → [Tab]
//! ```
//!
//! Content is supplied externally (TOML or JSON). When nothing is configured
//! the sample in `assets/content.toml` is used. Lookups never fail: an
//! unknown id resolves to an empty slice and the view renders empty.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

const BUILTIN_CONTENT: &str = include_str!("../../assets/content.toml");

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MenuContent {
    #[serde(default)]
    pub nav: Vec<NavItem>,
    /// Label of the search trigger. Absent means no search trigger is shown.
    pub search: Option<String>,
    #[serde(default)]
    pub products: ProductsContent,
    #[serde(default)]
    pub applications: Vec<Card>,
    #[serde(default)]
    pub tabs: BTreeMap<String, Vec<Tab>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductsContent {
    #[serde(default = "default_category")]
    pub default_category: String,
    /// The category whose detail is the crypto-type column.
    #[serde(default = "crypto_category")]
    pub crypto_category: String,
    #[serde(default = "default_crypto")]
    pub default_crypto: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub crypto: Vec<CryptoType>,
    #[serde(default)]
    pub crypto_details: BTreeMap<String, Vec<AccordionGroup>>,
    #[serde(default)]
    pub cards: BTreeMap<String, Vec<Card>>,
}

fn default_category() -> String {
    "overview".to_string()
}

fn crypto_category() -> String {
    "hardware".to_string()
}

fn default_crypto() -> String {
    "pqc".to_string()
}

impl Default for ProductsContent {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            crypto_category: crypto_category(),
            default_crypto: default_crypto(),
            categories: Vec::new(),
            crypto: Vec::new(),
            crypto_details: BTreeMap::new(),
            cards: BTreeMap::new(),
        }
    }
}

/// A column-1 product category. Categories with an `href` are plain links;
/// the rest drill down.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CryptoType {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccordionGroup {
    pub title: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Card {
    pub title: String,
    pub desc: Option<String>,
    pub icon: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub desc: Option<String>,
    pub icon: Option<String>,
    pub href: Option<String>,
    /// Background key swapped in while this tab is active.
    pub background: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Whether activating `href` should leave the menu. `#` placeholders are inert.
pub fn is_navigable(href: Option<&str>) -> bool {
    matches!(href, Some(h) if !h.is_empty() && h != "#")
}

impl MenuContent {
    /// The sample content compiled into the binary.
    pub fn builtin() -> Self {
        // The asset is checked by `test_builtin_content_parses`.
        toml::from_str(BUILTIN_CONTENT).unwrap_or_default()
    }

    pub fn nav_label(&self, id: &str) -> Option<&str> {
        self.nav
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.label.as_str())
    }

    pub fn crypto_groups(&self, crypto_id: &str) -> &[AccordionGroup] {
        self.products
            .crypto_details
            .get(crypto_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn cards_for(&self, category_id: &str) -> &[Card] {
        self.products
            .cards
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn tabs_for(&self, panel_id: &str) -> &[Tab] {
        self.tabs
            .get(panel_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ContentError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    UnsupportedFormat(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "content I/O error: {e}"),
            ContentError::Toml(e) => write!(f, "content TOML error: {e}"),
            ContentError::Json(e) => write!(f, "content JSON error: {e}"),
            ContentError::UnsupportedFormat(ext) => {
                write!(f, "unsupported content format '{ext}' (expected .toml or .json)")
            }
        }
    }
}

impl std::error::Error for ContentError {}

// ============================================================================
// Loading
// ============================================================================

/// Load content from `path`, or the builtin sample when `path` is `None`.
///
/// The format is picked from the file extension.
pub fn load(path: Option<&Path>) -> Result<MenuContent, ContentError> {
    let Some(path) = path else {
        debug!("No content file configured, using builtin content");
        return Ok(MenuContent::builtin());
    };

    let contents = fs::read_to_string(path).map_err(ContentError::Io)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let content = parse(&contents, &ext)?;
    info!(
        "Loaded content from {} ({} nav items, {} categories)",
        path.display(),
        content.nav.len(),
        content.products.categories.len()
    );
    Ok(content)
}

fn parse(contents: &str, ext: &str) -> Result<MenuContent, ContentError> {
    match ext {
        "toml" => toml::from_str(contents).map_err(ContentError::Toml),
        "json" => serde_json::from_str(contents).map_err(ContentError::Json),
        other => Err(ContentError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_parses() {
        let parsed: Result<MenuContent, _> = toml::from_str(BUILTIN_CONTENT);
        let content = parsed.unwrap();
        assert_eq!(content.nav.len(), 5);
        assert_eq!(content.nav_label("products"), Some("Products"));
        assert_eq!(content.products.default_category, "overview");
        assert_eq!(content.products.crypto_category, "hardware");
        assert_eq!(content.products.default_crypto, "pqc");
        assert_eq!(content.crypto_groups("aes").len(), 3);
        assert_eq!(content.tabs_for("newsroom").len(), 4);
        assert_eq!(content.applications.len(), 15);
        assert_eq!(content.applications[1].title, "Industrial Automation");
        assert_eq!(content.search.as_deref(), Some("Search"));
    }

    #[test]
    fn test_unknown_ids_resolve_empty() {
        let content = MenuContent::builtin();
        assert!(content.crypto_groups("rot13").is_empty());
        assert!(content.cards_for("nope").is_empty());
        assert!(content.tabs_for("careers").is_empty());
    }

    #[test]
    fn test_sparse_json_uses_product_defaults() {
        let json = r#"{ "nav": [{ "id": "products", "label": "Products" }] }"#;
        let content = parse(json, "json").unwrap();
        assert_eq!(content.nav.len(), 1);
        assert!(content.search.is_none());
        assert_eq!(content.products.default_crypto, "pqc");
        assert!(content.applications.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse("", "yaml").unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedFormat(ref e) if e == "yaml"));
        assert!(err.to_string().contains(".toml or .json"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ContentError::Io(_)));
    }

    #[test]
    fn test_is_navigable() {
        assert!(is_navigable(Some("https://example.com/")));
        assert!(!is_navigable(Some("#")));
        assert!(!is_navigable(Some("")));
        assert!(!is_navigable(None));
    }
}
