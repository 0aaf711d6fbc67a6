//! # Navigation Frames
//!
//! One `NavFrame` is one screen of the drill-down hierarchy. The set of views
//! is closed: each variant of `View` has exactly one renderer in
//! [`crate::core::view`], and the match there is exhaustive.

/// What a frame shows. Variants that need data carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    MainNav,
    Products,
    Applications,
    Insights,
    Newsroom,
    Company,
    CryptoTypes,
    CryptoDetail { crypto_id: String },
    ProductCards { category_id: String },
}

/// The data-free discriminant of a `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    MainNav,
    Products,
    Applications,
    Insights,
    Newsroom,
    Company,
    CryptoTypes,
    CryptoDetail,
    ProductCards,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::MainNav => ViewKind::MainNav,
            View::Products => ViewKind::Products,
            View::Applications => ViewKind::Applications,
            View::Insights => ViewKind::Insights,
            View::Newsroom => ViewKind::Newsroom,
            View::Company => ViewKind::Company,
            View::CryptoTypes => ViewKind::CryptoTypes,
            View::CryptoDetail { .. } => ViewKind::CryptoDetail,
            View::ProductCards { .. } => ViewKind::ProductCards,
        }
    }

    /// Map a top-level nav id to the view it opens.
    pub fn from_nav_id(id: &str) -> Option<View> {
        match id {
            "products" => Some(View::Products),
            "applications" => Some(View::Applications),
            "insights" => Some(View::Insights),
            "newsroom" => Some(View::Newsroom),
            "company" => Some(View::Company),
            _ => None,
        }
    }

    /// The nav id a view belongs to, used to highlight the main nav entry.
    pub fn nav_id(&self) -> Option<&'static str> {
        match self {
            View::Products | View::CryptoTypes | View::CryptoDetail { .. } | View::ProductCards { .. } => {
                Some("products")
            }
            View::Applications => Some("applications"),
            View::Insights => Some("insights"),
            View::Newsroom => Some("newsroom"),
            View::Company => Some("company"),
            View::MainNav => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavFrame {
    pub view: View,
    pub label: String,
}

impl NavFrame {
    pub fn new(view: View, label: impl Into<String>) -> Self {
        Self {
            view,
            label: label.into(),
        }
    }

    pub fn root() -> Self {
        Self::new(View::MainNav, "")
    }

    /// The frame tablet mode keeps in the detail column when nothing else is
    /// selected.
    pub fn tablet_default() -> Self {
        Self::new(View::Products, "Products")
    }
}

/// Which column a click came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Tablet master column.
    Left,
    /// Tablet detail column.
    Right,
    /// Mobile single column.
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// Entry direction of a column's slide transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    FromRight,
    FromLeft,
}

impl From<Direction> for Slide {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Slide::FromRight,
            Direction::Back => Slide::FromLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ignores_data() {
        let aes = View::CryptoDetail {
            crypto_id: "aes".to_string(),
        };
        let pqc = View::CryptoDetail {
            crypto_id: "pqc".to_string(),
        };
        assert_ne!(aes, pqc);
        assert_eq!(aes.kind(), pqc.kind());
    }

    #[test]
    fn test_from_nav_id() {
        assert_eq!(View::from_nav_id("newsroom"), Some(View::Newsroom));
        assert_eq!(View::from_nav_id("blog"), None);
    }

    #[test]
    fn test_crypto_views_belong_to_products() {
        let detail = View::CryptoDetail {
            crypto_id: "aes".to_string(),
        };
        assert_eq!(detail.nav_id(), Some("products"));
        assert_eq!(View::MainNav.nav_id(), None);
    }

    #[test]
    fn test_slide_from_direction() {
        assert_eq!(Slide::from(Direction::Forward), Slide::FromRight);
        assert_eq!(Slide::from(Direction::Back), Slide::FromLeft);
    }
}
