//! Navigation bar behavior.
//!
//! The navbar has a hamburger button that opens and closes the menu on small
//! screens, links to in-page sections, and an "active" marker on the link of
//! the section currently in view. The rules live here; the generator uses
//! them to render the initial state and the page script applies the same
//! rules on every click and scroll.
//!
//! At build time only [`active_section`], [`is_link_active`] and
//! [`NavState::menu_class`] shape the output. [`NavState::toggle_menu`],
//! [`NavState::link_clicked`] and [`scroll_target`] describe the click
//! handlers in `static/site.js`; their tests fix the behavior that script
//! has to keep.

/// Default distance (px) above a section's top edge at which it counts as
/// the current section.
pub const DEFAULT_SCROLL_OFFSET: u32 = 100;

/// Section id used for the page header, and for sections without an id.
pub const HOME_SECTION: &str = "home";

/// A page section as the navbar sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPos {
    pub id: Option<String>,
    /// Offset of the section's top edge from the top of the document, in px.
    pub top: f64,
}

impl SectionPos {
    pub fn new(id: &str, top: f64) -> Self {
        Self {
            id: Some(id.to_string()),
            top,
        }
    }

    fn id_or_home(&self) -> &str {
        self.id.as_deref().unwrap_or(HOME_SECTION)
    }
}

/// Mobile menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
}

impl NavState {
    /// Hamburger click.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Any menu link click closes the menu.
    pub fn link_clicked(&mut self) {
        self.menu_open = false;
    }

    /// Class applied to both the hamburger and the menu.
    pub fn menu_class(&self) -> Option<&'static str> {
        self.menu_open.then_some("active")
    }
}

/// Id of the section the reader is in: the last section, in document order,
/// whose top edge minus `offset` has been scrolled past. Empty when no
/// section qualifies.
pub fn active_section(sections: &[SectionPos], scroll_y: f64, offset: u32) -> &str {
    sections
        .iter()
        .rev()
        .find(|s| scroll_y >= s.top - f64::from(offset))
        .map(SectionPos::id_or_home)
        .unwrap_or("")
}

/// Whether a nav link with `href` is the active one for `current`.
pub fn is_link_active(href: &str, current: &str) -> bool {
    !current.is_empty() && href.strip_prefix('#') == Some(current)
}

/// Where an intercepted link click should smooth-scroll to.
///
/// Only in-page anchors (`#id`) are intercepted; other links navigate
/// normally and return `None`. An anchor without a matching section scrolls
/// to the header.
pub fn scroll_target<'a>(href: &str, sections: &'a [SectionPos]) -> Option<&'a SectionPos> {
    let target = href.strip_prefix('#')?;
    sections
        .iter()
        .find(|s| s.id.as_deref() == Some(target))
        .or_else(|| {
            sections
                .iter()
                .find(|s| s.id.as_deref() == Some(HOME_SECTION))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionPos> {
        vec![
            SectionPos::new("home", 0.0),
            SectionPos::new("news", 600.0),
            SectionPos::new("publications", 1400.0),
        ]
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut nav = NavState::default();
        nav.toggle_menu();
        assert!(nav.menu_open);
        assert_eq!(nav.menu_class(), Some("active"));
        nav.toggle_menu();
        assert!(!nav.menu_open);
        assert_eq!(nav.menu_class(), None);
    }

    #[test]
    fn link_click_closes_menu() {
        let mut nav = NavState { menu_open: true };
        nav.link_clicked();
        assert!(!nav.menu_open);
        // Closing an already closed menu is a no-op
        nav.link_clicked();
        assert!(!nav.menu_open);
    }

    #[test]
    fn top_of_page_is_home() {
        assert_eq!(active_section(&page(), 0.0, DEFAULT_SCROLL_OFFSET), "home");
    }

    #[test]
    fn offset_activates_section_early() {
        let sections = page();
        assert_eq!(active_section(&sections, 499.0, 100), "home");
        assert_eq!(active_section(&sections, 500.0, 100), "news");
        assert_eq!(active_section(&sections, 1300.0, 100), "publications");
    }

    #[test]
    fn zero_offset() {
        assert_eq!(active_section(&page(), 599.0, 0), "home");
        assert_eq!(active_section(&page(), 600.0, 0), "news");
    }

    #[test]
    fn section_without_id_counts_as_home() {
        let sections = vec![
            SectionPos { id: None, top: 0.0 },
            SectionPos::new("news", 800.0),
        ];
        assert_eq!(active_section(&sections, 10.0, 100), "home");
    }

    #[test]
    fn nothing_scrolled_past() {
        let sections = vec![SectionPos::new("news", 500.0)];
        assert_eq!(active_section(&sections, 0.0, 100), "");
        assert_eq!(active_section(&[], 0.0, 100), "");
    }

    #[test]
    fn link_active_matching() {
        assert!(is_link_active("#news", "news"));
        assert!(!is_link_active("#news", "publications"));
        assert!(!is_link_active("https://example.org", "news"));
        assert!(!is_link_active("#", ""));
    }

    #[test]
    fn scroll_target_finds_section() {
        let sections = page();
        assert_eq!(
            scroll_target("#publications", &sections).and_then(|s| s.id.as_deref()),
            Some("publications")
        );
    }

    #[test]
    fn scroll_target_unknown_anchor_goes_to_header() {
        let sections = page();
        assert_eq!(
            scroll_target("#missing", &sections).and_then(|s| s.id.as_deref()),
            Some("home")
        );
    }

    #[test]
    fn scroll_target_ignores_external_links() {
        assert!(scroll_target("https://scholar.google.com", &page()).is_none());
    }
}
