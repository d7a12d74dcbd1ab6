//! HTML site generation.
//!
//! Loads the data files, buckets the publications, and renders the single
//! homepage. The page is one document with fixed regions:
//!
//! ```text
//! nav.navbar          .hamburger / .nav-menu / .nav-link
//! header#home         lab title and description
//! section#news        ul#newsList
//! section#publications
//!   #foundationModels #postTraining #multiModal #visionEncoders   highlighted cards
//!   #otherPubs                                                    minimal cards
//! ```
//!
//! Regions not listed in `[layout] regions` are left out of the page and
//! their render step is skipped.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! └── assets/            # copied verbatim from <site>/assets
//!     └── images/teasers/...
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors injected from config)
//! - `static/site.js`: theme toggle, mobile menu, scroll highlighting

use crate::card::{CardStyle, render_cards};
use crate::categorize::{Categorized, Category, CategoryTable, categorize};
use crate::config::{self, NEWS_REGION, SiteConfig};
use crate::loader::{DirSource, load_site_data};
use crate::nav::{self, HOME_SECTION, NavState, SectionPos};
use crate::news::render_news;
use crate::theme::Theme;
use crate::types::{Publication, SiteData};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to copy assets: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Directory under the site root copied verbatim into the output.
pub const ASSETS_DIR: &str = "assets";

/// What a build (or check) found, for CLI display.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub news_items: usize,
    pub news_rendered: bool,
    pub featured_slugs: usize,
    pub categories: Vec<CategorySummary>,
    pub theme: Theme,
    /// Data that could not be loaded and was replaced by an empty value.
    pub fallbacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    /// False when the category's region is not part of the layout.
    pub rendered: bool,
    /// `(title, year)` in page order.
    pub publications: Vec<(String, Option<u32>)>,
}

impl SiteSummary {
    pub fn total_publications(&self) -> usize {
        self.categories.iter().map(|c| c.publications.len()).sum()
    }
}

/// Load the site's data files from `<root>/<data_dir>`.
pub fn load_data(root: &Path, config: &SiteConfig) -> SiteData {
    load_site_data(&DirSource::new(root.join(&config.site.data_dir)))
}

pub fn summarize(
    config: &SiteConfig,
    data: &SiteData,
    categorized: &Categorized<'_>,
    theme: Theme,
) -> SiteSummary {
    SiteSummary {
        news_items: data.news.len(),
        news_rendered: config.layout.has_region(NEWS_REGION),
        featured_slugs: data.featured_slugs.len(),
        categories: categorized
            .iter()
            .map(|(category, pubs)| CategorySummary {
                category,
                rendered: config.layout.has_region(category.region_id()),
                publications: pubs.iter().map(|p| (p.title.clone(), p.year)).collect(),
            })
            .collect(),
        theme,
        fallbacks: data.fallbacks.clone(),
    }
}

/// Build the site: load, categorize, render `index.html`, copy assets.
pub fn generate(
    root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    theme: Theme,
) -> Result<SiteSummary, GenerateError> {
    let data = load_data(root, config);
    let table = CategoryTable::from_config(&config.categories);
    let categorized = categorize(&data.publications, &table);

    let page = render_page(config, &data, &categorized, theme, &NavState::default());

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let assets = root.join(ASSETS_DIR);
    if assets.is_dir() {
        copy_dir_recursive(&assets, &output_dir.join(ASSETS_DIR))?;
    }

    Ok(summarize(config, &data, &categorized, theme))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), GenerateError> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target: PathBuf = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// A navbar entry and the section it scrolls to.
struct NavEntry {
    label: &'static str,
    section: &'static str,
}

fn nav_entries(config: &SiteConfig) -> Vec<NavEntry> {
    let mut entries = vec![NavEntry {
        label: "Home",
        section: HOME_SECTION,
    }];
    if config.layout.has_region(NEWS_REGION) {
        entries.push(NavEntry {
            label: "News",
            section: "news",
        });
    }
    if has_publication_regions(config) {
        entries.push(NavEntry {
            label: "Publications",
            section: "publications",
        });
    }
    entries
}

fn has_publication_regions(config: &SiteConfig) -> bool {
    Category::ALL
        .iter()
        .any(|c| config.layout.has_region(c.region_id()))
}

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, theme: Theme, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The sections the page will contain, in document order. Only the header
/// has a known position at build time; the rest sit somewhere below it.
pub fn page_sections(config: &SiteConfig) -> Vec<SectionPos> {
    nav_entries(config)
        .iter()
        .map(|entry| {
            let top = if entry.section == HOME_SECTION { 0.0 } else { f64::INFINITY };
            SectionPos::new(entry.section, top)
        })
        .collect()
}

/// Renders the navbar, with the active link for a reader at the top of the
/// page.
pub fn render_navbar(config: &SiteConfig, state: &NavState) -> Markup {
    let sections = page_sections(config);
    let current = nav::active_section(&sections, 0.0, config.nav.scroll_offset);

    html! {
        nav.navbar {
            div.nav-container {
                a.nav-logo href={ "#" (HOME_SECTION) } { (config.site.title) }
                ul.nav-menu.active[state.menu_open] data-scroll-offset=(config.nav.scroll_offset) {
                    @for entry in nav_entries(config) {
                        @let href = format!("#{}", entry.section);
                        li.nav-item {
                            a.nav-link.active[nav::is_link_active(&href, current)] href=(href) {
                                (entry.label)
                            }
                        }
                    }
                }
                button.theme-toggle type="button" aria-label="Toggle color theme" { "◐" }
                div.hamburger.active[state.menu_open] {
                    span.bar {}
                    span.bar {}
                    span.bar {}
                }
            }
        }
    }
}

fn render_header(config: &SiteConfig) -> Markup {
    html! {
        header.hero id=(HOME_SECTION) {
            h1 { (config.site.title) }
            @if !config.site.description.is_empty() {
                p.tagline { (config.site.description) }
            }
        }
    }
}

fn render_news_section(config: &SiteConfig, data: &SiteData) -> Option<Markup> {
    if !config.layout.has_region(NEWS_REGION) {
        debug!("Region {} not in layout, skipping news", NEWS_REGION);
        return None;
    }
    Some(html! {
        section.section id="news" {
            h2 { "News" }
            ul.news-list id=(NEWS_REGION) {
                (render_news(&data.news))
            }
        }
    })
}

/// Render one category's cards. Highlighted categories look up each
/// publication's featured detail by id.
fn render_category<'a>(
    category: Category,
    publications: &[&'a Publication],
    data: &'a SiteData,
    max_authors: usize,
) -> Markup {
    let cards = if category.is_highlighted() {
        render_cards(
            publications,
            |p| CardStyle::Highlighted(data.featured_details.get(&p.id)),
            max_authors,
        )
    } else {
        render_cards(publications, |_| CardStyle::Minimal, max_authors)
    };

    html! {
        div.pub-category {
            h3.category-title { (category.heading()) }
            div.pub-list id=(category.region_id()) {
                (cards)
            }
        }
    }
}

fn render_publications_section<'a>(
    config: &SiteConfig,
    data: &'a SiteData,
    categorized: &Categorized<'a>,
) -> Option<Markup> {
    if !has_publication_regions(config) {
        return None;
    }

    let mut regions = Vec::new();
    for (category, publications) in categorized.iter() {
        if !config.layout.has_region(category.region_id()) {
            debug!("Region {} not in layout, skipping", category.region_id());
            continue;
        }
        regions.push(render_category(
            category,
            publications,
            data,
            config.cards.max_authors,
        ));
    }

    Some(html! {
        section.section id="publications" {
            h2 { "Publications" }
            @for region in regions {
                (region)
            }
        }
    })
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the complete homepage.
pub fn render_page<'a>(
    config: &SiteConfig,
    data: &'a SiteData,
    categorized: &Categorized<'a>,
    theme: Theme,
    nav_state: &NavState,
) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    let content = html! {
        (render_navbar(config, nav_state))
        (render_header(config))
        main {
            @if let Some(news) = render_news_section(config, data) {
                (news)
            }
            @if let Some(publications) = render_publications_section(config, data, categorized) {
                (publications)
            }
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&config.site.title, &css, theme, content)
}
