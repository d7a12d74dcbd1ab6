//! Publication cards.
//!
//! Each publication becomes one `<article class="pub-card">`. Two layouts
//! exist:
//!
//! - **Highlighted**: for the four curated categories. Adds the teaser
//!   image, the highlight blurb, and the extra links from
//!   `featured_details.json`; the title links to the publication's primary
//!   URL.
//! - **Minimal**: for "Other Publications". Title, authors, venue, and the
//!   publication's own links only.
//!
//! The text helpers ([`format_authors`], [`format_venue`], [`card_links`])
//! are pure so they can be tested without rendering.

use crate::types::{FeaturedDetail, Publication, non_empty};
use maud::{Markup, html};
use regex::Regex;
use std::sync::LazyLock;

static AUTHOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+and\s+|,\s*").expect("author separator regex"));

/// A conference acronym that already carries its year, e.g. "CVPR 2024".
static CONFERENCE_WITH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ICLR|CVPR|NeurIPS|ICML|AAAI|IJCAI|ECCV|ICCV|WACV)\s*\d{4}\b")
        .expect("conference regex")
});

const LINK_SEPARATOR: &str = " • ";

/// How a card is laid out.
#[derive(Debug, Clone, Copy)]
pub enum CardStyle<'a> {
    Minimal,
    /// Rich layout. The detail record is optional: a highlighted publication
    /// without an entry in `featured_details.json` renders without extras.
    Highlighted(Option<&'a FeaturedDetail>),
}

impl<'a> CardStyle<'a> {
    fn detail(self) -> Option<&'a FeaturedDetail> {
        match self {
            CardStyle::Minimal => None,
            CardStyle::Highlighted(detail) => detail,
        }
    }
}

/// A labeled external link on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink<'a> {
    pub label: &'static str,
    pub href: &'a str,
}

/// Shorten a free-text author list.
///
/// Names are split on commas and on the word "and", trimmed, and empties
/// dropped. Lists longer than `max` keep the first `max` names followed by
/// "et al.".
pub fn format_authors(authors: &str, max: usize) -> String {
    let names: Vec<&str> = AUTHOR_SEPARATOR
        .split(authors)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    if names.len() <= max {
        names.join(", ")
    } else {
        format!("{}, et al.", names[..max].join(", "))
    }
}

/// Normalize the venue line shown under a card.
///
/// - arXiv preprints collapse to `"arXiv {year}"`.
/// - A conference acronym followed by a year is left alone.
/// - Anything else gets the year appended unless it already contains it.
/// - With no venue, the year alone is shown.
pub fn format_venue(venue: Option<&str>, year: Option<u32>) -> Option<String> {
    let year_text = year.map(|y| y.to_string());

    let Some(venue) = venue.filter(|v| !v.is_empty()) else {
        return year_text;
    };

    if venue.contains("arXiv preprint") || venue.contains("arXiv e-prints") {
        let arxiv = format!("arXiv {}", year_text.unwrap_or_default());
        return Some(arxiv.trim().to_string());
    }
    if CONFERENCE_WITH_YEAR.is_match(venue) {
        return Some(venue.to_string());
    }
    match year_text {
        Some(y) if !venue.contains(&y) => Some(format!("{venue} {y}")),
        _ => Some(venue.to_string()),
    }
}

/// The URL a highlighted card's title and image point at: the project page,
/// else the paper link from the featured details.
pub fn primary_link<'a>(publication: &'a Publication, style: CardStyle<'a>) -> Option<&'a str> {
    non_empty(&publication.links.project).or_else(|| match style {
        CardStyle::Minimal => None,
        CardStyle::Highlighted(detail) => detail.and_then(|d| non_empty(&d.paper)),
    })
}

/// All links shown on a card, in display order.
///
/// Base links come first (paper, code, project page, video, cite). Highlighted
/// cards then append models, HF dataset, paper, and post from the featured
/// details.
pub fn card_links<'a>(publication: &'a Publication, style: CardStyle<'a>) -> Vec<CardLink<'a>> {
    let links = &publication.links;
    let mut candidates = vec![
        ("paper", non_empty(&links.pdf)),
        ("code", non_empty(&links.code)),
        ("project page", non_empty(&links.project)),
        ("video", non_empty(&links.video)),
        ("cite", non_empty(&links.cite)),
    ];
    if let Some(detail) = style.detail() {
        candidates.extend([
            ("models", non_empty(&detail.models)),
            ("HF dataset", non_empty(&detail.dataset)),
            ("paper", non_empty(&detail.paper)),
            ("post", non_empty(&detail.post)),
        ]);
    }
    candidates
        .into_iter()
        .filter_map(|(label, href)| href.map(|href| CardLink { label, href }))
        .collect()
}

/// Render one publication card.
pub fn render_card(publication: &Publication, style: CardStyle<'_>, max_authors: usize) -> Markup {
    let highlighted = matches!(style, CardStyle::Highlighted(_));
    let card_class = if highlighted {
        "pub-card highlighted"
    } else {
        "pub-card minimal"
    };
    let detail = style.detail();
    let image = detail.and_then(|d| non_empty(&d.image));
    let highlight = detail.and_then(|d| non_empty(&d.highlight));
    let primary = if highlighted {
        primary_link(publication, style)
    } else {
        None
    };
    let authors = format_authors(&publication.authors, max_authors);
    let venue = format_venue(publication.venue.as_deref(), publication.year);
    let links = card_links(publication, style);
    let year_attr = publication.year.map(|y| y.to_string()).unwrap_or_default();

    html! {
        article class=(card_class)
            data-venue=(publication.venue.as_deref().unwrap_or_default())
            data-year=(year_attr) {
            @if let Some(src) = image {
                @if let Some(href) = primary {
                    a.thumb-link href=(href) target="_blank" rel="noreferrer" {
                        img.thumb alt=(publication.title) src=(src) loading="lazy";
                    }
                } @else {
                    img.thumb alt=(publication.title) src=(src) loading="lazy";
                }
            }
            div.pub-content {
                h3.title {
                    @if let Some(href) = primary {
                        a.title-link href=(href) target="_blank" rel="noreferrer" {
                            (publication.title)
                        }
                    } @else {
                        (publication.title)
                    }
                }
                @if let Some(text) = highlight {
                    div.highlight { (text) }
                }
                div.meta { (authors) }
                div.venue-links {
                    @if let Some(venue) = &venue {
                        span.venue { (venue) }
                    }
                    @if !links.is_empty() {
                        span.links {
                            @for (i, link) in links.iter().enumerate() {
                                @if i > 0 { (LINK_SEPARATOR) }
                                a target="_blank" rel="noreferrer" href=(link.href) { (link.label) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render every card of one category, in order.
pub fn render_cards<'a>(
    publications: &[&'a Publication],
    style_for: impl Fn(&'a Publication) -> CardStyle<'a>,
    max_authors: usize,
) -> Markup {
    html! {
        @for publication in publications {
            (render_card(publication, style_for(*publication), max_authors))
        }
    }
}
