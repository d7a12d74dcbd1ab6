//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is an inventory of what the page shows, not of the files touched.
//! Each publication is listed by positional index and title under its
//! category, with the year as secondary detail.
//!
//! # Output Format
//!
//! ## Check / Build
//!
//! ```text
//! News (3 items)
//!
//! Foundation Models (2 publications)
//!     001 Hymba: A Hybrid-head Architecture (2025)
//!     002 Minitron (2024)
//! Vision Encoders (0 publications)
//! Other Publications (1 publication) [not in layout]
//!     001 Legacy Paper
//!
//! Theme: dark
//! Featured slugs: 4
//! Generated index.html with 3 publications, 3 news items
//! ```
//!
//! The last line is only printed by `build`.
//!
//! ## Teasers
//!
//! ```text
//! hymba: (none) → assets/images/teasers/hymba.png
//! Updated 1 teaser image
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::SiteSummary;
use crate::merge::MergeSummary;
use crate::teaser::{TEASERS_DIR, TeaserChange};
use crate::theme::Theme;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 publication`, `2 publications`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn publication_line(index: usize, title: &str, year: Option<u32>) -> String {
    match year {
        Some(y) => format!("{}{} {} ({})", indent(1), format_index(index), title, y),
        None => format!("{}{} {}", indent(1), format_index(index), title),
    }
}

// ============================================================================
// Check / Build
// ============================================================================

/// Inventory of the loaded site, shared by `check` and `build`.
pub fn format_check_output(summary: &SiteSummary) -> Vec<String> {
    let mut lines = Vec::new();

    let mut news = format!("News ({})", plural(summary.news_items, "item"));
    if !summary.news_rendered {
        news.push_str(" [not in layout]");
    }
    lines.push(news);
    lines.push(String::new());

    for category in &summary.categories {
        let mut header = format!(
            "{} ({})",
            category.category.heading(),
            plural(category.publications.len(), "publication")
        );
        if !category.rendered {
            header.push_str(" [not in layout]");
        }
        lines.push(header);
        for (i, (title, year)) in category.publications.iter().enumerate() {
            lines.push(publication_line(i + 1, title, *year));
        }
    }

    lines.push(String::new());
    lines.push(format!("Theme: {}", summary.theme));
    lines.push(format!("Featured slugs: {}", summary.featured_slugs));
    if !summary.fallbacks.is_empty() {
        lines.push(format!("Fell back to empty ({}):", summary.fallbacks.len()));
        for source in &summary.fallbacks {
            lines.push(format!("{}{}", indent(1), source));
        }
    }
    lines
}

/// Closing line for `check`.
pub fn format_check_verdict(summary: &SiteSummary) -> String {
    match summary.fallbacks.len() {
        0 => "==> Site data is valid".to_string(),
        n => format!("==> Site data loaded with {}", plural(n, "fallback")),
    }
}

pub fn format_build_output(summary: &SiteSummary) -> Vec<String> {
    let mut lines = format_check_output(summary);
    lines.push(format!(
        "Generated index.html with {}, {}",
        plural(summary.total_publications(), "publication"),
        plural(summary.news_items, "news item")
    ));
    lines
}

pub fn print_check_output(summary: &SiteSummary) {
    for line in format_check_output(summary) {
        println!("{}", line);
    }
    println!("{}", format_check_verdict(summary));
}

pub fn print_build_output(summary: &SiteSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Theme
// ============================================================================

pub fn format_theme_output(theme: Theme, changed: bool) -> Vec<String> {
    if changed {
        vec![format!("Theme set to {}", theme)]
    } else {
        vec![format!("Theme: {}", theme)]
    }
}

pub fn print_theme_output(theme: Theme, changed: bool) {
    for line in format_theme_output(theme, changed) {
        println!("{}", line);
    }
}

// ============================================================================
// Teasers
// ============================================================================

pub fn format_teaser_output(changes: &[TeaserChange]) -> Vec<String> {
    if changes.is_empty() {
        return vec![
            "No teaser images found to update".to_string(),
            format!("Add image files to {}", TEASERS_DIR),
        ];
    }
    let mut lines: Vec<String> = changes
        .iter()
        .map(|c| {
            let old = if c.old.is_empty() { "(none)" } else { &c.old };
            format!("{}: {} → {}", c.id, old, c.new)
        })
        .collect();
    lines.push(format!("Updated {}", plural(changes.len(), "teaser image")));
    lines
}

pub fn print_teaser_output(changes: &[TeaserChange]) {
    for line in format_teaser_output(changes) {
        println!("{}", line);
    }
}

// ============================================================================
// Merge
// ============================================================================

pub fn format_merge_output(summary: &MergeSummary, target: &str) -> Vec<String> {
    vec![
        format!("Loaded {} existing", plural(summary.existing, "publication")),
        format!("Scraped {}", plural(summary.scraped, "publication")),
        format!(
            "{}Updated {}, added {}, kept {}",
            indent(1),
            summary.updated,
            summary.added,
            summary.kept
        ),
        format!("Wrote {} → {}", plural(summary.total, "publication"), target),
    ]
}

pub fn print_merge_output(summary: &MergeSummary, target: &str) {
    for line in format_merge_output(summary, target) {
        println!("{}", line);
    }
}
