//! News list rendering.
//!
//! News titles support one bit of markup: `**text**` is shown as
//! `<strong>text</strong>`. Everything else in a title is plain text.

use crate::types::{NewsItem, non_empty};
use maud::{Markup, html};
use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold markup regex"));

/// Render a news title, turning each `**…**` pair into `<strong>`.
pub fn emphasize(title: &str) -> Markup {
    let mut last = 0;
    let mut pieces: Vec<(&str, bool)> = Vec::new();
    for caps in BOLD.captures_iter(title) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        pieces.push((&title[last..whole.start()], false));
        pieces.push((inner.as_str(), true));
        last = whole.end();
    }
    pieces.push((&title[last..], false));

    html! {
        @for (text, strong) in pieces {
            @if strong {
                strong { (text) }
            } @else {
                (text)
            }
        }
    }
}

pub fn render_news_item(item: &NewsItem) -> Markup {
    html! {
        li {
            span.date { (item.date) }
            " "
            (emphasize(&item.title))
            @if let Some(link) = non_empty(&item.link) {
                " "
                a target="_blank" rel="noreferrer" href=(link) { "Link" }
            }
        }
    }
}

/// Render the whole news list in source order.
pub fn render_news(items: &[NewsItem]) -> Markup {
    html! {
        @for item in items {
            (render_news_item(item))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: Option<&str>) -> NewsItem {
        NewsItem {
            date: "Sep 2025".to_string(),
            title: title.to_string(),
            link: link.map(str::to_string),
        }
    }

    #[test]
    fn bold_prefix() {
        let html = emphasize("**Award**: won first place").into_string();
        assert_eq!(html, "<strong>Award</strong>: won first place");
        assert!(!html.contains("**"));
    }

    #[test]
    fn multiple_bold_pairs() {
        let html = emphasize("**Hymba** and **DoRA** accepted").into_string();
        assert_eq!(
            html,
            "<strong>Hymba</strong> and <strong>DoRA</strong> accepted"
        );
    }

    #[test]
    fn unpaired_marker_stays_literal() {
        let html = emphasize("5 ** 2 is not markup").into_string();
        assert_eq!(html, "5 ** 2 is not markup");
    }

    #[test]
    fn plain_title() {
        assert_eq!(emphasize("Talk at GTC").into_string(), "Talk at GTC");
    }

    #[test]
    fn title_text_is_escaped() {
        let html = emphasize("**<i>x</i>** & y").into_string();
        assert_eq!(html, "<strong>&lt;i&gt;x&lt;/i&gt;</strong> &amp; y");
    }

    #[test]
    fn item_with_link() {
        let html = render_news_item(&item("Paper out", Some("https://arxiv.org/abs/1"))).into_string();
        assert!(html.contains(r#"<span class="date">Sep 2025</span>"#));
        assert!(html.contains(r#"href="https://arxiv.org/abs/1""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(">Link</a>"));
    }

    #[test]
    fn item_without_link() {
        let html = render_news_item(&item("Paper out", None)).into_string();
        assert!(!html.contains("<a"));
        let html = render_news_item(&item("Paper out", Some(""))).into_string();
        assert!(!html.contains("<a"));
    }

    #[test]
    fn news_keeps_source_order() {
        let items = vec![item("older", None), item("newer", None)];
        let html = render_news(&items).into_string();
        assert!(html.find("older").unwrap() < html.find("newer").unwrap());
        assert_eq!(html.matches("<li>").count(), 2);
    }
}
