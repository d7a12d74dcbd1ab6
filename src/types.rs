//! Records read from the site's `data/` directory.
//!
//! The JSON files are produced by hand or by external tooling, so every field
//! other than a publication's `id` and `title` is optional. Rendering treats an
//! absent field and an empty string the same way: the fragment is left out.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Deserialize an explicit `null` as the type's default, the same as an
/// absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single publication from `data/publications.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Unique slug, used as the key into category lists and featured details.
    pub id: String,
    pub title: String,
    /// Free-text author list, separated by commas and/or ` and `.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Links,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// External links attached to a publication. Unknown kinds are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cite: Option<String>,
}

impl Links {
    /// Overlay `other` on top of `self`: kinds present in `other` win.
    pub fn merged_with(&self, other: &Links) -> Links {
        Links {
            pdf: other.pdf.clone().or_else(|| self.pdf.clone()),
            code: other.code.clone().or_else(|| self.code.clone()),
            project: other.project.clone().or_else(|| self.project.clone()),
            video: other.video.clone().or_else(|| self.video.clone()),
            cite: other.cite.clone().or_else(|| self.cite.clone()),
        }
    }
}

/// Extra presentation data for a highlighted publication, keyed by its id in
/// `data/featured_details.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
}

pub type FeaturedDetails = BTreeMap<String, FeaturedDetail>;

/// An entry from `data/news.json`. Titles may contain `**bold**` markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Everything the renderers need, loaded once per build.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub news: Vec<NewsItem>,
    pub publications: Vec<Publication>,
    /// Loaded for completeness; rendering does not consult it.
    pub featured_slugs: Vec<String>,
    pub featured_details: FeaturedDetails,
    /// Resources (or single detail entries) that failed to load and were
    /// replaced by an empty value.
    pub fallbacks: Vec<String>,
}

/// Treat `None` and `Some("")` alike.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_with_only_required_fields() {
        let p: Publication = serde_json::from_str(r#"{"id": "a", "title": "A"}"#).unwrap();
        assert_eq!(p.authors, "");
        assert_eq!(p.year, None);
        assert_eq!(p.venue, None);
        assert_eq!(p.links, Links::default());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn publication_null_year_is_absent() {
        let p: Publication =
            serde_json::from_str(r#"{"id": "a", "title": "A", "year": null}"#).unwrap();
        assert_eq!(p.year, None);
    }

    #[test]
    fn publication_null_authors_links_and_tags_default() {
        let p: Publication = serde_json::from_str(
            r#"{"id": "a", "title": "A", "authors": null, "links": null, "tags": null}"#,
        )
        .unwrap();
        assert_eq!(p.authors, "");
        assert_eq!(p.links, Links::default());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn one_record_with_nulls_keeps_the_list() {
        let pubs: Vec<Publication> = serde_json::from_str(
            r#"[
                {"id": "a", "title": "A", "authors": "X and Y", "year": 2024},
                {"id": "b", "title": "B", "authors": null, "links": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(pubs.len(), 2);
        assert_eq!(pubs[1].authors, "");
    }

    #[test]
    fn unknown_link_kinds_ignored() {
        let p: Publication = serde_json::from_str(
            r#"{"id": "a", "title": "A", "links": {"pdf": "p.pdf", "slides": "s.pdf"}}"#,
        )
        .unwrap();
        assert_eq!(p.links.pdf.as_deref(), Some("p.pdf"));
    }

    #[test]
    fn links_merge_prefers_overlay() {
        let base = Links {
            pdf: Some("old.pdf".into()),
            code: Some("github".into()),
            ..Default::default()
        };
        let overlay = Links {
            pdf: Some("new.pdf".into()),
            ..Default::default()
        };
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.pdf.as_deref(), Some("new.pdf"));
        assert_eq!(merged.code.as_deref(), Some("github"));
    }

    #[test]
    fn non_empty_filters_blank() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some("x".into())), Some("x"));
    }
}
