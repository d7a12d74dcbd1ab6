//! Merging freshly scraped publications into `publications.json`.
//!
//! Entries are matched on their title, trimmed and lowercased. For a match
//! the scraped record provides the bibliographic fields while the existing
//! record keeps its id, and links and tags are combined. Existing entries the
//! scrape did not return (hand-added or legacy papers) are kept as they are.
//!
//! The merged list is sorted newest first, then by title, both descending.

use crate::naming::slugify;
use crate::types::{Links, Publication};
use serde::Deserialize;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A scraped record. Scrapers may leave out the id, in which case it is
/// derived from the title.
#[derive(Debug, Deserialize)]
struct ScrapedRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: String,
    #[serde(default)]
    year: Option<u32>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    links: Links,
    #[serde(default)]
    tags: Vec<String>,
}

impl ScrapedRecord {
    fn into_publication(self) -> Option<Publication> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return None;
        }
        let id = if self.id.is_empty() {
            slugify(&title)
        } else {
            self.id
        };
        Some(Publication {
            id,
            title,
            authors: self.authors,
            year: self.year,
            venue: self.venue,
            links: self.links,
            tags: self.tags,
        })
    }
}

/// Counts reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub existing: usize,
    pub scraped: usize,
    /// Scraped entries that matched an existing one.
    pub updated: usize,
    /// Scraped entries with no existing match.
    pub added: usize,
    /// Existing entries the scrape did not return.
    pub kept: usize,
    pub total: usize,
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

fn merge_pair(old: &Publication, new: Publication) -> Publication {
    let tags: BTreeSet<String> = old.tags.iter().cloned().chain(new.tags).collect();
    Publication {
        id: if old.id.is_empty() {
            new.id
        } else {
            old.id.clone()
        },
        title: new.title,
        authors: new.authors,
        year: new.year,
        venue: new.venue,
        links: old.links.merged_with(&new.links),
        tags: tags.into_iter().collect(),
    }
}

/// Merge `scraped` into `existing`.
pub fn merge_publications(
    existing: Vec<Publication>,
    scraped: Vec<Publication>,
) -> (Vec<Publication>, MergeSummary) {
    let mut summary = MergeSummary {
        existing: existing.len(),
        scraped: scraped.len(),
        ..MergeSummary::default()
    };

    // Later duplicates win, as with any keyed lookup.
    let by_title: HashMap<String, &Publication> =
        existing.iter().map(|p| (title_key(&p.title), p)).collect();
    let scraped_titles: HashSet<String> = scraped.iter().map(|p| title_key(&p.title)).collect();

    let mut merged = Vec::with_capacity(existing.len() + scraped.len());
    for publication in scraped {
        match by_title.get(&title_key(&publication.title)) {
            Some(old) => {
                summary.updated += 1;
                merged.push(merge_pair(old, publication));
            }
            None => {
                summary.added += 1;
                merged.push(publication);
            }
        }
    }

    for old in &existing {
        if !scraped_titles.contains(&title_key(&old.title)) {
            summary.kept += 1;
            merged.push(old.clone());
        }
    }

    // Stable, so entries with the same year and title keep their order.
    merged.sort_by_key(|p| {
        Reverse((
            p.year.map(i64::from).unwrap_or(-1),
            p.title.clone(),
        ))
    });
    summary.total = merged.len();
    (merged, summary)
}

/// Read a publication list. A missing file is an empty list.
pub fn read_publications(path: &Path) -> Result<Vec<Publication>, MergeError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read scraped records, dropping any without a title.
pub fn read_scraped(path: &Path) -> Result<Vec<Publication>, MergeError> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ScrapedRecord> = serde_json::from_str(&content)?;
    Ok(records
        .into_iter()
        .filter_map(ScrapedRecord::into_publication)
        .collect())
}

pub fn write_publications(path: &Path, publications: &[Publication]) -> Result<(), MergeError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(publications)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Merge the scraped file into the publications file in place.
pub fn merge_file(publications_path: &Path, scraped_path: &Path) -> Result<MergeSummary, MergeError> {
    let existing = read_publications(publications_path)?;
    let scraped = read_scraped(scraped_path)?;
    let (merged, summary) = merge_publications(existing, scraped);
    write_publications(publications_path, &merged)?;
    Ok(summary)
}
