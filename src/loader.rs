//! Data loading.
//!
//! The site is driven by four JSON files under the data directory:
//!
//! ```text
//! data/
//! ├── news.json               # [NewsItem]
//! ├── publications.json       # [Publication]
//! ├── featured.json           # [slug], loaded but not used for rendering
//! └── featured_details.json   # { slug: FeaturedDetail }
//! ```
//!
//! A broken or missing file must never stop the build: each resource is
//! loaded independently and replaced by an empty fallback (`[]` or `{}`) on
//! any failure, with a warning logged and the file named in
//! [`SiteData::fallbacks`]. The four loads run concurrently on the
//! rayon pool and the caller gets the snapshot once all of them have settled.

use crate::types::{FeaturedDetail, FeaturedDetails, NewsItem, Publication, SiteData};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const NEWS_PATH: &str = "news.json";
pub const PUBLICATIONS_PATH: &str = "publications.json";
pub const FEATURED_PATH: &str = "featured.json";
pub const FEATURED_DETAILS_PATH: &str = "featured_details.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where resources are read from. Paths are relative to the data directory.
pub trait DataSource: Sync {
    fn read(&self, path: &str) -> Result<Vec<u8>, LoadError>;

    /// Human-readable location of a resource, used in log messages.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Reads resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        Ok(fs::read(self.root.join(path))?)
    }

    fn describe(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}

/// Load and parse one resource, returning `fallback` on any failure.
pub fn load_json<T: DeserializeOwned>(source: &dyn DataSource, path: &str, fallback: T) -> T {
    load_tracked(source, path, fallback).0
}

/// Like [`load_json`], but also says whether the fallback was used.
fn load_tracked<T: DeserializeOwned>(source: &dyn DataSource, path: &str, fallback: T) -> (T, bool) {
    let parsed = source
        .read(path)
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(LoadError::from));
    match parsed {
        Ok(value) => (value, false),
        Err(e) => {
            warn!("Failed to load {}: {}", source.describe(path), e);
            (fallback, true)
        }
    }
}

/// Featured details must be a JSON object; an array (or any other shape)
/// is treated as "no details" rather than an error. Entries are decoded one
/// by one, so a malformed entry only loses its own fields.
fn load_featured_details(source: &dyn DataSource) -> (FeaturedDetails, Vec<String>) {
    let (raw, failed) = load_tracked(
        source,
        FEATURED_DETAILS_PATH,
        serde_json::Value::Object(Default::default()),
    );
    if failed {
        return (FeaturedDetails::new(), vec![FEATURED_DETAILS_PATH.to_string()]);
    }
    let serde_json::Value::Object(entries) = raw else {
        warn!(
            "Ignoring {}: expected an object keyed by publication id",
            source.describe(FEATURED_DETAILS_PATH)
        );
        return (FeaturedDetails::new(), vec![FEATURED_DETAILS_PATH.to_string()]);
    };

    let mut details = FeaturedDetails::new();
    let mut skipped = Vec::new();
    for (id, entry) in entries {
        match serde_json::from_value::<FeaturedDetail>(entry) {
            Ok(detail) => {
                details.insert(id, detail);
            }
            Err(e) => {
                warn!(
                    "Skipping entry {} in {}: {}",
                    id,
                    source.describe(FEATURED_DETAILS_PATH),
                    e
                );
                skipped.push(format!("{FEATURED_DETAILS_PATH} [{id}]"));
            }
        }
    }
    (details, skipped)
}

/// Load all four resources concurrently.
pub fn load_site_data(source: &dyn DataSource) -> SiteData {
    let ((news, publications), (featured_slugs, (featured_details, skipped))) = rayon::join(
        || {
            rayon::join(
                || load_tracked(source, NEWS_PATH, Vec::<NewsItem>::new()),
                || load_tracked(source, PUBLICATIONS_PATH, Vec::<Publication>::new()),
            )
        },
        || {
            rayon::join(
                || load_tracked(source, FEATURED_PATH, Vec::<String>::new()),
                || load_featured_details(source),
            )
        },
    );
    let ((news, news_failed), (publications, pubs_failed), (featured_slugs, slugs_failed)) =
        (news, publications, featured_slugs);

    let mut fallbacks: Vec<String> = [
        (NEWS_PATH, news_failed),
        (PUBLICATIONS_PATH, pubs_failed),
        (FEATURED_PATH, slugs_failed),
    ]
    .into_iter()
    .filter(|(_, failed)| *failed)
    .map(|(path, _)| path.to_string())
    .collect();
    fallbacks.extend(skipped);

    SiteData {
        news,
        publications,
        featured_slugs,
        featured_details,
        fallbacks,
    }
}
