//! Teaser image discovery.
//!
//! A highlighted card shows a teaser image when its featured detail has an
//! `image`. Teasers are dropped into `assets/images/teasers/` named after the
//! publication id; this module points each detail at the file it finds:
//!
//! ```text
//! assets/images/teasers/hymba.png   →   "image": "assets/images/teasers/hymba.png"
//! ```
//!
//! Extensions are tried in [`TEASER_EXTENSIONS`] order and the first existing
//! file wins. Details are edited as raw JSON so fields this crate does not
//! know about survive the rewrite, and entries keep their order in the file.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum TeaserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} must contain a JSON object keyed by publication id")]
    NotAnObject(String),
}

pub const TEASER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Teaser directory relative to the site root, and the URL prefix written
/// into `image`.
pub const TEASERS_DIR: &str = "assets/images/teasers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeaserChange {
    pub id: String,
    /// Previous `image`, empty when there was none.
    pub old: String,
    pub new: String,
}

/// The teaser file for `id` under `teasers_dir`, as a site-relative path.
pub fn find_teaser(teasers_dir: &Path, id: &str) -> Option<String> {
    TEASER_EXTENSIONS
        .iter()
        .find(|ext| teasers_dir.join(format!("{id}.{ext}")).is_file())
        .map(|ext| format!("{TEASERS_DIR}/{id}.{ext}"))
}

/// Point every detail with a teaser file at that file. Returns the changes
/// made, in file order.
pub fn update_teaser_images(details: &mut Map<String, Value>, teasers_dir: &Path) -> Vec<TeaserChange> {
    let mut changes = Vec::new();
    for (id, detail) in details.iter_mut() {
        let Some(new) = find_teaser(teasers_dir, id) else {
            continue;
        };
        let Some(fields) = detail.as_object_mut() else {
            warn!("Featured detail for {} is not an object, skipping", id);
            continue;
        };
        let old = fields
            .get("image")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if old != new {
            fields.insert("image".to_string(), Value::String(new.clone()));
            changes.push(TeaserChange {
                id: id.clone(),
                old,
                new,
            });
        }
    }
    changes
}

/// Update `details_path` in place from the teasers in `teasers_dir`. The
/// file is only rewritten when something changed.
pub fn update_teaser_file(details_path: &Path, teasers_dir: &Path) -> Result<Vec<TeaserChange>, TeaserError> {
    let content = fs::read_to_string(details_path)?;
    let Value::Object(mut details) = serde_json::from_str::<Value>(&content)? else {
        return Err(TeaserError::NotAnObject(details_path.display().to_string()));
    };

    let changes = update_teaser_images(&mut details, teasers_dir);
    if !changes.is_empty() {
        let mut json = serde_json::to_string_pretty(&Value::Object(details))?;
        json.push('\n');
        fs::write(details_path, json)?;
    }
    Ok(changes)
}
