//! Shared test utilities for the labsite test suite.
//!
//! Builders for the data records, an in-memory [`DataSource`], and fixture
//! setup for tests that need a whole site on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = MapSource::new()
//!     .with("publications.json", r#"[{"id": "dora", "title": "DoRA"}]"#)
//!     .failing("news.json");
//!
//! let mut p = publication("dora", Some(2024));
//! let d = detail(|d| d.highlight = Some("Weight-decomposed LoRA".into()));
//! ```

use std::collections::HashMap;
use std::io;
use std::path::Path;
use tempfile::TempDir;

use crate::loader::{DataSource, LoadError};
use crate::types::{FeaturedDetail, Links, Publication};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Building the site persists the theme preference under the site root, so
/// tests always work on an isolated copy.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `dir/name`, creating `dir` if needed.
pub fn write_data_file(dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

// =========================================================================
// Record builders
// =========================================================================

/// A publication with a title derived from its id and nothing else set.
pub fn publication(id: &str, year: Option<u32>) -> Publication {
    Publication {
        id: id.to_string(),
        title: format!("Paper {id}"),
        authors: String::new(),
        year,
        venue: None,
        links: Links::default(),
        tags: Vec::new(),
    }
}

/// A featured detail built by mutating an empty one.
pub fn detail(build: impl FnOnce(&mut FeaturedDetail)) -> FeaturedDetail {
    let mut detail = FeaturedDetail::default();
    build(&mut detail);
    detail
}

// =========================================================================
// In-memory data source
// =========================================================================

enum Entry {
    Content(Vec<u8>),
    Failing,
}

/// A [`DataSource`] backed by a map. Unknown paths read as not found.
#[derive(Default)]
pub struct MapSource {
    entries: HashMap<String, Entry>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.entries
            .insert(path.to_string(), Entry::Content(content.as_bytes().to_vec()));
        self
    }

    /// Make reads of `path` fail with a non-"not found" IO error.
    pub fn failing(mut self, path: &str) -> Self {
        self.entries.insert(path.to_string(), Entry::Failing);
        self
    }
}

impl DataSource for MapSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match self.entries.get(path) {
            Some(Entry::Content(bytes)) => Ok(bytes.clone()),
            Some(Entry::Failing) => Err(io::Error::other(format!("read of {path} failed")).into()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()).into()),
        }
    }

    fn describe(&self, path: &str) -> String {
        format!("memory:{path}")
    }
}
