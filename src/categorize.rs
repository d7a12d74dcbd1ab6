//! Publication categorization.
//!
//! Publications are bucketed by id, never by any of their own fields. The
//! four highlighted categories each have a membership list (from
//! `[categories]` in `config.toml`); everything else falls into
//! [`Category::Other`]. The lists are flattened once into a lookup table so
//! classification is a single hash lookup.
//!
//! Within a bucket, publications are ordered newest first. The sort is
//! stable: publications from the same year (or with no year, which sorts as
//! year 0) keep their relative order from `publications.json`.

use crate::config::CategoriesConfig;
use crate::types::Publication;
use std::cmp::Reverse;
use std::collections::HashMap;

/// One of the five fixed publication buckets, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FoundationModels,
    PostTraining,
    MultiModal,
    VisionEncoders,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::FoundationModels,
        Category::PostTraining,
        Category::MultiModal,
        Category::VisionEncoders,
        Category::Other,
    ];

    /// Element id of the page region this category renders into.
    pub fn region_id(self) -> &'static str {
        match self {
            Category::FoundationModels => "foundationModels",
            Category::PostTraining => "postTraining",
            Category::MultiModal => "multiModal",
            Category::VisionEncoders => "visionEncoders",
            Category::Other => "otherPubs",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Category::FoundationModels => "Foundation Models",
            Category::PostTraining => "Post-Training & Compression",
            Category::MultiModal => "Multi-Modal Models",
            Category::VisionEncoders => "Vision Encoders",
            Category::Other => "Other Publications",
        }
    }

    /// Highlighted categories get the rich card layout.
    pub fn is_highlighted(self) -> bool {
        self != Category::Other
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Id → category lookup built from the static membership lists.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    by_id: HashMap<String, Category>,
}

impl CategoryTable {
    /// Build the table. Lists are given in priority order; an id that
    /// appears in more than one list keeps the first category it was seen in.
    pub fn from_lists<S: AsRef<str>>(
        foundation_models: &[S],
        post_training: &[S],
        multi_modal: &[S],
        vision_encoders: &[S],
    ) -> Self {
        let mut by_id = HashMap::new();
        let lists = [
            (Category::FoundationModels, foundation_models),
            (Category::PostTraining, post_training),
            (Category::MultiModal, multi_modal),
            (Category::VisionEncoders, vision_encoders),
        ];
        for (category, ids) in lists {
            for id in ids {
                by_id.entry(id.as_ref().to_string()).or_insert(category);
            }
        }
        Self { by_id }
    }

    pub fn from_config(config: &CategoriesConfig) -> Self {
        Self::from_lists(
            &config.foundation_models,
            &config.post_training,
            &config.multi_modal,
            &config.vision_encoders,
        )
    }

    pub fn classify(&self, id: &str) -> Category {
        self.by_id.get(id).copied().unwrap_or(Category::Other)
    }
}

/// Publications split into the five buckets.
#[derive(Debug, Default)]
pub struct Categorized<'a> {
    buckets: [Vec<&'a Publication>; 5],
}

impl<'a> Categorized<'a> {
    pub fn get(&self, category: Category) -> &[&'a Publication] {
        &self.buckets[category.index()]
    }

    /// Buckets in page order, including empty ones.
    pub fn iter<'s>(&'s self) -> impl Iterator<Item = (Category, &'s [&'a Publication])> + 's {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Partition publications into buckets and order each one newest first.
pub fn categorize<'a>(publications: &'a [Publication], table: &CategoryTable) -> Categorized<'a> {
    let mut categorized = Categorized::default();
    for publication in publications {
        categorized.buckets[table.classify(&publication.id).index()].push(publication);
    }
    for bucket in &mut categorized.buckets {
        // `sort_by_key` is stable, so same-year entries keep source order.
        bucket.sort_by_key(|p| Reverse(p.year.unwrap_or(0)));
    }
    categorized
}
