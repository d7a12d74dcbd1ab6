//! Publication slugs.
//!
//! Every publication is keyed by a slug derived from its title: lowercase
//! alphanumeric words joined by single dashes. Any other character, spaces
//! and punctuation alike, separates words. The same slug is used as the key
//! in category lists, in `featured_details.json`, and as the teaser image
//! filename.
//!
//! - `"DoRA: Weight-Decomposed Low-Rank Adaptation"` → `"dora-weight-decomposed-low-rank-adaptation"`
//! - `"RADIOv2.5: Improved Baselines"` → `"radiov2-5-improved-baselines"`

/// Derive the slug for a title.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
