//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. Stock
//! defaults are the base layer; the user file only needs the keys it wants to
//! override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Research Lab"
//! description = ""
//! data_dir = "data"          # JSON data files, relative to the site root
//!
//! [categories]               # Publication ids per highlighted category
//! foundation_models = ["hymba-a-hybrid-head-architecture-for-small-language-models", ...]
//! post_training = [...]
//! multi_modal = [...]
//! vision_encoders = [...]
//!
//! [cards]
//! max_authors = 8            # Authors shown before "et al."
//!
//! [layout]
//! regions = ["newsList", "foundationModels", "postTraining",
//!            "multiModal", "visionEncoders", "otherPubs"]
//!
//! [nav]
//! scroll_offset = 100        # px above a section that already counts as inside it
//!
//! [colors.light]
//! background = "#ffffff"
//! ...
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::categorize::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and data location.
    pub site: SiteSection,
    /// Publication ids assigned to each highlighted category.
    pub categories: CategoriesConfig,
    /// Publication card formatting.
    pub cards: CardsConfig,
    /// Which render targets the page contains.
    pub layout: LayoutConfig,
    /// Navigation behavior.
    pub nav: NavConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards.max_authors == 0 {
            return Err(ConfigError::Validation(
                "cards.max_authors must be at least 1".into(),
            ));
        }
        if self.site.data_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.data_dir must not be empty".into(),
            ));
        }
        for region in &self.layout.regions {
            if !is_known_region(region) {
                return Err(ConfigError::Validation(format!(
                    "layout.regions: unknown region '{region}'"
                )));
            }
        }
        Ok(())
    }
}

/// Id of the news list render target.
pub const NEWS_REGION: &str = "newsList";

fn is_known_region(region: &str) -> bool {
    region == NEWS_REGION || Category::ALL.iter().any(|c| c.region_id() == region)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Lab name, used for `<title>` and the page header.
    pub title: String,
    /// Short blurb under the header. Empty hides it.
    pub description: String,
    /// Directory holding the JSON data files, relative to the site root.
    pub data_dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Research Lab".to_string(),
            description: String::new(),
            data_dir: "data".to_string(),
        }
    }
}

/// Static category membership lists. Lists are consulted in declaration
/// order, so an id listed twice belongs to the earlier category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoriesConfig {
    pub foundation_models: Vec<String>,
    pub post_training: Vec<String>,
    pub multi_modal: Vec<String>,
    pub vision_encoders: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
        Self {
            foundation_models: owned(&[
                "nemotron-h-a-family-of-accurate-and-efficient-hybrid-mamba-transformer-models",
                "hymba-a-hybrid-head-architecture-for-small-language-models",
                "small-language-models-are-the-future-of-agentic-ai",
                "climb-clustering-based-iterative-data-mixture-bootstrapping-for-language-model-pre-training",
            ]),
            post_training: owned(&[
                "dora-weight-decomposed-low-rank-adaptation",
                "llm-pruning-and-distillation-in-practice-the-minitron-approach",
                "efficient-hybrid-language-model-compression-through-group-aware-ssm-pruning",
                "puzzle-distillation-based-nas-for-inference-optimized-llms",
            ]),
            multi_modal: owned(&[
                "nvila-efficient-frontier-visual-language-models",
                "omnivinci-enhancing-architecture-and-data-for-omni-modal-understanding-llm",
                "scaling-vision-pre-training-to-4k-resolution",
            ]),
            vision_encoders: owned(&[
                "radiov2-5-improved-baselines-for-agglomerative-vision-foundation-models",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    /// Authors shown before the list is cut off with "et al.".
    pub max_authors: usize,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self { max_authors: 8 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Render target ids present on the page. Targets left out are skipped.
    pub regions: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let mut regions = vec![NEWS_REGION.to_string()];
        regions.extend(Category::ALL.iter().map(|c| c.region_id().to_string()));
        Self { regions }
    }
}

impl LayoutConfig {
    pub fn has_region(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Distance in px above a section's top edge at which its nav link
    /// becomes active.
    pub scroll_offset: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { scroll_offset: 100 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: dates, author lists, venues.
    pub text_muted: String,
    /// Card backgrounds and the navbar.
    pub surface: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#5f6368".to_string(),
            surface: "#f6f7f9".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#2f6f4f".to_string(),
            link_hover: "#76b900".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111315".to_string(),
            text: "#e8eaed".to_string(),
            text_muted: "#9aa0a6".to_string(),
            surface: "#1b1e21".to_string(),
            border: "#2e3236".to_string(),
            link: "#9fd36a".to_string(),
            link_hover: "#c5f08f".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root, on top of stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# labsite Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Lab name, shown in the browser tab and the page header.
title = "Research Lab"

# Short blurb under the header. Leave empty to hide it.
description = ""

# Directory with news.json, publications.json, featured.json and
# featured_details.json, relative to the site root.
data_dir = "data"

# ---------------------------------------------------------------------------
# Publication categories
# ---------------------------------------------------------------------------
# Publications are matched by id against these lists, in this order. Anything
# not listed lands in "Other Publications" and is shown as a minimal card.
[categories]
foundation_models = [
    "nemotron-h-a-family-of-accurate-and-efficient-hybrid-mamba-transformer-models",
    "hymba-a-hybrid-head-architecture-for-small-language-models",
    "small-language-models-are-the-future-of-agentic-ai",
    "climb-clustering-based-iterative-data-mixture-bootstrapping-for-language-model-pre-training",
]
post_training = [
    "dora-weight-decomposed-low-rank-adaptation",
    "llm-pruning-and-distillation-in-practice-the-minitron-approach",
    "efficient-hybrid-language-model-compression-through-group-aware-ssm-pruning",
    "puzzle-distillation-based-nas-for-inference-optimized-llms",
]
multi_modal = [
    "nvila-efficient-frontier-visual-language-models",
    "omnivinci-enhancing-architecture-and-data-for-omni-modal-understanding-llm",
    "scaling-vision-pre-training-to-4k-resolution",
]
vision_encoders = [
    "radiov2-5-improved-baselines-for-agglomerative-vision-foundation-models",
]

# ---------------------------------------------------------------------------
# Publication cards
# ---------------------------------------------------------------------------
[cards]
# Authors listed before the rest are folded into "et al.".
max_authors = 8

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Render targets present on the page. Remove an entry to drop that block.
regions = [
    "newsList",
    "foundationModels",
    "postTraining",
    "multiModal",
    "visionEncoders",
    "otherPubs",
]

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# A nav link becomes active once the page is scrolled to within this many
# pixels of its section's top edge.
scroll_offset = 100

# ---------------------------------------------------------------------------
# Colors - Light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#5f6368"    # Dates, authors, venues
surface = "#f6f7f9"       # Cards and navbar
border = "#e0e0e0"
link = "#2f6f4f"
link_hover = "#76b900"

# ---------------------------------------------------------------------------
# Colors - Dark theme
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111315"
text = "#e8eaed"
text_muted = "#9aa0a6"
surface = "#1b1e21"
border = "#2e3236"
link = "#9fd36a"
link_hover = "#c5f08f"
"##
}

/// Generate CSS custom properties for both themes.
///
/// Themes are selected by the `data-theme` attribute on `<html>`, which the
/// page script keeps in sync with the visitor's stored preference.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root, [data-theme="light"] {{
{light}
}}

[data-theme="dark"] {{
{dark}
}}"#,
        light = scheme_variables(&colors.light),
        dark = scheme_variables(&colors.dark),
    )
}

fn scheme_variables(scheme: &ColorScheme) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-surface", &scheme.surface),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
    ]
    .iter()
    .map(|(name, value)| format!("    {name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
