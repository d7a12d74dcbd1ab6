//! # labsite
//!
//! A static homepage generator for research labs. A handful of JSON files
//! hold the lab's news and publications; labsite renders them into a single
//! `index.html` with a news list, five publication categories, a light/dark
//! theme and a navigation bar.
//!
//! # Pipeline
//!
//! ```text
//! config.toml ─┐
//! data/*.json ─┴→ load → categorize → render → dist/index.html
//!                                              dist/assets/...
//! ```
//!
//! Loading never fails the build: a missing or malformed data file is
//! replaced by an empty value and a warning is logged. Every other stage is a
//! pure function of the loaded snapshot, so tests can drive each one with
//! in-memory data.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | Concurrent, fault-tolerant loading of the four data files |
//! | [`categorize`] | Id-based bucketing into five categories, newest first |
//! | [`card`] | Publication card rendering: authors, venue, link bar |
//! | [`news`] | News list rendering with `**bold**` markup |
//! | [`theme`] | Light/dark theme resolution and persistence |
//! | [`nav`] | Navbar state: mobile menu, active section, anchor targets |
//! | [`generate`] | Page assembly with Maud and output writing |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Data records shared by every stage |
//! | [`naming`] | Title → slug conversion |
//! | [`merge`] | Merging scraped publication lists into `publications.json` |
//! | [`teaser`] | Linking teaser image files to featured details |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Rendered Ahead of Time
//!
//! The page is complete HTML when it leaves the build. Visitors get content
//! without running any script, and the small embedded script only handles
//! interaction: the theme toggle, the mobile menu and scroll highlighting.
//! The same rules are implemented in [`theme`] and [`nav`] so the initial
//! state written into the page matches what the script would compute.
//!
//! ## Categories by Id
//!
//! A publication's category is decided only by whether its id appears in one
//! of the configured lists. Tags, venues and titles play no part, so moving
//! a paper between sections is a one-line config change.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! checked at compile time and every interpolated value is escaped, which
//! matters here because titles and author lists come from scraped data.

pub mod card;
pub mod categorize;
pub mod config;
pub mod generate;
pub mod loader;
pub mod merge;
pub mod naming;
pub mod nav;
pub mod news;
pub mod output;
pub mod teaser;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
