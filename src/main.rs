use clap::{Parser, Subcommand};
use labsite::categorize::{CategoryTable, categorize};
use labsite::loader::{FEATURED_DETAILS_PATH, PUBLICATIONS_PATH};
use labsite::teaser::TEASERS_DIR;
use labsite::theme::{FileStore, Theme, ThemeManager};
use labsite::{config, generate, merge, naming, output, teaser};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "labsite")]
#[command(about = "Static homepage generator for research labs")]
#[command(long_about = "\
Static homepage generator for research labs

News and publications live in JSON files; the homepage is rendered from them
into a single index.html with a news list and publications grouped into
categories.

Site structure:

  site/
  ├── config.toml                  # Site config (optional, layered on defaults)
  ├── data/
  │   ├── news.json                # [{date, title, link?}], **bold** allowed in titles
  │   ├── publications.json        # [{id, title, authors, year, venue, links, tags}]
  │   ├── featured.json            # [slug]
  │   └── featured_details.json    # {slug: {highlight, image, post, paper, models, dataset}}
  └── assets/                      # Copied to the output root
      └── images/teasers/          # <id>.jpg|jpeg|png|webp, see 'labsite teasers'

Publications are placed into categories by id, listed under [categories] in
config.toml. Anything not listed goes to Other Publications.

Run 'labsite gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Treat the platform color scheme as dark when no theme is saved
    #[arg(long, global = true)]
    prefers_dark: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the homepage and copy assets
    Build,
    /// Load and categorize the site data without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Show the resolved theme, or save a new one
    Theme {
        /// Theme to save: light or dark
        theme: Option<Theme>,
    },
    /// Point featured details at teaser images found under assets/images/teasers
    Teasers,
    /// Merge scraped publications into data/publications.json
    Merge {
        /// JSON array of scraped publications
        scraped: PathBuf,
    },
    /// Print the slug for a title
    Slug {
        #[arg(required = true)]
        title: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            let theme = ThemeManager::new(FileStore::for_site(&cli.source)).init(cli.prefers_dark);
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let summary = generate::generate(&cli.source, &cli.output, &config, theme)?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let theme = resolved_theme(&cli.source, cli.prefers_dark);
            let data = generate::load_data(&cli.source, &config);
            let table = CategoryTable::from_config(&config.categories);
            let categorized = categorize(&data.publications, &table);
            let summary = generate::summarize(&config, &data, &categorized, theme);
            output::print_check_output(&summary);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Theme { theme } => match theme {
            Some(theme) => {
                let mut manager = ThemeManager::new(FileStore::for_site(&cli.source));
                manager.apply(theme);
                output::print_theme_output(theme, true);
            }
            None => output::print_theme_output(resolved_theme(&cli.source, cli.prefers_dark), false),
        },
        Command::Teasers => {
            let config = config::load_config(&cli.source)?;
            let details_path = data_dir(&cli.source, &config).join(FEATURED_DETAILS_PATH);
            let changes = teaser::update_teaser_file(&details_path, &cli.source.join(TEASERS_DIR))?;
            output::print_teaser_output(&changes);
        }
        Command::Merge { scraped } => {
            let config = config::load_config(&cli.source)?;
            let target = data_dir(&cli.source, &config).join(PUBLICATIONS_PATH);
            info!("Merging {} into {}", scraped.display(), target.display());
            let summary = merge::merge_file(&target, &scraped)?;
            output::print_merge_output(&summary, &target.display().to_string());
        }
        Command::Slug { title } => {
            println!("{}", naming::slugify(&title.join(" ")));
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; verbosity comes from `-v` count.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The theme a build would use, without saving it.
fn resolved_theme(source: &Path, prefers_dark: bool) -> Theme {
    ThemeManager::new(FileStore::for_site(source))
        .saved()
        .unwrap_or_else(|| Theme::from_platform(prefers_dark))
}

fn data_dir(source: &Path, config: &config::SiteConfig) -> PathBuf {
    source.join(&config.site.data_dir)
}
