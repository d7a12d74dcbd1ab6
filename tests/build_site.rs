//! End-to-end tests driving the `labsite` binary against `fixtures/site`.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn copy_dir_recursive(src: &Path, dst: &Path) {
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            fs::create_dir_all(&target).unwrap();
            copy_dir_recursive(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path());
    tmp
}

fn labsite(site: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_labsite"))
        .arg("--source")
        .arg(site)
        .arg("--output")
        .arg(site.join("dist"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_renders_homepage() {
    let site = fixture_site();
    let out = labsite(site.path(), &["build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let html = fs::read_to_string(site.path().join("dist/index.html")).unwrap();
    assert!(html.contains("<title>Efficient AI Lab</title>"));
    assert!(html.contains(r#"data-theme="light""#));
    assert!(html.contains(r#"data-scroll-offset="80""#));
    assert!(html.contains("<strong>Hymba</strong> accepted at ICLR 2025"));
    assert!(html.contains("Hybrid attention and SSM heads"));

    // Post-training cards are newest first, then source order
    let dora = html.find("DoRA: Weight-Decomposed").unwrap();
    let minitron = html.find("The Minitron Approach").unwrap();
    assert!(dora < minitron);

    // Undated legacy paper sorts after dated ones in Other Publications
    let older = html.find("An Older Study").unwrap();
    let legacy = html.find("A Legacy Workshop Paper").unwrap();
    assert!(older < legacy);

    assert!(site.path().join("dist/assets/images/teasers/hymba.png").exists());
}

#[test]
fn build_prints_inventory() {
    let site = fixture_site();
    let out = labsite(site.path(), &["build"]);
    let text = stdout(&out);
    assert!(text.contains("Foundation Models (1 publication)"));
    assert!(text.contains("Post-Training & Compression (2 publications)"));
    assert!(text.contains("Generated index.html with 5 publications, 3 news items"));
}

#[test]
fn build_respects_platform_dark_and_then_remembers() {
    let site = fixture_site();
    let out = labsite(site.path(), &["--prefers-dark", "build"]);
    assert!(out.status.success());
    let html = fs::read_to_string(site.path().join("dist/index.html")).unwrap();
    assert!(html.contains(r#"data-theme="dark""#));

    // The resolved theme was saved, so a light platform no longer matters
    let out = labsite(site.path(), &["theme"]);
    assert_eq!(stdout(&out).trim(), "Theme: dark");
}

#[test]
fn theme_command_saves_choice() {
    let site = fixture_site();
    let out = labsite(site.path(), &["theme", "dark"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "Theme set to dark");

    labsite(site.path(), &["build"]);
    let html = fs::read_to_string(site.path().join("dist/index.html")).unwrap();
    assert!(html.contains(r#"data-theme="dark""#));
}

#[test]
fn theme_command_rejects_unknown_theme() {
    let site = fixture_site();
    let out = labsite(site.path(), &["theme", "sepia"]);
    assert!(!out.status.success());
}

#[test]
fn check_writes_nothing() {
    let site = fixture_site();
    let out = labsite(site.path(), &["check"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Site data is valid"));
    assert!(!site.path().join("dist").exists());
    assert!(!site.path().join(".labsite").exists());
}

#[test]
fn broken_data_file_does_not_fail_build() {
    let site = fixture_site();
    fs::write(site.path().join("data/news.json"), "{ not json").unwrap();
    let out = labsite(site.path(), &["build"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("news.json"));
    assert!(stdout(&out).contains("News (0 items)"));
}

#[test]
fn check_reports_fallbacks_instead_of_valid() {
    let site = fixture_site();
    fs::write(site.path().join("data/news.json"), "{ not json").unwrap();
    let out = labsite(site.path(), &["check"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Fell back to empty (1):"));
    assert!(text.contains("    news.json"));
    assert!(text.contains("==> Site data loaded with 1 fallback"));
    assert!(!text.contains("Site data is valid"));
}

#[test]
fn invalid_config_fails() {
    let site = fixture_site();
    fs::write(site.path().join("config.toml"), "[cards]\nmax_authors = 0\n").unwrap();
    let out = labsite(site.path(), &["build"]);
    assert!(!out.status.success());
}

#[test]
fn teasers_updates_featured_details() {
    let site = fixture_site();
    let out = labsite(site.path(), &["teasers"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("dora: (none) → assets/images/teasers/dora.png"));
    assert!(text.contains("Updated 1 teaser image"));

    let details = fs::read_to_string(site.path().join("data/featured_details.json")).unwrap();
    assert!(details.contains("assets/images/teasers/dora.png"));
}

#[test]
fn merge_adds_and_updates_publications() {
    let site = fixture_site();
    let scraped = site.path().join("scraped.json");
    fs::write(
        &scraped,
        r#"[
            {"title": "hymba: a hybrid-head architecture for small language models", "year": 2025, "venue": "ICLR 2025"},
            {"title": "Brand New Paper", "year": 2026}
        ]"#,
    )
    .unwrap();

    let out = labsite(site.path(), &["merge", scraped.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Updated 1, added 1, kept 4"));

    let pubs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(site.path().join("data/publications.json")).unwrap()).unwrap();
    assert_eq!(pubs[0]["id"], "brand-new-paper");
    assert_eq!(pubs[1]["id"], "hymba");
    assert_eq!(pubs[1]["venue"], "ICLR 2025");
}

#[test]
fn slug_command() {
    let site = fixture_site();
    let out = labsite(site.path(), &["slug", "Puzzle:", "Distillation-Based", "NAS"]);
    assert_eq!(stdout(&out).trim(), "puzzle-distillation-based-nas");
}

#[test]
fn gen_config_prints_stock_file() {
    let site = fixture_site();
    let out = labsite(site.path(), &["gen-config"]);
    let text = stdout(&out);
    assert!(text.contains("[categories]"));
    assert!(text.contains("scroll_offset = 100"));
}
