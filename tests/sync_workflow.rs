//! End-to-end workflow tests against a real git repository
//!
//! Builds a temp website checkout plus a release directory, wires the
//! repository's origin to a local bare repo, and drives the full sync
//! pass with scripted confirmations.

use anyhow::Result;
use bbsync::config::Config;
use bbsync::git::{GitRepo, SiteRepo};
use bbsync::prompt::Confirm;
use bbsync::record::VersionRecord;
use bbsync::sync::{self, SyncAction};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Scripted {
    answers: VecDeque<bool>,
    message: String,
}

impl Scripted {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            message: String::new(),
        }
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, _question: &str) -> std::io::Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }

    fn read_line(&mut self, _prompt: &str) -> std::io::Result<String> {
        Ok(self.message.clone())
    }
}

struct Fixture {
    _temp: TempDir,
    config: Config,
    repo: GitRepo,
    bare: TempDir,
}

/// Website checkout with one committed state, a release directory, and a
/// local bare repository standing in for the GitHub remote.
fn fixture(release: &str, published: &str) -> Result<Fixture> {
    let temp = TempDir::new()?;
    let website = temp.path().join("bbmap_website");
    let tools = temp.path().join("bbmap");
    fs::create_dir_all(website.join("tools"))?;
    fs::create_dir_all(&tools)?;

    fs::write(
        tools.join("README.md"),
        format!("# BBMap/BBTools\n\nCurrent Version: **{}**\n", release),
    )?;
    fs::write(tools.join("bbduk.sh"), "#!/bin/bash\n")?;
    fs::write(tools.join("bbmap.sh"), "#!/bin/bash\n")?;
    fs::write(tools.join("reformat.sh"), "#!/bin/bash\n")?;

    fs::write(
        website.join("index.html"),
        format!(
            "<h1>BBTools</h1>\n<p><strong>Current Version:</strong> {}</p>\n",
            published
        ),
    )?;
    fs::write(
        website.join("tools/bbduk.html"),
        format!("<p><strong>Version:</strong> BBTools v{}</p>", published),
    )?;
    fs::write(
        website.join("tools/bbmap.html"),
        format!("<footer>BBTools v{}</footer>", published),
    )?;

    let mut init_opts = git2::RepositoryInitOptions::new();
    init_opts.initial_head("refs/heads/main");
    let git_repo = git2::Repository::init_opts(&website, &init_opts)?;
    let mut git_config = git_repo.config()?;
    git_config.set_str("user.name", "Test User")?;
    git_config.set_str("user.email", "test@example.com")?;
    drop(git_config);
    drop(git_repo);

    let bare = TempDir::new()?;
    git2::Repository::init_bare(bare.path())?;

    let mut repo = GitRepo::open(&website)?;
    repo.commit_all("Initial site")?;
    repo.ensure_remote("origin", bare.path().to_str().unwrap())?;

    let config = Config {
        website_dir: website,
        tools_dir: tools,
        ..Config::default()
    };

    Ok(Fixture {
        _temp: temp,
        config,
        repo,
        bare,
    })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
}

fn head_message(path: &Path) -> String {
    let repo = git2::Repository::open(path).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    head.message().unwrap().to_string()
}

#[test]
fn test_end_to_end_version_bump() -> Result<()> {
    let mut fx = fixture("39.05", "39.01")?;
    let mut prompt = Scripted::new(&[true, true]);

    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    assert_eq!(report.release, "39.05");
    assert_eq!(report.published, "39.01");
    assert_eq!(report.action, SyncAction::Updated { pages_rewritten: 2 });

    // Entry page shows the new version
    let entry = fs::read_to_string(fx.config.entry_path())?;
    assert!(entry.contains("Current Version:</strong> 39.05<"));

    // Version record overwritten with version and date
    let record = VersionRecord::load(&fx.config.record_path()).unwrap();
    assert_eq!(record.version, "39.05");
    assert_eq!(record.date, "2026-03-08");

    // Every tool page rewritten
    for page in ["bbduk.html", "bbmap.html"] {
        let content = fs::read_to_string(fx.config.pages_path().join(page))?;
        assert!(content.contains("BBTools v39.05"), "{} not rewritten", page);
        assert!(!content.contains("v39.01"));
    }

    // One commit naming the new version, pushed to the remote
    let message = head_message(&fx.config.website_dir);
    assert!(message.contains("39.05"));

    let bare = git2::Repository::open_bare(fx.bare.path())?;
    let pushed = bare
        .find_reference("refs/heads/main")?
        .peel_to_commit()?;
    assert!(pushed.message().unwrap().contains("39.05"));

    Ok(())
}

#[test]
fn test_already_synchronized_is_a_noop() -> Result<()> {
    let mut fx = fixture("39.01", "39.01")?;
    let before = fs::read_to_string(fx.config.entry_path())?;
    let mut prompt = Scripted::new(&[]);

    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    assert_eq!(report.action, SyncAction::AlreadySynchronized);
    assert_eq!(fs::read_to_string(fx.config.entry_path())?, before);
    assert!(!fx.config.record_path().exists());
    assert_eq!(head_message(&fx.config.website_dir), "Initial site");

    Ok(())
}

#[test]
fn test_declined_update_leaves_tree_untouched() -> Result<()> {
    let mut fx = fixture("39.05", "39.01")?;
    let before = fs::read_to_string(fx.config.entry_path())?;
    let mut prompt = Scripted::new(&[false]);

    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    assert_eq!(report.action, SyncAction::Declined);
    assert_eq!(fs::read_to_string(fx.config.entry_path())?, before);
    assert!(!fx.config.record_path().exists());

    Ok(())
}

#[test]
fn test_commit_first_gate_commits_pending_edits() -> Result<()> {
    let mut fx = fixture("39.01", "39.01")?;
    fs::write(fx.config.website_dir.join("news.html"), "<p>New post</p>")?;

    let mut prompt = Scripted::new(&[true]);
    prompt.message = "Add news post".to_string();

    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    assert!(report.committed_first);
    assert_eq!(head_message(&fx.config.website_dir), "Add news post");

    Ok(())
}

#[test]
fn test_declined_commit_first_keeps_changes_in_tree() -> Result<()> {
    let mut fx = fixture("39.01", "39.01")?;
    fs::write(fx.config.website_dir.join("news.html"), "<p>New post</p>")?;

    let mut prompt = Scripted::new(&[false]);
    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    assert!(!report.committed_first);
    // File still present and still uncommitted
    assert!(fx.config.website_dir.join("news.html").exists());
    assert_eq!(head_message(&fx.config.website_dir), "Initial site");

    Ok(())
}

#[test]
fn test_missing_release_metadata_aborts_before_touching_website() -> Result<()> {
    let mut fx = fixture("39.05", "39.01")?;
    fs::remove_file(fx.config.release_path())?;
    let before = fs::read_to_string(fx.config.entry_path())?;

    let mut prompt = Scripted::new(&[true, true]);
    let err = sync::run(&fx.config, &mut fx.repo, &mut prompt, today()).unwrap_err();

    assert!(err.is_missing_input());
    assert_eq!(fs::read_to_string(fx.config.entry_path())?, before);
    assert_eq!(head_message(&fx.config.website_dir), "Initial site");

    Ok(())
}

#[test]
fn test_failed_push_keeps_the_update_commit() -> Result<()> {
    let mut fx = fixture("39.05", "39.01")?;

    // Re-point origin at a path that does not exist
    {
        let repo = git2::Repository::open(&fx.config.website_dir)?;
        repo.remote_set_url("origin", "/nonexistent/bbmap_website.git")?;
    }

    let mut prompt = Scripted::new(&[true]);
    let err = sync::run(&fx.config, &mut fx.repo, &mut prompt, today()).unwrap_err();

    assert!(err.remediation().is_some());
    // The update commit survives; only the push failed
    assert!(head_message(&fx.config.website_dir).contains("39.05"));
    let entry = fs::read_to_string(fx.config.entry_path())?;
    assert!(entry.contains("39.05"));

    Ok(())
}

#[test]
fn test_coverage_advisory_counts_scripts_without_pages() -> Result<()> {
    let mut fx = fixture("39.01", "39.01")?;
    let mut prompt = Scripted::new(&[]);

    let report = sync::run(&fx.config, &mut fx.repo, &mut prompt, today())?;

    // 2 pages vs 3 scripts in the fixture
    assert_eq!(report.coverage.pages, 2);
    assert_eq!(report.coverage.scripts, 3);
    assert!(report.coverage.lagging());
    assert_eq!(report.coverage.missing(), 1);

    Ok(())
}
