//! The version sync & publish workflow
//!
//! A single forward pass with two operator gates:
//! 1. read the release version and the published version
//! 2. commit-first gate when the website tree has uncommitted changes
//! 3. update gate when the versions differ; on yes, rewrite the entry
//!    page, overwrite the version record, and rewrite the tool pages
//! 4. ensure the remote exists and push
//! 5. advisory coverage check (pages vs scripts)
//!
//! The workflow mutates nothing on its own behalf until a gate is
//! confirmed, and it never rolls back: a failed push leaves every commit
//! in place for a manual re-run.

use crate::config::Config;
use crate::error::{Error, InputError, IoError, Result};
use crate::extract;
use crate::git::SiteRepo;
use crate::pages::{self, Coverage};
use crate::prompt::Confirm;
use crate::record::VersionRecord;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Commit message used when the operator leaves the free-text prompt empty
const DEFAULT_CONTENT_MESSAGE: &str = "Update website content";

/// What the synchronizer did with the version mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Versions already matched; nothing rewritten
    AlreadySynchronized,
    /// Operator confirmed; files rewritten and committed
    Updated { pages_rewritten: usize },
    /// Operator declined the update gate; nothing rewritten
    Declined,
}

/// Outcome of a full run, for the command layer to report.
#[derive(Debug)]
pub struct SyncReport {
    pub release: String,
    pub published: String,
    pub action: SyncAction,
    /// Operator committed pre-existing changes at the first gate
    pub committed_first: bool,
    /// The remote was created during this run (first publish)
    pub remote_bootstrapped: bool,
    pub coverage: Coverage,
}

/// String equality, deliberately without numeric normalization:
/// `"39.0"` and `"39.00"` are treated as different published states.
pub fn versions_match(release: &str, published: &str) -> bool {
    release == published
}

/// Run the whole workflow against a repository and confirmation provider.
///
/// `today` is injected so tests can pin the version record's date.
pub fn run(
    config: &Config,
    repo: &mut dyn SiteRepo,
    prompt: &mut dyn Confirm,
    today: NaiveDate,
) -> Result<SyncReport> {
    // Authoritative release version; without it the run cannot proceed.
    let release_path = config.release_path();
    if !release_path.is_file() {
        return Err(Error::Input(InputError::MissingRelease(release_path)));
    }
    let release_text = read(&release_path)?;
    let release = extract::release_version(&release_text).unwrap_or_default();

    let entry_path = config.entry_path();
    if !entry_path.is_file() {
        return Err(Error::Input(InputError::MissingEntry(entry_path)));
    }
    let entry_text = read(&entry_path)?;
    let published = extract::published_version(&entry_text).unwrap_or_default();

    // Gate 1: pre-existing changes in the website tree. Declining defers
    // them; they are never discarded.
    let mut committed_first = false;
    if repo.has_uncommitted_changes()? {
        let summary = repo.status_summary()?;
        let question = format!(
            "Found {} uncommitted change(s) in the website tree:\n{}\nCommit these before syncing?",
            summary.len(),
            summary.join("\n"),
        );
        if prompt.confirm(&question)? {
            let mut message = prompt.read_line("Commit message")?;
            if message.is_empty() {
                message = DEFAULT_CONTENT_MESSAGE.to_string();
            }
            repo.commit_all(&message)?;
            committed_first = true;
        }
    }

    // Gate 2: the version update itself.
    let action = if versions_match(&release, &published) {
        SyncAction::AlreadySynchronized
    } else {
        let question = format!(
            "Website shows version '{}' but the release is '{}'. Update the website?",
            published, release,
        );
        if prompt.confirm(&question)? {
            apply_update(config, repo, &entry_text, &release, today)?
        } else {
            SyncAction::Declined
        }
    };

    // Publish whatever is committed, bootstrapping the remote on first use.
    let remote_bootstrapped = repo.ensure_remote(&config.remote.name, &config.remote.url())?;
    repo.push(&config.remote.name, &config.remote.branch)?;

    let coverage = pages::coverage(&config.pages_path(), &config.tools_dir);

    Ok(SyncReport {
        release,
        published,
        action,
        committed_first,
        remote_bootstrapped,
        coverage,
    })
}

/// Rewrite the entry marker, overwrite the version record, rewrite the
/// tool pages, and commit the result.
fn apply_update(
    config: &Config,
    repo: &mut dyn SiteRepo,
    entry_text: &str,
    release: &str,
    today: NaiveDate,
) -> Result<SyncAction> {
    // An entry page without the marker has nothing to rewrite; the record
    // and the tool pages are still brought up to date.
    if let Some(rewritten) = extract::rewrite_entry_version(entry_text, release) {
        write(&config.entry_path(), &rewritten)?;
    }

    VersionRecord::new(release, today).write(&config.record_path())?;

    let pages_rewritten = pages::rewrite_pages(&config.pages_path(), release)?;

    repo.commit_all(&format!("Update website to v{}", release))?;

    Ok(SyncAction::Updated { pages_rewritten })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        Error::Io(IoError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    })
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| {
        Error::Io(IoError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    })
}
