//! Tool documentation page maintenance
//!
//! Each generated page under `tools/` embeds the suite version as a
//! `vX.Y` token (e.g. `BBTools v39.01`). On a version bump every token in
//! every page is rewritten. Also counts pages against the shell scripts in
//! the release directory so the operator hears about pages that were never
//! generated.

use crate::error::{Error, IoError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Pages-vs-scripts counts for the advisory coverage check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Generated `*.html` pages under the website's tools directory
    pub pages: usize,
    /// `*.sh` tool scripts in the release directory
    pub scripts: usize,
}

impl Coverage {
    /// True when some scripts have no generated page yet
    pub fn lagging(&self) -> bool {
        self.pages < self.scripts
    }

    pub fn missing(&self) -> usize {
        self.scripts.saturating_sub(self.pages)
    }
}

/// Rewrite every `vX.Y` version token in each `*.html` page under `dir`.
///
/// Returns the number of files actually modified. Pages without a token
/// are left unwritten; a missing directory counts as zero pages (the
/// coverage check will flag it).
pub fn rewrite_pages(dir: &Path, new_version: &str) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let token = Regex::new(r"v\d+\.\d+").map_err(|source| {
        Error::Io(IoError::Other(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            source,
        )))
    })?;
    let replacement = format!("v{}", new_version);

    let mut rewritten = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| {
            Error::Io(IoError::Other(std::io::Error::other(source)))
        })?;
        if !is_html(entry.path()) {
            continue;
        }

        let content = fs::read_to_string(entry.path()).map_err(|source| {
            Error::Io(IoError::ReadFailed {
                path: entry.path().to_path_buf(),
                source,
            })
        })?;

        // replace_all borrows when nothing matched
        if let Cow::Owned(updated) = token.replace_all(&content, replacement.as_str()) {
            fs::write(entry.path(), updated).map_err(|source| {
                Error::Io(IoError::WriteFailed {
                    path: entry.path().to_path_buf(),
                    source,
                })
            })?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

/// Count generated pages against available tool scripts.
pub fn coverage(pages_dir: &Path, tools_dir: &Path) -> Coverage {
    Coverage {
        pages: count_with_extension(pages_dir, "html"),
        scripts: count_with_extension(tools_dir, "sh"),
    }
}

fn count_with_extension(dir: &Path, ext: &str) -> usize {
    if !dir.is_dir() {
        return 0;
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == ext).unwrap_or(false))
        .count()
}

fn is_html(path: &Path) -> bool {
    path.extension().map(|x| x == "html").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_page(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_rewrite_replaces_all_tokens_per_file() {
        let temp_dir = TempDir::new().unwrap();
        write_page(
            temp_dir.path(),
            "bbduk.html",
            "<p>BBTools v39.01</p><footer>v39.01</footer>",
        );

        let count = rewrite_pages(temp_dir.path(), "39.05").unwrap();
        assert_eq!(count, 1);

        let content = fs::read_to_string(temp_dir.path().join("bbduk.html")).unwrap();
        assert!(content.contains("BBTools v39.05"));
        assert!(content.contains("<footer>v39.05</footer>"));
        assert!(!content.contains("v39.01"));
    }

    #[test]
    fn test_rewrite_skips_files_without_tokens() {
        let temp_dir = TempDir::new().unwrap();
        write_page(temp_dir.path(), "about.html", "<p>No version here</p>");
        write_page(temp_dir.path(), "bbmap.html", "<p>BBTools v39.01</p>");

        let count = rewrite_pages(temp_dir.path(), "39.05").unwrap();
        assert_eq!(count, 1);

        let untouched = fs::read_to_string(temp_dir.path().join("about.html")).unwrap();
        assert_eq!(untouched, "<p>No version here</p>");
    }

    #[test]
    fn test_rewrite_ignores_non_html() {
        let temp_dir = TempDir::new().unwrap();
        write_page(temp_dir.path(), "notes.txt", "v39.01");

        let count = rewrite_pages(temp_dir.path(), "39.05").unwrap();
        assert_eq!(count, 0);

        let content = fs::read_to_string(temp_dir.path().join("notes.txt")).unwrap();
        assert_eq!(content, "v39.01");
    }

    #[test]
    fn test_rewrite_missing_dir_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let count = rewrite_pages(&temp_dir.path().join("tools"), "39.05").unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_coverage_counts() {
        let temp_dir = TempDir::new().unwrap();
        let pages = temp_dir.path().join("tools");
        let scripts = temp_dir.path().join("bbmap");
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&scripts).unwrap();

        write_page(&pages, "bbduk.html", "");
        fs::write(scripts.join("bbduk.sh"), "").unwrap();
        fs::write(scripts.join("bbmap.sh"), "").unwrap();
        fs::write(scripts.join("README.md"), "").unwrap();

        let cov = coverage(&pages, &scripts);
        assert_eq!(cov, Coverage { pages: 1, scripts: 2 });
        assert!(cov.lagging());
        assert_eq!(cov.missing(), 1);
    }

    #[test]
    fn test_coverage_not_lagging_when_equal() {
        let cov = Coverage { pages: 3, scripts: 3 };
        assert!(!cov.lagging());
        assert_eq!(cov.missing(), 0);
    }
}
