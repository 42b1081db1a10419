//! Version extraction from the release metadata and the website entry page
//!
//! Both sources mark the version with a `Current Version:` label; only the
//! surrounding delimiters differ:
//! - release metadata (markdown): `Current Version: **39.01**`
//! - entry page (HTML): `Current Version:</strong> 39.01<`
//!
//! Extraction takes the first matching line and returns `None` when the
//! marker is absent, so callers can route an absent marker into the
//! mismatch branch instead of crashing.

use regex::Regex;

/// Extract the release version from release metadata text.
///
/// Looks for the first line containing `Current Version:` and returns the
/// value between the following `**` bold delimiters.
pub fn release_version(text: &str) -> Option<String> {
    let re = Regex::new(r"Current Version:[^*\n]*\*\*([^*\n]+)\*\*").ok()?;
    let caps = re.captures(text)?;
    let version = caps.get(1)?.as_str().trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Extract the published version from the website entry page.
///
/// Looks for the first `Current Version:</strong>` marker and returns the
/// text up to the next tag, whitespace-trimmed.
pub fn published_version(text: &str) -> Option<String> {
    let re = Regex::new(r"Current Version:</strong>\s*([^<\n]+)<").ok()?;
    let caps = re.captures(text)?;
    let version = caps.get(1)?.as_str().trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Rewrite the first `Current Version:</strong>` marker in the entry page
/// to the new version, leaving the rest of the document untouched.
///
/// Returns the rewritten document, or `None` when no marker was found
/// (nothing to rewrite).
pub fn rewrite_entry_version(text: &str, new_version: &str) -> Option<String> {
    let re = Regex::new(r"(Current Version:</strong>\s*)[^<\n]+(<)").ok()?;
    if !re.is_match(text) {
        return None;
    }
    let replacement = format!("${{1}}{}${{2}}", new_version);
    Some(re.replace(text, replacement.as_str()).into_owned())
}
