//! `bbsync status` — read-only inspection of the sync state
//!
//! Shows both versions, the last recorded sync, and any uncommitted
//! changes in the website tree. Never mutates anything.

use crate::config::Config;
use crate::extract;
use crate::git::{GitRepo, SiteRepo};
use crate::record::VersionRecord;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

pub fn status_command(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    let release = fs::read_to_string(config.release_path())
        .ok()
        .and_then(|text| extract::release_version(&text));
    let published = fs::read_to_string(config.entry_path())
        .ok()
        .and_then(|text| extract::published_version(&text));

    print_version("Release version", release.as_deref());
    print_version("Published version", published.as_deref());

    match (&release, &published) {
        (Some(r), Some(p)) if r == p => {
            println!("{} Versions are in sync", "✓".green().bold());
        }
        (Some(_), Some(_)) => {
            println!("{} Versions differ; run `bbsync sync` to update", "!".yellow().bold());
        }
        _ => {
            println!("{} Could not read both versions", "✗".red().bold());
        }
    }

    match VersionRecord::load(&config.record_path()) {
        Some(record) => println!("Last sync: {} on {}", record.version, record.date),
        None => println!("Last sync: no record at {}", config.record_path().display()),
    }

    match GitRepo::open(&config.website_dir) {
        Ok(mut repo) => {
            let summary = repo
                .status_summary()
                .context("Failed to read the website tree status")?;
            if summary.is_empty() {
                println!("Working tree clean");
            } else {
                println!("{} uncommitted change(s):", summary.len());
                for line in summary {
                    println!("{}", line);
                }
            }
        }
        Err(_) => {
            println!(
                "{} is not a git repository yet (sync will initialize it)",
                config.website_dir.display()
            );
        }
    }

    Ok(())
}

fn print_version(label: &str, version: Option<&str>) {
    match version {
        Some(v) => println!("{:<18} {}", format!("{}:", label), v),
        None => println!("{:<18} {}", format!("{}:", label), "(not found)".dimmed()),
    }
}
