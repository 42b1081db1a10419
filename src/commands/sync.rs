//! `bbsync sync` — the full sync & publish pass

use crate::config::Config;
use crate::git::GitRepo;
use crate::prompt::{AssumeYes, Confirm, StdinPrompt};
use crate::sync::{self, SyncAction};
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::path::Path;

pub fn sync_command(config_path: Option<&Path>, yes: bool, message: Option<String>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("Website:  {}", config.website_dir.display());
    println!("Release:  {}", config.release_path().display());

    let mut repo = GitRepo::open_or_init(&config.website_dir, &config.remote.branch)
        .context("Failed to open the website repository")?;

    let mut prompt: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes { message })
    } else {
        Box::new(StdinPrompt)
    };

    let today = Local::now().date_naive();
    let report = match sync::run(&config, &mut repo, prompt.as_mut(), today) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
            if let Some(hint) = err.remediation() {
                eprintln!("  {}", hint.yellow());
            }
            return Err(err.into());
        }
    };

    match &report.action {
        SyncAction::AlreadySynchronized => {
            println!(
                "{} Website already shows version {}",
                "✓".green().bold(),
                report.release.bold()
            );
        }
        SyncAction::Updated { pages_rewritten } => {
            println!(
                "{} Updated website from {} to {} ({} tool page(s) rewritten)",
                "✓".green().bold(),
                report.published,
                report.release.bold(),
                pages_rewritten
            );
        }
        SyncAction::Declined => {
            println!(
                "{} Version update declined (website still shows '{}')",
                "·".yellow(),
                report.published
            );
        }
    }

    if report.remote_bootstrapped {
        println!(
            "  Initialized remote '{}' -> {}",
            config.remote.name,
            config.remote.url()
        );
    }
    println!(
        "{} Pushed {} to {}",
        "✓".green().bold(),
        config.remote.branch,
        config.remote.name
    );

    if report.coverage.lagging() {
        println!(
            "{} {} of {} tool scripts have no documentation page; run generate_tool_pages.py to catch up",
            "!".yellow().bold(),
            report.coverage.missing(),
            report.coverage.scripts
        );
    }

    Ok(())
}
