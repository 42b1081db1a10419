use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename looked for next to the invocation when --config is not given
pub const DEFAULT_CONFIG_FILE: &str = "bbsync.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the website working tree (a git checkout)
    #[serde(default = "default_website_dir")]
    pub website_dir: PathBuf,
    /// Release directory containing the tool shell scripts and metadata
    #[serde(default = "default_tools_dir")]
    pub tools_dir: PathBuf,
    /// Release metadata file, relative to tools_dir
    #[serde(default = "default_release_file")]
    pub release_file: String,
    /// Website entry page, relative to website_dir
    #[serde(default = "default_entry_file")]
    pub entry_file: String,
    /// Version record artifact, relative to website_dir
    #[serde(default = "default_record_file")]
    pub record_file: String,
    /// Generated tool documentation pages, relative to website_dir
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
    #[serde(default = "default_remote_account")]
    pub account: String,
    #[serde(default = "default_remote_repo")]
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_website_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_tools_dir() -> PathBuf {
    PathBuf::from("../bbmap")
}

fn default_release_file() -> String {
    "README.md".to_string()
}

fn default_entry_file() -> String {
    "index.html".to_string()
}

fn default_record_file() -> String {
    "data/version.json".to_string()
}

fn default_pages_dir() -> String {
    "tools".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_remote_account() -> String {
    "bbushnell".to_string()
}

fn default_remote_repo() -> String {
    "bbmap_website".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            website_dir: default_website_dir(),
            tools_dir: default_tools_dir(),
            release_file: default_release_file(),
            entry_file: default_entry_file(),
            record_file: default_record_file(),
            pages_dir: default_pages_dir(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: default_remote_name(),
            account: default_remote_account(),
            repo: default_remote_repo(),
            branch: default_branch(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, from bbsync.toml in the
    /// current directory if present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Absolute-or-relative path to the release metadata file
    pub fn release_path(&self) -> PathBuf {
        self.tools_dir.join(&self.release_file)
    }

    pub fn entry_path(&self) -> PathBuf {
        self.website_dir.join(&self.entry_file)
    }

    pub fn record_path(&self) -> PathBuf {
        self.website_dir.join(&self.record_file)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.website_dir.join(&self.pages_dir)
    }
}

impl RemoteConfig {
    /// Clone URL used when bootstrapping a missing remote
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.account, self.repo)
    }
}
