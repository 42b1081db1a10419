pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod git;
pub mod pages;
pub mod prompt;
pub mod record;
pub mod sync;

pub use config::Config;
pub use error::{Error, Result};
