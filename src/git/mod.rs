//! Git repository capability for the website working tree

pub mod repo;

pub use repo::{GitRepo, SiteRepo};
