//! Patent search, pagination and PDF retrieval library.
//!
//! `patent` drives a patent-search site from either a keyword query or a direct patent number,
//! providing:
//!
//! - Paginated keyword search through a pluggable [`provider::PatentInfoProvider`]
//! - Deduplication against a local PDF [`archive::Archive`]
//! - Single and bulk document retrieval through a [`fetcher::PatentDocumentFetcher`]
//! - A menu-driven search state machine ([`search::SearchController`]) and a direct download
//!   path ([`direct::DirectDownload`])
//! - A configuration-driven HTTP implementation of both collaborators ([`site::SiteClient`])
//!
//! # Getting Started
//!
//! ```no_run
//! use patent::{
//!   archive::Archive,
//!   decision::ScriptedDecisions,
//!   search::{SearchController, SearchSession},
//!   site::{SiteClient, SiteConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let archive = Archive::new("pdfs");
//!   let site = SiteConfig::from_file("site.toml")?;
//!   let client = SiteClient::new(site, archive.clone())?;
//!
//!   // Download everything matching the keyword
//!   let mut decisions = ScriptedDecisions::parse("0");
//!   let mut controller =
//!     SearchController::new(SearchSession::new("drone"), &client, &client, &archive);
//!   let outcome = controller.run(&mut decisions).await?;
//!   println!("{outcome:?}");
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`record`]: Search result and bulk outcome types
//! - [`validate`]: Patent number format validation
//! - [`archive`]: Local PDF archive lookups
//! - [`provider`] / [`fetcher`]: Collaborator traits for search pages and documents
//! - [`download`]: The shared dedup-then-fetch sequence
//! - [`decision`]: Menu decisions and where they come from
//! - [`search`] / [`direct`]: The two orchestration paths
//! - [`site`]: HTTP implementation driven by a TOML site description
//! - [`config`]: Runtime configuration
//! - [`prelude`]: Common traits and types for ergonomic imports
//!
//! # Logging
//!
//! The library only emits [`tracing`] events and never installs a subscriber. Binaries decide
//! where events go.

#![warn(missing_docs)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod archive;
pub mod config;
pub mod decision;
pub mod direct;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod record;
pub mod search;
pub mod site;
pub mod validate;

#[cfg(test)] mod testing;

use crate::{
  archive::Archive, download::FetchReport, error::*, fetcher::PatentDocumentFetcher,
  provider::PatentInfoProvider, record::*, search::SearchSession,
};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use patent::prelude::*;
///
/// async fn first_page(provider: &impl PatentInfoProvider) -> Result<usize, PatentError> {
///   Ok(provider.fetch_page("drone", 1).await?.len())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    decision::DecisionSource, error::PatentError, fetcher::PatentDocumentFetcher,
    provider::PatentInfoProvider,
  };
}
