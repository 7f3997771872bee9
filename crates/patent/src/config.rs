//! Runtime configuration.
//!
//! Everything here can come from a TOML file; every key is optional:
//!
//! ```toml
//! archive_dir = "/data/patents"
//! site = "/etc/patent/site.toml"
//! log_file = "patent_download.log"
//! number_pattern = "^CN\\d{7,12}[A-Z]?$"
//! max_pages = 50
//! max_iterations = 100
//! ```
//!
//! Binaries layer their own overrides (flags, environment) on top of the loaded values.

use std::sync::OnceLock;

use crate::{
  search::DEFAULT_MAX_ITERATIONS,
  site::SiteClient,
  validate::{Validator, DEFAULT_NUMBER_PATTERN},
};

use super::*;

/// How the program was asked to find patents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Search by keyword and act on the result pages
  Keyword,
  /// Download one patent by number
  Direct,
}

impl Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Mode::Keyword => write!(f, "keyword"),
      Mode::Direct => write!(f, "direct"),
    }
  }
}

impl FromStr for Mode {
  type Err = PatentError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_lowercase().as_str() {
      "keyword" => Ok(Mode::Keyword),
      "direct" => Ok(Mode::Direct),
      other => Err(PatentError::Config(format!(
        "Invalid mode \"{other}\", use \"keyword\" or \"direct\""
      ))),
    }
  }
}

/// Paths and limits used by the search and download paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Where downloaded PDFs live
  pub archive_dir:    PathBuf,
  /// Site description file
  pub site:           PathBuf,
  /// Log file, relative to the working directory unless absolute
  pub log_file:       PathBuf,
  /// Accepted patent number format
  pub number_pattern: String,
  /// Page bound for bulk downloads
  pub max_pages:      u32,
  /// Page bound for one keyword search loop
  pub max_iterations: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      archive_dir:    Archive::default_path(),
      site:           Self::default_site_path(),
      log_file:       PathBuf::from("patent_download.log"),
      number_pattern: DEFAULT_NUMBER_PATTERN.to_string(),
      max_pages:      SiteClient::DEFAULT_MAX_PAGES,
      max_iterations: DEFAULT_MAX_ITERATIONS,
    }
  }
}

impl Config {
  /// Directory holding the configuration files.
  ///
  /// - On Unix: `~/.config/patent`
  /// - On macOS: `~/Library/Application Support/patent`
  /// - On Windows: `%APPDATA%\patent`
  /// - Fallback: `./.patent`
  pub fn default_dir() -> PathBuf {
    dirs::config_dir().map(|dir| dir.join("patent")).unwrap_or_else(|| PathBuf::from(".patent"))
  }

  /// Default location of the configuration file.
  pub fn default_path() -> PathBuf { Self::default_dir().join("config.toml") }

  /// Default location of the site description.
  pub fn default_site_path() -> PathBuf { Self::default_dir().join("site.toml") }

  /// Loads configuration.
  ///
  /// With an explicit `path` the file must exist. Without one, [`Config::default_path`] is
  /// used if present and the defaults otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let path = match path {
      Some(path) => path.to_path_buf(),
      None => {
        let path = Self::default_path();
        if !path.is_file() {
          debug!("No configuration at {}, using defaults", path.display());
          return Ok(Self::default());
        }
        path
      },
    };
    debug!("Loading configuration from {}", path.display());
    std::fs::read_to_string(&path)?.parse()
  }

  /// Sets the archive directory.
  pub fn with_archive_dir(mut self, archive_dir: impl Into<PathBuf>) -> Self {
    self.archive_dir = archive_dir.into();
    self
  }

  /// Sets the site description file.
  pub fn with_site(mut self, site: impl Into<PathBuf>) -> Self {
    self.site = site.into();
    self
  }

  /// Sets the log file.
  pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
    self.log_file = log_file.into();
    self
  }

  /// The archive this configuration points at.
  pub fn archive(&self) -> Archive { Archive::new(&self.archive_dir) }

  /// A validator for the configured number pattern.
  pub fn validator(&self) -> Result<Validator> { Validator::new(&self.number_pattern) }

  /// A site client for the configured site, bounded by `max_pages`.
  pub fn site_client(&self) -> Result<SiteClient> {
    if !self.site.is_file() {
      return Err(PatentError::Config(format!(
        "No site description at {}, pass one with --site or PATENT_SITE_CONFIG",
        self.site.display()
      )));
    }
    let site = site::SiteConfig::from_file(&self.site)?;
    Ok(SiteClient::new(site, self.archive())?.with_max_pages(self.max_pages))
  }

  /// A site client that is only built when a page or document is first requested.
  ///
  /// Paths that may finish without touching the network (validation, archive hits) work even
  /// when the site description is missing.
  pub fn lazy_site_client(&self) -> LazySiteClient<'_> {
    LazySiteClient { config: self, client: OnceLock::new() }
  }
}

/// [`SiteClient`] built from a [`Config`] on first use. See [`Config::lazy_site_client`].
#[derive(Debug)]
pub struct LazySiteClient<'a> {
  /// Where the client comes from
  config: &'a Config,
  /// The client, once built
  client: OnceLock<SiteClient>,
}

impl LazySiteClient<'_> {
  /// Builds the client on the first call.
  ///
  /// # Errors
  ///
  /// The errors of [`Config::site_client`]. A failed build is retried on the next call.
  pub fn client(&self) -> Result<&SiteClient> {
    if let Some(client) = self.client.get() {
      return Ok(client);
    }
    let client = self.config.site_client()?;
    Ok(self.client.get_or_init(|| client))
  }

  /// Whether the client has been built.
  pub fn is_built(&self) -> bool { self.client.get().is_some() }
}

#[async_trait]
impl PatentInfoProvider for LazySiteClient<'_> {
  async fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<PatentRecord>> {
    self.client()?.fetch_page(keyword, page).await
  }
}

#[async_trait]
impl PatentDocumentFetcher for LazySiteClient<'_> {
  async fn fetch_one(&self, number: &str) -> Result<bool> { self.client()?.fetch_one(number).await }

  async fn fetch_all(&self, keyword: &str) -> Result<DownloadOutcome> {
    self.client()?.fetch_all(keyword).await
  }
}

impl FromStr for Config {
  type Err = PatentError;

  fn from_str(s: &str) -> Result<Self> { Ok(toml::from_str(s)?) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::direct::{DirectDownload, DirectOutcome};

  #[test]
  fn test_mode_parsing() {
    assert_eq!("keyword".parse::<Mode>().unwrap(), Mode::Keyword);
    assert_eq!(" DIRECT ".parse::<Mode>().unwrap(), Mode::Direct);
    assert!(matches!("browse".parse::<Mode>(), Err(PatentError::Config(_))));
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let config: Config = r#"
      archive_dir = "/data/patents"
      max_pages = 5
    "#
    .parse()
    .unwrap();

    assert_eq!(config.archive_dir, PathBuf::from("/data/patents"));
    assert_eq!(config.max_pages, 5);
    assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    assert_eq!(config.number_pattern, DEFAULT_NUMBER_PATTERN);
    assert_eq!(config.log_file, PathBuf::from("patent_download.log"));
  }

  #[test]
  fn test_bundled_example_parses() {
    const EXAMPLE: &str = include_str!("../../../config/config.example.toml");
    let config: Config = EXAMPLE.parse().unwrap();
    assert_eq!(config.number_pattern, DEFAULT_NUMBER_PATTERN);
    assert!(config.validator().unwrap().validate("CN1234567A").is_valid());
  }

  #[test]
  fn test_load_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "number_pattern = '^\\d+$'\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert!(config.validator().unwrap().validate("12345").is_valid());
    assert!(!config.validator().unwrap().validate("CN1234567A").is_valid());
  }

  #[test]
  fn test_missing_explicit_file_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(Config::load(Some(missing.as_path())), Err(PatentError::Io(_))));
  }

  #[test]
  fn test_missing_site_is_config_error() {
    let dir = tempdir().unwrap();
    let config = Config::default().with_site(dir.path().join("site.toml"));
    assert!(matches!(config.site_client(), Err(PatentError::Config(_))));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_lazy_client_not_built_for_archived_number() {
    let dir = tempdir().unwrap();
    let config = Config::default()
      .with_site(dir.path().join("missing.toml"))
      .with_archive_dir(dir.path().join("pdfs"));
    let archive = config.archive();
    archive.ensure_dir().unwrap();
    std::fs::write(archive.path_for("CN1234567A"), b"%PDF-1.5").unwrap();
    let validator = config.validator().unwrap();
    let client = config.lazy_site_client();
    let direct = DirectDownload::new(&validator, &archive, &client);

    let archived = direct.run("CN1234567A").await;
    let rejected = direct.run("bad-1").await;

    assert!(matches!(archived, DirectOutcome::Completed(FetchReport::AlreadyArchived(_))));
    assert!(matches!(rejected, DirectOutcome::Rejected(_)));
    assert!(!client.is_built());
    assert!(logs_contain("CN1234567A already archived"));
    assert!(logs_contain("Patent number format is incorrect"));
  }

  #[tokio::test]
  async fn test_lazy_client_reports_missing_site_on_download() {
    let dir = tempdir().unwrap();
    let config = Config::default()
      .with_site(dir.path().join("missing.toml"))
      .with_archive_dir(dir.path().join("pdfs"));
    let client = config.lazy_site_client();

    let result = client.fetch_one("CN1234567A").await;

    assert!(matches!(result, Err(PatentError::Config(_))));
    assert!(!client.is_built());
  }

  #[test]
  fn test_site_client_from_file() {
    let dir = tempdir().unwrap();
    let site = dir.path().join("site.toml");
    std::fs::write(
      &site,
      r#"
        name = "example"
        search_template = "https://example.com/s?q={keyword}&p={page}"
        pdf_template = "https://example.com/{number}.pdf"
        [results]
        type = "html"
        item = "li"
        number = ".pn"
        title = "h3"
      "#,
    )
    .unwrap();
    let config = Config::default().with_site(&site).with_archive_dir(dir.path().join("pdfs"));

    let client = config.site_client().unwrap();

    assert_eq!(client.config().name, "example");
    assert_eq!(client.archive().dir(), dir.path().join("pdfs"));
  }
}
