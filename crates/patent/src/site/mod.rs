//! HTTP implementation of the search and download collaborators.
//!
//! A search site is described by a TOML file instead of code, so a change in a site's markup
//! is a configuration change. The description names:
//!
//! - how to build a search page URL (`search_template`, with `{keyword}` and `{page}`)
//! - how to build a document URL (`pdf_template`, with `{number}`)
//! - how to read patent numbers and titles out of a results page ([`ResultFormat`])
//!
//! # Examples
//!
//! JSON search API:
//!
//! ```toml
//! name = "example"
//! search_template = "https://patents.example.com/api/search?q={keyword}&page={page}"
//! pdf_template = "https://patents.example.com/pdf/{number}.pdf"
//!
//! [headers]
//! User-Agent = "Mozilla/5.0"
//!
//! [results]
//! type = "json"
//! list = "data/results"
//! number = "publication_number"
//! title = "title"
//! ```
//!
//! HTML results page:
//!
//! ```toml
//! [results]
//! type = "html"
//! item = "ul.results > li"
//! number = ".pn"
//! title = "h3"
//! ```

use std::{collections::BTreeMap, time::Duration};

use reqwest::{StatusCode, Url};

use super::*;

mod html;
mod json;

pub use self::{html::HtmlResults, json::JsonResults};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Description of a patent search site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
  /// Name used in logs
  pub name:            String,
  /// Search page URL with `{keyword}` and `{page}` placeholders
  pub search_template: String,
  /// Document URL with a `{number}` placeholder
  pub pdf_template:    String,
  /// Extra HTTP headers sent with every request
  #[serde(default)]
  pub headers:         BTreeMap<String, String>,
  /// Request timeout in seconds
  #[serde(default = "default_timeout")]
  pub timeout_secs:    u64,
  /// How to read a results page
  pub results:         ResultFormat,
}

/// Available results page parsers.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ResultFormat {
  /// JSON search API
  #[serde(rename = "json")]
  Json(JsonResults),
  /// HTML results page
  #[serde(rename = "html")]
  Html(HtmlResults),
}

/// Turns the body of a results page into records.
pub trait ResultParser {
  /// Parses `body`. Entries without a patent number are skipped.
  fn parse_records(&self, body: &[u8]) -> Result<Vec<PatentRecord>>;
}

impl ResultParser for ResultFormat {
  fn parse_records(&self, body: &[u8]) -> Result<Vec<PatentRecord>> {
    match self {
      ResultFormat::Json(results) => results.parse_records(body),
      ResultFormat::Html(results) => results.parse_records(body),
    }
  }
}

impl SiteConfig {
  /// Reads a site description from a TOML file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    content.parse()
  }

  /// URL of page `page` of the results for `keyword`. The keyword is URL-encoded.
  pub fn search_url(&self, keyword: &str, page: u32) -> Result<Url> {
    let keyword: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    let url =
      self.search_template.replace("{keyword}", &keyword).replace("{page}", &page.to_string());
    Url::parse(&url).map_err(|e| {
      PatentError::Config(format!("Invalid search URL \"{url}\" for {}: {e}", self.name))
    })
  }

  /// URL of the document for `number`.
  pub fn pdf_url(&self, number: &str) -> Result<Url> {
    let url = self.pdf_template.replace("{number}", number.trim());
    Url::parse(&url).map_err(|e| {
      PatentError::Config(format!("Invalid document URL \"{url}\" for {}: {e}", self.name))
    })
  }
}

impl FromStr for SiteConfig {
  type Err = PatentError;

  fn from_str(s: &str) -> Result<Self> {
    let config: SiteConfig = toml::from_str(s)?;
    if !config.search_template.contains("{keyword}") {
      return Err(PatentError::Config(format!(
        "search_template for {} has no {{keyword}} placeholder",
        config.name
      )));
    }
    if !config.pdf_template.contains("{number}") {
      return Err(PatentError::Config(format!(
        "pdf_template for {} has no {{number}} placeholder",
        config.name
      )));
    }
    Ok(config)
  }
}

/// Searches a site and downloads its documents into an [`Archive`].
#[derive(Debug, Clone)]
pub struct SiteClient {
  /// The site description
  config:    SiteConfig,
  /// Where documents are written
  archive:   Archive,
  /// Shared HTTP client
  client:    reqwest::Client,
  /// Page bound for bulk downloads
  max_pages: u32,
}

impl SiteClient {
  /// Default page bound for [`PatentDocumentFetcher::fetch_all`].
  pub const DEFAULT_MAX_PAGES: u32 = 50;

  /// Creates a client for `config` writing into `archive`.
  pub fn new(config: SiteConfig, archive: Archive) -> Result<Self> {
    let client =
      reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { config, archive, client, max_pages: Self::DEFAULT_MAX_PAGES })
  }

  /// Bounds the number of pages a bulk download walks.
  pub fn with_max_pages(mut self, max_pages: u32) -> Self {
    self.max_pages = max_pages.max(1);
    self
  }

  /// The site description.
  pub fn config(&self) -> &SiteConfig { &self.config }

  /// The archive documents are written to.
  pub fn archive(&self) -> &Archive { &self.archive }

  async fn get(&self, url: Url) -> Result<reqwest::Response> {
    let mut request = self.client.get(url);
    for (key, value) in &self.config.headers {
      request = request.header(key, value);
    }
    Ok(request.send().await?)
  }
}

#[async_trait]
impl PatentInfoProvider for SiteClient {
  async fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<PatentRecord>> {
    let url = self.config.search_url(keyword, page)?;
    debug!("Fetching {} results page {page} via: {url}", self.config.name);

    let response = self.get(url).await?;
    let status = response.status();
    if !status.is_success() {
      return Err(PatentError::Provider { page, message: format!("HTTP {status}") });
    }

    let body = response.bytes().await?;
    trace!("{} response: {}", self.config.name, String::from_utf8_lossy(&body));

    self.config.results.parse_records(&body).map_err(|e| match e {
      PatentError::Json(e) => PatentError::Provider { page, message: e.to_string() },
      other => other,
    })
  }
}

#[async_trait]
impl PatentDocumentFetcher for SiteClient {
  async fn fetch_one(&self, number: &str) -> Result<bool> {
    let url = self.config.pdf_url(number)?;
    debug!("Downloading {number} from {url}");

    let response = self.get(url).await?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Ok(false);
    }
    if !status.is_success() {
      trace!("{number} pdf response: {response:?}");
      return Err(PatentError::Fetch { number: number.into(), message: format!("HTTP {status}") });
    }

    let bytes = response.bytes().await?;
    if let Err(e) = lopdf::Document::load_mem(&bytes) {
      debug!("{number} response is not a PDF: {e}");
      return Err(PatentError::InvalidDocument(number.into()));
    }

    self.archive.ensure_dir()?;
    let path = self.archive.path_for(number);
    debug!("Writing PDF to path: {path:?}");
    // Only a complete document may appear under the archived name
    let partial = path.with_extension("pdf.part");
    let written = match tokio::fs::write(&partial, &bytes).await {
      Ok(()) => tokio::fs::rename(&partial, &path).await,
      Err(e) => Err(e),
    };
    if let Err(e) = written {
      tokio::fs::remove_file(&partial).await.ok();
      return Err(e.into());
    }
    Ok(true)
  }

  async fn fetch_all(&self, keyword: &str) -> Result<DownloadOutcome> {
    fetcher::download_all(self, self, &self.archive, keyword, self.max_pages).await
  }
}

fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }

#[cfg(test)]
mod tests {
  use super::*;

  const JSON_SITE: &str = r#"
    name = "example"
    search_template = "https://patents.example.com/search?q={keyword}&page={page}"
    pdf_template = "https://patents.example.com/pdf/{number}.pdf"

    [headers]
    User-Agent = "patent-test"

    [results]
    type = "json"
    list = "results"
    number = "pn"
    title = "title"
  "#;

  #[test]
  fn test_parse_json_site() {
    let site: SiteConfig = JSON_SITE.parse().unwrap();
    assert_eq!(site.name, "example");
    assert_eq!(site.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(site.headers.get("User-Agent").map(String::as_str), Some("patent-test"));
    assert!(matches!(site.results, ResultFormat::Json(ref json) if json.list == "results"));
  }

  #[test]
  fn test_search_url_encodes_keyword() {
    let site: SiteConfig = JSON_SITE.parse().unwrap();
    let url = site.search_url("无人机 电池", 3).unwrap();
    let pairs: BTreeMap<_, _> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs.get("q").map(String::as_str), Some("无人机 电池"));
    assert_eq!(pairs.get("page").map(String::as_str), Some("3"));
  }

  #[test]
  fn test_pdf_url() {
    let site: SiteConfig = JSON_SITE.parse().unwrap();
    assert_eq!(
      site.pdf_url("CN1234567A").unwrap().as_str(),
      "https://patents.example.com/pdf/CN1234567A.pdf"
    );
  }

  #[test]
  fn test_missing_placeholder_is_rejected() {
    let site = JSON_SITE.replace("{number}", "fixed");
    assert!(matches!(site.parse::<SiteConfig>(), Err(PatentError::Config(_))));
    let site = JSON_SITE.replace("{keyword}", "fixed");
    assert!(matches!(site.parse::<SiteConfig>(), Err(PatentError::Config(_))));
  }

  #[test]
  fn test_bundled_example_parses() {
    const EXAMPLE: &str = include_str!("../../../../config/site.example.toml");
    let site: SiteConfig = EXAMPLE.parse().unwrap();
    assert!(matches!(site.results, ResultFormat::Json(_)));
    assert!(site.search_url("drone", 1).is_ok());
  }

  #[test]
  fn test_unknown_result_type_is_rejected() {
    let site = JSON_SITE.replace("type = \"json\"", "type = \"xml\"");
    assert!(matches!(site.parse::<SiteConfig>(), Err(PatentError::TomlDe(_))));
  }
}
