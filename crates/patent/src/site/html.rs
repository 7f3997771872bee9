use scraper::{ElementRef, Html, Selector};

use super::*;

/// Reads records out of an HTML results page with CSS selectors.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlResults {
  /// Selector matching one element per result
  pub item:        String,
  /// Selector, relative to the item, of the element holding the patent number
  pub number:      String,
  /// Attribute to read the number from instead of the element text
  #[serde(default)]
  pub number_attr: Option<String>,
  /// Selector, relative to the item, of the element holding the title
  pub title:       String,
}

impl ResultParser for HtmlResults {
  fn parse_records(&self, body: &[u8]) -> Result<Vec<PatentRecord>> {
    let item = parse_selector(&self.item)?;
    let number = parse_selector(&self.number)?;
    let title = parse_selector(&self.title)?;

    let document = Html::parse_document(&String::from_utf8_lossy(body));

    Ok(
      document
        .select(&item)
        .filter_map(|element| {
          let number = element.select(&number).next().and_then(|found| match &self.number_attr {
            Some(attr) => found.value().attr(attr).map(|v| v.trim().to_string()),
            None => Some(element_text(found)),
          });
          let Some(number) = number.filter(|n| !n.is_empty()) else {
            debug!("Skipping result without a patent number: {}", element_text(element));
            return None;
          };
          let title = element.select(&title).next().map(element_text).unwrap_or_default();
          Some(PatentRecord::new(number, title))
        })
        .collect(),
    )
  }
}

fn parse_selector(selector: &str) -> Result<Selector> {
  Selector::parse(selector).map_err(|_| PatentError::Selector(selector.to_string()))
}

/// Text content with whitespace runs collapsed to single spaces.
fn element_text(element: ElementRef) -> String {
  element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  const PAGE: &str = r#"
    <html><body>
      <ul class="results">
        <li><span class="pn" data-pn="CN1000001A">CN1000001A</span>
          <h3>Drone
              frame</h3></li>
        <li><span class="pn" data-pn="CN1000002A"> CN1000002A </span><h3>Drone battery</h3></li>
        <li><h3>Advertisement</h3></li>
      </ul>
    </body></html>
  "#;

  fn results() -> HtmlResults {
    HtmlResults {
      item:        "ul.results > li".into(),
      number:      ".pn".into(),
      number_attr: None,
      title:       "h3".into(),
    }
  }

  #[test]
  fn test_parse_results_page() {
    let records = results().parse_records(PAGE.as_bytes()).unwrap();
    assert_eq!(records, vec![
      PatentRecord::new("CN1000001A", "Drone frame"),
      PatentRecord::new("CN1000002A", "Drone battery"),
    ]);
  }

  #[test]
  fn test_number_from_attribute() {
    let results = HtmlResults { number_attr: Some("data-pn".into()), ..results() };
    let records = results.parse_records(PAGE.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].number, "CN1000002A");
  }

  #[test]
  fn test_no_matches_is_empty_page() {
    let records = results().parse_records(b"<html><body>Nothing here</body></html>").unwrap();
    assert!(records.is_empty());
  }

  #[test]
  fn test_bad_selector() {
    let results = HtmlResults { item: "ul[".into(), ..results() };
    assert!(matches!(results.parse_records(PAGE.as_bytes()), Err(PatentError::Selector(_))));
  }
}
