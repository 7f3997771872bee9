use serde_json::Value;

use super::*;

/// Reads records out of a JSON search response.
///
/// Paths are `/`-separated object keys; numeric segments index into arrays, so
/// `"results/cluster/0/result"` walks `{"results": {"cluster": [{"result": [...]}]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonResults {
  /// Path to the array of results; empty when the response itself is the array
  #[serde(default)]
  pub list:   String,
  /// Path to the patent number inside a result
  pub number: String,
  /// Path to the title inside a result
  pub title:  String,
}

impl ResultParser for JsonResults {
  fn parse_records(&self, body: &[u8]) -> Result<Vec<PatentRecord>> {
    let json: Value = serde_json::from_slice(body)?;

    let items = match get_path_value(&json, &self.list) {
      Some(Value::Array(items)) => items,
      Some(Value::Null) | None => {
        debug!("No result list at \"{}\", treating page as empty", self.list);
        return Ok(Vec::new());
      },
      Some(other) =>
        return Err(PatentError::Config(format!(
          "Expected an array at \"{}\", found {}",
          self.list,
          json_kind(other)
        ))),
    };

    Ok(
      items
        .iter()
        .filter_map(|item| {
          let Some(number) = get_string(item, &self.number) else {
            debug!("Skipping result without a patent number: {item}");
            return None;
          };
          let title = get_string(item, &self.title).unwrap_or_default();
          Some(PatentRecord::new(number, title))
        })
        .collect(),
    )
  }
}

fn get_path_value<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
  let mut current = json;
  for part in path.split('/').filter(|part| !part.is_empty()) {
    current = match part.parse::<usize>() {
      Ok(index) => current.as_array()?.get(index)?,
      Err(_) => current.get(part)?,
    };
  }
  Some(current)
}

fn get_string(json: &Value, path: &str) -> Option<String> {
  let value = match get_path_value(json, path)? {
    Value::String(s) => s.trim().to_string(),
    Value::Number(n) => n.to_string(),
    Value::Array(arr) => arr.first()?.as_str()?.trim().to_string(),
    _ => return None,
  };
  (!value.is_empty()).then_some(value)
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
