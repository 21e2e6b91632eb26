use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A force record exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoliceForce {
    pub data: Map<String, Value>,
}

impl PoliceForce {
    /// The join key for `/forces/{id}`. Numeric ids are accepted as well.
    pub fn id(&self) -> Option<String> {
        match self.data.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for PoliceForce {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// One entry of a force's `engagement_methods`. Kept as raw JSON since
/// forces populate different fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngagementMethod {
    pub raw: Value,
}

impl EngagementMethod {
    pub fn url(&self) -> Option<&str> {
        self.raw.get("url").and_then(Value::as_str)
    }

    /// The `type` field.
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    /// Every non-empty string carried by this record.
    pub fn string_values(&self) -> Vec<&str> {
        let mut values = Vec::new();
        match &self.raw {
            Value::Object(fields) => {
                for value in fields.values() {
                    collect_strings(value, &mut values);
                }
            }
            other => collect_strings(other, &mut values),
        }
        values
    }
}

// 只展開一層陣列，巢狀物件不處理
fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) if !s.is_empty() => out.push(s),
        Value::Array(items) => out.extend(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty()),
        ),
        _ => {}
    }
}

impl From<Value> for EngagementMethod {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub engagement_method: String,
    pub forces_listed: usize,
    pub matching_forces: Vec<PoliceForce>,
    pub report: String,
}
