use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const RESOURCE_URI_PREFIX: &str = "stdict://entry/";

/// Custom deserializer: accepts a target code as a JSON number or a numeric string
pub fn deserialize_target_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid target_code: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid target_code: {:?}", s))),
        other => Err(serde::de::Error::custom(format!(
            "target_code must be an integer, got {}",
            other
        ))),
    }
}

/// Resource URI hint for an entry.
pub fn entry_resource_uri(target_code: i64) -> String {
    format!("{}{}", RESOURCE_URI_PREFIX, target_code)
}

// Search models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Advanced {
    #[default]
    #[serde(rename = "n")]
    No,
    #[serde(rename = "y")]
    Yes,
}

impl Advanced {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advanced::No => "n",
            Advanced::Yes => "y",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "n" => Some(Advanced::No),
            "y" => Some(Advanced::Yes),
            _ => None,
        }
    }
}

/// Search request after clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub q: String,
    pub start: i64,
    pub num: i64,
    pub advanced: Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub target_code: Option<i64>,
    pub word: Option<String>,
    pub pos: Option<String>,
    pub definition: Option<String>,
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub sense_type: Option<String>,
    pub resource_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: i64,
    pub start: i64,
    pub num: i64,
    pub items: Vec<SearchResultItem>,
}

// Entry models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(rename = "type")]
    pub sense_type: Option<String>,
    pub definition: Option<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub target_code: i64,
    pub word: Option<String>,
    pub pos: String,
    pub senses: Vec<Sense>,
}

/// Entry plus its resource URI, as returned by the `stdict_entry` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDocument {
    #[serde(flatten)]
    pub entry: Entry,
    pub resource_uri: String,
}

impl From<Entry> for EntryDocument {
    fn from(entry: Entry) -> Self {
        let resource_uri = entry_resource_uri(entry.target_code);
        Self {
            entry,
            resource_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Args {
        #[serde(deserialize_with = "deserialize_target_code")]
        target_code: i64,
    }

    #[test]
    fn test_target_code_from_number_and_string() {
        let args: Args = serde_json::from_value(json!({"target_code": 435977})).unwrap();
        assert_eq!(args.target_code, 435977);
        let args: Args = serde_json::from_value(json!({"target_code": " 435977"})).unwrap();
        assert_eq!(args.target_code, 435977);
    }

    #[test]
    fn test_target_code_rejects_other_shapes() {
        assert!(serde_json::from_value::<Args>(json!({"target_code": "abc"})).is_err());
        assert!(serde_json::from_value::<Args>(json!({"target_code": 1.5})).is_err());
        assert!(serde_json::from_value::<Args>(json!({"target_code": null})).is_err());
    }

    #[test]
    fn test_advanced_round_trip() {
        assert_eq!(Advanced::parse("y"), Some(Advanced::Yes));
        assert_eq!(Advanced::parse("Y"), None);
        assert_eq!(Advanced::default().as_str(), "n");
        let parsed: Advanced = serde_json::from_value(json!("y")).unwrap();
        assert_eq!(parsed, Advanced::Yes);
    }

    #[test]
    fn test_entry_document_flattens_entry() {
        let doc = EntryDocument::from(Entry {
            target_code: 7,
            word: Some("사랑".to_string()),
            pos: "명사".to_string(),
            senses: vec![Sense {
                sense_type: None,
                definition: Some("뜻".to_string()),
                examples: vec![],
            }],
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["target_code"], 7);
        assert_eq!(value["resource_uri"], "stdict://entry/7");
        assert_eq!(value["senses"][0]["type"], Value::Null);
        assert_eq!(value["senses"][0]["definition"], "뜻");
    }
}
