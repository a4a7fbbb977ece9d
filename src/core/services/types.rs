use crate::api::models::{SearchParams, deserialize_target_code};
use crate::utils::validation::{clamp_num, clamp_start, validate_advanced};
use serde::Deserialize;

fn default_start() -> i64 {
    1
}

fn default_num() -> i64 {
    10
}

fn default_advanced() -> String {
    "n".to_string()
}

/// Arguments of the search operation, as sent by a host or the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub q: String,
    #[serde(default = "default_start")]
    pub start: i64,
    #[serde(default = "default_num")]
    pub num: i64,
    #[serde(default = "default_advanced")]
    pub advanced: String,
}

impl SearchArgs {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            start: default_start(),
            num: default_num(),
            advanced: default_advanced(),
        }
    }

    /// Clamp the window and validate `advanced`.
    pub fn into_params(self) -> crate::Result<SearchParams> {
        Ok(SearchParams {
            advanced: validate_advanced(&self.advanced)?,
            start: clamp_start(self.start),
            num: clamp_num(self.num),
            q: self.q,
        })
    }
}

/// Arguments of the entry operation.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryArgs {
    #[serde(deserialize_with = "deserialize_target_code")]
    pub target_code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Advanced;
    use serde_json::json;

    #[test]
    fn test_search_args_defaults() {
        let args: SearchArgs = serde_json::from_value(json!({"q": "사랑"})).unwrap();
        let params = args.into_params().unwrap();
        assert_eq!(params.q, "사랑");
        assert_eq!(params.start, 1);
        assert_eq!(params.num, 10);
        assert_eq!(params.advanced, Advanced::No);
    }

    #[test]
    fn test_search_args_clamping() {
        let args: SearchArgs =
            serde_json::from_value(json!({"q": "a", "start": 0, "num": 5, "advanced": "y"}))
                .unwrap();
        let params = args.into_params().unwrap();
        assert_eq!(params.start, 1);
        assert_eq!(params.num, 10);
        assert_eq!(params.advanced, Advanced::Yes);

        let mut args = SearchArgs::new("a");
        args.num = 500;
        assert_eq!(args.into_params().unwrap().num, 100);
    }

    #[test]
    fn test_search_args_invalid_advanced() {
        let mut args = SearchArgs::new("a");
        args.advanced = "x".to_string();
        assert!(args.into_params().is_err());
    }

    #[test]
    fn test_search_args_requires_q() {
        assert!(serde_json::from_value::<SearchArgs>(json!({"num": 10})).is_err());
    }

    #[test]
    fn test_entry_args() {
        let args: EntryArgs = serde_json::from_value(json!({"target_code": "435977"})).unwrap();
        assert_eq!(args.target_code, 435977);
    }
}
