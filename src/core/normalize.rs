//! Normalization of raw dictionary responses
//!
//! The API encodes nested collections inconsistently: a field holding one
//! element is often sent as a bare object rather than a one-element array.
//! Every collection is read through [`as_sequence`], so both encodings produce
//! the same records.

use crate::api::error_codes::{has_error_envelope, humanize_error};
use crate::api::models::{
    Entry, RESOURCE_URI_PREFIX, SearchResult, SearchResultItem, Sense, entry_resource_uri,
};
use crate::error::ApiError;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Object members of `value`: an array yields its objects, a lone non-empty
/// object yields itself, anything else (absent, null, `{}`, scalars) yields
/// nothing. Empty objects inside an array are kept.
pub fn as_sequence(value: Option<&Value>) -> Vec<&Object> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(map)) if !map.is_empty() => vec![map],
        _ => Vec::new(),
    }
}

fn object_field<'a>(map: Option<&'a Object>, key: &str) -> Option<&'a Object> {
    map.and_then(|m| m.get(key)).and_then(Value::as_object)
}

fn string_field(map: &Object, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn integer_field(map: Option<&Object>, key: &str) -> Option<i64> {
    match map?.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_error(raw: &Value) -> Result<(), ApiError> {
    if has_error_envelope(raw) {
        return Err(ApiError::Remote(humanize_error(raw)));
    }
    Ok(())
}

fn search_item(item: &Object) -> SearchResultItem {
    let sense = as_sequence(item.get("sense")).into_iter().next();
    let target_code = integer_field(Some(item), "target_code");
    let resource_uri = match target_code {
        Some(code) => entry_resource_uri(code),
        // Kept as the server historically reported it for items without a code.
        None => format!("{}None", RESOURCE_URI_PREFIX),
    };

    SearchResultItem {
        target_code,
        word: string_field(item, "word"),
        pos: string_field(item, "pos"),
        definition: sense.and_then(|s| string_field(s, "definition")),
        link: sense.and_then(|s| string_field(s, "link")),
        sense_type: sense.and_then(|s| string_field(s, "type")),
        resource_uri,
    }
}

/// Flatten a raw search response.
pub fn normalize_search(
    raw: &Value,
    requested_start: i64,
    requested_num: i64,
) -> Result<SearchResult, ApiError> {
    check_error(raw)?;

    let channel = raw.get("channel").and_then(Value::as_object);
    let items = as_sequence(channel.and_then(|c| c.get("item")))
        .into_iter()
        .map(search_item)
        .collect();

    Ok(SearchResult {
        total: integer_field(channel, "total").unwrap_or(0),
        start: integer_field(channel, "start").unwrap_or(requested_start),
        num: integer_field(channel, "num").unwrap_or(requested_num),
        items,
    })
}

fn sense(block: &Object) -> Sense {
    let examples = as_sequence(block.get("example_info"))
        .into_iter()
        .filter_map(|e| string_field(e, "example"))
        .filter(|e| !e.is_empty())
        .collect();

    Sense {
        sense_type: string_field(block, "type"),
        definition: string_field(block, "definition"),
        examples,
    }
}

/// Flatten a raw view response into one entry.
///
/// `pos` is taken from the first part-of-speech block that has one; senses
/// from every block are kept in order.
pub fn normalize_entry(raw: &Value, target_code: i64) -> Result<Entry, ApiError> {
    check_error(raw)?;

    let channel = raw.get("channel").and_then(Value::as_object);
    let item = object_field(channel, "item");
    let word_info = object_field(item, "word_info");

    let word = word_info.and_then(|wi| string_field(wi, "word"));
    let mut pos = String::new();
    let mut senses = Vec::new();

    for pos_block in as_sequence(word_info.and_then(|wi| wi.get("pos_info"))) {
        if pos.is_empty() {
            if let Some(p) = string_field(pos_block, "pos") {
                pos = p;
            }
        }

        for pattern in as_sequence(pos_block.get("comm_pattern_info")) {
            senses.extend(as_sequence(pattern.get("sense_info")).into_iter().map(sense));
        }
    }

    Ok(Entry {
        target_code,
        word,
        pos,
        senses,
    })
}
