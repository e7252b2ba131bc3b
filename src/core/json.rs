//! JSON helpers for translation documents.
//!
//! Translation text is edited by hand, so parsing is always fallible. The
//! helpers here make the fallback explicit: [`try_parse`] reports the error,
//! [`parse_object_or_empty`] substitutes an empty object for anything that is
//! not a JSON object.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid JSON: {0}")]
pub struct JsonParseError(#[from] serde_json::Error);

pub fn try_parse(content: &str) -> Result<Value, JsonParseError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse `content` as a JSON object, falling back to an empty object.
///
/// Malformed text and non-object documents (arrays, strings, ...) both
/// yield `{}`. Gap analysis and field insertion rely on this fallback.
pub fn parse_object_or_empty(content: &str) -> Map<String, Value> {
    match try_parse(content) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Re-indent `content` with two spaces, or return it untouched if it does not parse.
pub fn format_json(content: &str) -> String {
    match try_parse(content) {
        Ok(value) => to_pretty(&value).unwrap_or_else(|| content.to_string()),
        Err(_) => content.to_string(),
    }
}

fn to_pretty(value: &Value) -> Option<String> {
    serde_json::to_string_pretty(value).ok()
}

/// A translation document flattened to dot-joined key paths.
///
/// Objects are descended; everything else (strings, numbers, booleans, null
/// and arrays) is a leaf. Empty objects contribute no keys. Key order follows
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatDocument {
    entries: Map<String, Value>,
}

impl FlatDocument {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut entries = Map::new();
        for (key, value) in object {
            flatten_value(value, key.clone(), &mut entries);
        }
        Self { entries }
    }

    /// Flatten raw text. Unparseable text flattens to zero keys.
    pub fn parse(content: &str) -> Self {
        Self::from_object(&parse_object_or_empty(content))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_value(value: &Value, prefix: String, result: &mut Map<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(val, new_prefix, result);
            }
        }
        // A dotted key and a nested path can collide; the first one wins.
        leaf => {
            result.entry(prefix).or_insert_with(|| leaf.clone());
        }
    }
}

/// Outcome of [`insert_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInsert {
    /// The field did not exist and was created.
    Added,
    /// The field already existed; its value was kept.
    AlreadyPresent,
    /// An intermediate segment holds a non-object value; nothing was changed.
    Conflict,
}

impl FieldInsert {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldInsert::Added => "added",
            FieldInsert::AlreadyPresent => "alreadyPresent",
            FieldInsert::Conflict => "conflict",
        }
    }
}

/// Set the dot-separated `path` to `value` unless it is already present.
///
/// Intermediate objects are created as needed. When the field is added the
/// document is re-serialized with two-space indentation; otherwise `content`
/// comes back untouched. Malformed input is treated as `{}`.
pub fn insert_field(content: &str, path: &str, value: Value) -> (String, FieldInsert) {
    let mut root = parse_object_or_empty(content);
    let action = insert_into(&mut root, path, value);
    if action != FieldInsert::Added {
        return (content.to_string(), action);
    }
    let rendered = to_pretty(&Value::Object(root)).unwrap_or_else(|| content.to_string());
    (rendered, action)
}

fn insert_into(root: &mut Map<String, Value>, path: &str, value: Value) -> FieldInsert {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return FieldInsert::Conflict;
    };

    let mut current = root;
    for part in parents {
        let next = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match next {
            Value::Object(map) => current = map,
            _ => return FieldInsert::Conflict,
        }
    }

    if current.contains_key(*last) {
        FieldInsert::AlreadyPresent
    } else {
        current.insert(last.to_string(), value);
        FieldInsert::Added
    }
}
