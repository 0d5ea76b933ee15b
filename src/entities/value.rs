//! Input value model.
//!
//! `Value` is the tagged union every nested input is converted into before
//! the tree builder sees it. Containers are shared behind `Arc`, so node
//! payloads can hold their own copy of a subtree without deep clones.
//!
//! Key order is the enumeration order of the source document
//! (`serde_json` is built with `preserve_order`).

use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;

/// Longest scalar rendering before it gets an ellipsis.
const MAX_SCALAR_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Arc<Vec<Value>>),
    Keyed(Arc<IndexMap<String, Value>>),
}

impl Value {
    /// Build a keyed value from `(key, value)` pairs, keeping their order.
    pub fn keyed<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Keyed(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a list value.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(Arc::new(items.into_iter().collect()))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Keyed(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Own entries in enumeration order.
    ///
    /// Keyed values yield their keys; lists yield element indices as keys.
    /// Scalars have no entries.
    pub fn entries(&self) -> Vec<(Cow<'_, str>, &Value)> {
        match self {
            Value::Keyed(map) => map
                .iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), v))
                .collect(),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Cow::Owned(i.to_string()), v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Short single-line rendering used on cards.
    ///
    /// Containers collapse to `{n}` / `[n]`, strings are quoted and clipped.
    pub fn preview(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                if s.chars().count() > MAX_SCALAR_CHARS {
                    let clipped: String = s.chars().take(MAX_SCALAR_CHARS - 1).collect();
                    format!("\"{}…\"", clipped)
                } else {
                    format!("\"{}\"", s)
                }
            }
            Value::List(items) => format!("[{}]", items.len()),
            Value::Keyed(map) => format!("{{{}}}", map.len()),
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }

    /// Load a JSON document from disk, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read JSON from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };

        let value = Self::from_json_str(&text)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Keyed(Arc::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}
