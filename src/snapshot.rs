//! Snapshot aggregation and output
//!
//! The snapshot maps request keys (the literal path plus query string that
//! was requested) to response bodies. Localized responses live one level
//! deeper, under their language tag. Request keys always start with `/`,
//! language tags never do, so the two partitions cannot collide.
//!
//! Key order follows insertion order; writing an existing key replaces the
//! value in place.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::dump::paths::{NETWORK_CONNECTIONS_PATH, SOFTWARE_CONFIG_PATH};
use crate::error::{DumpError, DumpResult};

/// Aggregated responses of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    root: Map<String, Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response under its request key
    pub fn record(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if self.root.insert(key.clone(), value).is_some() {
            debug!(key = %key, "Overwriting snapshot entry");
        }
    }

    /// Record a localized response under `language` and its request key
    pub fn record_localized(&mut self, language: &str, key: impl Into<String>, value: Value) {
        let partition = self
            .root
            .entry(language.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !partition.is_object() {
            *partition = Value::Object(Map::new());
        }
        if let Value::Object(map) = partition {
            map.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn get_localized(&self, language: &str, key: &str) -> Option<&Value> {
        self.root.get(language).and_then(|p| p.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.root.keys()
    }

    /// Language tags that have a partition
    pub fn languages(&self) -> Vec<&str> {
        self.root
            .keys()
            .filter(|k| !k.starts_with('/'))
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_json_pretty(&self) -> DumpResult<String> {
        let mut text = serde_json::to_string_pretty(&self.root)?;
        text.push('\n');
        Ok(text)
    }

    /// Parse a previously serialized snapshot
    pub fn from_json(text: &str) -> DumpResult<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DumpError::InvalidResponse(format!(
                "snapshot must be a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Advisory checks over the finished snapshot
    pub fn sanity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(config) = self.get(SOFTWARE_CONFIG_PATH) {
            if config.get("product").map(Value::is_null).unwrap_or(true) {
                warnings.push("No product is selected".to_string());
            }
        }

        let connections = self
            .get(NETWORK_CONNECTIONS_PATH)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        if connections == 0 {
            warnings.push("No network connections were recorded".to_string());
        }

        if self.languages().is_empty() {
            warnings.push("No localized data was recorded".to_string());
        }

        warnings
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Destination of the serialized snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    /// Write the serialized snapshot
    pub async fn emit(&self, text: &str) -> DumpResult<()> {
        match self {
            OutputSink::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.flush().await?;
            }
            OutputSink::File(path) => {
                tokio::fs::write(path, text).await?;
                info!(path = %path.display(), "Snapshot written");
            }
        }
        Ok(())
    }
}
