//! OpenAPI directory loader
//!
//! Reads every `*.json` document of a directory in file-name order and keeps
//! the declaration order of each document's `paths`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::openapi::models::{ApiDocument, EndpointSpec, ParameterSpec};

/// Load all OpenAPI JSON documents found in `dir`
pub async fn load_spec_dir(dir: &Path) -> Result<Vec<ApiDocument>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading OpenAPI directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("listing OpenAPI directory {}", dir.display()))?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading OpenAPI document {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing OpenAPI document {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = parse_document(&name, &value)?;
        debug!(
            document = %document.name,
            endpoints = document.endpoints.len(),
            "Loaded OpenAPI document"
        );
        documents.push(document);
    }

    info!(documents = documents.len(), dir = %dir.display(), "OpenAPI documents loaded");
    Ok(documents)
}

/// Extract the endpoints of one parsed OpenAPI document
pub fn parse_document(name: &str, document: &Value) -> Result<ApiDocument> {
    let paths = document
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("OpenAPI document {} has no 'paths' object", name))?;

    let endpoints = paths
        .iter()
        .map(|(template, item)| {
            let get = item.get("get");
            let mut declared_parameters = parameters_of(item);
            if let Some(op) = get {
                for param in parameters_of(op) {
                    declared_parameters
                        .retain(|p| !(p.name == param.name && p.location == param.location));
                    declared_parameters.push(param);
                }
            }

            EndpointSpec {
                path_template: template.clone(),
                has_get: get.is_some(),
                declared_parameters,
            }
        })
        .collect();

    Ok(ApiDocument {
        name: name.to_string(),
        endpoints,
    })
}

/// Parameters declared inline on a path item or operation
///
/// `$ref` parameters and malformed entries are ignored.
fn parameters_of(node: &Value) -> Vec<ParameterSpec> {
    node.get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| serde_json::from_value::<ParameterSpec>(p.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
