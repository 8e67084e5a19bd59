//! OpenAPI data models
//!
//! Only the parts of a document the dump run needs: path templates, whether
//! they have a GET operation, and the parameters that operation declares.

use serde::{Deserialize, Serialize};

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A declared operation parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
}

/// One path template of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub path_template: String,
    pub has_get: bool,
    pub declared_parameters: Vec<ParameterSpec>,
}

impl EndpointSpec {
    /// Whether the GET operation can be called without extra input
    pub fn requires_parameters(&self) -> bool {
        self.path_template.contains('{')
            || self.declared_parameters.iter().any(|p| {
                p.required
                    && matches!(p.location, ParameterLocation::Path | ParameterLocation::Query)
            })
    }
}

/// Endpoints of one loaded OpenAPI document, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDocument {
    pub name: String,
    pub endpoints: Vec<EndpointSpec>,
}
