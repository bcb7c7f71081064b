use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{EnvVar, ResourceRequirements};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devfile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentSource {
    Git(GitSource),
    ContainerImage(String),
}

/// Component descriptor, produced as a stub by detection or attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub component_name: String,
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ComponentSource>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub target_port: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub route: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub replicas: i32,
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetectionDescription {
    pub devfile_found: bool,
    pub language: String,
    pub project_type: String,
    pub component_stub: Component,
}

/// Detected components keyed by their sanitized component name.
pub type ComponentDetectionMap = BTreeMap<String, ComponentDetectionDescription>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetectionQuery {
    #[serde(default)]
    pub git_source: Option<GitSource>,
}

/// Output of a repository scan, every map keyed by source-tree context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Devfile documents as UTF-8 text, the encoding YAML and JSON require.
    #[serde(default)]
    pub devfiles: BTreeMap<String, String>,
    #[serde(default)]
    pub devfile_urls: BTreeMap<String, String>,
    #[serde(default)]
    pub dockerfiles: BTreeMap<String, String>,
    #[serde(default)]
    pub ports: BTreeMap<String, Vec<i32>>,
}
