//! Extraction rules handed to the manifest-to-component converter
//!
//! Nothing here reads a CRD. The paths are opaque expressions the converter
//! evaluates against each CRD document.

use serde::Serialize;

/// Mesh type identifier used as the component model name
pub const MESH_NAME: &str = "CONSUL";

/// Separator between documents of a multi-document manifest
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Where to find component data inside a single CRD document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorPaths {
    /// Resource kind name
    pub name_path: String,
    /// Stable identifier
    pub id_path: String,
    /// Exposed API version
    pub version_path: String,
    /// API group
    pub group_path: String,
    /// Schema-bearing subtree
    pub spec_path: String,
}

impl Default for ExtractorPaths {
    fn default() -> Self {
        Self {
            name_path: "spec.names.kind".to_string(),
            id_path: "spec.names.kind".to_string(),
            version_path: "spec.versions[0].name".to_string(),
            group_path: "spec.group".to_string(),
            spec_path: "spec.versions[0].schema.openAPIV3Schema.properties.spec".to_string(),
        }
    }
}

/// Field paths plus matching mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdFilter {
    pub paths: ExtractorPaths,
    pub case_sensitive: bool,
}

/// Component generation config for one mesh version
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    pub name: String,
    pub mesh_version: String,
    pub crd_filter: CrdFilter,
    #[serde(skip)]
    pub extract_crds: fn(&str) -> Vec<String>,
}

impl ManifestConfig {
    /// Config for the given mesh version. Any string is accepted verbatim.
    pub fn new(mesh_version: impl Into<String>) -> Self {
        Self {
            name: MESH_NAME.to_string(),
            mesh_version: mesh_version.into(),
            crd_filter: CrdFilter {
                paths: ExtractorPaths::default(),
                case_sensitive: false,
            },
            extract_crds: split_documents,
        }
    }

    /// Split a raw manifest into CRD documents
    pub fn extract(&self, manifest: &str) -> Vec<String> {
        (self.extract_crds)(manifest)
    }
}

/// Split on the literal document separator.
///
/// Total: text without a separator, including the empty string, yields a
/// single element.
pub fn split_documents(manifest: &str) -> Vec<String> {
    manifest
        .split(DOCUMENT_SEPARATOR)
        .map(str::to_string)
        .collect()
}
