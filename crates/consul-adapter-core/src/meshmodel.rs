//! Catalog metadata for the generated components

use serde::{Deserialize, Serialize};

/// How components are generated for the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationMethod {
    /// From raw CRD manifests
    Manifests,
    /// From rendered Helm charts
    HelmCharts,
}

impl GenerationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMethod::Manifests => "MANIFESTS",
            GenerationMethod::HelmCharts => "HELM_CHARTS",
        }
    }
}

impl std::fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata attached to every generated component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshModelMetadata {
    #[serde(rename = "Primary Color", default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(rename = "Secondary Color", default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(rename = "Shape", default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(rename = "Logo URL", default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(rename = "SVG_Color", default, skip_serializing_if = "Option::is_none")]
    pub svg_color: Option<String>,
    #[serde(rename = "SVG_White", default, skip_serializing_if = "Option::is_none")]
    pub svg_white: Option<String>,
}

/// Category placement and metadata for the component model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshModelConfig {
    pub category: String,
    pub sub_category: String,
    pub metadata: MeshModelMetadata,
}

impl Default for MeshModelConfig {
    fn default() -> Self {
        Self {
            category: "Orchestration & Management".to_string(),
            sub_category: "Service Mesh".to_string(),
            metadata: MeshModelMetadata {
                primary_color: Some("#D62783".to_string()),
                secondary_color: Some("#ed74b4".to_string()),
                shape: Some("circle".to_string()),
                ..MeshModelMetadata::default()
            },
        }
    }
}
