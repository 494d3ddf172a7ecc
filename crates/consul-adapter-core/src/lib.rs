//! Consul adapter core
//!
//! Resolves, once at startup, which Consul control-plane releases exist and
//! which CRD manifests they ship, and describes how a component generator
//! should read those manifests:
//!
//! - `Bootstrap`: the startup lookup, bounded by a timeout and never fatal
//! - `VersionHistory`: chart releases, oldest first, app version on the newest
//! - `CrdCatalog`: CRD file names of the upstream source tree
//! - `ManifestConfig`: field paths and document splitting for the converter
//! - `UrlResolver`: CRD download URLs, with an operator override
//!
//! Network access goes through the [`ReleaseSource`], [`AppVersionResolver`]
//! and [`DirectoryLister`] traits; `consul-adapter-repo` implements them over
//! HTTP.

pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod meshmodel;
pub mod mock;
pub mod source;
pub mod state;
pub mod url;
pub mod version;

pub use catalog::CrdCatalog;
pub use config::AdapterConfig;
pub use error::{CoreError, Result};
pub use manifest::{
    CrdFilter, DOCUMENT_SEPARATOR, ExtractorPaths, MESH_NAME, ManifestConfig, split_documents,
};
pub use meshmodel::{GenerationMethod, MeshModelConfig, MeshModelMetadata};
pub use source::{AppVersionResolver, ChartRef, DirectoryLister, ReleaseSource, SourceRef};
pub use state::{AdapterPaths, AdapterState, Bootstrap};
pub use url::UrlResolver;
pub use version::{VersionHistory, VersionHistoryBuilder, VersionRecord};
