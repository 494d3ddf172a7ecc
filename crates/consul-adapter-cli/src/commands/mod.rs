//! CLI commands

// Upstream lookups
pub mod crds;
pub mod versions;

// CRD manifests
pub mod extract;
pub mod manifest_config;
pub mod url;

pub mod config;
pub mod meshmodel;
