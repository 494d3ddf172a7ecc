//! Version history of the upstream chart
//!
//! Records are kept in the order the release source returned them. Only the
//! last record carries an application version: resolving it means a chart
//! index lookup, and the adapter only ever needs the newest one.

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::source::{AppVersionResolver, ChartRef};

/// One known chart release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub chart_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

impl VersionRecord {
    pub fn new(chart_version: impl Into<String>) -> Self {
        Self {
            chart_version: chart_version.into(),
            app_version: None,
        }
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        let app_version = app_version.into();
        self.app_version = (!app_version.is_empty()).then_some(app_version);
        self
    }
}

/// Ordered chart releases, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistory {
    records: Vec<VersionRecord>,
    /// Whether the last record was confirmed to be the highest version
    ordering_verified: bool,
}

impl VersionHistory {
    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The newest release, `None` when no release is known
    pub fn latest(&self) -> Option<&VersionRecord> {
        self.records.last()
    }

    pub fn ordering_verified(&self) -> bool {
        self.ordering_verified
    }
}

/// Builds a [`VersionHistory`] from release tags
pub struct VersionHistoryBuilder<'a> {
    resolver: &'a dyn AppVersionResolver,
    chart: &'a ChartRef,
}

impl<'a> VersionHistoryBuilder<'a> {
    pub fn new(resolver: &'a dyn AppVersionResolver, chart: &'a ChartRef) -> Self {
        Self { resolver, chart }
    }

    /// Build the history from tags sorted oldest to newest.
    ///
    /// The resolver is called at most once, for the last tag. A resolver
    /// failure leaves that record without an app version.
    pub async fn build(&self, tags: Vec<String>) -> VersionHistory {
        let Some((latest, older)) = tags.split_last() else {
            return VersionHistory::default();
        };

        let ordering_verified = last_is_newest(&tags);
        if !ordering_verified {
            warn!(
                latest = %latest,
                "last release tag is not the highest version; latest app version may be wrong"
            );
        }

        let mut records: Vec<VersionRecord> = older.iter().map(VersionRecord::new).collect();

        let chart_version = latest.strip_prefix('v').unwrap_or(latest);
        let record = match self
            .resolver
            .resolve_app_version(&self.chart.repo_url, &self.chart.name, chart_version)
            .await
        {
            Ok(app_version) => {
                debug!(chart_version = %latest, app_version = %app_version, "resolved app version");
                VersionRecord::new(latest).with_app_version(app_version)
            }
            Err(e) => {
                warn!(chart_version = %latest, error = %e, "could not find app version");
                VersionRecord::new(latest)
            }
        };
        records.push(record);

        VersionHistory {
            records,
            ordering_verified,
        }
    }
}

/// Check that the final tag is the highest semver among the parseable tags.
///
/// An unparseable final tag cannot be verified and counts as a violation.
pub fn last_is_newest(tags: &[String]) -> bool {
    let Some(last) = tags.last() else {
        return true;
    };
    let Some(last) = parse_tag(last) else {
        return false;
    };
    tags.iter().filter_map(|t| parse_tag(t)).all(|v| v <= last)
}

/// Parse a release tag as semver, ignoring a leading `v`
pub fn parse_tag(tag: &str) -> Option<Version> {
    Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockResolver;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_only_latest_gets_app_version() {
        let resolver = MockResolver::returning("1.17.0");
        let chart = ChartRef::default();
        let history = VersionHistoryBuilder::new(&resolver, &chart)
            .build(tags(&["v1.0.0", "v1.1.0", "v1.2.0"]))
            .await;

        assert_eq!(history.len(), 3);
        assert!(history.records()[..2].iter().all(|r| r.app_version.is_none()));
        let latest = history.latest().unwrap();
        assert_eq!(latest.chart_version, "v1.2.0");
        assert_eq!(latest.app_version.as_deref(), Some("1.17.0"));
        assert!(history.ordering_verified());
    }

    #[tokio::test]
    async fn test_resolver_called_once_with_stripped_version() {
        let resolver = MockResolver::returning("1.17.0");
        let chart = ChartRef::default();
        VersionHistoryBuilder::new(&resolver, &chart)
            .build(tags(&["v0.1.0", "v0.2.0", "v0.3.0", "v0.4.0", "v0.5.0"]))
            .await;

        let calls = resolver.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                "https://helm.releases.hashicorp.com".to_string(),
                "consul".to_string(),
                "0.5.0".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_empty_tags_build_empty_history() {
        let resolver = MockResolver::returning("1.17.0");
        let chart = ChartRef::default();
        let history = VersionHistoryBuilder::new(&resolver, &chart)
            .build(Vec::new())
            .await;

        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolver_failure_keeps_record() {
        let resolver = MockResolver::failing();
        let chart = ChartRef::default();
        let history = VersionHistoryBuilder::new(&resolver, &chart)
            .build(tags(&["v1.0.0", "v1.1.0"]))
            .await;

        assert_eq!(history.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.chart_version, "v1.1.0");
        assert!(latest.app_version.is_none());
    }

    #[tokio::test]
    async fn test_single_tag() {
        let resolver = MockResolver::returning("1.2.3");
        let chart = ChartRef::default();
        let history = VersionHistoryBuilder::new(&resolver, &chart)
            .build(tags(&["1.0.0"]))
            .await;

        assert_eq!(history.len(), 1);
        assert_eq!(resolver.calls()[0].2, "1.0.0");
        assert_eq!(history.latest().unwrap().app_version.as_deref(), Some("1.2.3"));
    }

    #[tokio::test]
    async fn test_out_of_order_tags_are_kept_but_flagged() {
        let resolver = MockResolver::returning("1.2.3");
        let chart = ChartRef::default();
        let history = VersionHistoryBuilder::new(&resolver, &chart)
            .build(tags(&["v1.2.0", "v1.0.0"]))
            .await;

        assert!(!history.ordering_verified());
        assert_eq!(history.records()[0].chart_version, "v1.2.0");
        assert_eq!(history.latest().unwrap().chart_version, "v1.0.0");
    }

    #[test]
    fn test_last_is_newest() {
        assert!(last_is_newest(&[]));
        assert!(last_is_newest(&tags(&["v1.0.0", "v1.10.0"])));
        assert!(last_is_newest(&tags(&["nightly", "v0.9.0", "v1.0.0"])));
        assert!(!last_is_newest(&tags(&["v1.10.0", "v1.9.0"])));
        assert!(!last_is_newest(&tags(&["v1.0.0", "latest"])));
    }

    #[test]
    fn test_empty_app_version_is_absent() {
        let record = VersionRecord::new("v1.0.0").with_app_version("");
        assert!(record.app_version.is_none());
    }
}
