use crate::config::SampleSetConfig;
use crate::task::{self, FrameTask};
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs;
use tracing::info;
use url::Url;

/// One test asset: display label plus the locator handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEntry {
    pub label: String,
    pub locator: String,
}

impl TestEntry {
    pub fn new(label: impl Into<String>, locator: impl Into<String>) -> Self {
        Self { label: label.into(), locator: locator.into() }
    }
}

#[derive(Debug, Deserialize)]
struct SampleIndex {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    base_path: Option<String>,
    #[serde(default)]
    items: Vec<SampleItem>,
}

#[derive(Debug, Deserialize)]
struct SampleItem {
    name: String,
    path: String,
}

/// A named group of test assets with remote and local locator variants.
/// Produced by [`SampleSet::load`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct SampleSet {
    name: String,
    items: Vec<TestEntry>,
    items_local: Vec<TestEntry>,
}

impl SampleSet {
    /// Reads and resolves a sample-set index file. Suspends once before the
    /// file IO so the frame scheduler keeps rendering while sets populate.
    pub async fn load(config: SampleSetConfig) -> Result<SampleSet> {
        task::yield_once().await;
        let bytes = fs::read(&config.path)
            .with_context(|| format!("Failed to read sample set {}", config.path.display()))?;
        let index: SampleIndex = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse sample set {}", config.path.display()))?;
        let set = Self::from_index(config.name, index);
        info!(
            "Sample set '{}': {} remote, {} local entries",
            set.name,
            set.items.len(),
            set.items_local.len()
        );
        Ok(set)
    }

    pub fn from_entries(
        name: impl Into<String>,
        items: Vec<TestEntry>,
        items_local: Vec<TestEntry>,
    ) -> Self {
        Self { name: name.into(), items, items_local }
    }

    fn from_index(fallback_name: String, index: SampleIndex) -> Self {
        let name = index.name.unwrap_or(fallback_name);
        let mut items = Vec::new();
        let mut items_local = Vec::new();
        for item in &index.items {
            if let Some(base_url) = &index.base_url {
                items.push(TestEntry::new(&item.name, join_remote(base_url, &item.path)));
            }
            if let Some(base_path) = &index.base_path {
                items_local.push(TestEntry::new(&item.name, join_local(base_path, &item.path)));
            }
        }
        Self { name, items, items_local }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remote (HTTP) entry variants.
    pub fn items(&self) -> &[TestEntry] {
        &self.items
    }

    /// Local (on-disk) entry variants, without any scheme marker.
    pub fn items_local(&self) -> &[TestEntry] {
        &self.items_local
    }
}

fn join_remote(base: &str, path: &str) -> String {
    let mut base = base.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    match Url::parse(&base).and_then(|b| b.join(path)) {
        Ok(joined) => joined.into(),
        Err(_) => format!("{base}{path}"),
    }
}

fn join_local(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Sequences the configured sample-set loads: one in-flight future at a time,
/// polled once per frame, completed in configuration order. No cancellation.
pub struct SampleSetQueue {
    pending: VecDeque<SampleSetConfig>,
    current: Option<FrameTask<Result<SampleSet>>>,
}

impl SampleSetQueue {
    pub fn new(configs: impl IntoIterator<Item = SampleSetConfig>) -> Self {
        Self { pending: configs.into_iter().collect(), current: None }
    }

    /// Advances population by one frame step. Returns a completed set (or its
    /// load error) at most once per call.
    pub fn poll(&mut self) -> Option<Result<SampleSet>> {
        if self.current.is_none() {
            let config = self.pending.pop_front()?;
            self.current = Some(FrameTask::new(SampleSet::load(config)));
        }
        let result = self.current.as_mut()?.poll()?;
        self.current = None;
        Some(result)
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_join_handles_trailing_slash() {
        assert_eq!(join_remote("http://x/sets", "Duck/Duck.glb"), "http://x/sets/Duck/Duck.glb");
        assert_eq!(join_remote("http://x/sets/", "Duck/Duck.glb"), "http://x/sets/Duck/Duck.glb");
    }

    #[test]
    fn local_join_is_plain_path_concat() {
        assert_eq!(join_local("assets/models/", "Duck/Duck.glb"), "assets/models/Duck/Duck.glb");
        assert_eq!(join_local("assets/models", "Duck/Duck.glb"), "assets/models/Duck/Duck.glb");
    }

    #[test]
    fn index_without_base_url_has_no_remote_entries() {
        let index = SampleIndex {
            name: None,
            base_url: None,
            base_path: Some("assets".to_string()),
            items: vec![SampleItem { name: "Duck".to_string(), path: "duck.glb".to_string() }],
        };
        let set = SampleSet::from_index("fallback".to_string(), index);
        assert_eq!(set.name(), "fallback");
        assert!(set.items().is_empty());
        assert_eq!(set.items_local(), &[TestEntry::new("Duck", "assets/duck.glb")]);
    }

    #[test]
    fn index_name_wins_over_config_name() {
        let index = SampleIndex {
            name: Some("Khronos".to_string()),
            base_url: Some("http://x/".to_string()),
            base_path: None,
            items: vec![SampleItem { name: "Duck".to_string(), path: "duck.glb".to_string() }],
        };
        let set = SampleSet::from_index("fallback".to_string(), index);
        assert_eq!(set.name(), "Khronos");
        assert_eq!(set.items(), &[TestEntry::new("Duck", "http://x/duck.glb")]);
        assert!(set.items_local().is_empty());
    }
}
