//! Credential lookup across an ordered list of sources.
//!
//! Resolution is environment-first, dotfile-second, and nothing is
//! cached: every lookup re-reads its source.

use std::collections::HashMap;
use std::path::PathBuf;

/// A single place a credential may come from.
pub trait CredentialSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Process environment. Empty values count as absent.
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }
}

/// A `KEY=value` dotfile, conventionally `.env` at the project root.
///
/// Parsed permissively: lines are trimmed, anything that is not
/// `key=...` is skipped, and the first matching line decides. A match
/// with an empty value counts as absent.
pub struct DotfileSource {
    path: PathBuf,
}

impl DotfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for DotfileSource {
    fn lookup(&self, key: &str) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        for line in content.lines() {
            let line = line.trim();
            let Some(rest) = line.strip_prefix(key) else {
                continue;
            };
            let Some(value) = rest.strip_prefix('=') else {
                continue;
            };
            let value = value.trim();
            return (!value.is_empty()).then(|| value.to_string());
        }
        None
    }
}

/// Fixed in-memory source, used by tests in place of [`EnvSource`] so
/// resolution stays deterministic without touching the real process
/// environment.
#[derive(Default)]
pub struct StaticSource {
    values: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl CredentialSource for StaticSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered list of sources; the first hit wins.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// The production order: environment, then the project dotfile.
    pub fn standard(env_file: PathBuf) -> Self {
        Self::new(vec![
            Box::new(EnvSource),
            Box::new(DotfileSource::new(env_file)),
        ])
    }

    pub fn resolve(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.lookup(key))
    }
}
