//! Per-run seeding state: the name cache and the outcome tally.

use super::kind::ResourceKind;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identity of a resource within its scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub parent: Option<u64>,
    pub name: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, parent: Option<u64>, name: &str) -> Self {
        Self {
            kind,
            parent,
            name: name.to_string(),
        }
    }
}

/// Name → remote id, scoped by kind and parent. Entries are never evicted.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: HashMap<CacheKey, u64>,
}

impl NameCache {
    pub fn get(&self, key: &CacheKey) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: CacheKey, id: u64) {
        self.entries.insert(key, id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.entries.keys().filter(|k| k.kind == kind).count()
    }
}

/// Tally of what one run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub reused: usize,
    pub failed: usize,
    /// Nodes not attempted because an ancestor failed
    pub skipped: usize,
    pub failures: Vec<String>,
}

impl SeedReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    pub fn total(&self) -> usize {
        self.created + self.reused + self.failed + self.skipped
    }

    pub fn merge(&mut self, other: SeedReport) {
        self.created += other.created;
        self.reused += other.reused;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} already present, {} failed, {} skipped",
            self.created, self.reused, self.failed, self.skipped
        )
    }
}

/// Everything one seeding run carries from call to call
#[derive(Debug)]
pub struct SeedContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub cache: NameCache,
}

impl SeedContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            cache: NameCache::default(),
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Default for SeedContext {
    fn default() -> Self {
        Self::new()
    }
}
