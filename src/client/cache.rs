//! Query Cache
//!
//! Holds the last accepted response per request (operation + full path) and
//! tracks freshness per resource tag.
//!
//! ## Ordering
//!
//! Every issued query takes a monotonically increasing sequence number. When
//! responses for the same key resolve out of order, an older response than the
//! last accepted one is discarded and the caller gets the newer accepted value.
//! A response for a request issued before an invalidation is handed to its
//! caller but stays stale, so the next read goes back to the network.
//!
//! ## Eviction
//!
//! Invalidated entries are dropped outright; the per-tag invalidation
//! boundary survives them. Past [`DEFAULT_CAPACITY`] entries the least
//! recently issued key is evicted.

use super::tags::{Operation, ResourceTag};
use serde_json::Value;
use std::collections::HashMap;

/// Entries kept before the least recently issued key is evicted
pub const DEFAULT_CAPACITY: usize = 256;

/// Cache key: one entry per parameter set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: Operation,
    pub path: String,
}

impl CacheKey {
    pub fn new(operation: Operation, path: impl Into<String>) -> Self {
        Self {
            operation,
            path: path.into(),
        }
    }
}

/// Issued-request marker returned by [`QueryCache::begin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub key: CacheKey,
    pub seq: u64,
}

/// Outcome of resolving a ticket
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The response became the current value
    Accepted(Value),
    /// A newer response was already accepted; this is that newer value
    Superseded(Value),
}

impl Resolution {
    pub fn into_value(self) -> Value {
        match self {
            Resolution::Accepted(v) | Resolution::Superseded(v) => v,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    tag: ResourceTag,
    value: Option<Value>,
    /// Sequence number of the accepted value (0 = none yet)
    accepted: u64,
    /// Responses issued before this sequence number are stale on arrival
    valid_from: u64,
    /// Sequence number of the latest request issued for this key
    last_issued: u64,
    stale: bool,
}

#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Last invalidation boundary per tag
    boundaries: HashMap<ResourceTag, u64>,
    capacity: usize,
    next_seq: u64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            boundaries: HashMap::new(),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    /// Fresh cached value for a key, if any
    pub fn fresh(&self, key: &CacheKey) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|e| !e.stale)
            .and_then(|e| e.value.as_ref())
    }

    /// Register an outgoing query
    pub fn begin(&mut self, key: CacheKey, tag: ResourceTag) -> RequestTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        let valid_from = self.boundaries.get(&tag).copied().unwrap_or(0);
        let entry = self.entries.entry(key.clone()).or_insert(CacheEntry {
            tag,
            value: None,
            accepted: 0,
            valid_from,
            last_issued: 0,
            stale: true,
        });
        entry.last_issued = seq;
        RequestTicket { key, seq }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_issued)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            tracing::debug!(path = %key.path, "Evicting cached response");
            self.entries.remove(&key);
        }
    }

    /// Record a response for an issued query. A response whose entry was
    /// evicted in the meantime goes to the caller without being stored.
    pub fn resolve(&mut self, ticket: RequestTicket, value: Value) -> Resolution {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return Resolution::Accepted(value);
        };

        if ticket.seq < entry.accepted {
            if let Some(newer) = &entry.value {
                tracing::debug!(
                    path = %ticket.key.path,
                    seq = ticket.seq,
                    accepted = entry.accepted,
                    "Discarding out-of-order response"
                );
                return Resolution::Superseded(newer.clone());
            }
        }

        entry.accepted = ticket.seq;
        entry.value = Some(value.clone());
        entry.stale = ticket.seq < entry.valid_from;
        Resolution::Accepted(value)
    }

    /// Drop every entry under the given tags. Requests already in flight for
    /// them resolve stale. Returns the number of entries dropped.
    pub fn invalidate(&mut self, tags: &[ResourceTag]) -> usize {
        let boundary = self.next_seq + 1;
        for tag in tags {
            self.boundaries.insert(*tag, boundary);
        }
        let before = self.entries.len();
        self.entries.retain(|_, entry| !tags.contains(&entry.tag));
        before - self.entries.len()
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.fresh(key).is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
