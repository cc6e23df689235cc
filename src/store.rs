use crate::host::RequestId;
use crate::path;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Default)]
struct Slot {
    contributions: Map<String, Value>,
    merged: bool,
}

/// Arena of per-request pending contributions, keyed by request identity.
/// Slots are created lazily on first contribution and dropped when the
/// request completes, so nothing survives across requests.
#[derive(Default)]
pub struct RequestStore {
    slots: Mutex<HashMap<RequestId, Slot>>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entries` (dotted keys allowed) as pending contributions and
    /// return the expanded merged-so-far map. Entries are stored raw, in
    /// insertion order; dotted keys keep their path identity until merge
    /// time so they expand against the live context without clobbering
    /// siblings under a shared prefix.
    pub fn contribute(&self, id: RequestId, entries: &Map<String, Value>) -> Map<String, Value> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(id).or_default();
        for (key, value) in entries {
            slot.contributions.insert(key.clone(), value.clone());
        }
        let mut expanded = Map::new();
        path::merge_defaults(&mut expanded, &slot.contributions);
        expanded
    }

    /// Take the raw pending contributions for the merge step. Returns None
    /// if this request was already merged, enforcing the once-only
    /// transition.
    pub fn begin_merge(&self, id: RequestId) -> Option<Map<String, Value>> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(id).or_default();
        if slot.merged {
            return None;
        }
        slot.merged = true;
        Some(std::mem::take(&mut slot.contributions))
    }

    /// Drop the request's slot. Called when the request completes; aborted
    /// requests that never merged are cleaned up the same way.
    pub fn complete(&self, id: RequestId) {
        self.slots.lock().remove(&id);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.lock().len()
    }
}
