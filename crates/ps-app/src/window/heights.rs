use std::collections::{HashMap, HashSet};

use ps_core::{Record, RecordId};

/// Measured item heights keyed by record id, with an estimate for items
/// that have not been rendered yet.
///
/// Keying by id rather than index keeps measurements attached to the right
/// record when items are prepended or removed.
#[derive(Debug, Clone)]
pub struct HeightCache {
    estimate: u32,
    measured: HashMap<RecordId, u32>,
}

impl HeightCache {
    pub fn new(estimate: u32) -> Self {
        Self {
            estimate: estimate.max(1),
            measured: HashMap::new(),
        }
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    pub fn get(&self, id: &RecordId) -> u32 {
        self.measured.get(id).copied().unwrap_or(self.estimate)
    }

    pub fn is_measured(&self, id: &RecordId) -> bool {
        self.measured.contains_key(id)
    }

    /// Stores a measurement and returns the previous effective height.
    pub fn set(&mut self, id: &RecordId, height: u32) -> u32 {
        let previous = self.get(id);
        self.measured.insert(id.clone(), height.max(1));
        previous
    }

    /// Forgets measurements of records no longer present.
    pub fn retain(&mut self, items: &[Record]) {
        let live: HashSet<&RecordId> = items.iter().map(|r| &r.id).collect();
        self.measured.retain(|id, _| live.contains(id));
    }

    pub fn clear(&mut self) {
        self.measured.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_core::ListKind;

    #[test]
    fn unmeasured_items_use_estimate() {
        let cache = HeightCache::new(40);
        assert_eq!(cache.get(&RecordId::from("x")), 40);
    }

    #[test]
    fn set_returns_previous_height() {
        let mut cache = HeightCache::new(40);
        let id = RecordId::from("x");
        assert_eq!(cache.set(&id, 55), 40);
        assert_eq!(cache.set(&id, 60), 55);
        assert_eq!(cache.get(&id), 60);
    }

    #[test]
    fn retain_drops_removed_records() {
        let mut cache = HeightCache::new(40);
        let keep = Record::new("keep", ListKind::Saved, 0);
        let gone = RecordId::from("gone");
        cache.set(&keep.id, 10);
        cache.set(&gone, 20);

        cache.retain(std::slice::from_ref(&keep));

        assert!(cache.is_measured(&keep.id));
        assert!(!cache.is_measured(&gone));
    }
}
