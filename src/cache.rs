use dashmap::DashMap;

use crate::parser::HintValue;

/// Bounded concurrent cache: raw header value → decoded result.
///
/// Client hint values are highly repetitive — the same platform or model
/// string recurs across millions of requests — so decode misses are cached
/// alongside hits. Once the capacity is reached, new entries are dropped
/// rather than evicted; the bound is approximate under concurrent insertion.
pub(crate) struct DecodeCache {
    entries: DashMap<String, Option<HintValue>>,
    capacity: usize,
}

impl DecodeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, raw: &str) -> Option<Option<HintValue>> {
        self.entries.get(raw).map(|entry| entry.value().clone())
    }

    pub fn put(&self, raw: &str, decoded: Option<HintValue>) {
        if self.entries.len() < self.capacity || self.entries.contains_key(raw) {
            self.entries.insert(raw.to_string(), decoded);
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_hits_and_misses() {
        let cache = DecodeCache::new(4);
        cache.put("?1", Some(HintValue::Flag(true)));
        cache.put("garbage", None);
        assert_eq!(cache.get("?1"), Some(Some(HintValue::Flag(true))));
        assert_eq!(cache.get("garbage"), Some(None));
        assert_eq!(cache.get("unseen"), None);
    }

    #[test]
    fn full_cache_drops_new_keys_but_updates_existing() {
        let cache = DecodeCache::new(1);
        cache.put("a", None);
        cache.put("b", Some(HintValue::Flag(false)));
        assert_eq!(cache.get("b"), None);
        cache.put("a", Some(HintValue::Flag(true)));
        assert_eq!(cache.get("a"), Some(Some(HintValue::Flag(true))));
    }

    #[test]
    fn clear_evicts_everything() {
        let cache = DecodeCache::new(4);
        cache.put("a", None);
        cache.clear();
        assert_eq!(cache.get("a"), None);
    }
}
