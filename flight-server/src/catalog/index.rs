//! Keyed lookup tables over a flight catalog.

use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::FlightId;

/// Map from a lookup key to the flights filed under it.
///
/// Buckets keep flights in insertion order, so a catalog built from an
/// ordered dataset yields ordered buckets. Lookups for absent keys return an
/// empty slice rather than `None`.
#[derive(Debug, Clone)]
pub struct SearchIndex<K> {
    buckets: HashMap<K, Vec<FlightId>>,
}

impl<K: Eq + Hash> SearchIndex<K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    /// File a flight under a key.
    pub(crate) fn insert(&mut self, key: K, id: FlightId) {
        self.buckets.entry(key).or_default().push(id);
    }

    /// Flights filed under a key, in insertion order.
    pub fn get(&self, key: &K) -> &[FlightId] {
        self.buckets.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }
}

impl<K: Eq + Hash> Default for SearchIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index() {
        let index: SearchIndex<&str> = SearchIndex::new();
        assert!(index.get(&"JFK").is_empty());
        assert_eq!(index.bucket_count(), 0);
        assert_eq!(index.entry_count(), 0);
    }

    #[test]
    fn buckets_preserve_insertion_order() {
        let mut index = SearchIndex::new();
        index.insert("JFK", FlightId(3));
        index.insert("LAX", FlightId(1));
        index.insert("JFK", FlightId(0));
        index.insert("JFK", FlightId(7));

        assert_eq!(index.get(&"JFK"), &[FlightId(3), FlightId(0), FlightId(7)]);
        assert_eq!(index.get(&"LAX"), &[FlightId(1)]);
        assert_eq!(index.bucket_count(), 2);
        assert_eq!(index.entry_count(), 4);
    }
}
