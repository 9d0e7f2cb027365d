//! Sparse vectors keyed by feature name.
//!
//! Both feature vectors and weight vectors use [`SparseVector`]. Entries are
//! kept in key order, so iteration and every floating-point reduction run in
//! the same order on every run.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// A sparse real-valued vector. Absent keys are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: BTreeMap<String, f64>,
}

impl SparseVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored for `key` (zero when absent).
    pub fn get(&self, key: &str) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    /// Whether `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.entries.iter()
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, f64> {
        self.entries.keys()
    }

    /// Set `key` to `value`. A zero value removes the entry.
    pub fn set<K: Into<String>>(&mut self, key: K, value: f64) {
        let key = key.into();
        if value == 0.0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    /// Add `delta` to the value of `key`, creating the entry if needed.
    ///
    /// The entry stays even if the sum is zero: weight vectors only ever gain
    /// keys during training.
    pub fn increment(&mut self, key: &str, delta: f64) {
        match self.entries.get_mut(key) {
            Some(value) => *value += delta,
            None => {
                self.entries.insert(key.to_string(), delta);
            }
        }
    }

    /// Dot product. Iterates over the shorter vector.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries
            .iter()
            .filter_map(|(key, value)| large.entries.get(key).map(|w| value * w))
            .sum()
    }

    /// `self += scale * other`, entry by entry.
    pub fn add_scaled(&mut self, other: &SparseVector, scale: f64) {
        for (key, value) in &other.entries {
            self.increment(key, scale * value);
        }
    }

    /// Multiply every entry by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        for value in self.entries.values_mut() {
            *value *= factor;
        }
    }

    /// Squared L2 norm.
    pub fn norm_squared(&self) -> f64 {
        self.entries.values().map(|v| v * v).sum()
    }

    /// First key whose value is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(key, value)| (key.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SparseVector {
    /// Collect entries, summing duplicate keys and dropping zeros.
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in iter {
            *entries.entry(key.into()).or_insert(0.0) += value;
        }
        entries.retain(|_, value| *value != 0.0);
        SparseVector { entries }
    }
}

impl<'a> IntoIterator for &'a SparseVector {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(pairs: &[(&str, f64)]) -> SparseVector {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_dot_with_empty_is_zero() {
        let v = vector(&[("uni:good", 2.0), ("uni:bad", -1.5)]);
        let empty = SparseVector::new();

        assert_eq!(v.dot(&empty), 0.0);
        assert_eq!(empty.dot(&v), 0.0);
        assert_eq!(empty.dot(&empty), 0.0);
    }

    #[test]
    fn test_dot_product() {
        let a = vector(&[("x", 1.0), ("y", 2.0), ("z", 3.0)]);
        let b = vector(&[("y", 4.0), ("w", 10.0)]);

        assert_eq!(a.dot(&b), 8.0);
        assert_eq!(b.dot(&a), 8.0);
    }

    #[test]
    fn test_from_iter_sums_and_drops_zeros() {
        let v = vector(&[("a", 1.0), ("a", 2.0), ("b", 1.0), ("b", -1.0)]);

        assert_eq!(v.len(), 1);
        assert_eq!(v.get("a"), 3.0);
        assert!(!v.contains_key("b"));
        assert_eq!(v.get("missing"), 0.0);
    }

    #[test]
    fn test_increment_keeps_zeroed_keys() {
        let mut weights = SparseVector::new();
        weights.increment("uni:fine", 1.0);
        weights.increment("uni:fine", -1.0);

        assert!(weights.contains_key("uni:fine"));
        assert_eq!(weights.get("uni:fine"), 0.0);
    }

    #[test]
    fn test_add_scaled() {
        let mut weights = vector(&[("a", 1.0)]);
        let features = vector(&[("a", 2.0), ("b", 3.0)]);

        weights.add_scaled(&features, -0.5);

        assert_eq!(weights.get("a"), 0.0);
        assert_eq!(weights.get("b"), -1.5);
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_set_and_scale() {
        let mut v = SparseVector::new();
        v.set("a", 2.0);
        v.set("b", 0.0);
        assert_eq!(v.len(), 1);

        v.scale(0.25);
        assert_eq!(v.get("a"), 0.5);
        assert_eq!(v.norm_squared(), 0.25);

        v.set("a", 0.0);
        assert!(v.is_empty());
    }

    #[test]
    fn test_first_non_finite() {
        let mut v = vector(&[("a", 1.0)]);
        assert!(v.first_non_finite().is_none());

        v.increment("b", f64::NAN);
        let (key, value) = v.first_non_finite().unwrap();
        assert_eq!(key, "b");
        assert!(value.is_nan());
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let v = vector(&[("c", 1.0), ("a", 1.0), ("b", 1.0)]);
        let keys: Vec<_> = v.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
