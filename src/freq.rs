use std::collections::HashMap;
use std::hash::Hash;

/// Key -> count histogram used for the genre and year statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable<K: Eq + Hash>(HashMap<K, u32>);

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        FrequencyTable(HashMap::new())
    }

    /// Increment the count for `key`, inserting it at 1 when absent.
    pub fn tally(&mut self, key: K) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &K) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &u32)> {
        self.0.iter()
    }

    /// Entries sorted by count descending, ties broken by key so that the
    /// rendered tables are deterministic.
    pub fn sorted(&self) -> Vec<(&K, u32)>
    where
        K: Ord,
    {
        let mut entries: Vec<(&K, u32)> = self.0.iter().map(|(k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Key-wise sum over the union of both key sets. Neither input is
    /// mutated; callers may merge in any order.
    pub fn merge(a: &FrequencyTable<K>, b: &FrequencyTable<K>) -> FrequencyTable<K> {
        let mut sums = a.0.clone();
        for (key, count) in &b.0 {
            *sums.entry(key.clone()).or_insert(0) += count;
        }
        FrequencyTable(sums)
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, u32)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        FrequencyTable(iter.into_iter().collect())
    }
}
