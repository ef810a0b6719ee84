use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::{Result, SeqError};

/// 按插入顺序保存的序列字典。
///
/// `names` 记录首次插入顺序，`entries` 保存 name -> sequence；两者的成员
/// 始终一致。所有迭代都按 `names` 的顺序进行，而不是哈希顺序。
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SeqMap {
    names: Vec<String>,
    entries: HashMap<String, Vec<u8>>,
}

impl SeqMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            names: Vec::with_capacity(n),
            entries: HashMap::with_capacity(n),
        }
    }

    /// Add a sequence, merging duplicates by keeping the longer value.
    ///
    /// A new key is appended to the order. For an existing key the stored
    /// value is replaced only when `value` is strictly longer, so ties keep
    /// the existing value. With `errors` set, a duplicate is reported as a
    /// warning; the merge still happens.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>, errors: bool) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) => {
                if errors {
                    tracing::warn!(key = %key, "duplicate key");
                }
                if value.len() > existing.len() {
                    *existing = value;
                }
            }
            None => {
                self.names.push(key.clone());
                self.entries.insert(key, value);
            }
        }
    }

    /// Set `key` to `value`, returning the previous value. New keys go to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.names.push(key.clone());
        }
        self.entries.insert(key, value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        let value = self.entries.remove(key)?;
        if let Some(i) = self.names.iter().position(|n| n == key) {
            self.names.remove(i);
        }
        Some(value)
    }

    /// Returns the stored value, inserting `value` first if `key` is absent.
    pub fn get_or_insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> &[u8] {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.names.push(key.clone());
        }
        self.entries.entry(key).or_insert_with(|| value.into())
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.entries.clear();
    }

    pub fn get_seq(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// A new map holding the entries named in `keys`.
    ///
    /// Keys absent from `self` are skipped. The result follows `self`'s
    /// order, not the order of `keys`.
    pub fn subset<I, S>(&self, keys: I) -> SeqMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: std::collections::HashSet<String> =
            keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        let mut out = SeqMap::with_capacity(wanted.len());
        for (name, seq) in self.iter() {
            if wanted.contains(name) {
                out.insert(name, seq);
            }
        }
        out
    }

    /// Reorder names by their position in `reference`.
    ///
    /// Every name must appear in `reference`; otherwise `MissingName` is
    /// returned and the current order is left as it was. When a name occurs
    /// more than once in `reference` its first position is used.
    pub fn order_names<I, S>(&mut self, reference: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (i, name) in reference.into_iter().enumerate() {
            lookup.entry(name.as_ref().to_string()).or_insert(i);
        }

        let mut keyed = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match lookup.get(name) {
                Some(&rank) => keyed.push(rank),
                None => return Err(SeqError::MissingName(name.clone())),
            }
        }

        let mut order: Vec<usize> = (0..self.names.len()).collect();
        order.sort_by_key(|&i| keyed[i]);
        let mut old: Vec<Option<String>> = self.names.drain(..).map(Some).collect();
        self.names = order.into_iter().filter_map(|i| old[i].take()).collect();
        Ok(())
    }

    /// Common length of an alignment, read from the first sequence.
    pub fn alignment_len(&self) -> Result<usize> {
        let first = self.names.first().ok_or(SeqError::EmptyMap)?;
        Ok(self.entries[first].len())
    }

    /// True when every sequence has the same length (vacuously true if empty).
    pub fn is_aligned(&self) -> bool {
        let mut lens = self.values().map(<[u8]>::len);
        match lens.next() {
            Some(first) => lens.all(|l| l == first),
            None => true,
        }
    }

    pub fn total_len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Owned copy of the current order.
    pub fn names_vec(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.names.iter().map(move |n| self.entries[n].as_slice())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            names: self.names.iter(),
            entries: &self.entries,
        }
    }
}

pub struct Iter<'a> {
    names: std::slice::Iter<'a, String>,
    entries: &'a HashMap<String, Vec<u8>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        Some((name.as_str(), self.entries[name].as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SeqMap {
    type Item = (&'a str, &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for SeqMap {
    type Item = (String, Vec<u8>);
    type IntoIter = std::vec::IntoIter<(String, Vec<u8>)>;

    fn into_iter(mut self) -> Self::IntoIter {
        let pairs: Vec<(String, Vec<u8>)> = self
            .names
            .drain(..)
            .filter_map(|n| self.entries.remove(&n).map(|v| (n, v)))
            .collect();
        pairs.into_iter()
    }
}

/// Bulk update: later values overwrite earlier ones, new keys are appended.
impl<K: Into<String>, V: Into<Vec<u8>>> Extend<(K, V)> for SeqMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for SeqMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = SeqMap::new();
        map.extend(iter);
        map
    }
}

impl fmt::Debug for SeqMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, String::from_utf8_lossy(v))))
            .finish()
    }
}

// 序列化为有序的 (name, seq) 列表，反序列化时重建 names/entries
impl Serialize for SeqMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for SeqMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pairs: Vec<(String, Vec<u8>)> = Vec::deserialize(deserializer)?;
        let mut map = SeqMap::with_capacity(pairs.len());
        for (name, seq) in pairs {
            map.add(name, seq, false);
        }
        Ok(map)
    }
}
