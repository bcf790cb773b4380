//! HashTable: separate-chaining storage over a power-of-two bucket vector.

use crate::chain::{Chain, Entry};
use crate::error::CapacityError;
use crate::index::{self, bucket_index, DEFAULT_CAPACITY};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::debug;

/// A hash table resolving collisions with per-bucket chains.
///
/// Keys must keep a stable `Hash` and `Eq` while they are stored: hash codes
/// are computed once on `put` and reused by every later operation, including
/// `resize_table`. The table never grows on its own; call `resize_table`
/// when `load_factor` gets too high for the workload.
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Chain<K, V>>,
    len: usize,
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Create a table with `DEFAULT_CAPACITY` buckets.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Create a table with `capacity` buckets.
    ///
    /// Fails when `capacity` is negative, zero or not a power of two.
    pub fn with_capacity<C>(capacity: C) -> Result<Self, CapacityError>
    where
        C: TryInto<usize>,
    {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher<C>(capacity: C, hasher: S) -> Result<Self, CapacityError>
    where
        C: TryInto<usize>,
    {
        let capacity = index::checked_capacity(capacity)?;
        Ok(Self::from_parts(capacity, hasher))
    }

    fn from_parts(capacity: usize, hasher: S) -> Self {
        debug!("created hash table with {} buckets", capacity);
        Self {
            hasher,
            buckets: empty_buckets(capacity),
            len: 0,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        bucket_index(hash, self.buckets.len())
    }

    /// Map `key` to `value`, returning the value it replaced.
    ///
    /// A new key is appended to the tail of its bucket's chain; an existing
    /// key keeps its position and only the value changes.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let i = self.bucket_of(hash);
        let chain = &mut self.buckets[i];
        if let Some(entry) = chain.find_mut(hash, &key) {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        chain.push(Entry { key, value, hash });
        self.len += 1;
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.buckets[self.bucket_of(hash)]
            .find(hash, q)
            .map(|e| &e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.buckets[self.bucket_of(hash)].find(hash, q).is_some()
    }

    /// Remove `key`, returning its value. Other entries of the same chain
    /// stay in place and keep their order.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let i = self.bucket_of(hash);
        let entry = self.buckets[i].remove(hash, q)?;
        self.len -= 1;
        Some(entry.value)
    }

    /// Move every entry into a fresh vector of `new_capacity` buckets.
    ///
    /// Each entry is placed by its own stored hash, so a chain whose members
    /// split under the new mask is redistributed rather than moved whole.
    /// On error the table is left untouched.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        let new_capacity = index::validate(new_capacity)?;
        let old_capacity = self.buckets.len();
        let mut buckets = empty_buckets(new_capacity);
        for chain in core::mem::take(&mut self.buckets) {
            for entry in chain.into_entries() {
                buckets[bucket_index(entry.hash, new_capacity)].push(entry);
            }
        }
        self.buckets = buckets;
        debug!(
            "resized hash table from {} to {} buckets ({} entries)",
            old_capacity, new_capacity, self.len
        );
        Ok(())
    }

    /// Check structural invariants: every entry sits in the bucket its hash
    /// selects, hashes are current, and the chains add up to `len`.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(self.buckets.len().is_power_of_two());
        let mut total = 0;
        for (i, chain) in self.buckets.iter().enumerate() {
            for e in chain.iter() {
                assert_eq!(e.hash, self.make_hash(&e.key), "stale hash");
                assert_eq!(self.bucket_of(e.hash), i, "entry in wrong bucket");
            }
            total += chain.len();
        }
        assert_eq!(total, self.len);
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; always a non-zero power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket. Informational only; nothing resizes on it.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Full scan over every chain; values are not indexed.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.buckets
            .iter()
            .any(|chain| chain.iter().any(|e| e.value == *value))
    }

    /// Entries in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    /// One line per bucket: `"{index}:"` then the chain as
    /// `" k1=v1 -> k2=v2"`. Same output as `Display`.
    pub fn render(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V, S> fmt::Display for HashTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            write!(f, "{}:", i)?;
            for (n, e) in chain.iter().enumerate() {
                let sep = if n == 0 { " " } else { " -> " };
                write!(f, "{}{}={}", sep, e.key, e.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(&K, &V)` pairs of a `HashTable`.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: core::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
