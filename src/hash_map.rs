use core::fmt::Debug;
use core::hash::Hash;
use core::ops::Index;

use equivalent::Equivalent;

use crate::hash::DefaultHashBuilder;
use crate::hash::WyHashBuilder;
use crate::hash::MixedHasher;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash map with dense, insertion-ordered storage built on [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq`, hashed through a [`MixedHasher`] builder `S`. Entries live
/// contiguously in insertion order; iteration is as fast as iterating a
/// `Vec` and preserves insertion order until the first removal, which moves
/// the last entry into the vacated position.
///
/// Lookup accepts any borrowed form of the key through the [`Equivalent`]
/// trait, so a `HashMap<String, V>` can be queried with a `&str`.
///
/// References into the map are not stable: insertion may grow both the entry
/// vector and the bucket index, and removal swaps entries.
///
/// # Examples
///
/// ```rust
/// use dense_hash::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: MixedHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    /// Creates a new map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::DefaultHashBuilder;
    /// use dense_hash::HashMap;
    ///
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(DefaultHashBuilder::default());
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new map holding at least `capacity` entries without
    /// reallocating, with the given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the map can hold before the bucket
    /// index grows.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the most entries the map can ever hold: `2^32 - 1`.
    pub fn max_len(&self) -> usize {
        self.table.max_len()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all entries. The allocated capacity is retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced and the old
    /// value returned; the entry keeps its original position in iteration
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(String::from("one"), 1);
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let hash = self.hash_builder.mixed_hash(key);
        self.table
            .find(hash, |(k, _)| key.equivalent(k))
            .map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let hash = self.hash_builder.mixed_hash(key);
        self.table
            .find(hash, |(k, _)| key.equivalent(k))
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let hash = self.hash_builder.mixed_hash(key);
        self.table
            .find_mut(hash, |(k, _)| key.equivalent(k))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// The last entry in iteration order moves into the removed entry's
    /// position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let hash = self.hash_builder.mixed_hash(key);
        let Self {
            table,
            hash_builder,
        } = self;
        table.remove(
            hash,
            |(k, _)| key.equivalent(k),
            |(k, _)| hash_builder.mixed_hash(k),
        )
    }

    /// Gets the entry for `key`, for in-place manipulation.
    ///
    /// The mapped value is only constructed when the entry turns out to be
    /// vacant, so `or_insert_with` does no work on the hit path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.entry("poneyland").or_insert(3);
    /// *map.entry("poneyland").or_insert(10) *= 2;
    /// assert_eq!(map.get("poneyland"), Some(&6));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        let hash = self.hash_builder.mixed_hash(&key);
        let Self {
            table,
            hash_builder,
        } = self;
        match table.entry(
            hash,
            |(k, _)| k == &key,
            |(k, _)| hash_builder.mixed_hash(k),
        ) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry {
                entry,
                hash_builder: &*hash_builder,
            }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Retains only the entries for which `f` returns `true`.
    ///
    /// Entries are visited in reverse iteration order so that the
    /// swap-removal never revisits or skips an entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = (0..8).map(|i| (i, i * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        let Self {
            table,
            hash_builder,
        } = self;
        table.retain(|(k, v)| f(k, v), |(k, _)| hash_builder.mixed_hash(k));
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let Self {
            table,
            hash_builder,
        } = self;
        table.reserve(additional, |(k, _)| hash_builder.mixed_hash(k));
    }

    /// Rebuilds the bucket index sized for at least `count` entries (never
    /// fewer than the current length) and releases spare entry storage.
    pub fn rehash(&mut self, count: usize) {
        let Self {
            table,
            hash_builder,
        } = self;
        table.rehash(count, |(k, _)| hash_builder.mixed_hash(k));
    }

    /// Shrinks the map's storage as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.rehash(0);
    }

    /// Returns the number of buckets in the index, 0 before the first
    /// insertion.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Returns the most buckets the index will ever address.
    pub fn max_bucket_count(&self) -> usize {
        self.table.max_bucket_count()
    }

    /// Returns the ratio of entries to buckets.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns the load factor above which the bucket index doubles.
    pub fn max_load_factor(&self) -> f32 {
        self.table.max_load_factor()
    }

    /// Sets the maximum load factor, in `(0.0, 1.0]`, and grows the index if
    /// the current entries no longer fit under it.
    pub fn set_max_load_factor(&mut self, max_load_factor: f32) {
        let Self {
            table,
            hash_builder,
        } = self;
        table.set_max_load_factor(max_load_factor, |(k, _)| hash_builder.mixed_hash(k));
    }

    /// Returns an iterator over the entries in insertion order (perturbed by
    /// removals).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let entries: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    /// assert_eq!(entries, [("a", 1), ("b", 2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator yielding keys and mutable value references.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys in iteration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in iteration order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable value references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes and yields all entries. The allocated capacity is retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// let pairs: Vec<_> = map.drain().collect();
    /// assert_eq!(pairs, [(1, "a")]);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V> HashMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// Creates a new map using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(WyHashBuilder)
    }

    /// Creates a new map holding at least `capacity` entries without
    /// reallocating, using the default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, WyHashBuilder)
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: MixedHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| *v == *ov))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: MixedHasher,
{
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq,
    Q: Hash + Equivalent<K> + ?Sized,
    S: MixedHasher,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// # Examples
    ///
    /// ```rust
    /// use dense_hash::HashMap;
    ///
    /// let map = HashMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.get(&2), Some(&"b"));
    /// ```
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// A view into a single entry in the map, which may be vacant or occupied.
///
/// Constructed by the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V, S> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value computed by `default` if the entry is vacant and
    /// returns a mutable reference to the value.
    ///
    /// `default` only runs when the entry is vacant; if it panics, the map
    /// is unchanged.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential insert.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: MixedHasher,
{
    /// Inserts the default value if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V, S> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
    hash_builder: &'a S,
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: MixedHasher,
{
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Replaces the value and returns the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        let OccupiedEntry {
            entry,
            hash_builder,
        } = self;
        entry.remove(|(k, _)| hash_builder.mixed_hash(k))
    }
}

/// An iterator over the entries of a [`HashMap`].
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// A mutable iterator over the entries of a [`HashMap`].
pub struct IterMut<'a, K, V> {
    inner: core::slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A mutable iterator over the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the entries of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: alloc::vec::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An owning iterator over the entries of a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use crate::hash::MixedHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k0: u64,
        k1: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    impl MixedHasher for SipHashBuilder {}

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_new_and_with_capacity() {
        let map: HashMap<i32, String> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        let map: HashMap<i32, String> = HashMap::with_capacity(100);
        assert!(map.capacity() >= 100);
        assert!(map.is_empty());
    }

    #[test]
    fn test_custom_hasher() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..100 {
            map.insert(i, i * 2);
        }
        for i in 0..100 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = HashMap::new();

        assert_eq!(map.insert(1, "hello".to_string()), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"world".to_string()));
    }

    #[test]
    fn test_get_mut() {
        let mut map = HashMap::new();
        map.insert(1, "hello".to_string());

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_get_key_value() {
        let mut map = HashMap::new();
        map.insert("key".to_string(), 10);
        assert_eq!(map.get_key_value("key"), Some((&"key".to_string(), &10)));
        assert_eq!(map.get_key_value("missing"), None);
    }

    #[test]
    fn test_contains_key() {
        let mut map = HashMap::new();
        assert!(!map.contains_key(&1));
        map.insert(1, "value");
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_remove() {
        let mut map = HashMap::new();
        map.insert(1, "hello");
        map.insert(2, "world");

        assert_eq!(map.remove(&1), Some("hello"));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));

        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove(&3), None);
    }

    #[test]
    fn test_remove_entry() {
        let mut map = HashMap::new();
        map.insert(1, "hello");
        assert_eq!(map.remove_entry(&1), Some((1, "hello")));
        assert_eq!(map.len(), 0);
        assert_eq!(map.remove_entry(&1), None);
    }

    #[test]
    fn test_heterogeneous_lookup() {
        let mut map: HashMap<String, i32> = HashMap::new();
        map.insert("alpha".to_string(), 1);
        map.insert("beta".to_string(), 2);

        // Query with &str against String keys; no allocation needed.
        assert_eq!(map.get("alpha"), Some(&1));
        assert!(map.contains_key("beta"));
        assert_eq!(map.remove("alpha"), Some(1));
        assert_eq!(map.get("alpha"), None);
    }

    #[test]
    fn test_clear() {
        let mut map = HashMap::new();
        map.insert(1, "hello");
        map.insert(2, "world");

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_reserve() {
        let mut map: HashMap<i32, String> = HashMap::new();
        map.reserve(1000);
        assert!(map.capacity() >= 1000);
    }

    #[test]
    fn test_entry_api() {
        let mut map = HashMap::new();

        let value = map.entry(1).or_insert("hello".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        let value = map.entry(1).or_insert("world".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        map.entry(2).or_insert_with(|| "computed".to_string());
        assert_eq!(map.get(&2), Some(&"computed".to_string()));

        map.entry(1)
            .and_modify(|v| v.push_str(" world"))
            .or_insert("default".to_string());
        assert_eq!(map.get(&1), Some(&"hello world".to_string()));

        assert_eq!(map.entry(3).key(), &3);
    }

    #[test]
    fn test_entry_or_default() {
        let mut map: HashMap<i32, Vec<i32>> = HashMap::new();

        map.entry(1).or_default().push(42);
        assert_eq!(map.get(&1), Some(&vec![42]));

        map.entry(1).or_default().push(24);
        assert_eq!(map.get(&1), Some(&vec![42, 24]));
    }

    #[test]
    fn test_occupied_entry() {
        let mut map = HashMap::new();
        map.insert(1, "hello".to_string());

        match map.entry(1) {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), &1);
                assert_eq!(entry.get(), &"hello".to_string());

                *entry.get_mut() = "world".to_string();
                assert_eq!(entry.get(), &"world".to_string());

                let old_value = entry.insert("new".to_string());
                assert_eq!(old_value, "world".to_string());

                let (key, value) = entry.remove_entry();
                assert_eq!(key, 1);
                assert_eq!(value, "new".to_string());
            }
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }

        assert!(map.is_empty());
    }

    #[test]
    fn test_vacant_entry() {
        let mut map = HashMap::new();

        match map.entry(1) {
            Entry::Vacant(entry) => {
                assert_eq!(entry.key(), &1);
                let value = entry.insert("hello".to_string());
                assert_eq!(value, &"hello".to_string());
            }
            Entry::Occupied(_) => panic!("expected vacant entry"),
        }

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"hello".to_string()));
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut map = HashMap::new();
        map.insert(1, "a");
        map.insert(2, "b");
        map.insert(3, "c");

        assert_eq!(map.get(&2), Some(&"b"));
        assert_eq!(map.len(), 3);
        let entries: Vec<(i32, &str)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);

        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, [1, 2, 3]);
        let values: Vec<&str> = map.values().copied().collect();
        assert_eq!(values, ["a", "b", "c"]);
    }

    #[test]
    fn test_remove_moves_last_entry_into_hole() {
        let mut map = HashMap::new();
        map.insert(1, "a");
        map.insert(2, "b");
        map.insert(3, "c");

        map.remove(&2);
        assert_eq!(map.get(&2), None);
        assert_eq!(map.len(), 2);
        let entries: Vec<(i32, &str)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(1, "a"), (3, "c")]);
    }

    #[test]
    fn test_reinserting_a_key_keeps_its_position() {
        let mut map = HashMap::from([(1, "a"), (2, "b"), (1, "c")]);
        assert_eq!(map.len(), 2);
        let entries: Vec<(i32, &str)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(1, "c"), (2, "b")]);

        map.insert(2, "d");
        let entries: Vec<(i32, &str)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(1, "c"), (2, "d")]);
    }

    #[test]
    fn test_growth_keeps_every_key_reachable() {
        let mut map = HashMap::new();
        let mut last_bucket_count = 0;
        for i in 0..100 {
            map.insert(i, i.to_string());
            assert!(map.bucket_count() >= last_bucket_count);
            last_bucket_count = map.bucket_count();
        }
        assert_eq!(map.len(), 100);
        for i in 0..100 {
            assert_eq!(map.get(&i), Some(&i.to_string()));
        }
        assert!(map.load_factor() <= 0.8);
    }

    #[test]
    fn test_insert_overwrite_flags() {
        let mut map = HashMap::new();
        assert_eq!(map.insert(7, "x"), None);
        assert_eq!(map.insert(7, "y"), Some("x"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&7), Some(&"y"));
    }

    #[test]
    fn test_failed_value_construction_leaves_map_unchanged() {
        let mut map = HashMap::new();
        map.insert(1, "a".to_string());
        map.insert(2, "b".to_string());
        let before: Vec<(i32, String)> = map.iter().map(|(&k, v)| (k, v.clone())).collect();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.entry(5).or_insert_with(|| panic!("construction failed"));
        }));
        assert!(result.is_err());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&5), None);
        let after: Vec<(i32, String)> = map.iter().map(|(&k, v)| (k, v.clone())).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = HashMap::from([(1, "a"), (2, "b")]);
        let b = HashMap::from([(2, "b"), (1, "a")]);
        assert_eq!(a, b);

        let c = HashMap::from([(1, "a"), (2, "x")]);
        assert_ne!(a, c);
        let d = HashMap::from([(1, "a")]);
        assert_ne!(a, d);
    }

    #[test]
    fn test_retain_is_order_independent() {
        let mut a = HashMap::from([(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        let mut b = HashMap::from([(4, "d"), (3, "c"), (2, "b"), (1, "a")]);
        a.retain(|&k, _| k % 2 == 0);
        b.retain(|&k, _| k % 2 == 0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_retain_large() {
        let mut map: HashMap<u32, u32> = (0..1000).map(|i| (i, i)).collect();
        map.retain(|&k, _| k % 7 == 0);
        assert_eq!(map.len(), 143);
        for i in 0..1000 {
            assert_eq!(map.contains_key(&i), i % 7 == 0);
        }
    }

    #[test]
    fn test_iter_mut_and_values_mut() {
        let mut map: HashMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
        for (_, v) in map.iter_mut() {
            *v *= 2;
        }
        for v in map.values_mut() {
            *v += 1;
        }
        for i in 0..10 {
            assert_eq!(map.get(&i), Some(&(i * 2 + 1)));
        }
    }

    #[test]
    fn test_drain() {
        let mut map = HashMap::new();
        map.insert(1, "one");
        map.insert(2, "two");

        let drained: Vec<(i32, &str)> = map.drain().collect();
        assert_eq!(drained, [(1, "one"), (2, "two")]);
        assert!(map.is_empty());

        map.insert(3, "three");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_into_iter() {
        let map = HashMap::from([(1, "a"), (2, "b"), (3, "c")]);
        let entries: Vec<(i32, &str)> = map.into_iter().collect();
        assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_collision_handling() {
        let mut map = HashMap::new();
        for i in 0..1000 {
            map.insert(i, i * 2);
        }
        assert_eq!(map.len(), 1000);

        for i in (0..1000).step_by(2) {
            assert_eq!(map.remove(&i), Some(i * 2));
        }
        assert_eq!(map.len(), 500);

        for i in (1..1000).step_by(2) {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_string_keys() {
        let mut map = HashMap::new();
        map.insert("hello".to_string(), 1);
        map.insert("world".to_string(), 2);
        map.insert("rust".to_string(), 3);

        assert_eq!(map.get("hello"), Some(&1));
        assert_eq!(map.get("world"), Some(&2));
        assert_eq!(map.get("rust"), Some(&3));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_index() {
        let map = HashMap::from([(1, "a"), (2, "b")]);
        assert_eq!(map[&1], "a");
        assert_eq!(map[&2], "b");
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn test_index_panics_on_missing_key() {
        let map: HashMap<i32, &str> = HashMap::new();
        let _ = map[&1];
    }

    #[test]
    fn test_hash_policy_queries() {
        let mut map: HashMap<i32, i32> = HashMap::new();
        assert_eq!(map.bucket_count(), 0);
        assert_eq!(map.load_factor(), 0.0);
        assert_eq!(map.max_load_factor(), 0.8);
        assert_eq!(map.max_len(), u32::MAX as usize);

        for i in 0..100 {
            map.insert(i, i);
        }
        assert!(map.load_factor() > 0.0);
        assert!(map.load_factor() <= map.max_load_factor());

        let before = map.bucket_count();
        map.set_max_load_factor(0.25);
        assert!(map.bucket_count() > before);
        for i in 0..100 {
            assert!(map.contains_key(&i));
        }
    }

    #[test]
    fn test_rehash_and_shrink() {
        let mut map: HashMap<i32, i32> = (0..1000).map(|i| (i, i)).collect();
        let grown = map.bucket_count();
        map.retain(|&k, _| k < 5);
        map.shrink_to_fit();
        assert!(map.bucket_count() < grown);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&i));
        }

        map.rehash(500);
        assert!((map.bucket_count() as f32 * map.max_load_factor()) >= 500.0);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_default_trait() {
        let map: HashMap<i32, String> = HashMap::default();
        assert!(map.is_empty());
    }

    #[test]
    fn test_complex_values() {
        let mut map = HashMap::new();
        map.insert("first".to_string(), vec![1, 2, 3]);
        map.insert("second".to_string(), vec![4, 5, 6]);

        if let Some(v) = map.get_mut("first") {
            v.push(4);
        }
        assert_eq!(map.get("first"), Some(&vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_clone() {
        let map = HashMap::from([(1, "a"), (2, "b")]);
        let mut cloned = map.clone();
        cloned.insert(3, "c");
        assert_eq!(map.len(), 2);
        assert_eq!(cloned.len(), 3);
        assert_eq!(cloned.get(&1), Some(&"a"));
    }

    #[test]
    fn test_debug() {
        let map = HashMap::from([(1, "a")]);
        assert_eq!(alloc::format!("{map:?}"), "{1: \"a\"}");
    }
}
