use core::borrow::Borrow;
use core::fmt::{self, Display};
use core::iter::{FromIterator, FusedIterator};
use core::{iter, mem};

use alloc::vec::{self, Vec};

use crate::chain::Chain;
use crate::config::MapConfig;
use crate::error::ConfigError;
use crate::hash::bucket_index;
use crate::order::{LiveKeys, OrderIndex};

/// A key-value pair stored in a bucket chain.
///
/// `order` is assigned when the key is first inserted and survives rehashes.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    order: usize,
}

type Buckets<K, V> = Vec<Option<Chain<Entry<K, V>>>>;

#[inline]
fn empty_buckets<K, V>(n: usize) -> Buckets<K, V> {
    iter::repeat_with(|| None).take(n).collect()
}

/// Flattens every chain and sorts the entries back into insertion order.
fn ordered_entries<K, V>(buckets: Buckets<K, V>) -> Vec<Entry<K, V>> {
    let mut entries: Vec<_> = buckets
        .into_iter()
        .flatten()
        .flatten()
        .collect();
    entries.sort_unstable_by_key(|e| e.order);
    entries
}

/// An insertion-order-preserving hash map with separately chained buckets.
///
/// Keys are placed by FNV-1a over their [`Display`] form and compared with
/// [`Eq`]. The bucket count is always prime; when `len / capacity` exceeds the
/// configured load factor the table grows and every entry is re-inserted in
/// its original order.
///
/// Removing a key and inserting it again moves it to the end of the
/// iteration order.
pub struct ChainMap<K, V> {
    buckets: Buckets<K, V>,
    order: OrderIndex<K>,
    len: usize,
    collisions: usize,
    config: MapConfig,
}

impl<K, V> ChainMap<K, V> {
    /// Creates an empty map with 19 buckets and a 0.75 load factor.
    #[inline]
    pub fn new() -> Self {
        Self::from_valid_config(MapConfig::new())
    }

    /// Creates an empty map with at least `n` buckets.
    ///
    /// `n` is rounded up to a prime; zero is treated as one.
    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self::from_valid_config(MapConfig::new().initial_capacity(n.max(1)))
    }

    /// Creates an empty map from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the capacity is zero or the load factor is
    /// not a finite positive number.
    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    #[inline]
    fn from_valid_config(config: MapConfig) -> Self {
        Self::with_bucket_count(config.bucket_count(), config)
    }

    #[inline]
    fn with_bucket_count(n: usize, config: MapConfig) -> Self {
        Self {
            buckets: empty_buckets(n),
            order: OrderIndex::new(),
            len: 0,
            collisions: 0,
            config,
        }
    }

    /// Returns the number of entries in the map.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets. Always prime.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Number of insertions that landed in an already occupied bucket since
    /// the last rehash or clear. Diagnostic only.
    #[inline(always)]
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    #[inline(always)]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }
}

impl<K, V> ChainMap<K, V>
where
    K: Eq + Display + Clone,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is replaced and its position
    /// in the iteration order is kept. Otherwise the entry is appended to the
    /// end of the order, and the table may grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let idx = bucket_index(&key, self.buckets.len());
        let chain = self.buckets[idx].get_or_insert_with(Chain::new);

        if let Some(entry) = chain.find_mut(|e| e.key == key) {
            return Some(mem::replace(&mut entry.value, value))
        }

        if !chain.is_empty() {
            self.collisions += 1
        }

        let order = self.order.record_insertion(key.clone());
        chain.push(Entry { key, value, order });
        self.len += 1;

        if self.load_factor() > self.config.load_factor {
            self.rehash()
        }

        None
    }

    /// Inserts a key-value pair and returns the map, so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.set("foo", 1).set("bar", 2).set("foo", 3);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get("foo"), Some(&3));
    /// ```
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Returns a reference to the value for `key`, or `None` if absent.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.locate(key).map(|e| &e.value)
    }

    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.locate_mut(key).map(|e| &mut e.value)
    }

    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.locate(key).map(|e| (&e.key, &e.value))
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.locate(key).is_some()
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.has(key)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// The capacity never shrinks. The key's ordinal is retired; inserting
    /// the key again places it at the end of the order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_chain_map::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// map.set("a", 1).set("b", 2);
    /// assert_eq!(map.remove("a"), Some(1));
    /// assert_eq!(map.remove("a"), None);
    ///
    /// map.set("a", 3);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["b", "a"]);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        let idx = bucket_index(key, self.buckets.len());
        let chain = self.buckets[idx].as_mut()?;
        let pos = chain.position(|e| e.key.borrow() == key)?;
        let entry = chain.remove(pos);

        let retired = self.order.record_deletion(entry.order);
        debug_assert!(retired.is_some());
        self.len -= 1;

        Some(entry.value)
    }

    /// Removes `key` and reports whether it was present.
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.remove(key).is_some()
    }

    /// Removes every entry and returns to the configured initial capacity.
    ///
    /// Ordinals restart from zero.
    pub fn clear(&mut self) {
        log::trace!("clearing {} entries from {} buckets", self.len, self.capacity());

        self.buckets = empty_buckets(self.config.bucket_count());
        self.order.clear();
        self.len = 0;
        self.collisions = 0;
    }

    /// Returns an iterator over the entries in insertion order.
    ///
    /// Each call starts a fresh traversal.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            keys: self.order.iter(),
            remaining: self.len,
        }
    }

    /// Same as [`iter`](Self::iter).
    #[inline]
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn locate<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        let idx = bucket_index(key, self.buckets.len());
        self.buckets[idx].as_ref()?.find(|e| e.key.borrow() == key)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn locate_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        let idx = bucket_index(key, self.buckets.len());
        self.buckets[idx].as_mut()?.find_mut(|e| e.key.borrow() == key)
    }

    /// Grows the bucket array and replays every entry through `insert` in
    /// insertion order.
    ///
    /// The replacement map is built off to the side and swapped in whole, so
    /// placement is always re-derived for the new capacity and ordinals come
    /// out compacted but in the same relative order.
    #[cold]
    fn rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = self
            .config
            .growth
            .grow(self.len, old_capacity, self.config.load_factor);

        log::debug!(
            "rehashing {} entries ({} ordinals issued): {} -> {} buckets",
            self.len,
            self.order.next_order(),
            old_capacity,
            new_capacity
        );

        let entries = ordered_entries(mem::take(&mut self.buckets));

        let mut grown = Self::with_bucket_count(new_capacity, self.config);
        grown.order = OrderIndex::with_capacity(entries.len());
        for Entry { key, value, .. } in entries {
            grown.insert(key, value);
        }

        debug_assert_eq!(grown.len, self.len);
        debug_assert_eq!(grown.order.live(), grown.len);
        debug_assert_eq!(grown.capacity(), new_capacity);

        log::debug!(
            "rehash complete: {} buckets, {} collisions",
            new_capacity,
            grown.collisions
        );

        *self = grown;
    }

    #[cfg(test)]
    pub(crate) fn next_order(&self) -> usize {
        self.order.next_order()
    }
}

/// Borrowing iterator over `(key, value)` pairs in insertion order.
pub struct Iter<'a, K, V> {
    map: &'a ChainMap<K, V>,
    keys: LiveKeys<'a, K>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Display,
{
    type Item = (&'a K, &'a V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        for key in self.keys.by_ref() {
            let idx = bucket_index(key, map.buckets.len());
            let found = map.buckets[idx]
                .as_ref()
                .and_then(|chain| chain.find(|e| e.key == *key));

            if let Some(entry) = found {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value))
            }
        }
        None
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Eq + Display, V> ExactSizeIterator for Iter<'_, K, V> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Eq + Display, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            keys: self.keys.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug + Eq + Display,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Keys of a [`ChainMap`] in insertion order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Eq + Display, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Eq + Display, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K: Eq + Display, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K: fmt::Debug + Eq + Display, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Values of a [`ChainMap`] in insertion order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Eq + Display, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Eq + Display, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K: Eq + Display, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K: Eq + Display, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator over `(key, value)` pairs in insertion order.
pub struct IntoIter<K, V> {
    entries: vec::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|e| (e.key, e.value))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back().map(|e| (e.key, e.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.as_slice().iter().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

impl<K, V> IntoIterator for ChainMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { entries: ordered_entries(self.buckets).into_iter() }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainMap<K, V>
where
    K: Eq + Display + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ChainMap<K, V>
where
    K: Eq + Display + Clone,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = ChainMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for ChainMap<K, V>
where
    K: Eq + Display + Clone,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        iter.into_iter().for_each(move |(k, v)| _ = self.insert(k, v));
    }
}

impl<K, V> Default for ChainMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for ChainMap<K, V>
where
    K: Clone,
    V: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            order: self.order.clone(),
            len: self.len,
            collisions: self.collisions,
            config: self.config,
        }
    }
}

/// Two maps are equal when they hold equal pairs in the same order.
impl<K, V> PartialEq for ChainMap<K, V>
where
    K: Eq + Display + Clone,
    V: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false
        }
        self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for ChainMap<K, V>
where
    K: Eq + Display + Clone,
    V: Eq,
{
}

impl<K, V> fmt::Debug for ChainMap<K, V>
where
    K: fmt::Debug + Eq + Display + Clone,
    V: fmt::Debug,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrowthPolicy;
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec;

    /// Every instance renders the same, so all of them share a bucket.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SameBucket(u32);

    impl Display for SameBucket {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("same")
        }
    }

    fn keys_of<K: Eq + Display + Clone + Copy, V>(m: &ChainMap<K, V>) -> Vec<K> {
        m.keys().copied().collect()
    }

    #[test]
    fn test_new_and_default_and_with_capacity() {
        let a: ChainMap<u64, u64> = ChainMap::new();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 19);
        let b: ChainMap<u64, u64> = ChainMap::default();
        assert!(b.is_empty());
        let c: ChainMap<u64, u64> = ChainMap::with_capacity(10);
        assert_eq!(c.capacity(), 11);
        let d: ChainMap<u64, u64> = ChainMap::with_capacity(0);
        assert_eq!(d.capacity(), 2);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let err = ChainMap::<u8, u8>::with_config(MapConfig::new().load_factor(f64::NAN));
        assert!(matches!(err, Err(ConfigError::InvalidLoadFactor(_))));
        let err = ChainMap::<u8, u8>::with_config(MapConfig::new().initial_capacity(0));
        assert!(matches!(err, Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_insert_get_remove_iter_basic() {
        let mut m = ChainMap::new();
        m.insert(42u64, "foo");
        m.insert(7u64, "bar");
        m.insert(99u64, "baz");

        assert_eq!(m.len(), 3);
        assert_eq!(m.get(&42), Some(&"foo"));
        assert_eq!(m.remove(&7), Some("bar"));
        assert_eq!(m.get(&7), None);
        assert_eq!(m.len(), 2);

        let items: Vec<_> = m.iter().collect();
        assert_eq!(items, vec![(&42, &"foo"), (&99, &"baz")]);
    }

    #[test]
    fn test_overwrite_keeps_ordinal() {
        let mut m = ChainMap::new();
        m.set(1, "a").set(2, "b");
        assert_eq!(m.insert(1, "c"), Some("a"));
        assert_eq!(m.len(), 2);
        assert_eq!(m.next_order(), 2);
        assert_eq!(
            m.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(1, "c"), (2, "b")]
        );
    }

    #[test]
    fn test_reinsert_moves_to_end() {
        let mut m = ChainMap::new();
        m.set("a", 1).set("b", 2);
        assert!(m.delete("a"));
        m.set("a", 3);
        assert_eq!(keys_of(&m), vec!["b", "a"]);
        assert_eq!(m.get("a"), Some(&3));
        // the old slot is a hole, the new one is appended
        assert_eq!(m.next_order(), 3);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut m: ChainMap<u32, u32> = ChainMap::new();
        m.insert(1, 1);
        assert!(!m.delete(&123));
        assert_eq!(m.remove(&123), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut m = ChainMap::new();
        m.insert(String::from("key"), 1);
        assert_eq!(m.get("key"), Some(&1));
        assert!(m.has("key"));
        assert!(m.contains_key("key"));
        assert_eq!(m.get_key_value("key"), Some((&String::from("key"), &1)));
        assert!(m.delete("key"));
        assert!(!m.has("key"));
    }

    #[test]
    fn test_get_mut_changes_value() {
        let mut m = ChainMap::new();
        m.insert(10, String::from("hello"));
        if let Some(s) = m.get_mut(&10) {
            s.push_str("_world");
        }
        assert_eq!(m.get(&10).map(|s| s.as_str()), Some("hello_world"));
    }

    #[test]
    fn test_forced_collisions_stay_independent() {
        let mut m = ChainMap::new();
        for i in 0..5 {
            m.insert(SameBucket(i), i * 10);
        }
        assert_eq!(m.collisions(), 4);
        for i in 0..5 {
            assert_eq!(m.get(&SameBucket(i)), Some(&(i * 10)));
        }

        assert_eq!(m.remove(&SameBucket(2)), Some(20));
        assert_eq!(m.get(&SameBucket(2)), None);
        assert_eq!(m.get(&SameBucket(3)), Some(&30));
        assert_eq!(
            m.keys().map(|k| k.0).collect::<Vec<_>>(),
            vec![0, 1, 3, 4]
        );
    }

    #[test]
    fn test_collisions_counter() {
        let mut m = ChainMap::new();
        // "foo" and "bar" share bucket 4 of 19
        m.set("foo", 1).set("bar", 2).set("baz", 3);
        assert_eq!(m.collisions(), 1);
        // overwrite does not count
        m.set("bar", 5);
        assert_eq!(m.collisions(), 1);
    }

    #[test]
    fn test_growth_scenario_default_policy() {
        let mut m = ChainMap::new();
        m.set("foo".to_string(), 1).set("bar".to_string(), 2).set("baz".to_string(), 3);
        assert_eq!(m.len(), 3);

        for i in 0..11 {
            m.insert(i.to_string(), i);
        }
        assert_eq!(m.len(), 14);
        assert_eq!(m.capacity(), 19);
        assert!(m.load_factor() <= 0.75);
        assert_eq!(m.collisions(), 2);

        m.insert("extra".to_string(), 99);
        assert_eq!(m.capacity(), 41);
        assert!(m.load_factor() <= 0.75);
        assert_eq!(m.next_order(), 15);
    }

    #[test]
    fn test_growth_scenario_double_size_policy() {
        let config = MapConfig::new().growth(GrowthPolicy::DoubleSize);
        let mut m = ChainMap::with_config(config).unwrap();
        let mut expected = vec![
            String::from("foo"),
            String::from("bar"),
            String::from("baz"),
        ];
        m.set(expected[0].clone(), 1)
            .set(expected[1].clone(), 2)
            .set(expected[2].clone(), 3);

        for i in 0..11 {
            m.insert(i.to_string(), i);
            expected.push(i.to_string());
        }
        assert_eq!(m.capacity(), 19);

        m.insert("11".to_string(), 11);
        expected.push("11".to_string());
        assert_eq!(m.capacity(), 31);
        assert_eq!(m.len(), 15);

        assert_eq!(m.keys().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(m.get("foo"), Some(&1));
        for i in 0..12 {
            assert_eq!(m.get(i.to_string().as_str()), Some(&i));
        }
    }

    #[test]
    fn test_rehash_compacts_ordinals_and_keeps_order() {
        let mut m = ChainMap::with_capacity(5);
        m.set(1, ()).set(2, ()).set(3, ());
        m.delete(&2);
        m.set(4, ());
        assert_eq!(m.capacity(), 5);
        assert_eq!(m.next_order(), 4);

        // 4 / 5 > 0.75
        m.set(5, ());
        assert_eq!(m.capacity(), 11);
        assert_eq!(m.next_order(), 4);
        assert_eq!(keys_of(&m), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut m = ChainMap::with_capacity(3);
        for i in 0..20 {
            m.insert(i, i);
        }
        assert!(m.capacity() > 3);

        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 3);
        assert_eq!(m.collisions(), 0);
        assert_eq!(m.next_order(), 0);
        assert_eq!(m.iter().next(), None);

        m.insert(7, 7);
        assert_eq!(keys_of(&m), vec![7]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let m: ChainMap<_, _> = vec![(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
        let mut first = m.keys();
        assert_eq!(first.next(), Some(&1));
        assert_eq!(m.keys().collect::<Vec<_>>(), vec![&1, &2, &3]);
        assert_eq!(first.next(), Some(&2));
        assert_eq!(m.values().collect::<Vec<_>>(), vec![&'a', &'b', &'c']);
        assert_eq!(m.entries().count(), 3);
    }

    #[test]
    fn test_iter_exact_size_and_fused() {
        let mut m = ChainMap::new();
        m.set(1, "a").set(2, "b").set(3, "c");
        m.remove(&2);
        let mut it = m.iter();
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some((&1, &"a")));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some((&3, &"c")));
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_into_iter_is_ordered() {
        let mut m = ChainMap::with_capacity(2);
        for i in (0..30).rev() {
            m.insert(i, i * 2);
        }
        m.remove(&10);
        m.insert(10, 0);
        let owned: Vec<_> = m.into_iter().collect();
        assert_eq!(owned.len(), 30);
        assert_eq!(owned.first(), Some(&(29, 58)));
        assert_eq!(owned.last(), Some(&(10, 0)));
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let src = vec![(1u32, "a"), (2, "b"), (3, "c")];
        let map: ChainMap<_, _> = src.clone().into_iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), src);

        let mut m2 = ChainMap::new();
        m2.extend(src.clone());
        m2.extend(vec![(1, "z")]);
        assert_eq!(m2.len(), 3);
        assert_eq!(m2.get(&1), Some(&"z"));
    }

    #[test]
    fn test_clone_and_partial_eq() {
        let mut a = ChainMap::new();
        a.set(1u8, 10u8).set(2, 20);
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.remove(&1);
        assert_ne!(a, c);

        // same pairs, different order
        let mut d = ChainMap::new();
        d.set(2u8, 20u8).set(1, 10);
        assert_ne!(a, d);
    }

    #[test]
    fn test_debug_output() {
        let mut m = ChainMap::new();
        m.set(5, "five").set(6, "six");
        assert_eq!(format!("{:?}", m), r#"{5: "five", 6: "six"}"#);
        assert_eq!(format!("{:?}", m.keys()), "[5, 6]");
    }
}
