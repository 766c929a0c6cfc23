//! [`ChainSet`] and its iterators.

use core::borrow::Borrow;
use core::fmt::{self, Display};
use core::iter::{FromIterator, FusedIterator};

use crate::config::MapConfig;
use crate::error::ConfigError;
use crate::map::{self, ChainMap};

/// An insertion-order-preserving set backed by a [`ChainMap`] with `()` values.
///
/// # Examples
///
/// ```
/// use ordered_chain_map::ChainSet;
///
/// let mut set = ChainSet::new();
/// set.add("x").add("y").add("x");
/// assert_eq!(set.len(), 2);
///
/// assert!(set.delete("x"));
/// set.add("x");
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["y", "x"]);
/// ```
pub struct ChainSet<T> {
    map: ChainMap<T, ()>,
}

impl<T> ChainSet<T> {
    #[inline]
    pub fn new() -> Self {
        Self { map: ChainMap::new() }
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self { map: ChainMap::with_capacity(n) }
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        Ok(Self { map: ChainMap::with_config(config)? })
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
}

impl<T> ChainSet<T>
where
    T: Eq + Display + Clone,
{
    /// Adds `value`, returning `true` if it was not already present.
    ///
    /// Adding a value that is already present keeps its position.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Adds `value` and returns the set, so calls can be chained.
    #[inline]
    pub fn add(&mut self, value: T) -> &mut Self {
        self.map.set(value, ());
        self
    }

    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.map.has(value)
    }

    #[inline]
    pub fn has<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.map.has(value)
    }

    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.map.get_key_value(value).map(|(k, _)| k)
    }

    /// Removes `value`, returning `true` if it was present.
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.map.delete(value)
    }

    #[inline]
    pub fn delete<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Display,
    {
        self.map.delete(value)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// Returns an iterator over the values in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }
}

/// Borrowing iterator over a [`ChainSet`] in insertion order.
pub struct Iter<'a, T> {
    inner: map::Keys<'a, T, ()>,
}

impl<'a, T: Eq + Display> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Eq + Display> ExactSizeIterator for Iter<'_, T> {}

impl<T: Eq + Display> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: fmt::Debug + Eq + Display> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator over a [`ChainSet`] in insertion order.
pub struct IntoIter<T> {
    inner: map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, ())| k)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.inner.len()).finish()
    }
}

impl<T> IntoIterator for ChainSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self.map.into_iter() }
    }
}

impl<'a, T> IntoIterator for &'a ChainSet<T>
where
    T: Eq + Display + Clone,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for ChainSet<T>
where
    T: Eq + Display + Clone,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = ChainSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for ChainSet<T>
where
    T: Eq + Display + Clone,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|v| (v, ())));
    }
}

impl<T> Default for ChainSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ChainSet<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { map: self.map.clone() }
    }
}

impl<T> PartialEq for ChainSet<T>
where
    T: Eq + Display + Clone,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for ChainSet<T> where T: Eq + Display + Clone {}

impl<T> fmt::Debug for ChainSet<T>
where
    T: fmt::Debug + Eq + Display + Clone,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
