//! Insertion-order index.
//!
//! A growable array indexed by ordinal. Deleting a key leaves a hole that is
//! never reused, so ordinals stay stable for the lifetime of their entry and
//! iteration is just a walk that skips the holes.

use core::iter::FusedIterator;
use core::slice;

use alloc::vec::Vec;

#[derive(Debug, Clone)]
pub(crate) struct OrderIndex<K> {
    slots: Vec<Option<K>>,
    live: usize,
}

impl<K> OrderIndex<K> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), live: 0 }
    }

    #[inline]
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { slots: Vec::with_capacity(n), live: 0 }
    }

    /// Appends `key` at the next ordinal and returns that ordinal.
    #[inline]
    pub(crate) fn record_insertion(&mut self, key: K) -> usize {
        let order = self.slots.len();
        self.slots.push(Some(key));
        self.live += 1;
        order
    }

    /// Holes the slot at `order`, returning the key that lived there.
    #[inline]
    pub(crate) fn record_deletion(&mut self, order: usize) -> Option<K> {
        let key = self.slots.get_mut(order)?.take()?;
        self.live -= 1;
        Some(key)
    }

    /// The ordinal the next insertion will receive.
    #[inline(always)]
    pub(crate) fn next_order(&self) -> usize {
        self.slots.len()
    }

    /// Number of non-hole slots.
    #[inline(always)]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.live = 0;
    }

    #[inline]
    pub(crate) fn iter(&self) -> LiveKeys<'_, K> {
        LiveKeys { slots: self.slots.iter() }
    }
}

/// Live keys of an [`OrderIndex`], oldest first.
#[derive(Debug)]
pub(crate) struct LiveKeys<'a, K> {
    slots: slice::Iter<'a, Option<K>>,
}

impl<K> Clone for LiveKeys<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        Self { slots: self.slots.clone() }
    }
}

impl<'a, K> Iterator for LiveKeys<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl<K> FusedIterator for LiveKeys<'_, K> {}
