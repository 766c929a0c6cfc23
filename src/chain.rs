//! Per-bucket collision chain.
//!
//! An owned, array-backed sequence. Entries keep their append order inside a
//! bucket; removal shifts the tail down instead of swapping.

use alloc::vec::{self, Vec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chain<T> {
    items: Vec<T>,
}

impl<T> Chain<T> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    pub(crate) fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| pred(item))
    }

    #[cfg_attr(feature = "inline-more", inline)]
    pub(crate) fn find_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.items.iter_mut().find(|item| pred(item))
    }

    /// Index of the first item matching `pred`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub(crate) fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }

    #[inline]
    pub(crate) fn remove(&mut self, idx: usize) -> T {
        self.items.remove(idx)
    }
}

impl<T> Default for Chain<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
