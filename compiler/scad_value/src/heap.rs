//! Shared heap storage for value payloads.
//!
//! Every payload that is shared between clones of a [`Value`](crate::Value)
//! (text, vector storage, range parameters, closures) lives behind a
//! `Heap<T>`. The constructor is crate-private, so the only way to obtain
//! shared storage from outside the crate is through the payload factories
//! (`Utf8Text::new`, `VectorType::new`, `Value::range`, ...).
//!
//! Cloning a `Heap<T>` is O(1): it bumps a reference count. Values are
//! evaluated on a single thread, so the count is non-atomic.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted, immutable-by-default storage for value payloads.
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Take the payload back if this is the last owner.
    #[inline]
    pub(crate) fn try_unwrap(this: Self) -> Result<T, Self> {
        Rc::try_unwrap(this.0).map_err(Heap)
    }
}

impl<T: Clone> Heap<T> {
    /// Mutable access, copying the payload first if it is shared.
    #[inline]
    pub(crate) fn make_mut(this: &mut Self) -> &mut T {
        Rc::make_mut(&mut this.0)
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of handles currently sharing this allocation.
    #[cfg(test)]
    pub(crate) fn share_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + PartialOrd> PartialOrd for Heap<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

#[cfg(test)]
mod tests;
