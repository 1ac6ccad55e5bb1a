//! Shared heap storage for runtime values.

// Heap<T> is the owning wrapper around Rc<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of Heap<T>"
)]

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted storage for heap-allocated values.
///
/// The constructor is crate-private, so values are only built through the
/// `Value` factory methods. Cloning a `Heap` shares the allocation; object
/// identity is allocation identity (see [`Heap::ptr_eq`]).
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether both handles share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the allocation, for identity bookkeeping only.
    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl From<&str> for Heap<str> {
    fn from(value: &str) -> Self {
        Heap(Rc::from(value))
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
        fmt::Debug::fmt(&*self.0, f)
    }
}
