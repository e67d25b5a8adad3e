#![allow(unsafe_code)]

use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::NonNull,
    slice::{self, SliceIndex},
};

use allocator_api2::alloc::{Allocator, Global};

use crate::{Box, FixedArray, IntoIter, Vec, raw::RawBuf};

impl<T, A: Allocator> Deref for FixedArray<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for FixedArray<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for FixedArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for FixedArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for FixedArray<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for FixedArray<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

// Out-of-range positions panic, exactly like slice indexing.
impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for FixedArray<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for FixedArray<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for FixedArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for FixedArray<T, A> {
    fn clone(&self) -> Self {
        self.clone_in(self.allocator().clone())
    }
}

/// An empty array; the state `core::mem::take` leaves behind.
impl<T, A: Allocator + Default> Default for FixedArray<T, A> {
    fn default() -> Self {
        FixedArray::empty_in(A::default())
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl<T, U, A, B> PartialEq<FixedArray<U, B>> for FixedArray<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &FixedArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for FixedArray<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for FixedArray<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for FixedArray<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<Vec<U>> for FixedArray<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for FixedArray<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for FixedArray<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for FixedArray<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for FixedArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T, const N: usize> From<[T; N]> for FixedArray<T> {
    fn from(array: [T; N]) -> Self {
        FixedArray::from_array_in(array, Global)
    }
}

impl<T: Clone> From<&[T]> for FixedArray<T> {
    fn from(values: &[T]) -> Self {
        FixedArray::from_slice_in(values, Global)
    }
}

/// Adopts the allocation of the boxed slice without copying.
impl<T> From<Box<[T]>> for FixedArray<T> {
    fn from(boxed: Box<[T]>) -> Self {
        let len = boxed.len();
        let ptr = Box::into_raw(boxed).cast::<T>();
        // SAFETY: `Box` pointers are non-null, and the global allocator
        // produced this one with the layout of `[T; len]`.
        let buf = unsafe { RawBuf::from_raw_parts_in(NonNull::new_unchecked(ptr), len, Global) };
        FixedArray::from_raw_buf(buf)
    }
}

/// Drops any spare capacity first, then adopts the allocation.
impl<T> From<Vec<T>> for FixedArray<T> {
    fn from(vec: Vec<T>) -> Self {
        FixedArray::from(vec.into_boxed_slice())
    }
}

impl<T> From<FixedArray<T>> for Box<[T]> {
    fn from(array: FixedArray<T>) -> Self {
        array.into_boxed_slice()
    }
}

impl<T> From<FixedArray<T>> for Vec<T> {
    fn from(array: FixedArray<T>) -> Self {
        array.into_vec()
    }
}

impl<T> FromIterator<T> for FixedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FixedArray::from(iter.into_iter().collect::<Vec<T>>())
    }
}

// =============================================================================
// Iteration
// =============================================================================

impl<T, A: Allocator> IntoIterator for FixedArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self.into_raw_buf())
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a FixedArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut FixedArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}
