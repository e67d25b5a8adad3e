#![allow(unsafe_code)]

//! Random-access cursors over a [`FixedArray`](crate::FixedArray).
//!
//! A cursor is a position in `0..=len` paired with a borrow of the array, in
//! the style of C++ iterators: `begin()` is the first element, `end()` is one
//! past the last, and a cursor can be moved by any offset, compared with
//! another cursor of the same array, or subtracted from one.
//!
//! ```
//! use dynarray_core::{Seek, fixed_array};
//!
//! let a = fixed_array![1, 2, 3, 4];
//! let mut it = a.begin();
//! it += 2;
//! assert_eq!(it.get(), Some(&3));
//! assert_eq!(a.end() - it, 2);
//! assert_eq!(it.slice_to(&a.end()), &[3, 4]);
//!
//! let mut rev = a.rbegin();
//! assert_eq!(rev.get(), Some(&4));
//! rev.step_forward();
//! assert_eq!(rev.get(), Some(&3));
//! ```
//!
//! The borrow checker keeps cursors valid: the array cannot be moved or
//! reassigned while a cursor exists. Element values may still change through
//! a [`CursorMut`].

use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

/// Position arithmetic shared by every cursor.
pub trait Seek: Sized {
    /// Current position, in `0..=extent()`.
    fn position(&self) -> usize;

    /// Number of elements in the underlying sequence.
    fn extent(&self) -> usize;

    /// Moves to an absolute position.
    ///
    /// # Panics
    ///
    /// Panics if `pos > extent()`.
    fn set_position(&mut self, pos: usize);

    /// Whether both cursors walk the same sequence.
    fn same_sequence(&self, other: &Self) -> bool;

    /// Moves by `offset` positions (backwards if negative).
    ///
    /// # Panics
    ///
    /// Panics if the new position falls outside `0..=extent()`.
    #[track_caller]
    fn seek_by(&mut self, offset: isize) {
        let pos = self
            .position()
            .checked_add_signed(offset)
            .filter(|&pos| pos <= self.extent());
        match pos {
            Some(pos) => self.set_position(pos),
            None => out_of_bounds(self.position(), offset, self.extent()),
        }
    }

    #[track_caller]
    fn step_forward(&mut self) {
        self.seek_by(1);
    }

    #[track_caller]
    fn step_back(&mut self) {
        self.seek_by(-1);
    }

    /// Whether the cursor sits one past the last element.
    fn is_end(&self) -> bool {
        self.position() == self.extent()
    }

    /// Signed distance from `origin` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if the cursors belong to different sequences.
    #[track_caller]
    fn offset_from(&self, origin: &Self) -> isize {
        assert!(
            self.same_sequence(origin),
            "cannot measure the distance between cursors of different arrays"
        );
        self.position() as isize - origin.position() as isize
    }
}

#[cold]
#[track_caller]
fn out_of_bounds(pos: usize, offset: isize, extent: usize) -> ! {
    panic!("cursor moved out of bounds: position {pos} + offset {offset} outside 0..={extent}");
}

fn same_slice<T>(a: *const [T], b: *const [T]) -> bool {
    ptr::eq(a, b)
}

// =============================================================================
// Cursor
// =============================================================================

/// Read-only cursor.
pub struct Cursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], pos: usize) -> Self {
        debug_assert!(pos <= slice.len());
        Cursor { slice, pos }
    }

    /// The element under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.pos)
    }

    /// The element under the cursor, without checking.
    ///
    /// # Safety
    ///
    /// The cursor must not be at the end.
    pub unsafe fn get_unchecked(&self) -> &'a T {
        // SAFETY: the caller guarantees `pos < len`.
        unsafe { self.slice.get_unchecked(self.pos) }
    }

    /// The element `offset` positions away, if any.
    pub fn peek(&self, offset: isize) -> Option<&'a T> {
        self.slice.get(self.pos.checked_add_signed(offset)?)
    }

    /// The elements from this cursor up to `end`.
    ///
    /// # Panics
    ///
    /// Panics if `end` belongs to another array or comes before `self`.
    #[track_caller]
    pub fn slice_to(&self, end: &Self) -> &'a [T] {
        assert!(
            self.same_sequence(end),
            "cannot slice between cursors of different arrays"
        );
        &self.slice[self.pos..end.pos]
    }

    /// The elements from this cursor to the end of the array.
    pub fn remaining(&self) -> &'a [T] {
        &self.slice[self.pos..]
    }
}

impl<T> Seek for Cursor<'_, T> {
    fn position(&self) -> usize {
        self.pos
    }

    fn extent(&self) -> usize {
        self.slice.len()
    }

    #[track_caller]
    fn set_position(&mut self, pos: usize) {
        assert!(pos <= self.slice.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    fn same_sequence(&self, other: &Self) -> bool {
        same_slice(self.slice, other.slice)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}

// =============================================================================
// CursorMut
// =============================================================================

/// Cursor that can write through to the element under it.
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    pos: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos <= slice.len());
        CursorMut { slice, pos }
    }

    pub fn get(&self) -> Option<&T> {
        self.slice.get(self.pos)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slice.get_mut(self.pos)
    }

    /// Consumes the cursor, keeping the borrow of the element under it.
    pub fn into_mut(self) -> Option<&'a mut T> {
        let CursorMut { slice, pos } = self;
        slice.get_mut(pos)
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.slice, self.pos)
    }
}

impl<T> Seek for CursorMut<'_, T> {
    fn position(&self) -> usize {
        self.pos
    }

    fn extent(&self) -> usize {
        self.slice.len()
    }

    #[track_caller]
    fn set_position(&mut self, pos: usize) {
        assert!(pos <= self.slice.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    fn same_sequence(&self, other: &Self) -> bool {
        same_slice(&*self.slice, &*other.slice)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}

// =============================================================================
// Reverse
// =============================================================================

/// Walks a cursor's sequence back to front.
///
/// Like C++'s `std::reverse_iterator`, it wraps a `base` cursor and refers to
/// the element just before it, so `rbegin()` wraps `end()` and `rend()` wraps
/// `begin()`. Its own [`position`](Seek::position) counts from the back.
#[derive(Debug, Clone, Copy)]
pub struct Reverse<C> {
    base: C,
}

impl<C: Seek> Reverse<C> {
    pub fn new(base: C) -> Self {
        Reverse { base }
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn into_base(self) -> C {
        self.base
    }

    /// Index of the referenced element in the underlying sequence.
    fn target(&self) -> Option<usize> {
        self.base.position().checked_sub(1)
    }
}

impl<C: Seek> Seek for Reverse<C> {
    fn position(&self) -> usize {
        self.base.extent() - self.base.position()
    }

    fn extent(&self) -> usize {
        self.base.extent()
    }

    #[track_caller]
    fn set_position(&mut self, pos: usize) {
        let extent = self.extent();
        assert!(pos <= extent, "cursor position {pos} out of bounds");
        self.base.set_position(extent - pos);
    }

    fn same_sequence(&self, other: &Self) -> bool {
        self.base.same_sequence(&other.base)
    }
}

impl<'a, T> Reverse<Cursor<'a, T>> {
    pub fn get(&self) -> Option<&'a T> {
        self.base.slice.get(self.target()?)
    }

    /// # Safety
    ///
    /// The cursor must not be at the end (its base must not be `begin()`).
    pub unsafe fn get_unchecked(&self) -> &'a T {
        // SAFETY: the caller guarantees `0 < base.pos <= len`.
        unsafe { self.base.slice.get_unchecked(self.base.pos - 1) }
    }
}

impl<'a, T> Reverse<CursorMut<'a, T>> {
    pub fn get(&self) -> Option<&T> {
        self.base.slice.get(self.target()?)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        let target = self.target()?;
        self.base.slice.get_mut(target)
    }

    pub fn into_mut(self) -> Option<&'a mut T> {
        let target = self.target()?;
        let CursorMut { slice, .. } = self.base;
        slice.get_mut(target)
    }
}

// =============================================================================
// Operators
// =============================================================================

macro_rules! impl_cursor_ops {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> AddAssign<isize> for $ty {
            #[track_caller]
            fn add_assign(&mut self, offset: isize) {
                self.seek_by(offset);
            }
        }

        impl<$($generics)*> SubAssign<isize> for $ty {
            #[track_caller]
            fn sub_assign(&mut self, offset: isize) {
                match offset.checked_neg() {
                    Some(offset) => self.seek_by(offset),
                    None => out_of_bounds(self.position(), offset, self.extent()),
                }
            }
        }

        impl<$($generics)*> Add<isize> for $ty {
            type Output = Self;

            #[track_caller]
            fn add(mut self, offset: isize) -> Self {
                self += offset;
                self
            }
        }

        impl<$($generics)*> Sub<isize> for $ty {
            type Output = Self;

            #[track_caller]
            fn sub(mut self, offset: isize) -> Self {
                self -= offset;
                self
            }
        }

        impl<$($generics)*> Sub for $ty {
            type Output = isize;

            #[track_caller]
            fn sub(self, origin: Self) -> isize {
                self.offset_from(&origin)
            }
        }

        impl<$($generics)*> PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.same_sequence(other) && self.position() == other.position()
            }
        }

        impl<$($generics)*> Eq for $ty {}

        /// Cursors of different arrays are unordered.
        impl<$($generics)*> PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.same_sequence(other)
                    .then(|| self.position().cmp(&other.position()))
            }
        }
    };
}

impl_cursor_ops!(['a, T] Cursor<'a, T>);
impl_cursor_ops!(['a, T] CursorMut<'a, T>);
impl_cursor_ops!([C: Seek] Reverse<C>);

#[cfg(test)]
mod tests {
    use super::Seek;
    use crate::{FixedArray, fixed_array};

    #[test]
    fn forward_walk() {
        let a = fixed_array![1, 2, 3];
        let mut it = a.begin();
        let mut seen = vec![];
        while it != a.end() {
            seen.push(*it.get().unwrap());
            it.step_forward();
        }
        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(it.get(), None);
        assert!(it.is_end());
    }

    #[test]
    fn reverse_walk() {
        let a = fixed_array![1, 2, 3];
        let mut it = a.rbegin();
        let mut seen = vec![];
        while it != a.rend() {
            seen.push(*it.get().unwrap());
            it += 1;
        }
        assert_eq!(seen, [3, 2, 1]);
        assert_eq!(it.get(), None);
        assert_eq!(*it.base(), a.begin());
    }

    #[test]
    fn reverse_base_is_forward_end() {
        let a = fixed_array![1, 2, 3];
        assert_eq!(*a.rbegin().base(), a.end());
        assert_eq!(*a.rend().base(), a.begin());
    }

    #[test]
    fn random_access_arithmetic() {
        let a = FixedArray::from_fn(10, |i| i * 10);
        let begin = a.begin();
        let it = begin + 7;
        assert_eq!(it.get(), Some(&70));
        assert_eq!((it - 3isize).get(), Some(&40));
        assert_eq!(it - begin, 7);
        assert_eq!(begin - it, -7);
        assert_eq!(it.peek(-7), Some(&0));
        assert_eq!(it.peek(3), None);
        assert_eq!(it.peek(-8), None);
        assert!(begin < it);
        assert!(it <= a.end());
    }

    #[test]
    fn reverse_ordering_is_inverted() {
        let a = fixed_array![1, 2, 3, 4];
        let first = a.rbegin();
        let later = first + 2;
        assert!(first < later);
        assert!(later.base() < first.base());
        assert_eq!(later.get(), Some(&2));
        assert_eq!(later - first, 2);
    }

    #[test]
    fn cursors_of_different_arrays_are_unordered() {
        let a = fixed_array![1, 2];
        let b = fixed_array![1, 2];
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin().partial_cmp(&b.begin()), None);
    }

    #[test]
    #[should_panic(expected = "cursor moved out of bounds")]
    fn moving_past_end_panics() {
        let a = fixed_array![1, 2];
        let _ = a.end() + 1;
    }

    #[test]
    #[should_panic(expected = "cursor moved out of bounds")]
    fn moving_before_begin_panics() {
        let a = fixed_array![1, 2];
        let mut it = a.begin();
        it.step_back();
    }

    #[test]
    #[should_panic(expected = "different arrays")]
    fn distance_across_arrays_panics() {
        let a = fixed_array![1, 2];
        let b = fixed_array![1, 2];
        let _ = a.end() - b.begin();
    }

    #[test]
    fn cursor_mut_writes_through() {
        let mut a = fixed_array![1, 2, 3];
        let mut it = a.begin_mut();
        while let Some(value) = it.get_mut() {
            *value *= 10;
            it.step_forward();
        }
        assert!(it.is_end());
        assert_eq!(a, [10, 20, 30]);

        let mut rev = a.rbegin_mut();
        *rev.get_mut().unwrap() = 0;
        rev += 2;
        *rev.into_mut().unwrap() = 1;
        assert_eq!(a, [1, 20, 0]);
    }

    #[test]
    fn cursor_mut_as_cursor() {
        let mut a = fixed_array![5, 6];
        let mut it = a.end_mut();
        it -= 1;
        assert_eq!(it.as_cursor().get(), Some(&6));
        assert_eq!(it.as_cursor().remaining(), &[6]);
    }

    #[test]
    fn slice_between_cursors() {
        let a = fixed_array![1, 2, 3, 4, 5];
        let from = a.begin() + 1;
        let to = a.end() - 1isize;
        assert_eq!(from.slice_to(&to), &[2, 3, 4]);
        assert_eq!(a.end().slice_to(&a.end()), &[] as &[i32]);
    }

    #[test]
    fn unchecked_deref() {
        let a = fixed_array![7, 8];
        let it = a.begin() + 1;
        // SAFETY: `it` is not at the end.
        assert_eq!(unsafe { *it.get_unchecked() }, 8);
        let rev = a.rbegin();
        // SAFETY: `rev` is not at the end.
        assert_eq!(unsafe { *rev.get_unchecked() }, 8);
    }

    #[test]
    fn set_position_jumps() {
        let a = fixed_array!['a', 'b', 'c'];
        let mut it = a.begin();
        it.set_position(2);
        assert_eq!(it.get(), Some(&'c'));
        let mut rev = a.rbegin();
        rev.set_position(2);
        assert_eq!(rev.get(), Some(&'a'));
        assert_eq!(rev.position(), 2);
    }
}
