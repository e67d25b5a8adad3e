#![allow(unsafe_code)]

//! By-value iteration over a [`FixedArray`](crate::FixedArray).

use core::{fmt, iter::FusedIterator, ptr, slice};

use allocator_api2::alloc::{Allocator, Global};

use crate::raw::RawBuf;

/// Iterator that moves elements out of a [`FixedArray`](crate::FixedArray).
///
/// Elements that are never yielded are dropped together with the iterator,
/// and the buffer goes back to its allocator.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    // Slots in `start..end` are still live.
    start: usize,
    end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(buf: RawBuf<T, A>) -> Self {
        let end = buf.len();
        IntoIter { buf, start: 0, end }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots in `start..end` are initialized.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, with exclusive access through `&mut self`.
        unsafe {
            slice::from_raw_parts_mut(self.buf.ptr().add(self.start), self.end - self.start)
        }
    }

    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: the slot is live and is excluded from the live range below,
        // so it is read exactly once.
        let value = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and is now outside the live range.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: exactly the slots in `start..end` are still live; `buf`
        // releases the memory afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
