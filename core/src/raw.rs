#![allow(unsafe_code)]

//! The allocation behind a [`FixedArray`](crate::FixedArray).
//!
//! `RawBuf` owns memory only; it never runs element destructors. Whoever
//! wraps it decides which slots are initialized: `FixedArray` treats all of
//! them as live, `IntoIter` a sub-range, and `Filler` a growing prefix.

use alloc::alloc::handle_alloc_error;
use core::{
    alloc::Layout,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
};

use allocator_api2::alloc::Allocator;

use crate::Error;

/// Why a buffer could not be acquired.
enum AllocFailure {
    Overflow,
    Refused(Layout),
}

pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    len: usize,
    alloc: A,
    // Tells dropck that we own `T`s.
    marker: PhantomData<T>,
}

// Same rules as `Vec<T, A>`: the buffer is uniquely owned.
unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    /// A zero-length buffer. Never touches the allocator.
    pub(crate) fn dangling(alloc: A) -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            len: 0,
            alloc,
            marker: PhantomData,
        }
    }

    fn allocate(len: usize, alloc: A) -> Result<Self, AllocFailure> {
        let layout = Layout::array::<T>(len).map_err(|_| AllocFailure::Overflow)?;
        if layout.size() == 0 {
            // Zero-sized types and empty arrays own no memory.
            return Ok(RawBuf {
                ptr: NonNull::dangling(),
                len,
                alloc,
                marker: PhantomData,
            });
        }

        let ptr = alloc
            .allocate(layout)
            .map_err(|_| AllocFailure::Refused(layout))?;
        tracing::trace!(count = len, bytes = layout.size(), "allocated fixed array buffer");

        Ok(RawBuf {
            ptr: ptr.cast(),
            len,
            alloc,
            marker: PhantomData,
        })
    }

    /// Allocates room for exactly `len` elements, reporting failures as [`Error`].
    pub(crate) fn try_allocate_in(len: usize, alloc: A) -> Result<Self, Error> {
        Self::allocate(len, alloc).map_err(|failure| match failure {
            AllocFailure::Overflow => Error::CapacityOverflow { count: len },
            AllocFailure::Refused(_) => Error::AllocFailed { count: len },
        })
    }

    /// Allocates room for exactly `len` elements, aborting the way `Vec` does
    /// when that is impossible.
    pub(crate) fn allocate_in(len: usize, alloc: A) -> Self {
        match Self::allocate(len, alloc) {
            Ok(buf) => buf,
            Err(AllocFailure::Overflow) => capacity_overflow(),
            Err(AllocFailure::Refused(layout)) => handle_alloc_error(layout),
        }
    }

    /// Adopts an existing allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by `alloc` with the layout of `[T; len]`,
    /// or be dangling if that layout has size zero.
    pub(crate) unsafe fn from_raw_parts_in(ptr: NonNull<T>, len: usize, alloc: A) -> Self {
        RawBuf {
            ptr,
            len,
            alloc,
            marker: PhantomData,
        }
    }

    /// Gives up ownership without releasing the allocation.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so `alloc` is moved out exactly once.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (this.ptr, this.len, alloc)
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        // Cannot overflow: the same product was validated by `Layout::array`.
        let size = mem::size_of::<T>() * self.len;
        if size == 0 {
            return;
        }
        // SAFETY: `ptr` was allocated by `alloc` with exactly this layout.
        unsafe {
            let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
            self.alloc.deallocate(self.ptr.cast(), layout);
        }
        tracing::trace!(count = self.len, bytes = size, "released fixed array buffer");
    }
}

#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// Writes elements into a fresh buffer front to back.
///
/// If dropped before [`Filler::finish`] (a constructor panicked or returned
/// an error), the elements written so far are dropped and the buffer is
/// released.
pub(crate) struct Filler<T, A: Allocator> {
    buf: ManuallyDrop<RawBuf<T, A>>,
    initialized: usize,
}

impl<T, A: Allocator> Filler<T, A> {
    pub(crate) fn new(buf: RawBuf<T, A>) -> Self {
        Filler {
            buf: ManuallyDrop::new(buf),
            initialized: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.initialized < self.buf.len());
        // SAFETY: the slot is inside the allocation and not yet initialized.
        unsafe { self.buf.ptr().add(self.initialized).write(value) };
        self.initialized += 1;
    }

    /// Hands over the buffer once every slot is initialized.
    pub(crate) fn finish(self) -> RawBuf<T, A> {
        debug_assert_eq!(self.initialized, self.buf.len());
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the buffer is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.buf) }
    }
}

impl<T, A: Allocator> Drop for Filler<T, A> {
    fn drop(&mut self) {
        tracing::trace!(
            initialized = self.initialized,
            count = self.buf.len(),
            "abandoning partially populated fixed array"
        );
        // SAFETY: exactly the first `initialized` slots hold live values, and
        // the buffer has not been handed over.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr(),
                self.initialized,
            ));
            ManuallyDrop::drop(&mut self.buf);
        }
    }
}
