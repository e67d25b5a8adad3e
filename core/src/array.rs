#![allow(unsafe_code)]

use core::{
    mem::{self, ManuallyDrop},
    ptr, slice,
};

use allocator_api2::alloc::{Allocator, Global};

use crate::{
    Box, Error, Vec,
    cursor::{Cursor, CursorMut, Reverse},
    raw::{Filler, RawBuf},
};

/// A heap-allocated array whose length is fixed at construction.
///
/// The buffer holds exactly [`len`](Self::len) elements (no spare capacity)
/// and is released exactly once, through the allocator that produced it.
///
/// Moving a `FixedArray` is constant time and moves ownership of the buffer.
/// `core::mem::take` leaves an empty array behind:
///
/// ```
/// use dynarray_core::{FixedArray, fixed_array};
///
/// let mut a = fixed_array![1, 2, 3];
/// let b = core::mem::take(&mut a);
/// assert!(a.is_empty());
/// assert_eq!(b, [1, 2, 3]);
/// ```
pub struct FixedArray<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(FixedArray<u64>, [usize; 2]);
static_assertions::assert_eq_size!(Option<FixedArray<u8>>, FixedArray<u8>);

impl<T> FixedArray<T> {
    /// Creates an array of `count` default values.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would exceed `isize::MAX` bytes.
    pub fn new(count: usize) -> Self
    where
        T: Default,
    {
        Self::new_in(count, Global)
    }

    /// Creates an array of `count` clones of `value`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global)
    }

    /// Creates an array whose element at position `i` is `f(i)`.
    ///
    /// ```
    /// use dynarray_core::FixedArray;
    ///
    /// let squares = FixedArray::from_fn(4, |i| i * i);
    /// assert_eq!(squares, [0, 1, 4, 9]);
    /// ```
    pub fn from_fn(count: usize, f: impl FnMut(usize) -> T) -> Self {
        Self::from_fn_in(count, f, Global)
    }

    /// Creates an array holding the items of an exact-size iterator.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields fewer items than it reported.
    pub fn from_iter_exact(values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>) -> Self {
        Self::from_iter_exact_in(values, Global)
    }

    /// Converts into a boxed slice without copying.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        let (ptr, len, _) = self.into_raw_buf().into_raw_parts();
        // SAFETY: the buffer was allocated by the global allocator with the
        // layout of `[T; len]`, which is what `Box<[T]>` releases it with.
        unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len)) }
    }

    /// Converts into a `Vec` whose capacity equals its length, without copying.
    pub fn into_vec(self) -> Vec<T> {
        self.into_boxed_slice().into_vec()
    }
}

impl<T, A: Allocator> FixedArray<T, A> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an array of `count` default values in `alloc`.
    pub fn new_in(count: usize, alloc: A) -> Self
    where
        T: Default,
    {
        Self::from_fn_in(count, |_| T::default(), alloc)
    }

    /// Fallible [`new_in`](Self::new_in).
    pub fn try_new_in(count: usize, alloc: A) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::try_from_fn_in(count, |_| Ok::<_, Error>(T::default()), alloc)
    }

    /// Creates an array of `count` clones of `value` in `alloc`.
    pub fn from_elem_in(count: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        Self::from_fn_in(count, |_| value.clone(), alloc)
    }

    /// Fallible [`from_elem_in`](Self::from_elem_in).
    pub fn try_from_elem_in(count: usize, value: T, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::try_from_fn_in(count, |_| Ok::<_, Error>(value.clone()), alloc)
    }

    /// Creates an array whose element at position `i` is `f(i)`, in `alloc`.
    ///
    /// If `f` panics, the elements produced so far are dropped and the
    /// buffer is released before the panic continues.
    pub fn from_fn_in(count: usize, mut f: impl FnMut(usize) -> T, alloc: A) -> Self {
        let mut filler = Filler::new(RawBuf::allocate_in(count, alloc));
        for i in 0..count {
            filler.push(f(i));
        }
        FixedArray {
            buf: filler.finish(),
        }
    }

    /// Creates an array from a fallible generator.
    ///
    /// The first error returned by `f` aborts construction: the elements
    /// produced so far are dropped, the buffer is released and the error is
    /// returned. Allocation failures are converted into `E`.
    ///
    /// ```
    /// use dynarray_core::{Error, FixedArray, Global};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum ParseError {
    ///     Alloc(Error),
    ///     BadDigit(usize),
    /// }
    ///
    /// impl From<Error> for ParseError {
    ///     fn from(err: Error) -> Self {
    ///         ParseError::Alloc(err)
    ///     }
    /// }
    ///
    /// let input = b"12x4";
    /// let digits = FixedArray::try_from_fn_in(
    ///     input.len(),
    ///     |i| match input[i] {
    ///         b @ b'0'..=b'9' => Ok(b - b'0'),
    ///         _ => Err(ParseError::BadDigit(i)),
    ///     },
    ///     Global,
    /// );
    /// assert_eq!(digits.err(), Some(ParseError::BadDigit(2)));
    /// ```
    pub fn try_from_fn_in<E>(
        count: usize,
        mut f: impl FnMut(usize) -> Result<T, E>,
        alloc: A,
    ) -> Result<Self, E>
    where
        E: From<Error>,
    {
        let mut filler = Filler::new(RawBuf::try_allocate_in(count, alloc)?);
        for i in 0..count {
            filler.push(f(i)?);
        }
        Ok(FixedArray {
            buf: filler.finish(),
        })
    }

    /// Creates an array holding the items of an exact-size iterator, in `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields fewer items than it reported. Extra
    /// items are never pulled.
    pub fn from_iter_exact_in(
        values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
        alloc: A,
    ) -> Self {
        let mut iter = values.into_iter();
        let count = iter.len();
        Self::from_fn_in(
            count,
            |_| iter.next().expect("iterator exhausted too early"),
            alloc,
        )
    }

    /// Moves the elements of `array` into a buffer from `alloc`.
    pub fn from_array_in<const N: usize>(array: [T; N], alloc: A) -> Self {
        Self::from_iter_exact_in(array, alloc)
    }

    /// Clones the elements of `values` into a buffer from `alloc`.
    pub fn from_slice_in(values: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        Self::from_fn_in(values.len(), |i| values[i].clone(), alloc)
    }

    /// Fallible [`from_slice_in`](Self::from_slice_in).
    pub fn try_from_slice_in(values: &[T], alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::try_from_fn_in(values.len(), |i| Ok::<_, Error>(values[i].clone()), alloc)
    }

    /// Deep-copies this array into a buffer from another allocator.
    pub fn clone_in<B: Allocator>(&self, alloc: B) -> FixedArray<T, B>
    where
        T: Clone,
    {
        FixedArray::from_slice_in(self.as_slice(), alloc)
    }

    /// Fallible [`clone_in`](Self::clone_in).
    pub fn try_clone_in<B: Allocator>(&self, alloc: B) -> Result<FixedArray<T, B>, Error>
    where
        T: Clone,
    {
        FixedArray::try_from_slice_in(self.as_slice(), alloc)
    }

    pub(crate) fn empty_in(alloc: A) -> Self {
        FixedArray {
            buf: RawBuf::dangling(alloc),
        }
    }

    /// Wraps a buffer whose slots are all initialized.
    pub(crate) fn from_raw_buf(buf: RawBuf<T, A>) -> Self {
        FixedArray { buf }
    }

    /// Releases ownership of the buffer without dropping the elements.
    pub(crate) fn into_raw_buf(self) -> RawBuf<T, A> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the buffer is moved out exactly once.
        unsafe { ptr::read(&this.buf) }
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// Overwrites every element with a clone of the matching element of `other`.
    ///
    /// Both arrays must have the same length; otherwise
    /// [`Error::IncompatibleSize`] is returned and `self` is left untouched.
    /// The buffer is reused, never reallocated.
    pub fn assign_from<B: Allocator>(&mut self, other: &FixedArray<T, B>) -> Result<(), Error>
    where
        T: Clone,
    {
        self.assign_from_slice(other.as_slice())
    }

    /// Overwrites every element with a clone of the matching element of `values`.
    ///
    /// ```
    /// use dynarray_core::{Error, fixed_array};
    ///
    /// let mut a = fixed_array![0; 3];
    /// a.assign_from_slice(&[1, 2, 3])?;
    /// assert_eq!(a, [1, 2, 3]);
    ///
    /// assert_eq!(
    ///     a.assign_from_slice(&[4, 5]),
    ///     Err(Error::IncompatibleSize { expected: 3, found: 2 })
    /// );
    /// assert_eq!(a, [1, 2, 3]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn assign_from_slice(&mut self, values: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        if self.len() != values.len() {
            tracing::debug!(
                expected = self.len(),
                found = values.len(),
                "rejected copy-assignment between different sizes"
            );
            return Err(Error::IncompatibleSize {
                expected: self.len(),
                found: values.len(),
            });
        }
        self.as_mut_slice().clone_from_slice(values);
        Ok(())
    }

    /// Exchanges the buffers (and lengths) of two arrays in constant time.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns the element at `pos`, or [`Error::OutOfRange`] if `pos >= len`.
    pub fn at(&self, pos: usize) -> Result<&T, Error> {
        let len = self.len();
        self.as_slice()
            .get(pos)
            .ok_or_else(|| out_of_range(pos, len))
    }

    /// Mutable [`at`](Self::at).
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T, Error> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(pos)
            .ok_or_else(|| out_of_range(pos, len))
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Use `first()` for a checked variant.
    #[track_caller]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(value) => value,
            None => empty_array("front"),
        }
    }

    /// Mutable [`front`](Self::front).
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(value) => value,
            None => empty_array("front_mut"),
        }
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Use `last()` for a checked variant.
    #[track_caller]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(value) => value,
            None => empty_array("back"),
        }
    }

    /// Mutable [`back`](Self::back).
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(value) => value,
            None => empty_array("back_mut"),
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: all `len` slots are initialized and owned by `self`.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.buf.len()) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.buf.len()) }
    }

    /// Returns a pointer to the first element.
    ///
    /// The pointer is valid for `len` elements. For an empty array it is
    /// dangling and must not be dereferenced.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable [`as_ptr`](Self::as_ptr).
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Returns the allocator backing this array.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Number of elements. Never changes after construction.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Overwrites every element, front to back, with a clone of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.as_mut_slice().fill(value);
    }

    /// Overwrites every element, front to back, with the results of `f`.
    pub fn fill_with(&mut self, f: impl FnMut() -> T) {
        self.as_mut_slice().fill_with(f);
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len())
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len();
        CursorMut::new(self.as_mut_slice(), len)
    }

    /// Reverse cursor at the last element.
    pub fn rbegin(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.end())
    }

    /// Reverse cursor one before the first element.
    pub fn rend(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.begin())
    }

    pub fn rbegin_mut(&mut self) -> Reverse<CursorMut<'_, T>> {
        Reverse::new(self.end_mut())
    }

    pub fn rend_mut(&mut self) -> Reverse<CursorMut<'_, T>> {
        Reverse::new(self.begin_mut())
    }
}

impl<T, A: Allocator> Drop for FixedArray<T, A> {
    fn drop(&mut self) {
        // SAFETY: every slot is initialized; `buf` releases the memory afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

fn out_of_range(pos: usize, len: usize) -> Error {
    tracing::debug!(pos, len, "rejected out-of-range access");
    Error::OutOfRange { pos, len }
}

#[cold]
#[track_caller]
fn empty_array(op: &str) -> ! {
    panic!("called `FixedArray::{op}` on an empty array");
}
