//! dynarray - A heap-allocated array whose length is fixed at construction
//!
//! # Overview
//!
//! [`FixedArray`] sits between `[T; N]` and `Vec<T>`: the length is chosen at
//! runtime, but once the array exists it can never grow or shrink. Every
//! array owns exactly one buffer, which it releases exactly once through the
//! allocator that produced it.
//!
//! Common use cases include:
//!
//! - Scratch buffers whose size is only known after parsing a header
//! - Lookup tables built once and then indexed many times
//! - Arena-backed storage via any [`Allocator`]
//!
//! # Quick Start
//!
//! ```
//! use dynarray::{Error, FixedArray, fixed_array};
//!
//! // Five copies of 7
//! let mut a = FixedArray::from_elem(5, 7);
//! assert_eq!(a.at(4), Ok(&7));
//! assert_eq!(a.at(5), Err(Error::OutOfRange { pos: 5, len: 5 }));
//!
//! // Copy-assignment keeps the buffer but demands equal sizes
//! let b = fixed_array![1, 2, 3, 4, 5];
//! a.assign_from(&b).unwrap();
//! assert_eq!(a, b);
//! assert!(a.assign_from(&fixed_array![0; 2]).is_err());
//!
//! // Moving simply transfers the buffer
//! let c = a;
//! assert_eq!(c.len(), 5);
//! ```
//!
//! # Cursors
//!
//! Besides the usual slice iterators, arrays hand out bidirectional
//! [`Cursor`]s that support arithmetic and ordering:
//!
//! ```
//! use dynarray::{Seek, fixed_array};
//!
//! let a = fixed_array![1, 2, 3];
//! let mut it = a.rbegin();
//! it += 1;
//! assert_eq!(it.get(), Some(&2));
//! assert_eq!(a.rend() - it, 2);
//! assert!(!it.is_end());
//! ```
//!
//! # Features
//!
//! - `std`: link against the standard library. Without it the crate only
//!   needs `alloc`.

pub use dynarray_core::{
    Allocator, Cursor, CursorMut, Error, FixedArray, Global, IntoIter, Reverse, Seek, cursor,
    error, fixed_array, into_iter,
};
