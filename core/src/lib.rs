#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![deny(unsafe_code)]

//! Fixed-size, heap-allocated arrays.
//!
//! A [`FixedArray<T, A>`] owns exactly one contiguous allocation whose length is
//! chosen at construction and never changes afterwards. Dropping the growth
//! machinery of `Vec<T>` makes it two words wide instead of three:
//!
//! ```text
//! Vec<T>:         [ptr | cap | len]
//! FixedArray<T>:  [ptr | len]
//! ```
//!
//! # Example
//!
//! ```
//! use dynarray_core::{Error, FixedArray, fixed_array};
//!
//! let mut a = FixedArray::from_elem(5, 7);
//! assert_eq!(a.len(), 5);
//! assert_eq!(a.at(4), Ok(&7));
//! assert_eq!(a.at(5), Err(Error::OutOfRange { pos: 5, len: 5 }));
//!
//! let b = fixed_array![1, 2, 3];
//! assert_eq!(
//!     a.assign_from(&b),
//!     Err(Error::IncompatibleSize { expected: 5, found: 3 })
//! );
//!
//! // Moves are unconditional.
//! a = b;
//! assert_eq!(a, [1, 2, 3]);
//! ```
//!
//! Any [`Allocator`](allocator_api2::alloc::Allocator) can back the buffer:
//!
//! ```
//! use bumpalo::Bump;
//! use dynarray_core::FixedArray;
//!
//! let arena = Bump::new();
//! let a = FixedArray::from_slice_in(&[1, 2, 3], &arena);
//! assert_eq!(a.iter().sum::<i32>(), 6);
//! ```

// This works on std and no_std and is harmless.
extern crate alloc;

// Re-export (crate only) for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, string::ToString, vec, vec::Vec};

mod array;
pub mod cursor;
pub mod error;
mod impls;
pub mod into_iter;
mod macros;
mod raw;

pub use allocator_api2::alloc::{Allocator, Global};
pub use array::FixedArray;
pub use cursor::{Cursor, CursorMut, Reverse, Seek};
pub use error::Error;
pub use into_iter::IntoIter;
