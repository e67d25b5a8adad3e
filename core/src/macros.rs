//! Literal construction of fixed arrays.

/// Creates a [`FixedArray`](crate::FixedArray) from a literal list of values,
/// mirroring `vec!`.
///
/// # Syntax
///
/// | Pattern | Meaning |
/// |---------|---------|
/// | `fixed_array![]` | Empty array |
/// | `fixed_array![a, b, c]` | Array holding the listed values, in order |
/// | `fixed_array![value; count]` | `count` clones of `value` |
///
/// # Example
///
/// ```
/// use dynarray_core::fixed_array;
///
/// let a = fixed_array![1, 2, 3];
/// assert_eq!(a.len(), 3);
///
/// let zeros = fixed_array![0u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! fixed_array {
    () => {
        <$crate::FixedArray<_>>::from([])
    };
    ($elem:expr; $count:expr) => {
        <$crate::FixedArray<_>>::from_elem($count, $elem)
    };
    ($($value:expr),+ $(,)?) => {
        <$crate::FixedArray<_>>::from([$($value),+])
    };
}
