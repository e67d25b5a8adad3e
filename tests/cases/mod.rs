// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        let actual = $result;
        pretty_assertions::assert_eq!($expected, actual, "\n\n< expected / got >");
    };
}

// One test function per checked property of the array built by `input()`
#[macro_export]
macro_rules! handle_case {
    ([$($attrs:meta)*] len, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_len() {
            let array = input();
            assert_eq!(array.is_empty(), array.len() == 0);
            assert_case!(array.len(), $expected);
        }
    };

    ([$($attrs:meta)*] contents, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_contents() {
            let array = input();
            let mut forward = Vec::new();
            let mut it = array.begin();
            while it != array.end() {
                forward.push(*it.get().unwrap());
                it += 1;
            }
            pretty_assertions::assert_eq!(forward, array.iter().copied().collect::<Vec<_>>());
            assert_case!(forward, $expected);
        }
    };

    ([$($attrs:meta)*] reversed, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_reversed() {
            let array = input();
            let mut backward = Vec::new();
            let mut it = array.rbegin();
            while it != array.rend() {
                backward.push(*it.get().unwrap());
                it += 1;
            }
            assert_case!(backward, $expected);
        }
    };

    ([$($attrs:meta)*] first, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_first() {
            let array = input();
            assert_case!(array.at(0).copied(), $expected);
        }
    };

    ([$($attrs:meta)*] past_end, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_past_end() {
            let array = input();
            assert_case!(array.at(array.len()).copied(), $expected);
        }
    };

    ([$($attrs:meta)*] assign, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_assign() {
            let mut array = input();
            let source = dynarray::FixedArray::from_fn(array.len(), |i| i as i32 * 10);
            let ptr = array.as_ptr();
            array.assign_from(&source).unwrap();
            assert_eq!(array.as_ptr(), ptr);

            let longer = dynarray::FixedArray::from_elem(array.len() + 1, 0);
            let before = array.clone();
            let result = array.assign_from(&longer);
            assert_eq!(array, before);
            assert_case!(result, $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name first, input second, then any order for assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;

            // Every test function builds its own array
            fn input() -> dynarray::FixedArray<i32> {
                $input
            }

            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}
