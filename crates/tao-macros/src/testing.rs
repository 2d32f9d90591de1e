// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Testing helper macros.
//!
//! Provides macros for writing cleaner and more expressive tests.

/// Assert that an expression matches a pattern.
///
/// # Example
///
/// ```
/// use tao_macros::assert_matches;
///
/// #[derive(Debug)]
/// enum MyResult { Ok(i32), Err(String) }
///
/// let result = MyResult::Ok(42);
/// assert_matches!(result, MyResult::Ok(n) if n > 0);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match $expr {
            $pat => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                e
            ),
        }
    };
    ($expr:expr, $pat:pat if $guard:expr) => {
        match $expr {
            $pat if $guard => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{} if {}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                stringify!($guard),
                e
            ),
        }
    };
}

/// Assert that a Result is Ok and extract the value.
///
/// # Example
///
/// ```
/// use tao_macros::assert_ok;
///
/// fn divide(a: i32, b: i32) -> Result<i32, String> {
///     if b == 0 { Err("division by zero".into()) } else { Ok(a / b) }
/// }
///
/// let value = assert_ok!(divide(10, 2));
/// assert_eq!(value, 5);
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!(
                "assertion failed: expected Ok, got Err\n  expression: `{}`\n  error: {:?}",
                stringify!($expr),
                e
            ),
        }
    };
}

/// Assert that a Result is Err and extract the error.
///
/// # Example
///
/// ```
/// use tao_macros::assert_err;
///
/// fn divide(a: i32, b: i32) -> Result<i32, String> {
///     if b == 0 { Err("division by zero".into()) } else { Ok(a / b) }
/// }
///
/// let err = assert_err!(divide(10, 0));
/// assert_eq!(err, "division by zero");
/// ```
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!(
                "assertion failed: expected Err, got Ok\n  expression: `{}`\n  value: {:?}",
                stringify!($expr),
                v
            ),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_matches_guard() {
        let value = Some(3);
        assert_matches!(value, Some(n) if n == 3);
    }

    #[test]
    #[should_panic(expected = "does not match pattern")]
    fn test_assert_matches_failure() {
        let value: Option<i32> = None;
        assert_matches!(value, Some(_));
    }

    #[test]
    fn test_assert_ok_and_err() {
        let ok: Result<u8, String> = Ok(1);
        let err: Result<u8, String> = Err("bad".into());
        assert_eq!(assert_ok!(ok), 1);
        assert_eq!(assert_err!(err), "bad");
    }
}
