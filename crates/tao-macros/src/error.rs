// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error handling macros.

/// Early return with an error.
///
/// A string literal (optionally with format arguments) is converted with
/// `.into()`; any other expression is returned as-is through `.into()`.
///
/// # Example
///
/// ```
/// use tao_macros::bail;
///
/// fn process(x: i32) -> Result<(), String> {
///     if x < 0 {
///         bail!("x must be non-negative, got {}", x);
///     }
///     Ok(())
/// }
///
/// assert!(process(-1).is_err());
/// assert!(process(1).is_ok());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($msg.into())
    };
    ($fmt:literal, $($arg:tt)*) => {
        return Err(format!($fmt, $($arg)*).into())
    };
    ($err:expr $(,)?) => {
        return Err($err.into())
    };
}

/// Ensure a condition is true, or return an error.
///
/// # Example
///
/// ```
/// use tao_macros::ensure;
///
/// fn divide(a: i32, b: i32) -> Result<i32, String> {
///     ensure!(b != 0, "division by zero");
///     Ok(a / b)
/// }
///
/// assert!(divide(10, 0).is_err());
/// assert_eq!(divide(10, 2).unwrap(), 5);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg.into());
        }
    };
    ($cond:expr, $fmt:literal, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($fmt, $($arg)*).into());
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, PartialEq)]
    struct Custom(u32);

    #[test]
    fn test_ensure() {
        fn check(x: i32) -> Result<(), String> {
            ensure!(x > 0, "must be positive");
            Ok(())
        }

        assert!(check(1).is_ok());
        assert_eq!(check(0), Err("must be positive".to_string()));
    }

    #[test]
    fn test_ensure_with_value() {
        fn check(x: u32) -> Result<u32, Custom> {
            ensure!(x < 10, Custom(x));
            Ok(x)
        }

        assert_eq!(check(3), Ok(3));
        assert_eq!(check(12), Err(Custom(12)));
    }

    #[test]
    fn test_bail() {
        fn early_return(fail: bool) -> Result<i32, String> {
            if fail {
                bail!("failed after {} tries", 3);
            }
            Ok(42)
        }

        assert_eq!(early_return(false).unwrap(), 42);
        assert_eq!(early_return(true), Err("failed after 3 tries".to_string()));
    }

    #[test]
    fn test_bail_with_value() {
        fn reject() -> Result<(), Custom> {
            bail!(Custom(7));
        }

        assert_eq!(reject(), Err(Custom(7)));
    }
}
