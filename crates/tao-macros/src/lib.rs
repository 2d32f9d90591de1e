// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Helper macros for the Tao scripting language.
//!
//! # Macros Overview
//!
//! ## Error Handling
//! - [`bail!`] - Early return with an error
//! - [`ensure!`] - Assertion that returns an error instead of panicking
//!
//! ## Lexing
//! - [`keywords!`] - Generate a keyword lookup function
//!
//! ## Testing
//! - [`assert_matches!`] - Assert that a value matches a pattern
//! - [`assert_ok!`] - Assert a `Result` is `Ok` and extract the value
//! - [`assert_err!`] - Assert a `Result` is `Err` and extract the error
//!
//! # Examples
//!
//! ```
//! use tao_macros::*;
//!
//! fn half(n: i32) -> Result<i32, String> {
//!     ensure!(n % 2 == 0, "{} is odd", n);
//!     Ok(n / 2)
//! }
//!
//! assert_eq!(assert_ok!(half(4)), 2);
//! assert_err!(half(3));
//! ```

#![warn(missing_docs)]

mod error;
mod lexer;
mod testing;
