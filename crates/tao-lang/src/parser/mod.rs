// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for Tao source code.
//!
//! Transforms a stream of tokens into an Abstract Syntax Tree (AST).
//!
//! ## Structure
//!
//! - `parser` - The `Parser` struct, token helpers and speculation
//! - `statements` - Statement grammar (let, function, for, if, switch, ...)
//! - `expressions` - Precedence climbing, primaries, lambdas and literals
//!
//! ## Usage
//!
//! ```rust
//! use tao_lang::parser::Parser;
//!
//! let mut parser = Parser::new("let x = 1 + 2;");
//! let program = parser.parse_program().expect("Should parse");
//! assert_eq!(program.body.len(), 1);
//! ```

mod expressions;
mod parser;
mod statements;

pub use parser::Parser;
