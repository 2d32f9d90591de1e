// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical analysis for Tao source code.
//!
//! ## Structure
//!
//! - `scanner.rs` - `Scanner`, turning text into tokens one at a time
//! - `stream.rs` - `TokenStream`, the buffered view the parser reads with
//!   peek, undo and checkpoints
//! - `token.rs` - `Token`, `TokenKind` and `Span`
//!
//! ## Usage
//!
//! ```rust
//! use tao_lang::lexer::{TokenKind, TokenStream};
//!
//! let mut stream = TokenStream::new("let x = 42;");
//! stream.push_checkpoint();
//! assert_eq!(stream.next().kind, TokenKind::Let);
//! stream.pop_checkpoint(true);
//! assert_eq!(stream.peek_kind(), &TokenKind::Let);
//! ```

mod scanner;
mod stream;
mod token;

pub use scanner::Scanner;
pub use stream::TokenStream;
pub use token::{Span, Token, TokenKind};
