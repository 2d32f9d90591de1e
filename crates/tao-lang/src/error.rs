// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for parsing and evaluation.

use std::fmt;

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// Result type for Tao operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or running a script.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed source or a scope violation
    #[error("SyntaxError: {0}")]
    SyntaxError(SyntaxError),

    /// Operation applied to a value of the wrong type
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Index or depth out of range
    #[error("RangeError: {0}")]
    RangeError(String),

    /// I/O error
    #[error("IOError: {0}")]
    Io(String),
}

impl Error {
    /// Create a syntax error without location information.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::SyntaxError(SyntaxError::new(message))
    }

    /// Create a syntax error pointing at the offending token.
    pub fn unexpected(message: impl Into<String>, token: &Token) -> Self {
        Self::SyntaxError(SyntaxError::new(message).at(token))
    }

    /// Create a new TypeError
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a new RangeError
    pub fn range_error(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }

    /// Returns the syntax error payload, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::SyntaxError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Self::SyntaxError(err)
    }
}

/// A malformed construct, with the token and line where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// Human-readable message
    pub message: String,
    /// The offending token, if the error came from the parser
    pub token: Option<TokenKind>,
    /// 1-based source line, if known
    pub line: Option<u32>,
}

impl SyntaxError {
    /// Creates an error with no location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: None,
            line: None,
        }
    }

    /// Attaches the offending token and its line.
    pub fn at(mut self, token: &Token) -> Self {
        self.line = Some(token.span.line);
        self.token = Some(token.kind.clone());
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(token) = &self.token {
            write!(f, " (found {})", token)?;
        }
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    #[test]
    fn test_syntax_error_display_with_location() {
        let token = Token::new(TokenKind::Semicolon, Span::new(4, 5, 3));
        let err = Error::unexpected("unexpected token", &token);
        assert_eq!(
            err.to_string(),
            "SyntaxError: unexpected token (found `;`) at line 3"
        );
    }

    #[test]
    fn test_syntax_error_display_bare() {
        let err = Error::syntax("name `x' is not defined");
        assert_eq!(err.to_string(), "SyntaxError: name `x' is not defined");
        assert!(err.as_syntax().is_some());
    }

    #[test]
    fn test_runtime_error_display() {
        assert_eq!(
            Error::type_error("nil is not callable").to_string(),
            "TypeError: nil is not callable"
        );
        assert!(Error::range_error("index 3").as_syntax().is_none());
    }
}
