// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The parser core: token helpers, speculation and the program loop.

use tracing::{debug, trace};

use crate::ast::{Identifier, Program};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::{Error, Result};

/// A recursive descent parser for Tao.
///
/// Statements are parsed by recursive descent, expressions by precedence
/// climbing. Ambiguous constructs are resolved by trying one reading under a
/// token stream checkpoint and rewinding when it does not fit.
pub struct Parser<'a> {
    pub(super) tokens: TokenStream<'a>,
    /// Number of enclosing for bodies and switch groups.
    pub(super) break_depth: u32,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: TokenStream::new(source),
            break_depth: 0,
        }
    }

    /// Parses the source code into a Program AST node.
    ///
    /// Either the whole input parses or the first error is returned.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement(true)?);
        }

        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    /// Runs `attempt` under a checkpoint.
    ///
    /// `Ok(Some(_))` commits the consumed tokens. `Ok(None)` and errors rewind
    /// the stream and the break depth to where they were, and yield `None`.
    pub(super) fn speculate<T>(
        &mut self,
        attempt: impl FnOnce(&mut Self) -> Result<Option<T>>,
    ) -> Option<T> {
        let depth = self.break_depth;
        self.tokens.push_checkpoint();

        match attempt(self) {
            Ok(Some(value)) => {
                self.tokens.pop_checkpoint(false);
                Some(value)
            }
            outcome => {
                if let Err(err) = outcome {
                    trace!(%err, "speculative parse rejected");
                }
                self.tokens.pop_checkpoint(true);
                self.break_depth = depth;
                None
            }
        }
    }

    /// Runs `f` with the break depth set to `depth`, restoring it afterwards.
    pub(super) fn with_break_depth<T>(
        &mut self,
        depth: u32,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = std::mem::replace(&mut self.break_depth, depth);
        let result = f(self);
        self.break_depth = saved;
        result
    }

    // Helper methods

    pub(super) fn next(&mut self) -> Token {
        self.tokens.next()
    }

    pub(super) fn peek(&mut self) -> &Token {
        self.tokens.peek()
    }

    pub(super) fn undo(&mut self, token: Token) {
        self.tokens.undo(token);
    }

    pub(super) fn check(&mut self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.tokens.peek_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the next token if it is of the given kind.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        let token = self.next();
        if std::mem::discriminant(&token.kind) == std::mem::discriminant(kind) {
            Ok(token)
        } else {
            Err(Error::unexpected(format!("expected {}", kind), &token))
        }
    }

    pub(super) fn expect_identifier(&mut self) -> Result<Identifier> {
        let token = self.next();
        match token.kind {
            TokenKind::Identifier(name) => Ok(Identifier { name }),
            _ => Err(Error::unexpected("expected identifier", &token)),
        }
    }

    /// Builds an error pointing at the next token.
    pub(super) fn error_here(&mut self, message: &str) -> Error {
        Error::unexpected(message, self.peek())
    }

    pub(super) fn is_at_end(&mut self) -> bool {
        self.check(&TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Statement};
    use tao_macros::{assert_err, assert_matches, assert_ok};

    fn parse_ok(src: &str) -> Program {
        assert_ok!(Parser::new(src).parse_program())
    }

    fn parse_err(src: &str) -> Error {
        assert_err!(Parser::new(src).parse_program())
    }

    #[test]
    fn test_empty_program() {
        assert!(parse_ok("").body.is_empty());
        assert!(parse_ok("  // nothing\n").body.is_empty());
    }

    #[test]
    fn test_program_statement_order() {
        let program = parse_ok("let a = 1; function f() {} ;");
        assert_eq!(program.body.len(), 3);
        assert_matches!(program.body[0], Statement::Variable(_));
        assert_matches!(program.body[1], Statement::Function(_));
        assert_matches!(program.body[2], Statement::Empty);
    }

    #[test]
    fn test_error_carries_line() {
        let err = parse_err("let a = 1;\nlet = 2;");
        let syntax = err.as_syntax().expect("syntax error");
        assert_eq!(syntax.line, Some(2));
        assert_eq!(syntax.token, Some(TokenKind::Equal));
    }

    #[test]
    fn test_no_partial_program() {
        // The first statement is fine, the second is not
        assert!(Parser::new("let a = 1; let b = ;").parse_program().is_err());
    }

    #[test]
    fn test_speculate_rewinds_on_none() {
        let mut parser = Parser::new("a b");
        let result: Option<()> = parser.speculate(|p| {
            p.next();
            p.next();
            Ok(None)
        });
        assert!(result.is_none());
        assert_matches!(parser.next().kind, TokenKind::Identifier(ref n) if n == "a");
    }

    #[test]
    fn test_speculate_rewinds_on_error_and_restores_depth() {
        let mut parser = Parser::new("a b");
        let result: Option<()> = parser.speculate(|p| {
            p.next();
            p.break_depth = 5;
            Err(Error::syntax("nope"))
        });
        assert!(result.is_none());
        assert_eq!(parser.break_depth, 0);
        assert_matches!(parser.next().kind, TokenKind::Identifier(ref n) if n == "a");
    }

    #[test]
    fn test_speculate_commits() {
        let mut parser = Parser::new("a b");
        let name = parser.speculate(|p| Ok(Some(p.next())));
        assert!(name.is_some());
        assert_matches!(parser.next().kind, TokenKind::Identifier(ref n) if n == "b");
    }

    #[test]
    fn test_expression_api() {
        let mut parser = Parser::new("1 + 2");
        assert_matches!(assert_ok!(parser.parse_expression()), Expression::Binary(_));
    }
}
