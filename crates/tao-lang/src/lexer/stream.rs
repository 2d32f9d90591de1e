// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! A checkpointable token stream over the [`Scanner`].
//!
//! Tokens are scanned lazily into a buffer that is never discarded, so a
//! checkpoint is nothing more than a saved cursor. Rewinding restores the
//! cursor and every token consumed since the matching push is seen again.

use tracing::trace;

use super::{Scanner, Token, TokenKind};

/// Peekable, push-backable token source with nestable checkpoints.
pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    buffer: Vec<Token>,
    cursor: usize,
    checkpoints: Vec<usize>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            buffer: Vec::new(),
            cursor: 0,
            checkpoints: Vec::new(),
        }
    }

    fn fill(&mut self) {
        while self.buffer.len() <= self.cursor {
            let token = self.scanner.next_token();
            self.buffer.push(token);
        }
    }

    /// Consumes and returns the next token.
    ///
    /// Past the end of input this keeps returning `Eof`.
    pub fn next(&mut self) -> Token {
        self.fill();
        let token = self.buffer[self.cursor].clone();
        self.cursor += 1;
        token
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.fill();
        &self.buffer[self.cursor]
    }

    /// Returns the kind of the next token without consuming it.
    pub fn peek_kind(&mut self) -> &TokenKind {
        &self.peek().kind
    }

    /// Pushes `token` back onto the front of the stream.
    ///
    /// `token` must be the one most recently returned by [`next`](Self::next).
    /// The buffer is shared with the checkpoints, so pushing back anything
    /// else would change what a later rewind replays.
    pub fn undo(&mut self, token: Token) {
        debug_assert!(
            self.cursor > 0 && self.buffer[self.cursor - 1] == token,
            "undo of a token that was not just consumed: {:?}",
            token
        );
        if self.cursor == 0 {
            self.buffer.insert(0, token);
        } else {
            self.cursor -= 1;
            self.buffer[self.cursor] = token;
        }
    }

    /// Records the current position.
    pub fn push_checkpoint(&mut self) {
        self.checkpoints.push(self.cursor);
    }

    /// Drops the newest checkpoint, restoring its position when `rewind` is set.
    pub fn pop_checkpoint(&mut self, rewind: bool) {
        let Some(saved) = self.checkpoints.pop() else {
            return;
        };
        if rewind {
            trace!(from = self.cursor, to = saved, "rewinding token stream");
            self.cursor = saved;
        }
    }

    /// Number of open checkpoints.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    #[test]
    fn test_next_and_peek() {
        let mut stream = TokenStream::new("a b");
        assert_eq!(stream.peek_kind(), &ident("a"));
        assert_eq!(stream.next().kind, ident("a"));
        assert_eq!(stream.next().kind, ident("b"));
        assert_eq!(stream.next().kind, TokenKind::Eof);
        assert_eq!(stream.next().kind, TokenKind::Eof);
    }

    #[test]
    fn test_undo() {
        let mut stream = TokenStream::new("a b");
        let a = stream.next();
        stream.undo(a);
        assert_eq!(stream.next().kind, ident("a"));
        assert_eq!(stream.next().kind, ident("b"));
    }

    #[test]
    fn test_undo_after_eof() {
        let mut stream = TokenStream::new("a");
        stream.next();
        let eof = stream.next();
        stream.undo(eof);
        assert_eq!(stream.peek_kind(), &TokenKind::Eof);
    }

    #[test]
    fn test_undo_inside_checkpoint_replays_same_tokens() {
        let mut stream = TokenStream::new("a b c");
        stream.push_checkpoint();
        let a = stream.next();
        let b = stream.next();
        stream.undo(b);
        stream.pop_checkpoint(true);
        assert_eq!(stream.next(), a);
        assert_eq!(stream.next().kind, ident("b"));
        assert_eq!(stream.next().kind, ident("c"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not just consumed")]
    fn test_undo_rejects_other_token() {
        let mut stream = TokenStream::new("a b");
        let a = stream.next();
        stream.next();
        stream.undo(a);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not just consumed")]
    fn test_undo_before_next() {
        let mut stream = TokenStream::new("a");
        let token = Token::new(TokenKind::Comma, crate::lexer::Span::new(0, 0, 1));
        stream.undo(token);
    }

    #[test]
    fn test_rewind_restores_position() {
        let mut stream = TokenStream::new("a b c");
        stream.next();
        stream.push_checkpoint();
        stream.next();
        stream.next();
        stream.pop_checkpoint(true);
        assert_eq!(stream.next().kind, ident("b"));
    }

    #[test]
    fn test_commit_keeps_position() {
        let mut stream = TokenStream::new("a b c");
        stream.push_checkpoint();
        stream.next();
        stream.pop_checkpoint(false);
        assert_eq!(stream.next().kind, ident("b"));
        assert_eq!(stream.depth(), 0);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut stream = TokenStream::new("a b c d");
        stream.push_checkpoint();
        stream.next();
        stream.push_checkpoint();
        stream.next();
        stream.next();
        // inner commit, outer rewind
        stream.pop_checkpoint(false);
        assert_eq!(stream.peek_kind(), &ident("d"));
        stream.pop_checkpoint(true);
        assert_eq!(stream.next().kind, ident("a"));
    }

    #[test]
    fn test_pop_without_push_is_noop() {
        let mut stream = TokenStream::new("a");
        stream.pop_checkpoint(true);
        assert_eq!(stream.next().kind, ident("a"));
    }
}
