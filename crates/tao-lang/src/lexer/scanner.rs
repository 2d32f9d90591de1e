// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scanner that produces tokens from source text.

use super::{Span, Token, TokenKind};

/// A scanner that tokenizes Tao source code.
///
/// The scanner never fails: input it cannot make sense of becomes a
/// [`TokenKind::Invalid`] token, and the end of input is reported as
/// [`TokenKind::Eof`] on every call after the last real token.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: u32,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.current_pos;
        let line = self.line;

        let Some((_, ch)) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::new(start, start, line));
        };

        let kind = match ch {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,

            '.' => match self.peek() {
                Some(d) if d.is_ascii_digit() => self.scan_decimal(String::from("0.")),
                _ => TokenKind::Dot,
            },
            '+' => self.either2('+', TokenKind::PlusPlus, '=', TokenKind::PlusEqual, TokenKind::Plus),
            '-' => self.either2(
                '-',
                TokenKind::MinusMinus,
                '=',
                TokenKind::MinusEqual,
                TokenKind::Minus,
            ),
            '*' => {
                if self.eat('*') {
                    self.either('=', TokenKind::StarStarEqual, TokenKind::StarStar)
                } else {
                    self.either('=', TokenKind::StarEqual, TokenKind::Star)
                }
            }
            '/' => self.either('=', TokenKind::SlashEqual, TokenKind::Slash),
            '%' => self.either('=', TokenKind::PercentEqual, TokenKind::Percent),
            '^' => self.either('=', TokenKind::CaretEqual, TokenKind::Caret),
            '!' => self.either('=', TokenKind::NotEqual, TokenKind::Bang),
            '=' => self.either2('=', TokenKind::EqualEqual, '>', TokenKind::Arrow, TokenKind::Equal),
            '<' => {
                if self.eat('<') {
                    self.either('=', TokenKind::LeftShiftEqual, TokenKind::LeftShift)
                } else {
                    self.either('=', TokenKind::LessThanEqual, TokenKind::LessThan)
                }
            }
            '>' => {
                if self.eat('>') {
                    self.either('=', TokenKind::RightShiftEqual, TokenKind::RightShift)
                } else {
                    self.either('=', TokenKind::GreaterThanEqual, TokenKind::GreaterThan)
                }
            }
            '&' => {
                if self.eat('^') {
                    self.either('=', TokenKind::AmpersandCaretEqual, TokenKind::AmpersandCaret)
                } else {
                    self.either2(
                        '&',
                        TokenKind::AmpersandAmpersand,
                        '=',
                        TokenKind::AmpersandEqual,
                        TokenKind::Ampersand,
                    )
                }
            }
            '|' => self.either2('|', TokenKind::PipePipe, '=', TokenKind::PipeEqual, TokenKind::Pipe),

            '"' | '\'' => self.scan_string(ch),
            '0'..='9' => self.scan_number(ch),
            _ if is_id_start(ch) => self.scan_identifier(start),

            _ => TokenKind::Invalid,
        };

        Token::new(kind, Span::new(start, self.current_pos, line))
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, ch)| ch)
    }

    /// Consumes `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn either(&mut self, next: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.eat(next) { matched } else { otherwise }
    }

    fn either2(
        &mut self,
        first: char,
        on_first: TokenKind,
        second: char,
        on_second: TokenKind,
        otherwise: TokenKind,
    ) -> TokenKind {
        if self.eat(first) {
            on_first
        } else if self.eat(second) {
            on_second
        } else {
            otherwise
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    Some('/') => {
                        while let Some(ch) = self.peek() {
                            if ch == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        self.advance();
                        self.advance();
                        let mut prev = ' ';
                        while let Some((_, ch)) = self.advance() {
                            if prev == '*' && ch == '/' {
                                break;
                            }
                            prev = ch;
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            match self.advance() {
                // Unterminated
                None => return TokenKind::Invalid,
                Some((_, ch)) if ch == quote => break,
                Some((_, '\\')) => match self.advance() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, '0')) => value.push('\0'),
                    Some((_, escaped)) => value.push(escaped),
                    None => return TokenKind::Invalid,
                },
                Some((_, ch)) => value.push(ch),
            }
        }

        TokenKind::String(value)
    }

    fn scan_number(&mut self, first: char) -> TokenKind {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                return self.scan_radix(radix);
            }
        }

        let mut value = String::from(first);
        self.take_digits(&mut value, 10);

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            value.push('.');
            return self.scan_decimal(value);
        }
        self.scan_exponent(value)
    }

    /// Continues a number whose integer part and `.` are already in `value`.
    fn scan_decimal(&mut self, mut value: String) -> TokenKind {
        self.take_digits(&mut value, 10);
        self.scan_exponent(value)
    }

    fn scan_exponent(&mut self, mut value: String) -> TokenKind {
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            value.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.advance();
                value.push(sign);
            }
            self.take_digits(&mut value, 10);
        }

        match value.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Invalid,
        }
    }

    fn scan_radix(&mut self, radix: u32) -> TokenKind {
        let mut digits = String::new();
        self.take_digits(&mut digits, radix);

        match u64::from_str_radix(&digits, radix) {
            Ok(n) => TokenKind::Number(n as f64),
            Err(_) => TokenKind::Invalid,
        }
    }

    /// Appends digits of the given radix, dropping `_` separators.
    fn take_digits(&mut self, out: &mut String, radix: u32) {
        while let Some(ch) = self.peek() {
            if ch == '_' {
                self.advance();
            } else if ch.is_digit(radix) {
                out.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let word = &self.source[start..self.current_pos];
        TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Identifier(word.to_string()))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Check if a character can start an identifier.
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Check if a character can continue an identifier.
fn is_id_continue(ch: char) -> bool {
    ch == '$' || unicode_xid::UnicodeXID::is_xid_continue(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{ } ( ) [ ] . ; , : ? => ="),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Dot,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Question,
                TokenKind::Arrow,
                TokenKind::Equal,
            ]
        );
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("** **= & && &^ &^= &= << <<= >> >>= ++ --"),
            vec![
                TokenKind::StarStar,
                TokenKind::StarStarEqual,
                TokenKind::Ampersand,
                TokenKind::AmpersandAmpersand,
                TokenKind::AmpersandCaret,
                TokenKind::AmpersandCaretEqual,
                TokenKind::AmpersandEqual,
                TokenKind::LeftShift,
                TokenKind::LeftShiftEqual,
                TokenKind::RightShift,
                TokenKind::RightShiftEqual,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("let letter nil _x $y"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("letter".into()),
                TokenKind::Nil,
                TokenKind::Identifier("_x".into()),
                TokenKind::Identifier("$y".into()),
            ]
        );
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(kinds("δx"), vec![TokenKind::Identifier("δx".into())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.5 .25 1e3 2E-1 0xff 0o17 0b101 1_000"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.5),
                TokenKind::Number(0.25),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.2),
                TokenKind::Number(255.0),
                TokenKind::Number(15.0),
                TokenKind::Number(5.0),
                TokenKind::Number(1000.0),
            ]
        );
    }

    #[test]
    fn test_number_followed_by_dot_ident() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Dot,
                TokenKind::Identifier("x".into()),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds(r#""a\tb" 'it\'s' "q\"""#),
            vec![
                TokenKind::String("a\tb".into()),
                TokenKind::String("it's".into()),
                TokenKind::String("q\"".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        assert_eq!(kinds("\"abc"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("a // line\n/* block\n */ b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_line_tracking() {
        let tokens: Vec<Token> = Scanner::new("a\n\nb /*\n*/ c").collect();
        let lines: Vec<u32> = tokens.iter().map(Token::line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn test_spans() {
        let mut scanner = Scanner::new("let x");
        assert_eq!(scanner.next_token().span, Span::new(0, 3, 1));
        assert_eq!(scanner.next_token().span, Span::new(4, 5, 1));
    }

    #[test]
    fn test_eof_repeats() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(kinds("@"), vec![TokenKind::Invalid]);
    }
}
