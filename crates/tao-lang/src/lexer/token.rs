// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Token definitions for the Tao lexer.

use std::fmt;

use tao_macros::keywords;

/// A span in the source code, representing a range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// 1-based line of the first character
    pub line: u32,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the source line of this token.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

/// The different kinds of tokens in Tao.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal (integer or floating point)
    Number(f64),
    /// String literal
    String(String),
    /// Boolean true
    True,
    /// Boolean false
    False,
    /// nil
    Nil,

    /// Identifier
    Identifier(String),

    // Keywords
    /// break
    Break,
    /// case
    Case,
    /// default
    Default,
    /// else
    Else,
    /// for
    For,
    /// function
    Function,
    /// if
    If,
    /// let
    Let,
    /// return
    Return,
    /// switch
    Switch,

    // Punctuation
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// :
    Colon,
    /// ?
    Question,
    /// =>
    Arrow,
    /// =
    Equal,

    // Operators
    /// ==
    EqualEqual,
    /// !=
    NotEqual,
    /// <
    LessThan,
    /// <=
    LessThanEqual,
    /// >
    GreaterThan,
    /// >=
    GreaterThanEqual,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// **
    StarStar,
    /// ++
    PlusPlus,
    /// --
    MinusMinus,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &
    Ampersand,
    /// |
    Pipe,
    /// ^
    Caret,
    /// &^
    AmpersandCaret,
    /// !
    Bang,
    /// &&
    AmpersandAmpersand,
    /// ||
    PipePipe,

    // Compound assignment
    /// **=
    StarStarEqual,
    /// *=
    StarEqual,
    /// /=
    SlashEqual,
    /// %=
    PercentEqual,
    /// +=
    PlusEqual,
    /// -=
    MinusEqual,
    /// <<=
    LeftShiftEqual,
    /// >>=
    RightShiftEqual,
    /// &=
    AmpersandEqual,
    /// |=
    PipeEqual,
    /// ^=
    CaretEqual,
    /// &^=
    AmpersandCaretEqual,

    // Special
    /// End of input
    Eof,
    /// Unrecognized input
    Invalid,
}

keywords! {
    TokenKind {
        "break" => Break,
        "case" => Case,
        "default" => Default,
        "else" => Else,
        "false" => False,
        "for" => For,
        "function" => Function,
        "if" => If,
        "let" => Let,
        "nil" => Nil,
        "return" => Return,
        "switch" => Switch,
        "true" => True,
    }
}

impl TokenKind {
    /// Returns true for reserved statement keywords.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Break
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Let
                | TokenKind::Return
                | TokenKind::Switch
        )
    }

    /// Returns true for literal tokens.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
        )
    }

    /// Returns true for the twelve compound assignment operators.
    pub fn is_compound_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::StarStarEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::LeftShiftEqual
                | TokenKind::RightShiftEqual
                | TokenKind::AmpersandEqual
                | TokenKind::PipeEqual
                | TokenKind::CaretEqual
                | TokenKind::AmpersandCaretEqual
        )
    }

    /// Source spelling of fixed tokens.
    fn text(&self) -> &'static str {
        match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Let => "let",
            TokenKind::Return => "return",
            TokenKind::Switch => "switch",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Arrow => "=>",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessThanEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanEqual => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::StarStar => "**",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::AmpersandCaret => "&^",
            TokenKind::Bang => "!",
            TokenKind::AmpersandAmpersand => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::StarStarEqual => "**=",
            TokenKind::StarEqual => "*=",
            TokenKind::SlashEqual => "/=",
            TokenKind::PercentEqual => "%=",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusEqual => "-=",
            TokenKind::LeftShiftEqual => "<<=",
            TokenKind::RightShiftEqual => ">>=",
            TokenKind::AmpersandEqual => "&=",
            TokenKind::PipeEqual => "|=",
            TokenKind::CaretEqual => "^=",
            TokenKind::AmpersandCaretEqual => "&^=",
            TokenKind::Eof => "end of input",
            TokenKind::Invalid => "invalid token",
            TokenKind::Number(_) | TokenKind::String(_) | TokenKind::Identifier(_) => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number `{}`", n),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Identifier(name) => write!(f, "identifier `{}`", name),
            TokenKind::Eof | TokenKind::Invalid => write!(f, "{}", self.text()),
            _ => write!(f, "`{}`", self.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 15, 1);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3, 1).is_empty());
    }

    #[test]
    fn test_token_line() {
        let token = Token::new(TokenKind::Plus, Span::new(10, 11, 4));
        assert_eq!(token.line(), 4);
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::keyword("var"), None);
        assert!(TokenKind::keywords().contains(&"switch"));
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::For.is_keyword());
        assert!(!TokenKind::True.is_keyword());
        assert!(!TokenKind::Identifier("for".into()).is_keyword());
    }

    #[test]
    fn test_is_literal() {
        assert!(TokenKind::Number(1.0).is_literal());
        assert!(TokenKind::Nil.is_literal());
        assert!(!TokenKind::Identifier("x".into()).is_literal());
    }

    #[test]
    fn test_compound_assignment_set() {
        let compound = [
            TokenKind::StarStarEqual,
            TokenKind::StarEqual,
            TokenKind::SlashEqual,
            TokenKind::PercentEqual,
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
            TokenKind::LeftShiftEqual,
            TokenKind::RightShiftEqual,
            TokenKind::AmpersandEqual,
            TokenKind::PipeEqual,
            TokenKind::CaretEqual,
            TokenKind::AmpersandCaretEqual,
        ];
        assert!(compound.iter().all(TokenKind::is_compound_assignment));
        assert!(!TokenKind::Equal.is_compound_assignment());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::AmpersandCaretEqual.to_string(), "`&^=`");
        assert_eq!(TokenKind::Identifier("foo".into()).to_string(), "identifier `foo`");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
