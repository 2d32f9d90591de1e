// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression parsing by precedence climbing.
//!
//! ## Precedence Table (lowest to highest)
//!
//! | Tier | Operators | Associativity |
//! |------|-----------|---------------|
//! | Conditional | `?:` | not nestable in its branches |
//! | Logical | `&&` `\|\|` | left |
//! | Bitwise | `&` `\|` `^` `&^` | left |
//! | Equality | `==` `!=` | left |
//! | Relational | `>` `>=` `<` `<=` | left |
//! | Shift | `<<` `>>` | left |
//! | Additive | `+` `-` | left |
//! | Multiplicative | `*` `/` `%` | left |
//! | Power | `**` | right |
//! | Postfix | `++` `--` | |
//!
//! Prefix `! ^ + - ++ --` take an operand parsed at the postfix tier, so they
//! bind tighter than any binary operator.
//!
//! ## Primary Expressions
//!
//! - Literals: `42`, `"hi"`, `true`, `nil`
//! - Identifiers and parenthesized expressions
//! - Objects `{a: 1, "b": 2,}` and arrays `[1, 2,]`
//! - Functions `function name(a, b) { }` and lambdas `x => x + 1`,
//!   `(a, b) => { return a + b; }`
//!
//! Any primary may be followed by `.name`, `[key]` and `(args)` suffixes.

use std::rc::Rc;

use super::Parser;
use crate::ast::*;
use crate::lexer::{Token, TokenKind};
use crate::{Error, Result};

/// What an operator token does in infix position.
enum Infix {
    Conditional,
    Postfix(UpdateOperator),
    Binary(BinaryOperator),
}

impl Infix {
    fn from_token(kind: &TokenKind) -> Option<Self> {
        let binary = match kind {
            TokenKind::Question => return Some(Infix::Conditional),
            TokenKind::PlusPlus => return Some(Infix::Postfix(UpdateOperator::Increment)),
            TokenKind::MinusMinus => return Some(Infix::Postfix(UpdateOperator::Decrement)),
            TokenKind::AmpersandAmpersand => BinaryOperator::LogicalAnd,
            TokenKind::PipePipe => BinaryOperator::LogicalOr,
            TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
            TokenKind::Pipe => BinaryOperator::BitwiseOr,
            TokenKind::Caret => BinaryOperator::BitwiseXor,
            TokenKind::AmpersandCaret => BinaryOperator::BitwiseAndNot,
            TokenKind::EqualEqual => BinaryOperator::Equal,
            TokenKind::NotEqual => BinaryOperator::NotEqual,
            TokenKind::GreaterThan => BinaryOperator::GreaterThan,
            TokenKind::GreaterThanEqual => BinaryOperator::GreaterThanEqual,
            TokenKind::LessThan => BinaryOperator::LessThan,
            TokenKind::LessThanEqual => BinaryOperator::LessThanEqual,
            TokenKind::LeftShift => BinaryOperator::LeftShift,
            TokenKind::RightShift => BinaryOperator::RightShift,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::StarStar => BinaryOperator::Exponent,
            _ => return None,
        };
        Some(Infix::Binary(binary))
    }

    fn precedence(&self) -> Precedence {
        match self {
            Infix::Conditional => Precedence::Conditional,
            Infix::Postfix(_) => Precedence::Postfix,
            Infix::Binary(op) => op.precedence(),
        }
    }
}

impl Parser<'_> {
    /// Parses a full expression.
    pub fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_expression_with(Precedence::Lowest)
    }

    /// Parses an expression whose operators all bind at least as tightly as `min`.
    fn parse_expression_with(&mut self, min: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        loop {
            let token = self.next();
            let infix = match Infix::from_token(&token.kind) {
                Some(infix) if infix.precedence() >= min => infix,
                _ => {
                    self.undo(token);
                    break;
                }
            };

            left = match infix {
                Infix::Conditional => self.parse_conditional(left)?,
                Infix::Postfix(operator) => Expression::Update(UpdateExpression {
                    operator,
                    prefix: false,
                    argument: Box::new(left),
                }),
                Infix::Binary(operator) => {
                    let tier = operator.precedence();
                    let next = if operator.is_right_associative() {
                        tier
                    } else {
                        tier.tighter()
                    };
                    let right = self.parse_expression_with(next)?;
                    Expression::binary(operator, left, right)
                }
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let kind = self.peek().kind.clone();
        let unary = match kind {
            TokenKind::Bang => UnaryOperator::LogicalNot,
            TokenKind::Caret => UnaryOperator::BitwiseNot,
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Minus => UnaryOperator::Minus,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let operator = match self.next().kind {
                    TokenKind::PlusPlus => UpdateOperator::Increment,
                    _ => UpdateOperator::Decrement,
                };
                let argument = self.parse_expression_with(Precedence::Postfix)?;
                return Ok(Expression::Update(UpdateExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                }));
            }
            _ => return self.parse_primary(),
        };

        self.next();
        let argument = self.parse_expression_with(Precedence::Postfix)?;
        Ok(Expression::Unary(UnaryExpression {
            operator: unary,
            argument: Box::new(argument),
        }))
    }

    /// Parses the branches after `?`. Neither may be an unparenthesized ternary.
    fn parse_conditional(&mut self, test: Expression) -> Result<Expression> {
        let consequent = self.parse_conditional_branch()?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_conditional_branch()?;

        Ok(Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    fn parse_conditional_branch(&mut self) -> Result<Expression> {
        let branch = self.parse_expression_with(Precedence::Logical)?;
        if self.check(&TokenKind::Question) {
            return Err(self.error_here("nested ?: is not allowed"));
        }
        Ok(branch)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.next();

        let expr = match token.kind {
            TokenKind::Nil => Expression::Literal(Literal::Nil),
            TokenKind::True => Expression::Literal(Literal::Boolean(true)),
            TokenKind::False => Expression::Literal(Literal::Boolean(false)),
            TokenKind::Number(n) => Expression::Literal(Literal::Number(n)),
            TokenKind::String(s) => Expression::Literal(Literal::String(s)),
            TokenKind::LeftParen => {
                self.undo(token);
                if let Some(lambda) = self.parse_lambda()? {
                    return Ok(lambda);
                }
                self.next();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RightParen)?;
                inner
            }
            TokenKind::Identifier(_) if self.check(&TokenKind::Arrow) => {
                self.undo(token);
                return match self.parse_lambda()? {
                    Some(lambda) => Ok(lambda),
                    None => Err(self.error_here("bad lambda expression")),
                };
            }
            TokenKind::Identifier(name) => Expression::Identifier(Identifier { name }),
            TokenKind::Function => Expression::Function(Rc::new(self.parse_function_expression()?)),
            TokenKind::LeftBrace => self.parse_object_literal()?,
            TokenKind::LeftBracket => self.parse_array_literal()?,
            TokenKind::Invalid => return Err(Error::unexpected("invalid token", &token)),
            _ => return Err(Error::unexpected("unknown expression", &token)),
        };

        self.parse_suffixes(expr)
    }

    /// Attaches `.name`, `[key]` and `(args)` until none follows.
    fn parse_suffixes(&mut self, mut expr: Expression) -> Result<Expression> {
        loop {
            let token = self.next();
            expr = match token.kind {
                TokenKind::Dot => {
                    let name = self.next();
                    let key = match name.kind {
                        TokenKind::Identifier(key) => key,
                        _ => return Err(Error::unexpected("expected identifier after `.`", &name)),
                    };
                    Expression::Index(IndexExpression {
                        object: Box::new(expr),
                        key: Box::new(Expression::Literal(Literal::String(key))),
                    })
                }
                TokenKind::LeftBracket => {
                    let key = self.parse_expression()?;
                    self.expect(&TokenKind::RightBracket)?;
                    Expression::Index(IndexExpression {
                        object: Box::new(expr),
                        key: Box::new(key),
                    })
                }
                TokenKind::LeftParen => {
                    let arguments = self.parse_arguments()?;
                    Expression::Call(CallExpression {
                        callee: Box::new(expr),
                        arguments,
                    })
                }
                _ => {
                    self.undo(token);
                    return Ok(expr);
                }
            };
        }
    }

    /// Arguments after `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut arguments = Vec::new();
        if self.eat(&TokenKind::RightParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);
            let separator = self.next();
            match separator.kind {
                TokenKind::Comma => continue,
                TokenKind::RightParen => break,
                _ => return Err(Error::unexpected("expected `,` or `)`", &separator)),
            }
        }

        Ok(arguments)
    }

    /// Parses a lambda if the upcoming tokens form `params =>`.
    ///
    /// Returns `Ok(None)` with the stream untouched when they do not.
    fn parse_lambda(&mut self) -> Result<Option<Expression>> {
        let Some(params) = self.speculate(|p| p.parse_lambda_parameters()) else {
            return Ok(None);
        };
        let params = unique_parameters(params)?;

        let body = self.with_break_depth(0, |p| {
            if p.check(&TokenKind::LeftBrace) {
                p.parse_block()
            } else {
                let argument = p.parse_expression()?;
                Ok(BlockStatement {
                    body: vec![Statement::Return(ReturnStatement {
                        argument: Some(argument),
                    })],
                })
            }
        })?;

        Ok(Some(Expression::Function(Rc::new(FunctionExpression {
            id: None,
            params,
            body,
        }))))
    }

    /// `ident =>` or `(ident, ...) =>`, consuming the arrow.
    fn parse_lambda_parameters(&mut self) -> Result<Option<Vec<Token>>> {
        let mut params = Vec::new();

        if self.eat(&TokenKind::LeftParen) {
            if !self.eat(&TokenKind::RightParen) {
                loop {
                    let token = self.next();
                    if !matches!(token.kind, TokenKind::Identifier(_)) {
                        return Ok(None);
                    }
                    params.push(token);
                    if self.eat(&TokenKind::Comma) {
                        continue;
                    }
                    if self.eat(&TokenKind::RightParen) {
                        break;
                    }
                    return Ok(None);
                }
            }
        } else {
            let token = self.next();
            if !matches!(token.kind, TokenKind::Identifier(_)) {
                return Ok(None);
            }
            params.push(token);
        }

        Ok(self.eat(&TokenKind::Arrow).then_some(params))
    }

    /// Parses a function after the `function` keyword: optional name,
    /// parameter list and body.
    pub(super) fn parse_function_expression(&mut self) -> Result<FunctionExpression> {
        let id = if self.check(&TokenKind::Identifier(String::new())) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect(&TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.eat(&TokenKind::RightParen) {
            loop {
                let token = self.next();
                if !matches!(token.kind, TokenKind::Identifier(_)) {
                    return Err(Error::unexpected("expected identifier", &token));
                }
                params.push(token);

                let separator = self.next();
                match separator.kind {
                    TokenKind::Comma => continue,
                    TokenKind::RightParen => break,
                    _ => return Err(Error::unexpected("expected `,` or `)`", &separator)),
                }
            }
        }
        let params = unique_parameters(params)?;

        if !self.check(&TokenKind::LeftBrace) {
            return Err(self.error_here("function needs a body"));
        }
        let body = self.with_break_depth(0, |p| p.parse_block())?;

        Ok(FunctionExpression { id, params, body })
    }

    /// Object literal after `{`.
    fn parse_object_literal(&mut self) -> Result<Expression> {
        let mut object = ObjectExpression::default();

        while !self.eat(&TokenKind::RightBrace) {
            let token = self.next();
            let key = match token.kind {
                TokenKind::String(key) | TokenKind::Identifier(key) => key,
                _ => return Err(Error::unexpected("unsupported key type", &token)),
            };

            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expression()?;
            object.properties.insert(key, value);

            // allow last comma
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RightBrace)?;
                break;
            }
        }

        Ok(Expression::Object(object))
    }

    /// Array literal after `[`.
    fn parse_array_literal(&mut self) -> Result<Expression> {
        let mut array = ArrayExpression::default();

        while !self.eat(&TokenKind::RightBracket) {
            array.elements.push(self.parse_expression()?);

            // allow last comma
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RightBracket)?;
                break;
            }
        }

        Ok(Expression::Array(array))
    }
}

/// Converts parameter tokens to identifiers, rejecting repeated names.
fn unique_parameters(tokens: Vec<Token>) -> Result<Vec<Identifier>> {
    let mut params: Vec<Identifier> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let TokenKind::Identifier(name) = &token.kind else {
            return Err(Error::unexpected("expected identifier", &token));
        };
        if params.iter().any(|p| &p.name == name) {
            return Err(Error::unexpected("duplicate parameter", &token));
        }
        params.push(Identifier::new(name.clone()));
    }
    Ok(params)
}
