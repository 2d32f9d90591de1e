// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Statement parsing.
//!
//! ## Statement Types
//!
//! | Statement | Method | Example |
//! |-----------|--------|---------|
//! | Variable | `parse_variable_statement` | `let x = 1;` |
//! | Function | `parse_function_statement` | `function f(a) { }` |
//! | Return | `parse_return_statement` | `return x;` |
//! | Block | `parse_block` | `{ ... }` |
//! | For | `parse_for_statement` | `for let i = 0; i < n; i++ { }` |
//! | Break | `parse_break_statement` | `break;` |
//! | If | `parse_if_statement` | `if x { } else if y { } else { }` |
//! | Switch | `parse_switch_statement` | `switch x { case 1, 2: ... default: ... }` |
//! | Assignment | `try_assignment_statement` | `x.y += 1;` |
//! | Expression | `try_expression_statement` | `f(x);` |
//!
//! ## Top Level
//!
//! Only `let`, named function declarations, `;` and the expression and
//! assignment fallbacks are accepted outside a block. `return`, `{`, `for`,
//! `break`, `if` and `switch` there fail with "non-global statement".
//!
//! ## For Forms
//!
//! ```text
//! for { }                       // no parts
//! for cond { }                  // test only
//! for [let x = e]; [cond]; [incr] { }
//! ```
//!
//! The increment is first read as an expression, which must end right before
//! the body. Failing that it is read as an assignment without a trailing `;`.

use std::rc::Rc;

use super::Parser;
use crate::{Error, Result};
use crate::ast::*;
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// Parses a single statement. `global` restricts it to top-level forms.
    pub(super) fn parse_statement(&mut self, global: bool) -> Result<Statement> {
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Let => return self.parse_variable_statement(),
            TokenKind::Function if self.is_function_declaration() => {
                return self.parse_function_statement();
            }
            TokenKind::Semicolon => {
                self.next();
                return Ok(Statement::Empty);
            }
            TokenKind::Return
            | TokenKind::LeftBrace
            | TokenKind::For
            | TokenKind::Break
            | TokenKind::If
            | TokenKind::Switch
                if global =>
            {
                return Err(self.error_here("non-global statement"));
            }
            TokenKind::Return => return self.parse_return_statement(),
            TokenKind::LeftBrace => return self.parse_block().map(Statement::Block),
            TokenKind::For => return self.parse_for_statement(),
            TokenKind::Break => return self.parse_break_statement(),
            TokenKind::If => return self.parse_if_statement().map(Statement::If),
            TokenKind::Switch => return self.parse_switch_statement(),
            _ => {}
        }

        if let Some(statement) = self.speculate(|p| p.try_expression_statement()) {
            return Ok(Statement::Expression(statement));
        }
        if let Some(statement) = self.speculate(|p| p.try_assignment_statement(true)) {
            return Ok(Statement::Assignment(statement));
        }

        Err(self.error_here("unknown statement"))
    }

    /// `function` followed by a name declares; `function (` is an expression.
    fn is_function_declaration(&mut self) -> bool {
        let function = self.next();
        let named = self.check(&TokenKind::Identifier(String::new()));
        self.undo(function);
        named
    }

    fn parse_variable_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Let)?;
        let id = self.expect_identifier()?;

        let init = if self.eat(&TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(Statement::Variable(VariableDeclaration { id, init }))
    }

    fn parse_function_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Function)?;
        let function = self.parse_function_expression()?;
        Ok(Statement::Function(Rc::new(function)))
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Return)?;

        let argument = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(Statement::Return(ReturnStatement { argument }))
    }

    fn parse_break_statement(&mut self) -> Result<Statement> {
        if self.break_depth == 0 {
            return Err(self.error_here("break statement must be in for-loop or switch"));
        }
        self.expect(&TokenKind::Break)?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(Statement::Break)
    }

    /// Parses `{ statement* }`.
    pub(super) fn parse_block(&mut self) -> Result<BlockStatement> {
        self.expect(&TokenKind::LeftBrace)?;

        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            body.push(self.parse_statement(false)?);
        }

        self.expect(&TokenKind::RightBrace)?;
        Ok(BlockStatement { body })
    }

    /// An expression followed by `;`.
    fn try_expression_statement(&mut self) -> Result<Option<ExpressionStatement>> {
        let expression = self.parse_expression()?;
        if !self.eat(&TokenKind::Semicolon) {
            return Ok(None);
        }
        Ok(Some(ExpressionStatement { expression }))
    }

    /// A target, `=` or a compound operator, and a value.
    ///
    /// The trailing `;` is required unless `consume_semicolon` is false, which
    /// only the for increment passes.
    fn try_assignment_statement(
        &mut self,
        consume_semicolon: bool,
    ) -> Result<Option<AssignmentStatement>> {
        let left = self.parse_expression()?;

        let operator = self.next();
        let right = match operator.kind {
            TokenKind::Equal => self.parse_expression()?,
            ref kind => {
                let Some(binary) = compound_operator(kind) else {
                    return Ok(None);
                };
                let value = self.parse_expression()?;
                Expression::binary(binary, left.clone(), value)
            }
        };

        if consume_semicolon && !self.eat(&TokenKind::Semicolon) {
            return Ok(None);
        }

        Ok(Some(AssignmentStatement { left, right }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::For)?;

        let mut init = None;
        let mut test = None;
        let mut update = None;

        let kind = self.peek().kind.clone();
        let three_part = match kind {
            TokenKind::Let => {
                init = Some(Box::new(self.parse_variable_statement()?));
                true
            }
            TokenKind::Semicolon => {
                self.next();
                true
            }
            TokenKind::LeftBrace => false,
            _ => {
                test = Some(self.parse_expression()?);
                false
            }
        };

        if three_part {
            if !self.eat(&TokenKind::Semicolon) {
                test = Some(self.parse_expression()?);
                self.expect(&TokenKind::Semicolon)?;
            }

            if !self.check(&TokenKind::LeftBrace) {
                update = Some(self.parse_for_update()?);
            }
        } else if !self.check(&TokenKind::LeftBrace) {
            return Err(self.error_here("for needs body"));
        }

        let depth = self.break_depth + 1;
        let body = self.with_break_depth(depth, |p| p.parse_block())?;

        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_for_update(&mut self) -> Result<ForUpdate> {
        let expression = self.speculate(|p| {
            let expression = p.parse_expression()?;
            Ok(p.check(&TokenKind::LeftBrace).then_some(expression))
        });
        if let Some(expression) = expression {
            return Ok(ForUpdate::Expression(expression));
        }

        let assignment = self.speculate(|p| {
            let assignment = p.try_assignment_statement(false)?;
            Ok(assignment.filter(|_| p.check(&TokenKind::LeftBrace)))
        });
        match assignment {
            Some(assignment) => Ok(ForUpdate::Assignment(assignment)),
            None => Err(self.error_here("incr expected")),
        }
    }

    fn parse_if_statement(&mut self) -> Result<IfStatement> {
        self.expect(&TokenKind::If)?;
        let test = self.parse_expression()?;
        let consequent = self.parse_block()?;

        let alternate = if self.eat(&TokenKind::Else) {
            let kind = self.peek().kind.clone();
            match kind {
                TokenKind::If => Some(ElseClause::If(Box::new(self.parse_if_statement()?))),
                TokenKind::LeftBrace => Some(ElseClause::Block(self.parse_block()?)),
                _ => return Err(self.error_here("else expect if or block to follow")),
            }
        } else {
            None
        };

        Ok(IfStatement {
            test,
            consequent,
            alternate,
        })
    }

    fn parse_switch_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Switch)?;
        let discriminant = self.parse_expression()?;
        self.expect(&TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        let mut default = None;

        while !self.eat(&TokenKind::RightBrace) {
            let label = self.next();
            let tests = match label.kind {
                TokenKind::Default => {
                    if default.is_some() {
                        return Err(Error::unexpected("duplicate default", &label));
                    }
                    self.expect(&TokenKind::Colon)?;
                    Vec::new()
                }
                TokenKind::Case => {
                    let mut tests = vec![self.parse_expression()?];
                    while self.eat(&TokenKind::Comma) {
                        tests.push(self.parse_expression()?);
                    }
                    self.expect(&TokenKind::Colon)?;
                    tests
                }
                _ => return Err(Error::unexpected("expected case or default", &label)),
            };

            let depth = self.break_depth + 1;
            let body = self.with_break_depth(depth, |p| p.parse_case_body())?;
            let group = CaseGroup { tests, body };

            if group.tests.is_empty() {
                default = Some(group);
            } else {
                cases.push(group);
            }
        }

        Ok(Statement::Switch(SwitchStatement {
            discriminant,
            cases,
            default,
        }))
    }

    /// Statements up to the next `case`, `default` or `}`.
    fn parse_case_body(&mut self) -> Result<BlockStatement> {
        let mut body = Vec::new();
        loop {
            let kind = self.peek().kind.clone();
            match kind {
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace | TokenKind::Eof => {
                    break;
                }
                _ => body.push(self.parse_statement(false)?),
            }
        }
        Ok(BlockStatement { body })
    }
}

/// Maps a compound assignment token to the operator it applies.
fn compound_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::StarStarEqual => BinaryOperator::Exponent,
        TokenKind::StarEqual => BinaryOperator::Multiply,
        TokenKind::SlashEqual => BinaryOperator::Divide,
        TokenKind::PercentEqual => BinaryOperator::Modulo,
        TokenKind::PlusEqual => BinaryOperator::Add,
        TokenKind::MinusEqual => BinaryOperator::Subtract,
        TokenKind::LeftShiftEqual => BinaryOperator::LeftShift,
        TokenKind::RightShiftEqual => BinaryOperator::RightShift,
        TokenKind::AmpersandEqual => BinaryOperator::BitwiseAnd,
        TokenKind::PipeEqual => BinaryOperator::BitwiseOr,
        TokenKind::CaretEqual => BinaryOperator::BitwiseXor,
        TokenKind::AmpersandCaretEqual => BinaryOperator::BitwiseAndNot,
        _ => return None,
    };
    Some(operator)
}
