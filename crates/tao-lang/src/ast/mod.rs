// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for Tao.
//!
//! Both node families are closed: the interpreter matches them exhaustively.
//! Compound assignments never appear here; the parser rewrites `x op= y`
//! into `x = x op y` before building an [`AssignmentStatement`].

use std::rc::Rc;

use rustc_hash::FxHashMap;

/// A complete Tao program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements in source order
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
}

impl Identifier {
    /// Creates an identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A Tao statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Empty statement (;)
    Empty,
    /// `let` declaration
    Variable(VariableDeclaration),
    /// Named function declaration
    Function(Rc<FunctionExpression>),
    /// Return statement
    Return(ReturnStatement),
    /// Block statement { ... }
    Block(BlockStatement),
    /// For statement, in any of its three forms
    For(ForStatement),
    /// Break statement
    Break,
    /// If statement
    If(IfStatement),
    /// Switch statement
    Switch(SwitchStatement),
    /// Assignment statement, compound forms already desugared
    Assignment(AssignmentStatement),
    /// Expression statement
    Expression(ExpressionStatement),
}

/// A `let` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The identifier being declared
    pub id: Identifier,
    /// Optional initializer expression
    pub init: Option<Expression>,
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The return value
    pub argument: Option<Expression>,
}

/// A block statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    /// The statements in the block
    pub body: Vec<Statement>,
}

/// A for statement.
///
/// `for {}` leaves every part empty, `for cond {}` fills only `test`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// The initializer, a `let` declaration
    pub init: Option<Box<Statement>>,
    /// The condition
    pub test: Option<Expression>,
    /// The increment
    pub update: Option<ForUpdate>,
    /// The loop body
    pub body: BlockStatement,
}

/// The increment slot of a for statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ForUpdate {
    /// A bare expression such as `i++`
    Expression(Expression),
    /// An assignment such as `i += 1`
    Assignment(AssignmentStatement),
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition
    pub test: Expression,
    /// The then branch
    pub consequent: BlockStatement,
    /// The optional else branch
    pub alternate: Option<ElseClause>,
}

/// What follows `else`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseClause {
    /// `else if ...`
    If(Box<IfStatement>),
    /// `else { ... }`
    Block(BlockStatement),
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// The discriminant expression
    pub discriminant: Expression,
    /// The case groups in source order
    pub cases: Vec<CaseGroup>,
    /// The default group
    pub default: Option<CaseGroup>,
}

/// One `case a, b:` group, or the default group with no tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseGroup {
    /// The case values
    pub tests: Vec<Expression>,
    /// The statements of the group
    pub body: BlockStatement,
}

/// An assignment statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    /// The target, an identifier or an index expression
    pub left: Expression,
    /// The value
    pub right: Expression,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
}

/// A Tao expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Literal),
    /// Identifier reference
    Identifier(Identifier),
    /// Unary expression
    Unary(UnaryExpression),
    /// Binary expression
    Binary(BinaryExpression),
    /// Conditional (ternary) expression
    Conditional(ConditionalExpression),
    /// Update expression (++/--)
    Update(UpdateExpression),
    /// Index expression, `a.b` or `a[b]`
    Index(IndexExpression),
    /// Call expression
    Call(CallExpression),
    /// Function expression or lambda
    Function(Rc<FunctionExpression>),
    /// Object literal
    Object(ObjectExpression),
    /// Array literal
    Array(ArrayExpression),
}

impl Expression {
    /// Wraps a literal.
    pub fn literal(literal: Literal) -> Self {
        Expression::Literal(literal)
    }

    /// Builds an identifier reference.
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    /// Builds a binary expression.
    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// nil literal
    Nil,
    /// Boolean literal
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub argument: Box<Expression>,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// !
    LogicalNot,
    /// ^
    BitwiseNot,
    /// +
    Plus,
    /// -
    Minus,
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operator
    pub operator: BinaryOperator,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    /// &&
    LogicalAnd,
    /// ||
    LogicalOr,
    // Bitwise
    /// &
    BitwiseAnd,
    /// |
    BitwiseOr,
    /// ^
    BitwiseXor,
    /// `&^`, and-not
    BitwiseAndNot,
    // Equality
    /// ==
    Equal,
    /// !=
    NotEqual,
    // Relational
    /// >
    GreaterThan,
    /// >=
    GreaterThanEqual,
    /// <
    LessThan,
    /// <=
    LessThanEqual,
    // Shift
    /// <<
    LeftShift,
    /// >>
    RightShift,
    // Arithmetic
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
    /// %
    Modulo,
    /// **, right-associative
    Exponent,
}

/// Binding strength of operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Entry point of a full expression
    Lowest,
    /// `?:`
    Conditional,
    /// `&& ||`
    Logical,
    /// `& | ^ &^`
    Bitwise,
    /// `== !=`
    Equality,
    /// `> >= < <=`
    Relational,
    /// `<< >>`
    Shift,
    /// `+ -`
    Additive,
    /// `* / %`
    Multiplicative,
    /// `**`
    Power,
    /// postfix `++ --`, and the operand of any prefix operator
    Postfix,
}

impl Precedence {
    /// The next tier up, used for the right operand of left-associative operators.
    pub fn tighter(self) -> Self {
        match self {
            Precedence::Lowest => Precedence::Conditional,
            Precedence::Conditional => Precedence::Logical,
            Precedence::Logical => Precedence::Bitwise,
            Precedence::Bitwise => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Power,
            Precedence::Power | Precedence::Postfix => Precedence::Postfix,
        }
    }
}

impl BinaryOperator {
    /// Returns the tier this operator binds at.
    pub fn precedence(self) -> Precedence {
        use BinaryOperator::*;
        match self {
            LogicalAnd | LogicalOr => Precedence::Logical,
            BitwiseAnd | BitwiseOr | BitwiseXor | BitwiseAndNot => Precedence::Bitwise,
            Equal | NotEqual => Precedence::Equality,
            GreaterThan | GreaterThanEqual | LessThan | LessThanEqual => Precedence::Relational,
            LeftShift | RightShift => Precedence::Shift,
            Add | Subtract => Precedence::Additive,
            Multiply | Divide | Modulo => Precedence::Multiplicative,
            Exponent => Precedence::Power,
        }
    }

    /// True for `**`, the only right-associative operator.
    pub fn is_right_associative(self) -> bool {
        self == BinaryOperator::Exponent
    }

    /// Source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            LogicalAnd => "&&",
            LogicalOr => "||",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAndNot => "&^",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            GreaterThanEqual => ">=",
            LessThan => "<",
            LessThanEqual => "<=",
            LeftShift => "<<",
            RightShift => ">>",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Exponent => "**",
        }
    }
}

/// A conditional (ternary) expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// The condition
    pub test: Box<Expression>,
    /// The consequent (if true)
    pub consequent: Box<Expression>,
    /// The alternate (if false)
    pub alternate: Box<Expression>,
}

/// An update expression (++/--)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// The operator
    pub operator: UpdateOperator,
    /// Whether prefix (++x) or postfix (x++)
    pub prefix: bool,
    /// The operand
    pub argument: Box<Expression>,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// ++
    Increment,
    /// --
    Decrement,
}

/// An index expression.
///
/// `a.b` is stored with the string literal `"b"` as its key, so both
/// forms evaluate the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    /// The indexed value
    pub object: Box<Expression>,
    /// The key
    pub key: Box<Expression>,
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The function being called
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
}

/// A function, declared or anonymous.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    /// Optional name
    pub id: Option<Identifier>,
    /// Parameters, unique by name
    pub params: Vec<Identifier>,
    /// Body
    pub body: BlockStatement,
}

/// An object literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectExpression {
    /// The properties, keyed by name
    pub properties: FxHashMap<String, Expression>,
}

/// An array literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayExpression {
    /// The elements
    pub elements: Vec<Expression>,
}
