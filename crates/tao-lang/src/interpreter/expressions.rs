// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression evaluation.

use std::rc::Rc;

use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use tao_macros::bail;

use super::{Interpreter, operators};
use crate::ast::{BinaryOperator, Expression, FunctionExpression, Literal, UpdateExpression};
use crate::runtime::{Callable, Closure, ContextId, Value};
use crate::{Error, Result};

/// A storage location an assignment or update writes to.
enum Place {
    /// A binding found through the scope chain
    Name(String),
    /// An array element or object property
    Element { container: Value, key: Value },
}

/// Remaining stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each extra stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

impl Interpreter {
    /// Evaluates `expression` in `scope`.
    ///
    /// Every script call passes through here, so the stack is grown on
    /// demand and recursion is bounded by `Config::max_call_depth` alone.
    pub fn eval(&mut self, expression: &Expression, scope: ContextId) -> Result<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_inner(expression, scope)
        })
    }

    fn eval_inner(&mut self, expression: &Expression, scope: ContextId) -> Result<Value> {
        match expression {
            Expression::Literal(literal) => Ok(match literal {
                Literal::Nil => Value::Nil,
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Number(n) => Value::Number(*n),
                Literal::String(s) => Value::String(s.clone()),
            }),
            Expression::Identifier(id) => self.env.must_find(scope, &id.name, true).cloned(),
            Expression::Unary(unary) => {
                let argument = self.eval(&unary.argument, scope)?;
                operators::unary(unary.operator, &argument)
            }
            Expression::Binary(binary) => {
                let left = self.eval(&binary.left, scope)?;
                match binary.operator {
                    BinaryOperator::LogicalAnd if !left.to_boolean() => Ok(Value::Boolean(false)),
                    BinaryOperator::LogicalOr if left.to_boolean() => Ok(Value::Boolean(true)),
                    operator => {
                        let right = self.eval(&binary.right, scope)?;
                        operators::binary(operator, &left, &right)
                    }
                }
            }
            Expression::Conditional(conditional) => {
                if self.eval(&conditional.test, scope)?.to_boolean() {
                    self.eval(&conditional.consequent, scope)
                } else {
                    self.eval(&conditional.alternate, scope)
                }
            }
            Expression::Update(update) => self.eval_update(update, scope),
            Expression::Index(index) => {
                let object = self.eval(&index.object, scope)?;
                let key = self.eval(&index.key, scope)?;
                get_element(&object, &key)
            }
            Expression::Call(call) => {
                let callee = self.eval(&call.callee, scope)?;
                let args = call
                    .arguments
                    .iter()
                    .map(|argument| self.eval(argument, scope))
                    .collect::<Result<Vec<_>>>()?;
                self.call(&callee, args)
            }
            Expression::Function(function) => Ok(self.make_closure(function, scope)),
            Expression::Object(object) => {
                let mut properties = FxHashMap::default();
                for (key, value) in &object.properties {
                    properties.insert(key.clone(), self.eval(value, scope)?);
                }
                Ok(Value::object(properties))
            }
            Expression::Array(array) => {
                let elements = array
                    .elements
                    .iter()
                    .map(|element| self.eval(element, scope))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::array(elements))
            }
        }
    }

    /// Creates a closure over `scope` and keeps that frame alive.
    pub(super) fn make_closure(&mut self, function: &Rc<FunctionExpression>, scope: ContextId) -> Value {
        self.env.capture(scope);
        Value::Function(Rc::new(Callable::Function(Closure {
            function: Rc::clone(function),
            scope,
        })))
    }

    /// Stores `value` into the place `target` denotes.
    pub(super) fn assign(&mut self, target: &Expression, value: Value, scope: ContextId) -> Result<()> {
        let place = self.place(target, scope)?;
        self.store(place, value, scope)
    }

    fn eval_update(&mut self, update: &UpdateExpression, scope: ContextId) -> Result<Value> {
        let place = self.place(&update.argument, scope)?;
        let old = match &place {
            Place::Name(name) => self.env.address_of(scope, name)?.clone(),
            Place::Element { container, key } => get_element(container, key)?,
        };
        let new = operators::update(update.operator, &old)?;
        self.store(place, new.clone(), scope)?;
        Ok(if update.prefix { new } else { old })
    }

    /// Resolves an assignment target, evaluating its container and key once.
    fn place(&mut self, target: &Expression, scope: ContextId) -> Result<Place> {
        match target {
            Expression::Identifier(id) => Ok(Place::Name(id.name.clone())),
            Expression::Index(index) => {
                let container = self.eval(&index.object, scope)?;
                let key = self.eval(&index.key, scope)?;
                Ok(Place::Element { container, key })
            }
            _ => Err(Error::type_error("expression is not assignable")),
        }
    }

    fn store(&mut self, place: Place, value: Value, scope: ContextId) -> Result<()> {
        match place {
            Place::Name(name) => self.env.set(scope, &name, value),
            Place::Element { container, key } => set_element(&container, key, value),
        }
    }
}

/// Reads `container[key]`.
fn get_element(container: &Value, key: &Value) -> Result<Value> {
    match (container, key) {
        (Value::Array(elements), Value::Number(n)) => {
            let elements = elements.borrow();
            let index = to_index(*n, elements.len())?;
            Ok(elements[index].clone())
        }
        (Value::String(s), Value::Number(n)) => {
            let chars: Vec<char> = s.chars().collect();
            let index = to_index(*n, chars.len())?;
            Ok(Value::String(chars[index].to_string()))
        }
        (Value::Object(properties), Value::String(name)) => {
            Ok(properties.borrow().get(name).cloned().unwrap_or_default())
        }
        _ => Err(Error::type_error(format!(
            "cannot index {} with {}",
            container.type_of(),
            key.type_of()
        ))),
    }
}

/// Writes `container[key] = value`.
fn set_element(container: &Value, key: Value, value: Value) -> Result<()> {
    match (container, key) {
        (Value::Array(elements), Value::Number(n)) => {
            let mut elements = elements.borrow_mut();
            let index = to_index(n, elements.len())?;
            elements[index] = value;
            Ok(())
        }
        (Value::Object(properties), Value::String(name)) => {
            properties.borrow_mut().insert(name, value);
            Ok(())
        }
        (container, key) => bail!(Error::type_error(format!(
            "cannot assign into {} with {} key",
            container.type_of(),
            key.type_of()
        ))),
    }
}

/// Converts a number into an index below `len`.
fn to_index(n: f64, len: usize) -> Result<usize> {
    if n.fract() != 0.0 {
        return Err(Error::type_error(format!("index {} is not an integer", n)));
    }
    match n.to_usize() {
        Some(index) if index < len => Ok(index),
        _ => Err(Error::range_error(format!(
            "index {} out of range for length {}",
            n, len
        ))),
    }
}
