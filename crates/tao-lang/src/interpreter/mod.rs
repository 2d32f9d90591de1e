// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Tree-walking evaluator.
//!
//! Statements run against a [`ContextId`] in the [`Environment`]. Blocks,
//! loop iterations, switch groups and calls each get a fresh child frame.
//! `break` and `return` are recorded as flags on the current frame; after
//! every statement a pending flag stops the statement list and is handed to
//! the enclosing frame until a loop, switch or call consumes it.

mod expressions;
pub mod operators;

use tao_macros::ensure;
use tracing::debug;

use crate::Config;
use crate::ast::{
    AssignmentStatement, BlockStatement, ElseClause, ForStatement, ForUpdate, IfStatement,
    Program, Statement, SwitchStatement,
};
use crate::runtime::{Callable, Closure, ContextId, Environment, Value};
use crate::{Error, Result};

/// Evaluates programs against a persistent global frame.
#[derive(Debug)]
pub struct Interpreter {
    env: Environment,
    config: Config,
    depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty global frame.
    pub fn new(config: Config) -> Self {
        Self {
            env: Environment::new(),
            config,
            depth: 0,
        }
    }

    /// The scope chain.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the scope chain, used to install host functions.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Runs `program` in the global frame.
    ///
    /// Returns the value of the last top-level expression statement, or nil.
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        debug!(statements = program.body.len(), "evaluating program");
        let global = self.env.global();
        let mut last = Value::Nil;
        for statement in &program.body {
            match statement {
                Statement::Expression(statement) => {
                    last = self.eval(&statement.expression, global)?;
                }
                other => self.execute(other, global)?,
            }
        }
        Ok(last)
    }

    /// Executes one statement in `scope`.
    pub fn execute(&mut self, statement: &Statement, scope: ContextId) -> Result<()> {
        match statement {
            Statement::Empty => Ok(()),
            Statement::Variable(decl) => {
                let value = match &decl.init {
                    Some(init) => self.eval(init, scope)?,
                    None => Value::Nil,
                };
                self.env.add(scope, decl.id.name.clone(), value)
            }
            Statement::Function(function) => {
                let value = self.make_closure(function, scope);
                let name = function
                    .id
                    .as_ref()
                    .map(|id| id.name.clone())
                    .unwrap_or_default();
                self.env.add(scope, name, value)
            }
            Statement::Return(ret) => {
                let value = match &ret.argument {
                    Some(argument) => self.eval(argument, scope)?,
                    None => Value::Nil,
                };
                self.env.set_return(scope, value);
                Ok(())
            }
            Statement::Break => {
                self.env.set_break(scope);
                Ok(())
            }
            Statement::Block(block) => self.execute_block(block, scope, "block"),
            Statement::For(stmt) => self.execute_for(stmt, scope),
            Statement::If(stmt) => self.execute_if(stmt, scope),
            Statement::Switch(stmt) => self.execute_switch(stmt, scope),
            Statement::Assignment(stmt) => self.execute_assignment(stmt, scope),
            Statement::Expression(stmt) => {
                self.eval(&stmt.expression, scope)?;
                Ok(())
            }
        }
    }

    /// Runs statements in order, stopping at the first break or return.
    fn execute_list(&mut self, statements: &[Statement], scope: ContextId) -> Result<()> {
        for statement in statements {
            self.execute(statement, scope)?;
            if self.env.has_signal(scope) {
                break;
            }
        }
        Ok(())
    }

    /// Runs `block` in a new child of `parent` and hands its signals up.
    fn execute_block(
        &mut self,
        block: &BlockStatement,
        parent: ContextId,
        label: &'static str,
    ) -> Result<()> {
        let frame = self.env.push(label, parent);
        let result = self.execute_list(&block.body, frame);
        self.env.propagate(frame, parent);
        self.env.pop(frame);
        result
    }

    fn execute_assignment(&mut self, stmt: &AssignmentStatement, scope: ContextId) -> Result<()> {
        let value = self.eval(&stmt.right, scope)?;
        self.assign(&stmt.left, value, scope)
    }

    fn execute_for(&mut self, stmt: &ForStatement, scope: ContextId) -> Result<()> {
        // The loop frame holds the init bindings; each pass gets its own
        // iteration frame below it.
        let frame = self.env.push("for", scope);
        let result = self.run_loop(stmt, frame);
        self.env.propagate(frame, scope);
        self.env.pop(frame);
        result
    }

    fn run_loop(&mut self, stmt: &ForStatement, frame: ContextId) -> Result<()> {
        if let Some(init) = &stmt.init {
            self.execute(init, frame)?;
        }

        loop {
            if let Some(test) = &stmt.test {
                if !self.eval(test, frame)?.to_boolean() {
                    break;
                }
            }

            self.execute_block(&stmt.body, frame, "iteration")?;
            if self.env.take_break(frame) || self.env.has_signal(frame) {
                break;
            }

            match &stmt.update {
                Some(ForUpdate::Expression(update)) => {
                    self.eval(update, frame)?;
                }
                Some(ForUpdate::Assignment(update)) => self.execute_assignment(update, frame)?,
                None => {}
            }
        }
        Ok(())
    }

    fn execute_if(&mut self, stmt: &IfStatement, scope: ContextId) -> Result<()> {
        if self.eval(&stmt.test, scope)?.to_boolean() {
            return self.execute_block(&stmt.consequent, scope, "block");
        }
        match &stmt.alternate {
            Some(ElseClause::If(next)) => self.execute_if(next, scope),
            Some(ElseClause::Block(block)) => self.execute_block(block, scope, "block"),
            None => Ok(()),
        }
    }

    /// Runs the first group with a test equal to the discriminant, else the
    /// default group. Groups never fall through.
    fn execute_switch(&mut self, stmt: &SwitchStatement, scope: ContextId) -> Result<()> {
        let discriminant = self.eval(&stmt.discriminant, scope)?;

        let mut chosen = None;
        'groups: for group in &stmt.cases {
            for test in &group.tests {
                if self.eval(test, scope)? == discriminant {
                    chosen = Some(group);
                    break 'groups;
                }
            }
        }

        let Some(group) = chosen.or(stmt.default.as_ref()) else {
            return Ok(());
        };

        let frame = self.env.push("case", scope);
        let result = self.execute_list(&group.body.body, frame);
        // a break ends the switch only
        self.env.take_break(frame);
        self.env.propagate(frame, scope);
        self.env.pop(frame);
        result
    }

    /// Calls a function value with already evaluated arguments.
    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value> {
        let Value::Function(callable) = callee else {
            return Err(Error::type_error(format!(
                "{} is not callable",
                callee.type_of()
            )));
        };

        match callable.as_ref() {
            Callable::Native { name, arity, func } => {
                if let Ok(expected) = usize::try_from(*arity) {
                    ensure!(
                        args.len() == expected,
                        Error::type_error(format!(
                            "{}() takes {} argument(s) but {} were given",
                            name,
                            expected,
                            args.len()
                        ))
                    );
                }
                func(&args)
            }
            Callable::Function(closure) => self.call_closure(closure, args),
        }
    }

    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> Result<Value> {
        ensure!(
            self.depth < self.config.max_call_depth,
            Error::range_error(format!(
                "maximum call depth of {} exceeded",
                self.config.max_call_depth
            ))
        );

        let frame = self.env.push("call", closure.scope);
        self.depth += 1;
        let result = self.run_call(closure, args, frame);
        self.depth -= 1;
        self.env.pop(frame);
        result
    }

    fn run_call(&mut self, closure: &Closure, args: Vec<Value>, frame: ContextId) -> Result<Value> {
        // missing arguments are nil, extra ones are dropped
        let mut args = args.into_iter();
        for param in &closure.function.params {
            let value = args.next().unwrap_or_default();
            self.env.add(frame, param.name.clone(), value)?;
        }

        self.execute_list(&closure.function.body.body, frame)?;
        Ok(self.env.take_return(frame).unwrap_or_default())
    }
}
