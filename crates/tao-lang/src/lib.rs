// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # tao-lang
//!
//! Front end and evaluator for Tao, a small dynamic scripting language.
//!
//! ## Overview
//!
//! - Lexer and checkpointable token stream
//! - Backtracking recursive-descent parser producing an AST
//! - Context scope chain holding bindings and break/return signals
//! - Tree-walking interpreter and a couple of host functions
//!
//! ## Quick Start
//!
//! ```rust
//! use tao_lang::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! let result = engine.eval("let sq = x => x * x; sq(4);").unwrap();
//! assert_eq!(result, Value::Number(16.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod builtins;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;

use std::path::Path;

use tracing::debug;

pub use error::{Error, Result, SyntaxError};
pub use runtime::{NativeFunction, Value};

use ast::Program;
use interpreter::Interpreter;
use parser::Parser;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest allowed nesting of script function calls
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: 200 }
    }
}

/// A Tao engine instance.
///
/// Globals persist across calls to [`eval`](Engine::eval), so a script can
/// be fed in pieces.
#[derive(Debug)]
pub struct Engine {
    interpreter: Interpreter,
}

impl Engine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let mut interpreter = Interpreter::new(config);
        // the global frame starts empty, so installing cannot collide
        let installed = builtins::install(interpreter.environment_mut());
        debug_assert!(installed.is_ok(), "builtins: {:?}", installed);
        Self { interpreter }
    }

    /// Parses `source` without running it.
    pub fn parse(&self, source: &str) -> Result<Program> {
        Parser::new(source).parse_program()
    }

    /// Evaluates Tao source code and returns the value of its last
    /// top-level expression statement.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tao_lang::{Engine, Value};
    /// let mut engine = Engine::new();
    /// engine.eval("let greeting = 'hi';").unwrap();
    /// assert_eq!(engine.eval("greeting + '!';").unwrap(), Value::from("hi!"));
    /// ```
    pub fn eval(&mut self, source: &str) -> Result<Value> {
        let program = self.parse(source)?;
        self.interpreter.run(&program)
    }

    /// Evaluates Tao source code from a file.
    pub fn eval_file(&mut self, path: &Path) -> Result<Value> {
        debug!(path = %path.display(), "loading script");
        let source = std::fs::read_to_string(path).map_err(|e| Error::Io(e.to_string()))?;
        self.eval(&source)
    }

    /// Installs a host function under `name` in the global frame.
    ///
    /// An `arity` of -1 accepts any number of arguments.
    pub fn register(&mut self, name: &str, arity: i32, func: NativeFunction) -> Result<()> {
        let env = self.interpreter.environment_mut();
        let global = env.global();
        env.add(global, name, builtins::make_native(name, arity, func))
    }

    /// Reads a global binding.
    pub fn global(&self, name: &str) -> Option<&Value> {
        let env = self.interpreter.environment();
        env.find(env.global(), name, false)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tao_macros::{assert_err, assert_matches, assert_ok};

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new();
        assert!(engine.global("print").is_some());
        assert!(engine.global("len").is_some());
    }

    #[test]
    fn test_eval_empty() {
        let mut engine = Engine::new();
        assert_eq!(assert_ok!(engine.eval("")), Value::Nil);
    }

    #[test]
    fn test_globals_persist() {
        let mut engine = Engine::new();
        assert_ok!(engine.eval("let n = 40;"));
        assert_eq!(assert_ok!(engine.eval("n + 2;")), Value::Number(42.0));
        assert_eq!(engine.global("n"), Some(&Value::Number(40.0)));
    }

    #[test]
    fn test_register() {
        fn double(args: &[Value]) -> Result<Value> {
            match args {
                [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
                _ => Err(Error::type_error("double expects a number")),
            }
        }

        let mut engine = Engine::new();
        assert_ok!(engine.register("double", 1, double));
        assert_eq!(assert_ok!(engine.eval("double(21);")), Value::Number(42.0));

        let err = assert_err!(engine.eval("double(1, 2);"));
        assert_matches!(err, Error::TypeError(_));
        assert_err!(engine.register("double", 1, double));
    }

    #[test]
    fn test_builtins_installed_once() {
        fn noop(_args: &[Value]) -> Result<Value> {
            Ok(Value::Nil)
        }

        let mut engine = Engine::with_config(Config { max_call_depth: 8 });
        assert_eq!(assert_ok!(engine.eval("len('abc');")), Value::Number(3.0));
        let err = assert_err!(engine.register("print", -1, noop));
        assert_eq!(
            err.as_syntax().map(|e| e.message.as_str()),
            Some("name `print' is already defined in this scope")
        );
    }

    #[test]
    fn test_parse_only() {
        let engine = Engine::new();
        let program = assert_ok!(engine.parse("let x = 1; x;"));
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_eval_file_missing() {
        let mut engine = Engine::new();
        let err = assert_err!(engine.eval_file(Path::new("/nonexistent/script.tao")));
        assert_matches!(err, Error::Io(_));
    }

    #[test]
    fn test_config_default() {
        assert_eq!(Config::default().max_call_depth, 200);
    }
}
