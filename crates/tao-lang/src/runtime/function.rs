// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Tao function representation.

use std::rc::Rc;

use super::ContextId;
use super::value::Value;
use crate::Error;
use crate::ast::FunctionExpression;

/// A script function together with the frame it was defined in.
#[derive(Debug, Clone)]
pub struct Closure {
    /// The parsed function
    pub function: Rc<FunctionExpression>,
    /// The defining frame, parent of every call frame
    pub scope: ContextId,
}

/// A native (Rust) function.
pub type NativeFunction = fn(&[Value]) -> Result<Value, Error>;

/// A callable value - either a script closure or a native function.
#[derive(Clone)]
pub enum Callable {
    /// A script function
    Function(Closure),
    /// A native Rust function
    Native {
        /// The function name
        name: String,
        /// The arity (-1 for variadic)
        arity: i32,
        /// The native function pointer
        func: NativeFunction,
    },
}

impl Callable {
    /// Returns the function name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Callable::Function(closure) => closure.function.id.as_ref().map(|id| id.name.as_str()),
            Callable::Native { name, .. } => Some(name),
        }
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callable::Function(closure) => write!(
                f,
                "Function({}, scope {})",
                self.name().unwrap_or("anonymous"),
                closure.scope.index()
            ),
            Callable::Native { name, .. } => write!(f, "NativeFunction({})", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BlockStatement, Identifier};

    fn make_closure(name: Option<&str>, params: &[&str]) -> Closure {
        Closure {
            function: Rc::new(FunctionExpression {
                id: name.map(Identifier::new),
                params: params.iter().copied().map(Identifier::new).collect(),
                body: BlockStatement::default(),
            }),
            scope: ContextId::GLOBAL,
        }
    }

    #[test]
    fn test_closure_debug() {
        let closure = Callable::Function(make_closure(Some("fib"), &["n"]));
        assert_eq!(format!("{:?}", closure), "Function(fib, scope 0)");
    }

    #[test]
    fn test_callable_name() {
        let named = Callable::Function(make_closure(Some("fib"), &["n"]));
        let anonymous = Callable::Function(make_closure(None, &[]));
        assert_eq!(named.name(), Some("fib"));
        assert_eq!(anonymous.name(), None);
    }

    #[test]
    fn test_callable_native() {
        fn native_fn(_args: &[Value]) -> Result<Value, Error> {
            Ok(Value::Number(42.0))
        }

        let callable = Callable::Native {
            name: "native_test".to_string(),
            arity: 0,
            func: native_fn,
        };

        let debug = format!("{:?}", callable);
        assert!(debug.contains("native_test"));
        assert_eq!(callable.name(), Some("native_test"));
    }

    #[test]
    fn test_native_function_type() {
        fn identity(args: &[Value]) -> Result<Value, Error> {
            args.first()
                .cloned()
                .ok_or_else(|| Error::type_error("need at least one argument"))
        }

        let Callable::Native { func, arity, .. } = (Callable::Native {
            name: "identity".to_string(),
            arity: 1,
            func: identity,
        }) else {
            panic!("Expected Native");
        };

        assert_eq!(arity, 1);
        assert_eq!(func(&[Value::Boolean(true)]), Ok(Value::Boolean(true)));
        assert!(func(&[]).is_err());
    }
}
