// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Host functions installed in the global frame.

pub mod console;
pub mod global;

use std::rc::Rc;

use crate::Result;
use crate::runtime::{Callable, Environment, NativeFunction, Value};

/// Register all built-in functions in the global frame of `env`.
pub fn install(env: &mut Environment) -> Result<()> {
    let global = env.global();
    env.add(global, "print", make_native("print", -1, console::print))?;
    env.add(global, "len", make_native("len", 1, global::len))?;
    Ok(())
}

/// Create a native function value.
pub fn make_native(name: &str, arity: i32, func: NativeFunction) -> Value {
    Value::Function(Rc::new(Callable::Native {
        name: name.to_string(),
        arity,
        func,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tao_macros::{assert_err, assert_ok};

    #[test]
    fn test_install() {
        let mut env = Environment::new();
        assert_ok!(install(&mut env));
        let print = assert_ok!(env.must_find(env.global(), "print", false));
        assert!(print.is_function());
        assert_eq!(print.to_string(), "[Function: print]");
        assert!(env.find(env.global(), "len", false).is_some());
    }

    #[test]
    fn test_install_twice_fails() {
        let mut env = Environment::new();
        assert_ok!(install(&mut env));
        assert_err!(install(&mut env));
    }
}
