// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scope chain: an arena of [`Context`] frames.
//!
//! Frames refer to their parent by [`ContextId`], never by ownership. The
//! interpreter pushes a frame per call, block, loop iteration and switch
//! group, and pops it when the construct finishes.
//!
//! # Reclaiming
//!
//! A popped frame stays in the arena until it is the newest frame. Frames
//! captured by a closure are never reclaimed, which also keeps every frame
//! below them (their ancestors included) alive for the life of the
//! environment.
//!
//! ```text
//! index:  0        1        2        3
//!         global   call     block    iteration   <- newest
//!           ^--------'        |          |
//!                    ^--------'          |
//!                             ^----------'
//! ```

use tracing::trace;

use super::context::{Context, ContextId};
use super::value::Value;
use crate::{Error, Result};

/// Owner of every scope frame.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Context>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Context::new("global", None)],
        }
    }

    /// Returns the global frame.
    pub fn global(&self) -> ContextId {
        ContextId::GLOBAL
    }

    /// Number of frames currently held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: the global frame is never removed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the frame behind `id`.
    pub fn context(&self, id: ContextId) -> &Context {
        &self.frames[id.index()]
    }

    fn context_mut(&mut self, id: ContextId) -> &mut Context {
        &mut self.frames[id.index()]
    }

    /// Returns the parent of `id`.
    pub fn parent(&self, id: ContextId) -> Option<ContextId> {
        self.context(id).parent
    }

    /// Creates a child frame of `parent`.
    pub fn push(&mut self, label: &'static str, parent: ContextId) -> ContextId {
        let id = ContextId::new(self.frames.len());
        self.frames.push(Context::new(label, Some(parent)));
        trace!(id = id.index(), parent = parent.index(), label, "push context");
        id
    }

    /// Marks `id` finished and reclaims finished frames from the top.
    pub fn pop(&mut self, id: ContextId) {
        if id == ContextId::GLOBAL {
            return;
        }
        self.context_mut(id).closed = true;

        while self.frames.len() > 1 {
            match self.frames.last() {
                Some(top) if top.closed && !top.captured => {
                    self.frames.pop();
                }
                _ => break,
            }
        }
        trace!(id = id.index(), live = self.frames.len(), "pop context");
    }

    /// Keeps `id` alive for closures defined in it.
    pub fn capture(&mut self, id: ContextId) {
        self.context_mut(id).captured = true;
    }

    /// Looks `name` up locally, then through the parents if `outer` is set.
    pub fn find(&self, id: ContextId, name: &str, outer: bool) -> Option<&Value> {
        let mut current = Some(id);
        while let Some(frame_id) = current {
            let frame = self.context(frame_id);
            if let Some(value) = frame.symbols.get(name) {
                return Some(value);
            }
            if !outer {
                break;
            }
            current = frame.parent;
        }
        None
    }

    /// Like [`find`](Self::find), but a missing name is an error.
    pub fn must_find(&self, id: ContextId, name: &str, outer: bool) -> Result<&Value> {
        self.find(id, name, outer)
            .ok_or_else(|| Error::syntax(format!("name `{}' not found", name)))
    }

    /// Declares `name` in `id`. Shadowing a parent binding is allowed,
    /// redeclaring a local one is not.
    pub fn add(&mut self, id: ContextId, name: impl Into<String>, value: Value) -> Result<()> {
        let name = name.into();
        let frame = self.context_mut(id);
        if frame.contains(&name) {
            return Err(Error::syntax(format!(
                "name `{}' is already defined in this scope",
                name
            )));
        }
        frame.symbols.insert(name, value);
        Ok(())
    }

    /// Updates the nearest binding of `name`, searching outward from `id`.
    pub fn set(&mut self, id: ContextId, name: &str, value: Value) -> Result<()> {
        *self.address_of(id, name)? = value;
        Ok(())
    }

    /// Returns the storage of the nearest binding of `name`.
    pub fn address_of(&mut self, id: ContextId, name: &str) -> Result<&mut Value> {
        let owner = self
            .resolve(id, name)
            .ok_or_else(|| Error::syntax(format!("name `{}' is not defined", name)))?;
        self.context_mut(owner)
            .symbols
            .get_mut(name)
            .ok_or_else(|| Error::syntax(format!("name `{}' is not defined", name)))
    }

    /// Finds the frame declaring `name`.
    fn resolve(&self, id: ContextId, name: &str) -> Option<ContextId> {
        let mut current = Some(id);
        while let Some(frame_id) = current {
            let frame = self.context(frame_id);
            if frame.contains(name) {
                return Some(frame_id);
            }
            current = frame.parent;
        }
        None
    }

    /// Records a return from the frame `id`.
    pub fn set_return(&mut self, id: ContextId, value: Value) {
        self.context_mut(id).retval = Some(value);
    }

    /// Records a break from the frame `id`.
    pub fn set_break(&mut self, id: ContextId) {
        self.context_mut(id).broke = true;
    }

    /// Clears and returns the return value of `id`.
    pub fn take_return(&mut self, id: ContextId) -> Option<Value> {
        self.context_mut(id).retval.take()
    }

    /// Clears the break flag of `id`, returning whether it was set.
    pub fn take_break(&mut self, id: ContextId) -> bool {
        std::mem::take(&mut self.context_mut(id).broke)
    }

    /// True if `id` has a pending break or return.
    pub fn has_signal(&self, id: ContextId) -> bool {
        let frame = self.context(id);
        frame.broke || frame.retval.is_some()
    }

    /// Moves pending signals from `from` to `to`.
    pub fn propagate(&mut self, from: ContextId, to: ContextId) {
        let broke = self.take_break(from);
        let retval = self.take_return(from);
        let target = self.context_mut(to);
        target.broke |= broke;
        if retval.is_some() {
            target.retval = retval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tao_macros::{assert_err, assert_ok};

    fn message(err: Error) -> String {
        err.as_syntax().expect("syntax error").message.clone()
    }

    #[test]
    fn test_add_and_find_local() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "x", Value::Number(1.0)));
        assert_eq!(env.find(global, "x", false), Some(&Value::Number(1.0)));
        assert_eq!(env.find(global, "y", true), None);
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "x", Value::Nil));
        let err = assert_err!(env.add(global, "x", Value::Nil));
        assert_eq!(message(err), "name `x' is already defined in this scope");
    }

    #[test]
    fn test_shadowing_allowed() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "x", Value::Number(1.0)));
        let child = env.push("block", global);
        assert_ok!(env.add(child, "x", Value::Number(2.0)));
        assert_eq!(env.find(child, "x", true), Some(&Value::Number(2.0)));
        assert_eq!(env.find(global, "x", true), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_outward_lookup() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "x", Value::Boolean(true)));
        let child = env.push("block", global);
        let grandchild = env.push("block", child);
        assert_eq!(env.find(grandchild, "x", true), Some(&Value::Boolean(true)));
        assert_eq!(env.find(grandchild, "x", false), None);
    }

    #[test]
    fn test_must_find() {
        let env = Environment::new();
        let err = assert_err!(env.must_find(env.global(), "nope", true));
        assert_eq!(message(err), "name `nope' not found");
    }

    #[test]
    fn test_set_mutates_declaring_frame() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "x", Value::Number(1.0)));
        let child = env.push("block", global);
        assert_ok!(env.set(child, "x", Value::Number(5.0)));
        assert!(!env.context(child).contains("x"));
        assert_eq!(env.find(global, "x", false), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_set_undeclared_fails() {
        let mut env = Environment::new();
        let child = env.push("block", ContextId::GLOBAL);
        let err = assert_err!(env.set(child, "x", Value::Nil));
        assert_eq!(message(err), "name `x' is not defined");
        assert!(env.find(child, "x", true).is_none());
    }

    #[test]
    fn test_address_of() {
        let mut env = Environment::new();
        let global = env.global();
        assert_ok!(env.add(global, "n", Value::Number(1.0)));
        let child = env.push("call", global);
        if let Value::Number(n) = assert_ok!(env.address_of(child, "n")) {
            *n += 1.0;
        }
        assert_eq!(env.find(global, "n", false), Some(&Value::Number(2.0)));
        assert!(env.address_of(child, "missing").is_err());
    }

    #[test]
    fn test_signals() {
        let mut env = Environment::new();
        let global = env.global();
        let child = env.push("block", global);
        assert!(!env.has_signal(child));

        env.set_break(child);
        assert!(env.has_signal(child));
        env.propagate(child, global);
        assert!(!env.has_signal(child));
        assert!(env.take_break(global));
        assert!(!env.take_break(global));

        env.set_return(child, Value::Number(7.0));
        env.propagate(child, global);
        assert_eq!(env.take_return(global), Some(Value::Number(7.0)));
        assert!(!env.has_signal(global));
    }

    #[test]
    fn test_pop_reclaims_newest() {
        let mut env = Environment::new();
        let a = env.push("block", ContextId::GLOBAL);
        let b = env.push("block", a);
        assert_eq!(env.len(), 3);
        env.pop(b);
        env.pop(a);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_pop_out_of_order_waits() {
        let mut env = Environment::new();
        let a = env.push("block", ContextId::GLOBAL);
        let b = env.push("block", a);
        env.pop(a);
        assert_eq!(env.len(), 3);
        env.pop(b);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_captured_frame_survives() {
        let mut env = Environment::new();
        let call = env.push("call", ContextId::GLOBAL);
        assert_ok!(env.add(call, "count", Value::Number(0.0)));
        env.capture(call);
        env.pop(call);
        assert_eq!(env.len(), 2);
        assert_eq!(env.find(call, "count", false), Some(&Value::Number(0.0)));

        // later frames above it are still reclaimed
        let block = env.push("block", ContextId::GLOBAL);
        env.pop(block);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_global_never_popped() {
        let mut env = Environment::new();
        env.pop(ContextId::GLOBAL);
        assert_eq!(env.len(), 1);
        assert_eq!(env.context(ContextId::GLOBAL).label(), "global");
    }
}
