// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! A single scope frame and the handle used to address it.

use rustc_hash::FxHashMap;

use super::value::Value;

/// A reference to a frame in the [`Environment`](super::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId {
    index: usize,
}

impl ContextId {
    /// The global frame, always present.
    pub const GLOBAL: ContextId = ContextId { index: 0 };

    pub(super) fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the index of this reference.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One scope frame: local bindings plus the break and return signals.
#[derive(Debug)]
pub struct Context {
    /// Who created the frame ("global", "block", "call", ...)
    pub(super) label: &'static str,
    /// Lexically enclosing frame, not owned
    pub(super) parent: Option<ContextId>,
    pub(super) symbols: FxHashMap<String, Value>,
    /// A break statement has executed
    pub(super) broke: bool,
    /// A return statement has executed
    pub(super) retval: Option<Value>,
    /// Popped by its creator
    pub(super) closed: bool,
    /// Referenced by a closure
    pub(super) captured: bool,
}

impl Context {
    pub(super) fn new(label: &'static str, parent: Option<ContextId>) -> Self {
        Self {
            label,
            parent,
            symbols: FxHashMap::default(),
            broke: false,
            retval: None,
            closed: false,
            captured: false,
        }
    }

    /// Returns the diagnostic label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the parent frame.
    pub fn parent(&self) -> Option<ContextId> {
        self.parent
    }

    /// Returns true if a local binding named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of local bindings.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the frame has no bindings.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
