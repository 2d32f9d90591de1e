// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Tao runtime types and the scope chain.

pub mod context;
pub mod environment;
pub mod function;
pub mod value;

pub use context::{Context, ContextId};
pub use environment::Environment;
pub use function::{Callable, Closure, NativeFunction};
pub use value::Value;
