// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Output functions.

use crate::Result;
use crate::runtime::Value;

/// print(...) - writes the arguments, space-separated, to stdout
pub fn print(args: &[Value]) -> Result<Value> {
    println!("{}", join(args));
    Ok(Value::Nil)
}

fn join(args: &[Value]) -> String {
    let output: Vec<String> = args.iter().map(|v| format!("{}", v)).collect();
    output.join(" ")
}
