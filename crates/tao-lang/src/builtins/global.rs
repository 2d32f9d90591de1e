// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Global utility functions.

use crate::runtime::Value;
use crate::{Error, Result};

/// len(x) - number of characters, elements or properties
pub fn len(args: &[Value]) -> Result<Value> {
    let n = match args.first() {
        Some(Value::String(s)) => s.chars().count(),
        Some(Value::Array(elements)) => elements.borrow().len(),
        Some(Value::Object(properties)) => properties.borrow().len(),
        Some(other) => {
            return Err(Error::type_error(format!(
                "len() of unsized type {}",
                other.type_of()
            )));
        }
        None => return Err(Error::type_error("len() takes exactly one argument")),
    };
    Ok(Value::Number(n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;
    use tao_macros::{assert_err, assert_matches};

    #[test]
    fn test_len() {
        assert_eq!(len(&[Value::from("héllo")]), Ok(Value::Number(5.0)));
        assert_eq!(
            len(&[Value::array(vec![Value::Nil, Value::Nil])]),
            Ok(Value::Number(2.0))
        );
        assert_eq!(len(&[Value::object(FxHashMap::default())]), Ok(Value::Number(0.0)));
    }

    #[test]
    fn test_len_unsized() {
        let err = assert_err!(len(&[Value::Number(3.0)]));
        assert_matches!(err, Error::TypeError(ref msg) if msg.contains("number"));
    }
}
