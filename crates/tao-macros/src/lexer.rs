// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexer specific macros.

/// Attach a keyword lookup table to an existing token enum.
///
/// Generates `keyword(word)`, mapping a source word to the matching unit
/// variant, and `keywords()`, listing every reserved word.
///
/// # Example
///
/// ```
/// use tao_macros::keywords;
///
/// #[derive(Debug, PartialEq)]
/// enum Kind {
///     Let,
///     For,
///     Ident(String),
/// }
///
/// keywords! {
///     Kind {
///         "let" => Let,
///         "for" => For,
///     }
/// }
///
/// assert_eq!(Kind::keyword("let"), Some(Kind::Let));
/// assert_eq!(Kind::keyword("loop"), None);
/// assert_eq!(Kind::keywords(), &["let", "for"]);
/// ```
#[macro_export]
macro_rules! keywords {
    (
        $name:ident {
            $($keyword:literal => $variant:ident),+ $(,)?
        }
    ) => {
        impl $name {
            /// Returns the keyword token spelled by `word`, if any.
            pub fn keyword(word: &str) -> Option<Self> {
                match word {
                    $($keyword => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns every reserved word.
            pub fn keywords() -> &'static [&'static str] {
                &[$($keyword),+]
            }
        }
    };
}
