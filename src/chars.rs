// Copyright 2024 the mdlex authors. All rights reserved.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Character classes over codes, and reference-label normalization.

use crate::preprocess::Code;

/// A space, tab, or tab-expansion filler.
pub(crate) fn is_space_or_tab(code: Code) -> bool {
    matches!(
        code,
        Code::Char(' ') | Code::Char('\t') | Code::VirtualSpace
    )
}

/// Any of the three line endings.
pub(crate) fn is_line_ending(code: Code) -> bool {
    matches!(
        code,
        Code::Char('\n') | Code::Char('\r') | Code::CarriageReturnLineFeed
    )
}

pub(crate) fn is_line_ending_or_space(code: Code) -> bool {
    is_line_ending(code) || is_space_or_tab(code)
}

/// ASCII control characters (including tab and line endings) and DEL.
pub(crate) fn is_ascii_control(code: Code) -> bool {
    match code {
        Code::Char(ch) => ch.is_ascii_control(),
        Code::CarriageReturnLineFeed => true,
        Code::VirtualSpace | Code::Eof => false,
    }
}

pub(crate) fn is_ascii_alpha(code: Code) -> bool {
    matches!(code, Code::Char(ch) if ch.is_ascii_alphabetic())
}

pub(crate) fn is_ascii_alphanumeric(code: Code) -> bool {
    matches!(code, Code::Char(ch) if ch.is_ascii_alphanumeric())
}

/// ASCII punctuation, the set escapable by a backslash.
pub(crate) fn is_ascii_punctuation(code: Code) -> bool {
    matches!(code, Code::Char(ch) if ch.is_ascii_punctuation())
}

/// Normalize a reference label: collapse runs of markdown whitespace to
/// a single space and trim the ends. Case folding is left to `UniCase`
/// at the lookup site.
pub(crate) fn normalize_identifier(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut in_whitespace = false;

    for ch in value.chars() {
        if matches!(ch, '\t' | '\n' | '\r' | ' ') {
            in_whitespace = true;
        } else {
            if in_whitespace && !result.is_empty() {
                result.push(' ');
            }
            in_whitespace = false;
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_identifier("  a \t\n b  "), "a b");
        assert_eq!(normalize_identifier("a"), "a");
        assert_eq!(normalize_identifier("   "), "");
    }

    #[test]
    fn space_classes() {
        assert!(is_space_or_tab(Code::VirtualSpace));
        assert!(is_space_or_tab(Code::Char('\t')));
        assert!(!is_space_or_tab(Code::Char('\n')));
        assert!(is_line_ending(Code::CarriageReturnLineFeed));
        assert!(!is_line_ending(Code::Eof));
    }
}
