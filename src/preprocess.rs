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

//! Turn input text into the code sequence the state machines run over:
//! tabs are padded to 4-column stops with virtual spaces, `\r\n` is
//! folded into one code, and end of input becomes an explicit sentinel.

/// Number of columns a tab advances to.
pub(crate) const TAB_SIZE: usize = 4;

/// One unit of preprocessed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Code {
    /// A character from the input. Tabs, `\n`, lone `\r`, and NUL are
    /// kept as-is; NUL is mapped to U+FFFD only on serialization so that
    /// byte offsets stay exact.
    Char(char),
    /// A `\r\n` pair, folded to a single code two bytes wide.
    CarriageReturnLineFeed,
    /// Filler produced by tab expansion. Zero bytes wide.
    VirtualSpace,
    /// End of input.
    Eof,
}

impl Code {
    /// How many bytes of the original input this code covers.
    pub(crate) fn width(self) -> usize {
        match self {
            Code::Char(ch) => ch.len_utf8(),
            Code::CarriageReturnLineFeed => 2,
            Code::VirtualSpace | Code::Eof => 0,
        }
    }
}

/// Preprocess input text into codes.
///
/// A leading BOM is skipped.
pub(crate) fn preprocess(value: &str) -> Vec<Code> {
    let mut codes = Vec::with_capacity(value.len());
    let mut column = 1;
    let mut chars = value.chars().peekable();

    if chars.peek() == Some(&'\u{feff}') {
        chars.next();
    }

    while let Some(ch) = chars.next() {
        match ch {
            '\t' => {
                let next = (column + TAB_SIZE - 1) / TAB_SIZE * TAB_SIZE;
                codes.push(Code::Char('\t'));
                while column < next {
                    column += 1;
                    codes.push(Code::VirtualSpace);
                }
                column += 1;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    codes.push(Code::CarriageReturnLineFeed);
                } else {
                    codes.push(Code::Char('\r'));
                }
                column = 1;
            }
            '\n' => {
                codes.push(Code::Char('\n'));
                column = 1;
            }
            _ => {
                codes.push(Code::Char(ch));
                column += 1;
            }
        }
    }

    codes
}

/// Turn a range of codes back into text.
///
/// Tabs survive as-is and their virtual spaces vanish, so the result
/// matches the original input bytes. NUL becomes U+FFFD.
pub(crate) fn serialize(codes: &[Code]) -> String {
    let mut value = String::with_capacity(codes.len());

    for code in codes {
        match *code {
            Code::Char('\0') => value.push('\u{fffd}'),
            Code::Char(ch) => value.push(ch),
            Code::CarriageReturnLineFeed => value.push_str("\r\n"),
            Code::VirtualSpace => {}
            Code::Eof => unreachable!("cannot serialize eof"),
        }
    }

    value
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tab_expansion_fills_to_stop() {
        // Tab in column 1 pads to column 4.
        assert_eq!(
            preprocess("\ta"),
            vec![
                Code::Char('\t'),
                Code::VirtualSpace,
                Code::VirtualSpace,
                Code::VirtualSpace,
                Code::Char('a'),
            ]
        );
        // Tab in column 4 is already at a stop boundary.
        assert_eq!(
            preprocess("abc\td"),
            vec![
                Code::Char('a'),
                Code::Char('b'),
                Code::Char('c'),
                Code::Char('\t'),
                Code::Char('d'),
            ]
        );
    }

    #[test]
    fn crlf_is_one_code() {
        assert_eq!(
            preprocess("a\r\nb"),
            vec![
                Code::Char('a'),
                Code::CarriageReturnLineFeed,
                Code::Char('b'),
            ]
        );
        assert_eq!(
            preprocess("a\rb"),
            vec![Code::Char('a'), Code::Char('\r'), Code::Char('b')]
        );
    }

    #[test]
    fn serialize_round_trip() {
        let codes = preprocess("a\tb\r\nc");
        assert_eq!(serialize(&codes), "a\tb\r\nc");
    }

    #[test]
    fn nul_serializes_as_replacement() {
        let codes = preprocess("a\0b");
        assert_eq!(serialize(&codes), "a\u{fffd}b");
        // But the code itself keeps the one-byte width.
        assert_eq!(codes[1].width(), 1);
    }
}
