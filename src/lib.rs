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

//! A backtracking state-machine tokenizer for markdown text, producing
//! a flat stream of enter/exit events over the original input.
//!
//! Constructs (fenced code, code spans, inline HTML, links and images)
//! are tried speculatively: a failed attempt rolls the tokenizer back
//! and the text is swept into data instead. Links and images resolve
//! lazily, when a `]` finds its opener, so bracket pairs never need
//! lookahead.
//!
//! ```rust
//! use mdlex::{Kind, Lexer, Name};
//!
//! let lexer = Lexer::new("a `b` c");
//! let events = lexer.tokenize();
//! let code = events
//!     .iter()
//!     .find(|event| event.kind == Kind::Enter && event.name == Name::CodeText)
//!     .unwrap();
//! assert_eq!(code.point.offset, 2);
//! ```
//!
//! Reference links need the defined labels up front:
//!
//! ```rust
//! use mdlex::{Lexer, Name};
//!
//! let mut lexer = Lexer::new("[a]");
//! lexer.define("A");
//! let events = lexer.tokenize();
//! assert!(events.iter().any(|event| event.name == Name::Link));
//! ```

#![forbid(unsafe_code)]

mod chars;
mod construct;
mod event;
mod parse;
mod preprocess;
mod state;
mod tokenizer;

pub use crate::event::{Event, EventFlags, Kind, Name, Point};
pub use crate::parse::Lexer;

bitflags::bitflags! {
    /// Option struct containing flags for enabling construct families.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Options: u32 {
        const ENABLE_CHARACTER_ESCAPE = 1 << 1;
        const ENABLE_CODE_FENCED = 1 << 2;
        const ENABLE_CODE_TEXT = 1 << 3;
        const ENABLE_HTML_TEXT = 1 << 4;
        /// Links and images, both the `[`/`![` openers and the `]`
        /// resolution.
        const ENABLE_LABEL = 1 << 5;
    }
}
