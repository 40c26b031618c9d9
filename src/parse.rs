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

//! The public entry point: configure a [`Lexer`], tokenize, get events.

use std::collections::HashSet;

use unicase::UniCase;

use crate::chars::normalize_identifier;
use crate::construct::code_fenced::CODE_FENCED;
use crate::event::Event;
use crate::preprocess::preprocess;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::Options;

/// A tokenizer over a borrowed string.
///
/// Reference resolution needs to know which labels are defined and
/// which lines are lazy continuation lines; both are facts about the
/// surrounding document, so the caller supplies them up front through
/// [`define`](Self::define) and [`set_lazy`](Self::set_lazy).
pub struct Lexer<'input> {
    text: &'input str,
    options: Options,
    defined: HashSet<UniCase<String>>,
    lazy: HashSet<usize>,
}

impl<'input> Lexer<'input> {
    /// A lexer with all constructs enabled.
    pub fn new(text: &'input str) -> Self {
        Self::new_ext(text, Options::all())
    }

    pub fn new_ext(text: &'input str, options: Options) -> Self {
        Lexer {
            text,
            options,
            defined: HashSet::new(),
            lazy: HashSet::new(),
        }
    }

    /// Register a defined reference label. The label is matched
    /// case-insensitively, with runs of whitespace collapsed.
    pub fn define(&mut self, label: &str) {
        self.defined
            .insert(UniCase::new(normalize_identifier(label)));
    }

    /// Mark a line (1-based) as a lazy continuation line: it belongs to
    /// an enclosing container, so it cannot continue or close a fenced
    /// code block.
    pub fn set_lazy(&mut self, line: usize) {
        self.lazy.insert(line);
    }

    /// Tokenize the input into a flat event stream.
    pub fn tokenize(&self) -> Vec<Event> {
        let codes = preprocess(self.text);
        let mut tokenizer = Tokenizer::new(&codes, self);
        let state = tokenizer.run(State::Next(StateName::TextStart));
        debug_assert_eq!(state, State::Ok, "expected the driver to accept");
        tokenizer.flush()
    }

    /// Whether this input would interrupt surrounding content, because
    /// it starts with an opening code fence. An opening fence line alone
    /// is enough; no content or closing fence is required.
    pub fn interrupts(&self) -> bool {
        let codes = preprocess(self.text);
        let mut tokenizer = Tokenizer::new(&codes, self);
        tokenizer.interrupt = true;
        tokenizer.run_check(&CODE_FENCED)
    }

    /// The input text of a token, given its enter and exit events.
    pub fn slice(&self, enter: &Event, exit: &Event) -> &'input str {
        &self.text[enter.point.offset..exit.point.offset]
    }

    pub(crate) fn options(&self) -> Options {
        self.options
    }

    pub(crate) fn is_defined_normalized(&self, label: &str) -> bool {
        self.defined.contains(&UniCase::new(label.to_string()))
    }

    pub(crate) fn is_lazy(&self, line: usize) -> bool {
        self.lazy.contains(&line)
    }

    /// Bytes taken by a leading byte order mark, which preprocessing
    /// skips but which still offsets every token.
    pub(crate) fn bom_len(&self) -> usize {
        if self.text.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        }
    }
}
