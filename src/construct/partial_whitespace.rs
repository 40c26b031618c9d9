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

//! Collect mixed whitespace inside a resource: spaces and tabs before a
//! line ending are a suffix, after one a prefix, and line endings get
//! their own tokens. A partial.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

pub(crate) fn whitespace(tokenizer: &mut Tokenizer, ok: StateName) -> State {
    tokenizer.tokenize_state.whitespace_ok = Some(ok);
    tokenizer.tokenize_state.seen = false;
    State::Retry(StateName::WhitespaceStart)
}

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending(tokenizer.current) && !is_line_ending(tokenizer.previous) {
        tokenizer.enter(Name::LineEnding);
        tokenizer.consume();
        tokenizer.exit(Name::LineEnding);
        tokenizer.tokenize_state.seen = true;
        State::Next(StateName::WhitespaceStart)
    } else if is_space_or_tab(tokenizer.current) {
        let token = if tokenizer.tokenize_state.seen {
            Name::LinePrefix
        } else {
            Name::LineSuffix
        };
        space_or_tab(tokenizer, token, usize::MAX, StateName::WhitespaceStart)
    } else {
        let ok = tokenizer
            .tokenize_state
            .whitespace_ok
            .take()
            .expect("expected `whitespace_ok` to be set");
        tokenizer.tokenize_state.seen = false;
        State::Retry(ok)
    }
}
