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

//! A line ending token followed by a line-prefix token for any
//! indentation of the next line.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static LINE_ENDING: Construct = Construct {
    name: "lineEnding",
    start: StateName::LineEndingStart,
    ..Construct::DEFAULT
};

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert!(is_line_ending(tokenizer.current));
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::LineEndingAfter)
}

pub(crate) fn after(tokenizer: &mut Tokenizer) -> State {
    if is_space_or_tab(tokenizer.current) {
        space_or_tab(
            tokenizer,
            Name::LinePrefix,
            usize::MAX,
            StateName::LineEndingOk,
        )
    } else {
        State::Ok
    }
}

pub(crate) fn ok(_tokenizer: &mut Tokenizer) -> State {
    State::Ok
}
