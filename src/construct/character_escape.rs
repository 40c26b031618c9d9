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

//! A backslash escape of an ASCII punctuation character.
//!
//! ```markdown
//! a\*b
//! ```

use crate::chars::is_ascii_punctuation;
use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static CHARACTER_ESCAPE: Construct = Construct {
    name: "characterEscape",
    start: StateName::CharacterEscapeStart,
    ..Construct::DEFAULT
};

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('\\'));
    tokenizer.enter(Name::CharacterEscape);
    tokenizer.enter(Name::CharacterEscapeMarker);
    tokenizer.consume();
    tokenizer.exit(Name::CharacterEscapeMarker);
    State::Next(StateName::CharacterEscapeInside)
}

pub(crate) fn inside(tokenizer: &mut Tokenizer) -> State {
    if is_ascii_punctuation(tokenizer.current) {
        tokenizer.enter(Name::CharacterEscapeValue);
        tokenizer.consume();
        tokenizer.exit(Name::CharacterEscapeValue);
        tokenizer.exit(Name::CharacterEscape);
        State::Ok
    } else {
        State::Nok
    }
}
