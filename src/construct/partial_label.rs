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

//! A full reference label in `[…]`: at most 999 codes, at least one of
//! them not whitespace, no unescaped nested brackets. A partial of the
//! label end.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

/// Largest allowed label, in codes.
const LABEL_MAX: usize = 999;

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('['));
    tokenizer.tokenize_state.size = 0;
    tokenizer.tokenize_state.seen = false;
    tokenizer.enter(Name::Reference);
    tokenizer.enter(Name::ReferenceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ReferenceMarker);
    tokenizer.enter(Name::ReferenceString);
    State::Next(StateName::LabelAtBreak)
}

pub(crate) fn at_break(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.size > LABEL_MAX
        || tokenizer.current == Code::Eof
        || tokenizer.current == Code::Char('[')
        || (tokenizer.current == Code::Char(']') && !tokenizer.tokenize_state.seen)
    {
        reset(tokenizer);
        return State::Retry(StateName::LabelEndReferenceFullMissing);
    }
    match tokenizer.current {
        Code::Char(']') => {
            reset(tokenizer);
            tokenizer.exit(Name::ReferenceString);
            tokenizer.enter(Name::ReferenceMarker);
            tokenizer.consume();
            tokenizer.exit(Name::ReferenceMarker);
            tokenizer.exit(Name::Reference);
            State::Next(StateName::LabelEndReferenceFullAfter)
        }
        code if is_line_ending(code) => {
            if is_line_ending(tokenizer.previous) {
                // Blank line.
                reset(tokenizer);
                return State::Retry(StateName::LabelEndReferenceFullMissing);
            }
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::LabelAtBreak)
        }
        _ => {
            tokenizer.enter(Name::Data);
            State::Retry(StateName::LabelInside)
        }
    }
}

pub(crate) fn inside(tokenizer: &mut Tokenizer) -> State {
    let code = tokenizer.current;
    if tokenizer.tokenize_state.size > LABEL_MAX
        || matches!(code, Code::Eof | Code::Char('[') | Code::Char(']'))
        || is_line_ending(code)
    {
        tokenizer.exit(Name::Data);
        return State::Retry(StateName::LabelAtBreak);
    }
    if !tokenizer.tokenize_state.seen && !is_space_or_tab(code) {
        tokenizer.tokenize_state.seen = true;
    }
    tokenizer.tokenize_state.size += 1;
    tokenizer.consume();
    if code == Code::Char('\\') {
        State::Next(StateName::LabelEscape)
    } else {
        State::Next(StateName::LabelInside)
    }
}

pub(crate) fn escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('[') | Code::Char('\\') | Code::Char(']') => {
            tokenizer.tokenize_state.size += 1;
            tokenizer.consume();
            State::Next(StateName::LabelInside)
        }
        _ => State::Retry(StateName::LabelInside),
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.size = 0;
    tokenizer.tokenize_state.seen = false;
}
