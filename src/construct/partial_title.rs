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

//! A resource title in `"…"`, `'…'`, or `(…)`. May span lines, but a
//! blank line ends it. A partial of the resource.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('"') | Code::Char('\'') | Code::Char('(') => {
            tokenizer.tokenize_state.marker = if tokenizer.current == Code::Char('(') {
                Code::Char(')')
            } else {
                tokenizer.current
            };
            tokenizer.enter(Name::ResourceTitle);
            tokenizer.enter(Name::ResourceTitleMarker);
            tokenizer.consume();
            tokenizer.exit(Name::ResourceTitleMarker);
            State::Next(StateName::TitleBegin)
        }
        _ => State::Nok,
    }
}

pub(crate) fn begin(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == tokenizer.tokenize_state.marker {
        tokenizer.tokenize_state.marker = Code::Eof;
        tokenizer.enter(Name::ResourceTitleMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ResourceTitleMarker);
        tokenizer.exit(Name::ResourceTitle);
        State::Next(StateName::LabelEndResourceTitleAfter)
    } else {
        tokenizer.enter(Name::ResourceTitleString);
        State::Retry(StateName::TitleAtBreak)
    }
}

pub(crate) fn at_break(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.tokenize_state.marker = Code::Eof;
            State::Nok
        }
        code if code == tokenizer.tokenize_state.marker => {
            tokenizer.exit(Name::ResourceTitleString);
            State::Retry(StateName::TitleBegin)
        }
        code if is_line_ending(code) => {
            if is_line_ending(tokenizer.previous) {
                // Blank line.
                tokenizer.tokenize_state.marker = Code::Eof;
                return State::Nok;
            }
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::TitleAfterEol)
        }
        _ => {
            tokenizer.enter(Name::Data);
            State::Retry(StateName::TitleInside)
        }
    }
}

pub(crate) fn after_eol(tokenizer: &mut Tokenizer) -> State {
    if is_space_or_tab(tokenizer.current) {
        space_or_tab(
            tokenizer,
            Name::LinePrefix,
            usize::MAX,
            StateName::TitleAtBreak,
        )
    } else {
        State::Retry(StateName::TitleAtBreak)
    }
}

pub(crate) fn inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::TitleAtBreak)
        }
        code if code == tokenizer.tokenize_state.marker || is_line_ending(code) => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::TitleAtBreak)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::TitleEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::TitleInside)
        }
    }
}

pub(crate) fn escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('"') | Code::Char('\'') | Code::Char(')') | Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::TitleInside)
        }
        _ => State::Retry(StateName::TitleInside),
    }
}
