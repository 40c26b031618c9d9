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

//! A resource destination: either `<enclosed>` or raw, with balanced
//! parentheses up to a fixed depth. A partial of the resource.

use crate::chars::{is_ascii_control, is_line_ending, is_line_ending_or_space};
use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

/// How deep unescaped parentheses may nest in a raw destination.
const BALANCE_MAX: usize = 32;

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('<') => {
            tokenizer.enter(Name::ResourceDestination);
            tokenizer.enter(Name::ResourceDestinationLiteral);
            tokenizer.enter(Name::ResourceDestinationLiteralMarker);
            tokenizer.consume();
            tokenizer.exit(Name::ResourceDestinationLiteralMarker);
            State::Next(StateName::DestinationEnclosedBefore)
        }
        Code::Eof | Code::Char(')') => State::Retry(StateName::LabelEndResourceDestinationMissing),
        code if is_ascii_control(code) => {
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        _ => {
            tokenizer.tokenize_state.size = 0;
            tokenizer.enter(Name::ResourceDestination);
            tokenizer.enter(Name::ResourceDestinationRaw);
            tokenizer.enter(Name::ResourceDestinationString);
            State::Retry(StateName::DestinationRaw)
        }
    }
}

pub(crate) fn enclosed_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.enter(Name::ResourceDestinationLiteralMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ResourceDestinationLiteralMarker);
        tokenizer.exit(Name::ResourceDestinationLiteral);
        tokenizer.exit(Name::ResourceDestination);
        State::Next(StateName::LabelEndResourceDestinationAfter)
    } else {
        tokenizer.enter(Name::ResourceDestinationString);
        State::Retry(StateName::DestinationEnclosed)
    }
}

pub(crate) fn enclosed(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => {
            tokenizer.exit(Name::ResourceDestinationString);
            State::Retry(StateName::DestinationEnclosedBefore)
        }
        Code::Eof | Code::Char('<') => {
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        code if is_line_ending(code) => {
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosedEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosed)
        }
    }
}

pub(crate) fn enclosed_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('<') | Code::Char('>') | Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosed)
        }
        _ => State::Retry(StateName::DestinationEnclosed),
    }
}

pub(crate) fn raw(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.size == 0
        && (tokenizer.current == Code::Eof
            || tokenizer.current == Code::Char(')')
            || is_line_ending_or_space(tokenizer.current))
    {
        tokenizer.tokenize_state.size = 0;
        tokenizer.exit(Name::ResourceDestinationString);
        tokenizer.exit(Name::ResourceDestinationRaw);
        tokenizer.exit(Name::ResourceDestination);
        return State::Retry(StateName::LabelEndResourceDestinationAfter);
    }
    match tokenizer.current {
        // At the depth limit, `(` is no longer special.
        Code::Char('(') if tokenizer.tokenize_state.size < BALANCE_MAX => {
            tokenizer.tokenize_state.size += 1;
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
        Code::Char(')') => {
            tokenizer.tokenize_state.size -= 1;
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
        Code::Eof => {
            tokenizer.tokenize_state.size = 0;
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        code if is_line_ending_or_space(code) => {
            tokenizer.tokenize_state.size = 0;
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        code if is_ascii_control(code) => {
            tokenizer.tokenize_state.size = 0;
            State::Retry(StateName::LabelEndResourceDestinationMissing)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationRawEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
    }
}

pub(crate) fn raw_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('(') | Code::Char(')') | Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
        _ => State::Retry(StateName::DestinationRaw),
    }
}
