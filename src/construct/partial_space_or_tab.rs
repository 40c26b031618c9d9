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

//! Collect a run of spaces and tabs into one token. A partial: callers
//! pick the token type, the maximum run length, and where to continue.
//! Zero codes is fine, the continuation runs either way.

use crate::chars::is_space_or_tab;
use crate::event::Name;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

/// Enter the run collector. `max` bounds how many codes may be taken;
/// pass `usize::MAX` for no bound.
pub(crate) fn space_or_tab(
    tokenizer: &mut Tokenizer,
    token: Name,
    max: usize,
    ok: StateName,
) -> State {
    tokenizer.tokenize_state.space_token = token;
    tokenizer.tokenize_state.space_max = max;
    tokenizer.tokenize_state.space_size = 0;
    tokenizer.tokenize_state.space_ok = Some(ok);
    State::Retry(StateName::SpaceOrTabStart)
}

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.space_max > 0 && is_space_or_tab(tokenizer.current) {
        tokenizer.enter(tokenizer.tokenize_state.space_token);
        State::Retry(StateName::SpaceOrTabInside)
    } else {
        done(tokenizer, false)
    }
}

pub(crate) fn inside(tokenizer: &mut Tokenizer) -> State {
    if is_space_or_tab(tokenizer.current)
        && tokenizer.tokenize_state.space_size < tokenizer.tokenize_state.space_max
    {
        tokenizer.tokenize_state.space_size += 1;
        tokenizer.consume();
        State::Next(StateName::SpaceOrTabInside)
    } else {
        done(tokenizer, true)
    }
}

fn done(tokenizer: &mut Tokenizer, entered: bool) -> State {
    if entered {
        let token = tokenizer.tokenize_state.space_token;
        tokenizer.exit(token);
    }
    let ok = tokenizer
        .tokenize_state
        .space_ok
        .take()
        .expect("expected `space_ok` to be set");
    tokenizer.tokenize_state.space_max = 0;
    tokenizer.tokenize_state.space_size = 0;
    State::Retry(ok)
}
