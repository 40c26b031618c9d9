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

//! Fenced code blocks.
//!
//! ```markdown
//! ~~~js
//! console.log(1)
//! ~~~
//! ```
//!
//! Once three or more markers are consumed, the fence is concrete: if it
//! still fails, the driver must not reinterpret the markers as a code
//! span opener. A closing fence must use the same marker and be at least
//! as long as the opening one; a shorter run is content. A fence whose
//! content is only whitespace does not match at all, except when
//! interrupting, where the opening fence line alone is enough.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::construct::partial_non_lazy_continuation::NON_LAZY_CONTINUATION;
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::{Kind, Name};
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static CODE_FENCED: Construct = Construct {
    name: "codeFenced",
    start: StateName::CodeFencedStart,
    previous: Some(at_line_start),
    concrete: true,
    ..Construct::DEFAULT
};

static CLOSE: Construct = Construct {
    start: StateName::CodeFencedCloseStart,
    ..Construct::DEFAULT
};

/// Fences only start at the beginning of a line.
fn at_line_start(tokenizer: &Tokenizer) -> bool {
    match tokenizer.events.last() {
        None => true,
        Some(event) => {
            event.kind == Kind::Exit
                && matches!(event.name, Name::LineEnding | Name::LinePrefix)
        }
    }
}

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    if !matches!(tokenizer.current, Code::Char('`') | Code::Char('~')) {
        return State::Nok;
    }
    // Indentation of the fence bounds the indentation stripped from
    // content lines.
    let mut prefix = 0;
    if let [.., enter, exit] = tokenizer.events.as_slice() {
        if exit.name == Name::LinePrefix {
            prefix = exit.point.index - enter.point.index;
        }
    }
    tokenizer.tokenize_state.marker = tokenizer.current;
    tokenizer.tokenize_state.prefix = prefix;
    tokenizer.tokenize_state.size_other = 0;
    tokenizer.enter(Name::CodeFenced);
    tokenizer.enter(Name::CodeFencedFence);
    tokenizer.enter(Name::CodeFencedFenceSequence);
    State::Retry(StateName::CodeFencedSequenceOpen)
}

pub(crate) fn sequence_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == tokenizer.tokenize_state.marker {
        tokenizer.tokenize_state.size_other += 1;
        tokenizer.consume();
        State::Next(StateName::CodeFencedSequenceOpen)
    } else if tokenizer.tokenize_state.size_other < 3 {
        State::Nok
    } else {
        tokenizer.concrete_start();
        tokenizer.exit(Name::CodeFencedFenceSequence);
        if is_space_or_tab(tokenizer.current) {
            space_or_tab(
                tokenizer,
                Name::Whitespace,
                usize::MAX,
                StateName::CodeFencedInfoBefore,
            )
        } else {
            State::Retry(StateName::CodeFencedInfoBefore)
        }
    }
}

pub(crate) fn info_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.exit(Name::CodeFencedFence);
        if tokenizer.interrupt {
            // The opening fence alone interrupts.
            State::Ok
        } else {
            tokenizer.check(
                &NON_LAZY_CONTINUATION,
                State::Next(StateName::CodeFencedAtNonLazyBreak),
                State::Next(StateName::CodeFencedAfter),
            )
        }
    } else {
        tokenizer.enter(Name::CodeFencedFenceInfo);
        State::Retry(StateName::CodeFencedInfo)
    }
}

pub(crate) fn info(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.exit(Name::CodeFencedFenceInfo);
        State::Retry(StateName::CodeFencedInfoBefore)
    } else if is_space_or_tab(tokenizer.current) {
        tokenizer.exit(Name::CodeFencedFenceInfo);
        space_or_tab(
            tokenizer,
            Name::Whitespace,
            usize::MAX,
            StateName::CodeFencedMetaBefore,
        )
    } else if tokenizer.current == Code::Char('`')
        && tokenizer.tokenize_state.marker == Code::Char('`')
    {
        // Backticks in the info of a backtick fence are forbidden.
        State::Nok
    } else {
        tokenizer.consume();
        State::Next(StateName::CodeFencedInfo)
    }
}

pub(crate) fn meta_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        State::Retry(StateName::CodeFencedInfoBefore)
    } else {
        tokenizer.enter(Name::CodeFencedFenceMeta);
        State::Retry(StateName::CodeFencedMeta)
    }
}

pub(crate) fn meta(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.exit(Name::CodeFencedFenceMeta);
        State::Retry(StateName::CodeFencedInfoBefore)
    } else if tokenizer.current == Code::Char('`')
        && tokenizer.tokenize_state.marker == Code::Char('`')
    {
        State::Nok
    } else {
        tokenizer.consume();
        State::Next(StateName::CodeFencedMeta)
    }
}

pub(crate) fn at_non_lazy_break(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        &CLOSE,
        State::Next(StateName::CodeFencedAfter),
        State::Next(StateName::CodeFencedContentBefore),
    )
}

pub(crate) fn close_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::CodeFencedCloseBefore)
}

pub(crate) fn close_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::CodeFencedFence);
    tokenizer.tokenize_state.size = 0;
    if is_space_or_tab(tokenizer.current) {
        // A closing fence may be indented up to three columns, no matter
        // how deep the opening fence sat.
        space_or_tab(
            tokenizer,
            Name::LinePrefix,
            3,
            StateName::CodeFencedBeforeSequenceClose,
        )
    } else {
        State::Retry(StateName::CodeFencedBeforeSequenceClose)
    }
}

pub(crate) fn before_sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == tokenizer.tokenize_state.marker {
        tokenizer.enter(Name::CodeFencedFenceSequence);
        State::Retry(StateName::CodeFencedSequenceClose)
    } else {
        State::Nok
    }
}

pub(crate) fn sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == tokenizer.tokenize_state.marker {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::CodeFencedSequenceClose)
    } else if tokenizer.tokenize_state.size >= tokenizer.tokenize_state.size_other {
        tokenizer.exit(Name::CodeFencedFenceSequence);
        if is_space_or_tab(tokenizer.current) {
            space_or_tab(
                tokenizer,
                Name::Whitespace,
                usize::MAX,
                StateName::CodeFencedSequenceCloseAfter,
            )
        } else {
            State::Retry(StateName::CodeFencedSequenceCloseAfter)
        }
    } else {
        // Shorter than the opening sequence: content.
        State::Nok
    }
}

pub(crate) fn sequence_close_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.exit(Name::CodeFencedFence);
        State::Ok
    } else {
        State::Nok
    }
}

pub(crate) fn content_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::CodeFencedContentStart)
}

pub(crate) fn content_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.prefix > 0 && is_space_or_tab(tokenizer.current) {
        let max = tokenizer.tokenize_state.prefix;
        space_or_tab(
            tokenizer,
            Name::LinePrefix,
            max,
            StateName::CodeFencedBeforeContentChunk,
        )
    } else {
        State::Retry(StateName::CodeFencedBeforeContentChunk)
    }
}

pub(crate) fn before_content_chunk(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.check(
            &NON_LAZY_CONTINUATION,
            State::Next(StateName::CodeFencedAtNonLazyBreak),
            State::Next(StateName::CodeFencedAfter),
        )
    } else {
        tokenizer.enter(Name::CodeFlowValue);
        State::Retry(StateName::CodeFencedContentChunk)
    }
}

pub(crate) fn content_chunk(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof || is_line_ending(tokenizer.current) {
        tokenizer.exit(Name::CodeFlowValue);
        State::Retry(StateName::CodeFencedBeforeContentChunk)
    } else {
        tokenizer.consume();
        State::Next(StateName::CodeFencedContentChunk)
    }
}

pub(crate) fn after(tokenizer: &mut Tokenizer) -> State {
    if !has_content(tokenizer) {
        return State::Nok;
    }
    tokenizer.exit(Name::CodeFenced);
    State::Ok
}

/// Whether any content line of the fence being closed holds something
/// other than whitespace. Scans back to the fence's own enter; earlier
/// fences are closed and cannot be reached before it.
fn has_content(tokenizer: &Tokenizer) -> bool {
    let events = &tokenizer.events;
    let mut index = events.len();
    let mut exit_point = None;
    while index > 0 {
        index -= 1;
        let event = &events[index];
        if event.kind == Kind::Enter && event.name == Name::CodeFenced {
            break;
        }
        if event.name == Name::CodeFlowValue {
            match event.kind {
                Kind::Exit => exit_point = Some(event.point),
                Kind::Enter => {
                    let end = exit_point.take().expect("expected exit before enter");
                    let value = tokenizer.serialize_range(&event.point, &end);
                    if !value.trim().is_empty() {
                        return true;
                    }
                }
            }
        }
    }
    false
}
