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

//! Code spans.
//!
//! ```markdown
//! a `b` c
//! ```
//!
//! A closing backtick run counts only if it has exactly the length of
//! the opening run; other runs are content. After matching, a resolver
//! strips one leading and one trailing space (or line ending) when both
//! are present and there is content between them, then merges what is
//! left into data tokens per line.

use crate::chars::is_line_ending;
use crate::event::{Event, Name};
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static CODE_TEXT: Construct = Construct {
    name: "codeText",
    start: StateName::CodeTextStart,
    previous: Some(previous),
    resolve: Some(resolve),
    ..Construct::DEFAULT
};

/// A backtick right before cannot open a span, unless it was escaped.
fn previous(tokenizer: &Tokenizer) -> bool {
    tokenizer.previous != Code::Char('`')
        || tokenizer
            .events
            .last()
            .map_or(false, |event| event.name == Name::CharacterEscape)
}

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('`'));
    debug_assert!(previous(tokenizer));
    tokenizer.tokenize_state.size_other = 0;
    tokenizer.enter(Name::CodeText);
    tokenizer.enter(Name::CodeTextSequence);
    State::Retry(StateName::CodeTextSequenceOpen)
}

pub(crate) fn sequence_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('`') {
        tokenizer.tokenize_state.size_other += 1;
        tokenizer.consume();
        State::Next(StateName::CodeTextSequenceOpen)
    } else {
        tokenizer.exit(Name::CodeTextSequence);
        State::Retry(StateName::CodeTextBetween)
    }
}

pub(crate) fn between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        Code::Char('`') => {
            tokenizer.tokenize_state.index = tokenizer.enter(Name::CodeTextSequence);
            tokenizer.tokenize_state.size = 0;
            State::Retry(StateName::CodeTextSequenceClose)
        }
        Code::Char(' ') => {
            tokenizer.enter(Name::Space);
            tokenizer.consume();
            tokenizer.exit(Name::Space);
            State::Next(StateName::CodeTextBetween)
        }
        code if is_line_ending(code) => {
            if is_line_ending(tokenizer.previous) {
                // A blank line ends anything inline.
                return State::Nok;
            }
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::CodeTextBetween)
        }
        _ => {
            tokenizer.enter(Name::CodeTextData);
            State::Retry(StateName::CodeTextData)
        }
    }
}

pub(crate) fn data(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('`') | Code::Char(' ') => {
            tokenizer.exit(Name::CodeTextData);
            State::Retry(StateName::CodeTextBetween)
        }
        code if is_line_ending(code) => {
            tokenizer.exit(Name::CodeTextData);
            State::Retry(StateName::CodeTextBetween)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::CodeTextData)
        }
    }
}

pub(crate) fn sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('`') {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::CodeTextSequenceClose)
    } else if tokenizer.tokenize_state.size == tokenizer.tokenize_state.size_other {
        tokenizer.exit(Name::CodeTextSequence);
        tokenizer.exit(Name::CodeText);
        State::Ok
    } else {
        // Wrong length: the run is content, not a closer.
        let index = tokenizer.tokenize_state.index;
        tokenizer.retype_open(index, Name::CodeTextData);
        State::Retry(StateName::CodeTextData)
    }
}

/// Strip padding and merge content.
pub(crate) fn resolve(events: &mut Vec<Event>) {
    let mut head_enter = 3;
    let mut tail_exit = events.len() - 4;

    // One leading and one trailing space or line ending become padding,
    // but only around actual content.
    if matches!(events[head_enter].name, Name::LineEnding | Name::Space)
        && matches!(events[tail_exit].name, Name::LineEnding | Name::Space)
    {
        let mut index = head_enter;
        loop {
            index += 1;
            if index >= tail_exit {
                break;
            }
            if events[index].name == Name::CodeTextData {
                events[head_enter].name = Name::CodeTextPadding;
                events[head_enter + 1].name = Name::CodeTextPadding;
                events[tail_exit - 1].name = Name::CodeTextPadding;
                events[tail_exit].name = Name::CodeTextPadding;
                head_enter += 2;
                tail_exit -= 2;
                break;
            }
        }
    }

    // Merge runs between line endings into single data tokens.
    let mut index = head_enter - 1;
    tail_exit += 1;
    let mut enter: Option<usize> = None;
    loop {
        index += 1;
        if index > tail_exit {
            break;
        }
        if let Some(start) = enter {
            if index == tail_exit || events[index].name == Name::LineEnding {
                events[start].name = Name::CodeTextData;
                events[start + 1].name = Name::CodeTextData;
                if index != start + 2 {
                    events[start + 1].point = events[index - 1].point;
                    events.drain(start + 2..index);
                    tail_exit -= index - start - 2;
                    index = start + 2;
                }
                enter = None;
            }
        } else if index != tail_exit && events[index].name != Name::LineEnding {
            enter = Some(index);
        }
    }
}
