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

//! The driver: walks the input, attempts constructs at their trigger
//! codes, and sweeps everything else into data tokens that a final
//! resolver merges.

use crate::chars::{is_line_ending, is_space_or_tab};
use crate::construct::character_escape::CHARACTER_ESCAPE;
use crate::construct::code_fenced::CODE_FENCED;
use crate::construct::code_text::CODE_TEXT;
use crate::construct::html_text::HTML_TEXT;
use crate::construct::label_end::LABEL_END;
use crate::construct::label_start_image::LABEL_START_IMAGE;
use crate::construct::label_start_link::LABEL_START_LINK;
use crate::construct::line_ending::LINE_ENDING;
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::{Event, Kind, Name};
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};
use crate::Options;

fn gate(tokenizer: &Tokenizer, construct: &'static Construct) -> bool {
    construct.previous.map_or(true, |previous| previous(tokenizer))
}

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    // Indentation of the first line gets the same token later lines get
    // from the line-ending construct, so line-start gates see it.
    if tokenizer.events.is_empty() && is_space_or_tab(tokenizer.current) {
        return space_or_tab(
            tokenizer,
            Name::LinePrefix,
            usize::MAX,
            StateName::TextStart,
        );
    }
    let options = tokenizer.options();
    match tokenizer.current {
        Code::Eof => State::Ok,
        code if is_line_ending(code) => tokenizer.attempt(
            &LINE_ENDING,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        ),
        Code::Char('\\') if options.contains(Options::ENABLE_CHARACTER_ESCAPE) => tokenizer
            .attempt(
                &CHARACTER_ESCAPE,
                State::Next(StateName::TextStart),
                State::Next(StateName::TextBeforeData),
            ),
        Code::Char('`')
            if options.contains(Options::ENABLE_CODE_FENCED) && gate(tokenizer, &CODE_FENCED) =>
        {
            // A rejected backtick fence may still open a code span, unless
            // it got far enough to become concrete.
            tokenizer.attempt(
                &CODE_FENCED,
                State::Next(StateName::TextStart),
                State::Next(StateName::TextBeforeCodeText),
            )
        }
        Code::Char('`') => before_code_text(tokenizer),
        Code::Char('~')
            if options.contains(Options::ENABLE_CODE_FENCED) && gate(tokenizer, &CODE_FENCED) =>
        {
            tokenizer.attempt(
                &CODE_FENCED,
                State::Next(StateName::TextStart),
                State::Next(StateName::TextBeforeData),
            )
        }
        Code::Char('<') if options.contains(Options::ENABLE_HTML_TEXT) => tokenizer.attempt(
            &HTML_TEXT,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        ),
        Code::Char('[') if options.contains(Options::ENABLE_LABEL) => tokenizer.attempt(
            &LABEL_START_LINK,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        ),
        Code::Char('!') if options.contains(Options::ENABLE_LABEL) => tokenizer.attempt(
            &LABEL_START_IMAGE,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        ),
        Code::Char(']') if options.contains(Options::ENABLE_LABEL) => tokenizer.attempt(
            &LABEL_END,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        ),
        _ => before_data(tokenizer),
    }
}

/// After a backtick run was rejected as a fence.
pub(crate) fn before_code_text(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.concrete {
        // The fence was concrete when it failed; the backticks must not
        // be retried as a code span.
        return before_data(tokenizer);
    }
    if tokenizer.options().contains(Options::ENABLE_CODE_TEXT) && gate(tokenizer, &CODE_TEXT) {
        tokenizer.attempt(
            &CODE_TEXT,
            State::Next(StateName::TextStart),
            State::Next(StateName::TextBeforeData),
        )
    } else {
        before_data(tokenizer)
    }
}

pub(crate) fn before_data(tokenizer: &mut Tokenizer) -> State {
    debug_assert_ne!(tokenizer.current, Code::Eof);
    tokenizer.concrete = false;
    tokenizer.enter(Name::Data);
    tokenizer.consume();
    State::Next(StateName::TextData)
}

pub(crate) fn data(tokenizer: &mut Tokenizer) -> State {
    if at_break(tokenizer) {
        tokenizer.exit(Name::Data);
        State::Retry(StateName::TextStart)
    } else {
        tokenizer.consume();
        State::Next(StateName::TextData)
    }
}

/// Whether the current code could start a construct (or end the input),
/// so the open data token must be closed here.
fn at_break(tokenizer: &Tokenizer) -> bool {
    let options = tokenizer.options();
    match tokenizer.current {
        Code::Eof => true,
        code if is_line_ending(code) => true,
        Code::Char('\\') => options.contains(Options::ENABLE_CHARACTER_ESCAPE),
        Code::Char('`') => {
            (options.contains(Options::ENABLE_CODE_FENCED) && gate(tokenizer, &CODE_FENCED))
                || (options.contains(Options::ENABLE_CODE_TEXT) && gate(tokenizer, &CODE_TEXT))
        }
        Code::Char('~') => {
            options.contains(Options::ENABLE_CODE_FENCED) && gate(tokenizer, &CODE_FENCED)
        }
        Code::Char('<') => options.contains(Options::ENABLE_HTML_TEXT),
        Code::Char('[') | Code::Char('!') | Code::Char(']') => {
            options.contains(Options::ENABLE_LABEL)
        }
        _ => false,
    }
}

/// Merge runs of adjacent data tokens into one. Runs at the end of
/// tokenizing, and again over the label text of each resolved link or
/// image. Idempotent.
pub(crate) fn resolve_data(events: &mut Vec<Event>) {
    let mut index = 0;
    while index < events.len() {
        if events[index].kind == Kind::Enter && events[index].name == Name::Data {
            let mut exit_index = index + 1;
            // Skip over whole following pairs.
            while exit_index + 2 < events.len()
                && events[exit_index].name == Name::Data
                && events[exit_index + 1].name == Name::Data
                && events[exit_index + 1].kind == Kind::Enter
            {
                exit_index += 2;
            }
            if exit_index > index + 1 {
                events[index + 1] = events[exit_index];
                events.drain(index + 2..exit_index + 1);
            }
            index += 2;
        } else {
            index += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Point;

    fn data_pair(start: usize, end: usize) -> [Event; 2] {
        let at = |offset| Point {
            offset,
            ..Point::default()
        };
        [
            Event::new(Kind::Enter, Name::Data, at(start)),
            Event::new(Kind::Exit, Name::Data, at(end)),
        ]
    }

    #[test]
    fn data_merge_is_idempotent() {
        let mut events = Vec::new();
        events.extend_from_slice(&data_pair(0, 1));
        events.extend_from_slice(&data_pair(1, 2));
        events.extend_from_slice(&data_pair(2, 5));

        resolve_data(&mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].point.offset, 0);
        assert_eq!(events[1].point.offset, 5);

        let again = events.clone();
        resolve_data(&mut events);
        assert_eq!(events, again);
    }
}
