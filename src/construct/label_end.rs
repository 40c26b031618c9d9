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

//! The `]` that tries to close the nearest unbalanced label opener into
//! a link or image.
//!
//! ```markdown
//! [a](b "c") ![d][e] [f]
//! ```
//!
//! Four shapes, tried in order: a `(resource)`, a full `[reference]`
//! (which must be defined), a collapsed `[]`, and a shortcut (the label
//! itself must be defined). A failed opener is flagged balanced so no
//! later `]` wastes time on it; an opener inside a resolved link is
//! flagged inactive, because links cannot nest. Both flags are in-place
//! mutations of already-emitted events and survive backtracking.

use crate::chars::is_line_ending_or_space;
use crate::construct::partial_whitespace::whitespace;
use crate::construct::text::resolve_data;
use crate::event::{Event, EventFlags, Kind, Name};
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static LABEL_END: Construct = Construct {
    name: "labelEnd",
    start: StateName::LabelEndStart,
    resolve_to: Some(resolve_to),
    resolve_all: Some(resolve_all),
    ..Construct::DEFAULT
};

static RESOURCE: Construct = Construct {
    start: StateName::LabelEndResourceStart,
    ..Construct::DEFAULT
};

static REFERENCE_FULL: Construct = Construct {
    start: StateName::LabelEndReferenceFull,
    ..Construct::DEFAULT
};

static REFERENCE_COLLAPSED: Construct = Construct {
    start: StateName::LabelEndReferenceCollapsedStart,
    ..Construct::DEFAULT
};

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char(']'));

    // The nearest opener that is not balanced yet.
    let mut index = tokenizer.events.len();
    let mut label_start = None;
    while index > 0 {
        index -= 1;
        let event = &tokenizer.events[index];
        if event.kind == Kind::Enter
            && matches!(event.name, Name::LabelImage | Name::LabelLink)
            && !event.flags.contains(EventFlags::BALANCED)
        {
            label_start = Some(index);
            break;
        }
    }
    let Some(open) = label_start else {
        return State::Nok;
    };

    tokenizer.tokenize_state.label_start = open;

    if tokenizer.events[open].flags.contains(EventFlags::INACTIVE) {
        return State::Retry(StateName::LabelEndNok);
    }

    // The raw label text runs from the end of the opener to here.
    let name = tokenizer.events[open].name;
    let mut exit = open + 1;
    while tokenizer.events[exit].kind != Kind::Exit || tokenizer.events[exit].name != name {
        exit += 1;
    }
    let label = tokenizer.serialize_range(&tokenizer.events[exit].point, &tokenizer.point);
    tokenizer.tokenize_state.label_defined = tokenizer.is_defined(&label);

    tokenizer.enter(Name::LabelEnd);
    tokenizer.enter(Name::LabelMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelMarker);
    tokenizer.exit(Name::LabelEnd);
    State::Next(StateName::LabelEndAfter)
}

pub(crate) fn after(tokenizer: &mut Tokenizer) -> State {
    let defined = tokenizer.tokenize_state.label_defined;
    match tokenizer.current {
        // Resource: `](`. If it fails but the label is defined, fall
        // back to a shortcut reference.
        Code::Char('(') => tokenizer.attempt(
            &RESOURCE,
            State::Next(StateName::LabelEndOk),
            if defined {
                State::Next(StateName::LabelEndOk)
            } else {
                State::Next(StateName::LabelEndNok)
            },
        ),
        // Full (or collapsed, or shortcut) reference: `][`.
        Code::Char('[') => tokenizer.attempt(
            &REFERENCE_FULL,
            State::Next(StateName::LabelEndOk),
            if defined {
                State::Next(StateName::LabelEndReferenceNotFull)
            } else {
                State::Next(StateName::LabelEndNok)
            },
        ),
        // Shortcut reference: `]` on its own.
        _ => {
            if defined {
                State::Retry(StateName::LabelEndOk)
            } else {
                State::Retry(StateName::LabelEndNok)
            }
        }
    }
}

/// `][` where the full reference was not defined: try collapsed, and
/// fall back to a shortcut reference otherwise.
pub(crate) fn reference_not_full(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        &REFERENCE_COLLAPSED,
        State::Next(StateName::LabelEndOk),
        State::Next(StateName::LabelEndOk),
    )
}

pub(crate) fn label_end_ok(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.label_start = 0;
    tokenizer.tokenize_state.label_defined = false;
    State::Ok
}

pub(crate) fn label_end_nok(tokenizer: &mut Tokenizer) -> State {
    let open = tokenizer.tokenize_state.label_start;
    tokenizer.events[open].flags.insert(EventFlags::BALANCED);
    tokenizer.tokenize_state.label_start = 0;
    tokenizer.tokenize_state.label_defined = false;
    State::Nok
}

pub(crate) fn resource_start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('('));
    tokenizer.enter(Name::Resource);
    tokenizer.enter(Name::ResourceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ResourceMarker);
    State::Next(StateName::LabelEndResourceBefore)
}

pub(crate) fn resource_before(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending_or_space(tokenizer.current) {
        whitespace(tokenizer, StateName::LabelEndResourceOpen)
    } else {
        State::Retry(StateName::LabelEndResourceOpen)
    }
}

pub(crate) fn resource_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(')') {
        State::Retry(StateName::LabelEndResourceEnd)
    } else {
        State::Retry(StateName::DestinationStart)
    }
}

pub(crate) fn resource_destination_after(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending_or_space(tokenizer.current) {
        whitespace(tokenizer, StateName::LabelEndResourceBetween)
    } else {
        State::Retry(StateName::LabelEndResourceEnd)
    }
}

pub(crate) fn resource_destination_missing(_tokenizer: &mut Tokenizer) -> State {
    State::Nok
}

pub(crate) fn resource_between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('"') | Code::Char('\'') | Code::Char('(') => {
            State::Retry(StateName::TitleStart)
        }
        _ => State::Retry(StateName::LabelEndResourceEnd),
    }
}

pub(crate) fn resource_title_after(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending_or_space(tokenizer.current) {
        whitespace(tokenizer, StateName::LabelEndResourceEnd)
    } else {
        State::Retry(StateName::LabelEndResourceEnd)
    }
}

pub(crate) fn resource_end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(')') {
        tokenizer.enter(Name::ResourceMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ResourceMarker);
        tokenizer.exit(Name::Resource);
        State::Ok
    } else {
        State::Nok
    }
}

pub(crate) fn reference_full(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('['));
    State::Retry(StateName::LabelStart)
}

pub(crate) fn reference_full_after(tokenizer: &mut Tokenizer) -> State {
    // The reference label just tokenized.
    let events = &tokenizer.events;
    let mut index = events.len();
    let mut exit_point = None;
    loop {
        index -= 1;
        if events[index].name == Name::ReferenceString {
            match events[index].kind {
                Kind::Exit => exit_point = Some(events[index].point),
                Kind::Enter => break,
            }
        }
    }
    let start = events[index].point;
    let end = exit_point.expect("expected exit before enter");
    let label = tokenizer.serialize_range(&start, &end);

    if tokenizer.is_defined(&label) {
        State::Ok
    } else {
        State::Nok
    }
}

pub(crate) fn reference_full_missing(_tokenizer: &mut Tokenizer) -> State {
    State::Nok
}

pub(crate) fn reference_collapsed_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('[') {
        tokenizer.enter(Name::Reference);
        tokenizer.enter(Name::ReferenceMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ReferenceMarker);
        State::Next(StateName::LabelEndReferenceCollapsedOpen)
    } else {
        State::Nok
    }
}

pub(crate) fn reference_collapsed_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(']') {
        tokenizer.enter(Name::ReferenceMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ReferenceMarker);
        tokenizer.exit(Name::Reference);
        State::Ok
    } else {
        State::Nok
    }
}

/// On commit, turn everything from the opener through the just-closed
/// end (plus any resource or reference after it) into a link or image,
/// and deactivate link openers left open inside a new link.
pub(crate) fn resolve_to(events: &mut Vec<Event>) {
    let mut index = events.len();
    let mut open = None;
    let mut close = None;
    let mut offset = 0;

    while index > 0 {
        index -= 1;
        let event = &events[index];
        if open.is_some() {
            if event.name == Name::Link {
                // Openers before an already-resolved link are unrelated.
                break;
            }
            if event.kind == Kind::Enter && event.name == Name::LabelLink {
                if event.flags.contains(EventFlags::INACTIVE) {
                    break;
                }
                events[index].flags.insert(EventFlags::INACTIVE);
            }
        } else if close.is_some() {
            if event.kind == Kind::Enter
                && matches!(event.name, Name::LabelImage | Name::LabelLink)
                && !event.flags.contains(EventFlags::BALANCED)
            {
                open = Some(index);
                if event.name == Name::LabelImage {
                    offset = 2;
                    // Images cannot contain links, so nothing to
                    // deactivate further back.
                    break;
                }
            }
        } else if event.name == Name::LabelEnd {
            close = Some(index);
        }
    }

    let open = open.expect("expected a label opener to resolve");
    let close = close.expect("expected a label end to resolve");

    let group_name = if events[open].name == Name::LabelLink {
        Name::Link
    } else {
        Name::Image
    };
    let group_enter = Event::new(Kind::Enter, group_name, events[open].point);
    let group_exit = Event::new(Kind::Exit, group_name, events[events.len() - 1].point);
    let label_enter = Event::new(Kind::Enter, Name::Label, events[open].point);
    let label_exit = Event::new(Kind::Exit, Name::Label, events[close].point);
    let text_enter = Event::new(Kind::Enter, Name::LabelText, events[open + offset + 2].point);
    let text_exit = Event::new(Kind::Exit, Name::LabelText, events[close - 2].point);

    let mut media = Vec::with_capacity(events.len() - open + 8);
    media.push(group_enter);
    media.push(label_enter);
    // The opener's markers.
    media.extend_from_slice(&events[open + 1..open + offset + 3]);
    media.push(text_enter);
    // The label text, with its data merged now that it is final.
    let mut inner = events[open + offset + 4..close - 3].to_vec();
    resolve_data(&mut inner);
    media.append(&mut inner);
    media.push(text_exit);
    // The `]` marker.
    media.push(events[close - 2]);
    media.push(events[close - 1]);
    media.push(label_exit);
    // The resource or reference, if any.
    media.extend_from_slice(&events[close + 1..]);
    media.push(group_exit);

    events.truncate(open);
    events.extend(media);
}

/// After everything, demote label openers and ends that never resolved
/// into plain data, dropping their marker events. Idempotent.
pub(crate) fn resolve_all(events: &mut Vec<Event>) {
    let mut index = 0;
    let mut next_events: Vec<Event> = Vec::with_capacity(events.len());
    let mut changed = false;

    while index < events.len() {
        let mut event = events[index];
        if event.kind == Kind::Enter
            && matches!(event.name, Name::LabelImage | Name::LabelLink | Name::LabelEnd)
        {
            // `![` spans four marker events, `[` and `]` two each.
            let skip = if event.name == Name::LabelImage { 4 } else { 2 };
            event.name = Name::Data;
            next_events.push(event);
            let mut exit = events[index + skip + 1];
            debug_assert_eq!(exit.kind, Kind::Exit);
            exit.name = Name::Data;
            next_events.push(exit);
            index += skip + 2;
            changed = true;
        } else {
            next_events.push(event);
            index += 1;
        }
    }

    if changed {
        *events = next_events;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Point;

    fn event(kind: Kind, name: Name) -> Event {
        Event::new(kind, name, Point::default())
    }

    #[test]
    fn demotion_is_idempotent() {
        // A lone `[` opener followed by some data.
        let mut events = vec![
            event(Kind::Enter, Name::LabelLink),
            event(Kind::Enter, Name::LabelMarker),
            event(Kind::Exit, Name::LabelMarker),
            event(Kind::Exit, Name::LabelLink),
            event(Kind::Enter, Name::Data),
            event(Kind::Exit, Name::Data),
        ];

        resolve_all(&mut events);
        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|event| event.name == Name::Data));

        let again = events.clone();
        resolve_all(&mut events);
        assert_eq!(events, again);
    }
}
