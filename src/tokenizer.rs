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

//! The tokenizer proper: the run loop, the effect primitives (`enter`,
//! `exit`, `consume`), and speculative attempts with snapshot/restore.

use crate::chars::normalize_identifier;
use crate::event::{Event, Kind, Name, Point};
use crate::preprocess::{serialize, Code};
use crate::state::{call, State, StateName};
use crate::Lexer;

/// A named piece of grammar that can be attempted.
///
/// Partials (reusable fragments driven by another construct) have an
/// empty name and no resolvers; they are never attempted on their own.
pub(crate) struct Construct {
    pub(crate) name: &'static str,
    /// The entry state.
    pub(crate) start: StateName,
    /// Cheap gate over what came before, checked by the driver.
    pub(crate) previous: Option<fn(&Tokenizer) -> bool>,
    /// Runs on commit, over the events this attempt appended.
    pub(crate) resolve: Option<fn(&mut Vec<Event>)>,
    /// Runs on commit, over the whole event stream.
    pub(crate) resolve_to: Option<fn(&mut Vec<Event>)>,
    /// Registered on first commit, runs once after tokenizing ends.
    pub(crate) resolve_all: Option<fn(&mut Vec<Event>)>,
    /// Whether this construct turns concrete once far enough along.
    pub(crate) concrete: bool,
}

impl Construct {
    pub(crate) const DEFAULT: Construct = Construct {
        name: "",
        start: StateName::TextStart,
        previous: None,
        resolve: None,
        resolve_to: None,
        resolve_all: None,
        concrete: false,
    };
}

/// How the result of an attempt is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttemptKind {
    /// Keep the events on `Ok`, restore on `Nok`.
    Attempt,
    /// Restore either way; only the boolean outcome is kept.
    Check,
}

/// Restorable tokenizer position.
struct Progress {
    events_len: usize,
    stack: Vec<(Name, Point)>,
    point: Point,
    previous: Code,
    interrupt: bool,
}

/// One frame of speculation.
struct Attempt {
    construct: &'static Construct,
    kind: AttemptKind,
    /// Continuation when the construct returns `Ok`.
    ok: State,
    /// Continuation when the construct returns `Nok`.
    nok: State,
    progress: Progress,
}

/// Construct-local scratch.
///
/// States are free functions, so the variables a closure would capture
/// live here instead. Every construct initializes the fields it uses on
/// entry; fields are shared, which works because no two constructs that
/// use the same field are ever live at the same time.
pub(crate) struct TokenizeState {
    /// Fence or quote marker being matched.
    pub(crate) marker: Code,
    /// General size counter (balance, close-sequence length).
    pub(crate) size: usize,
    /// Second size counter (opening-sequence length).
    pub(crate) size_other: usize,
    /// Indentation before the opening fence.
    pub(crate) prefix: usize,
    /// Index into a literal being matched, or into the event stream.
    pub(crate) index: usize,
    /// General boolean.
    pub(crate) seen: bool,
    /// Where inline HTML resumes after a line ending.
    pub(crate) return_state: Option<StateName>,
    /// Token type a space-or-tab run is collected under.
    pub(crate) space_token: Name,
    /// Largest allowed space-or-tab run.
    pub(crate) space_max: usize,
    /// Codes consumed by the current space-or-tab run.
    pub(crate) space_size: usize,
    /// Continuation after a space-or-tab run.
    pub(crate) space_ok: Option<StateName>,
    /// Continuation after a whitespace run.
    pub(crate) whitespace_ok: Option<StateName>,
    /// Event index of the label opener being closed.
    pub(crate) label_start: usize,
    /// Whether that opener's label is a defined reference.
    pub(crate) label_defined: bool,
}

impl TokenizeState {
    fn new() -> Self {
        TokenizeState {
            marker: Code::Eof,
            size: 0,
            size_other: 0,
            prefix: 0,
            index: 0,
            seen: false,
            return_state: None,
            space_token: Name::Data,
            space_max: 0,
            space_size: 0,
            space_ok: None,
            whitespace_ok: None,
            label_start: 0,
            label_defined: false,
        }
    }
}

/// A tokenizer over one preprocessed input.
pub(crate) struct Tokenizer<'a> {
    codes: &'a [Code],
    lexer: &'a Lexer<'a>,
    pub(crate) events: Vec<Event>,
    /// Open tokens, innermost last, with their start points.
    stack: Vec<(Name, Point)>,
    pub(crate) point: Point,
    /// The code before `current`.
    pub(crate) previous: Code,
    /// The code the next state is dispatched on.
    pub(crate) current: Code,
    /// Guard: each code may be consumed exactly once per dispatch.
    consumed: bool,
    attempts: Vec<Attempt>,
    /// Constructs whose `resolve_all` runs at the end, in registration
    /// order, deduplicated by identity.
    resolve_alls: Vec<&'static Construct>,
    pub(crate) tokenize_state: TokenizeState,
    /// Whether the tokenizer is probing for an interruption of something
    /// else, which relaxes a few constructs (an opening fence alone is
    /// enough, no content or closing fence needed).
    pub(crate) interrupt: bool,
    /// Set while inside a fence that has become concrete: on rejection
    /// the driver must fall back to data, not to other constructs.
    pub(crate) concrete: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(codes: &'a [Code], lexer: &'a Lexer<'a>) -> Self {
        Tokenizer {
            codes,
            lexer,
            events: Vec::new(),
            stack: Vec::new(),
            point: Point {
                index: 0,
                offset: lexer.bom_len(),
                line: 1,
                column: 1,
            },
            previous: Code::Eof,
            current: codes.first().copied().unwrap_or(Code::Eof),
            consumed: true,
            attempts: Vec::new(),
            resolve_alls: Vec::new(),
            tokenize_state: TokenizeState::new(),
            interrupt: false,
            concrete: false,
        }
    }

    /// Open a token. Returns the index of the enter event.
    pub(crate) fn enter(&mut self, name: Name) -> usize {
        self.events.push(Event::new(Kind::Enter, name, self.point));
        self.stack.push((name, self.point));
        self.events.len() - 1
    }

    /// Close the innermost open token, which must be `name` and must
    /// have consumed at least one code.
    pub(crate) fn exit(&mut self, name: Name) {
        let (open, start) = self.stack.pop().expect("cannot close without an open token");
        debug_assert_eq!(open, name, "expected exit of the innermost open token");
        debug_assert_ne!(start.index, self.point.index, "expected non-empty token");
        self.events.push(Event::new(Kind::Exit, name, self.point));
    }

    /// Consume the current code and move past it.
    pub(crate) fn consume(&mut self) {
        debug_assert!(!self.consumed, "expected code to not have been consumed");
        debug_assert_ne!(self.current, Code::Eof, "cannot consume eof");

        if crate::chars::is_line_ending(self.current) {
            self.point.line += 1;
            self.point.column = 1;
        } else if self.current != Code::VirtualSpace {
            self.point.column += 1;
        }
        self.point.offset += self.current.width();
        self.point.index += 1;
        self.previous = self.current;
        self.current = self
            .codes
            .get(self.point.index)
            .copied()
            .unwrap_or(Code::Eof);
        self.consumed = true;
    }

    /// Retype the open token that was entered at `event_index`. Used when
    /// a sequence turns out not to close anything.
    pub(crate) fn retype_open(&mut self, event_index: usize, name: Name) {
        debug_assert_eq!(self.events[event_index].kind, Kind::Enter);
        self.events[event_index].name = name;
        let top = self.stack.last_mut().expect("expected an open token");
        top.0 = name;
    }

    /// Try a construct: on `Ok` its events are kept and its resolvers
    /// run, on `Nok` everything it did is rolled back.
    pub(crate) fn attempt(&mut self, construct: &'static Construct, ok: State, nok: State) -> State {
        self.push_attempt(construct, AttemptKind::Attempt, ok, nok)
    }

    /// Peek at a construct: the outcome picks the continuation, but
    /// the events are rolled back either way.
    pub(crate) fn check(&mut self, construct: &'static Construct, ok: State, nok: State) -> State {
        self.push_attempt(construct, AttemptKind::Check, ok, nok)
    }

    fn push_attempt(
        &mut self,
        construct: &'static Construct,
        kind: AttemptKind,
        ok: State,
        nok: State,
    ) -> State {
        debug_assert!(
            !construct.name.is_empty()
                || (construct.resolve.is_none()
                    && construct.resolve_to.is_none()
                    && construct.resolve_all.is_none()),
            "unnamed constructs must not resolve"
        );
        self.attempts.push(Attempt {
            construct,
            kind,
            ok,
            nok,
            progress: self.capture(),
        });
        State::Retry(construct.start)
    }

    fn capture(&self) -> Progress {
        Progress {
            events_len: self.events.len(),
            stack: self.stack.clone(),
            point: self.point,
            previous: self.previous,
            interrupt: self.interrupt,
        }
    }

    /// Roll back to a captured position. Events appended since the
    /// capture are dropped; in-place mutation of earlier events stays.
    fn restore(&mut self, progress: Progress) {
        self.events.truncate(progress.events_len);
        self.stack = progress.stack;
        self.point = progress.point;
        self.previous = progress.previous;
        self.current = self
            .codes
            .get(self.point.index)
            .copied()
            .unwrap_or(Code::Eof);
        self.interrupt = progress.interrupt;
    }

    /// Resolve the innermost attempt and pick its continuation. The
    /// continuation is dispatched on the code the attempt started at
    /// (after a restore) or on the current code (after a commit); either
    /// way that code is not consumed again before the next state runs.
    fn exit_attempt(&mut self, ok: bool) -> State {
        let attempt = self.attempts.pop().expect("expected an attempt to resolve");
        let next = if ok { attempt.ok } else { attempt.nok };

        if ok && attempt.kind == AttemptKind::Attempt {
            if let Some(resolve) = attempt.construct.resolve {
                let mut appended = self.events.split_off(attempt.progress.events_len);
                resolve(&mut appended);
                self.events.append(&mut appended);
            }
            if let Some(resolve_to) = attempt.construct.resolve_to {
                resolve_to(&mut self.events);
            }
            if attempt.construct.resolve_all.is_some()
                && !self
                    .resolve_alls
                    .iter()
                    .any(|registered| std::ptr::eq(*registered, attempt.construct))
            {
                self.resolve_alls.push(attempt.construct);
            }
            if attempt.construct.concrete {
                self.concrete = false;
            }
        } else {
            self.restore(attempt.progress);
        }

        self.consumed = true;
        next
    }

    /// Feed the state machine until it settles with no attempt left.
    pub(crate) fn run(&mut self, initial: State) -> State {
        let mut state = initial;
        loop {
            match state {
                State::Next(name) => {
                    debug_assert!(self.consumed, "expected code to be consumed before `next`");
                    self.consumed = false;
                    state = call(self, name);
                }
                State::Retry(name) => state = call(self, name),
                State::Ok | State::Nok => {
                    if self.attempts.is_empty() {
                        break;
                    }
                    state = self.exit_attempt(state == State::Ok);
                }
            }
        }
        state
    }

    /// Run a lone check from the start of input. Used to answer whether
    /// the input would interrupt surrounding content.
    pub(crate) fn run_check(&mut self, construct: &'static Construct) -> bool {
        self.consumed = false;
        let state = self.check(construct, State::Ok, State::Nok);
        self.run(state) == State::Ok
    }

    /// Apply the registered end-of-stream resolvers and take the events.
    pub(crate) fn flush(self) -> Vec<Event> {
        debug_assert!(self.stack.is_empty(), "expected all tokens to be closed");
        let mut events = self.events;
        for construct in &self.resolve_alls {
            if let Some(resolve_all) = construct.resolve_all {
                resolve_all(&mut events);
            }
        }
        // The driver's merge of adjacent data runs last, after label
        // demotion has had its say.
        crate::construct::text::resolve_data(&mut events);
        events
    }

    /// Mark the innermost attempted construct as concrete. Must only be
    /// called from a construct declared `concrete`.
    pub(crate) fn concrete_start(&mut self) {
        debug_assert!(
            self.attempts.iter().any(|a| a.construct.concrete),
            "expected a concrete construct to be attempted"
        );
        self.concrete = true;
    }

    /// The text covered by the codes between two points.
    pub(crate) fn serialize_range(&self, start: &Point, end: &Point) -> String {
        serialize(&self.codes[start.index..end.index])
    }

    pub(crate) fn options(&self) -> crate::Options {
        self.lexer.options()
    }

    /// Whether a reference label (raw, not yet normalized) is defined.
    pub(crate) fn is_defined(&self, label: &str) -> bool {
        self.lexer
            .is_defined_normalized(&normalize_identifier(label))
    }

    /// Whether a line is a lazy continuation line.
    pub(crate) fn is_lazy(&self, line: usize) -> bool {
        self.lexer.is_lazy(line)
    }
}
