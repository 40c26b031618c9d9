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

//! Inline HTML: open and close tags, comments, instructions,
//! declarations, and CDATA sections, as one token.
//!
//! ```markdown
//! a <b data-x="1"> c <!-- d --> e
//! ```
//!
//! Line endings are allowed inside most positions; the token's data is
//! chunked per line, with up to three columns of the next line's
//! indentation taken as a prefix. A blank line ends the construct.

use crate::chars::{
    is_ascii_alpha, is_ascii_alphanumeric, is_line_ending, is_line_ending_or_space,
    is_space_or_tab,
};
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static HTML_TEXT: Construct = Construct {
    name: "htmlText",
    start: StateName::HtmlTextStart,
    ..Construct::DEFAULT
};

const CDATA_OPEN: &[char] = &['C', 'D', 'A', 'T', 'A', '['];

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('<'));
    tokenizer.tokenize_state.return_state = None;
    tokenizer.enter(Name::HtmlText);
    tokenizer.enter(Name::HtmlTextData);
    tokenizer.consume();
    State::Next(StateName::HtmlTextOpen)
}

pub(crate) fn open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('!') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclarationOpen)
        }
        Code::Char('/') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagCloseStart)
        }
        Code::Char('?') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstruction)
        }
        code if is_ascii_alpha(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpen)
        }
        _ => State::Nok,
    }
}

pub(crate) fn declaration_open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('-') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCommentOpenInside)
        }
        Code::Char('[') => {
            tokenizer.consume();
            tokenizer.tokenize_state.index = 0;
            State::Next(StateName::HtmlTextCdataOpenInside)
        }
        code if is_ascii_alpha(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclaration)
        }
        _ => State::Nok,
    }
}

pub(crate) fn comment_open_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCommentEnd)
    } else {
        State::Nok
    }
}

pub(crate) fn comment(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        Code::Char('-') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCommentClose)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextComment);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextComment)
        }
    }
}

pub(crate) fn comment_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCommentEnd)
    } else {
        State::Retry(StateName::HtmlTextComment)
    }
}

// Also reached right after `<!--`, which makes `<!-->` and `<!--->`
// valid comments.
pub(crate) fn comment_end(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        Code::Char('-') => State::Retry(StateName::HtmlTextCommentClose),
        _ => State::Retry(StateName::HtmlTextComment),
    }
}

pub(crate) fn cdata_open_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(CDATA_OPEN[tokenizer.tokenize_state.index]) {
        tokenizer.tokenize_state.index += 1;
        tokenizer.consume();
        if tokenizer.tokenize_state.index == CDATA_OPEN.len() {
            State::Next(StateName::HtmlTextCdata)
        } else {
            State::Next(StateName::HtmlTextCdataOpenInside)
        }
    } else {
        State::Nok
    }
}

pub(crate) fn cdata(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        Code::Char(']') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCdataClose)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextCdata);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCdata)
        }
    }
}

pub(crate) fn cdata_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(']') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCdataEnd)
    } else {
        State::Retry(StateName::HtmlTextCdata)
    }
}

pub(crate) fn cdata_end(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        Code::Char(']') => State::Retry(StateName::HtmlTextCdataClose),
        _ => State::Retry(StateName::HtmlTextCdata),
    }
}

pub(crate) fn declaration(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextDeclaration);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclaration)
        }
    }
}

pub(crate) fn instruction(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        Code::Char('?') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstructionClose)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextInstruction);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstruction)
        }
    }
}

pub(crate) fn instruction_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        State::Retry(StateName::HtmlTextEnd)
    } else {
        State::Retry(StateName::HtmlTextInstruction)
    }
}

pub(crate) fn tag_close_start(tokenizer: &mut Tokenizer) -> State {
    if is_ascii_alpha(tokenizer.current) {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagClose)
    } else {
        State::Nok
    }
}

pub(crate) fn tag_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') || is_ascii_alphanumeric(tokenizer.current) {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagClose)
    } else {
        State::Retry(StateName::HtmlTextTagCloseBetween)
    }
}

pub(crate) fn tag_close_between(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending(tokenizer.current) {
        tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextTagCloseBetween);
        State::Retry(StateName::HtmlTextLineEndingBefore)
    } else if is_space_or_tab(tokenizer.current) {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagCloseBetween)
    } else {
        State::Retry(StateName::HtmlTextEnd)
    }
}

pub(crate) fn tag_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') || is_ascii_alphanumeric(tokenizer.current) {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagOpen)
    } else if tokenizer.current == Code::Char('/')
        || tokenizer.current == Code::Char('>')
        || is_line_ending_or_space(tokenizer.current)
    {
        State::Retry(StateName::HtmlTextTagOpenBetween)
    } else {
        State::Nok
    }
}

pub(crate) fn tag_open_between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('/') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextEnd)
        }
        Code::Char(':') | Code::Char('_') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        code if is_ascii_alpha(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state = Some(StateName::HtmlTextTagOpenBetween);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        code if is_space_or_tab(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenBetween)
        }
        _ => State::Retry(StateName::HtmlTextEnd),
    }
}

pub(crate) fn tag_open_attribute_name(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('-') | Code::Char('.') | Code::Char(':') | Code::Char('_') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        code if is_ascii_alphanumeric(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        _ => State::Retry(StateName::HtmlTextTagOpenAttributeNameAfter),
    }
}

pub(crate) fn tag_open_attribute_name_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('=') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueBefore)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state =
                Some(StateName::HtmlTextTagOpenAttributeNameAfter);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        code if is_space_or_tab(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeNameAfter)
        }
        _ => State::Retry(StateName::HtmlTextTagOpenBetween),
    }
}

pub(crate) fn tag_open_attribute_value_before(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('<') | Code::Char('=') | Code::Char('>') | Code::Char('`') => {
            State::Nok
        }
        Code::Char('"') | Code::Char('\'') => {
            tokenizer.tokenize_state.marker = tokenizer.current;
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueQuoted)
        }
        code if is_line_ending(code) => {
            tokenizer.tokenize_state.return_state =
                Some(StateName::HtmlTextTagOpenAttributeValueBefore);
            State::Retry(StateName::HtmlTextLineEndingBefore)
        }
        code if is_space_or_tab(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueBefore)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueUnquoted)
        }
    }
}

pub(crate) fn tag_open_attribute_value_quoted(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof {
        State::Nok
    } else if tokenizer.current == tokenizer.tokenize_state.marker {
        tokenizer.tokenize_state.marker = Code::Eof;
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagOpenAttributeValueQuotedAfter)
    } else if is_line_ending(tokenizer.current) {
        tokenizer.tokenize_state.return_state =
            Some(StateName::HtmlTextTagOpenAttributeValueQuoted);
        State::Retry(StateName::HtmlTextLineEndingBefore)
    } else {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagOpenAttributeValueQuoted)
    }
}

pub(crate) fn tag_open_attribute_value_quoted_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>')
        || tokenizer.current == Code::Char('/')
        || is_line_ending_or_space(tokenizer.current)
    {
        State::Retry(StateName::HtmlTextTagOpenBetween)
    } else {
        State::Nok
    }
}

pub(crate) fn tag_open_attribute_value_unquoted(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof
        | Code::Char('"')
        | Code::Char('\'')
        | Code::Char('<')
        | Code::Char('=')
        | Code::Char('`') => State::Nok,
        Code::Char('>') => State::Retry(StateName::HtmlTextTagOpenBetween),
        code if is_line_ending_or_space(code) => State::Retry(StateName::HtmlTextTagOpenBetween),
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueUnquoted)
        }
    }
}

pub(crate) fn end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.consume();
        tokenizer.exit(Name::HtmlTextData);
        tokenizer.exit(Name::HtmlText);
        State::Ok
    } else {
        State::Nok
    }
}

pub(crate) fn line_ending_before(tokenizer: &mut Tokenizer) -> State {
    debug_assert!(is_line_ending(tokenizer.current));
    tokenizer.exit(Name::HtmlTextData);
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::HtmlTextLineEndingAfter)
}

pub(crate) fn line_ending_after(tokenizer: &mut Tokenizer) -> State {
    if is_space_or_tab(tokenizer.current) {
        space_or_tab(
            tokenizer,
            Name::LinePrefix,
            3,
            StateName::HtmlTextLineEndingAfterPrefix,
        )
    } else {
        State::Retry(StateName::HtmlTextLineEndingAfterPrefix)
    }
}

pub(crate) fn line_ending_after_prefix(tokenizer: &mut Tokenizer) -> State {
    if is_line_ending(tokenizer.current) {
        // Blank line.
        return State::Nok;
    }
    let return_state = tokenizer
        .tokenize_state
        .return_state
        .expect("expected `return_state` to be set");
    tokenizer.enter(Name::HtmlTextData);
    State::Retry(return_state)
}
