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

//! State names and the dispatch table.
//!
//! Construct state machines are free functions keyed by a name; the run
//! loop in [`crate::tokenizer`] dispatches through [`call`]. This is the
//! tagged-enum rendition of continuation passing: a state returns where
//! to go next instead of calling there directly, so the stack stays flat
//! and attempts can intercept `Ok`/`Nok`.

use crate::construct;
use crate::tokenizer::Tokenizer;

/// What a state function resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    /// Move to this state after the consume that just happened.
    Next(StateName),
    /// Dispatch this state on the same, unconsumed, code.
    Retry(StateName),
    /// The construct matched.
    Ok,
    /// The construct did not match; the innermost attempt restores.
    Nok,
}

/// Names of all state functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StateName {
    TextStart,
    TextBeforeCodeText,
    TextBeforeData,
    TextData,

    LineEndingStart,
    LineEndingAfter,
    LineEndingOk,

    CharacterEscapeStart,
    CharacterEscapeInside,

    SpaceOrTabStart,
    SpaceOrTabInside,

    WhitespaceStart,

    NonLazyContinuationStart,
    NonLazyContinuationLineStart,

    CodeFencedStart,
    CodeFencedSequenceOpen,
    CodeFencedInfoBefore,
    CodeFencedInfo,
    CodeFencedMetaBefore,
    CodeFencedMeta,
    CodeFencedAtNonLazyBreak,
    CodeFencedCloseStart,
    CodeFencedCloseBefore,
    CodeFencedBeforeSequenceClose,
    CodeFencedSequenceClose,
    CodeFencedSequenceCloseAfter,
    CodeFencedContentBefore,
    CodeFencedContentStart,
    CodeFencedBeforeContentChunk,
    CodeFencedContentChunk,
    CodeFencedAfter,

    CodeTextStart,
    CodeTextSequenceOpen,
    CodeTextBetween,
    CodeTextData,
    CodeTextSequenceClose,

    HtmlTextStart,
    HtmlTextOpen,
    HtmlTextDeclarationOpen,
    HtmlTextCommentOpenInside,
    HtmlTextComment,
    HtmlTextCommentClose,
    HtmlTextCommentEnd,
    HtmlTextCdataOpenInside,
    HtmlTextCdata,
    HtmlTextCdataClose,
    HtmlTextCdataEnd,
    HtmlTextDeclaration,
    HtmlTextInstruction,
    HtmlTextInstructionClose,
    HtmlTextTagCloseStart,
    HtmlTextTagClose,
    HtmlTextTagCloseBetween,
    HtmlTextTagOpen,
    HtmlTextTagOpenBetween,
    HtmlTextTagOpenAttributeName,
    HtmlTextTagOpenAttributeNameAfter,
    HtmlTextTagOpenAttributeValueBefore,
    HtmlTextTagOpenAttributeValueQuoted,
    HtmlTextTagOpenAttributeValueQuotedAfter,
    HtmlTextTagOpenAttributeValueUnquoted,
    HtmlTextEnd,
    HtmlTextLineEndingBefore,
    HtmlTextLineEndingAfter,
    HtmlTextLineEndingAfterPrefix,

    LabelStartLinkStart,

    LabelStartImageStart,
    LabelStartImageOpen,

    LabelEndStart,
    LabelEndAfter,
    LabelEndReferenceNotFull,
    LabelEndOk,
    LabelEndNok,
    LabelEndResourceStart,
    LabelEndResourceBefore,
    LabelEndResourceOpen,
    LabelEndResourceDestinationAfter,
    LabelEndResourceDestinationMissing,
    LabelEndResourceBetween,
    LabelEndResourceTitleAfter,
    LabelEndResourceEnd,
    LabelEndReferenceFull,
    LabelEndReferenceFullAfter,
    LabelEndReferenceFullMissing,
    LabelEndReferenceCollapsedStart,
    LabelEndReferenceCollapsedOpen,

    DestinationStart,
    DestinationEnclosedBefore,
    DestinationEnclosed,
    DestinationEnclosedEscape,
    DestinationRaw,
    DestinationRawEscape,

    TitleStart,
    TitleBegin,
    TitleAtBreak,
    TitleAfterEol,
    TitleInside,
    TitleEscape,

    LabelStart,
    LabelAtBreak,
    LabelInside,
    LabelEscape,
}

/// Dispatch a state name on the tokenizer.
pub(crate) fn call(tokenizer: &mut Tokenizer, name: StateName) -> State {
    use StateName::*;

    match name {
        TextStart => construct::text::start(tokenizer),
        TextBeforeCodeText => construct::text::before_code_text(tokenizer),
        TextBeforeData => construct::text::before_data(tokenizer),
        TextData => construct::text::data(tokenizer),

        LineEndingStart => construct::line_ending::start(tokenizer),
        LineEndingAfter => construct::line_ending::after(tokenizer),
        LineEndingOk => construct::line_ending::ok(tokenizer),

        CharacterEscapeStart => construct::character_escape::start(tokenizer),
        CharacterEscapeInside => construct::character_escape::inside(tokenizer),

        SpaceOrTabStart => construct::partial_space_or_tab::start(tokenizer),
        SpaceOrTabInside => construct::partial_space_or_tab::inside(tokenizer),

        WhitespaceStart => construct::partial_whitespace::start(tokenizer),

        NonLazyContinuationStart => construct::partial_non_lazy_continuation::start(tokenizer),
        NonLazyContinuationLineStart => {
            construct::partial_non_lazy_continuation::line_start(tokenizer)
        }

        CodeFencedStart => construct::code_fenced::start(tokenizer),
        CodeFencedSequenceOpen => construct::code_fenced::sequence_open(tokenizer),
        CodeFencedInfoBefore => construct::code_fenced::info_before(tokenizer),
        CodeFencedInfo => construct::code_fenced::info(tokenizer),
        CodeFencedMetaBefore => construct::code_fenced::meta_before(tokenizer),
        CodeFencedMeta => construct::code_fenced::meta(tokenizer),
        CodeFencedAtNonLazyBreak => construct::code_fenced::at_non_lazy_break(tokenizer),
        CodeFencedCloseStart => construct::code_fenced::close_start(tokenizer),
        CodeFencedCloseBefore => construct::code_fenced::close_before(tokenizer),
        CodeFencedBeforeSequenceClose => construct::code_fenced::before_sequence_close(tokenizer),
        CodeFencedSequenceClose => construct::code_fenced::sequence_close(tokenizer),
        CodeFencedSequenceCloseAfter => construct::code_fenced::sequence_close_after(tokenizer),
        CodeFencedContentBefore => construct::code_fenced::content_before(tokenizer),
        CodeFencedContentStart => construct::code_fenced::content_start(tokenizer),
        CodeFencedBeforeContentChunk => construct::code_fenced::before_content_chunk(tokenizer),
        CodeFencedContentChunk => construct::code_fenced::content_chunk(tokenizer),
        CodeFencedAfter => construct::code_fenced::after(tokenizer),

        CodeTextStart => construct::code_text::start(tokenizer),
        CodeTextSequenceOpen => construct::code_text::sequence_open(tokenizer),
        CodeTextBetween => construct::code_text::between(tokenizer),
        CodeTextData => construct::code_text::data(tokenizer),
        CodeTextSequenceClose => construct::code_text::sequence_close(tokenizer),

        HtmlTextStart => construct::html_text::start(tokenizer),
        HtmlTextOpen => construct::html_text::open(tokenizer),
        HtmlTextDeclarationOpen => construct::html_text::declaration_open(tokenizer),
        HtmlTextCommentOpenInside => construct::html_text::comment_open_inside(tokenizer),
        HtmlTextComment => construct::html_text::comment(tokenizer),
        HtmlTextCommentClose => construct::html_text::comment_close(tokenizer),
        HtmlTextCommentEnd => construct::html_text::comment_end(tokenizer),
        HtmlTextCdataOpenInside => construct::html_text::cdata_open_inside(tokenizer),
        HtmlTextCdata => construct::html_text::cdata(tokenizer),
        HtmlTextCdataClose => construct::html_text::cdata_close(tokenizer),
        HtmlTextCdataEnd => construct::html_text::cdata_end(tokenizer),
        HtmlTextDeclaration => construct::html_text::declaration(tokenizer),
        HtmlTextInstruction => construct::html_text::instruction(tokenizer),
        HtmlTextInstructionClose => construct::html_text::instruction_close(tokenizer),
        HtmlTextTagCloseStart => construct::html_text::tag_close_start(tokenizer),
        HtmlTextTagClose => construct::html_text::tag_close(tokenizer),
        HtmlTextTagCloseBetween => construct::html_text::tag_close_between(tokenizer),
        HtmlTextTagOpen => construct::html_text::tag_open(tokenizer),
        HtmlTextTagOpenBetween => construct::html_text::tag_open_between(tokenizer),
        HtmlTextTagOpenAttributeName => construct::html_text::tag_open_attribute_name(tokenizer),
        HtmlTextTagOpenAttributeNameAfter => {
            construct::html_text::tag_open_attribute_name_after(tokenizer)
        }
        HtmlTextTagOpenAttributeValueBefore => {
            construct::html_text::tag_open_attribute_value_before(tokenizer)
        }
        HtmlTextTagOpenAttributeValueQuoted => {
            construct::html_text::tag_open_attribute_value_quoted(tokenizer)
        }
        HtmlTextTagOpenAttributeValueQuotedAfter => {
            construct::html_text::tag_open_attribute_value_quoted_after(tokenizer)
        }
        HtmlTextTagOpenAttributeValueUnquoted => {
            construct::html_text::tag_open_attribute_value_unquoted(tokenizer)
        }
        HtmlTextEnd => construct::html_text::end(tokenizer),
        HtmlTextLineEndingBefore => construct::html_text::line_ending_before(tokenizer),
        HtmlTextLineEndingAfter => construct::html_text::line_ending_after(tokenizer),
        HtmlTextLineEndingAfterPrefix => construct::html_text::line_ending_after_prefix(tokenizer),

        LabelStartLinkStart => construct::label_start_link::start(tokenizer),

        LabelStartImageStart => construct::label_start_image::start(tokenizer),
        LabelStartImageOpen => construct::label_start_image::open(tokenizer),

        LabelEndStart => construct::label_end::start(tokenizer),
        LabelEndAfter => construct::label_end::after(tokenizer),
        LabelEndReferenceNotFull => construct::label_end::reference_not_full(tokenizer),
        LabelEndOk => construct::label_end::label_end_ok(tokenizer),
        LabelEndNok => construct::label_end::label_end_nok(tokenizer),
        LabelEndResourceStart => construct::label_end::resource_start(tokenizer),
        LabelEndResourceBefore => construct::label_end::resource_before(tokenizer),
        LabelEndResourceOpen => construct::label_end::resource_open(tokenizer),
        LabelEndResourceDestinationAfter => {
            construct::label_end::resource_destination_after(tokenizer)
        }
        LabelEndResourceDestinationMissing => {
            construct::label_end::resource_destination_missing(tokenizer)
        }
        LabelEndResourceBetween => construct::label_end::resource_between(tokenizer),
        LabelEndResourceTitleAfter => construct::label_end::resource_title_after(tokenizer),
        LabelEndResourceEnd => construct::label_end::resource_end(tokenizer),
        LabelEndReferenceFull => construct::label_end::reference_full(tokenizer),
        LabelEndReferenceFullAfter => construct::label_end::reference_full_after(tokenizer),
        LabelEndReferenceFullMissing => construct::label_end::reference_full_missing(tokenizer),
        LabelEndReferenceCollapsedStart => {
            construct::label_end::reference_collapsed_start(tokenizer)
        }
        LabelEndReferenceCollapsedOpen => {
            construct::label_end::reference_collapsed_open(tokenizer)
        }

        DestinationStart => construct::partial_destination::start(tokenizer),
        DestinationEnclosedBefore => construct::partial_destination::enclosed_before(tokenizer),
        DestinationEnclosed => construct::partial_destination::enclosed(tokenizer),
        DestinationEnclosedEscape => construct::partial_destination::enclosed_escape(tokenizer),
        DestinationRaw => construct::partial_destination::raw(tokenizer),
        DestinationRawEscape => construct::partial_destination::raw_escape(tokenizer),

        TitleStart => construct::partial_title::start(tokenizer),
        TitleBegin => construct::partial_title::begin(tokenizer),
        TitleAtBreak => construct::partial_title::at_break(tokenizer),
        TitleAfterEol => construct::partial_title::after_eol(tokenizer),
        TitleInside => construct::partial_title::inside(tokenizer),
        TitleEscape => construct::partial_title::escape(tokenizer),

        LabelStart => construct::partial_label::start(tokenizer),
        LabelAtBreak => construct::partial_label::at_break(tokenizer),
        LabelInside => construct::partial_label::inside(tokenizer),
        LabelEscape => construct::partial_label::escape(tokenizer),
    }
}
