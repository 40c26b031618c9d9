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

//! The event stream: flat enter/exit pairs over named token types, each
//! annotated with a position into the original input.

/// A position in the input.
///
/// `offset` is a byte offset into the original string and is what
/// consumers should use to slice token text. `index` counts preprocessed
/// codes (virtual spaces from tab expansion have an `index` but occupy
/// zero bytes, so they never advance `offset`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Index into the preprocessed code sequence.
    pub index: usize,
    /// Byte offset into the original input.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// Whether an event opens or closes a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// A token starts here. The point is the start position.
    Enter,
    /// The innermost open token ends here. The point is the end position.
    Exit,
}

bitflags::bitflags! {
    /// Marks carried on the enter events of label openers.
    ///
    /// These are set by in-place mutation of already-emitted events, which
    /// is exactly why they survive the restore of a failed attempt:
    /// restore truncates events appended after a snapshot but never undoes
    /// mutation of earlier ones.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EventFlags: u8 {
        /// The opener was matched (or definitively rejected) by a label
        /// end. Once set, never unset.
        const BALANCED = 1 << 0;
        /// The opener sits inside a resolved link and cannot open another
        /// one.
        const INACTIVE = 1 << 1;
    }
}

/// Token types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Name {
    /// Plain text with no construct meaning. Adjacent data tokens are
    /// merged after tokenizing, but label demotion can still leave runs
    /// of them.
    Data,
    /// A line ending (`\n`, `\r`, or `\r\n` as one token).
    LineEnding,
    /// Indentation at the start of a line.
    LinePrefix,
    /// Trailing whitespace inside a resource, before a line ending.
    LineSuffix,
    /// Whitespace between parts of a fence line or resource.
    Whitespace,
    /// A single space or tab inside a code span.
    Space,

    /// A backslash escape: marker plus value.
    CharacterEscape,
    /// The `\` of an escape.
    CharacterEscapeMarker,
    /// The escaped punctuation character.
    CharacterEscapeValue,

    /// A whole fenced code block.
    CodeFenced,
    /// An opening or closing fence line.
    CodeFencedFence,
    /// The run of fence markers.
    CodeFencedFenceSequence,
    /// The info word after the opening sequence.
    CodeFencedFenceInfo,
    /// Everything after the info word on the opening fence line.
    CodeFencedFenceMeta,
    /// One line of code block content.
    CodeFlowValue,

    /// A whole code span.
    CodeText,
    /// Code span content.
    CodeTextData,
    /// The single stripped leading/trailing space or line ending.
    CodeTextPadding,
    /// An opening or closing backtick run.
    CodeTextSequence,

    /// A whole inline HTML construct.
    HtmlText,
    /// A chunk of inline HTML between line endings.
    HtmlTextData,

    /// A resolved link.
    Link,
    /// A resolved image.
    Image,
    /// The label part of a resolved link or image, brackets included.
    Label,
    /// The text inside the label of a resolved link or image.
    LabelText,
    /// An (as yet unresolved) `[` opener.
    LabelLink,
    /// An (as yet unresolved) `![` opener.
    LabelImage,
    /// The `!` of an image opener.
    LabelImageMarker,
    /// A `[` or `]`.
    LabelMarker,
    /// A `]` closer, before resolution.
    LabelEnd,

    /// A whole `(destination "title")` resource.
    Resource,
    /// The `(` or `)` of a resource.
    ResourceMarker,
    /// The destination of a resource.
    ResourceDestination,
    /// An enclosed (`<…>`) destination.
    ResourceDestinationLiteral,
    /// The `<` or `>` of an enclosed destination.
    ResourceDestinationLiteralMarker,
    /// A raw (unenclosed) destination.
    ResourceDestinationRaw,
    /// The text of a destination.
    ResourceDestinationString,
    /// A resource title, quotes included.
    ResourceTitle,
    /// The opening or closing quote of a title.
    ResourceTitleMarker,
    /// The text of a title.
    ResourceTitleString,

    /// A whole `[label]` or `[]` reference.
    Reference,
    /// The `[` or `]` of a reference.
    ReferenceMarker,
    /// The text of a full reference.
    ReferenceString,
}

/// One event. Tokens are spans between an `Enter` and the matching
/// `Exit`; the stream is flat, nesting is implied by pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind: Kind,
    pub name: Name,
    pub point: Point,
    pub flags: EventFlags,
}

impl Event {
    pub(crate) fn new(kind: Kind, name: Name, point: Point) -> Self {
        Event {
            kind,
            name,
            point,
            flags: EventFlags::empty(),
        }
    }
}
