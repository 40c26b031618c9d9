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

use mdlex::{Event, Kind, Lexer, Name, Options};

/// Every enter must close with a matching exit, innermost first.
fn assert_balanced(events: &[Event]) {
    let mut stack = Vec::new();
    for event in events {
        match event.kind {
            Kind::Enter => stack.push(event.name),
            Kind::Exit => assert_eq!(stack.pop(), Some(event.name), "mismatched exit"),
        }
    }
    assert!(stack.is_empty(), "unclosed tokens: {stack:?}");
}

/// The source text of every token with the given name, in order.
fn slices<'a>(text: &'a str, events: &[Event], name: Name) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut open = Vec::new();
    for event in events {
        match event.kind {
            Kind::Enter => {
                if event.name == name {
                    open.push(event.point.offset);
                }
            }
            Kind::Exit => {
                if event.name == name {
                    let start = open.pop().unwrap();
                    out.push(&text[start..event.point.offset]);
                }
            }
        }
    }
    out
}

fn count_enters(events: &[Event], name: Name) -> usize {
    events
        .iter()
        .filter(|event| event.kind == Kind::Enter && event.name == name)
        .count()
}

#[test]
fn plain_text_is_one_data_token() {
    let text = "just some text.";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Data), vec![text]);
}

#[test]
fn code_text_basic() {
    let text = "a `b` c";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::CodeText), vec!["`b`"]);
    assert_eq!(slices(text, &events, Name::CodeTextData), vec!["b"]);
    assert_eq!(slices(text, &events, Name::Data), vec!["a ", " c"]);
}

#[test]
fn code_text_close_needs_exact_length() {
    // The single backtick inside is content, not a closer.
    let text = "``a`b``";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::CodeText), vec![text]);
    assert_eq!(slices(text, &events, Name::CodeTextData), vec!["a`b"]);
}

#[test]
fn code_text_unclosed_is_data() {
    let text = "`a";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeText), 0);
    assert_eq!(slices(text, &events, Name::Data), vec!["`a"]);
}

#[test]
fn code_text_padding_stripped_around_content() {
    let text = "` a `";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::CodeTextPadding), vec![" ", " "]);
    assert_eq!(slices(text, &events, Name::CodeTextData), vec!["a"]);

    // All whitespace: nothing to pad around.
    let text = "`  `";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeTextPadding), 0);
}

#[test]
fn escaped_backtick_does_not_block_reopening() {
    // The escape eats the first backtick; the one right after it may
    // still open a span even though the previous code is a backtick.
    let text = "\\``a`";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CharacterEscape), 1);
    assert_eq!(slices(text, &events, Name::CodeText), vec!["`a`"]);
    assert_eq!(slices(text, &events, Name::CodeTextData), vec!["a"]);
}

#[test]
fn character_escape_only_punctuation() {
    let text = "a\\*b \\q";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::CharacterEscape), vec!["\\*"]);
    assert_eq!(slices(text, &events, Name::CharacterEscapeValue), vec!["*"]);
}

#[test]
fn html_text_tag_with_attributes() {
    let text = "a <b c=\"d\" e> f";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::HtmlText), vec!["<b c=\"d\" e>"]);
}

#[test]
fn html_text_comment_spans_lines() {
    let text = "<!--a\nb-->";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::HtmlText), vec![text]);
    assert_eq!(count_enters(&events, Name::LineEnding), 1);
    assert_eq!(slices(text, &events, Name::HtmlTextData), vec!["<!--a", "b-->"]);
}

#[test]
fn html_text_empty_comment() {
    let text = "<!-->";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::HtmlText), vec!["<!-->"]);
}

#[test]
fn html_text_blank_line_rejects() {
    let text = "<!--a\n\nb-->";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::HtmlText), 0);
}

#[test]
fn html_text_bad_tag_is_data() {
    let text = "a < b";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::HtmlText), 0);
    assert_eq!(slices(text, &events, Name::Data), vec!["a < b"]);
}

#[test]
fn code_fenced_with_info_and_meta() {
    let text = "```rust ignore\nlet a = 1;\n```";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 1);
    assert_eq!(slices(text, &events, Name::CodeFencedFenceInfo), vec!["rust"]);
    assert_eq!(slices(text, &events, Name::CodeFencedFenceMeta), vec!["ignore"]);
    assert_eq!(slices(text, &events, Name::CodeFlowValue), vec!["let a = 1;"]);
    assert_eq!(count_enters(&events, Name::CodeFencedFence), 2);
}

#[test]
fn code_fenced_close_must_be_long_enough() {
    let text = "````\n```\n````";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 1);
    assert_eq!(slices(text, &events, Name::CodeFlowValue), vec!["```"]);
}

#[test]
fn code_fenced_unclosed_runs_to_end() {
    let text = "```\na";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 1);
    assert_eq!(slices(text, &events, Name::CodeFlowValue), vec!["a"]);
}

#[test]
fn code_fenced_empty_is_rejected() {
    let text = "~~~js\n\n~~~";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 0);
}

#[test]
fn code_fenced_backtick_rejection_does_not_become_code_text() {
    // The fence gets far enough to be concrete, so its backticks are
    // not retried as a code span.
    let text = "```\n\n```";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 0);
    assert_eq!(count_enters(&events, Name::CodeText), 0);
}

#[test]
fn code_fenced_indented_at_document_start() {
    // Indentation on the very first line counts as a line prefix, the
    // same as indentation after a line ending.
    let text = "  ```js\na\n```";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 1);
    assert_eq!(slices(text, &events, Name::CodeFencedFenceInfo), vec!["js"]);
    assert_eq!(slices(text, &events, Name::LinePrefix)[0], "  ");
}

#[test]
fn document_start_indentation_is_line_prefix() {
    let text = "  a";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::LinePrefix), vec!["  "]);
    assert_eq!(slices(text, &events, Name::Data), vec!["a"]);
}

#[test]
fn code_fenced_needs_line_start() {
    let text = "a ```\nb\n```";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 0);
}

#[test]
fn code_fenced_two_markers_may_be_code_text() {
    // Too short for a fence, fine for a span.
    let text = "``a``";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 0);
    assert_eq!(slices(text, &events, Name::CodeText), vec!["``a``"]);
}

#[test]
fn code_fenced_lazy_line_ends_content() {
    let text = "```\na\nb\n```";
    let mut lexer = Lexer::new(text);
    lexer.set_lazy(3);
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeFenced), 1);
    // Line 3 belongs to a container, so the block ends after line 2 and
    // the would-be closing fence is plain text.
    assert_eq!(slices(text, &events, Name::CodeFlowValue), vec!["a"]);
}

#[test]
fn interrupts_needs_an_opening_fence() {
    assert!(Lexer::new("```js").interrupts());
    assert!(Lexer::new("~~~").interrupts());
    assert!(!Lexer::new("``js").interrupts());
    assert!(!Lexer::new("a```").interrupts());
    assert!(!Lexer::new("text").interrupts());
}

#[test]
fn link_with_resource() {
    let text = "[a](b \"c\")";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
    assert_eq!(slices(text, &events, Name::LabelText), vec!["a"]);
    assert_eq!(
        slices(text, &events, Name::ResourceDestinationString),
        vec!["b"]
    );
    assert_eq!(slices(text, &events, Name::ResourceTitleString), vec!["c"]);
}

#[test]
fn image_with_resource() {
    let text = "![a](b)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Image), vec![text]);
    assert_eq!(slices(text, &events, Name::LabelText), vec!["a"]);
}

#[test]
fn link_enclosed_destination() {
    let text = "[a](<b c>)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
    assert_eq!(
        slices(text, &events, Name::ResourceDestinationString),
        vec!["b c"]
    );
}

#[test]
fn unmatched_brackets_demote_to_data() {
    let text = "![a] b";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::Image), 0);
    // Everything merges back into one data token.
    assert_eq!(slices(text, &events, Name::Data), vec![text]);
}

#[test]
fn links_do_not_nest() {
    let text = "[a [b](c) d](e)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    // The inner link wins; the outer opener is inactive by the time its
    // `]` arrives.
    assert_eq!(slices(text, &events, Name::Link), vec!["[b](c)"]);
}

#[test]
fn balanced_opener_is_not_retried() {
    let text = "[a]b [c](d)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec!["[c](d)"]);
    assert_eq!(slices(text, &events, Name::LabelText), vec!["c"]);
}

#[test]
fn shortcut_reference_needs_definition() {
    let events = Lexer::new("[a]").tokenize();
    assert_eq!(count_enters(&events, Name::Link), 0);

    let mut lexer = Lexer::new("[a]");
    lexer.define("a");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::Link), 1);
}

#[test]
fn definitions_match_case_insensitively_and_collapsed() {
    let text = "[Foo  Bar]";
    let mut lexer = Lexer::new(text);
    lexer.define("foo bar");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
}

#[test]
fn full_reference() {
    let text = "[a][b]";
    let mut lexer = Lexer::new(text);
    lexer.define("b");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
    assert_eq!(slices(text, &events, Name::ReferenceString), vec!["b"]);
}

#[test]
fn undefined_full_reference_falls_back_to_shortcut() {
    // `[a]` is defined, `[b]` is not: the label end resolves `[a]` as a
    // shortcut and leaves `[b]` alone.
    let text = "[a][b]";
    let mut lexer = Lexer::new(text);
    lexer.define("a");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec!["[a]"]);
    assert_eq!(count_enters(&events, Name::ReferenceString), 0);
}

#[test]
fn collapsed_reference() {
    let text = "[a][]";
    let mut lexer = Lexer::new(text);
    lexer.define("a");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
    assert_eq!(count_enters(&events, Name::Reference), 1);
    assert_eq!(count_enters(&events, Name::ReferenceString), 0);
}

#[test]
fn failed_resource_falls_back_when_defined() {
    // `](` with a broken resource still resolves if the label is
    // defined; the parenthesis text stays outside the link.
    let text = "[a](<";
    let mut lexer = Lexer::new(text);
    lexer.define("a");
    let events = lexer.tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec!["[a]"]);
}

#[test]
fn escaped_bracket_does_not_open() {
    let text = "\\[a](b)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::Link), 0);
    assert_eq!(count_enters(&events, Name::CharacterEscape), 1);
}

#[test]
fn link_may_contain_code_and_html() {
    let text = "[`a` <b>](c)";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Link), vec![text]);
    assert_eq!(slices(text, &events, Name::CodeText), vec!["`a`"]);
    assert_eq!(slices(text, &events, Name::HtmlText), vec!["<b>"]);
}

#[test]
fn reference_label_rejects_blank_line() {
    let mut lexer = Lexer::new("[a][b\n\nc]");
    lexer.define("a");
    let events = lexer.tokenize();
    assert_balanced(&events);
    // The full reference fails, the shortcut on `[a]` still resolves.
    assert_eq!(count_enters(&events, Name::Link), 1);
    assert_eq!(count_enters(&events, Name::ReferenceString), 0);
}

#[test]
fn line_endings_and_positions() {
    let text = "a\r\nb";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::LineEnding), vec!["\r\n"]);
    let last = events.last().unwrap();
    assert_eq!(last.point.line, 2);
    assert_eq!(last.point.offset, text.len());
}

#[test]
fn tab_expansion_keeps_byte_offsets() {
    let text = "a\t`b`";
    let events = Lexer::new(text).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::CodeText), vec!["`b`"]);
    // Every offset must sit on a char boundary of the original text.
    for event in &events {
        assert!(text.is_char_boundary(event.point.offset));
    }
}

#[test]
fn lexer_slice_matches_offsets() {
    let text = "a `b` c";
    let lexer = Lexer::new(text);
    let events = lexer.tokenize();
    let enter = events
        .iter()
        .position(|e| e.kind == Kind::Enter && e.name == Name::CodeText)
        .unwrap();
    let exit = events
        .iter()
        .position(|e| e.kind == Kind::Exit && e.name == Name::CodeText)
        .unwrap();
    assert_eq!(lexer.slice(&events[enter], &events[exit]), "`b`");
}

#[test]
fn options_disable_construct_families() {
    let text = "`a` [b](c) <d>";
    let events =
        Lexer::new_ext(text, Options::ENABLE_CODE_TEXT).tokenize();
    assert_balanced(&events);
    assert_eq!(count_enters(&events, Name::CodeText), 1);
    assert_eq!(count_enters(&events, Name::Link), 0);
    assert_eq!(count_enters(&events, Name::HtmlText), 0);

    let events = Lexer::new_ext(text, Options::empty()).tokenize();
    assert_balanced(&events);
    assert_eq!(slices(text, &events, Name::Data), vec![text]);
}

#[test]
fn tokenize_twice_is_stable() {
    let mut lexer = Lexer::new("[a](b) `c` <!--d-->");
    lexer.define("a");
    let first = lexer.tokenize();
    let second = lexer.tokenize();
    assert_eq!(first, second);
}
