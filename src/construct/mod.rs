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

//! The grammar: one module per construct, plus `partial_*` fragments
//! that other constructs drive and that are never attempted on their
//! own. `text` is the driver that decides which construct to attempt at
//! each break.

pub(crate) mod character_escape;
pub(crate) mod code_fenced;
pub(crate) mod code_text;
pub(crate) mod html_text;
pub(crate) mod label_end;
pub(crate) mod label_start_image;
pub(crate) mod label_start_link;
pub(crate) mod line_ending;
pub(crate) mod partial_destination;
pub(crate) mod partial_label;
pub(crate) mod partial_non_lazy_continuation;
pub(crate) mod partial_space_or_tab;
pub(crate) mod partial_title;
pub(crate) mod partial_whitespace;
pub(crate) mod text;
