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

//! The `![` that may open an image.

use crate::event::Name;
use crate::preprocess::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Construct, Tokenizer};

pub(crate) static LABEL_START_IMAGE: Construct = Construct {
    name: "labelStartImage",
    start: StateName::LabelStartImageStart,
    resolve_all: Some(crate::construct::label_end::resolve_all),
    ..Construct::DEFAULT
};

pub(crate) fn start(tokenizer: &mut Tokenizer) -> State {
    debug_assert_eq!(tokenizer.current, Code::Char('!'));
    tokenizer.enter(Name::LabelImage);
    tokenizer.enter(Name::LabelImageMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelImageMarker);
    State::Next(StateName::LabelStartImageOpen)
}

pub(crate) fn open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('[') {
        tokenizer.enter(Name::LabelMarker);
        tokenizer.consume();
        tokenizer.exit(Name::LabelMarker);
        tokenizer.exit(Name::LabelImage);
        State::Ok
    } else {
        State::Nok
    }
}
