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

use mdlex::{Event, Lexer};

fn events() -> Vec<Event> {
    let mut lexer = Lexer::new("[a](b \"c\") `d` <!--e-->");
    lexer.define("a");
    lexer.tokenize()
}

#[test]
fn events_roundtrip_json() {
    let before = events();
    let json = serde_json::to_string(&before).unwrap();
    let after: Vec<Event> = serde_json::from_str(&json).unwrap();
    assert_eq!(before, after);
}

#[test]
fn events_roundtrip_bincode() {
    let before = events();
    let bytes = bincode::serialize(&before).unwrap();
    let after: Vec<Event> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(before, after);
}
