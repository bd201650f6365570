//
// Copyright 2026 redclay contributors. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Accumulates decoded user text into logical lines with out-of-band
//! annotations (C5).

use std::collections::VecDeque;

/// An out-of-band event attached to a line, delivered alongside it (or on
/// its own if it arrives while no line is in progress).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// A local Timing Mark negotiation completed; the caller owes the peer
    /// a `WILL TM` reply once this annotation is popped.
    TimingMark,
}

/// Queue of completed `(annotations, line)` pairs plus the in-progress
/// scratch accumulator.
///
/// Invariants: any queued pair has `line` ending in `'\n'`, or `line` is
/// empty (an annotation-only record); the scratch never contains `'\n'`
/// except as the final byte just before promotion.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    lines: VecDeque<(Vec<Annotation>, String)>,
    chars: String,
    annotations: Vec<Annotation>,
}

impl LineBuffer {
    /// An empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends decoded text, promoting every complete line it contains.
    /// Any trailing partial line remains in the scratch.
    pub fn append(&mut self, mut text: &str) {
        while let Some(idx) = text.find('\n') {
            self.chars.push_str(&text[..=idx]);
            text = &text[idx + 1..];
            self.promote();
        }
        self.chars.push_str(text);
    }

    /// Attaches an annotation to the in-progress line. If no line is in
    /// progress, the annotation is delivered immediately as a line-less
    /// record — this is what lets a Timing Mark that arrives right after an
    /// interrupt-triggered `clear` still surface its deferred effect.
    pub fn annotate(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
        if self.chars.is_empty() {
            self.promote();
        }
    }

    /// Whether a completed line (or annotation-only record) is ready.
    pub fn has_line(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Pops the oldest completed record. Returns an empty annotation list
    /// and `None` if nothing is queued.
    pub fn pop(&mut self) -> (Vec<Annotation>, Option<String>) {
        match self.lines.pop_front() {
            Some((annotations, line)) => (annotations, Some(line)),
            None => (Vec::new(), None),
        }
    }

    /// Drops everything queued and the in-progress scratch. The annotation
    /// accumulator survives so a Timing Mark that lands right after this
    /// clear (e.g. following an interrupt) still reaches the caller.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.chars.clear();
    }

    fn promote(&mut self) {
        let annotations = std::mem::take(&mut self.annotations);
        let chars = std::mem::take(&mut self.chars);
        self.lines.push_back((annotations, chars));
    }
}
