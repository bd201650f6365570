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

//! Byte-fuzz properties for the wire framing layer (P1-P3).

use proptest::prelude::*;
use redclay_telnet::{CrlfTransformer, Tokenizer};

/// Splits `data` into arbitrary, possibly-empty chunks according to `cuts`,
/// a sequence of split points each taken modulo the remaining length.
fn split_at(data: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut rest = data;
    for &cut in cuts {
        if rest.is_empty() {
            break;
        }
        let at = cut % (rest.len() + 1);
        chunks.push(rest[..at].to_vec());
        rest = &rest[at..];
    }
    chunks.push(rest.to_vec());
    chunks
}

proptest! {
    /// P1: tokenizing any partition of a byte sequence, concatenated,
    /// equals tokenizing the whole sequence at once.
    #[test]
    fn p1_tokenizer_resumability(data in prop::collection::vec(any::<u8>(), 0..256), cuts in prop::collection::vec(any::<usize>(), 0..16)) {
        let mut fresh = Tokenizer::new();
        let expected = fresh.tokenize(&data);

        let mut incremental = Tokenizer::new();
        let mut got = Vec::new();
        for chunk in split_at(&data, &cuts) {
            got.extend(incremental.tokenize(&chunk));
        }
        prop_assert_eq!(got, expected);
    }

    /// P2: for ASCII strings without CR, stuffing then unstuffing is the
    /// identity.
    #[test]
    fn p2_crlf_round_trip(s in "[ -~\\n]{0,200}") {
        prop_assume!(!s.contains('\r'));
        let stuffed = redclay_telnet::crlf::stuff(s.as_bytes());
        let mut t = CrlfTransformer::new();
        let round_tripped = t.unstuff(&stuffed);
        prop_assert_eq!(round_tripped, s.into_bytes());
    }

    /// P3: the stuffer's IAC-stuffing step never leaves an unpaired 0xFF in
    /// its output for ASCII input.
    #[test]
    fn p3_iac_escape_inertia(s in "[ -~\\n]{0,200}") {
        let stuffer = redclay_telnet::StreamStuffer::new();
        if let Ok(bytes) = stuffer.stuff_user_data(&s) {
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] == 0xFF {
                    prop_assert!(i + 1 < bytes.len() && bytes[i + 1] == 0xFF);
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }
}
