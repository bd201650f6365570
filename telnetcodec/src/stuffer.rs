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

//! Semantic outbound items → wire bytes (C4), the inverse of tokenizing +
//! parsing.

use crate::consts::IAC;
use crate::crlf::stuff as crlf_stuff;
use crate::error::{CodecError, CodecResult};
use crate::parser::OptionNegotiation;

/// Serialises outbound semantic items to wire bytes.
///
/// Stateless: unlike the tokenizer/parser/unstuffer, nothing here needs to
/// persist across calls, so this is a set of free functions rather than a
/// struct with internal state.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamStuffer;

impl StreamStuffer {
    /// A stuffer. Carries no state; provided for symmetry with the other
    /// per-connection components.
    pub fn new() -> Self {
        Self
    }

    /// ASCII-encodes `s`, CRLF-stuffs it, then IAC-stuffs the result
    /// (0xFF → 0xFF 0xFF). IAC-stuffing is a no-op for valid ASCII input but
    /// is required for correctness per the wire format.
    pub fn stuff_user_data(&self, s: &str) -> CodecResult<Vec<u8>> {
        for (index, b) in s.bytes().enumerate() {
            if b >= 0x80 {
                return Err(CodecError::EncodingError { byte: b, index });
            }
        }
        let crlf_stuffed = crlf_stuff(s.as_bytes());
        let mut out = Vec::with_capacity(crlf_stuffed.len());
        for b in crlf_stuffed {
            out.push(b);
            if b == IAC {
                out.push(IAC);
            }
        }
        Ok(out)
    }

    /// Serialises an option negotiation reply to its three wire bytes.
    pub fn stuff_option_negotiation(&self, negotiation: OptionNegotiation) -> Vec<u8> {
        negotiation.to_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Host;
    use crate::token::OptionCode;

    #[test]
    fn stuffs_user_data_with_crlf() {
        let s = StreamStuffer::new();
        assert_eq!(s.stuff_user_data("abc\n").unwrap(), b"abc\r\n");
    }

    #[test]
    fn non_ascii_is_rejected() {
        let s = StreamStuffer::new();
        let err = s.stuff_user_data("héllo").unwrap_err();
        assert!(matches!(err, CodecError::EncodingError { .. }));
    }

    #[test]
    fn option_negotiation_serialises_to_iac_verb_option() {
        let s = StreamStuffer::new();
        let n = OptionNegotiation {
            option: OptionCode::Echo,
            raw: 1,
            host: Host::Local,
            state: true,
        };
        assert_eq!(s.stuff_option_negotiation(n), vec![IAC, crate::consts::WILL, 1]);
    }

    #[test]
    fn refuse_peer_will_is_dont() {
        let s = StreamStuffer::new();
        let n = OptionNegotiation {
            option: OptionCode::Unknown(42),
            raw: 42,
            host: Host::Peer,
            state: true,
        }
        .refuse();
        assert_eq!(s.stuff_option_negotiation(n), vec![IAC, crate::consts::DONT, 42]);
    }
}
