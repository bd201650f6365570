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

//! Tokens → semantic updates (C3).

use crate::consts::SE;
use crate::crlf::CrlfTransformer;
use crate::token::{CommandCode, OptionCode, Token, Verb};
use tracing::warn;

/// Which side of the connection an [`OptionNegotiation`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    /// The server's own announced behaviour (WILL/WONT).
    Local,
    /// The peer's announced behaviour, as requested of the server (DO/DONT).
    Peer,
}

/// A decoded `IAC VERB OPTION` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionNegotiation {
    /// The decoded option, if recognised.
    pub option: OptionCode,
    /// The raw option byte.
    pub raw: u8,
    /// Which side this negotiation concerns.
    pub host: Host,
    /// `true` for WILL/DO, `false` for WONT/DONT.
    pub state: bool,
}

impl OptionNegotiation {
    /// The canonical affirmative reply: identical fields, unchanged.
    pub fn accept(&self) -> OptionNegotiation {
        *self
    }

    /// The canonical negative reply: same option and host, inverted state.
    pub fn refuse(&self) -> OptionNegotiation {
        OptionNegotiation {
            state: !self.state,
            ..*self
        }
    }

    fn verb(&self) -> Verb {
        match (self.host, self.state) {
            (Host::Local, true) => Verb::Will,
            (Host::Local, false) => Verb::Wont,
            (Host::Peer, true) => Verb::Do,
            (Host::Peer, false) => Verb::Dont,
        }
    }

    /// The three wire bytes `IAC VERB OPTION` this negotiation serialises to.
    pub fn to_bytes(self) -> [u8; 3] {
        [crate::consts::IAC, self.verb().to_byte(), self.raw]
    }
}

/// Output of the stream parser: one semantic event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// Decoded 7-bit ASCII text, CR/LF already normalised.
    UserData(String),
    /// An option negotiation triple.
    OptionNegotiation(OptionNegotiation),
    /// A subnegotiation closed by `IAC SE`; the payload is discarded.
    OptionSubnegotiation {
        /// The decoded option, if recognised.
        option: OptionCode,
        /// The raw option byte.
        raw: u8,
    },
    /// A command byte with no dedicated handling in this mode.
    Command {
        /// The decoded command, if recognised.
        code: CommandCode,
        /// The raw wire byte.
        raw: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    User,
    Subnegotiation { pending_option: OptionCode, pending_raw: u8 },
}

/// Consumes [`Token`]s and produces [`StreamUpdate`]s (C3).
///
/// Owns the CRLF unstuffer and the 7-bit ASCII decoder, both of which are
/// stateful across calls.
#[derive(Debug, Clone)]
pub struct StreamParser {
    mode: Mode,
    crlf: CrlfTransformer,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self {
            mode: Mode::User,
            crlf: CrlfTransformer::new(),
        }
    }
}

impl StreamParser {
    /// A fresh parser in USER mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one token, returning zero or more updates.
    pub fn feed(&mut self, token: Token) -> Vec<StreamUpdate> {
        match token {
            Token::StreamData(bytes) => self.feed_stream_data(&bytes),
            Token::Command {
                code: CommandCode::LiteralIac,
                ..
            } => {
                // IAC IAC re-enters the data path as a single 0xFF byte,
                // which the ASCII decoder then silently drops.
                self.feed_stream_data(&[0xFF])
            }
            Token::Command { code: CommandCode::SubnegotiationEnd, raw } => {
                match self.mode {
                    Mode::Subnegotiation {
                        pending_option,
                        pending_raw,
                    } => {
                        self.mode = Mode::User;
                        vec![StreamUpdate::OptionSubnegotiation {
                            option: pending_option,
                            raw: pending_raw,
                        }]
                    }
                    Mode::User => vec![StreamUpdate::Command {
                        code: CommandCode::SubnegotiationEnd,
                        raw,
                    }],
                }
            }
            Token::Command { code, raw } => vec![StreamUpdate::Command { code, raw }],
            Token::Option {
                verb: Verb::Sb,
                option,
                raw,
            } => {
                // A second SB before the matching SE overrides the pending
                // option rather than nesting; this is likely a protocol
                // error by the peer but is preserved, not rejected (see
                // DESIGN.md).
                if let Mode::Subnegotiation { pending_option, .. } = self.mode {
                    warn!(?pending_option, new_option = ?option, "peer sent SB before closing prior subnegotiation, overriding pending option");
                }
                self.mode = Mode::Subnegotiation {
                    pending_option: option,
                    pending_raw: raw,
                };
                Vec::new()
            }
            Token::Option { verb, option, raw } => {
                let host = match verb {
                    Verb::Will | Verb::Wont => Host::Peer,
                    Verb::Do | Verb::Dont => Host::Local,
                    Verb::Sb => unreachable!("handled above"),
                };
                let state = matches!(verb, Verb::Will | Verb::Do);
                vec![StreamUpdate::OptionNegotiation(OptionNegotiation {
                    option,
                    raw,
                    host,
                    state,
                })]
            }
        }
    }

    /// Feeds a batch of tokens in order, flattening their updates.
    pub fn feed_all<I: IntoIterator<Item = Token>>(&mut self, tokens: I) -> Vec<StreamUpdate> {
        tokens.into_iter().flat_map(|t| self.feed(t)).collect()
    }

    fn feed_stream_data(&mut self, bytes: &[u8]) -> Vec<StreamUpdate> {
        if matches!(self.mode, Mode::Subnegotiation { .. }) {
            // Subnegotiation payload is discarded in this revision.
            let _ = self.crlf.unstuff(bytes);
            return Vec::new();
        }
        let normalised = self.crlf.unstuff(bytes);
        let decoded: String = normalised.into_iter().filter(|&b| b < 0x80).map(|b| b as char).collect();
        if decoded.is_empty() {
            Vec::new()
        } else {
            vec![StreamUpdate::UserData(decoded)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Tokenizer;

    fn parse_all(bytes: &[u8]) -> Vec<StreamUpdate> {
        let mut tok = Tokenizer::new();
        let mut parser = StreamParser::new();
        parser.feed_all(tok.tokenize(bytes))
    }

    #[test]
    fn plain_line_decodes_to_user_data() {
        let updates = parse_all(b"abc\r\n");
        assert_eq!(updates, vec![StreamUpdate::UserData("abc\n".to_string())]);
    }

    #[test]
    fn option_symmetry_will() {
        let updates = parse_all(&[crate::consts::IAC, crate::consts::WILL, 1]);
        assert_eq!(
            updates,
            vec![StreamUpdate::OptionNegotiation(OptionNegotiation {
                option: OptionCode::Echo,
                raw: 1,
                host: Host::Peer,
                state: true,
            })]
        );
    }

    #[test]
    fn option_symmetry_dont() {
        let updates = parse_all(&[crate::consts::IAC, crate::consts::DONT, 6]);
        assert_eq!(
            updates,
            vec![StreamUpdate::OptionNegotiation(OptionNegotiation {
                option: OptionCode::TimingMark,
                raw: 6,
                host: Host::Local,
                state: false,
            })]
        );
    }

    #[test]
    fn subnegotiation_swallows_payload_and_emits_once() {
        let mut bytes = vec![crate::consts::IAC, crate::consts::SB, 42];
        bytes.extend_from_slice(b"garbage payload");
        bytes.extend_from_slice(&[crate::consts::IAC, SE]);
        let updates = parse_all(&bytes);
        assert_eq!(
            updates,
            vec![StreamUpdate::OptionSubnegotiation {
                option: OptionCode::Unknown(42),
                raw: 42,
            }]
        );
    }

    #[test]
    fn subnegotiation_override_preserves_last_option() {
        let bytes = [
            crate::consts::IAC,
            crate::consts::SB,
            1,
            crate::consts::IAC,
            crate::consts::SB,
            6,
            crate::consts::IAC,
            SE,
        ];
        let updates = parse_all(&bytes);
        assert_eq!(
            updates,
            vec![StreamUpdate::OptionSubnegotiation {
                option: OptionCode::TimingMark,
                raw: 6,
            }]
        );
    }

    #[test]
    fn iac_iac_is_dropped_not_echoed() {
        let updates = parse_all(&[b'a', crate::consts::IAC, crate::consts::IAC, b'b', b'\r', b'\n']);
        assert_eq!(
            updates,
            vec![
                StreamUpdate::UserData("a".to_string()),
                StreamUpdate::UserData("b\n".to_string()),
            ]
        );
    }

    #[test]
    fn accept_and_refuse_helpers() {
        let n = OptionNegotiation {
            option: OptionCode::Echo,
            raw: 1,
            host: Host::Peer,
            state: true,
        };
        assert_eq!(n.accept(), n);
        assert_eq!(
            n.refuse(),
            OptionNegotiation {
                state: false,
                ..n
            }
        );
    }
}
