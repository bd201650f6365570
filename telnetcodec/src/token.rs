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

//! Framing tokens produced by the tokenizer (C2) and consumed by the stream
//! parser (C3).

use crate::consts::option::{ECHO, TIMING_MARK};
use crate::consts::*;

/// The verb half of an `IAC VERB OPTION` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Begin subnegotiation.
    Sb,
    /// "I will".
    Will,
    /// "I won't".
    Wont,
    /// "Please do".
    Do,
    /// "Please don't".
    Dont,
}

impl Verb {
    /// Maps a verb back to its wire byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Verb::Sb => SB,
            Verb::Will => WILL,
            Verb::Wont => WONT,
            Verb::Do => DO,
            Verb::Dont => DONT,
        }
    }

    pub(crate) fn from_byte(b: u8) -> Option<Verb> {
        match b {
            SB => Some(Verb::Sb),
            WILL => Some(Verb::Will),
            WONT => Some(Verb::Wont),
            DO => Some(Verb::Do),
            DONT => Some(Verb::Dont),
            _ => None,
        }
    }
}

/// A single command byte following `IAC`, for commands that are not one of
/// the negotiation verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// `SE` (240) — subnegotiation end.
    SubnegotiationEnd,
    /// `NOP` (241).
    NoOperation,
    /// `DM` (242) — data mark.
    DataMark,
    /// `BRK` (243).
    Break,
    /// `IP` (244) — interrupt process.
    InterruptProcess,
    /// `AO` (245) — abort output.
    AbortOutput,
    /// `AYT` (246) — are you there.
    AreYouThere,
    /// `EC` (247) — erase character.
    EraseCharacter,
    /// `EL` (248) — erase line.
    EraseLine,
    /// `GA` (249) — go ahead.
    GoAhead,
    /// `IAC` (255) appearing in command position: a literal escaped 0xFF.
    LiteralIac,
    /// Any other byte; preserved verbatim, never rejected.
    Unknown(u8),
}

impl CommandCode {
    pub(crate) fn from_byte(b: u8) -> CommandCode {
        match b {
            SE => CommandCode::SubnegotiationEnd,
            NOP => CommandCode::NoOperation,
            DM => CommandCode::DataMark,
            BRK => CommandCode::Break,
            IP => CommandCode::InterruptProcess,
            AO => CommandCode::AbortOutput,
            AYT => CommandCode::AreYouThere,
            EC => CommandCode::EraseCharacter,
            EL => CommandCode::EraseLine,
            GA => CommandCode::GoAhead,
            IAC => CommandCode::LiteralIac,
            other => CommandCode::Unknown(other),
        }
    }
}

/// A Telnet option byte, interpreted where this crate recognises it.
///
/// Per the data model, unknown option bytes are preserved as raw integers —
/// they are never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCode {
    /// ECHO (1).
    Echo,
    /// Timing Mark (6).
    TimingMark,
    /// Any other option byte.
    Unknown(u8),
}

impl OptionCode {
    pub(crate) fn from_byte(b: u8) -> OptionCode {
        match b {
            ECHO => OptionCode::Echo,
            TIMING_MARK => OptionCode::TimingMark,
            other => OptionCode::Unknown(other),
        }
    }
}

/// Output of the tokenizer: one framing unit of the Telnet byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of bytes from the data channel, IAC-unescaped at this boundary.
    StreamData(Vec<u8>),
    /// A single command byte following IAC, not one of SB/WILL/WONT/DO/DONT.
    Command {
        /// The decoded command, if recognised.
        code: CommandCode,
        /// The raw wire byte.
        raw: u8,
    },
    /// The triple `(IAC, verb, option)`.
    Option {
        /// Which negotiation verb.
        verb: Verb,
        /// The decoded option, if recognised.
        option: OptionCode,
        /// The raw option byte.
        raw: u8,
    },
}

/// Converts the byte stream into [`Token`]s, one call at a time, tolerating
/// arbitrary splits between calls (C2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    state: TokenizerState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    #[default]
    Data,
    Command,
    Option(Verb),
}

impl Tokenizer {
    /// A fresh tokenizer in the DATA state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `data`, advancing the tokenizer's internal state. Safe to
    /// call repeatedly with arbitrarily small (including empty) chunks of a
    /// larger stream.
    pub fn tokenize(&mut self, data: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = data;
        while !rest.is_empty() {
            match self.state {
                TokenizerState::Data => match rest.iter().position(|&b| b == IAC) {
                    Some(0) => {
                        rest = &rest[1..];
                        self.state = TokenizerState::Command;
                    }
                    Some(i) => {
                        tokens.push(Token::StreamData(rest[..i].to_vec()));
                        rest = &rest[i + 1..];
                        self.state = TokenizerState::Command;
                    }
                    None => {
                        tokens.push(Token::StreamData(rest.to_vec()));
                        rest = &[];
                    }
                },
                TokenizerState::Command => {
                    let c = rest[0];
                    rest = &rest[1..];
                    if let Some(verb) = Verb::from_byte(c) {
                        self.state = TokenizerState::Option(verb);
                    } else {
                        tokens.push(Token::Command {
                            code: CommandCode::from_byte(c),
                            raw: c,
                        });
                        self.state = TokenizerState::Data;
                    }
                }
                TokenizerState::Option(verb) => {
                    let o = rest[0];
                    rest = &rest[1..];
                    tokens.push(Token::Option {
                        verb,
                        option: OptionCode::from_byte(o),
                        raw: o,
                    });
                    self.state = TokenizerState::Data;
                }
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_data_run() {
        let mut t = Tokenizer::new();
        assert_eq!(t.tokenize(b"abc"), vec![Token::StreamData(b"abc".to_vec())]);
    }

    #[test]
    fn iac_iac_emits_literal_iac_command() {
        let mut t = Tokenizer::new();
        let toks = t.tokenize(&[b'a', IAC, IAC, b'b']);
        assert_eq!(
            toks,
            vec![
                Token::StreamData(vec![b'a']),
                Token::Command {
                    code: CommandCode::LiteralIac,
                    raw: IAC,
                },
                Token::StreamData(vec![b'b']),
            ]
        );
    }

    #[test]
    fn do_option_triple() {
        let mut t = Tokenizer::new();
        let toks = t.tokenize(&[IAC, DO, 1]);
        assert_eq!(
            toks,
            vec![Token::Option {
                verb: Verb::Do,
                option: OptionCode::Echo,
                raw: 1,
            }]
        );
    }

    #[test]
    fn split_across_every_byte_boundary_is_resumable() {
        let whole = [b'a', b'b', IAC, DO, 1, b'c', IAC, NOP];
        let mut fresh = Tokenizer::new();
        let expected = fresh.tokenize(&whole);

        let mut incremental = Tokenizer::new();
        let mut got = Vec::new();
        for byte in whole {
            got.extend(incremental.tokenize(&[byte]));
        }
        assert_eq!(got, expected);
    }
}
