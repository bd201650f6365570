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

//! RFC 854/855 Telnet wire framing: tokenizer, stream parser, CRLF
//! transform, and stuffer.
//!
//! This crate is the byte-accurate core described by the protocol layer: it
//! has no transport of its own and no concept of a TCP connection. Every
//! component here is a purely synchronous state machine — see
//! `redclay_terminal` for the async layer that drives these over a socket.

pub mod consts;
pub mod crlf;
pub mod error;
pub mod parser;
pub mod stuffer;
pub mod token;

pub use crlf::CrlfTransformer;
pub use error::{CodecError, CodecResult};
pub use parser::{Host, OptionNegotiation, StreamParser, StreamUpdate};
pub use stuffer::StreamStuffer;
pub use token::{CommandCode, OptionCode, Token, Tokenizer, Verb};
