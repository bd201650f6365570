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

//! Errors surfaced by the prompted line editor.

use redclay_telnet::CodecError;
use thiserror::Error;

/// The four error kinds the Telnet core can raise.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// The peer sent EOF. Not retried; the caller tears the connection down.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Outbound `UserData` contained a byte outside 7-bit ASCII.
    #[error("encoding error: {0}")]
    EncodingError(#[from] CodecError),

    /// Reserved for future strict validation. Current revision is
    /// "garbage in, garbage out" for malformed subnegotiations.
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The underlying socket I/O failed.
    #[error("transport error: {0}")]
    TransportError(#[from] std::io::Error),
}

impl TerminalError {
    /// Whether the connection should simply be torn down (no retry makes
    /// sense at this layer).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TerminalError::ConnectionClosed | TerminalError::TransportError(_)
        )
    }
}

/// Convenience alias for results returned by this crate.
pub type TerminalResult<T> = Result<T, TerminalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_closed_is_fatal() {
        assert!(TerminalError::ConnectionClosed.is_fatal());
    }

    #[test]
    fn protocol_error_is_not_fatal() {
        assert!(!TerminalError::ProtocolError("bad subnegotiation".into()).is_fatal());
    }

    #[test]
    fn display_messages_are_informative() {
        assert_eq!(
            TerminalError::ProtocolError("x".into()).to_string(),
            "protocol error: x"
        );
    }
}
