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

//! Errors produced by the wire-level Telnet framing components.

use thiserror::Error;

/// Failures raised while encoding/decoding the Telnet wire format.
///
/// This crate only ever raises the encoding variant: the tokenizer and
/// parser are "garbage in, garbage out" by design (unknown command and
/// option bytes are preserved as raw integers, never rejected).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Outbound `UserData` contained a byte outside 7-bit ASCII.
    #[error("outbound user data contains non-ASCII byte 0x{byte:02x} at index {index}")]
    EncodingError {
        /// The offending byte.
        byte: u8,
        /// Its index within the string that was being encoded.
        index: usize,
    },
}

/// Convenience alias for results returned by this crate.
pub type CodecResult<T> = Result<T, CodecError>;
