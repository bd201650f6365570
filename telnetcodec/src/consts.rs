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

//! Wire-level byte constants for RFC 854/855 Telnet framing.

/// Interpret As Command — the Telnet escape byte.
pub const IAC: u8 = 255;
/// Subnegotiation end.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// Data mark (end of urgent data).
pub const DM: u8 = 242;
/// Break.
pub const BRK: u8 = 243;
/// Interrupt process.
pub const IP: u8 = 244;
/// Abort output.
pub const AO: u8 = 245;
/// Are you there.
pub const AYT: u8 = 246;
/// Erase character.
pub const EC: u8 = 247;
/// Erase line.
pub const EL: u8 = 248;
/// Go ahead.
pub const GA: u8 = 249;
/// Subnegotiation begin.
pub const SB: u8 = 250;
/// Will.
pub const WILL: u8 = 251;
/// Wont.
pub const WONT: u8 = 252;
/// Do.
pub const DO: u8 = 253;
/// Dont.
pub const DONT: u8 = 254;

/// Carriage return.
pub const CR: u8 = 0x0D;
/// Line feed.
pub const LF: u8 = 0x0A;
/// Null.
pub const NUL: u8 = 0x00;

/// Telnet option codes this crate knows about.
pub mod option {
    /// Echo (RFC 857).
    pub const ECHO: u8 = 1;
    /// Timing Mark (RFC 860).
    pub const TIMING_MARK: u8 = 6;
}
