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

//! Server-echo (option 1) three-state local negotiation (C6).
//!
//! The server uses this to suppress client-side echo during password entry:
//! announcing `WILL ECHO` tells the peer the server will do the echoing
//! (i.e. the peer should stop).

/// The server's local-echo negotiation state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EchoOptionState {
    /// Echo is off; nothing has been requested.
    #[default]
    Off,
    /// A `WILL ECHO` has been sent; awaiting the peer's acknowledgement.
    Requested,
    /// The peer has acknowledged with `DO ECHO`.
    On,
}

impl EchoOptionState {
    /// A fresh FSM in the OFF state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the server is currently suppressing client echo (i.e. the
    /// peer has been told `WILL ECHO`, requested or acknowledged).
    pub fn is_active(self) -> bool {
        !matches!(self, EchoOptionState::Off)
    }

    /// A local request to turn server-echo on or off. Returns `Some(state)`
    /// if an announcement (`WILL`/`WONT ECHO`) must be sent.
    pub fn local_request(&mut self, on: bool) -> Option<bool> {
        match (*self, on) {
            (EchoOptionState::Off, true) => {
                *self = EchoOptionState::Requested;
                Some(true)
            }
            (EchoOptionState::Off, false) => None,
            (EchoOptionState::Requested, true) => None,
            // A local withdrawal of a still-pending request returns to OFF
            // rather than leaving it dangling in REQUESTED.
            (EchoOptionState::Requested, false) => {
                *self = EchoOptionState::Off;
                Some(false)
            }
            (EchoOptionState::On, true) => None,
            (EchoOptionState::On, false) => {
                *self = EchoOptionState::Off;
                Some(false)
            }
        }
    }

    /// The peer sent `DO ECHO` (asking the server to begin echoing).
    pub fn peer_do_echo(&mut self) -> Option<bool> {
        match *self {
            EchoOptionState::Off => Some(false),
            EchoOptionState::Requested => {
                *self = EchoOptionState::On;
                None
            }
            EchoOptionState::On => None,
        }
    }

    /// The peer sent `DONT ECHO`.
    pub fn peer_dont_echo(&mut self) -> Option<bool> {
        match *self {
            EchoOptionState::Off => None,
            EchoOptionState::Requested => {
                *self = EchoOptionState::Off;
                None
            }
            EchoOptionState::On => {
                *self = EchoOptionState::Off;
                Some(false)
            }
        }
    }

    /// The peer announced its own echo behaviour (`WILL`/`WONT ECHO`). This
    /// is always refused: the server never wants the client echoing on its
    /// behalf. Returns `Some(false)` (reply `DONT ECHO`) if the peer
    /// announced `WILL`; `None` (no-op) if it announced `WONT`.
    pub fn peer_directed_echo(peer_will: bool) -> Option<bool> {
        if peer_will {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_local_request_on_sends_will_and_requests() {
        let mut fsm = EchoOptionState::new();
        assert_eq!(fsm.local_request(true), Some(true));
        assert_eq!(fsm, EchoOptionState::Requested);
    }

    #[test]
    fn requested_plus_peer_do_reaches_on() {
        let mut fsm = EchoOptionState::new();
        fsm.local_request(true);
        assert_eq!(fsm.peer_do_echo(), None);
        assert_eq!(fsm, EchoOptionState::On);
    }

    #[test]
    fn on_plus_peer_dont_returns_to_off_with_wont() {
        let mut fsm = EchoOptionState::new();
        fsm.local_request(true);
        fsm.peer_do_echo();
        assert_eq!(fsm.peer_dont_echo(), Some(false));
        assert_eq!(fsm, EchoOptionState::Off);
    }

    #[test]
    fn off_peer_do_is_refused() {
        let mut fsm = EchoOptionState::new();
        assert_eq!(fsm.peer_do_echo(), Some(false));
        assert_eq!(fsm, EchoOptionState::Off);
    }

    #[test]
    fn peer_directed_will_is_always_refused() {
        assert_eq!(EchoOptionState::peer_directed_echo(true), Some(false));
        assert_eq!(EchoOptionState::peer_directed_echo(false), None);
    }
}
