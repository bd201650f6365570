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

//! redclay: a Telnet MUD server core.
//!
//! The byte-accurate Telnet wire framing lives in `redclay_telnet`; the
//! prompted line editor atop it lives in `redclay_terminal`. This crate
//! adds the shell layer (accounts, the context-stack `Connection`, the
//! three-prompt auth chain) and the TCP server that ties them together.

pub mod account;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod prompts;
pub mod server;

pub use account::{Account, AccountStore, InMemoryAccountStore};
pub use config::{AccountStoreConfig, ServerConfig};
pub use connection::{Connection, ConnectionId, ContextValue, Prompt};
pub use error::{CliError, CliResult, ShellError, ShellResult};
pub use server::TelnetServer;
