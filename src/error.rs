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

//! Top-level error types for the shell and server layers.

use redclay_terminal::TerminalError;
use thiserror::Error;

/// Errors that can escape a connection's shell loop.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The Telnet core (wire framing or prompted line editor) failed.
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    /// The account store could not be reached or returned bad data.
    #[error("account store error: {0}")]
    AccountStore(String),
}

/// Convenience alias for results returned by the shell layer.
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors raised by the CLI / process-level launcher.
#[derive(Debug, Error)]
pub enum CliError {
    /// The server failed to bind or accept.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// `create-account` was given an invalid username.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(String),
}

/// Convenience alias for results returned by the CLI layer.
pub type CliResult<T> = Result<T, CliError>;
