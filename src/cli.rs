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

//! The process-level CLI surface: `run-server` and `create-account`.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::account::{hash_password, valid_username, AccountStore, InMemoryAccountStore};
use crate::config::{AccountStoreConfig, ServerConfig};
use crate::error::{CliError, CliResult};
use crate::server::TelnetServer;

/// redclay: a Telnet MUD server core.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// The two subcommands this crate ships.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bind the listener and serve connections until Ctrl-C.
    RunServer {
        /// Override the default bind address (0.0.0.0:6666).
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },
    /// Create an account, prompting for a password on stdin.
    CreateAccount {
        /// The new account's login name.
        username: String,
    },
}

/// Dispatches a parsed [`Args`].
pub async fn run(args: Args) -> CliResult<()> {
    match args.command {
        Command::RunServer { bind } => run_server(bind).await,
        Command::CreateAccount { username } => create_account(username).await,
    }
}

async fn run_server(bind: Option<SocketAddr>) -> CliResult<()> {
    let mut config = ServerConfig::new();
    if let Some(bind) = bind {
        config = config.with_bind_addr(bind);
    }

    let account_store = account_store_from_env();
    let server = TelnetServer::new();
    server.run(config, account_store).await?;
    Ok(())
}

async fn create_account(username: String) -> CliResult<()> {
    if !valid_username(&username) {
        return Err(CliError::InvalidUsername(username));
    }

    let password = read_password_from_stdin().map_err(CliError::Server)?;
    // hash_password is exercised here purely to validate the plug-in
    // contract before delegating to the store, which hashes again.
    let _ = hash_password(&password).map_err(CliError::Password)?;

    let store = account_store_from_env();
    let account = store
        .create(&username, &password)
        .await
        .map_err(CliError::Password)?;
    println!("created account {} (id {})", account.username, account.id);
    Ok(())
}

/// Reads a password from stdin. This is a one-shot CLI prompt, not the
/// Telnet echo FSM, so no local-echo handling is needed here.
fn read_password_from_stdin() -> std::io::Result<String> {
    use std::io::Write;
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn account_store_from_env() -> Arc<dyn AccountStore> {
    let config = AccountStoreConfig::from_env();
    match config.database_url {
        Some(_) => {
            tracing::warn!(
                "RC_DB is set but persistent account storage is an external collaborator \
                 (see spec); falling back to the in-memory store"
            );
            Arc::new(InMemoryAccountStore::new())
        }
        None => {
            tracing::warn!("RC_DB is unset; using an in-memory account store for this run");
            Arc::new(InMemoryAccountStore::new())
        }
    }
}
