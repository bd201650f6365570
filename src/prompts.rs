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

//! The three concrete prompts shipped with this crate: username entry,
//! password entry, and a minimal command loop. The real command dispatcher
//! is intentionally out of scope — `CommandPrompt` only demonstrates the
//! `Prompt` contract.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::account::valid_username;
use crate::connection::{Connection, ContextValue, Prompt};
use crate::error::ShellResult;
use crate::frame;

/// Shown once, immediately after a connection is accepted.
pub const BANNER: &str = "Welcome to redclay, a Georgia MUD.\n\n";

/// Failed-login attempts allowed before the connection is torn down.
pub const MAX_TRIES: u32 = 3;

/// Seconds the connection sleeps after a failed login, before re-prompting.
pub const RETRY_BACKOFF_SECS: f64 = 1.0;

/// Pushes the initial auth context frame onto a freshly accepted
/// connection: banner, then the username prompt.
pub async fn boot<T>(conn: &mut Connection<T>) -> ShellResult<()>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    conn.send_message(BANNER).await?;
    conn.push(frame! {
        "tries" => ContextValue::Tries(0),
        "prompt" => ContextValue::Prompt(Arc::new(UsernamePrompt) as Arc<dyn Prompt<T>>),
    });
    Ok(())
}

/// Shared failure path for both the username and password prompts: bump the
/// try counter, disconnect after [`MAX_TRIES`], otherwise back off and
/// re-show the username prompt.
async fn fail_actions<T>(conn: &mut Connection<T>) -> ShellResult<()>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    let tries = conn.get("tries").and_then(ContextValue::as_tries).unwrap_or(0);
    let new_tries = tries + 1;

    if new_tries >= MAX_TRIES {
        debug!("closing without login");
        conn.stop();
    } else {
        conn.set(frame! {
            "tries" => ContextValue::Tries(new_tries),
            "prompt" => ContextValue::Prompt(Arc::new(UsernamePrompt) as Arc<dyn Prompt<T>>),
        });
        conn.sleep(RETRY_BACKOFF_SECS).await?;
    }
    Ok(())
}

/// Asks for a login name and validates its shape (not its existence — that
/// is checked once the password arrives, to avoid leaking which usernames
/// are registered).
pub struct UsernamePrompt;

#[async_trait]
impl<T> Prompt<T> for UsernamePrompt
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn prompt_text(&self, _conn: &Connection<T>) -> String {
        "Username: ".to_string()
    }

    async fn handle_input(&self, conn: &mut Connection<T>, username: &str) -> ShellResult<()> {
        if !valid_username(username) {
            conn.send_message("Invalid username.\n\n").await?;
            fail_actions(conn).await
        } else {
            conn.set(frame! {
                "username" => ContextValue::Username(username.to_string()),
                "prompt" => ContextValue::Prompt(Arc::new(PasswordPrompt) as Arc<dyn Prompt<T>>),
            });
            Ok(())
        }
    }
}

/// Asks for a password with peer echo suppressed, then authenticates
/// against the connection's attached [`crate::account::AccountStore`].
pub struct PasswordPrompt;

impl PasswordPrompt {
    fn welcome(username: &str) -> String {
        format!("Welcome, {username}.\n")
    }
}

#[async_trait]
impl<T> Prompt<T> for PasswordPrompt
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn prompt_text(&self, _conn: &Connection<T>) -> String {
        "Password: ".to_string()
    }

    fn obscure_input(&self) -> bool {
        true
    }

    async fn handle_input(&self, conn: &mut Connection<T>, password: &str) -> ShellResult<()> {
        let username = conn
            .get("username")
            .and_then(ContextValue::as_username)
            .expect("PasswordPrompt only runs after UsernamePrompt set \"username\"")
            .to_string();

        let account = match conn.account_store() {
            Some(store) if !password.is_empty() => store.authenticate(&username, password).await,
            _ => None,
        };

        match account {
            Some(account) => {
                info!(user = %username, "successful login");
                conn.pop(frame! {"account" => ContextValue::Account(account)});
                conn.send_message(&Self::welcome(&username)).await?;
                conn.push(frame! {
                    "prompt" => ContextValue::Prompt(Arc::new(CommandPrompt) as Arc<dyn Prompt<T>>),
                });
                Ok(())
            }
            None => {
                info!(user = %username, "failed login");
                conn.send_message("Login failed.\n\n").await?;
                fail_actions(conn).await
            }
        }
    }
}

/// The post-login loop. This is a placeholder demonstrating the `Prompt`
/// contract, not a shell language — a real command dispatcher is
/// intentionally out of scope here.
pub struct CommandPrompt;

const GOODBYE: &str = "Goodbye!\n";

#[async_trait]
impl<T> Prompt<T> for CommandPrompt
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn prompt_text(&self, conn: &Connection<T>) -> String {
        let username = conn
            .get("account")
            .and_then(ContextValue::as_account)
            .map(|a| a.username.as_str())
            .unwrap_or("?");
        format!("{username}> ")
    }

    async fn handle_input(&self, conn: &mut Connection<T>, line: &str) -> ShellResult<()> {
        if line == "quit" {
            conn.send_message(GOODBYE).await?;
            conn.stop();
        } else if !line.is_empty() {
            conn.send_message(&format!("{line}\n")).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::InMemoryAccountStore;
    use crate::connection::run_shell;
    use tokio::io::AsyncWriteExt;

    async fn connected_pair() -> (tokio::io::DuplexStream, Connection<tokio::io::DuplexStream>) {
        let (client, server) = tokio::io::duplex(4096);
        let store: Arc<dyn crate::account::AccountStore> = Arc::new(InMemoryAccountStore::new());
        store.create("wiremu", "correct-horse").await.unwrap();
        let conn = Connection::new(server).with_account_store(store);
        (client, conn)
    }

    #[tokio::test]
    async fn successful_login_reaches_command_prompt() {
        let (mut client, mut conn) = connected_pair().await;
        boot(&mut conn).await.unwrap();

        let shell = tokio::spawn(async move {
            run_shell(&mut conn).await.unwrap();
        });

        client.write_all(b"wiremu\r\n").await.unwrap();
        client.write_all(b"correct-horse\r\n").await.unwrap();
        client.write_all(b"quit\r\n").await.unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(2), shell)
            .await
            .expect("shell completed")
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_username_reprompts() {
        let (mut client, mut conn) = connected_pair().await;
        boot(&mut conn).await.unwrap();

        let shell = tokio::spawn(async move {
            run_shell(&mut conn).await.unwrap();
        });

        client.write_all(b"x\r\n").await.unwrap(); // too short, invalid
        client.write_all(b"wiremu\r\n").await.unwrap();
        client.write_all(b"correct-horse\r\n").await.unwrap();
        client.write_all(b"quit\r\n").await.unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(2), shell)
            .await
            .expect("shell completed")
            .unwrap();
    }

    #[tokio::test]
    async fn exhausting_retries_disconnects() {
        let (mut client, mut conn) = connected_pair().await;
        boot(&mut conn).await.unwrap();

        let shell = tokio::spawn(async move {
            run_shell(&mut conn).await.unwrap();
        });

        for _ in 0..MAX_TRIES {
            client.write_all(b"wiremu\r\n").await.unwrap();
            client.write_all(b"wrong-password\r\n").await.unwrap();
        }

        tokio::time::timeout(std::time::Duration::from_secs(5), shell)
            .await
            .expect("shell completed")
            .unwrap();
    }
}
