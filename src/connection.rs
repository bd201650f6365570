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

//! The shell layer (C9): a `Connection` owning one `Terminal`, a
//! copy-on-push context-frame stack, and the `Prompt` contract that drives
//! it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use redclay_terminal::Terminal;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::account::Account;
use crate::error::ShellResult;

/// A monotonically assigned identifier for a live connection, used by the
/// server's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The underlying value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One entry in a context frame. Copy-on-push: pushing a frame clones the
/// current top and merges new entries in, so every value here must be
/// cheaply cloneable.
#[derive(Clone)]
pub enum ContextValue<T> {
    /// The prompt currently driving this connection.
    Prompt(Arc<dyn Prompt<T>>),
    /// The username entered at the username prompt, pending authentication.
    Username(String),
    /// Failed-login attempt counter.
    Tries(u32),
    /// The authenticated account, once login succeeds.
    Account(Account),
}

impl<T> fmt::Debug for ContextValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Prompt(_) => write!(f, "Prompt(..)"),
            ContextValue::Username(u) => write!(f, "Username({u:?})"),
            ContextValue::Tries(n) => write!(f, "Tries({n})"),
            ContextValue::Account(a) => write!(f, "Account({})", a.username),
        }
    }
}

impl<T> ContextValue<T> {
    /// Narrows to the prompt variant.
    pub fn as_prompt(&self) -> Option<&Arc<dyn Prompt<T>>> {
        match self {
            ContextValue::Prompt(p) => Some(p),
            _ => None,
        }
    }

    /// Narrows to the username variant.
    pub fn as_username(&self) -> Option<&str> {
        match self {
            ContextValue::Username(u) => Some(u),
            _ => None,
        }
    }

    /// Narrows to the tries variant.
    pub fn as_tries(&self) -> Option<u32> {
        match self {
            ContextValue::Tries(n) => Some(*n),
            _ => None,
        }
    }

    /// Narrows to the account variant.
    pub fn as_account(&self) -> Option<&Account> {
        match self {
            ContextValue::Account(a) => Some(a),
            _ => None,
        }
    }
}

/// A context frame: a named bag of [`ContextValue`]s.
pub type Frame<T> = HashMap<String, ContextValue<T>>;

/// Builds a [`Frame`] from `(name, value)` pairs, as `frame!["key" => value]`.
#[macro_export]
macro_rules! frame {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut f = ::std::collections::HashMap::new();
        $(f.insert($key.to_string(), $value);)*
        f
    }};
}

/// Owns a [`Terminal`] plus a copy-on-push context-frame stack.
pub struct Connection<T> {
    terminal: Terminal<T>,
    context_stack: Vec<Frame<T>>,
    running: bool,
    account_store: Option<Arc<dyn crate::account::AccountStore>>,
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a transport in a fresh `Terminal` and an empty root context
    /// frame, with no account store attached.
    pub fn new(transport: T) -> Self {
        Self {
            terminal: Terminal::new(transport),
            context_stack: vec![HashMap::new()],
            running: true,
            account_store: None,
        }
    }

    /// Attaches the authentication collaborator this connection's prompt
    /// chain will query.
    pub fn with_account_store(mut self, store: Arc<dyn crate::account::AccountStore>) -> Self {
        self.account_store = Some(store);
        self
    }

    /// The attached account store, if any.
    pub fn account_store(&self) -> Option<&Arc<dyn crate::account::AccountStore>> {
        self.account_store.as_ref()
    }

    /// Whether the shell loop should keep running.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Requests that the shell loop stop after the current prompt's
    /// `handle_input` returns.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Reads a value from the current top frame.
    pub fn get(&self, key: &str) -> Option<&ContextValue<T>> {
        self.context_stack.last().expect("context stack is never empty").get(key)
    }

    /// Merges `frame`'s entries into the current top frame without pushing.
    pub fn set(&mut self, frame: Frame<T>) {
        let top = self.context_stack.last_mut().expect("context stack is never empty");
        top.extend(frame);
    }

    /// Clones the current top frame, pushes the clone, then merges `frame`'s
    /// entries into the new top — copy-on-push semantics, so a handler that
    /// mutates a deeper frame never retroactively affects one already
    /// pushed above it.
    pub fn push(&mut self, frame: Frame<T>) {
        let mut new_top = self.context_stack.last().expect("context stack is never empty").clone();
        new_top.extend(frame);
        self.context_stack.push(new_top);
    }

    /// Pops the top frame, then merges `frame`'s entries into the frame
    /// that is now on top.
    pub fn pop(&mut self, frame: Frame<T>) {
        if self.context_stack.len() > 1 {
            self.context_stack.pop();
        }
        self.set(frame);
    }

    /// Writes a message to the peer, CRLF/IAC-stuffed by the Telnet core.
    pub async fn send_message(&mut self, message: &str) -> ShellResult<()> {
        self.terminal.write([message], true).await?;
        Ok(())
    }

    /// Flushes, then suspends for `secs` seconds.
    pub async fn sleep(&mut self, secs: f64) -> ShellResult<()> {
        self.terminal.sleep(secs).await?;
        Ok(())
    }

    /// Reads one logical line, echoed normally by the peer.
    pub async fn input(&mut self, prompt: &str) -> ShellResult<String> {
        Ok(self.terminal.input(prompt).await?)
    }

    /// Reads one logical line with peer echo suppressed for the duration.
    pub async fn input_secret(&mut self, prompt: &str) -> ShellResult<String> {
        Ok(self.terminal.input_secret(prompt).await?)
    }

    /// Reads a line via [`input`](Self::input) or
    /// [`input_secret`](Self::input_secret) depending on `obscure`.
    pub async fn input_line(&mut self, prompt: &str, obscure: bool) -> ShellResult<String> {
        if obscure {
            self.input_secret(prompt).await
        } else {
            self.input(prompt).await
        }
    }

    /// Flushes and closes the underlying transport.
    pub async fn close(&mut self) -> ShellResult<()> {
        self.terminal.close().await?;
        Ok(())
    }
}

/// A single step of the shell's prompt chain: username entry, password
/// entry, the command loop, and whatever else a deployment adds.
#[async_trait]
pub trait Prompt<T>: Send + Sync
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// The text shown to the peer when this prompt is active.
    fn prompt_text(&self, conn: &Connection<T>) -> String;

    /// Whether input for this prompt should be read with peer echo
    /// suppressed (password entry). Defaults to `false`.
    fn obscure_input(&self) -> bool {
        false
    }

    /// Handles one logical line of input, typically mutating `conn`'s
    /// context (push/pop/set) or requesting a stop.
    async fn handle_input(&self, conn: &mut Connection<T>, line: &str) -> ShellResult<()>;
}

/// Drives `conn` through its prompt chain until [`Connection::stop`] is
/// called (or the prompt's context entry goes missing, which is a bug in
/// whoever set up the context stack).
pub async fn run_shell<T>(conn: &mut Connection<T>) -> ShellResult<()>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    while conn.running() {
        let prompt = conn
            .get("prompt")
            .and_then(ContextValue::as_prompt)
            .cloned()
            .expect("every active context frame carries a \"prompt\" entry");

        let prompt_text = prompt.prompt_text(conn);
        let line = conn.input_line(&prompt_text, prompt.obscure_input()).await?;
        let trimmed = line.trim_end_matches('\n');
        prompt.handle_input(conn, trimmed).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_clones_top_then_merges() {
        let mut conn = make_conn();
        conn.set(frame! {"a" => ContextValue::Tries(0)});
        conn.push(frame! {"b" => ContextValue::Tries(1)});

        assert_eq!(conn.get("a").and_then(ContextValue::as_tries), Some(0));
        assert_eq!(conn.get("b").and_then(ContextValue::as_tries), Some(1));
    }

    #[test]
    fn pop_drops_top_but_merges_frame_into_new_top() {
        let mut conn = make_conn();
        conn.set(frame! {"a" => ContextValue::Tries(0)});
        conn.push(frame! {"b" => ContextValue::Tries(1)});
        conn.pop(frame! {"c" => ContextValue::Tries(2)});

        assert_eq!(conn.get("a").and_then(ContextValue::as_tries), Some(0));
        assert_eq!(conn.get("b").and_then(ContextValue::as_tries), None);
        assert_eq!(conn.get("c").and_then(ContextValue::as_tries), Some(2));
    }

    #[test]
    fn set_merges_without_pushing() {
        let mut conn = make_conn();
        conn.set(frame! {"a" => ContextValue::Tries(0)});
        conn.set(frame! {"a" => ContextValue::Tries(5)});
        assert_eq!(conn.get("a").and_then(ContextValue::as_tries), Some(5));
    }

    fn make_conn() -> Connection<tokio::io::DuplexStream> {
        let (_client, server) = tokio::io::duplex(64);
        Connection::new(server)
    }
}
