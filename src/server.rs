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

//! The TCP accept loop (C10): one task per connection, a live-connection
//! registry for observability, and graceful shutdown on Ctrl-C.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use crate::account::AccountStore;
use crate::config::ServerConfig;
use crate::connection::{run_shell, Connection, ConnectionId};
use crate::prompts::boot;

/// Accepts Telnet connections and drives each through the shell loop on its
/// own task.
pub struct TelnetServer {
    registry: Arc<DashMap<ConnectionId, SocketAddr>>,
    next_id: Arc<AtomicU64>,
}

impl Default for TelnetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelnetServer {
    /// A server with an empty connection registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The number of connections currently tracked as live.
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    fn next_connection_id(&self) -> ConnectionId {
        ConnectionId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Binds `config.bind_addr` and serves connections until Ctrl-C is
    /// received. Accepted connections are not forcibly aborted on shutdown;
    /// they drain to natural completion, matching the wire layer's "no
    /// built-in read timeout" stance.
    pub async fn run(&self, config: ServerConfig, account_store: Arc<dyn AccountStore>) -> std::io::Result<()> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        info!(addr = %config.bind_addr, "listening");

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (socket, peer_addr) = accepted?;
                    let id = self.next_connection_id();
                    self.registry.insert(id, peer_addr);

                    let registry = self.registry.clone();
                    let account_store = account_store.clone();
                    tokio::spawn(async move {
                        handle_connection(id, peer_addr, socket, account_store).await;
                        registry.remove(&id);
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
            }
        }
    }
}

#[instrument(skip(socket, account_store), fields(peer = %peer_addr))]
async fn handle_connection(
    id: ConnectionId,
    peer_addr: SocketAddr,
    socket: tokio::net::TcpStream,
    account_store: Arc<dyn AccountStore>,
) {
    info!(%id, "new connection");

    let mut conn = Connection::new(socket).with_account_store(account_store);
    let outcome = async {
        boot(&mut conn).await?;
        run_shell(&mut conn).await
    }
    .await;

    match outcome {
        Ok(()) => info!("connection closing normally"),
        Err(crate::error::ShellError::Terminal(redclay_terminal::TerminalError::ConnectionClosed)) => {
            info!("connection closed by peer");
        }
        Err(err) => warn!(error = %err, "connection closing from unhandled error"),
    }

    let _ = conn.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_server_has_no_connections() {
        let server = TelnetServer::new();
        assert_eq!(server.connection_count(), 0);
    }

    #[test]
    fn connection_ids_are_monotonic() {
        let server = TelnetServer::new();
        let a = server.next_connection_id();
        let b = server.next_connection_id();
        assert!(b.as_u64() > a.as_u64());
    }
}
