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

//! Server and account-store configuration, builder style.

use std::net::SocketAddr;

/// The default listening endpoint: all interfaces, port 6666.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:6666";

/// Configuration for the TCP accept loop.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds.
    pub bind_addr: SocketAddr,
    /// Bytes read from the transport per [`redclay_terminal::Terminal`]
    /// loop iteration.
    pub read_chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("default bind address parses"),
            read_chunk_size: redclay_terminal::READ_SIZE,
        }
    }
}

impl ServerConfig {
    /// A config with the default bind address and read chunk size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Overrides the per-iteration read chunk size.
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }
}

/// Configuration for the account-store collaborator.
#[derive(Debug, Clone, Default)]
pub struct AccountStoreConfig {
    /// Connection string from `RC_DB`, if set. `None` selects the in-memory
    /// store (a concession for a runnable demo — see DESIGN.md).
    pub database_url: Option<String>,
}

impl AccountStoreConfig {
    /// Reads `RC_DB` from the environment, if present.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("RC_DB").ok(),
        }
    }

    /// Overrides the database URL directly (mainly for tests).
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_6666() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 6666);
        assert!(config.bind_addr.ip().is_unspecified());
    }

    #[test]
    fn builder_overrides_bind_addr() {
        let addr: SocketAddr = "127.0.0.1:2323".parse().unwrap();
        let config = ServerConfig::new().with_bind_addr(addr);
        assert_eq!(config.bind_addr, addr);
    }

    #[test]
    fn account_store_config_without_rc_db_is_none() {
        // SAFETY: test-only, no other test in this process races on RC_DB.
        unsafe {
            std::env::remove_var("RC_DB");
        }
        assert!(AccountStoreConfig::from_env().database_url.is_none());
    }
}
