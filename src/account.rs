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

//! Accounts and the authentication collaborator.
//!
//! The Telnet core treats authentication as an external plug-in: given a
//! username and password, it returns an account or nothing. This module
//! supplies that plug-in plus the account shape it operates on. Persistence
//! and migrations are intentionally out of scope here; the in-memory
//! store below is a concession to ship a runnable demo.

use std::collections::HashMap;
use std::sync::RwLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

/// An account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Database-assigned identifier.
    pub id: i64,
    /// Login name, validated against [`valid_username`].
    pub username: String,
    /// Argon2id PHC-formatted password hash.
    pub password_hash: String,
}

impl Account {
    /// Verifies `password` against this account's stored hash.
    ///
    /// A hash that fails to parse is treated as a verification failure
    /// rather than propagated as an error — a corrupt stored hash must never
    /// crash the login path.
    pub fn authenticate(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Matches `^[A-Za-z][A-Za-z0-9_-]{2,31}$`: a letter, then 2-31 further
/// letters/digits/`_`/`-` (3-32 characters total).
pub fn valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return false;
    }
    let mut chars = username.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Hashes `password` with Argon2id, returning a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| e.to_string())
}

/// The authentication collaborator: given `(username, password)`, returns
/// the matching account, if any. Implementations own whatever persistence
/// mechanism backs accounts; the Telnet core never sees it directly.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up `username` and checks `password` against its stored hash.
    async fn authenticate(&self, username: &str, password: &str) -> Option<Account>;

    /// Creates a new account, hashing `password`. Fails if the username is
    /// already taken or invalid.
    async fn create(&self, username: &str, password: &str) -> Result<Account, String>;
}

/// An in-memory [`AccountStore`], keyed by username.
///
/// Used when `RC_DB` is unset — a concession for a runnable demo. Real
/// deployments should back [`AccountStore`] with persistent storage; that
/// layer is an external collaborator of the Telnet core, not part of it.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    next_id: RwLock<i64>,
}

impl InMemoryAccountStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: RwLock::new(1),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        if password.is_empty() {
            return None;
        }
        let accounts = self.accounts.read().expect("account store lock poisoned");
        let account = accounts.get(username)?;
        account.authenticate(password).then(|| account.clone())
    }

    async fn create(&self, username: &str, password: &str) -> Result<Account, String> {
        if !valid_username(username) {
            return Err(format!("invalid username: {username}"));
        }
        let password_hash = hash_password(password)?;
        let mut accounts = self.accounts.write().expect("account store lock poisoned");
        if accounts.contains_key(username) {
            return Err(format!("username already taken: {username}"));
        }
        let mut next_id = self.next_id.write().expect("account store lock poisoned");
        let account = Account {
            id: *next_id,
            username: username.to_string(),
            password_hash,
        };
        *next_id += 1;
        accounts.insert(username.to_string(), account.clone());
        Ok(account)
    }
}
