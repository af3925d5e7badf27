//! Account records and the login session.

use crate::error::{AccountError, StoreError};
use crate::storage::JsonStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Profile fields collected at registration, in form order.
pub const PROFILE_FIELDS: [&str; 6] = ["Name", "Age", "Gender", "Birthday", "Address", "Phone Number"];

pub type Profile = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub password: String,
    #[serde(default)]
    pub info: Profile,
}

/// Accounts keyed by username. Passwords are kept as entered.
#[derive(Debug)]
pub struct AccountStore {
    store: JsonStore<Account>,
}

impl AccountStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            store: JsonStore::open(path)?,
        })
    }

    /// Adds a new account. Fails with `AlreadyExists` for a taken username and
    /// with `MissingCredentials` when the username or password is empty.
    pub fn register(&mut self, username: &str, password: &str, info: Profile) -> Result<(), AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }
        if self.store.contains(username) {
            warn!("registration rejected, {username} already exists");
            return Err(AccountError::AlreadyExists(username.to_string()));
        }
        let account = Account {
            password: password.to_string(),
            info,
        };
        self.store.insert(username, account)?;
        info!("registered account {username}");
        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AccountError> {
        match self.store.get(username) {
            Some(account) if account.password == password => Ok(()),
            _ => Err(AccountError::InvalidCredentials),
        }
    }

    pub fn profile(&self, username: &str) -> Option<&Profile> {
        self.store.get(username).map(|account| &account.info)
    }

    #[cfg(test)]
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.store.get(username)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Who is logged in, if anyone. Owned by the UI controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    current_user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current user only when the credentials match.
    pub fn login(&mut self, accounts: &AccountStore, username: &str, password: &str) -> Result<(), AccountError> {
        if let Err(err) = accounts.authenticate(username, password) {
            warn!("failed login for {username:?}");
            return Err(err);
        }
        info!("{username} logged in");
        self.current_user = Some(username.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("{user} logged out");
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// The logged-in user's profile, or an empty one without a session.
    pub fn current_profile(&self, accounts: &AccountStore) -> Profile {
        self.current_user
            .as_deref()
            .and_then(|user| accounts.profile(user))
            .cloned()
            .unwrap_or_default()
    }

    pub fn require_profile<'a>(&self, accounts: &'a AccountStore) -> Result<&'a Profile, AccountError> {
        self.current_user
            .as_deref()
            .and_then(|user| accounts.profile(user))
            .ok_or(AccountError::NotLoggedIn)
    }
}

/// `"Field: value"` lines, registration fields first, then any extras.
pub fn profile_lines(profile: &Profile) -> Vec<String> {
    let known = PROFILE_FIELDS
        .iter()
        .filter_map(|field| profile.get_key_value(*field));
    let extra = profile
        .iter()
        .filter(|(key, _)| !PROFILE_FIELDS.contains(&key.as_str()));
    known
        .chain(extra)
        .map(|(key, value)| format!("{}: {value}", capitalize(key)))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
