//! Auth provider keeping accounts in process memory.

use std::collections::{HashMap, HashSet};

use anyhow::bail;
use async_trait::async_trait;
use closet_sdk::models::Session;
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::domain::account::AuthProvider;

pub const PASSWORD_METHOD: &str = "password";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

struct Account {
    user_id: Uuid,
    email: String,
    display_name: String,
    password: SecretString,
}

#[derive(Default)]
pub struct InMemoryAuthProvider {
    // Keyed by lowercased email.
    accounts: RwLock<HashMap<String, Account>>,
    signed_in: RwLock<HashSet<Uuid>>,
}

impl InMemoryAuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_signed_in(&self, user_id: Uuid) -> bool {
        self.signed_in.read().contains(&user_id)
    }

    fn session_for(account: &Account) -> Session {
        Session::new(account.user_id, account.email.clone())
            .with_display_name(account.display_name.clone())
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in_methods(&self, email: &str) -> anyhow::Result<Vec<String>> {
        let known = self.accounts.read().contains_key(&email.to_lowercase());
        Ok(if known {
            vec![PASSWORD_METHOD.to_owned()]
        } else {
            Vec::new()
        })
    }

    async fn create_user(
        &self,
        email: &str,
        password: &SecretString,
        display_name: &str,
    ) -> anyhow::Result<Session> {
        let key = email.to_lowercase();
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&key) {
            bail!("Email is already in use.");
        }
        let account = Account {
            user_id: Uuid::new_v4(),
            email: email.to_owned(),
            display_name: display_name.to_owned(),
            password: SecretString::from(password.expose_secret().to_owned()),
        };
        let session = Self::session_for(&account);
        accounts.insert(key, account);
        self.signed_in.write().insert(session.user_id());
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &SecretString) -> anyhow::Result<Session> {
        let session = {
            let accounts = self.accounts.read();
            match accounts.get(&email.to_lowercase()) {
                Some(account)
                    if account.password.expose_secret() == password.expose_secret() =>
                {
                    Self::session_for(account)
                }
                _ => bail!(INVALID_CREDENTIALS),
            }
        };
        self.signed_in.write().insert(session.user_id());
        Ok(session)
    }

    async fn sign_out(&self, user_id: Uuid) -> anyhow::Result<()> {
        self.signed_in.write().remove(&user_id);
        Ok(())
    }

    async fn username_taken(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self
            .accounts
            .read()
            .values()
            .any(|a| a.display_name.eq_ignore_ascii_case(username)))
    }
}
