// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory backend doubles.
//!
//! `MemoryStore` keeps documents in ordered maps and counts calls per
//! operation, so tests can check how often a store reloaded. Both doubles
//! can be switched into failure mode at any time.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use casona_core::{AuthProvider, AuthUser, Document, DocumentStore, Fields, GatewayError, Session, Value};

#[derive(Debug, Default)]
struct StoreInner {
    collections: BTreeMap<String, BTreeMap<String, Fields>>,
    next_id: u64,
    calls: BTreeMap<&'static str, usize>,
    failing: bool,
    panicking: bool,
}

/// A document store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Makes every later write panic.
    pub fn set_panicking(&self, panicking: bool) {
        self.lock().panicking = panicking;
    }

    /// Number of calls of `op` so far, failed ones included.
    pub fn calls(&self, op: &str) -> usize {
        self.lock().calls.get(op).copied().unwrap_or_default()
    }

    /// Stores a document directly, bypassing counters and failure modes.
    pub fn insert(&self, collection: &str, id: &str, fields: Fields) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    /// The fields stored under `id`.
    pub fn fields(&self, collection: &str, id: &str) -> Option<Fields> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.lock().collections.get(collection).map_or(0, BTreeMap::len)
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap()
    }

    fn enter(&self, op: &'static str, write: bool) -> Result<MutexGuard<'_, StoreInner>, GatewayError> {
        let mut inner = self.lock();
        *inner.calls.entry(op).or_default() += 1;
        if write && inner.panicking {
            drop(inner);
            panic!("store exploded during {op}");
        }
        if inner.failing {
            return Err(GatewayError::Status {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(inner)
    }
}

fn documents(inner: &StoreInner, collection: &str) -> Vec<Document> {
    inner
        .collections
        .get(collection)
        .map(|c| {
            c.iter()
                .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        let inner = self.enter("list", false)?;
        Ok(documents(&inner, collection))
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, GatewayError> {
        let inner = self.enter("query_eq", false)?;
        Ok(documents(&inner, collection)
            .into_iter()
            .filter(|doc| doc.fields.get(field) == Some(&value))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError> {
        let inner = self.enter("get", false)?;
        Ok(inner
            .collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|fields| Document::new(id.to_string(), fields.clone())))
    }

    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, GatewayError> {
        let mut inner = self.enter("add", true)?;
        inner.next_id += 1;
        let id = format!("doc-{}", inner.next_id);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), GatewayError> {
        let mut inner = self.enter("set", true)?;
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields.clone());
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        let mut inner = self.enter("delete", true)?;
        // Deleting a missing document succeeds, as it does remotely.
        if let Some(c) = inner.collections.get_mut(collection) {
            c.remove(id);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct AuthInner {
    accounts: BTreeMap<String, (String, AuthUser)>,
    current: Option<AuthUser>,
    failing: bool,
    next_uid: u64,
    reset_emails: Vec<String>,
    verify_emails: Vec<String>,
}

/// An identity provider held in memory.
#[derive(Debug, Default)]
pub struct FakeAuth {
    inner: Mutex<AuthInner>,
}

#[allow(dead_code)]
impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account without signing it in and returns its principal.
    pub fn add_account(&self, email: &str, password: &str) -> AuthUser {
        let mut inner = self.lock();
        let user = new_principal(&mut inner, email);
        inner
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    /// Signs in the given principal directly.
    pub fn sign_in_as(&self, user: AuthUser) {
        self.lock().current = Some(user);
    }

    /// Makes every later call fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Addresses that were sent a password reset email.
    pub fn reset_emails(&self) -> Vec<String> {
        self.lock().reset_emails.clone()
    }

    /// Addresses that were sent an email change link.
    pub fn verify_emails(&self) -> Vec<String> {
        self.lock().verify_emails.clone()
    }

    fn lock(&self) -> MutexGuard<'_, AuthInner> {
        self.inner.lock().unwrap()
    }

    fn enter(&self) -> Result<MutexGuard<'_, AuthInner>, GatewayError> {
        let inner = self.lock();
        if inner.failing {
            return Err(GatewayError::Status {
                status: 503,
                message: "identity provider unavailable".to_string(),
            });
        }
        Ok(inner)
    }
}

fn new_principal(inner: &mut AuthInner, email: &str) -> AuthUser {
    inner.next_uid += 1;
    AuthUser {
        uid: format!("uid-{}", inner.next_uid),
        email: Some(email.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        let mut inner = self.enter()?;
        if inner.accounts.contains_key(email) {
            return Err(GatewayError::Auth("EMAIL_EXISTS".to_string()));
        }
        let user = new_principal(&mut inner, email);
        inner
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        inner.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        let mut inner = self.enter()?;
        let user = match inner.accounts.get(email) {
            Some((p, user)) if p == password => user.clone(),
            _ => return Err(GatewayError::Auth("INVALID_LOGIN_CREDENTIALS".to_string())),
        };
        inner.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) {
        self.lock().current = None;
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError> {
        Ok(self.enter()?.current.clone())
    }

    async fn update_display_name(&self, display_name: &str) -> Result<(), GatewayError> {
        let mut inner = self.enter()?;
        let user = inner.current.as_mut().ok_or(GatewayError::NotSignedIn)?;
        user.display_name = Some(display_name.to_string());
        Ok(())
    }

    async fn verify_before_update_email(&self, new_email: &str) -> Result<(), GatewayError> {
        let mut inner = self.enter()?;
        if inner.current.is_none() {
            return Err(GatewayError::NotSignedIn);
        }
        inner.verify_emails.push(new_email.to_string());
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError> {
        let mut inner = self.enter()?;
        if !inner.accounts.contains_key(email) {
            return Err(GatewayError::Auth("EMAIL_NOT_FOUND".to_string()));
        }
        inner.reset_emails.push(email.to_string());
        Ok(())
    }

    async fn session(&self) -> Option<Session> {
        self.lock().current.as_ref().map(|user| Session {
            uid: user.uid.clone(),
            email: user.email.clone(),
            id_token: format!("id-{}", user.uid),
            refresh_token: format!("refresh-{}", user.uid),
        })
    }

    async fn restore(&self, session: Session) {
        let mut inner = self.lock();
        let user = inner
            .accounts
            .values()
            .map(|(_, user)| user)
            .find(|user| user.uid == session.uid)
            .cloned();
        inner.current = user;
    }
}
