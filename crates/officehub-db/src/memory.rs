//! In-memory [`IdentityStore`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use officehub_auth::Role;
use officehub_core::AppError;
use officehub_models::{Identity, IdentityQuery, NewIdentity, ObjectId, ProfileChanges};
use tokio::sync::RwLock;

use crate::identity::{DUPLICATE_EMAIL_MESSAGE, IdentityStore};

/// Counts `find_by_id` calls so tests can assert the gate's single lookup.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identities: RwLock<HashMap<ObjectId, Identity>>,
    lookups: AtomicUsize,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups by id served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Inserts or replaces an identity as-is.
    pub async fn insert(&self, identity: Identity) {
        self.identities
            .write()
            .await
            .insert(identity.id.clone(), identity);
    }

    async fn modify<F>(&self, id: &ObjectId, apply: F) -> Option<Identity>
    where
        F: FnOnce(&mut Identity) + Send,
    {
        let mut identities = self.identities.write().await;
        let identity = identities.get_mut(id)?;
        apply(identity);
        identity.updated_at = Utc::now();
        Some(identity.clone())
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Identity>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.identities.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AppError> {
        let email = email.to_lowercase();
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| identity.email.to_lowercase() == email)
            .cloned())
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, AppError> {
        let mut identities = self.identities.write().await;
        let email = new.email.to_lowercase();
        if identities
            .values()
            .any(|identity| identity.email.to_lowercase() == email)
        {
            return Err(AppError::conflict(anyhow!(DUPLICATE_EMAIL_MESSAGE)));
        }

        let now = Utc::now();
        let identity = Identity {
            id: ObjectId::new(),
            name: new.name,
            email,
            password_hash: new.password_hash,
            role: new.role,
            department: new.department,
            designation: new.designation,
            phone: new.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        identities.insert(identity.id.clone(), identity.clone());
        Ok(identity)
    }

    async fn update_profile(
        &self,
        id: &ObjectId,
        changes: ProfileChanges,
    ) -> Result<Option<Identity>, AppError> {
        Ok(self
            .modify(id, |identity| {
                if let Some(name) = changes.name {
                    identity.name = name;
                }
                if changes.department.is_some() {
                    identity.department = changes.department;
                }
                if changes.designation.is_some() {
                    identity.designation = changes.designation;
                }
                if changes.phone.is_some() {
                    identity.phone = changes.phone;
                }
            })
            .await)
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let password_hash = password_hash.to_string();
        Ok(self
            .modify(id, |identity| identity.password_hash = password_hash)
            .await
            .is_some())
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<Option<Identity>, AppError> {
        Ok(self.modify(id, |identity| identity.role = role).await)
    }

    async fn set_active(
        &self,
        id: &ObjectId,
        is_active: bool,
    ) -> Result<Option<Identity>, AppError> {
        Ok(self
            .modify(id, |identity| identity.is_active = is_active)
            .await)
    }

    async fn list(&self, query: &IdentityQuery) -> Result<(Vec<Identity>, i64), AppError> {
        let search = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<Identity> = self
            .identities
            .read()
            .await
            .values()
            .filter(|identity| query.role.is_none_or(|role| identity.role == role))
            .filter(|identity| query.include_inactive || identity.is_active)
            .filter(|identity| {
                search.as_ref().is_none_or(|term| {
                    identity.name.to_lowercase().contains(term)
                        || identity.email.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }
}
