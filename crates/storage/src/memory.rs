//! In-memory store implementation.

use crate::{EmailStore, Error, Result};
use async_trait::async_trait;
use event_types::UserEmail;
use std::collections::HashMap;
use std::sync::RwLock;

/// HashMap-backed store. Reads take the lock shared, mutations exclusive.
///
/// The lock is a `std::sync::RwLock` and is never held across an await.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, UserEmail>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmailStore for InMemoryStore {
    async fn get_email(&self, id: &str) -> Result<UserEmail> {
        let records = self.records.read().unwrap();
        records.get(id).cloned().ok_or_else(|| Error::NotFound {
            id: id.to_string(),
        })
    }

    async fn update_email(&self, id: &str, address: &str) -> Result<String> {
        let mut records = self.records.write().unwrap();
        let record = records.entry(id.to_string()).or_insert_with(|| UserEmail {
            id: id.to_string(),
            ..Default::default()
        });
        let previous = std::mem::replace(&mut record.email_address, address.to_string());
        // The new address has not been verified yet.
        record.verified = false;
        Ok(previous)
    }

    async fn verify_email(&self, id: &str, address: &str) -> Result<()> {
        let mut records = self.records.write().unwrap();
        let record = records.get_mut(id).ok_or_else(|| Error::NotFound {
            id: id.to_string(),
        })?;
        if record.email_address != address {
            // A verify raced with a later update; it must not mark the
            // newer address verified.
            return Err(Error::AddressMismatch {
                id: id.to_string(),
            });
        }
        record.verified = true;
        Ok(())
    }
}
