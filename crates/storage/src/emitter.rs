//! Change-emitting store decorator.

use crate::{EmailStore, Result};
use async_trait::async_trait;
use event_types::{EmailUpdated, UserEmail};
use shopstream_producer::Producer;

/// Wraps a store and publishes an [`EmailUpdated`] event after each
/// successful address update.
///
/// Emission is best-effort: the mutation has already committed, so a
/// produce failure is logged and swallowed rather than surfaced to the
/// caller. Consumers of the change topic must tolerate gaps.
pub struct EventEmitter<S: EmailStore> {
    inner: S,
    producer: Producer<EmailUpdated>,
}

impl<S: EmailStore> EventEmitter<S> {
    pub fn new(inner: S, producer: Producer<EmailUpdated>) -> Self {
        Self { inner, producer }
    }
}

#[async_trait]
impl<S: EmailStore> EmailStore for EventEmitter<S> {
    async fn get_email(&self, id: &str) -> Result<UserEmail> {
        self.inner.get_email(id).await
    }

    async fn update_email(&self, id: &str, address: &str) -> Result<String> {
        let previous = self.inner.update_email(id, address).await?;

        let event = EmailUpdated {
            id: id.to_string(),
            old_address: previous.clone(),
            new_address: address.to_string(),
        };
        if let Err(err) = self.producer.produce(id, &event).await {
            tracing::warn!(id, error = %err, "failed to emit email change event");
        }

        Ok(previous)
    }

    async fn verify_email(&self, id: &str, address: &str) -> Result<()> {
        self.inner.verify_email(id, address).await
    }
}
