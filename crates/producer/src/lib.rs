//! Typed record producer.
//!
//! A [`Producer`] binds a Kafka client, a topic, and a [`MessageSerde`] for
//! one message type, and sends one of two kinds of data:
//!
//! - an encoded message of that type, or
//! - a fixed byte sequence that can never be decoded as any message,
//!   used to exercise downstream malformed-data handling.
//!
//! Sends are synchronous from the caller's point of view: `produce` awaits
//! the delivery ack and surfaces the first failure. No retries happen at
//! this layer; the client's own delivery policy is trusted below it.

use csr::MessageSerde;
use event_types::{EventMessage, INVALID_PAYLOAD};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to encode message: {0}")]
    Encode(#[from] csr::Error),

    #[error("failed to produce to topic {topic}: {source}")]
    Delivery {
        topic: String,
        source: rdkafka::error::KafkaError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Producer of one message type to one topic.
///
/// Cheap to clone: worker tasks share the underlying client and serde.
pub struct Producer<M: EventMessage> {
    producer: FutureProducer,
    serde: Arc<MessageSerde<M>>,
    topic: String,
}

impl<M: EventMessage> Clone for Producer<M> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
            serde: Arc::clone(&self.serde),
            topic: self.topic.clone(),
        }
    }
}

impl<M: EventMessage> Producer<M> {
    pub fn new(producer: FutureProducer, serde: MessageSerde<M>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            serde: Arc::new(serde),
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Encode `message` and send it with `key`, waiting for the delivery ack.
    ///
    /// An encoding failure returns before the transport is touched.
    pub async fn produce(&self, key: &str, message: &M) -> Result<()> {
        let payload = self.serde.encode(message)?;
        self.send(key, &payload).await
    }

    /// Send the fixed non-decodable payload with `key`, bypassing the serde.
    pub async fn produce_invalid(&self, key: &str) -> Result<()> {
        self.send(key, INVALID_PAYLOAD).await
    }

    /// Like [`Self::produce`], but stop waiting for the delivery ack when
    /// `cancel` fires. Returns `Ok(false)` on cancellation; the in-flight
    /// record may still be delivered, the wait is just abandoned.
    pub async fn produce_unless_cancelled(
        &self,
        key: &str,
        message: &M,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        tokio::select! {
            _ = cancel.cancelled() => Ok(false),
            result = self.produce(key, message) => result.map(|()| true),
        }
    }

    /// Cancellation-aware variant of [`Self::produce_invalid`].
    pub async fn produce_invalid_unless_cancelled(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        tokio::select! {
            _ = cancel.cancelled() => Ok(false),
            result = self.produce_invalid(key) => result.map(|()| true),
        }
    }

    async fn send(&self, key: &str, payload: &[u8]) -> Result<()> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);
        self.producer
            .send(record, Timeout::After(Duration::from_secs(30)))
            .await
            .map_err(|(err, _)| Error::Delivery {
                topic: self.topic.clone(),
                source: err,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::Cart;
    use rdkafka::ClientConfig;

    fn unroutable_producer() -> FutureProducer {
        // A port nothing listens on, with a short delivery timeout so the
        // send fails quickly instead of waiting out the default 30s.
        ClientConfig::new()
            .set("bootstrap.servers", "127.0.0.1:1")
            .set("message.timeout.ms", "300")
            .create()
            .unwrap()
    }

    #[tokio::test]
    async fn test_produce_surfaces_delivery_failure() {
        let producer = Producer::new(unroutable_producer(), MessageSerde::<Cart>::plain(), "carts");
        let cart = Cart {
            cart_id: "cart-1".to_string(),
            line_items: vec![],
        };
        let err = producer.produce("k", &cart).await.unwrap_err();
        assert!(matches!(err, Error::Delivery { ref topic, .. } if topic == "carts"));
    }

    #[tokio::test]
    async fn test_produce_invalid_surfaces_delivery_failure() {
        let producer = Producer::new(unroutable_producer(), MessageSerde::<Cart>::plain(), "carts");
        assert!(producer.produce_invalid("k").await.is_err());
    }

    fn stuck_producer() -> FutureProducer {
        // Long delivery timeout: a send to this address stays in flight, so
        // only cancellation can end the wait.
        ClientConfig::new()
            .set("bootstrap.servers", "127.0.0.1:1")
            .set("message.timeout.ms", "30000")
            .create()
            .unwrap()
    }

    #[tokio::test]
    async fn test_cancellation_aborts_pending_send() {
        let producer = Producer::new(stuck_producer(), MessageSerde::<Cart>::plain(), "carts");
        let cart = Cart {
            cart_id: "cart-1".to_string(),
            line_items: vec![],
        };

        let cancel = tokio_util::sync::CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            producer.produce_unless_cancelled("k", &cart, &cancel),
        )
        .await
        .expect("cancellation did not abort the pending send");
        assert_eq!(result.unwrap(), false);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_pending_invalid_send() {
        let producer = Producer::new(stuck_producer(), MessageSerde::<Cart>::plain(), "carts");

        let cancel = tokio_util::sync::CancellationToken::new();
        cancel.cancel();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            producer.produce_invalid_unless_cancelled("k", &cancel),
        )
        .await
        .expect("cancellation did not abort the pending send");
        assert_eq!(result.unwrap(), false);
    }
}
