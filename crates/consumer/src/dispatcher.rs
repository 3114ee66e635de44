//! Per-record decode and dispatch, separated from the transport so batch
//! semantics are testable without a broker.

use crate::error::{Error, Result};
use crate::handlers::{
    default_malformed_handler, default_message_handler, MalformedHandler, MessageHandler,
};
use csr::MessageSerde;
use event_types::EventMessage;

/// A record as drained from one poll cycle, with its payload owned.
#[derive(Debug, Clone)]
pub struct ConsumedRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<Vec<u8>>,
    pub payload: Vec<u8>,
}

/// Counts from one dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchReport {
    /// Records decoded and handled by the message handler.
    pub handled: usize,
    /// Records routed to the malformed-data handler.
    pub malformed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.handled + self.malformed
    }
}

/// Decodes records through a serde and routes them to the two handlers.
pub struct Dispatcher<M: EventMessage> {
    serde: MessageSerde<M>,
    message_handler: MessageHandler<M>,
    malformed_handler: MalformedHandler,
}

impl<M: EventMessage> Dispatcher<M> {
    /// Dispatcher with the logging default handlers.
    pub fn new(serde: MessageSerde<M>) -> Self {
        Self {
            serde,
            message_handler: default_message_handler(),
            malformed_handler: default_malformed_handler(),
        }
    }

    pub fn with_message_handler(mut self, handler: MessageHandler<M>) -> Self {
        self.message_handler = handler;
        self
    }

    pub fn with_malformed_handler(mut self, handler: MalformedHandler) -> Self {
        self.malformed_handler = handler;
        self
    }

    /// Handle every record of one batch, strictly in the given order.
    ///
    /// Decode failures go to the malformed handler and the batch continues.
    /// An error from either handler aborts the remainder of the batch and is
    /// returned; records after the failing one are not handled.
    pub async fn dispatch_batch(&self, records: Vec<ConsumedRecord>) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for record in records {
            if record.offset % 250 == 0 {
                tracing::info!(
                    topic = record.topic,
                    offset = record.offset,
                    "consumer status"
                );
            }
            match self.serde.decode(&record.payload) {
                Ok(message) => {
                    (self.message_handler)(message)
                        .await
                        .map_err(Error::MessageHandler)?;
                    report.handled += 1;
                }
                Err(error) => {
                    (self.malformed_handler)(record.payload, error)
                        .await
                        .map_err(Error::MalformedHandler)?;
                    report.malformed += 1;
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::{EmailUpdated, INVALID_PAYLOAD};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn record(offset: i64, payload: Vec<u8>) -> ConsumedRecord {
        ConsumedRecord {
            topic: "email-updated".to_string(),
            partition: 0,
            offset,
            key: None,
            payload,
        }
    }

    fn encoded(id: &str) -> Vec<u8> {
        EmailUpdated {
            id: id.to_string(),
            old_address: "a@example.com".to_string(),
            new_address: "b@example.com".to_string(),
        }
        .encode()
        .unwrap()
    }

    #[tokio::test]
    async fn test_batch_counts_and_order() {
        // 3 decodable and 2 malformed records, interleaved.
        let batch = vec![
            record(0, encoded("u-0")),
            record(1, INVALID_PAYLOAD.to_vec()),
            record(2, encoded("u-2")),
            record(3, INVALID_PAYLOAD.to_vec()),
            record(4, encoded("u-4")),
        ];

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_messages = Arc::clone(&seen);
        let seen_malformed = Arc::clone(&seen);

        let dispatcher = Dispatcher::new(MessageSerde::<EmailUpdated>::plain())
            .with_message_handler(Arc::new(move |message: EmailUpdated| {
                let seen = Arc::clone(&seen_messages);
                Box::pin(async move {
                    seen.lock().unwrap().push(message.id);
                    Ok(())
                })
            }))
            .with_malformed_handler(Arc::new(move |payload: Vec<u8>, _| {
                let seen = Arc::clone(&seen_malformed);
                Box::pin(async move {
                    seen.lock().unwrap().push(format!("malformed:{}", payload.len()));
                    Ok(())
                })
            }));

        let report = dispatcher.dispatch_batch(batch).await.unwrap();
        assert_eq!(report.handled, 3);
        assert_eq!(report.malformed, 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["u-0", "malformed:7", "u-2", "malformed:7", "u-4"]
        );
    }

    #[tokio::test]
    async fn test_handler_error_aborts_batch() {
        let batch = vec![
            record(0, encoded("u-0")),
            record(1, encoded("u-1")),
            record(2, encoded("u-2")),
        ];

        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);
        let dispatcher = Dispatcher::new(MessageSerde::<EmailUpdated>::plain())
            .with_message_handler(Arc::new(move |message: EmailUpdated| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if message.id == "u-1" {
                        anyhow::bail!("handler rejected {}", message.id);
                    }
                    Ok(())
                })
            }));

        let err = dispatcher.dispatch_batch(batch).await.unwrap_err();
        assert!(matches!(err, Error::MessageHandler(_)));
        // u-0 and u-1 invoked, u-2 never reached.
        assert_eq!(invocations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_handler_error_aborts_batch() {
        let batch = vec![
            record(0, INVALID_PAYLOAD.to_vec()),
            record(1, encoded("u-1")),
        ];

        let handled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&handled);
        let dispatcher = Dispatcher::new(MessageSerde::<EmailUpdated>::plain())
            .with_message_handler(Arc::new(move |_| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            }))
            .with_malformed_handler(Arc::new(|_, _| {
                Box::pin(async { anyhow::bail!("unexpected malformed data") })
            }));

        let err = dispatcher.dispatch_batch(batch).await.unwrap_err();
        assert!(matches!(err, Error::MalformedHandler(_)));
        assert_eq!(handled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_default_handlers_never_fail() {
        let dispatcher = Dispatcher::new(MessageSerde::<EmailUpdated>::plain());
        let batch = vec![
            record(0, encoded("u-0")),
            record(1, INVALID_PAYLOAD.to_vec()),
        ];
        let report = dispatcher.dispatch_batch(batch).await.unwrap();
        assert_eq!(report, BatchReport { handled: 1, malformed: 1 });
    }
}
