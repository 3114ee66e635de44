//! The polling consumer: drains batches from a `StreamConsumer` and feeds
//! them through a [`Dispatcher`].

use crate::dispatcher::{BatchReport, ConsumedRecord, Dispatcher};
use crate::error::{Error, Result};
use crate::handlers::{MalformedHandler, MessageHandler};
use csr::MessageSerde;
use event_types::EventMessage;
use rdkafka::consumer::{Consumer as _, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message as _};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Most records drained in one poll cycle.
pub const DEFAULT_MAX_BATCH: usize = 100;

/// How long one cycle waits for its first record.
const FETCH_WAIT: Duration = Duration::from_secs(1);

/// How long to wait for further already-fetched records before closing the
/// batch.
const DRAIN_WAIT: Duration = Duration::from_millis(10);

/// Delay between poll cycles in [`Consumer::run`].
const CYCLE_DELAY: Duration = Duration::from_secs(1);

/// A consumer of one message type from one topic.
///
/// Each [`Self::poll_once`] performs exactly one poll cycle; the caller (or
/// [`Self::run`]) is responsible for looping. There is no background task.
pub struct Consumer<M: EventMessage> {
    consumer: StreamConsumer,
    dispatcher: Dispatcher<M>,
    max_batch: usize,
}

impl<M: EventMessage> Consumer<M> {
    /// Consumer with the default logging handlers.
    pub fn new(consumer: StreamConsumer, serde: MessageSerde<M>) -> Self {
        Self {
            consumer,
            dispatcher: Dispatcher::new(serde),
            max_batch: DEFAULT_MAX_BATCH,
        }
    }

    /// Override the handler for successfully decoded messages.
    pub fn with_message_handler(mut self, handler: MessageHandler<M>) -> Self {
        self.dispatcher = self.dispatcher.with_message_handler(handler);
        self
    }

    /// Override the handler for records that fail to decode.
    pub fn with_malformed_handler(mut self, handler: MalformedHandler) -> Self {
        self.dispatcher = self.dispatcher.with_malformed_handler(handler);
        self
    }

    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// Perform one poll cycle: drain a batch and dispatch it in order.
    ///
    /// A transport error fails the whole cycle and propagates unchanged; a
    /// cycle that finds no records returns an empty report.
    pub async fn poll_once(&self) -> Result<BatchReport> {
        let records = self.receive_batch().await?;
        self.dispatcher.dispatch_batch(records).await
    }

    /// Poll cycles with a fixed inter-cycle delay until cancelled.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                result = self.poll_once() => { result?; }
            }
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(CYCLE_DELAY) => {}
            }
        }
    }

    /// Poll until `expected` records (handled plus malformed) have been seen,
    /// or the token is cancelled. Used by short-lived demo programs that know
    /// how many records they just produced.
    pub async fn run_until(&self, expected: usize, cancel: &CancellationToken) -> Result<()> {
        let mut seen = 0;
        while seen < expected {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                result = self.poll_once() => { seen += result?.total(); }
            }
        }
        Ok(())
    }

    /// Pause fetching on the current assignment.
    pub fn pause(&self) -> Result<()> {
        let assignment = self.consumer.assignment()?;
        self.consumer.pause(&assignment)?;
        Ok(())
    }

    /// Resume fetching on the current assignment.
    pub fn resume(&self) -> Result<()> {
        let assignment = self.consumer.assignment()?;
        self.consumer.resume(&assignment)?;
        Ok(())
    }

    /// Drain up to `max_batch` records: wait up to the fetch wait for the
    /// first, then take whatever else is already fetched.
    async fn receive_batch(&self) -> Result<Vec<ConsumedRecord>> {
        let mut records = Vec::new();

        match tokio::time::timeout(FETCH_WAIT, self.consumer.recv()).await {
            Ok(Ok(message)) => records.push(to_record(&message)),
            Ok(Err(err)) => return Err(Error::Poll(err)),
            Err(_) => return Ok(records),
        }

        while records.len() < self.max_batch {
            match tokio::time::timeout(DRAIN_WAIT, self.consumer.recv()).await {
                Ok(Ok(message)) => records.push(to_record(&message)),
                Ok(Err(err)) => return Err(Error::Poll(err)),
                Err(_) => break,
            }
        }
        Ok(records)
    }
}

fn to_record(message: &BorrowedMessage<'_>) -> ConsumedRecord {
    ConsumedRecord {
        topic: message.topic().to_string(),
        partition: message.partition(),
        offset: message.offset(),
        key: message.key().map(<[u8]>::to_vec),
        // A keyed tombstone has no payload; an empty payload decodes as the
        // all-defaults message, which proto3 considers well-formed.
        payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
    }
}
