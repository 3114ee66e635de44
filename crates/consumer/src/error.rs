//! Consumer error taxonomy.
//!
//! Transport failures are fatal to the current poll cycle. Decode failures
//! never surface here at all; they are routed to the malformed-data handler.
//! Handler failures (either handler) abort the batch and are returned.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to poll records: {0}")]
    Poll(#[from] rdkafka::error::KafkaError),

    #[error("message handler failed: {0:#}")]
    MessageHandler(anyhow::Error),

    #[error("malformed-data handler failed: {0:#}")]
    MalformedHandler(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
