//! Schema-registry aware serialization for shopstream.
//!
//! The one decision this crate makes is codec selection
//! ([`MessageSerde::for_topic`]): with no registry URL configured, payloads
//! are plain wire-format encodings of a single message type; with a URL, the
//! latest schema for the topic's value subject is resolved once and every
//! payload is framed with its schema id.

pub mod client;
pub mod envelope;
mod serde;

pub use client::{subject_for_topic, RegisteredSchema, RegistryClient};
pub use serde::MessageSerde;

use event_types::{DecodeError, EncodeError};
use thiserror::Error;

/// Configuration for connecting to a Confluent-compatible schema registry.
///
/// An empty URL means "no registry": the plain single-type codec is used and
/// no network connection is ever opened.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Config {
    /// URL of the schema registry. Leave empty to disable registry framing.
    #[arg(long = "csr-url", default_value = "", env = "SHOPSTREAM_CSR_URL")]
    pub url: String,

    /// Username for registry basic auth, if any.
    #[arg(long = "csr-username", default_value = "")]
    pub username: String,

    /// Password for registry basic auth, if any.
    #[arg(long = "csr-password", default_value = "", env = "SHOPSTREAM_CSR_PASSWORD")]
    pub password: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("schema registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("schema registry returned status {status} for subject {subject}")]
    RegistryStatus {
        subject: String,
        status: reqwest::StatusCode,
    },

    #[error("no schema registered for subject {subject}")]
    SchemaNotFound { subject: String },

    #[error("payload does not start with the envelope magic byte (got {got:#04x})")]
    BadMagic { got: u8 },

    #[error("payload too short to carry a registry envelope")]
    TruncatedEnvelope,

    #[error("malformed message-index list in registry envelope")]
    BadMessageIndexes,

    #[error("envelope schema id {actual} does not match bound schema id {expected}")]
    SchemaIdMismatch { expected: u32, actual: u32 },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
