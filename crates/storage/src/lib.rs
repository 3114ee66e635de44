//! Email storage.
//!
//! [`EmailStore`] is the seam: an in-memory implementation backs the demo,
//! and [`EventEmitter`] wraps any implementation to publish a change event
//! after each successful address update.

pub mod emitter;
pub mod memory;

pub use emitter::EventEmitter;
pub use memory::InMemoryStore;

use async_trait::async_trait;
use event_types::UserEmail;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("no email stored for id {id}")]
    NotFound { id: String },

    #[error("stored address for id {id} does not match the address being verified")]
    AddressMismatch { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Store of one email record per id.
///
/// Verification state follows the address: any address update drops the
/// record back to unverified, and a verify only succeeds against the
/// currently stored address.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// The record for `id`, or [`Error::NotFound`].
    async fn get_email(&self, id: &str) -> Result<UserEmail>;

    /// Set the address for `id`, creating the record if absent.
    ///
    /// Returns the previous address, empty for a fresh record. The
    /// verified flag is always cleared.
    async fn update_email(&self, id: &str, address: &str) -> Result<String>;

    /// Mark `id` verified, provided `address` matches the stored one.
    async fn verify_email(&self, id: &str, address: &str) -> Result<()>;
}
