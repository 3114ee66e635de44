//! Handler types and the logging defaults.

use event_types::EventMessage;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a handler invocation.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Callback invoked with each successfully decoded message.
///
/// A returned error is fatal to the current batch.
pub type MessageHandler<M> = Arc<dyn Fn(M) -> HandlerFuture + Send + Sync>;

/// Callback invoked with the raw bytes and decode error of each record that
/// could not be decoded. A returned error is fatal to the current batch;
/// the default only logs.
pub type MalformedHandler = Arc<dyn Fn(Vec<u8>, csr::Error) -> HandlerFuture + Send + Sync>;

/// Default message handler: log the decoded message, never fail.
pub fn default_message_handler<M: EventMessage>() -> MessageHandler<M> {
    Arc::new(|message: M| {
        Box::pin(async move {
            tracing::info!(message_type = M::TYPE_NAME, ?message, "consumed message");
            Ok(())
        })
    })
}

/// Default malformed-data handler: log the payload length and the decode
/// error, never fail.
pub fn default_malformed_handler() -> MalformedHandler {
    Arc::new(|payload: Vec<u8>, error: csr::Error| {
        Box::pin(async move {
            tracing::info!(length = payload.len(), %error, "consumed malformed data");
            Ok(())
        })
    })
}
