//! Record consumer for the shopstream demo.
//!
//! Split in two layers:
//!
//! - [`Dispatcher`]: decode-and-route semantics (in-order handling, decode
//!   failures to the malformed handler, handler errors abort the batch),
//!   testable without a broker.
//! - [`Consumer`]: the transport wrapper that drains poll batches from a
//!   `StreamConsumer` and feeds them through the dispatcher, plus the
//!   `run`/`run_until` outer loops and pause/resume controls.

mod consumer;
mod dispatcher;
mod error;
mod handlers;

pub use consumer::{Consumer, DEFAULT_MAX_BATCH};
pub use dispatcher::{BatchReport, ConsumedRecord, Dispatcher};
pub use error::{Error, Result};
pub use handlers::{
    default_malformed_handler, default_message_handler, HandlerFuture, MalformedHandler,
    MessageHandler,
};
