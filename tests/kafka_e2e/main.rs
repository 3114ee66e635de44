//! Broker E2E tests
//!
//! Produce/consume round trips against a real broker. These are ignored by
//! default; run them with a broker listening on localhost:9092:
//!
//! ```bash
//! cargo test --test kafka_e2e -- --ignored
//! ```

mod pause_resume;
mod round_trip;
mod support;
