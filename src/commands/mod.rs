//! Subcommand implementations, one module per program.

pub mod configure;
pub mod consume;
pub mod consume_dlq;
pub mod consume_orders;
pub mod produce;
pub mod produce_browsing;
pub mod produce_orders;
pub mod verify_emails;

/// The topic from the shared broker config, or the command's conventional
/// default when none was given.
fn topic_or_default(configured: &str, default: &str) -> String {
    if configured.is_empty() {
        default.to_string()
    } else {
        configured.to_string()
    }
}
