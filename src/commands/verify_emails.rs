//! Email verification demo loop.
//!
//! Each round exercises the three kinds of data a topic can carry:
//!
//! - a valid address update, applied through the change-emitting store so
//!   the event on the topic comes from a real mutation,
//! - a wire-valid update whose new address is not an email address at all,
//!   produced directly to the topic,
//! - bytes that are not a message of any kind.
//!
//! A verifier consumer reads the round back and tries to mark each id
//! verified. Verification failures are logged and never fatal: malformed
//! and semantically invalid data are exactly what this demo expects.

use csr::MessageSerde;
use event_types::EmailUpdated;
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use shopstream_consumer::{Consumer, MessageHandler};
use shopstream_producer::Producer;
use shopstream_storage::{EmailStore, EventEmitter, InMemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    #[command(flatten)]
    pub csr: csr::Config,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let topic = super::topic_or_default(&args.kafka.topic, "email-updated");

    let admin = shopstream_kafka::new_admin(&args.kafka)?;
    shopstream_kafka::ensure_named_topic(&admin, &args.kafka, &topic).await?;

    let client = shopstream_kafka::new_producer(&args.kafka)?;
    let store: Arc<dyn EmailStore> = Arc::new(EventEmitter::new(
        InMemoryStore::new(),
        Producer::new(
            client.clone(),
            MessageSerde::<EmailUpdated>::for_topic(&args.csr, &topic).await?,
            &topic,
        ),
    ));
    let direct_producer = Producer::new(
        client,
        MessageSerde::<EmailUpdated>::for_topic(&args.csr, &topic).await?,
        &topic,
    );
    let consumer = Consumer::new(
        shopstream_kafka::new_consumer_for_topic(&args.kafka, &topic)?,
        MessageSerde::<EmailUpdated>::for_topic(&args.csr, &topic).await?,
    )
    .with_message_handler(verify_handler(Arc::clone(&store)));

    tracing::info!(topic, "starting verification loop");

    let mut rng = StdRng::from_entropy();
    while !cancel.is_cancelled() {
        let mut expected = 0;

        // Valid: mutate the store, which emits the change event itself.
        let id = eventgen::new_id(&mut rng);
        let address = eventgen::email_address(&mut rng);
        store.update_email(&id, &address).await?;
        expected += 1;

        // Semantically invalid: wire-valid, but the new address is nonsense.
        let invalid = eventgen::semantically_invalid_email_updated(&mut rng, "");
        match direct_producer
            .produce_unless_cancelled(&invalid.id, &invalid, &cancel)
            .await
        {
            Ok(true) => expected += 1,
            Ok(false) => break,
            Err(error) => {
                tracing::error!(%error, "failed to produce semantically invalid update")
            }
        }

        // Malformed: not a message at all.
        match direct_producer
            .produce_invalid_unless_cancelled(&eventgen::new_id(&mut rng), &cancel)
            .await
        {
            Ok(true) => expected += 1,
            Ok(false) => break,
            Err(error) => tracing::error!(%error, "failed to produce malformed data"),
        }

        // Read the round back before starting the next one.
        consumer.run_until(expected, &cancel).await?;

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(1)) => {}
        }
    }
    Ok(())
}

fn verify_handler(store: Arc<dyn EmailStore>) -> MessageHandler<EmailUpdated> {
    Arc::new(move |message: EmailUpdated| {
        let store = Arc::clone(&store);
        Box::pin(async move {
            match store.verify_email(&message.id, &message.new_address).await {
                Ok(()) => tracing::info!(
                    id = message.id,
                    old_address = message.old_address,
                    new_address = message.new_address,
                    "verified email"
                ),
                // Unknown ids and stale addresses are expected here; the
                // semantically invalid case always lands in this arm.
                Err(error) => {
                    tracing::warn!(id = message.id, %error, "failed to verify email")
                }
            }
            Ok(())
        })
    })
}
