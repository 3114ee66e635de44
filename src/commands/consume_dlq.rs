//! Dead-letter queue consumer.
//!
//! Each DLQ record wraps the original key and value of a rejected produce.
//! The handler re-decodes the value as a cart and explains the rejection by
//! running the same semantic checks the broker enforces. A record it cannot
//! explain is an error: it means validation rejected something this program
//! does not understand, which deserves a human.

use anyhow::Context as _;
use csr::MessageSerde;
use event_types::{validate_cart, Cart, DlqRecord, EventMessage as _};
use shopstream_consumer::{Consumer, MessageHandler};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    #[command(flatten)]
    pub csr: csr::Config,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let topic = super::topic_or_default(&args.kafka.topic, "dlq");

    let serde = MessageSerde::<DlqRecord>::for_topic(&args.csr, &topic).await?;
    let consumer = Consumer::new(
        shopstream_kafka::new_consumer_for_topic(&args.kafka, &topic)?,
        serde,
    )
    .with_message_handler(dlq_handler());

    tracing::info!(topic, "starting consume");
    consumer.run(&cancel).await?;
    Ok(())
}

fn dlq_handler() -> MessageHandler<DlqRecord> {
    Arc::new(|record: DlqRecord| {
        Box::pin(async move {
            let cart = Cart::decode(&record.value)
                .context("failed to decode dead-lettered value as a cart")?;

            match validate_cart(&cart) {
                Err(violation) => {
                    tracing::info!(
                        cart_id = cart.cart_id,
                        topic = record.topic,
                        reason = record.reason,
                        %violation,
                        "dead-lettered cart failed validation"
                    );
                    Ok(())
                }
                Ok(()) => anyhow::bail!(
                    "dead-lettered cart {} for an unknown reason",
                    cart.cart_id
                ),
            }
        })
    })
}
