//! Cart consumer.
//!
//! Flags any cart that arrives with a zero-quantity line item: with
//! broker-side validation enforced those never reach this consumer, so
//! seeing one means validation is off (or set to pass-through).

use csr::MessageSerde;
use event_types::Cart;
use shopstream_consumer::{Consumer, MessageHandler};
use std::sync::atomic::{AtomicU64, Ordering};
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
    let topic = super::topic_or_default(&args.kafka.topic, "carts");

    let serde = MessageSerde::<Cart>::for_topic(&args.csr, &topic).await?;
    let consumer = Consumer::new(
        shopstream_kafka::new_consumer_for_topic(&args.kafka, &topic)?,
        serde,
    )
    .with_message_handler(cart_handler());

    tracing::info!(topic, "starting consume");
    consumer.run(&cancel).await?;
    Ok(())
}

fn cart_handler() -> MessageHandler<Cart> {
    let handled = Arc::new(AtomicU64::new(0));
    Arc::new(move |cart: Cart| {
        let handled = Arc::clone(&handled);
        Box::pin(async move {
            for line_item in &cart.line_items {
                if line_item.quantity == 0 {
                    tracing::error!(
                        cart_id = cart.cart_id,
                        line_item_id = line_item.line_item_id,
                        "received a cart with a zero-quantity line item"
                    );
                }
            }

            let count = handled.fetch_add(1, Ordering::SeqCst) + 1;
            if count % 250 == 0 {
                tracing::info!(count, "received carts");
            }
            Ok(())
        })
    })
}
