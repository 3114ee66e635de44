//! Checkout-funnel consumer: one consumer per topic, run concurrently
//! under the shared cancellation token. Both consumers are dropped when
//! this function returns, which releases their group membership.

use csr::MessageSerde;
use event_types::{CheckoutStarted, OrderCompleted};
use shopstream_consumer::{Consumer, MessageHandler};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    #[command(flatten)]
    pub csr: csr::Config,

    /// Topic for CheckoutStarted events.
    #[arg(long = "checkout-topic", default_value = "checkout-started")]
    pub checkout_topic: String,

    /// Topic for OrderCompleted events.
    #[arg(long = "order-topic", default_value = "order-completed")]
    pub order_topic: String,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let checkout_consumer = Consumer::new(
        shopstream_kafka::new_consumer_for_topic(&args.kafka, &args.checkout_topic)?,
        MessageSerde::<CheckoutStarted>::for_topic(&args.csr, &args.checkout_topic).await?,
    )
    .with_message_handler(checkout_handler());

    let order_consumer = Consumer::new(
        shopstream_kafka::new_consumer_for_topic(&args.kafka, &args.order_topic)?,
        MessageSerde::<OrderCompleted>::for_topic(&args.csr, &args.order_topic).await?,
    )
    .with_message_handler(order_handler());

    tracing::info!(
        checkout = args.checkout_topic,
        order = args.order_topic,
        "starting consume"
    );

    let (checkout_result, order_result) = tokio::join!(
        checkout_consumer.run(&cancel),
        order_consumer.run(&cancel),
    );
    checkout_result?;
    order_result?;
    Ok(())
}

fn checkout_handler() -> MessageHandler<CheckoutStarted> {
    Arc::new(|checkout: CheckoutStarted| {
        Box::pin(async move {
            tracing::info!(
                checkout_id = checkout.checkout_id,
                cart_id = checkout.cart_id,
                total_cents = checkout.total_cents,
                "checkout started"
            );
            Ok(())
        })
    })
}

fn order_handler() -> MessageHandler<OrderCompleted> {
    Arc::new(|order: OrderCompleted| {
        Box::pin(async move {
            tracing::info!(
                order_id = order.order_id,
                checkout_id = order.checkout_id,
                total_cents = order.total_cents,
                "order completed"
            );
            Ok(())
        })
    })
}
