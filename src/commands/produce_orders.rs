//! Checkout-funnel generator: each generated cart starts a checkout, and
//! about 90% of checkouts complete into an order.

use csr::MessageSerde;
use event_types::{CheckoutStarted, OrderCompleted};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use shopstream_producer::Producer;
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

    /// Stop after this many checkouts; unlimited when absent.
    #[arg(long = "max-records")]
    pub max_records: Option<i64>,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let admin = shopstream_kafka::new_admin(&args.kafka)?;
    shopstream_kafka::ensure_named_topic(&admin, &args.kafka, &args.checkout_topic).await?;
    shopstream_kafka::ensure_named_topic(&admin, &args.kafka, &args.order_topic).await?;

    let client = shopstream_kafka::new_producer(&args.kafka)?;
    let checkout_producer = Producer::new(
        client.clone(),
        MessageSerde::<CheckoutStarted>::for_topic(&args.csr, &args.checkout_topic).await?,
        &args.checkout_topic,
    );
    let order_producer = Producer::new(
        client,
        MessageSerde::<OrderCompleted>::for_topic(&args.csr, &args.order_topic).await?,
        &args.order_topic,
    );

    tracing::info!(
        checkout = args.checkout_topic,
        order = args.order_topic,
        "producing checkout-funnel events"
    );

    let mut rng = StdRng::from_entropy();
    let mut checkouts: i64 = 0;
    while !cancel.is_cancelled() {
        if let Some(max) = args.max_records {
            if checkouts >= max {
                break;
            }
        }

        let cart = eventgen::valid_cart(&mut rng);
        let checkout = eventgen::checkout_started(&mut rng, &cart);
        match checkout_producer
            .produce_unless_cancelled(&checkout.checkout_id, &checkout, &cancel)
            .await
        {
            Ok(true) => {
                // Most checkouts complete; the rest are abandoned.
                if rng.gen_range(0..100) < 90 {
                    let order = eventgen::order_completed(&mut rng, &checkout);
                    match order_producer
                        .produce_unless_cancelled(&order.order_id, &order, &cancel)
                        .await
                    {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(error) => tracing::error!(%error, "error producing order"),
                    }
                }
            }
            // Shutdown fired while the delivery ack was pending.
            Ok(false) => break,
            // A failed checkout still ends the funnel for this cart.
            Err(error) => tracing::error!(%error, "error producing checkout"),
        }

        checkouts += 1;
        if checkouts % 250 == 0 {
            tracing::info!(checkouts, "produced checkouts");
        }
    }

    tracing::info!(checkouts, "exiting funnel producer");
    Ok(())
}
