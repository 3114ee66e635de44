//! Browsing-event generator: searches, list views, and list filters to
//! three topics in round-robin order.

use csr::MessageSerde;
use event_types::{ProductListFiltered, ProductListViewed, ProductsSearched};
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use shopstream_producer::Producer;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    #[command(flatten)]
    pub csr: csr::Config,

    /// Topic for ProductsSearched events.
    #[arg(long = "search-topic", default_value = "products-searched")]
    pub search_topic: String,

    /// Topic for ProductListViewed events.
    #[arg(long = "list-viewed-topic", default_value = "product-list-viewed")]
    pub list_viewed_topic: String,

    /// Topic for ProductListFiltered events.
    #[arg(long = "list-filtered-topic", default_value = "product-list-filtered")]
    pub list_filtered_topic: String,

    /// Stop after this many events; unlimited when absent.
    #[arg(long = "max-records")]
    pub max_records: Option<i64>,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let admin = shopstream_kafka::new_admin(&args.kafka)?;
    for topic in [
        &args.search_topic,
        &args.list_viewed_topic,
        &args.list_filtered_topic,
    ] {
        shopstream_kafka::ensure_named_topic(&admin, &args.kafka, topic).await?;
    }

    let client = shopstream_kafka::new_producer(&args.kafka)?;
    let search_producer = Producer::new(
        client.clone(),
        MessageSerde::<ProductsSearched>::for_topic(&args.csr, &args.search_topic).await?,
        &args.search_topic,
    );
    let viewed_producer = Producer::new(
        client.clone(),
        MessageSerde::<ProductListViewed>::for_topic(&args.csr, &args.list_viewed_topic).await?,
        &args.list_viewed_topic,
    );
    let filtered_producer = Producer::new(
        client,
        MessageSerde::<ProductListFiltered>::for_topic(&args.csr, &args.list_filtered_topic)
            .await?,
        &args.list_filtered_topic,
    );

    tracing::info!(
        search = args.search_topic,
        viewed = args.list_viewed_topic,
        filtered = args.list_filtered_topic,
        "producing browsing events"
    );

    let mut rng = StdRng::from_entropy();
    let mut produced: i64 = 0;
    while !cancel.is_cancelled() {
        if let Some(max) = args.max_records {
            if produced >= max {
                break;
            }
        }

        let result = match produced % 3 {
            0 => {
                let event = eventgen::products_searched(&mut rng);
                search_producer
                    .produce_unless_cancelled(&event.search_id, &event, &cancel)
                    .await
            }
            1 => {
                let event = eventgen::product_list_viewed(&mut rng);
                viewed_producer
                    .produce_unless_cancelled(&event.view_id, &event, &cancel)
                    .await
            }
            _ => {
                let event = eventgen::product_list_filtered(&mut rng);
                filtered_producer
                    .produce_unless_cancelled(&event.filter_id, &event, &cancel)
                    .await
            }
        };
        match result {
            Ok(true) => {}
            // Shutdown fired while the delivery ack was pending.
            Ok(false) => break,
            Err(error) => tracing::error!(%error, "error producing browsing event"),
        }

        produced += 1;
        if produced % 250 == 0 {
            tracing::info!(produced, "produced browsing events");
        }
    }

    tracing::info!(produced, "exiting browsing producer");
    Ok(())
}
