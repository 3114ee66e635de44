//! Cart load generator.
//!
//! A fixed pool of workers shares one attempt counter, so `--max-records`
//! bounds the total across the pool. About 1% of carts carry a zero-quantity
//! line item; with broker-side validation enforced those end up in the DLQ.

use anyhow::Context as _;
use csr::MessageSerde;
use event_types::Cart;
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use shopstream_producer::Producer;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    #[command(flatten)]
    pub csr: csr::Config,

    /// Stop after this many produce attempts; unlimited when absent.
    #[arg(long = "max-records")]
    pub max_records: Option<i64>,

    /// Number of concurrent producer workers.
    #[arg(long = "workers", default_value_t = 50)]
    pub workers: usize,
}

pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    let topic = super::topic_or_default(&args.kafka.topic, "carts");

    let admin = shopstream_kafka::new_admin(&args.kafka)?;
    shopstream_kafka::ensure_named_topic(&admin, &args.kafka, &topic).await?;

    let serde = MessageSerde::<Cart>::for_topic(&args.csr, &topic).await?;
    let producer = Producer::new(shopstream_kafka::new_producer(&args.kafka)?, serde, &topic);

    match args.max_records {
        Some(max) => tracing::info!(max, "producing records"),
        None => tracing::info!("producing unlimited records"),
    }

    let attempts = Arc::new(AtomicI64::new(0));
    let mut workers = Vec::with_capacity(args.workers);
    for _ in 0..args.workers {
        let producer = producer.clone();
        let attempts = Arc::clone(&attempts);
        let cancel = cancel.clone();
        let max_records = args.max_records;
        workers.push(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            loop {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(max) = max_records {
                    if attempt > max {
                        return;
                    }
                }
                if cancel.is_cancelled() {
                    return;
                }

                let cart = eventgen::cart(&mut rng);
                let key = eventgen::new_id(&mut rng);
                match producer.produce_unless_cancelled(&key, &cart, &cancel).await {
                    Ok(true) => {}
                    // Shutdown fired while the delivery ack was pending.
                    Ok(false) => return,
                    // A failed send counts as an attempt; keep going.
                    Err(error) => tracing::error!(%error, "error producing cart"),
                }

                if attempt % 250 == 0 {
                    tracing::info!(produced = attempt, "produced records");
                }
            }
        }));
    }

    for worker in workers {
        worker.await.context("producer worker panicked")?;
    }

    if let Some(max) = args.max_records {
        tracing::info!(max, "exiting after producing the requested records");
    }
    Ok(())
}
