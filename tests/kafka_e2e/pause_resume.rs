use crate::support::broker_config;
use csr::MessageSerde;
use event_types::Cart;
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use shopstream_consumer::Consumer;
use shopstream_producer::Producer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore = "requires a running Kafka broker on localhost:9092"]
async fn test_pause_stops_fetching_and_resume_restarts_it() {
    let mut rng = StdRng::seed_from_u64(11);
    let topic = format!("carts-pause-{}", eventgen::new_id(&mut rng));
    let config = broker_config(&topic);

    let admin = shopstream_kafka::new_admin(&config).unwrap();
    shopstream_kafka::ensure_topic(&admin, &config).await.unwrap();

    let producer = Producer::new(
        shopstream_kafka::new_producer(&config).unwrap(),
        MessageSerde::<Cart>::plain(),
        &topic,
    );
    for _ in 0..3 {
        let cart = eventgen::valid_cart(&mut rng);
        producer.produce(&cart.cart_id, &cart).await.unwrap();
    }

    let handled = Arc::new(AtomicUsize::new(0));
    let handled_count = Arc::clone(&handled);
    let consumer = Consumer::new(
        shopstream_kafka::new_consumer(&config).unwrap(),
        MessageSerde::<Cart>::plain(),
    )
    .with_message_handler(Arc::new(move |_: Cart| {
        let handled_count = Arc::clone(&handled_count);
        Box::pin(async move {
            handled_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }));

    // First batch also establishes the assignment that pause acts on.
    let cancel = CancellationToken::new();
    tokio::time::timeout(Duration::from_secs(30), consumer.run_until(3, &cancel))
        .await
        .expect("timed out waiting for the first batch")
        .unwrap();
    assert_eq!(handled.load(Ordering::SeqCst), 3);

    consumer.pause().unwrap();
    for _ in 0..3 {
        let cart = eventgen::valid_cart(&mut rng);
        producer.produce(&cart.cart_id, &cart).await.unwrap();
    }

    // A paused assignment fetches nothing, however many cycles run.
    for _ in 0..3 {
        let report = consumer.poll_once().await.unwrap();
        assert_eq!(report.total(), 0);
    }
    assert_eq!(handled.load(Ordering::SeqCst), 3);

    consumer.resume().unwrap();
    tokio::time::timeout(Duration::from_secs(30), consumer.run_until(3, &cancel))
        .await
        .expect("timed out waiting for records after resume")
        .unwrap();
    assert_eq!(handled.load(Ordering::SeqCst), 6);
}
