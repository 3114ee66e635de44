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
async fn test_produce_consume_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let topic = format!("carts-e2e-{}", eventgen::new_id(&mut rng));
    let config = broker_config(&topic);

    let admin = shopstream_kafka::new_admin(&config).unwrap();
    shopstream_kafka::ensure_topic(&admin, &config).await.unwrap();

    let producer = Producer::new(
        shopstream_kafka::new_producer(&config).unwrap(),
        MessageSerde::<Cart>::plain(),
        &topic,
    );
    let mut produced = Vec::new();
    for _ in 0..5 {
        let cart = eventgen::valid_cart(&mut rng);
        producer.produce(&cart.cart_id, &cart).await.unwrap();
        produced.push(cart);
    }
    producer.produce_invalid("malformed-key").await.unwrap();

    let handled = Arc::new(AtomicUsize::new(0));
    let malformed = Arc::new(AtomicUsize::new(0));
    let seen_ids: Arc<std::sync::Mutex<Vec<String>>> = Arc::default();

    let handled_count = Arc::clone(&handled);
    let ids = Arc::clone(&seen_ids);
    let malformed_count = Arc::clone(&malformed);
    let consumer = Consumer::new(
        shopstream_kafka::new_consumer(&config).unwrap(),
        MessageSerde::<Cart>::plain(),
    )
    .with_message_handler(Arc::new(move |cart: Cart| {
        let handled_count = Arc::clone(&handled_count);
        let ids = Arc::clone(&ids);
        Box::pin(async move {
            handled_count.fetch_add(1, Ordering::SeqCst);
            ids.lock().unwrap().push(cart.cart_id);
            Ok(())
        })
    }))
    .with_malformed_handler(Arc::new(move |_, _| {
        let malformed_count = Arc::clone(&malformed_count);
        Box::pin(async move {
            malformed_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }));

    let cancel = CancellationToken::new();
    tokio::time::timeout(Duration::from_secs(30), consumer.run_until(6, &cancel))
        .await
        .expect("timed out waiting for records")
        .unwrap();

    assert_eq!(handled.load(Ordering::SeqCst), 5);
    assert_eq!(malformed.load(Ordering::SeqCst), 1);
    let expected_ids: Vec<_> = produced.iter().map(|c| c.cart_id.clone()).collect();
    assert_eq!(*seen_ids.lock().unwrap(), expected_ids);
}
