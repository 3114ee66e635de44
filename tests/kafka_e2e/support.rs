use shopstream_kafka::Config;

/// Broker config pointing at the local test broker, with a fresh consumer
/// group per topic so reruns start from a clean offset.
pub fn broker_config(topic: &str) -> Config {
    Config {
        bootstrap: vec!["localhost:9092".to_string()],
        client_id: "shopstream-e2e".to_string(),
        topic: topic.to_string(),
        group: format!("e2e-{topic}"),
        tls_root_ca: None,
        recreate_topic: false,
        topic_partitions: 1,
        topic_config: vec![],
    }
}
