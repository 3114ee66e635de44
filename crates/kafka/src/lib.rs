//! Kafka client construction and admin helpers for the shopstream demo.
//!
//! Every demo program shares one [`Config`] shape for its broker connection.
//! Producers auto-create their topics (the producer defines the topic and
//! provides the data; consumers never create topics), which is acceptable in
//! a demo but should be an infrastructure concern in production.

pub mod admin;
mod error;

pub use admin::{configure_broker, ensure_named_topic, ensure_topic};
pub use error::{Error, Result};

use rdkafka::admin::AdminClient;
use rdkafka::client::DefaultClientContext;
use rdkafka::consumer::{Consumer as _, StreamConsumer};
use rdkafka::producer::FutureProducer;
use rdkafka::ClientConfig;
use std::path::PathBuf;

/// Broker connection configuration shared by all demo programs.
#[derive(clap::Args, Debug, Clone)]
pub struct Config {
    /// Broker bootstrap server addresses.
    #[arg(long = "bootstrap", default_value = "localhost:9092")]
    pub bootstrap: Vec<String>,

    /// Kafka client id.
    #[arg(long = "client-id", default_value = "shopstream-demo")]
    pub client_id: String,

    /// Topic to produce to or consume from.
    #[arg(long = "topic", default_value = "")]
    pub topic: String,

    /// Consumer group id.
    #[arg(long = "group", default_value = "shopstream")]
    pub group: String,

    /// Path to a root CA certificate for broker TLS.
    #[arg(long = "tls-root-ca-path")]
    pub tls_root_ca: Option<PathBuf>,

    /// Delete and recreate the topic even if it already exists.
    #[arg(long = "recreate-topic")]
    pub recreate_topic: bool,

    /// Partition count used when creating the topic.
    #[arg(long = "topic-partitions", default_value_t = 1)]
    pub topic_partitions: i32,

    /// Topic config parameters (key=value) used when creating the topic.
    #[arg(long = "topic-config", value_name = "KEY=VALUE")]
    pub topic_config: Vec<String>,
}

impl Config {
    fn base_client_config(&self) -> ClientConfig {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", self.bootstrap.join(","))
            .set("client.id", &self.client_id);
        if let Some(ca_path) = &self.tls_root_ca {
            client_config
                .set("security.protocol", "ssl")
                .set("ssl.ca.location", ca_path.display().to_string());
        }
        client_config
    }
}

/// Build a producer for `config`.
///
/// Delivery waits are bounded by `message.timeout.ms`; the client's own
/// retry/idempotence policy applies below that, no retries are layered on
/// top by callers.
pub fn new_producer(config: &Config) -> Result<FutureProducer> {
    let producer = config
        .base_client_config()
        .set("message.timeout.ms", "30000")
        .set("linger.ms", "5")
        .create()?;
    Ok(producer)
}

/// Build a consumer subscribed to the configured topic.
pub fn new_consumer(config: &Config) -> Result<StreamConsumer> {
    new_consumer_for_topic(config, &config.topic)
}

/// Build a consumer subscribed to `topic`, for programs that consume more
/// than one topic under one config.
pub fn new_consumer_for_topic(config: &Config, topic: &str) -> Result<StreamConsumer> {
    let consumer: StreamConsumer = config
        .base_client_config()
        .set("group.id", &config.group)
        .set("auto.offset.reset", "earliest")
        .set("fetch.wait.max.ms", "1000")
        .set("isolation.level", "read_committed")
        .set("enable.auto.commit", "true")
        .set("enable.partition.eof", "false")
        .create()?;
    consumer.subscribe(&[topic])?;
    Ok(consumer)
}

/// Build an admin client for topic and broker configuration.
pub fn new_admin(config: &Config) -> Result<AdminClient<DefaultClientContext>> {
    let admin = config.base_client_config().create()?;
    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            bootstrap: vec!["localhost:9092".to_string()],
            client_id: "shopstream-demo".to_string(),
            topic: "carts".to_string(),
            group: "shopstream".to_string(),
            tls_root_ca: None,
            recreate_topic: false,
            topic_partitions: 1,
            topic_config: vec![],
        }
    }

    #[test]
    fn test_producer_builds_without_broker() {
        // Client construction only validates configuration; no connection
        // is attempted until the first send.
        assert!(new_producer(&test_config()).is_ok());
    }

    #[test]
    fn test_consumer_builds_and_subscribes_without_broker() {
        assert!(new_consumer(&test_config()).is_ok());
    }
}
