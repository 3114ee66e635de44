//! Topic and broker admin operations.

use crate::error::{Error, Result};
use crate::Config;
use rdkafka::admin::{
    AdminClient, AdminOptions, AlterConfig, NewTopic, ResourceSpecifier, TopicReplication,
};
use rdkafka::client::DefaultClientContext;
use rdkafka::types::RDKafkaErrorCode;
use std::time::Duration;
use tracing::info;

fn admin_options() -> AdminOptions {
    AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)))
}

/// Make sure the configured topic exists, honoring `recreate_topic`.
pub async fn ensure_topic(
    admin: &AdminClient<DefaultClientContext>,
    config: &Config,
) -> Result<()> {
    ensure_named_topic(admin, config, &config.topic).await
}

/// Make sure `topic` exists, using partition count and topic config from
/// `config`. With `recreate_topic` the topic is deleted first; otherwise an
/// already-existing topic is left untouched.
pub async fn ensure_named_topic(
    admin: &AdminClient<DefaultClientContext>,
    config: &Config,
    topic: &str,
) -> Result<()> {
    let opts = admin_options();

    if config.recreate_topic {
        let results = admin.delete_topics(&[topic], &opts).await?;
        for result in results {
            match result {
                Ok(name) => info!("deleted topic '{name}' before recreation"),
                // Deleting a topic that never existed is not a failure.
                Err((_, RDKafkaErrorCode::UnknownTopicOrPartition)) => {}
                Err((name, code)) => {
                    return Err(Error::TopicDeletion { topic: name, code });
                }
            }
        }
    }

    let entries: Vec<(String, String)> = config
        .topic_config
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.clone(), String::new()),
        })
        .collect();

    let mut new_topic = NewTopic::new(topic, config.topic_partitions, TopicReplication::Fixed(1));
    for (key, value) in &entries {
        new_topic = new_topic.set(key, value);
    }

    let results = admin.create_topics(&[new_topic], &opts).await?;
    for result in results {
        match result {
            Ok(name) => info!("created topic '{name}'"),
            Err((name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                info!("topic '{name}' already exists");
            }
            Err((name, code)) => {
                return Err(Error::TopicCreation { topic: name, code });
            }
        }
    }
    Ok(())
}

/// Set the broker's schema-validation mode.
///
/// The demo broker exposes validation as a dynamic broker config; flipping it
/// between enforcing and pass-through is how the DLQ flow is demonstrated.
pub async fn configure_broker(
    admin: &AdminClient<DefaultClientContext>,
    broker_id: i32,
    validate_mode: &str,
) -> Result<()> {
    let alter =
        AlterConfig::new(ResourceSpecifier::Broker(broker_id)).set("broker.validate.mode", validate_mode);
    let results = admin.alter_configs(&[alter], &admin_options()).await?;
    for result in results {
        if let Err((_, code)) = result {
            return Err(Error::BrokerConfig { broker_id, code });
        }
    }
    info!(broker_id, validate_mode, "configured broker validation mode");
    Ok(())
}
