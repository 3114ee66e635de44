//! Error types for client construction and admin operations.

use rdkafka::types::RDKafkaErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("failed to create topic {topic}: {code}")]
    TopicCreation {
        topic: String,
        code: RDKafkaErrorCode,
    },

    #[error("failed to delete topic {topic}: {code}")]
    TopicDeletion {
        topic: String,
        code: RDKafkaErrorCode,
    },

    #[error("failed to alter broker {broker_id} config: {code}")]
    BrokerConfig {
        broker_id: i32,
        code: RDKafkaErrorCode,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
