//! Codec selection: plain single-type encoding or registry-framed encoding.

use crate::client::{subject_for_topic, RegistryClient};
use crate::{envelope, Config, Error, Result};
use event_types::EventMessage;
use std::marker::PhantomData;

/// A matched encoder/decoder pair for one message type.
///
/// The two variants are interchangeable from the producer's and consumer's
/// point of view; which one a program gets is decided once, by
/// [`MessageSerde::for_topic`], from whether a registry URL is configured.
///
/// The registry variant owns its client handle; dropping the serde releases
/// the connection pool.
pub enum MessageSerde<M: EventMessage> {
    /// Plain wire-format encoding. Assumes every payload on the topic is an
    /// `M`; never contacts a registry.
    Plain(PhantomData<M>),
    /// Registry-bound: every payload is framed with the schema id resolved
    /// at construction, and the id is checked again on decode.
    Registry {
        client: RegistryClient,
        schema_id: u32,
    },
}

impl<M: EventMessage> MessageSerde<M> {
    /// The no-registry codec.
    pub fn plain() -> Self {
        Self::Plain(PhantomData)
    }

    /// Select the codec for `topic` based on `config`.
    ///
    /// With an empty registry URL this makes no network calls. Otherwise the
    /// latest schema for `{topic}-value` is resolved once and bound for the
    /// life of the serde; an unreachable registry or missing subject fails
    /// construction.
    pub async fn for_topic(config: &Config, topic: &str) -> Result<Self> {
        if config.url.is_empty() {
            return Ok(Self::plain());
        }
        let client = RegistryClient::new(config)?;
        let subject = subject_for_topic(topic);
        let schema = client.latest_schema(&subject).await?;
        tracing::info!(
            subject,
            schema_id = schema.id,
            version = schema.version,
            message_type = M::TYPE_NAME,
            "bound registry schema"
        );
        Ok(Self::Registry {
            client,
            schema_id: schema.id,
        })
    }

    /// The bound schema id, if this serde is registry-backed.
    pub fn schema_id(&self) -> Option<u32> {
        match self {
            Self::Plain(_) => None,
            Self::Registry { schema_id, .. } => Some(*schema_id),
        }
    }

    /// The registry client handle, if this serde is registry-backed.
    pub fn registry(&self) -> Option<&RegistryClient> {
        match self {
            Self::Plain(_) => None,
            Self::Registry { client, .. } => Some(client),
        }
    }

    pub fn encode(&self, message: &M) -> Result<Vec<u8>> {
        let payload = message.encode()?;
        match self {
            Self::Plain(_) => Ok(payload),
            Self::Registry { schema_id, .. } => Ok(envelope::frame(*schema_id, &payload)),
        }
    }

    /// Decode a payload into an `M`.
    ///
    /// For the registry variant, an envelope carrying a different schema id
    /// than the one bound at construction is rejected: this demo binds
    /// exactly one schema per topic, so a foreign id means damage.
    pub fn decode(&self, bytes: &[u8]) -> Result<M> {
        match self {
            Self::Plain(_) => Ok(M::decode(bytes)?),
            Self::Registry { schema_id, .. } => {
                let (actual, payload) = envelope::unframe(bytes)?;
                if actual != *schema_id {
                    return Err(Error::SchemaIdMismatch {
                        expected: *schema_id,
                        actual,
                    });
                }
                Ok(M::decode(payload)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::{Cart, EmailUpdated, LineItem, Product, INVALID_PAYLOAD};

    fn sample_cart() -> Cart {
        Cart {
            cart_id: "cart-1".to_string(),
            line_items: vec![LineItem {
                line_item_id: "li-1".to_string(),
                product: Some(Product {
                    product_id: "p-1".to_string(),
                    name: "Desk Lamp".to_string(),
                    unit_price_cents: 2499,
                }),
                quantity: 2,
                unit_price_cents: 2499,
            }],
        }
    }

    fn registry_serde<M: EventMessage>(schema_id: u32) -> MessageSerde<M> {
        let config = Config {
            url: "http://localhost:8081".to_string(),
            username: String::new(),
            password: String::new(),
        };
        MessageSerde::Registry {
            client: RegistryClient::new(&config).unwrap(),
            schema_id,
        }
    }

    #[tokio::test]
    async fn test_empty_url_selects_plain() {
        let serde = MessageSerde::<Cart>::for_topic(&Config::default(), "carts")
            .await
            .unwrap();
        assert_eq!(serde.schema_id(), None);
        assert!(serde.registry().is_none());
    }

    #[test]
    fn test_plain_round_trip() {
        let serde = MessageSerde::<Cart>::plain();
        let cart = sample_cart();
        let decoded = serde.decode(&serde.encode(&cart).unwrap()).unwrap();
        assert_eq!(cart, decoded);
    }

    #[test]
    fn test_registry_round_trip() {
        let serde = registry_serde::<Cart>(47);
        let cart = sample_cart();
        let encoded = serde.encode(&cart).unwrap();
        assert_eq!(encoded[0], envelope::MAGIC_BYTE);
        let decoded = serde.decode(&encoded).unwrap();
        assert_eq!(cart, decoded);
    }

    #[test]
    fn test_registry_rejects_foreign_schema_id() {
        let writer = registry_serde::<Cart>(47);
        let reader = registry_serde::<Cart>(48);
        let encoded = writer.encode(&sample_cart()).unwrap();
        assert!(matches!(
            reader.decode(&encoded),
            Err(Error::SchemaIdMismatch {
                expected: 48,
                actual: 47
            })
        ));
    }

    #[test]
    fn test_plain_rejects_invalid_payload() {
        let serde = MessageSerde::<EmailUpdated>::plain();
        assert!(matches!(
            serde.decode(INVALID_PAYLOAD),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_registry_rejects_invalid_payload() {
        // The leading null byte happens to match the envelope magic, but the
        // payload is still too short and malformed past the frame.
        let serde = registry_serde::<EmailUpdated>(1);
        assert!(serde.decode(INVALID_PAYLOAD).is_err());
    }
}
