//! Email addresses and email-change events.

use crate::id::new_id;
use event_types::EmailUpdated;
use rand::Rng;

const NAMES: &[&str] = &[
    "ada", "bruno", "carla", "dmitri", "elena", "felix", "greta", "hiro", "ines", "jonas",
    "kavya", "lars", "maya", "nadia", "oscar", "priya",
];

const DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "mail.example.net",
    "inbox.example.io",
];

// Obviously-not-an-address values for exercising semantic validation
// downstream: they decode fine but fail any address check.
const ANIMALS: &[&str] = &[
    "capuchin", "ocelot", "wombat", "axolotl", "pangolin", "tapir", "quokka", "ibex",
];

/// A plausible synthetic email address.
pub fn email_address<R: Rng>(rng: &mut R) -> String {
    let name = NAMES[rng.gen_range(0..NAMES.len())];
    let number = rng.gen_range(1..1000);
    let domain = DOMAINS[rng.gen_range(0..DOMAINS.len())];
    format!("{name}{number}@{domain}")
}

/// An email change for `id`, moving from `old_address` to a fresh address.
pub fn email_updated<R: Rng>(rng: &mut R, id: &str, old_address: &str) -> EmailUpdated {
    EmailUpdated {
        id: id.to_string(),
        old_address: old_address.to_string(),
        new_address: email_address(rng),
    }
}

/// A change whose new address is not an email address at all. The record
/// is wire-valid, so it reaches consumers, which must reject it on meaning.
pub fn semantically_invalid_email_updated<R: Rng>(rng: &mut R, old_address: &str) -> EmailUpdated {
    EmailUpdated {
        id: new_id(rng),
        old_address: old_address.to_string(),
        new_address: ANIMALS[rng.gen_range(0..ANIMALS.len())].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_email_address_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let address = email_address(&mut rng);
            let (local, domain) = address.split_once('@').unwrap();
            assert!(!local.is_empty());
            assert!(domain.contains('.'));
        }
    }

    #[test]
    fn test_email_updated_carries_old_address() {
        let mut rng = StdRng::seed_from_u64(42);
        let event = email_updated(&mut rng, "user-1", "ada1@example.com");
        assert_eq!(event.id, "user-1");
        assert_eq!(event.old_address, "ada1@example.com");
        assert!(event.new_address.contains('@'));
        assert_ne!(event.new_address, event.old_address);
    }

    #[test]
    fn test_semantically_invalid_has_no_at_sign() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let event = semantically_invalid_email_updated(&mut rng, "");
            assert!(!event.new_address.contains('@'));
            assert!(!event.id.is_empty());
        }
    }
}
