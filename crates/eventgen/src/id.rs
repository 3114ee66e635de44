//! Identifier generation.

use rand::Rng;
use uuid::Uuid;

/// Generate a new UUID v4 string from the provided RNG.
///
/// Drawing the bytes from the caller's RNG keeps generation deterministic
/// under a seeded RNG, which the tests rely on.
pub fn new_id<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes).to_string()
}
