//! Human-shareable group codes.
//!
//! Codes are what members paste into chat to point friends at their group,
//! so the alphabet drops lookalike symbols (0/O, 1/I/L).

use rand::RngExt;

/// Symbols allowed in a group code. 31 characters, no lookalikes.
pub const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Length of a generated group code.
pub const CODE_LEN: usize = 8;

/// Generate a group code.
///
/// Uniqueness is the caller's concern: check the store and retry on
/// collision.
pub fn generate() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
