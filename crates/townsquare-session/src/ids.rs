//! Identifier and secret generation.
//!
//! All identifiers are opaque strings to the rest of the system; this
//! module is the single place that knows their alphabets and lengths.
//! Session tokens and town secrets carry 128 bits of randomness —
//! enough that guessing a valid one is computationally infeasible.

use rand::Rng;
use townsquare_types::{PlayerId, TownId};

/// Alphabet for player ids: URL-safe, same shape clients already pass
/// around in paths and query strings.
const PLAYER_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

const PLAYER_ID_LEN: usize = 21;

/// Generates a fresh unguessable player id (21 URL-safe characters,
/// ~126 bits).
pub fn player_id() -> PlayerId {
    let mut rng = rand::rng();
    let id: String = (0..PLAYER_ID_LEN)
        .map(|_| PLAYER_ID_ALPHABET[rng.random_range(0..PLAYER_ID_ALPHABET.len())] as char)
        .collect();
    PlayerId(id)
}

/// Generates a fresh town id.
///
/// Town ids are short and human-friendly — 8 uppercase hex characters —
/// because people read them aloud to invite friends. Uniqueness within
/// the registry is what matters, not unguessability; the update secret
/// carries the privilege.
pub fn town_id() -> TownId {
    let mut rng = rand::rng();
    let bytes: [u8; 4] = rng.random();
    TownId(bytes.iter().map(|b| format!("{b:02X}")).collect())
}

/// Generates a session token: 32 lowercase hex characters (128 bits).
pub fn session_token() -> String {
    hex_token()
}

/// Generates a town update secret: 32 lowercase hex characters (128 bits).
pub fn town_secret() -> String {
    hex_token()
}

fn hex_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
