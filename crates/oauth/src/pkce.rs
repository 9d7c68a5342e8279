//! PKCE (RFC 7636) verifier and S256 challenge generation.

use {
    base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD},
    rand::RngCore,
    sha2::{Digest, Sha256},
};

use crate::types::PkceChallenge;

/// Number of random bytes behind a verifier when no length is given.
pub const DEFAULT_VERIFIER_BYTES: usize = 64;

/// Generate a verifier from `length` random bytes, rendered as lowercase hex.
///
/// The output is `2 * length` characters long. `rand::rng()` is a CSPRNG
/// seeded from the operating system.
pub fn generate_verifier(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `BASE64URL(SHA256(verifier))` without padding.
pub fn derive_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Generate a fresh verifier and its matching challenge.
pub fn generate_pkce() -> PkceChallenge {
    let verifier = generate_verifier(DEFAULT_VERIFIER_BYTES);
    let challenge = derive_challenge(&verifier);
    PkceChallenge {
        verifier,
        challenge,
    }
}
