//! Salted password hashing.
//!
//! Hashes are PBKDF2-HMAC-SHA256 encoded as
//! `pbkdf2:sha256:<iterations>$<salt>$<hex digest>`. The iteration count is
//! stored with the hash, so raising [`DEFAULT_ITERATIONS`] never invalidates
//! existing passwords.

use pbkdf2::pbkdf2_hmac;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::Sha256;

/// PBKDF2 rounds for newly hashed passwords.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

const METHOD: &str = "pbkdf2:sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hash a password with a fresh random salt and the default iteration count.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

/// Hash a password with a fresh random salt and an explicit iteration count.
#[must_use]
pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect();
    let digest = derive(password, &salt, iterations);
    format!("{METHOD}:{iterations}${salt}${}", hex::encode(digest))
}

/// Check a password against an encoded hash.
///
/// Returns `false` for malformed hashes and unknown methods.
#[must_use]
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Some((method, salt, digest_hex)) = split(encoded) else {
        return false;
    };
    let Some(iterations) = method
        .strip_prefix(METHOD)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|n| n.parse::<u32>().ok())
    else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };

    let actual = derive(password, salt, iterations);
    constant_time_eq(&actual, &expected)
}

fn split(encoded: &str) -> Option<(&str, &str, &str)> {
    let mut parts = encoded.splitn(3, '$');
    let method = parts.next()?;
    let salt = parts.next()?;
    let digest = parts.next()?;
    Some((method, salt, digest))
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
