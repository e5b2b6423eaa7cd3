//! Small helpers used alongside configuration trees.
//!
//! Failures are returned as [`UtilError`]s and logged; nothing here exits the
//! process.

mod errors;

use md5::{Digest, Md5};
use rand::{RngCore, rngs::OsRng};

pub use errors::UtilError;

/// Characters produced by [`rand_string`].
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercase hex MD5 digest of `text`.
pub fn md5_hex(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

/// Generates `len` characters from [`ALPHABET`] using the operating-system RNG.
pub fn rand_string(len: usize) -> Result<String, UtilError> {
    // Largest multiple of the alphabet size that fits in a byte; higher bytes
    // are rejected so every character is equally likely.
    let limit = (u8::MAX as usize + 1) / ALPHABET.len() * ALPHABET.len();

    let mut out = String::with_capacity(len);
    let mut buf = [0u8; 64];
    while out.len() < len {
        OsRng.try_fill_bytes(&mut buf).map_err(|e| {
            tracing::error!(error = %e, "Random source failed");
            UtilError::Random {
                reason: e.to_string(),
            }
        })?;
        let missing = len - out.len();
        out.extend(
            buf.iter()
                .filter(|&&b| (b as usize) < limit)
                .map(|&b| ALPHABET[b as usize % ALPHABET.len()] as char)
                .take(missing),
        );
    }
    Ok(out)
}

/// Rounds half away from zero at `places` decimal places.
pub fn round(value: f64, places: i32) -> f64 {
    let base = 10f64.powi(places);
    (value * base).round() / base
}
