use std::fmt::Write;

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of extracted page text, as 64 lowercase hex chars.
///
/// The digest is the equality proxy for "content changed": two runs that
/// extract identical text always fingerprint identically.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
