//! Content fingerprinting. The digest is an equality oracle for change
//! detection, not a security boundary.

use sha2::{Digest, Sha256};

/// SHA-256 of the raw body, lowercase hex (64 chars). Deterministic; any byte
/// difference yields a different digest with overwhelming probability.
pub fn content_digest(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
