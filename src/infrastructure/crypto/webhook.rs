//! Webhook signature verification
//!
//! The payment provider signs every webhook delivery with an
//! HMAC-SHA-512 hex digest of the raw request body, keyed with the shared
//! secret. Verification must run before the payload is even parsed, and
//! the digest comparison must be constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Compute the hex HMAC-SHA-512 digest of `body` under `secret`.
///
/// Used by tests and by outbound tooling that replays provider events.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a provider signature against the raw request body.
///
/// Accepts upper- or lower-case hex. Returns `false` for malformed hex
/// rather than erroring; a garbage header is just an invalid signature.
/// The underlying comparison (`Mac::verify_slice`) is constant-time.
pub fn verify(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "wh_secret_for_tests";

    #[test]
    fn signed_body_verifies() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign(SECRET, body);
        assert!(verify(SECRET, body, &signature));
    }

    #[test]
    fn uppercase_hex_verifies() {
        let body = b"payload";
        let signature = sign(SECRET, body).to_uppercase();
        assert!(verify(SECRET, body, &signature));
    }

    #[test]
    fn tampered_body_fails() {
        let signature = sign(SECRET, b"original");
        assert!(!verify(SECRET, b"tampered", &signature));
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = sign(SECRET, b"payload");
        assert!(!verify("another-secret", b"payload", &signature));
    }

    #[test]
    fn malformed_hex_fails_without_panicking() {
        assert!(!verify(SECRET, b"payload", "not hex at all"));
        assert!(!verify(SECRET, b"payload", ""));
    }

    #[test]
    fn truncated_signature_fails() {
        let signature = sign(SECRET, b"payload");
        assert!(!verify(SECRET, b"payload", &signature[..32]));
    }
}
