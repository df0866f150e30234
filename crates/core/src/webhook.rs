//! Identity-provider webhook signature verification.
//!
//! The identity provider signs each delivery Svix-style: the secret is
//! `whsec_` followed by a base64 key, the signed content is
//! `"{message_id}.{timestamp}.{body}"`, and the `signature` header carries
//! one or more space-separated `v1,<base64>` entries. Verification also
//! rejects stale timestamps to bound replay.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CoreError;
use crate::types::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed skew between the signed timestamp and now, in seconds.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Prefix carried by provider webhook secrets.
pub const SECRET_PREFIX: &str = "whsec_";

/// Decode a `whsec_`-prefixed webhook secret into its raw key bytes.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>, CoreError> {
    let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CoreError::Internal(format!("Invalid webhook secret encoding: {e}")))
}

/// Compute the base64 signature for a webhook delivery.
///
/// Exposed so tests (and any locally-run provider simulator) can produce
/// valid signed deliveries.
pub fn sign(key: &[u8], message_id: &str, timestamp: i64, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(format!("{message_id}.{timestamp}.{body}").as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a webhook delivery signature.
///
/// `signature_header` may contain several space-separated `v1,<base64>`
/// entries (the provider rotates secrets); verification succeeds if any
/// entry matches. Fails with [`CoreError::Unauthorized`] on a stale
/// timestamp or when no entry verifies.
pub fn verify(
    key: &[u8],
    message_id: &str,
    timestamp: i64,
    signature_header: &str,
    body: &str,
    now: Timestamp,
) -> Result<(), CoreError> {
    let skew = (now.timestamp() - timestamp).abs();
    if skew > TIMESTAMP_TOLERANCE_SECS {
        return Err(CoreError::Unauthorized(
            "Webhook timestamp outside tolerance".into(),
        ));
    }

    let signed_content = format!("{message_id}.{timestamp}.{body}");

    for entry in signature_header.split_whitespace() {
        let Some(encoded) = entry.strip_prefix("v1,") else {
            continue;
        };
        let Ok(candidate) = base64::engine::general_purpose::STANDARD.decode(encoded) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(signed_content.as_bytes());
        if mac.verify_slice(&candidate).is_ok() {
            return Ok(());
        }
    }

    Err(CoreError::Unauthorized(
        "Webhook signature verification failed".into(),
    ))
}
