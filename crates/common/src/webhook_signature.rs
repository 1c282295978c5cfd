//! Webhook signature verification for identity-provider events.
//!
//! The identity provider signs webhook deliveries with HMAC-SHA256 over
//! `"{msg_id}.{timestamp}.{body}"`, using a shared secret distributed as
//! `whsec_<base64 key>`. The signature header carries a space-separated list
//! of `v1,<base64 mac>` entries (multiple entries appear during secret
//! rotation); verification succeeds if any entry matches.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Prefix carried by identity-provider webhook secrets.
const SECRET_PREFIX: &str = "whsec_";

/// Parsed webhook signature headers.
#[derive(Debug, Clone)]
pub struct WebhookSignature {
    /// Unique message ID (`webhook-id` header).
    pub msg_id: String,
    /// Unix timestamp of the delivery attempt (`webhook-timestamp` header).
    pub timestamp: i64,
    /// Candidate signatures (base64, `v1` scheme only).
    pub signatures: Vec<String>,
}

impl WebhookSignature {
    /// Build from the three signature headers.
    ///
    /// `signature_header` format: `v1,<base64> [v1,<base64> ...]`. Entries
    /// with an unknown scheme are ignored.
    pub fn from_headers(
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
    ) -> AppResult<Self> {
        if msg_id.is_empty() {
            return Err(AppError::SignatureVerification(
                "Missing webhook-id header".to_string(),
            ));
        }

        let timestamp: i64 = timestamp.parse().map_err(|_| {
            AppError::SignatureVerification("Invalid webhook-timestamp header".to_string())
        })?;

        let signatures: Vec<String> = signature_header
            .split_whitespace()
            .filter_map(|entry| entry.strip_prefix("v1,"))
            .map(ToString::to_string)
            .collect();

        if signatures.is_empty() {
            return Err(AppError::SignatureVerification(
                "No v1 signature in webhook-signature header".to_string(),
            ));
        }

        Ok(Self {
            msg_id: msg_id.to_string(),
            timestamp,
            signatures,
        })
    }
}

/// Decode a `whsec_`-prefixed shared secret into raw key bytes.
fn decode_secret(secret: &str) -> AppResult<Vec<u8>> {
    let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
    BASE64
        .decode(encoded)
        .map_err(|e| AppError::Config(format!("Invalid webhook secret: {e}")))
}

/// Verify a webhook delivery against the shared secret.
///
/// Checks the timestamp against `tolerance_secs` (replay window) and then
/// compares the HMAC of `"{msg_id}.{timestamp}.{body}"` with each candidate
/// signature in constant time.
pub fn verify_webhook(
    secret: &str,
    signature: &WebhookSignature,
    body: &[u8],
    tolerance_secs: i64,
) -> AppResult<()> {
    verify_webhook_at(
        secret,
        signature,
        body,
        tolerance_secs,
        chrono::Utc::now().timestamp(),
    )
}

/// [`verify_webhook`] with an explicit clock, for testability.
pub fn verify_webhook_at(
    secret: &str,
    signature: &WebhookSignature,
    body: &[u8],
    tolerance_secs: i64,
    now: i64,
) -> AppResult<()> {
    if (now - signature.timestamp).abs() > tolerance_secs {
        return Err(AppError::SignatureVerification(
            "Webhook timestamp outside tolerance".to_string(),
        ));
    }

    let key = decode_secret(secret)?;

    for candidate in &signature.signatures {
        let Ok(candidate_bytes) = BASE64.decode(candidate) else {
            continue;
        };

        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| AppError::Config(format!("Invalid webhook secret length: {e}")))?;
        mac.update(signature.msg_id.as_bytes());
        mac.update(b".");
        mac.update(signature.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);

        if mac.verify_slice(&candidate_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(AppError::SignatureVerification(
        "No signature matched".to_string(),
    ))
}

/// Sign a payload the way the identity provider does.
///
/// Used by tests and by operators replaying captured deliveries.
pub fn sign_webhook(
    secret: &str,
    msg_id: &str,
    timestamp: i64,
    body: &[u8],
) -> AppResult<String> {
    let key = decode_secret(secret)?;

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| AppError::Config(format!("Invalid webhook secret length: {e}")))?;
    mac.update(msg_id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);

    Ok(format!("v1,{}", BASE64.encode(mac.finalize().into_bytes())))
}
