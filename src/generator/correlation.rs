//! Correlation IDs for request/response linkage.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix marking IDs minted by the test suite.
pub const CORRELATION_PREFIX: &str = "test";

/// Fresh correlation ID, `test-YYYYMMDD-HHMMSS-<8 hex>`.
pub fn generate_correlation_id() -> String {
    correlation_id_at(Utc::now(), Uuid::new_v4())
}

fn correlation_id_at(now: DateTime<Utc>, nonce: Uuid) -> String {
    let hex = nonce.simple().to_string();
    format!(
        "{}-{}-{}",
        CORRELATION_PREFIX,
        now.format("%Y%m%d-%H%M%S"),
        &hex[..8]
    )
}
