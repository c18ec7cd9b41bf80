use std::fmt;

use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use uuid::Uuid;

/// Metadata key carrying the per-call correlation identifier.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Identifier tying a client call to the server's log line for it.
///
/// Travels as gRPC request metadata; the server only reads it for logging,
/// so a missing or malformed value never fails a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a new unique correlation ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the correlation ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Attach this ID to outgoing request metadata.
    pub fn inject(&self, metadata: &mut MetadataMap) {
        // ---
        // UUIDs are plain ASCII; anything else is skipped rather than sent.
        if let Ok(value) = self.0.parse::<AsciiMetadataValue>() {
            metadata.insert(CORRELATION_HEADER, value);
        }
    }

    /// Read the ID from incoming request metadata, if present and printable.
    pub fn extract(metadata: &MetadataMap) -> Option<Self> {
        // ---
        metadata
            .get(CORRELATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(Self::from)
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
