//! Outcome of reading a raw byte buffer as text

use serde::{Deserialize, Serialize};

/// Decoded text plus the encoding that was detected and the one actually used
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadResult {
    /// Decoded text with any leading byte-order mark removed
    pub text: String,

    /// Canonical label reported by detection, or `"unknown"`
    pub detected_encoding: String,

    /// Canonical label of the codec that decoded the buffer
    pub used_encoding: String,
}
