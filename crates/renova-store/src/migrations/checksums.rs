//! Checksum validation for migrations
//!
//! Computes SHA256 checksums of migration SQL to detect edits to migrations
//! that were already applied

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_checksum() {
        let checksum = compute_checksum("SELECT 1");
        assert_eq!(checksum.len(), 64); // SHA256 is 64 hex chars
        assert_eq!(checksum, compute_checksum("SELECT 1"));
        assert_ne!(checksum, compute_checksum("SELECT 2"));
    }
}
