//! Content checksums for audit snapshots.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a string.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let a = calculate_checksum("dispatch");
        let b = calculate_checksum("dispatch");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_checksum_differs_on_content() {
        assert_ne!(calculate_checksum("a"), calculate_checksum("b"));
    }
}
