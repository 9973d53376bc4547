use sha2::{Digest, Sha256};

/// SHA-256 of an archive's path string, hex-encoded.
///
/// This is a path fingerprint, not a content hash: the archive bytes are
/// never read, so the value is stable across runs for the same path.
pub fn fingerprint_path(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}
