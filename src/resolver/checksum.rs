//! Content checksums for drift detection and repeatable re-application.

/// Deterministic fingerprint of script content. Same bytes, same checksum,
/// independent of path or how often it is computed.
pub fn calculate_checksum(content: &[u8]) -> String {
    format!("{:x}", md5::compute(content))
}

/// The checksum a caller compares against a previously applied repeatable
/// migration to decide re-application. Same algorithm over the same bytes,
/// but only repeatable migrations carry one.
pub fn equivalent_checksum(repeatable: bool, content: &[u8]) -> Option<String> {
    if repeatable {
        Some(calculate_checksum(content))
    } else {
        None
    }
}
