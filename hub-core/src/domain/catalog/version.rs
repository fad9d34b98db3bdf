// hub-core/src/domain/catalog/version.rs

use std::cmp::Ordering;

use super::model::Version;

/// One dot-separated component of a version string.
///
/// Numeric segments compare by value and always sort before textual ones,
/// so `1.10.0` > `1.3.0` and `1.0.0` < `1.0.rc1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Numeric(u64),
    Text(String),
}

/// Sort key for semantic version strings (`major.minor.patch...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    segments: Vec<Segment>,
}

impl VersionKey {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let segments = trimmed
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => Segment::Numeric(n),
                Err(_) => Segment::Text(part.to_string()),
            })
            .collect();

        Self { segments }
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic over segments; a strict prefix sorts first (1.2 < 1.2.0).
        self.segments.cmp(&other.segments)
    }
}

/// Sorts versions ascending so the latest release ends up last.
/// Equal keys keep their incoming order.
pub fn sort_versions(versions: &mut [Version]) {
    versions.sort_by_cached_key(|v| VersionKey::new(&v.version));
}
