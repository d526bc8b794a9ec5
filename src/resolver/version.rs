use anyhow::{Result, bail};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A migration version: a non-empty sequence of numeric components.
///
/// Versions compare component-wise numerically, not lexically, so `2` < `10`
/// and `1.9` < `1.10`. Missing trailing components count as zero, so `1.0`
/// and `1` are the same version. Displays as the text it was parsed from.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<u64>,
}

impl Version {
    /// Parse a version from filename text, where components may be separated
    /// by `.` or `_`. Returns None for empty or non-numeric input; the caller
    /// treats that as an invalid filename, not an error.
    pub fn parse(text: &str) -> Option<Version> {
        if text.is_empty() {
            return None;
        }

        let normalized = text.replace('_', ".");
        let components = normalized
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<u64>>>()?;

        Some(Version {
            raw: normalized,
            components,
        })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Version> {
        match Version::parse(s) {
            Some(version) => Ok(version),
            None => bail!("Invalid migration version '{}'", s),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Skip trailing zeros so 1.0 hashes like 1, consistent with Eq
        let significant = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        self.components[..significant].hash(state);
    }
}

impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_versions() {
        assert_eq!(Version::parse("1").unwrap().components(), &[1]);
        assert_eq!(Version::parse("1.2.3").unwrap().components(), &[1, 2, 3]);
        assert_eq!(Version::parse("2_1").unwrap().components(), &[2, 1]);
        assert_eq!(
            Version::parse("20240115").unwrap().components(),
            &[20240115]
        );
    }

    #[test]
    fn test_parse_invalid_versions() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("abc").is_none());
        assert!(Version::parse("1.x").is_none());
        assert!(Version::parse("1..2").is_none());
        assert!(Version::parse("1_init").is_none());
    }

    #[test]
    fn test_numeric_not_lexical_ordering() {
        let v2: Version = "2".parse().unwrap();
        let v10: Version = "10".parse().unwrap();
        assert!(v2 < v10);

        let v1_9: Version = "1.9".parse().unwrap();
        let v1_10: Version = "1.10".parse().unwrap();
        assert!(v1_9 < v1_10);
    }

    #[test]
    fn test_trailing_zeros_equal() {
        let v1: Version = "1".parse().unwrap();
        let v1_0: Version = "1.0".parse().unwrap();
        assert_eq!(v1, v1_0);

        let v1_1: Version = "1.1".parse().unwrap();
        assert!(v1 < v1_1);
    }

    #[test]
    fn test_display_preserves_text() {
        let version: Version = "1.2.3".parse().unwrap();
        assert_eq!(version.to_string(), "1.2.3");

        // Underscore separators normalize to dots
        let version = Version::parse("1_2").unwrap();
        assert_eq!(version.to_string(), "1.2");
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Version::parse("1.0").unwrap());
        assert!(set.contains(&Version::parse("1").unwrap()));
    }
}
