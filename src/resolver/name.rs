use crate::config::ResolverConfig;
use crate::constants::{self, DESCRIPTION_SEPARATOR};
use crate::resolver::version::Version;

/// Structured metadata recovered from a migration filename.
///
/// Malformed names are represented as `valid = false` and silently dropped
/// by the resolver; foreign files in a migration directory must never abort
/// resolution.
#[derive(Debug, Clone)]
pub struct ParsedName {
    pub prefix: String,
    pub version: Option<Version>,
    pub description: String,
    pub suffix: String,
    pub valid: bool,
}

impl ParsedName {
    fn invalid() -> Self {
        Self {
            prefix: String::new(),
            version: None,
            description: String::new(),
            suffix: String::new(),
            valid: false,
        }
    }

    /// True when the name belongs to the reserved lifecycle-callback
    /// vocabulary rather than to a user migration
    pub fn is_callback(&self) -> bool {
        constants::is_callback_event(&self.prefix)
    }
}

/// Parse a filename against the `<prefix><version>__<description>.<suffix>`
/// grammar.
///
/// The parser natively understands the versioned prefix (version required),
/// the repeatable prefix (version forbidden), and callback event names. It
/// does NOT understand the baseline or test-data prefixes; those are rewritten
/// into the versioned prefix by the shim before reaching this function.
pub fn parse_resource_name(filename: &str, config: &ResolverConfig) -> ParsedName {
    let Some(suffix) = config
        .suffixes
        .iter()
        .find(|s| filename.ends_with(s.as_str()))
    else {
        return ParsedName::invalid();
    };

    let stem = &filename[..filename.len() - suffix.len()];

    // Single underscores inside the left part separate version digits;
    // the double underscore separates it from the description.
    let (left, raw_description) = match stem.split_once(DESCRIPTION_SEPARATOR) {
        Some((left, desc)) => (left, Some(desc)),
        None => (stem, None),
    };

    let description = raw_description.unwrap_or("").replace('_', " ");

    if constants::is_callback_event(left) {
        return ParsedName {
            prefix: left.to_string(),
            version: None,
            description,
            suffix: suffix.clone(),
            valid: true,
        };
    }

    if let Some(version_text) = left.strip_prefix(config.versioned_prefix.as_str()) {
        // Versioned grammar: version and description are both required
        let Some(version) = Version::parse(version_text) else {
            return ParsedName::invalid();
        };
        if raw_description.is_none_or(|d| d.is_empty()) {
            return ParsedName::invalid();
        }

        return ParsedName {
            prefix: config.versioned_prefix.clone(),
            version: Some(version),
            description,
            suffix: suffix.clone(),
            valid: true,
        };
    }

    if let Some(rest) = left.strip_prefix(config.repeatable_prefix.as_str()) {
        // Repeatable grammar: no version, description required
        if !rest.is_empty() || raw_description.is_none_or(|d| d.is_empty()) {
            return ParsedName::invalid();
        }

        return ParsedName {
            prefix: config.repeatable_prefix.clone(),
            version: None,
            description,
            suffix: suffix.clone(),
            valid: true,
        };
    }

    ParsedName::invalid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config() -> ResolverConfig {
        ResolverConfig::default()
    }

    #[rstest]
    #[case("V1__init.sql", "1", "init")]
    #[case("V2__add_table.sql", "2", "add table")]
    #[case("V1.2.3__multi_part.sql", "1.2.3", "multi part")]
    #[case("V2_1__underscore_version.sql", "2.1", "underscore version")]
    fn test_versioned_names(
        #[case] filename: &str,
        #[case] version: &str,
        #[case] description: &str,
    ) {
        let parsed = parse_resource_name(filename, &config());
        assert!(parsed.valid, "{} should parse", filename);
        assert_eq!(parsed.prefix, "V");
        assert_eq!(parsed.version.unwrap().to_string(), version);
        assert_eq!(parsed.description, description);
        assert_eq!(parsed.suffix, ".sql");
    }

    #[rstest]
    #[case("V1__init.txt")] // unrecognized suffix
    #[case("V__no_version.sql")]
    #[case("V1.sql")] // missing description
    #[case("V1__.sql")] // empty description
    #[case("Vabc__desc.sql")] // non-numeric version
    #[case("V1_init.sql")] // single underscore: "init" lands in the version
    #[case("1__no_prefix.sql")]
    #[case("X1__unknown_prefix.sql")]
    #[case("R1__versioned_repeatable.sql")]
    #[case("R.sql")]
    fn test_invalid_names(#[case] filename: &str) {
        let parsed = parse_resource_name(filename, &config());
        assert!(!parsed.valid, "{} should be invalid", filename);
    }

    #[test]
    fn test_repeatable_name() {
        let parsed = parse_resource_name("R__refresh_view.sql", &config());
        assert!(parsed.valid);
        assert_eq!(parsed.prefix, "R");
        assert!(parsed.version.is_none());
        assert_eq!(parsed.description, "refresh view");
    }

    #[test]
    fn test_callback_names_parse_and_flag() {
        let parsed = parse_resource_name("beforeMigrate.sql", &config());
        assert!(parsed.valid);
        assert!(parsed.is_callback());
        assert!(parsed.version.is_none());

        let parsed = parse_resource_name("afterMigrate__cleanup.sql", &config());
        assert!(parsed.valid);
        assert!(parsed.is_callback());
        assert_eq!(parsed.description, "cleanup");
    }

    #[test]
    fn test_custom_prefixes() {
        let config = ResolverConfig {
            versioned_prefix: "M".to_string(),
            ..ResolverConfig::default()
        };

        let parsed = parse_resource_name("M3__custom.sql", &config);
        assert!(parsed.valid);
        assert_eq!(parsed.prefix, "M");

        assert!(!parse_resource_name("V3__custom.sql", &config).valid);
    }

    #[test]
    fn test_longest_matching_suffix() {
        let config = ResolverConfig {
            suffixes: vec![".sql".to_string(), ".ddl".to_string()],
            ..ResolverConfig::default()
        };

        assert!(parse_resource_name("V1__init.ddl", &config).valid);
        assert!(!parse_resource_name("V1__init.pgc", &config).valid);
    }
}
