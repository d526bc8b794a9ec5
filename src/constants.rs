// Migration file naming conventions
pub const VERSIONED_PREFIX: &str = "V";
pub const BASELINE_PREFIX: &str = "B";
pub const REPEATABLE_PREFIX: &str = "R";
pub const TEST_DATA_PREFIX: &str = "T";

// Separator between the version/prefix part and the description
pub const DESCRIPTION_SEPARATOR: &str = "__";

// Default recognized script suffix
pub const SQL_SUFFIX: &str = ".sql";

// Configuration file name
pub const CONFIG_FILENAME: &str = "migres.yaml";

/// Reserved lifecycle-callback vocabulary. Scripts named after one of these
/// events belong to the callback machinery, never to the resolved plan.
pub const CALLBACK_EVENTS: &[&str] = &[
    "beforeClean",
    "afterClean",
    "beforeMigrate",
    "beforeEachMigrate",
    "afterEachMigrate",
    "afterMigrate",
    "afterMigrateError",
    "beforeUndo",
    "beforeEachUndo",
    "afterEachUndo",
    "afterUndo",
    "beforeRepair",
    "afterRepair",
    "beforeInfo",
    "afterInfo",
    "beforeValidate",
    "afterValidate",
    "beforeBaseline",
    "afterBaseline",
    "createSchema",
];

pub fn is_callback_event(name: &str) -> bool {
    CALLBACK_EVENTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_vocabulary_lookup() {
        assert!(is_callback_event("beforeMigrate"));
        assert!(is_callback_event("afterMigrateError"));
        assert!(!is_callback_event("beforemigrate"));
        assert!(!is_callback_event("V1"));
    }
}
