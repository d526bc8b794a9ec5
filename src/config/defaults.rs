use crate::config::types::*;
use crate::constants;

// Config and ConfigInput derive Default

impl Default for Database {
    fn default() -> Self {
        Self {
            target_url: None,
            history_table: HistoryTable::default(),
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            name: "migres_history".to_string(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            migrations_dir: "migrations".into(),
            versioned_prefix: constants::VERSIONED_PREFIX.to_string(),
            baseline_prefix: constants::BASELINE_PREFIX.to_string(),
            repeatable_prefix: constants::REPEATABLE_PREFIX.to_string(),
            test_data_prefix: constants::TEST_DATA_PREFIX.to_string(),
            suffixes: vec![constants::SQL_SUFFIX.to_string()],
            encoding: "UTF-8".to_string(),
            mixed: false,
        }
    }
}
