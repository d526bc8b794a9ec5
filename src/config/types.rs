use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub migrations: Option<MigrationsInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub target_url: Option<String>,
    pub history_table: Option<HistoryTableInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HistoryTableInput {
    pub schema: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MigrationsInput {
    pub dir: Option<PathBuf>,
    pub versioned_prefix: Option<String>,
    pub baseline_prefix: Option<String>,
    pub repeatable_prefix: Option<String>,
    pub test_data_prefix: Option<String>,
    pub suffixes: Option<Vec<String>>,
    pub encoding: Option<String>,
    pub mixed: Option<bool>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: Database,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub target_url: Option<String>,
    pub history_table: HistoryTable,
}

/// Schema-qualified name of the applied-migration history table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTable {
    pub schema: String,
    pub name: String,
}

/// Everything one resolution pass needs. Passed into each call explicitly;
/// there is no process-wide resolver state.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub migrations_dir: PathBuf,
    pub versioned_prefix: String,
    pub baseline_prefix: String,
    pub repeatable_prefix: String,
    pub test_data_prefix: String,
    pub suffixes: Vec<String>,
    pub encoding: String,
    /// Mixed transaction mode: allow both transactional and non-transactional
    /// statements in one script. Carried through to the executor handle.
    pub mixed: bool,
}
