pub mod defaults;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load the raw config file, tolerating a missing file (defaults apply)
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    if !Path::new(config_file).exists() {
        return Ok(ConfigInput::default());
    }

    let contents = std::fs::read_to_string(config_file)
        .with_context(|| format!("Failed to read config file {}", config_file))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", config_file))
}

/// Resolve raw input against defaults into a concrete configuration
pub fn resolve_config(input: ConfigInput) -> Config {
    let defaults = Config::default();

    let db_input = input.database.unwrap_or_default();
    let history_input = db_input.history_table.unwrap_or_default();
    let database = Database {
        target_url: db_input
            .target_url
            .or_else(|| std::env::var("DATABASE_URL").ok()),
        history_table: HistoryTable {
            schema: history_input
                .schema
                .unwrap_or(defaults.database.history_table.schema),
            name: history_input
                .name
                .unwrap_or(defaults.database.history_table.name),
        },
    };

    let mig_input = input.migrations.unwrap_or_default();
    let resolver = ResolverConfig {
        migrations_dir: mig_input
            .dir
            .unwrap_or(defaults.resolver.migrations_dir),
        versioned_prefix: mig_input
            .versioned_prefix
            .unwrap_or(defaults.resolver.versioned_prefix),
        baseline_prefix: mig_input
            .baseline_prefix
            .unwrap_or(defaults.resolver.baseline_prefix),
        repeatable_prefix: mig_input
            .repeatable_prefix
            .unwrap_or(defaults.resolver.repeatable_prefix),
        test_data_prefix: mig_input
            .test_data_prefix
            .unwrap_or(defaults.resolver.test_data_prefix),
        suffixes: mig_input.suffixes.unwrap_or(defaults.resolver.suffixes),
        encoding: mig_input.encoding.unwrap_or(defaults.resolver.encoding),
        mixed: mig_input.mixed.unwrap_or(defaults.resolver.mixed),
    };

    Config { database, resolver }
}
