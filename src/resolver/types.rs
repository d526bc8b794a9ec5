use crate::catalog::RawResource;
use crate::resolver::version::Version;
use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// The four kinds of user migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationKind {
    Versioned,
    Baseline,
    Repeatable,
    TestData,
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MigrationKind::Versioned => "versioned",
            MigrationKind::Baseline => "baseline",
            MigrationKind::Repeatable => "repeatable",
            MigrationKind::TestData => "test-data",
        };
        write!(f, "{}", label)
    }
}

/// Opaque executable handle handed to the external executor. The resolution
/// engine never runs it; it only guarantees the SQL text is loaded and the
/// transaction-mode flag is carried through.
#[derive(Debug, Clone)]
pub struct SqlScript {
    source: String,
    sql: String,
    mixed: bool,
}

impl SqlScript {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Whether the script may mix transactional and non-transactional
    /// statements
    pub fn mixed(&self) -> bool {
        self.mixed
    }
}

/// Turns a raw resource into an executable script handle
pub trait ScriptFactory {
    fn create_script(&self, resource: &RawResource, sql: String, mixed: bool) -> Result<SqlScript>;
}

/// Default factory: wraps the decoded script text as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlScriptFactory;

impl ScriptFactory for SqlScriptFactory {
    fn create_script(&self, resource: &RawResource, sql: String, mixed: bool) -> Result<SqlScript> {
        Ok(SqlScript {
            source: resource.relative_path.clone(),
            sql,
            mixed,
        })
    }
}

/// One fully resolved migration, ready for the executor.
///
/// Invariants: `version` is absent iff the kind is Repeatable; `checksum`
/// is always present; `equivalent_checksum` is present iff the kind is
/// Repeatable.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMigration {
    pub kind: MigrationKind,
    pub version: Option<Version>,
    pub description: String,
    /// Relative path of the script that produced this migration
    pub script: String,
    pub checksum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equivalent_checksum: Option<String>,
    #[serde(skip)]
    pub executable: SqlScript,
}

/// The highest-version baseline resource discovered in the catalog
#[derive(Debug, Clone)]
pub struct BaselineCandidate {
    pub version: Version,
    pub script: String,
}
