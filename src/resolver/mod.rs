pub mod checksum;
pub mod name;
pub mod shim;
pub mod types;
pub mod version;

pub use name::{ParsedName, parse_resource_name};
pub use types::{
    BaselineCandidate, MigrationKind, ResolvedMigration, ScriptFactory, SqlScript,
    SqlScriptFactory,
};
pub use version::Version;

use crate::catalog::ResourceCatalog;
use crate::config::ResolverConfig;
use crate::history::{AppliedMigrationRecord, HistoryStore};
use anyhow::{Context, Result, bail};
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::{debug, info};

/// One resolution pass over a resource catalog.
///
/// Stateless: every call re-scans the catalog and re-queries history, so a
/// plan is never built from stale checksums or a cached schema state.
pub struct Resolver<'a> {
    config: &'a ResolverConfig,
    catalog: &'a dyn ResourceCatalog,
    scripts: &'a dyn ScriptFactory,
}

impl<'a> Resolver<'a> {
    pub fn new(
        config: &'a ResolverConfig,
        catalog: &'a dyn ResourceCatalog,
        scripts: &'a dyn ScriptFactory,
    ) -> Self {
        Self {
            config,
            catalog,
            scripts,
        }
    }

    /// Resolve the production-bound migration plan.
    ///
    /// Chooses between seeding from the baseline and replaying the versioned
    /// history, then appends the repeatable migrations and orders the whole
    /// list. The two branches are mutually exclusive: when the baseline
    /// branch is selected, versioned scripts do not appear in the plan at
    /// all, even ones newer than the baseline.
    pub async fn resolve(&self, history: &impl HistoryStore) -> Result<Vec<ResolvedMigration>> {
        let baseline = self.max_baseline_candidate()?;
        let applied = history
            .latest_applied()
            .await
            .context("Resolution aborted: could not read the applied-migration history")?;

        let mut migrations = Vec::new();

        match &baseline {
            Some(candidate) if use_baseline_branch(baseline.as_ref(), applied.as_ref()) => {
                info!(
                    "Seeding from baseline {} (version {})",
                    candidate.script, candidate.version
                );
                self.add_migrations(
                    &mut migrations,
                    &self.config.baseline_prefix,
                    MigrationKind::Baseline,
                )?;
            }
            _ => {
                debug!("Replaying versioned history");
                self.add_migrations(
                    &mut migrations,
                    &self.config.versioned_prefix,
                    MigrationKind::Versioned,
                )?;
            }
        }

        self.add_migrations(
            &mut migrations,
            &self.config.repeatable_prefix,
            MigrationKind::Repeatable,
        )?;

        detect_version_conflicts(&migrations)?;
        migrations.sort_by(compare_resolved);

        Ok(migrations)
    }

    /// Resolve the test-data migrations. Kept apart from [`Self::resolve`]:
    /// test-data scripts seed non-production schemas and must never enter a
    /// production-bound plan.
    pub fn resolve_test_data(&self) -> Result<Vec<ResolvedMigration>> {
        let mut migrations = Vec::new();
        self.add_migrations(
            &mut migrations,
            &self.config.test_data_prefix,
            MigrationKind::TestData,
        )?;

        detect_version_conflicts(&migrations)?;
        migrations.sort_by(compare_resolved);

        Ok(migrations)
    }

    /// Classify and assemble every resolvable resource under one prefix
    fn add_migrations(
        &self,
        migrations: &mut Vec<ResolvedMigration>,
        prefix: &str,
        kind: MigrationKind,
    ) -> Result<()> {
        for resource in self.catalog.list_resources(prefix, &self.config.suffixes)? {
            let rewritten = shim::rewrite_prefix(prefix, &resource.filename, self.config);
            let parsed = parse_resource_name(&rewritten, self.config);

            if !parsed.valid {
                debug!("Skipping unparseable file {}", resource.filename);
                continue;
            }
            if parsed.is_callback() {
                debug!("Skipping callback script {}", resource.filename);
                continue;
            }

            // A catalog is only required to return SOME superset ordering;
            // the classifier owns the final say on what a prefix query means.
            let expected_prefix = match kind {
                MigrationKind::Repeatable => &self.config.repeatable_prefix,
                _ => &self.config.versioned_prefix,
            };
            if parsed.prefix != *expected_prefix {
                debug!(
                    "Skipping {} (not a {} migration)",
                    resource.filename, kind
                );
                continue;
            }

            let sql = resource.contents(&self.config.encoding)?;
            let checksum = checksum::calculate_checksum(&resource.bytes);
            let equivalent_checksum = checksum::equivalent_checksum(
                kind == MigrationKind::Repeatable,
                &resource.bytes,
            );
            let executable = self
                .scripts
                .create_script(&resource, sql, self.config.mixed)?;

            // Repeatable migrations never carry a version
            let version = match kind {
                MigrationKind::Repeatable => None,
                _ => parsed.version,
            };

            migrations.push(ResolvedMigration {
                kind,
                version,
                description: parsed.description,
                script: resource.relative_path.clone(),
                checksum,
                equivalent_checksum,
                executable,
            });
        }

        Ok(())
    }

    /// The highest-version baseline resource, if any. Script names pass
    /// through the shim both ways so the candidate reports its true prefix.
    fn max_baseline_candidate(&self) -> Result<Option<BaselineCandidate>> {
        let prefix = &self.config.baseline_prefix;
        let mut best: Option<BaselineCandidate> = None;

        for resource in self.catalog.list_resources(prefix, &self.config.suffixes)? {
            let rewritten = shim::rewrite_prefix(prefix, &resource.filename, self.config);
            let parsed = parse_resource_name(&rewritten, self.config);

            if !parsed.valid || parsed.is_callback() {
                continue;
            }
            let Some(version) = parsed.version else {
                continue;
            };

            if best.as_ref().is_none_or(|b| version > b.version) {
                let script = shim::restore_prefix(&rewritten, prefix, self.config);
                best = Some(BaselineCandidate { version, script });
            }
        }

        Ok(best)
    }
}

/// The baseline decision table.
///
/// | baseline | history | latest script == baseline script | branch    |
/// |----------|---------|----------------------------------|-----------|
/// | no       | —       | —                                | versioned |
/// | yes      | no      | —                                | baseline  |
/// | yes      | yes     | yes                              | baseline  |
/// | yes      | yes     | no                               | versioned |
fn use_baseline_branch(
    baseline: Option<&BaselineCandidate>,
    applied: Option<&AppliedMigrationRecord>,
) -> bool {
    match (baseline, applied) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(candidate), Some(record)) => record.script == candidate.script,
    }
}

/// Fail fast on duplicate versions instead of leaving the tie to the
/// comparator
fn detect_version_conflicts(migrations: &[ResolvedMigration]) -> Result<()> {
    let conflicts: Vec<String> = migrations
        .iter()
        .filter_map(|m| m.version.clone().map(|v| (v, m.script.as_str())))
        .into_group_map()
        .into_iter()
        .filter(|(_, scripts)| scripts.len() > 1)
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(version, mut scripts)| {
            scripts.sort_unstable();
            format!("version {}: {}", version, scripts.join(", "))
        })
        .collect();

    if !conflicts.is_empty() {
        bail!(
            "Resolution conflict, duplicate migration versions found ({})",
            conflicts.join("; ")
        );
    }

    Ok(())
}

/// Total order over the resolved plan: versioned/baseline tier first in
/// ascending version order, then the repeatable tier ascending by
/// description.
fn compare_resolved(a: &ResolvedMigration, b: &ResolvedMigration) -> Ordering {
    match (&a.version, &b.version) {
        (Some(va), Some(vb)) => va.cmp(vb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.description.cmp(&b.description),
    }
}
