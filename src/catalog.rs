use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// A raw migration script as yielded by a resource catalog.
/// Immutable for the duration of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResource {
    pub filename: String,
    pub relative_path: String,
    pub absolute_path: Option<PathBuf>,
    pub bytes: Vec<u8>,
}

impl RawResource {
    /// Decode the raw bytes with the configured encoding.
    ///
    /// Only UTF-8 is supported; any other configured encoding is a fatal
    /// configuration error rather than a silent mis-decode.
    pub fn contents(&self, encoding: &str) -> Result<String> {
        if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
            bail!(
                "Unsupported encoding '{}' for {}: only UTF-8 is supported",
                encoding,
                self.filename
            );
        }

        String::from_utf8(self.bytes.clone())
            .with_context(|| format!("Script {} is not valid UTF-8", self.filename))
    }
}

/// Source of raw migration scripts. Returns resources in unspecified order;
/// final ordering is the assembler's job, not the catalog's.
pub trait ResourceCatalog {
    fn list_resources(&self, prefix: &str, suffixes: &[String]) -> Result<Vec<RawResource>>;
}

/// Catalog over a flat migrations directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResourceCatalog for DirectoryCatalog {
    fn list_resources(&self, prefix: &str, suffixes: &[String]) -> Result<Vec<RawResource>> {
        let mut resources = Vec::new();

        // A missing directory is an empty catalog, not an error
        if !self.dir.exists() {
            return Ok(resources);
        }

        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read migrations directory {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if !filename.starts_with(prefix) || !suffixes.iter().any(|s| filename.ends_with(s)) {
                continue;
            }

            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read migration script {}", path.display()))?;

            resources.push(RawResource {
                filename: filename.to_string(),
                relative_path: filename.to_string(),
                absolute_path: Some(path),
                bytes,
            });
        }

        Ok(resources)
    }
}

/// In-memory catalog, used by tests and embedders that carry scripts
/// somewhere other than a directory tree
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    resources: Vec<RawResource>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filename: &str, contents: &str) {
        self.resources.push(RawResource {
            filename: filename.to_string(),
            relative_path: filename.to_string(),
            absolute_path: None,
            bytes: contents.as_bytes().to_vec(),
        });
    }
}

impl ResourceCatalog for InMemoryCatalog {
    fn list_resources(&self, prefix: &str, suffixes: &[String]) -> Result<Vec<RawResource>> {
        Ok(self
            .resources
            .iter()
            .filter(|r| {
                r.filename.starts_with(prefix)
                    && suffixes.iter().any(|s| r.filename.ends_with(s))
            })
            .cloned()
            .collect())
    }
}
