//! SQL schema-migration resolution engine.
//!
//! Discovers migration scripts from a resource catalog, parses and
//! classifies their filenames, computes content checksums, decides whether a
//! fresh schema should be seeded from a baseline script or replayed through
//! the versioned history, and produces one deterministically ordered plan
//! for an external executor.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod history;
pub mod resolver;
