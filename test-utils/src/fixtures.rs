//! Paths of the small comparison batch under `data/fixtures`.
//!
//! The batch has four queries: `rust programming language` (identical lists),
//! `weather in berlin` (partial overlap, the reference list has a trailing space in its key),
//! `cheap flights to tokyo` (no overlap) and `how to bake bread` (single shared result at a
//! different position).

use std::{
    env::var_os,
    io::{Error, ErrorKind, Result},
    path::{Path, PathBuf},
};

const FIXTURES_DIR: [&str; 2] = ["data", "fixtures"];

/// Resolves the path to a fixture file relative to the workspace directory.
fn resolve_fixture(file: impl AsRef<Path>) -> Result<PathBuf> {
    let manifest = var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing CARGO_MANIFEST_DIR"))?;
    let workspace = PathBuf::from(manifest)
        .parent()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing cargo workspace dir"))?
        .to_path_buf();

    FIXTURES_DIR
        .iter()
        .fold(workspace, |path, dir| path.join(dir))
        .join(file)
        .canonicalize()
}

/// Resolves the path to the query list.
pub fn queries() -> Result<PathBuf> {
    resolve_fixture("queries.txt")
}

/// Resolves the path to the results of the reference engine.
pub fn reference_results() -> Result<PathBuf> {
    resolve_fixture("reference_results.json")
}

/// Resolves the path to the results of the comparison engine.
pub fn comparison_results() -> Result<PathBuf> {
    resolve_fixture("comparison_results.json")
}
