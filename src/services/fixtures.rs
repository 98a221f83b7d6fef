use crate::domain::constants::OUTPUT_EXTENSION;
use crate::domain::error::HarnessError;
use crate::domain::models::{Fixture, FixtureEntry};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub fn compile_pattern(pattern: &str) -> Result<Regex, HarnessError> {
    Regex::new(pattern).map_err(|source| HarnessError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Walks `dir` recursively and returns every file whose name matches
/// `pattern`, sorted by path.
pub fn discover_fixtures(dir: &Path, pattern: &str) -> anyhow::Result<Vec<Fixture>> {
    if !dir.is_dir() {
        return Err(HarnessError::FixturesDirMissing(dir.to_path_buf()).into());
    }
    let re = compile_pattern(pattern)?;
    let mut out = Vec::new();
    walk(dir, &re, &mut out)?;
    out.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!(
        "found {} fixtures under {} matching {}",
        out.len(),
        dir.display(),
        pattern
    );
    Ok(out)
}

fn walk(dir: &Path, re: &Regex, out: &mut Vec<Fixture>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let path = entry.path();
        if ty.is_dir() {
            walk(&path, re, out)?;
            continue;
        }
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if re.is_match(&name) {
            out.push(Fixture {
                stem: fixture_stem(&path),
                path,
            });
        }
    }
    Ok(())
}

fn fixture_stem(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path the renderer writes for `fixture` when given `output_dir`.
pub fn output_path(output_dir: &Path, fixture: &Fixture) -> PathBuf {
    output_dir.join(format!("{}.{}", fixture.stem, OUTPUT_EXTENSION))
}

pub fn fixture_entries(fixtures: &[Fixture], output_dir: &Path) -> Vec<FixtureEntry> {
    fixtures
        .iter()
        .map(|f| FixtureEntry {
            fixture: f.path.clone(),
            output: output_path(output_dir, f),
        })
        .collect()
}

/// Stems shared by more than one fixture. Those fixtures overwrite each
/// other's output.
pub fn output_collisions(fixtures: &[Fixture]) -> Vec<(String, Vec<PathBuf>)> {
    let mut by_stem: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
    for f in fixtures {
        by_stem.entry(&f.stem).or_default().push(f.path.clone());
    }
    by_stem
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(stem, paths)| (stem.to_string(), paths))
        .collect()
}

pub fn warn_on_collisions(fixtures: &[Fixture]) {
    for (stem, paths) in output_collisions(fixtures) {
        let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        log::warn!(
            "{} fixtures render to {}.{}: {}",
            paths.len(),
            stem,
            OUTPUT_EXTENSION,
            listed.join(", ")
        );
    }
}
