//! Line parsers for conda's listing and search output.
//!
//! Canonical conda lines are `<name>-<version>-<build>` where the name may
//! itself contain hyphens, so both splits come from the right. Lines that do
//! not fit the shape (headers, blanks, warnings interleaved in tool output)
//! parse to `None` and are silently skipped by callers.

use crate::types::PackageRecord;

/// Parse one line of `conda list -c` output into a record.
///
/// A non-empty `environment` hint is attached to the record so its visible
/// identity becomes `env::name`.
pub fn parse_list_line(line: &str, environment: Option<&str>) -> Option<PackageRecord> {
    let (name, version) = split_canonical(line)?;
    let record = PackageRecord::new(name, version);
    match environment {
        Some(env) if !env.is_empty() => Some(record.in_environment(env)),
        _ => Some(record),
    }
}

/// Parse one line of `conda search --canonical` output, returning the
/// version only when the build segment contains `build_tag`.
///
/// The tag filter keeps one interpreter build line per version, so the same
/// version is not counted once per build variant.
pub fn parse_search_line(line: &str, build_tag: &str) -> Option<String> {
    let (rest, build) = line.rsplit_once('-')?;
    if rest.is_empty() {
        return None;
    }
    let (_name, version) = rest.rsplit_once('-')?;
    if build.contains(build_tag) {
        Some(version.to_string())
    } else {
        None
    }
}

/// Split `<name>-<version>-<build>` into (name, version), from the right.
///
/// Exactly two right-partitions are performed, so any number of hyphens
/// embedded in the name survive. A line with fewer than two hyphens carries
/// no complete triple and yields `None`.
fn split_canonical(line: &str) -> Option<(&str, &str)> {
    let (rest, _build) = line.rsplit_once('-')?;
    if rest.is_empty() {
        return None;
    }
    rest.rsplit_once('-')
}
