//! Machine-wide inventory collection.
//!
//! The full inventory is the global scope followed by every discovered
//! environment, in directory-listing order. Every call re-derives state from
//! conda with fresh subprocess invocations; nothing is cached in between, so
//! collection is O(number of environments) external calls.

use crate::backend::Backend;
use crate::error::Result;
use crate::types::PackageRecord;

/// Collect the installed packages for one scope (`None` = global).
pub fn collect(backend: &dyn Backend, environment: Option<&str>) -> Result<Vec<PackageRecord>> {
    backend.list_installed(environment)
}

/// Collect the full machine inventory.
///
/// Global scope first, then each discovered environment in enumeration
/// order. Duplicate (environment, name) pairs are not deduplicated; callers
/// that scan take the first match.
pub fn collect_all(backend: &dyn Backend) -> Result<Vec<PackageRecord>> {
    let mut records = backend.list_installed(None)?;
    for environment in backend.list_environments()? {
        records.extend(backend.list_installed(Some(&environment))?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::types::PackageRecord;

    #[test]
    fn test_collect_all_orders_global_then_environments() {
        let backend = MockBackend {
            environments: vec!["alpha".to_string(), "beta".to_string()],
            global: vec![PackageRecord::new("zlib", "1.2.8")],
            per_env: vec![
                (
                    "alpha".to_string(),
                    vec![PackageRecord::new("numpy", "1.7.1").in_environment("alpha")],
                ),
                (
                    "beta".to_string(),
                    vec![PackageRecord::new("scipy", "0.12.0").in_environment("beta")],
                ),
            ],
            ..Default::default()
        };

        let records = collect_all(&backend).unwrap();
        let names: Vec<String> = records.iter().map(PackageRecord::qualified_name).collect();
        assert_eq!(names, vec!["zlib", "alpha::numpy", "beta::scipy"]);
    }

    #[test]
    fn test_collect_single_scope() {
        let backend = MockBackend {
            global: vec![PackageRecord::new("zlib", "1.2.8")],
            ..Default::default()
        };

        let records = collect(&backend, None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "zlib");
    }
}
