//! Shared data helpers for the package listing BDD tests.

use serde_json::{Value, json};

use super::domain::{PackageCount, PageSize};

/// Builds `count` package records named `pkg-0`, `pkg-1`, ...
pub(crate) fn generate_packages(count: PackageCount) -> Vec<Value> {
    (0..count.value())
        .map(|index| {
            json!({
                "name": format!("pkg-{index}"),
                "version": "1.0.0",
                "release": "1",
                "distro_version": "ubuntu/xenial",
                "filename": format!("pkg-{index}_1.0.0-1_amd64.deb")
            })
        })
        .collect()
}

/// Splits packages into `(page number, items)` pairs.
pub(crate) fn paginate(packages: &[Value], per_page: PageSize) -> Vec<(usize, Vec<Value>)> {
    packages
        .chunks(per_page.value())
        .enumerate()
        .map(|(index, chunk)| (index + 1, chunk.to_vec()))
        .collect()
}
