//! Typed views of packagecloud package records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ClientError;

/// One package as listed by the repository, search and versions endpoints.
///
/// Only the fields the client reads are modelled; everything else in the
/// record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name.
    #[serde(default)]
    pub name: String,
    /// Upstream version string.
    #[serde(default)]
    pub version: String,
    /// Packaging release, absent for some package types.
    #[serde(default)]
    pub release: Option<String>,
    /// File name of the uploaded artefact.
    #[serde(default)]
    pub filename: Option<String>,
    /// Distribution version, e.g. `ubuntu/xenial`.
    #[serde(default)]
    pub distro_version: Option<String>,
    /// API path that would delete the package.
    #[serde(default)]
    pub destroy_url: Option<String>,
    /// Web page for the package.
    #[serde(default)]
    pub package_html_url: Option<String>,
}

impl Package {
    /// Renders the package as `{name}_{version}-{release}`.
    ///
    /// The release suffix is omitted when the record has none.
    ///
    /// # Example
    ///
    /// ```
    /// use pkgcloud::packagecloud::Package;
    ///
    /// let package = Package {
    ///     name: "ros-core".to_owned(),
    ///     version: "1.5.0".to_owned(),
    ///     release: Some("0xenial".to_owned()),
    ///     ..Package::default()
    /// };
    /// assert_eq!(package.display_name(), "ros-core_1.5.0-0xenial");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.release.as_deref() {
            Some(release) if !release.is_empty() => {
                format!("{}_{}-{release}", self.name, self.version)
            }
            _ => format!("{}_{}", self.name, self.version),
        }
    }

    /// Decodes raw JSON items into packages.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when an item is not a package object.
    pub fn from_items(items: Vec<Value>) -> Result<Vec<Self>, ClientError> {
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|error| ClientError::Decode {
                    message: format!("package record is malformed: {error}"),
                })
            })
            .collect()
    }
}
