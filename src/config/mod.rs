//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pkgcloud.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PKGCLOUD_USER`, `PKGCLOUD_REPO`, ...
//! 4. **Command-line arguments** – `--user`/`-u`, `--repo`/`-r`, ...
//!
//! The API token is not part of this configuration. It is always read from
//! `PACKAGECLOUD_API_KEY` or `~/.packagecloud`.
//!
//! # Configuration File
//!
//! ```toml
//! user = "avidbots"
//! repo = "live"
//! distro = "ubuntu"
//! timeout_seconds = 60
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::packagecloud::endpoint::{
    DEFAULT_API_VERSION, DEFAULT_DISTRO, DEFAULT_HOST, DEFAULT_SCHEME,
};
use crate::packagecloud::error::ClientError;

const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
const DEFAULT_RELEASE: &str = "xenial";
const DEFAULT_ARCH: &str = "amd64";

/// Operation selected by the configured mode fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode<'a> {
    /// Print every package of the repository.
    ListPackages,
    /// Print the repository's package count.
    CountPackages,
    /// Search with packagecloud's query syntax.
    SearchPackages(&'a str),
    /// Filter packages whose name or version fully matches a regex.
    MatchPackages(&'a str),
    /// List the versions of one package.
    ListVersions(&'a str),
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pkgcloud::PkgcloudConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PkgcloudConfig::load()?;
/// let (user, repo) = config.require_repository_info()?;
/// println!("{user}/{repo} via {}", config.host());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PKGCLOUD",
    discovery(
        dotfile_name = ".pkgcloud.toml",
        config_file_name = "pkgcloud.toml",
        app_name = "pkgcloud"
    )
)]
pub struct PkgcloudConfig {
    /// packagecloud host, `packagecloud.io` when unset.
    #[ortho_config(cli_short = 'H')]
    pub host: Option<String>,

    /// URL scheme, `https` when unset.
    #[ortho_config(cli_short = 'S')]
    pub scheme: Option<String>,

    /// API version path segment, `v1` when unset.
    #[ortho_config(cli_short = 'a')]
    pub api_version: Option<String>,

    /// Repository owner.
    ///
    /// Can be provided via:
    /// - CLI: `--user <USER>` or `-u <USER>`
    /// - Environment: `PKGCLOUD_USER`
    /// - Config file: `user = "..."`
    #[ortho_config(cli_short = 'u')]
    pub user: Option<String>,

    /// Repository name.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `PKGCLOUD_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Distribution used for search and versions lookups, `ubuntu` when unset.
    #[ortho_config(cli_short = 'd')]
    pub distro: Option<String>,

    /// Per-request timeout in seconds.
    #[ortho_config(cli_short = 't')]
    pub timeout_seconds: u64,

    /// Prints the package count instead of the package list.
    #[ortho_config(cli_short = 'c')]
    pub count: bool,

    /// packagecloud search query.
    #[ortho_config(cli_short = 's')]
    pub search: Option<String>,

    /// Regular expression matched against package names and versions.
    #[ortho_config(cli_short = 'p')]
    pub pattern: Option<String>,

    /// Package whose versions should be listed.
    #[ortho_config(cli_short = 'x')]
    pub versions_of: Option<String>,

    /// Distribution release for versions lookups, `xenial` when unset.
    #[ortho_config(cli_short = 'R')]
    pub release: Option<String>,

    /// Architecture for versions lookups, `amd64` when unset.
    #[ortho_config(cli_short = 'A')]
    pub arch: Option<String>,

    /// Enables debug logging.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so this is CLI and file only.
    #[ortho_config(cli_short = 'v')]
    pub verbose: bool,
}

impl Default for PkgcloudConfig {
    fn default() -> Self {
        Self {
            host: None,
            scheme: None,
            api_version: None,
            user: None,
            repo: None,
            distro: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            count: false,
            search: None,
            pattern: None,
            versions_of: None,
            release: None,
            arch: None,
            verbose: false,
        }
    }
}

impl PkgcloudConfig {
    /// packagecloud host.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or(DEFAULT_SCHEME)
    }

    /// API version path segment.
    #[must_use]
    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    /// Distribution name.
    #[must_use]
    pub fn distro(&self) -> &str {
        self.distro.as_deref().unwrap_or(DEFAULT_DISTRO)
    }

    /// Distribution release.
    #[must_use]
    pub fn release(&self) -> &str {
        self.release.as_deref().unwrap_or(DEFAULT_RELEASE)
    }

    /// Package architecture.
    #[must_use]
    pub fn arch(&self) -> &str {
        self.arch.as_deref().unwrap_or(DEFAULT_ARCH)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Determines the operation from the mode fields.
    ///
    /// When several are set, `versions_of` wins over `pattern`, which wins
    /// over `search`, which wins over `count`.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode<'_> {
        if let Some(package) = self.versions_of.as_deref() {
            OperationMode::ListVersions(package)
        } else if let Some(pattern) = self.pattern.as_deref() {
            OperationMode::MatchPackages(pattern)
        } else if let Some(query) = self.search.as_deref() {
            OperationMode::SearchPackages(query)
        } else if self.count {
            OperationMode::CountPackages
        } else {
            OperationMode::ListPackages
        }
    }

    /// Returns user and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when user or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), ClientError> {
        match (&self.user, &self.repo) {
            (Some(user), Some(repo)) => Ok((user.as_str(), repo.as_str())),
            (None, _) => Err(ClientError::Configuration {
                message: "repository user is required (use --user or -u)".to_owned(),
            }),
            (_, None) => Err(ClientError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
