//! API base URL construction and repository identity wrappers.

use std::fmt;

use url::Url;

use super::error::ClientError;
use super::token::ApiToken;

/// Default packagecloud API host.
pub const DEFAULT_HOST: &str = "packagecloud.io";

/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "https";

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default distribution used for searches and version lookups.
pub const DEFAULT_DISTRO: &str = "ubuntu";

/// Returns `url` as a string with any embedded credentials removed.
#[must_use]
pub fn redact(url: &Url) -> String {
    let mut clean = url.clone();
    if clean.set_username("").is_err() || clean.set_password(None).is_err() {
        return format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    }
    clean.to_string()
}

/// Versioned API base: `{scheme}://{token}:@{host}/api/{version}`.
///
/// The token travels as the basic-auth username with an empty password.
/// `Debug` output never includes it.
///
/// # Example
///
/// ```
/// use pkgcloud::packagecloud::{ApiEndpoint, ApiToken};
///
/// let endpoint = ApiEndpoint::new(&ApiToken::new("tok"), "https", "packagecloud.io", "v1")
///     .expect("endpoint should build");
/// assert_eq!(endpoint.base_url().username(), "tok");
/// assert_eq!(endpoint.redacted(), "https://packagecloud.io/api/v1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    /// Builds the API base from its parts.
    ///
    /// An empty token produces a base URL without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the scheme and host do not
    /// form a URL that can carry credentials.
    pub fn new(
        token: &ApiToken,
        scheme: &str,
        host: &str,
        api_version: &str,
    ) -> Result<Self, ClientError> {
        let mut base = Url::parse(&format!("{scheme}://{host}"))
            .map_err(|error| ClientError::InvalidUrl {
                message: error.to_string(),
            })?;

        if !token.is_empty() {
            base.set_username(token.value()).map_err(|()| {
                ClientError::InvalidUrl {
                    message: format!("{scheme}://{host} cannot carry credentials"),
                }
            })?;
        }

        base.set_path(&format!("api/{}", api_version.trim_matches('/')));
        Ok(Self { base })
    }

    /// Builds the API base for the public packagecloud.io service.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the token cannot be embedded.
    pub fn packagecloud(token: &ApiToken) -> Result<Self, ClientError> {
        Self::new(token, DEFAULT_SCHEME, DEFAULT_HOST, DEFAULT_API_VERSION)
    }

    /// Wraps an already-built base URL, such as a local test server.
    #[must_use]
    pub const fn from_base_url(base: Url) -> Self {
        Self { base }
    }

    /// Base URL including credentials.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL with credentials removed, suitable for logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        redact(&self.base)
    }

    /// Joins a resource path onto the base.
    ///
    /// Leading slashes on `path` are ignored, so `repos/a/b` and `/repos/a/b`
    /// address the same resource.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the joined URL does not parse.
    pub fn resource_url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|error| ClientError::InvalidUrl {
            message: error.to_string(),
        })
    }
}

impl fmt::Debug for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiEndpoint")
            .field("base", &self.redacted())
            .finish()
    }
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUser(String);

impl RepositoryUser {
    fn new(value: &str) -> Result<Self, ClientError> {
        if value.is_empty() {
            return Err(ClientError::Configuration {
                message: "repository user must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the user value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str) -> Result<Self, ClientError> {
        if value.is_empty() {
            return Err(ClientError::Configuration {
                message: "repository name must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifies one packagecloud repository and the distribution it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    user: RepositoryUser,
    repository: RepositoryName,
    distro: String,
}

impl RepositoryLocator {
    /// Creates a locator from user, repository and distribution names.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when user or repository is empty.
    pub fn new(user: &str, repository: &str, distro: &str) -> Result<Self, ClientError> {
        Ok(Self {
            user: RepositoryUser::new(user)?,
            repository: RepositoryName::new(repository)?,
            distro: distro.to_owned(),
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn user(&self) -> &RepositoryUser {
        &self.user
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Distribution name, e.g. `ubuntu`.
    #[must_use]
    pub const fn distro(&self) -> &str {
        self.distro.as_str()
    }

    /// `repos/{user}/{repo}`
    #[must_use]
    pub fn repo_path(&self) -> String {
        format!(
            "repos/{}/{}",
            self.user.as_str(),
            self.repository.as_str()
        )
    }

    /// Path of the paged package listing.
    #[must_use]
    pub fn packages_path(&self) -> String {
        format!("{}/packages.json", self.repo_path())
    }

    /// Path of the package search endpoint.
    #[must_use]
    pub fn search_path(&self) -> String {
        format!("{}/search", self.repo_path())
    }

    /// Path listing every version of one Debian package.
    #[must_use]
    pub fn versions_path(&self, package: &str, release: &str, arch: &str) -> String {
        format!(
            "{}/package/deb/{}/{release}/{package}/{arch}/versions.json",
            self.repo_path(),
            self.distro
        )
    }
}
