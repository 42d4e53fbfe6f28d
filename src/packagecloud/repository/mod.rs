//! Repository-level operations built on the paginated fetcher.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, error};

use super::endpoint::RepositoryLocator;
use super::error::ClientError;
use super::fetcher::{PaginatedFetcher, declared_total};
use super::http::HttpClient;
use super::models::Package;
use super::query::QueryParams;

/// Field of a package record holding the repository's package count.
const PACKAGE_COUNT_FIELD: &str = "package_count_human";

/// Client for one packagecloud repository.
///
/// # Example
///
/// ```no_run
/// use pkgcloud::packagecloud::{
///     ApiEndpoint, PaginatedFetcher, ReqwestHttpClient, RepositoryClient, RepositoryLocator,
///     resolve_token,
/// };
///
/// # fn main() -> Result<(), pkgcloud::ClientError> {
/// let endpoint = ApiEndpoint::packagecloud(&resolve_token())?;
/// let fetcher = PaginatedFetcher::new(endpoint, ReqwestHttpClient::new()?);
/// let repository = RepositoryClient::new(RepositoryLocator::new("acme", "tools", "ubuntu")?, fetcher);
/// for package in repository.packages()? {
///     println!("{}", package.display_name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryClient<C> {
    locator: RepositoryLocator,
    fetcher: PaginatedFetcher<C>,
}

impl<C: HttpClient> RepositoryClient<C> {
    /// Creates a repository client.
    #[must_use]
    pub const fn new(locator: RepositoryLocator, fetcher: PaginatedFetcher<C>) -> Self {
        Self { locator, fetcher }
    }

    /// Repository this client addresses.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// Fetches every package record of the repository as raw JSON.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding failures from the fetcher.
    pub fn get_packages(&self) -> Result<Vec<Value>, ClientError> {
        self.fetcher
            .fetch(&self.locator.packages_path(), &QueryParams::new())
    }

    /// Fetches every package of the repository.
    ///
    /// # Errors
    ///
    /// Propagates fetcher failures and returns [`ClientError::Decode`] when a
    /// record is not a package.
    pub fn packages(&self) -> Result<Vec<Package>, ClientError> {
        Package::from_items(self.get_packages()?)
    }

    /// Reads the human-readable package count from the first package record.
    ///
    /// Issues a single one-item request rather than paging, and ignores the
    /// `Total` header. A failed request, an empty repository or a record
    /// without the count field all yield zero.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and returns [`ClientError::Decode`] when
    /// the body is not JSON or the count is not a number.
    pub fn get_package_count(&self) -> Result<u64, ClientError> {
        let path = self.locator.packages_path();
        let params = QueryParams::new().with("per_page", 1);
        let response = self.fetcher.fetch_page(&path, &params, 1)?;

        if !response.is_success() {
            error!(
                status = response.status.as_u16(),
                path = %path,
                "package count request failed"
            );
            return Ok(0);
        }

        let first = match response.json()? {
            Value::Array(items) => items.into_iter().next(),
            Value::Null => None,
            object => Some(object),
        };
        let Some(info) = first else {
            return Ok(0);
        };

        debug!(%info, "package count request returned");
        parse_human_count(info.get(PACKAGE_COUNT_FIELD))
    }

    /// Reads the repository size from the `Total` header of a zero-item page.
    ///
    /// A failed request yields zero.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn get_total_packages(&self) -> Result<u64, ClientError> {
        let path = self.locator.packages_path();
        let params = QueryParams::new().with("per_page", 0);
        let response = self.fetcher.fetch_page(&path, &params, 1)?;

        if !response.is_success() {
            error!(
                status = response.status.as_u16(),
                path = %path,
                "package total request failed"
            );
            return Ok(0);
        }

        Ok(declared_total(&response))
    }

    /// Searches the repository with packagecloud's query syntax.
    ///
    /// # Errors
    ///
    /// See [`RepositoryClient::packages`].
    pub fn search_packages(&self, query: &str, dist: &str) -> Result<Vec<Package>, ClientError> {
        let params = QueryParams::new().with("q", query).with("dist", dist);
        let items = self.fetcher.fetch(&self.locator.search_path(), &params)?;
        Package::from_items(items)
    }

    /// Returns packages whose name or version fully matches `pattern`.
    ///
    /// packagecloud has no regex search, so every package is fetched and
    /// filtered locally.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPattern`] when `pattern` does not
    /// compile, otherwise see [`RepositoryClient::packages`].
    pub fn search_packages_regex(&self, pattern: &str) -> Result<Vec<Package>, ClientError> {
        let matcher = full_match_regex(pattern)?;
        let packages = self.packages()?;

        Ok(packages
            .into_iter()
            .filter(|package| matcher.is_match(&package.name) || matcher.is_match(&package.version))
            .collect())
    }

    /// Lists every version of a Debian package for one release and
    /// architecture of the repository's distribution.
    ///
    /// # Errors
    ///
    /// See [`RepositoryClient::packages`].
    pub fn get_versions(
        &self,
        package: &str,
        release: &str,
        arch: &str,
    ) -> Result<Vec<Package>, ClientError> {
        let path = self.locator.versions_path(package, release, arch);
        let items = self.fetcher.fetch(&path, &QueryParams::new())?;
        Package::from_items(items)
    }
}

fn full_match_regex(pattern: &str) -> Result<Regex, ClientError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|error| ClientError::InvalidPattern {
        message: error.to_string(),
    })
}

fn parse_human_count(value: Option<&Value>) -> Result<u64, ClientError> {
    let invalid = |raw: &str| ClientError::Decode {
        message: format!("{PACKAGE_COUNT_FIELD} is not a count: {raw}"),
    };

    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number.as_u64().ok_or_else(|| invalid(&number.to_string())),
        Some(Value::String(raw)) => {
            let digits: String = raw
                .chars()
                .filter(|character| !matches!(character, ',' | '_' | ' '))
                .collect();
            digits.parse::<u64>().map_err(|_| invalid(raw))
        }
        Some(other) => Err(invalid(&other.to_string())),
    }
}
