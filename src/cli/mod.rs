//! Command handlers for each operation mode.
//!
//! Output formatting utilities are in [`output`].

use std::io::{self, Write};

use pkgcloud::packagecloud::{
    ApiEndpoint, ApiToken, ClientError, HttpClient, PaginatedFetcher, RepositoryClient,
    RepositoryLocator, ReqwestHttpClient, resolve_token,
};
use pkgcloud::{OperationMode, PkgcloudConfig};
use tracing::{debug, warn};

pub mod output;

use output::{write_count, write_packages};

/// Runs the configured operation against packagecloud and prints to stdout.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] when user or repo is missing, and
/// any error raised by the repository operation.
pub fn run(config: &PkgcloudConfig) -> Result<(), ClientError> {
    let token = resolve_token();
    let client = ReqwestHttpClient::new()?;
    let mut stdout = io::stdout().lock();
    run_with_client(config, &token, client, &mut stdout)
}

/// Runs the configured operation with a caller-supplied HTTP client.
///
/// This function is exposed for testing with stub clients.
pub fn run_with_client<C, W>(
    config: &PkgcloudConfig,
    token: &ApiToken,
    client: C,
    writer: &mut W,
) -> Result<(), ClientError>
where
    C: HttpClient,
    W: Write,
{
    let (user, repo) = config.require_repository_info()?;
    if token.is_empty() {
        warn!("no packagecloud token found; requests are unauthenticated");
    }

    let endpoint = ApiEndpoint::new(token, config.scheme(), config.host(), config.api_version())?;
    debug!(endpoint = %endpoint.redacted(), user, repo, "using packagecloud endpoint");

    let locator = RepositoryLocator::new(user, repo, config.distro())?;
    let fetcher = PaginatedFetcher::new(endpoint, client).with_timeout(config.timeout());
    let repository = RepositoryClient::new(locator, fetcher);

    match config.operation_mode() {
        OperationMode::ListPackages => write_packages(writer, &repository.packages()?),
        OperationMode::CountPackages => {
            write_count(writer, user, repo, repository.get_package_count()?)
        }
        OperationMode::SearchPackages(query) => write_packages(
            writer,
            &repository.search_packages(query, config.distro())?,
        ),
        OperationMode::MatchPackages(pattern) => {
            write_packages(writer, &repository.search_packages_regex(pattern)?)
        }
        OperationMode::ListVersions(package) => write_packages(
            writer,
            &repository.get_versions(package, config.release(), config.arch())?,
        ),
    }
}
