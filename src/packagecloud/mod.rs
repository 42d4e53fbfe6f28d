//! Client for the packagecloud REST API.
//!
//! The pieces compose bottom-up: [`resolve_token`] finds the API token,
//! [`ApiEndpoint`] embeds it in the API base URL, [`PaginatedFetcher`]
//! aggregates paged collections over any [`HttpClient`], and
//! [`RepositoryClient`] exposes the repository-level queries.

pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod models;
pub mod query;
pub mod repository;
pub mod token;

pub use endpoint::{ApiEndpoint, RepositoryLocator, RepositoryName, RepositoryUser};
pub use error::ClientError;
pub use fetcher::{DEFAULT_TIMEOUT, FetchReport, PaginatedFetcher};
#[cfg(test)]
pub use self::http::MockHttpClient;
pub use self::http::{HttpClient, HttpResponse, ReqwestHttpClient, TOTAL_HEADER};
pub use models::Package;
pub use query::QueryParams;
pub use repository::RepositoryClient;
pub use token::{
    ApiToken, TokenResolver, read_token_from_env, read_token_from_file, resolve_token,
};
