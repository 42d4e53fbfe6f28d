//! pkgcloud library crate for reading packagecloud repositories.
//!
//! The library resolves the packagecloud API token from the environment or
//! `~/.packagecloud`, pages through API collections using the `Total`
//! response header, and exposes repository queries for listing, counting,
//! searching and version lookups.

pub mod config;
pub mod packagecloud;

pub use config::{OperationMode, PkgcloudConfig};
pub use packagecloud::{
    ApiEndpoint, ApiToken, ClientError, HttpClient, Package, PaginatedFetcher, QueryParams,
    RepositoryClient, RepositoryLocator, ReqwestHttpClient, resolve_token,
};
