//! Support modules for the package listing BDD tests.

pub(crate) mod domain;
pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use domain::{PackageCount, PageNumber, PageSize, RepositorySlug, RequestCount};
pub(crate) use harness::{generate_packages, paginate};
pub(crate) use state::{ListingState, mount, received_requests, repository_client};
