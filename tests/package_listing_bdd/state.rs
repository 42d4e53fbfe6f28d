//! Scenario state and runtime/server initialisation for the package listing
//! BDD tests.

use std::cell::RefCell;
use std::rc::Rc;

use camino::Utf8PathBuf;
use pkgcloud::packagecloud::{
    ApiEndpoint, ClientError, Package, PaginatedFetcher, RepositoryClient, RepositoryLocator,
    ReqwestHttpClient, TokenResolver,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

use super::domain::RepositorySlug;

/// Environment variable consulted by the scenarios; always cleared.
const SCENARIO_TOKEN_ENV_VAR: &str = "PKGCLOUD_BDD_API_KEY";

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub(crate) fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct ListingState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) temp_dir: Slot<tempfile::TempDir>,
    pub(crate) credential_file: Slot<Utf8PathBuf>,
    pub(crate) packages: Slot<Vec<Package>>,
    pub(crate) count: Slot<u64>,
    pub(crate) error: Slot<ClientError>,
}

/// Ensures the runtime and server are initialised in `ListingState`.
pub(crate) fn ensure_runtime_and_server(listing_state: &ListingState) -> SharedRuntime {
    if listing_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        listing_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = listing_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if listing_state.server.with_ref(|_| ()).is_none() {
        listing_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Mounts a mock on the scenario's server.
pub(crate) fn mount(listing_state: &ListingState, mock: Mock) {
    let runtime = ensure_runtime_and_server(listing_state);
    listing_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Number of requests the scenario's server has received.
pub(crate) fn received_requests(listing_state: &ListingState) -> usize {
    let runtime = ensure_runtime_and_server(listing_state);
    listing_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .map_or(0, |requests| requests.len())
}

/// Builds a repository client pointed at the scenario's server.
///
/// The token comes from the scenario's credential file, if one was written.
/// Must be called outside the runtime: the client issues blocking requests.
pub(crate) fn repository_client(
    listing_state: &ListingState,
    slug: &RepositorySlug,
) -> Result<RepositoryClient<ReqwestHttpClient>, ClientError> {
    let server_uri = listing_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| ClientError::Configuration {
            message: "mock server URL missing".to_owned(),
        })?;
    let host = server_uri.trim_start_matches("http://");

    let token = {
        let _guard = env_lock::lock_env([(SCENARIO_TOKEN_ENV_VAR, None::<&str>)]);
        TokenResolver::new(SCENARIO_TOKEN_ENV_VAR, listing_state.credential_file.get())
            .resolve_token()
    };

    let endpoint = ApiEndpoint::new(&token, "http", host, "v1")?;
    let locator = RepositoryLocator::new(slug.user(), slug.repo(), "ubuntu")?;
    let fetcher = PaginatedFetcher::new(endpoint, ReqwestHttpClient::new()?);
    Ok(RepositoryClient::new(locator, fetcher))
}
