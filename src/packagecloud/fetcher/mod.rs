//! Paginated GET requests that aggregate a whole packagecloud collection.
//!
//! packagecloud pages resources with a `page` query parameter and reports the
//! collection size in a `Total` header. The fetcher requests page 1, reads
//! `Total` from that first response only, and keeps requesting consecutive
//! pages until it holds that many items.
//!
//! HTTP status failures never surface as errors. A failed first page yields
//! an empty result, a failed later page ends paging with the items gathered so
//! far, and any difference between the aggregate and `Total` is logged as a
//! warning. Only transport failures and undecodable bodies propagate.

use std::time::Duration;

use http::StatusCode;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use super::endpoint::{ApiEndpoint, redact};
use super::error::ClientError;
use super::http::{HttpClient, HttpResponse, TOTAL_HEADER};
use super::query::QueryParams;

/// Request timeout applied to every page.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Outcome of one paginated fetch.
///
/// Carries the aggregated items together with what the fetcher observed, so
/// callers can tell a complete listing from a best-effort one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    items: Vec<Value>,
    declared_total: u64,
    requests: u32,
    interrupted_by: Option<StatusCode>,
}

impl FetchReport {
    /// Aggregated items in page-arrival order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the report, returning the aggregated items.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Number of items aggregated.
    #[must_use]
    pub fn retrieved(&self) -> u64 {
        u64::try_from(self.items.len()).unwrap_or(u64::MAX)
    }

    /// Total declared by the first page's `Total` header.
    #[must_use]
    pub const fn declared_total(&self) -> u64 {
        self.declared_total
    }

    /// Number of HTTP requests issued.
    #[must_use]
    pub const fn requests(&self) -> u32 {
        self.requests
    }

    /// Status of the response that stopped paging, if one did.
    #[must_use]
    pub const fn interrupted_by(&self) -> Option<StatusCode> {
        self.interrupted_by
    }

    /// Returns true when every declared item arrived without interruption.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.interrupted_by.is_none() && self.retrieved() == self.declared_total
    }

    /// Returns `(retrieved, declared)` when the counts disagree.
    #[must_use]
    pub fn mismatch(&self) -> Option<(u64, u64)> {
        let retrieved = self.retrieved();
        (retrieved != self.declared_total).then_some((retrieved, self.declared_total))
    }

    fn append_body(&mut self, body: Value) -> usize {
        match body {
            Value::Array(items) => {
                let added = items.len();
                self.items.extend(items);
                added
            }
            Value::Null => 0,
            object => {
                self.items.push(object);
                1
            }
        }
    }
}

/// Issues paged GET requests against one API base.
///
/// The fetcher holds no per-call state, so one instance can serve many
/// concurrent callers when the client is shareable.
#[derive(Debug, Clone)]
pub struct PaginatedFetcher<C> {
    endpoint: ApiEndpoint,
    client: C,
    timeout: Duration,
}

impl<C: HttpClient> PaginatedFetcher<C> {
    /// Creates a fetcher using [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub const fn new(endpoint: ApiEndpoint, client: C) -> Self {
        Self {
            endpoint,
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// API base the fetcher targets.
    #[must_use]
    pub const fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches every page of `path` and returns the aggregated items.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when a request fails in transport and
    /// [`ClientError::Decode`] when a successful page is not JSON. HTTP
    /// status failures are logged and yield the items gathered so far.
    pub fn fetch(&self, path: &str, params: &QueryParams) -> Result<Vec<Value>, ClientError> {
        self.fetch_with_report(path, params)
            .map(FetchReport::into_items)
    }

    /// Fetches every page of `path`, reporting how paging went.
    ///
    /// # Errors
    ///
    /// See [`PaginatedFetcher::fetch`].
    pub fn fetch_with_report(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<FetchReport, ClientError> {
        let mut report = FetchReport::default();
        let mut page = 1_u32;

        let first = self.request_page(&mut report, path, params, page)?;
        if !first.is_success() {
            error!(
                status = first.status.as_u16(),
                path, "packagecloud request failed"
            );
            report.interrupted_by = Some(first.status);
            return Ok(report);
        }

        report.append_body(first.json()?);
        report.declared_total = declared_total(&first);
        debug!(
            read = report.retrieved(),
            total = report.declared_total,
            path,
            "read first page"
        );

        while report.retrieved() < report.declared_total {
            page += 1;
            let response = self.request_page(&mut report, path, params, page)?;

            if !response.is_success() {
                error!(
                    status = response.status.as_u16(),
                    page, path, "download interrupted by request error"
                );
                report.interrupted_by = Some(response.status);
                break;
            }

            let added = report.append_body(response.json()?);
            debug!(
                read = report.retrieved(),
                total = report.declared_total,
                page,
                "read page"
            );

            if added == 0 {
                debug!(page, path, "empty page before reaching total; stopping");
                break;
            }
        }

        if let Some((retrieved, total)) = report.mismatch() {
            warn!(
                retrieved,
                total, path, "number of retrieved objects does not match declared total"
            );
        }

        Ok(report)
    }

    /// Issues exactly one request for `page` of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the URL cannot be built and
    /// [`ClientError::Network`] when the request fails in transport.
    pub fn fetch_page(
        &self,
        path: &str,
        params: &QueryParams,
        page: u32,
    ) -> Result<HttpResponse, ClientError> {
        let url = self.page_url(path, params, page)?;
        debug!(url = %redact(&url), "requesting page");
        self.client.get(&url, self.timeout)
    }

    fn request_page(
        &self,
        report: &mut FetchReport,
        path: &str,
        params: &QueryParams,
        page: u32,
    ) -> Result<HttpResponse, ClientError> {
        report.requests += 1;
        self.fetch_page(path, params, page)
    }

    fn page_url(&self, path: &str, params: &QueryParams, page: u32) -> Result<Url, ClientError> {
        let mut url = self.endpoint.resource_url(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.extend_pairs(params.iter());
        }
        Ok(url)
    }
}

/// Reads the `Total` header, treating a missing or malformed value as zero.
pub(crate) fn declared_total(response: &HttpResponse) -> u64 {
    let Some(raw) = response.header_str(&TOTAL_HEADER) else {
        debug!("response carries no Total header");
        return 0;
    };

    raw.trim().parse::<u64>().unwrap_or_else(|parse_error| {
        warn!(value = raw, error = %parse_error, "ignoring malformed Total header");
        0
    })
}
