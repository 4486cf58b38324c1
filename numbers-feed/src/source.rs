use sequence_api::{Endpoint, NumbersPage, Request};

use crate::{FetchError, PageRequest};

/// Where pages come from.
///
/// Hosts with a real network stack usually resolve [`PageRequest`]s themselves and call
/// `Feed::complete`; a `PageSource` is for synchronous sources driven by `Feed::pump`.
pub trait PageSource {
    fn fetch(&mut self, request: &PageRequest) -> Result<NumbersPage, FetchError>;
}

impl<F> PageSource for F
where
    F: FnMut(&PageRequest) -> Result<NumbersPage, FetchError>,
{
    fn fetch(&mut self, request: &PageRequest) -> Result<NumbersPage, FetchError> {
        self(request)
    }
}

/// Serves requests from an in-process [`Endpoint`] through the HTTP contract: status check
/// first, then JSON decoding.
#[derive(Debug, Clone, Default)]
pub struct EndpointSource {
    endpoint: Endpoint,
    requests: u64,
}

impl EndpointSource {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            requests: 0,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Requests served so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn target(&self, request: &PageRequest) -> String {
        format!(
            "{}?{}",
            self.endpoint.options().route,
            request.query().to_query_string()
        )
    }
}

impl PageSource for EndpointSource {
    fn fetch(&mut self, request: &PageRequest) -> Result<NumbersPage, FetchError> {
        self.requests += 1;
        let resp = self.endpoint.handle(&Request::get(self.target(request)));
        if !resp.is_success() {
            return Err(FetchError::Status(resp.status));
        }
        Ok(resp.decode::<NumbersPage>()?)
    }
}
