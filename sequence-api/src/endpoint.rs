use serde::Serialize;

use crate::{NumbersQuery, QueryError, generate};

/// How malformed `cursor`/`limit` values are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Fall back to the defaults (see [`NumbersQuery::parse`]).
    #[default]
    Lenient,
    /// Answer `400 Bad Request` (see [`NumbersQuery::parse_strict`]).
    Strict,
}

/// Default upper bound for `limit`.
pub const DEFAULT_MAX_LIMIT: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOptions {
    pub route: String,
    pub query_mode: QueryMode,
    /// Upper bound for `limit`; larger requests are clamped. Defaults to
    /// [`DEFAULT_MAX_LIMIT`]. `None` leaves it unbounded, so a single request may ask for
    /// `u32::MAX` rows.
    pub max_limit: Option<u32>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            route: "/api/numbers".to_string(),
            query_mode: QueryMode::Lenient,
            max_limit: Some(DEFAULT_MAX_LIMIT),
        }
    }
}

impl ApiOptions {
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_query_mode(mut self, query_mode: QueryMode) -> Self {
        self.query_mode = query_mode;
        self
    }

    pub fn with_max_limit(mut self, max_limit: Option<u32>) -> Self {
        self.max_limit = max_limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path plus optional query, e.g. `/api/numbers?cursor=10&limit=5`.
    pub target: String,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new("GET", target)
    }

    pub fn path(&self) -> &str {
        self.split().0
    }

    pub fn query(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        let target = self.target.split_once('#').map_or(&*self.target, |(t, _)| t);
        target.split_once('?').unwrap_or((target, ""))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Response {
    fn json(status: u16, value: &impl Serialize) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: vec![("content-type", "application/json".to_string())],
                body,
            },
            Err(err) => {
                awarn!(error = %err, "failed to encode response body");
                Self::empty(500)
            }
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// The numbers endpoint, independent of any HTTP server.
///
/// A server binding only has to turn its request into a [`Request`] and write the
/// [`Response`] back; all routing, parsing and encoding happens here.
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    options: ApiOptions,
}

impl Endpoint {
    pub fn new(options: ApiOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    pub fn handle(&self, req: &Request) -> Response {
        if req.path() != self.options.route {
            return Self::not_found();
        }
        if !req.method.eq_ignore_ascii_case("GET") {
            let mut resp = Self::error(405, "method not allowed");
            resp.headers.push(("allow", "GET".to_string()));
            return resp;
        }

        let query = match self.parse_query(req.query()) {
            Ok(q) => q,
            Err(err) => {
                awarn!(error = %err, query = req.query(), "rejected numbers query");
                return Self::error(400, &err.to_string());
            }
        };

        atrace!(cursor = query.cursor, limit = query.limit, "GET numbers");
        Response::json(200, &generate(query.cursor, query.limit))
    }

    pub fn parse_query(&self, raw: &str) -> Result<NumbersQuery, QueryError> {
        let mut query = match self.options.query_mode {
            QueryMode::Lenient => NumbersQuery::parse(raw),
            QueryMode::Strict => NumbersQuery::parse_strict(raw)?,
        };
        if let Some(max) = self.options.max_limit {
            query.limit = query.limit.min(max.max(1));
        }
        Ok(query)
    }

    fn not_found() -> Response {
        Self::error(404, "not found")
    }

    fn error(status: u16, message: &str) -> Response {
        Response::json(
            status,
            &ErrorBody {
                error: message.to_string(),
            },
        )
    }
}
