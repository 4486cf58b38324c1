//! A stateless, cursor-paged sequence of natural numbers.
//!
//! [`generate`] is the whole backend: `(cursor, limit)` in, the next `limit` integers and the
//! cursor to resume from out. [`Endpoint`] wraps it in the `GET /api/numbers` contract
//! (query parsing, JSON encoding, status codes) without tying it to a particular HTTP server.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod endpoint;
mod page;
mod query;


pub use endpoint::{ApiOptions, DEFAULT_MAX_LIMIT, Endpoint, QueryMode, Request, Response};
pub use page::{NumbersPage, generate};
pub use query::{DEFAULT_CURSOR, DEFAULT_LIMIT, NumbersQuery, QueryError};
