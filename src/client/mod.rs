//! Remote Resource Client
//!
//! Maps each backend operation to one HTTP request and keeps per-resource
//! freshness for cached reads.
//!
//! ## Architecture
//!
//! - **Operation table** (`tags`): method, endpoint, provided tag and
//!   invalidated tags per operation
//! - **QueryCache**: last accepted response per parameter set, with request
//!   sequencing
//! - **ApiClient**: reqwest-based client attaching the bearer token
//!
//! No retries, queueing or back-off: failures go straight back to the caller.

mod api;
mod cache;
mod error;
mod params;
mod tags;

pub use api::{ApiClient, LOGIN_FAILED, NO_REPLY};
pub use cache::{CacheKey, QueryCache, RequestTicket, Resolution};
pub use error::{ClientError, ClientResult, GENERIC_ERROR};
pub use params::{encode_query, with_query, PaymentQuery, SortDirection, SortModel, StatsQuery};
pub use tags::{Operation, ResourceTag, StatsResource};
