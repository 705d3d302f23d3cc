//! falcon-flights — page through Falcon 9 launches from the public launch API.
//!
//! ## Architecture overview
//!
//! ```text
//! load_next() ─► query::build_request ─► Transport::execute ─► decode_page
//!      ▲                                                           │
//!      │                                                           ▼
//!   (UI)  ◄──── watch::Receiver<DataSourceState> ◄──── merge into state
//! ```
//!
//! * **`query`** — the query value and the JSON request it becomes.
//! * **`source`** — the `Transport` seam, the HTTP transport, and decoding of
//!   pages and launch records.
//! * **`data_source`** — the paginated state machine the UI observes.
//! * **`error`** — transport and decoding errors.
//! * **`config`** — command-line configuration for the binary.

pub mod config;
pub mod data_source;
pub mod error;
pub mod query;
pub mod source;

pub use data_source::{DataSourceState, LaunchesDataSource, PaginatedDataSource, PaginatedListResult};
pub use error::{FetchError, TransportError};
pub use query::{build_request, LaunchesQuery, RequestDescriptor, RocketType, SortDirection, SortOptions};
pub use source::{HttpTransport, LaunchItem, ResponsePage, Transport};
