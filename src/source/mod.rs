//! Fetching and decoding launch data.
//!
//! This module defines the [`Transport`] trait the data source talks to, the
//! decoded [`LaunchItem`] record and the [`ResponsePage`] envelope.  The only
//! production transport is [`HttpTransport`].
//!
//! ## For contributors — adding a transport
//!
//! 1. Create a new file in this directory.
//! 2. Implement [`Transport`] for your type.  `execute` must resolve exactly
//!    once, with the full response body or an error.
//! 3. Re-export it below and hand it to
//!    [`PaginatedDataSource::new`](crate::data_source::PaginatedDataSource::new).

mod http;
mod launch_item;
mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpTransport;
pub use launch_item::{parse_launch_date, LaunchItem};
pub use page::{decode_page, ResponsePage};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;
use crate::query::RequestDescriptor;

/// Performs one request and returns the raw response body.
///
/// The data source calls [`execute()`](Transport::execute) from a spawned
/// tokio task, so implementations must be [`Send`] + [`Sync`].  There is no
/// cancellation: whatever timeout the implementation enforces is the only
/// one.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable label used in logs.
    fn name(&self) -> &str;

    /// Perform `request`.
    async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes, TransportError>;
}
