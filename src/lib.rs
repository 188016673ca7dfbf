//! # swrcall
//!
//! JSON-RPC 2.0 over HTTP for stale-while-revalidate query caches.
//!
//! A query cache needs two things from a data source: a stable key that identifies
//! the resource, and a cancellable function that fetches it and reports either data
//! or an error. This crate provides both for JSON-RPC calls.
//!
//! - [`CallDescriptor`] names an endpoint, a method and positional [`ParamValue`] params.
//! - [`JsonRpcFetcher`] sends the call with HTTP POST and normalizes the response into
//!   a [`FetchResult`]. Cancelling the [`CancellationToken`] aborts the request and the
//!   fetch resolves to [`Aborted`] instead of a result.
//! - [`Schema`] binds a [`SchemaKey`] derived from the descriptor to the fetcher.
//!
//! The cache itself (storage, deduplication, revalidation) is left to the engine that
//! consumes the schema.
//!
//! ## Example
//!
//! ```no_run
//! use swrcall::{CallDescriptor, CancellationToken, FetcherOptions, JsonRpcFetcher, Schema};
//!
//! # async fn run() -> swrcall::Result<()> {
//! let fetcher = JsonRpcFetcher::new(&FetcherOptions::default())?;
//! let schema: Schema<String> = Schema::new(
//!     CallDescriptor::new(
//!         "https://rpc.ankr.com/eth",
//!         "eth_getBalance",
//!         ["0xd8da6bf26964af9d7eed9e03e53415d37aa96045", "latest"],
//!     ),
//!     fetcher,
//! );
//! println!("key: {}", schema.key());
//! if let Ok(result) = schema.fetch(&CancellationToken::new()).await {
//!     println!("{:?}", result.into_result()?);
//! }
//! # Ok(())
//! # }
//! ```

pub use tokio_util::sync::CancellationToken;

mod call;
mod envelope;
mod error;
mod fetcher;
mod message;
mod schema;
mod transport;
mod value;

pub use call::*;
pub use envelope::*;
pub use error::*;
pub use fetcher::*;
pub use message::*;
pub use schema::*;
pub use transport::*;
pub use value::*;
