use std::{fmt, marker::PhantomData};

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::{Aborted, CallDescriptor, FetchResult, Fetcher, JsonRpcFetcher};

/// Cache identity of a [`CallDescriptor`].
///
/// Canonical JSON of `{"endpoint", "method", "params"}` with object keys sorted,
/// so equal descriptors always map to the same slot and unequal ones never collide.
/// A non-finite float parameter is encoded as `null`, like on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaKey(String);

impl SchemaKey {
    pub fn of(call: &CallDescriptor) -> Self {
        let params: Vec<Value> = call.params().iter().map(Value::from).collect();
        let key = json!({
            "endpoint": call.endpoint(),
            "method": call.method(),
            "params": params,
        });
        Self(key.to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl AsRef<str> for SchemaKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A cache key bound to the fetcher that produces its value.
///
/// Building a schema performs no I/O. A cache engine may rebuild it whenever it
/// resolves the query again and deduplicates in-flight fetches by [`Schema::key`].
pub struct Schema<T, F = JsonRpcFetcher> {
    key: SchemaKey,
    call: CallDescriptor,
    fetcher: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, F> Schema<T, F> {
    pub fn new(call: CallDescriptor, fetcher: F) -> Self {
        Self {
            key: SchemaKey::of(&call),
            call,
            fetcher,
            _phantom: PhantomData,
        }
    }
    pub fn build(factory: impl FnOnce() -> CallDescriptor, fetcher: F) -> Self {
        Self::new(factory(), fetcher)
    }

    pub fn key(&self) -> &SchemaKey {
        &self.key
    }
    pub fn call(&self) -> &CallDescriptor {
        &self.call
    }
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

impl<T, F: Fetcher<T>> Schema<T, F> {
    pub async fn fetch(&self, signal: &CancellationToken) -> Result<FetchResult<T>, Aborted> {
        self.fetcher.fetch(&self.call, signal).await
    }
}

impl<T, F: Clone> Clone for Schema<T, F> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            call: self.call.clone(),
            fetcher: self.fetcher.clone(),
            _phantom: PhantomData,
        }
    }
}
impl<T, F: fmt::Debug> fmt::Debug for Schema<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("key", &self.key)
            .field("fetcher", &self.fetcher)
            .finish()
    }
}

/// Schema for a single resource identified by `call`.
pub fn get_single_schema<T, F>(call: CallDescriptor, fetcher: F) -> Schema<T, F>
where
    F: Fetcher<T>,
{
    Schema::new(call, fetcher)
}
