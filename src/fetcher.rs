use std::future::Future;

use serde::de::DeserializeOwned;
use tokio::select;
use tokio_util::sync::CancellationToken;

use super::{
    Aborted, CallDescriptor, EnvelopeMode, Error, HttpTransport, RequestId, RequestMessage,
    Result, Transport,
};

/// Outcome of a fetch that ran to completion.
///
/// This is the shape a query cache stores: either data or an error, never both.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    Data(T),
    Error(Error),
}

impl<T> FetchResult<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Data(_) => None,
            Self::Error(e) => Some(e),
        }
    }
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(e) => Err(e),
        }
    }
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            Self::Data(data) => FetchResult::Data(f(data)),
            Self::Error(e) => FetchResult::Error(e),
        }
    }
}
impl<T> From<Result<T>> for FetchResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(e) => Self::Error(e),
        }
    }
}

/// Executes a call on behalf of a cache engine.
///
/// `Err(Aborted)` means the token was cancelled and no result exists for this invocation.
pub trait Fetcher<T> {
    fn fetch(
        &self,
        call: &CallDescriptor,
        signal: &CancellationToken,
    ) -> impl Future<Output = Result<FetchResult<T>, Aborted>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetcherOptions {
    pub envelope: EnvelopeMode,
}

/// Stateless JSON-RPC 2.0 fetcher. Safe to invoke concurrently.
#[derive(Debug, Clone)]
pub struct JsonRpcFetcher<Tr = HttpTransport> {
    transport: Tr,
    options: FetcherOptions,
}

impl JsonRpcFetcher {
    pub fn new(options: &FetcherOptions) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?, options))
    }
}

impl<Tr> JsonRpcFetcher<Tr>
where
    Tr: Transport + Sync,
{
    pub fn with_transport(transport: Tr, options: &FetcherOptions) -> Self {
        Self {
            transport,
            options: *options,
        }
    }
    pub fn options(&self) -> &FetcherOptions {
        &self.options
    }
    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    pub async fn fetch<T>(
        &self,
        call: &CallDescriptor,
        signal: &CancellationToken,
    ) -> Result<FetchResult<T>, Aborted>
    where
        T: DeserializeOwned + Send,
    {
        if signal.is_cancelled() {
            tracing::debug!(method = call.method(), "fetch cancelled before dispatch");
            return Err(Aborted);
        }
        select! {
            biased;
            _ = signal.cancelled() => {
                tracing::debug!(endpoint = call.endpoint(), method = call.method(), "fetch aborted");
                Err(Aborted)
            }
            result = self.exchange(call) => {
                if let Err(e) = &result {
                    tracing::warn!(
                        endpoint = call.endpoint(),
                        method = call.method(),
                        kind = %e.kind(),
                        status = e.status(),
                        "fetch failed: {e}"
                    );
                }
                Ok(result.into())
            }
        }
    }

    async fn exchange<T>(&self, call: &CallDescriptor) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let id = RequestId::now();
        let body = RequestMessage::new(id, call).to_vec()?;
        tracing::debug!(
            endpoint = call.endpoint(),
            method = call.method(),
            %id,
            "sending JSON-RPC request"
        );
        let response = self.transport.post(call.endpoint(), body).await?;
        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.text(),
            });
        }
        self.options.envelope.decode(&response.body)
    }
}

impl<T, Tr> Fetcher<T> for JsonRpcFetcher<Tr>
where
    T: DeserializeOwned + Send,
    Tr: Transport + Sync,
{
    fn fetch(
        &self,
        call: &CallDescriptor,
        signal: &CancellationToken,
    ) -> impl Future<Output = Result<FetchResult<T>, Aborted>> + Send {
        Self::fetch::<T>(self, call, signal)
    }
}

/// Fetches `call` over a fresh [`HttpTransport`] with the default [`FetcherOptions`].
pub async fn fetch_as_json_rpc<T>(
    call: &CallDescriptor,
    signal: &CancellationToken,
) -> Result<FetchResult<T>, Aborted>
where
    T: DeserializeOwned + Send,
{
    match JsonRpcFetcher::new(&FetcherOptions::default()) {
        Ok(fetcher) => fetcher.fetch(call, signal).await,
        Err(e) => Ok(FetchResult::Error(e)),
    }
}
