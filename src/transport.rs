use std::{future::Future, pin::Pin, sync::Arc};

use reqwest::header::CONTENT_TYPE;

use super::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}
impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request body to an endpoint with HTTP POST.
///
/// Dropping the returned future must abort the exchange.
pub trait Transport {
    fn post(
        &self,
        endpoint: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;

    fn boxed(self) -> BoxTransport
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxTransport(Arc::new(self))
    }
}

trait DynTransport {
    fn dyn_post<'a>(
        &'a self,
        endpoint: &'a str,
        body: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + 'a>>;
}
impl<T: Transport> DynTransport for T {
    fn dyn_post<'a>(
        &'a self,
        endpoint: &'a str,
        body: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + 'a>> {
        Box::pin(self.post(endpoint, body))
    }
}

#[derive(Clone)]
pub struct BoxTransport(Arc<dyn DynTransport + Send + Sync + 'static>);
impl Transport for BoxTransport {
    fn post(
        &self,
        endpoint: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send {
        let this = self.0.clone();
        let endpoint = endpoint.to_owned();
        async move { this.dyn_post(&endpoint, body).await }
    }
    fn boxed(self) -> BoxTransport
    where
        Self: Sized + Send + Sync + 'static,
    {
        self
    }
}

impl<T: Transport + Sync> Transport for &T {
    fn post(
        &self,
        endpoint: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).post(endpoint, body)
    }
}
impl<T: Transport + Send + Sync> Transport for Arc<T> {
    fn post(
        &self,
        endpoint: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).post(endpoint, body)
    }
}

/// [`Transport`] over HTTP(S), backed by [`reqwest`].
///
/// Idle connections are not kept, so nothing is shared between two fetches.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}
impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(Error::transport)?;
        Ok(Self { client })
    }
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}
impl Transport for HttpTransport {
    async fn post(&self, endpoint: &str, body: Vec<u8>) -> Result<HttpResponse> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(Error::transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Error::transport)?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
