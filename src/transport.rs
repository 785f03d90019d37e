//! HTTP transport used by [`Client`](crate::Client).
//!
//! The client owns the endpoint and the form fields; a [`Transport`] only has to
//! POST them and hand back the status code and body. [`ReqwestTransport`] is the
//! default implementation. Tests and callers with their own HTTP stack can plug in
//! anything else through [`Client::with_transport`](crate::Client::with_transport).

use crate::Result;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// A single form field: `(name, value)`.
pub type Param<'a> = (&'a str, Cow<'a, str>);

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can POST a url-encoded form and return the reply.
pub trait Transport {
    /// Send `form` as `application/x-www-form-urlencoded` to `url`.
    ///
    /// Implementations should only fail on I/O problems. Any HTTP status,
    /// including 4xx/5xx, is returned as a normal [`HttpResponse`].
    fn post_form(
        &self,
        url: &str,
        form: &[Param<'_>],
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    proxy: Option<String>,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("http", &"<reqwest::Client>")
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl ReqwestTransport {
    /// Build a transport with reqwest's defaults.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        Self::from_settings(&TransportSettings::default())
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http, proxy: None }
    }

    /// Get the proxy URL this transport was built with (if any).
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub(crate) fn from_settings(settings: &TransportSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(settings.danger_accept_invalid_certs);

        if let Some(proxy_url) = &settings.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            proxy: settings.proxy.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn post_form(&self, url: &str, form: &[Param<'_>]) -> Result<HttpResponse> {
        // Field values carry the caller's email address, so only names are logged.
        let fields: Vec<&str> = form.iter().map(|(name, _)| *name).collect();
        debug!(url, ?fields, "scr.im request");

        let response = self.http.post(url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, len = body.len(), "scr.im response");
        trace!(%body, "scr.im response body");

        Ok(HttpResponse { status, body })
    }
}

pub(crate) const USER_AGENT_VALUE: &str = concat!("scrim-client/", env!("CARGO_PKG_VERSION"));

/// Knobs applied to the `reqwest::Client` built by [`ClientBuilder`](crate::ClientBuilder).
#[derive(Debug, Clone)]
pub(crate) struct TransportSettings {
    pub(crate) proxy: Option<String>,
    pub(crate) danger_accept_invalid_certs: bool,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
        }
    }
}
