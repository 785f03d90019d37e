//! scr.im client implementation.
//!
//! This module provides the [`Client`] and [`ClientBuilder`] for the scr.im
//! email-masking service.
//!
//! Typical flow:
//! 1) Build a client (`Client::new` or `Client::builder().build()`)
//! 2) Set the email via [`Client::set_email`] and optionally an alias via [`Client::set_alias`]
//! 3) Call [`Client::generate`] to get a [`Response`]
//! 4) Optionally [`Client::reset`] and reuse the client for another address

use crate::models::ScrimXml;
use crate::transport::{HttpResponse, Param, ReqwestTransport, Transport, TransportSettings};
use crate::{Error, Response, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Url;
use std::borrow::Cow;
use std::time::Duration;
use tracing::debug;

const ENDPOINT: &str = "http://scr.im/xml/";

/// Longest alias scr.im keeps; the API silently truncates anything longer.
pub(crate) const MAX_ALIAS_LEN: usize = 13;

const SUCCESS: &str = "Success";
const ALREADY_STORED: &str = "This email is already stored in our database,";

/// Client for the scr.im email-masking service.
///
/// A client accumulates the email address and optional alias, then submits them
/// with [`Client::generate`]. The parameters stay set after a call; use
/// [`Client::reset`] to clear them.
///
/// The transport is generic so tests and callers with their own HTTP stack can
/// inject one; the default is [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    transport: T,
    endpoint: String,
    email: Option<String>,
    alias: Option<String>,
}

impl Client {
    /// Create a [`ClientBuilder`] for configuring a new client.
    ///
    /// Use this when you need a proxy, a timeout, or a different endpoint.
    ///
    /// # Examples
    /// ```no_run
    /// # use scrim_client::Client;
    /// # fn main() -> Result<(), scrim_client::Error> {
    /// let client = Client::builder()
    ///     .user_agent("my-app/1.0")
    ///     .timeout(std::time::Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client using default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }
}

impl<T: Transport> Client<T> {
    /// Create a client that sends requests through `transport` to the default endpoint.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            endpoint: ENDPOINT.to_string(),
            email: None,
            alias: None,
        }
    }

    /// Set the email address to create an alias for.
    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = Some(email.into());
        self
    }

    /// Request a specific alias, e.g. `foobarscrim` for `http://scr.im/foobarscrim`.
    ///
    /// Surrounding whitespace is trimmed. An alias that trims to nothing clears
    /// any previous request and lets scr.im pick one.
    ///
    /// # Errors
    /// Returns [`Error::AliasTooLong`] if the trimmed alias exceeds 13 characters.
    /// The previously set alias is kept in that case.
    pub fn set_alias(&mut self, alias: &str) -> Result<&mut Self> {
        let alias = alias.trim();
        let len = alias.chars().count();
        if len > MAX_ALIAS_LEN {
            return Err(Error::AliasTooLong { len });
        }

        self.alias = (!alias.is_empty()).then(|| alias.to_string());
        Ok(self)
    }

    /// The email address set for the next request.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The alias requested for the next request.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Clear the email and alias so the client can be reused.
    pub fn reset(&mut self) {
        self.email = None;
        self.alias = None;
    }

    /// Submit the email (and alias, if any) to scr.im.
    ///
    /// Performs exactly one request; nothing is retried.
    ///
    /// # Errors
    /// - [`Error::MissingEmail`] if no email was set (no request is made),
    /// - [`Error::Request`] if the request could not be sent,
    /// - [`Error::ServiceUnavailable`] on any status other than 200,
    /// - [`Error::XmlParse`] if the body is not the expected XML,
    /// - [`Error::UnexpectedResult`] if scr.im reports an error,
    /// - [`Error::EmailMismatch`] if the reply is for a different email.
    ///
    /// # Examples
    /// ```no_run
    /// # use scrim_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), scrim_client::Error> {
    /// let mut client = Client::new()?;
    /// client.set_email("foobar@example.org").set_alias("foobarscrim")?;
    /// let response = client.generate().await?;
    /// println!("{response}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&mut self) -> Result<Response> {
        let email = self.email.as_deref().ok_or(Error::MissingEmail)?;

        let mut form: Vec<Param<'_>> = vec![("email", Cow::Borrowed(email))];
        if let Some(alias) = self.alias.as_deref() {
            form.push(("scrim", Cow::Borrowed(alias)));
        }

        let response = self.transport.post_form(&self.endpoint, &form).await?;
        parse_response(email, response)
    }
}

/// Turn a raw scr.im reply into a [`Response`] for `submitted_email`.
fn parse_response(submitted_email: &str, response: HttpResponse) -> Result<Response> {
    if response.status != 200 {
        return Err(Error::ServiceUnavailable {
            status: response.status,
        });
    }

    let body = response.body.trim();
    let xml_error = |details: String| Error::XmlParse {
        body: body.to_string(),
        details,
    };
    check_document(body).map_err(xml_error)?;
    let xml: ScrimXml = quick_xml::de::from_str(body).map_err(|e| xml_error(e.to_string()))?;

    let is_old = if xml.result == SUCCESS {
        false
    } else if xml.result.starts_with(ALREADY_STORED) {
        true
    } else {
        return Err(Error::UnexpectedResult(xml.result));
    };

    if xml.email != submitted_email {
        return Err(Error::EmailMismatch {
            expected: submitted_email.to_string(),
            actual: xml.email,
        });
    }

    debug!(alias = %xml.scrim, is_old, "scr.im alias generated");

    Ok(Response::new(xml.email, xml.scrim, xml.url, xml.result, is_old))
}

/// Check that `body` is a single well-formed XML document.
///
/// The serde deserializer stops at the end of the root element, so trailing
/// elements or text would otherwise go unnoticed.
fn check_document(body: &str) -> std::result::Result<(), String> {
    let mut reader = Reader::from_str(body);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "end tag without a start tag".to_string())?;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err("text outside the root element".to_string());
            }
            Event::CData(_) if depth == 0 => {
                return Err("CDATA outside the root element".to_string());
            }
            Event::Eof => break,
            _ => {}
        }

        if roots > 1 {
            return Err("extra content at the end of the document".to_string());
        }
    }

    if depth > 0 {
        return Err("premature end of document".to_string());
    }
    if roots == 0 {
        return Err("document is empty".to_string());
    }
    Ok(())
}

/// Builder for configuring a scr.im [`Client`].
///
/// Start with [`Client::builder`] to override defaults, then call
/// [`ClientBuilder::build`].
///
/// # Defaults
/// - Endpoint `http://scr.im/xml/`
/// - No proxy
/// - `danger_accept_invalid_certs = false`
/// - User agent `scrim-client/<version>`
/// - Reqwest default timeout
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    endpoint: String,
    settings: TransportSettings,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// See [`ClientBuilder`] for the list of defaults.
    pub fn new() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            settings: TransportSettings::default(),
        }
    }

    /// Override the API endpoint.
    ///
    /// This is primarily useful for testing against a local server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a proxy URL (e.g. `"http://127.0.0.1:8080"`).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.settings.proxy = Some(proxy.into());
        self
    }

    /// Configure whether to accept invalid TLS certificates (default: `false`).
    ///
    /// # Security
    /// Only relevant when the endpoint is HTTPS. Accepting invalid certificates is
    /// unsafe on untrusted networks.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.settings.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Set a timeout for the whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Build a [`Client`] backed by [`ReqwestTransport`].
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL or if the HTTP client
    /// cannot be constructed (e.g. invalid proxy URL).
    pub fn build(self) -> Result<Client> {
        let transport = ReqwestTransport::from_settings(&self.settings)?;
        self.build_with_transport(transport)
    }

    /// Build a [`Client`] that uses `transport` instead of reqwest.
    ///
    /// Transport settings on the builder (proxy, user agent, timeout) are
    /// ignored; only the endpoint applies.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Client<T>> {
        Url::parse(&self.endpoint)?;

        let mut client = Client::with_transport(transport);
        client.endpoint = self.endpoint;
        Ok(client)
    }
}
