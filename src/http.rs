//!
//! HTTP resource client
//! --------------------
//! Single request primitive shared by every typed resource client. It attaches the
//! bearer token from the session store, sends JSON (or multipart for uploads), and maps
//! responses uniformly:
//!
//! - 401: the session is cleared, the navigator is sent to the login page once, and the
//!   caller receives `Ok(None)`.
//! - any other status: the body is parsed as JSON first; non-2xx then becomes
//!   `ClientError::Api` carrying the body's `error` field (or the fallback message).
//! - 2xx: the parsed body is returned untouched.
//!
//! A body that is not JSON fails parsing before the status is looked at and surfaces as
//! `ClientError::Decode`, whatever the status was.

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, LOGIN_PATH};
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

/// Client-side navigation target, invoked when the session ends.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigator that only logs; suited to headless use such as the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        info!(target: "navigation", "redirect -> {}", path);
    }
}

/// Navigator that remembers every redirect it was asked to perform.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self { Self::default() }
    pub fn visits(&self) -> Vec<String> { self.visits.lock().clone() }
    pub fn last(&self) -> Option<String> { self.visits.lock().last().cloned() }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) { self.visits.lock().push(path.to_string()); }
}

pub enum Body {
    Json(Value),
    /// Sent without a JSON content type so the transport can set its own boundary.
    Multipart(reqwest::multipart::Form),
}

pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Body>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self { Self { method: Method::GET, body: None, headers: HeaderMap::new() } }
}

impl RequestOptions {
    pub fn get() -> Self { Self::default() }
    pub fn delete() -> Self { Self { method: Method::DELETE, ..Self::default() } }
    pub fn post(body: Value) -> Self { Self { method: Method::POST, body: Some(Body::Json(body)), ..Self::default() } }
    pub fn put(body: Value) -> Self { Self { method: Method::PUT, body: Some(Body::Json(body)), ..Self::default() } }
    pub fn put_empty() -> Self { Self { method: Method::PUT, ..Self::default() } }
    pub fn multipart(form: reqwest::multipart::Form) -> Self {
        Self { method: Method::POST, body: Some(Body::Multipart(form)), ..Self::default() }
    }

    /// Add or override a header. Values that are not valid header text are rejected.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let n = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::config(format!("bad header name '{}': {}", name, e)))?;
        let v = HeaderValue::from_str(value).map_err(|e| ClientError::config(format!("bad header value for '{}': {}", name, e)))?;
        self.headers.insert(n, v);
        Ok(self)
    }

    fn is_multipart(&self) -> bool { matches!(self.body, Some(Body::Multipart(_))) }
}

struct Inner {
    config: ClientConfig,
    http: reqwest::Client,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

/// Shared API handle. Clones share the connection pool, session store and navigator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base", &self.inner.config.base()).finish()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { inner: Arc::new(Inner { config, http, session, navigator }) })
    }

    pub fn config(&self) -> &ClientConfig { &self.inner.config }
    pub fn session(&self) -> &SessionStore { &self.inner.session }
    pub fn navigator(&self) -> &Arc<dyn Navigator> { &self.inner.navigator }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') { format!("{}{}", self.inner.config.base(), endpoint) }
        else { format!("{}/{}", self.inner.config.base(), endpoint) }
    }

    /// JSON content type (unless multipart), caller headers on top, then the bearer token.
    fn headers_for(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if !options.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(token) = self.inner.session.get_token() {
            let v = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::config("stored token is not a valid header value"))?;
            headers.insert(AUTHORIZATION, v);
        }
        Ok(headers)
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Option<Value>> {
        let headers = self.headers_for(&options)?;
        let url = self.url(endpoint);
        let method = options.method.clone();
        let mut builder = self.inner.http.request(method.clone(), &url).headers(headers);
        builder = match options.body {
            Some(Body::Json(v)) => builder.body(serde_json::to_vec(&v)?),
            Some(Body::Multipart(form)) => builder.multipart(form),
            None => builder,
        };
        debug!(target: "http", %method, endpoint, "request");
        let resp = builder.send().await?;
        let status = resp.status();
        debug!(target: "http", %method, endpoint, status = status.as_u16(), "response");

        if status == StatusCode::UNAUTHORIZED {
            warn!(target: "http", endpoint, "unauthorized; ending session");
            self.expire_session();
            return Ok(None);
        }

        let bytes = resp.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        if !status.is_success() {
            return Err(ClientError::from_body(status.as_u16(), &value));
        }
        Ok(Some(value))
    }

    /// `request` with the body deserialized into `T`.
    pub async fn request_as<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<Option<T>> {
        match self.request(endpoint, options).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// Clear token and profile, then navigate to the login page.
    pub fn expire_session(&self) {
        if let Err(e) = self.inner.session.clear() {
            warn!(target: "session", "failed to clear session: {}", e);
        }
        self.inner.navigator.redirect(LOGIN_PATH);
    }
}
