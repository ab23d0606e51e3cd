//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — executing the round-trip is the job of an
//! [`HttpTransport`] implementation supplied by the host. This separation
//! keeps the core deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! between the builder, the transport, and the parser.

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `CatalogClient::build_*` methods. A transport executes this
/// request against the network and returns the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by a transport after executing an `HttpRequest`, then passed
/// to `CatalogClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A network or transport-level failure: DNS, connect, broken pipe, etc.
///
/// Non-2xx statuses are NOT transport errors — they come back as ordinary
/// `HttpResponse` values and are classified by the parse layer.
#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Executes HTTP round-trips on behalf of the repository layer.
///
/// The core ships no implementation; hosts plug in whatever HTTP stack they
/// already use (the integration tests use ureq). Implementations must return
/// non-2xx responses as `Ok` so the client layer can interpret the status.
/// No retry, backoff, or timeout policy is expected here.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
