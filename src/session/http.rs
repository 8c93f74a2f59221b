//! HTTP request/response types and client trait.

use super::HttpError;

/// An HTTP request to be sent to the management endpoint.
///
/// A value type that can be passed to any [`HttpClient`] implementation.
/// Uses the standard `http` crate types for method and headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a POST request carrying a JSON management operation.
    #[must_use]
    pub fn post_json(url: url::Url, body: Vec<u8>) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Self {
            method: http::Method::POST,
            url,
            headers,
            body: Some(body),
        }
    }

    /// Appends every header in `headers`.
    #[must_use]
    pub fn with_headers(mut self, headers: &http::HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.append(name, value.clone());
        }
        self
    }
}

/// An HTTP response with a fully buffered body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the HTTP library so the management client can be driven by
/// a scripted client in tests.
///
/// # Errors
///
/// Implementations return [`HttpError`] only for transport failures.
/// Non-2xx responses are returned as `Ok`: the management protocol
/// reports failed operations in the body of a 500 response.
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
