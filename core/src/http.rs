//! Basic-auth HTTP client over a `Transport`.
//!
//! # Design
//! `AuthenticatedHttpClient` owns one transport and one credential pair for
//! its whole life. Every call builds a plain `HttpRequest`, stamps the
//! `Authorization` header on it, executes it once and returns the body text
//! for statuses in `[200, 300)`. Anything else becomes `ApiError::Http`.

use tracing::debug;

use crate::config::Credentials;
use crate::error::ApiError;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

/// HTTP client that sends fixed basic-auth credentials with every request.
#[derive(Debug, Clone)]
pub struct AuthenticatedHttpClient<T = UreqTransport> {
    transport: T,
    credentials: Credentials,
}

impl AuthenticatedHttpClient<UreqTransport> {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(credentials, UreqTransport::new())
    }
}

impl<T: Transport> AuthenticatedHttpClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, url: &str) -> Result<String, ApiError> {
        self.make_request(HttpMethod::Get, url, None)
    }

    pub fn delete(&self, url: &str) -> Result<String, ApiError> {
        self.make_request(HttpMethod::Delete, url, None)
    }

    pub fn put(&self, url: &str, content_type: &str, data: &str) -> Result<String, ApiError> {
        self.make_request(HttpMethod::Put, url, Some((content_type, data)))
    }

    pub fn post(&self, url: &str, content_type: &str, data: &str) -> Result<String, ApiError> {
        self.make_request(HttpMethod::Post, url, Some((content_type, data)))
    }

    fn make_request(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<(&str, &str)>,
    ) -> Result<String, ApiError> {
        let mut headers = vec![(
            "Authorization".to_string(),
            self.credentials.authorization_header(),
        )];
        let body = payload.map(|(content_type, data)| {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
            data.to_string()
        });

        debug!(method = method.as_str(), url, "sending request");
        let response = self.transport.execute(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })?;
        debug!(method = method.as_str(), url, status = response.status, "received response");

        into_body(response)
    }
}

fn into_body(response: HttpResponse) -> Result<String, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            reason: response.reason,
        });
    }
    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Answers every request with the same canned response and records what it saw.
    struct CannedTransport {
        status: u16,
        reason: &'static str,
        body: &'static str,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, reason: &'static str, body: &'static str) -> Self {
            Self {
                status,
                reason,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> HttpRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                reason: self.reason.to_string(),
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    fn client(status: u16, reason: &'static str, body: &'static str) -> AuthenticatedHttpClient<CannedTransport> {
        AuthenticatedHttpClient::with_transport(
            Credentials::new("test", "test"),
            CannedTransport::new(status, reason, body),
        )
    }

    #[test]
    fn get_returns_body_unmodified_for_every_2xx() {
        for status in [200, 201, 202, 204, 250, 299] {
            let c = client(status, "OK", "  raw body \n");
            assert_eq!(c.get("http://host/x").unwrap(), "  raw body \n", "status {status}");
        }
    }

    #[test]
    fn non_2xx_statuses_fail_with_status_and_reason() {
        for (status, reason) in [
            (199, "Early"),
            (300, "Multiple Choices"),
            (301, "Moved Permanently"),
            (401, "Unauthorized"),
            (404, "Not Found"),
            (500, "Internal Server Error"),
        ] {
            let err = client(status, reason, "ignored").get("http://host/x").unwrap_err();
            match err {
                ApiError::Http { status: s, reason: r } => {
                    assert_eq!(s, status);
                    assert_eq!(r, reason);
                }
                other => panic!("expected Http error, got {other:?}"),
            }
        }
    }

    #[test]
    fn every_method_sends_basic_auth() {
        let c = client(200, "OK", "");
        c.get("http://host/a").unwrap();
        assert_eq!(c.transport().last().header("authorization"), Some("Basic dGVzdDp0ZXN0"));
        c.delete("http://host/a").unwrap();
        assert_eq!(c.transport().last().header("authorization"), Some("Basic dGVzdDp0ZXN0"));
        c.put("http://host/a", "text/plain", "x").unwrap();
        assert_eq!(c.transport().last().header("authorization"), Some("Basic dGVzdDp0ZXN0"));
        c.post("http://host/a", "text/plain", "x").unwrap();
        assert_eq!(c.transport().last().header("authorization"), Some("Basic dGVzdDp0ZXN0"));
    }

    #[test]
    fn get_and_delete_send_no_body() {
        let c = client(200, "OK", "");
        c.get("http://host/a").unwrap();
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());

        c.delete("http://host/a/1").unwrap();
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://host/a/1");
        assert!(req.body.is_none());
    }

    #[test]
    fn post_and_put_attach_body_and_content_type() {
        let c = client(200, "OK", "");
        c.post("http://host/p", "application/json", r#"{"a":1}"#).unwrap();
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));

        c.put("http://host/p", "text/plain", "hello").unwrap();
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.body.as_deref(), Some("hello"));
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let c = AuthenticatedHttpClient::with_transport(Credentials::new("u", "p"), BrokenTransport);
        let err = c.post("http://host/p", "application/json", "{}").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
