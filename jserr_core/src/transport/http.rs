/*!
 * HTTP transport for delivering reports to the collection endpoint.
 *
 * Uses `ureq`, a blocking pure-Rust HTTP client. Each submission already
 * runs on its own thread, so blocking I/O is fine and no async runtime is
 * needed.
 *
 * - **Single attempt** — no retries.
 * - **Status is data** — `http_status_as_error(false)` so a 4xx/5xx comes
 *   back as a `Response` and `deliver` can report url, status and reason.
 */

use std::time::Duration;

use ureq::{Agent, ResponseExt};

use crate::error::SubmitError;
use crate::protocol::constants::CONTENT_TYPE;
use crate::protocol::encoding::Request;

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/**
 * What came back from the collector.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    /// Canonical reason phrase for `status`, not the phrase the server sent.
    pub status_text: String,
}

impl Response {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/**
 * Issues one POST and returns whatever the server answered.
 *
 * Implementations return `Err(SubmitError::Network)` only when no response
 * was produced at all; status validation is done by `deliver`.
 */
pub trait Transport: Send + Sync {
    fn post(&self, request: &Request) -> Result<Response, SubmitError>;
}

/**
 * Posts `request` and turns a non-2xx answer into `SubmitError::Status`.
 */
pub fn deliver(transport: &dyn Transport, request: &Request) -> Result<Response, SubmitError> {
    let response = transport.post(request)?;
    if !response.ok() {
        return Err(SubmitError::Status {
            url: response.url,
            status: response.status,
            status_text: response.status_text,
        });
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/**
 * `Transport` backed by a shared `ureq::Agent` (connection pooling and
 * keep-alive handled by the agent).
 */
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /**
     * Timeouts: 10 s connect, 30 s for the whole request.
     */
    pub fn new() -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(10)))
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &Request) -> Result<Response, SubmitError> {
        let mut builder = self.agent.post(request.url.as_str());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if !request.headers.contains(CONTENT_TYPE) {
            builder = builder.header(CONTENT_TYPE, request.body.default_content_type());
        }

        let response = builder
            .send(request.body.as_bytes())
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        Ok(Response {
            url: response.get_uri().to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use url::Url;

    use crate::protocol::encoding::Body;
    use crate::protocol::headers::HeaderList;

    struct Fixed(Mutex<Option<Result<Response, SubmitError>>>);

    impl Transport for Fixed {
        fn post(&self, _: &Request) -> Result<Response, SubmitError> {
            self.0.lock().unwrap().take().unwrap()
        }
    }

    fn request() -> Request {
        Request {
            url: Url::parse("https://collector.example/report").unwrap(),
            headers: HeaderList::new(),
            body: Body::Form("message=x".into()),
        }
    }

    fn response(status: u16, status_text: &str) -> Response {
        Response {
            url: "https://collector.example/report".into(),
            status,
            status_text: status_text.into(),
        }
    }

    #[test]
    fn test_ok_range() {
        assert!(response(200, "OK").ok());
        assert!(response(204, "No Content").ok());
        assert!(!response(199, "").ok());
        assert!(!response(300, "Multiple Choices").ok());
        assert!(!response(500, "Internal Server Error").ok());
    }

    #[test]
    fn test_deliver_accepts_success() {
        let transport = Fixed(Mutex::new(Some(Ok(response(204, "No Content")))));
        assert_eq!(deliver(&transport, &request()).unwrap().status, 204);
    }

    #[test]
    fn test_deliver_reports_status_failure() {
        let transport = Fixed(Mutex::new(Some(Ok(response(500, "Internal Server Error")))));
        let err = deliver(&transport, &request()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"https://collector.example/report\" is 500 Internal Server Error"
        );
    }

    #[test]
    fn test_deliver_passes_network_errors_through() {
        let transport = Fixed(Mutex::new(Some(Err(SubmitError::Network("connection refused".into())))));
        assert!(matches!(deliver(&transport, &request()), Err(SubmitError::Network(_))));
    }
}
