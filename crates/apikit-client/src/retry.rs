use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use apikit_core::BackendError;
use reqwest::header::HeaderMap;

use crate::credentials::BasicCredentials;
use crate::observer::{RetryEvent, RetryObserver};

/// HTTP methods accepted by the retry helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
}

/// Method string the retry helper does not support
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad method `{0}`: must be GET, PUT, or POST")]
pub struct UnsupportedMethod(pub String);

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            _ => Err(UnsupportedMethod(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
        })
    }
}

impl Method {
    const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Put => reqwest::Method::PUT,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl From<UnsupportedMethod> for BackendError {
    fn from(err: UnsupportedMethod) -> Self {
        Self::new(err.to_string())
            .expect("display form is non-empty")
    }
}

/// Retry bounds: maximum try count and initial inter-attempt interval
///
/// The delay before attempt `n + 1` is `initial_interval * n` (linear
/// backoff).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts
    pub tries: u32,
    /// Delay after the first failed attempt
    pub initial_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            tries: 10,
            initial_interval: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit bounds
    #[must_use]
    pub const fn new(tries: u32, initial_interval: Duration) -> Self {
        Self {
            tries,
            initial_interval,
        }
    }
}

/// Optional pieces of a retried request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: Option<HeaderMap>,
    /// JSON payload: query parameters for GET, request body for PUT/POST
    pub payload: Option<serde_json::Value>,
    /// Basic-auth credentials
    pub auth: Option<BasicCredentials>,
}

/// HTTP client that retries failed requests with linear backoff
///
/// A response is successful iff its status code is below 400. Failed
/// attempts are retried up to the policy's try count, notifying the
/// configured observer before each backoff sleep. No state is retained
/// between calls; the client is cheap to clone and safe to share.
#[derive(Clone)]
pub struct RetryClient {
    http: reqwest::Client,
    policy: RetryPolicy,
    observer: Option<Arc<dyn RetryObserver>>,
}

impl Default for RetryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryClient {
    /// Create a client with the default policy (10 tries, 5 s interval)
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            policy: RetryPolicy::default(),
            observer: None,
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach an observer notified between attempts
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Perform the request, retrying failure statuses until success or
    /// exhaustion
    ///
    /// The method string is case-insensitive. On success the underlying
    /// [`reqwest::Response`] is returned unchanged.
    ///
    /// # Errors
    ///
    /// Fails immediately, without any network call, for a method other than
    /// GET/PUT/POST (status 400). Transport failures are wrapped as 500
    /// errors. After the configured tries are exhausted, fails with a 500
    /// "Internal Server Error" whose content embeds the method, URL, try
    /// count, and the last response's status, reason, and body.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, BackendError> {
        let method: Method = method.parse()?;
        let tries = self.policy.tries.max(1);

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let response = self
                .build(method, url, &options)
                .send()
                .await
                .map_err(|e| BackendError::internal(e.to_string()))?;

            let status = response.status();
            if status.as_u16() < 400 {
                return Ok(response);
            }

            let reason = status.canonical_reason().unwrap_or("Unknown Error");
            let body = response.text().await.unwrap_or_default();

            if attempt >= tries {
                return Err(BackendError::internal(format!(
                    "{method} {url} failed after {tries} tries: last response {} {reason}: {body}",
                    status.as_u16(),
                )));
            }

            if let Some(observer) = &self.observer {
                observer.on_retry(&RetryEvent {
                    attempts: attempt,
                    remaining: tries - attempt,
                    status_code: status.as_u16(),
                    content: body.trim().to_owned(),
                });
            }

            tokio::time::sleep(self.policy.initial_interval * attempt).await;
        }
    }

    fn build(&self, method: Method, url: &str, options: &RequestOptions) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method.as_reqwest(), url);

        if let Some(headers) = &options.headers {
            builder = builder.headers(headers.clone());
        }
        if let Some(auth) = &options.auth {
            builder = builder.basic_auth(auth.username(), Some(auth.password()));
        }
        if let Some(payload) = &options.payload {
            builder = match method {
                Method::Get => builder.query(payload),
                Method::Put | Method::Post => builder.json(payload),
            };
        }

        builder
    }
}

impl std::fmt::Debug for RetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Instant;

    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_client(tries: u32) -> RetryClient {
        RetryClient::new().with_policy(RetryPolicy::new(tries, Duration::from_millis(50)))
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<RetryEvent>>);

    impl RetryObserver for Recorder {
        fn on_retry(&self, event: &RetryEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("PuT".parse::<Method>().unwrap(), Method::Put);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(
            "DELETE".parse::<Method>().unwrap_err(),
            UnsupportedMethod("DELETE".to_owned())
        );
    }

    #[tokio::test]
    async fn success_on_first_attempt_returns_response_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(10);
        let response = client
            .request("GET", &format!("{}/ok", server.uri()), RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "fine");
    }

    #[tokio::test]
    async fn exhaustion_makes_exactly_the_configured_attempts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let client = fast_client(2);
        let url = format!("{}/flaky", server.uri());
        let start = Instant::now();
        let err = client
            .request("GET", &url, RequestOptions::default())
            .await
            .unwrap_err();

        // One backoff sleep happens, between the two attempts
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.reason(), "Internal Server Error");

        let content = err.content().unwrap();
        assert!(content.contains("GET"));
        assert!(content.contains(&url));
        assert!(content.contains("after 2 tries"));
        assert!(content.contains("500 Internal Server Error"));
        assert!(content.contains("boom"));
    }

    #[tokio::test]
    async fn unsupported_method_fails_without_a_network_call() {
        let server = MockServer::start().await;

        let client = fast_client(10);
        let start = Instant::now();
        let err = client
            .request("DELETE", &server.uri(), RequestOptions::default())
            .await
            .unwrap_err();

        assert!(start.elapsed() < Duration::from_millis(50));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.reason(), "bad method `DELETE`: must be GET, PUT, or POST");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn observer_sees_each_retried_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503).set_body_string("  busy \n"))
            .expect(2)
            .mount(&server)
            .await;

        let recorder = Arc::new(Recorder::default());
        let client = fast_client(2).with_observer(recorder.clone());

        let err = client
            .request("GET", &format!("{}/flaky", server.uri()), RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);

        let events = recorder.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![RetryEvent {
                attempts: 1,
                remaining: 1,
                status_code: 503,
                content: "busy".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn get_payload_is_sent_as_query_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "hippopotamus"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(1);
        let options = RequestOptions {
            payload: Some(serde_json::json!({"q": "hippopotamus"})),
            ..RequestOptions::default()
        };

        client
            .request("get", &format!("{}/search", server.uri()), options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn post_payload_is_sent_as_json_body_with_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/things"))
            .and(body_json(serde_json::json!({"kind": "toaster"})))
            .and(basic_auth("svc", "s3cret"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(1);
        let options = RequestOptions {
            payload: Some(serde_json::json!({"kind": "toaster"})),
            auth: Some(BasicCredentials::new("svc", "s3cret")),
            ..RequestOptions::default()
        };

        let response = client
            .request("POST", &format!("{}/things", server.uri()), options)
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }
}
