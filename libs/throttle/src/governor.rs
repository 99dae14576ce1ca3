use std::time::Duration;

use parking_lot::Mutex;
use reqwest::{header::HeaderMap, RequestBuilder, Response, StatusCode};
use tokio::time::Instant;

use crate::quota::{header_number, QuotaSnapshot};
use crate::ThrottleError;

/// Wait applied to a 429 that carries no `Retry-After` header.
pub const FALLBACK_WAIT: Duration = Duration::from_secs(60);

/// Consecutive 429 responses tolerated before giving up.
pub const DEFAULT_MAX_THROTTLES: u32 = 5;

const RETRY_AFTER_HEADER: &str = "retry-after";

/// What the caller should do with a response after the governor saw it.
#[derive(Debug)]
pub enum Outcome {
    /// The response is usable.
    Proceed(Response),
    /// The server throttled us; the wait has already been served. Resend.
    Retry,
}

impl Outcome {
    pub fn should_retry(&self) -> bool {
        matches!(self, Outcome::Retry)
    }
}

#[derive(Debug, Default)]
struct State {
    quota: QuotaSnapshot,
    last_request: Option<Instant>,
    consecutive_throttles: u32,
}

/// Per-API quota tracker and throttling handler.
///
/// One instance lives for the whole process per rate-limited API. All
/// requests to that API are expected to go through it sequentially.
#[derive(Debug)]
pub struct RateGovernor {
    api: String,
    min_interval: Option<Duration>,
    fallback_wait: Duration,
    max_throttles: u32,
    state: Mutex<State>,
}

impl RateGovernor {
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            min_interval: None,
            fallback_wait: FALLBACK_WAIT,
            max_throttles: DEFAULT_MAX_THROTTLES,
            state: Mutex::new(State::default()),
        }
    }

    /// Enforce a cooldown between consecutive requests.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    pub fn with_fallback_wait(mut self, wait: Duration) -> Self {
        self.fallback_wait = wait;
        self
    }

    pub fn with_max_throttles(mut self, max: u32) -> Self {
        self.max_throttles = max;
        self
    }

    /// Last quota window reported by the server.
    pub fn quota(&self) -> QuotaSnapshot {
        self.state.lock().quota
    }

    /// Wait out the configured cooldown since the previous request, then
    /// mark a new request as started.
    pub async fn pace(&self) {
        let wait = {
            let state = self.state.lock();
            match (self.min_interval, state.last_request) {
                (Some(interval), Some(last)) => interval.checked_sub(last.elapsed()),
                _ => None,
            }
        };
        if let Some(wait) = wait {
            tracing::debug!(api = %self.api, ?wait, "Pacing request");
            tokio::time::sleep(wait).await;
        }
        self.state.lock().last_request = Some(Instant::now());
    }

    /// Inspect a response.
    ///
    /// Updates the quota snapshot, sleeps through a 429 and reports
    /// [`Outcome::Retry`], or fails with [`ThrottleError::Api`] on any other
    /// non-success status.
    pub async fn observe(&self, response: Response) -> crate::Result<Outcome> {
        self.record_quota(response.headers());

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let attempts = {
                let mut state = self.state.lock();
                state.consecutive_throttles += 1;
                state.consecutive_throttles
            };
            if attempts > self.max_throttles {
                self.state.lock().consecutive_throttles = 0;
                return Err(ThrottleError::Exhausted {
                    api: self.api.clone(),
                    attempts,
                });
            }

            let wait = retry_after(response.headers()).unwrap_or(self.fallback_wait);
            tracing::warn!(
                api = %self.api,
                wait_secs = wait.as_secs(),
                attempt = attempts,
                "Rate limited, waiting before retry"
            );
            tokio::time::sleep(wait).await;
            return Ok(Outcome::Retry);
        }

        self.state.lock().consecutive_throttles = 0;

        if !status.is_success() {
            let message = response.text().await?;
            return Err(ThrottleError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(Outcome::Proceed(response))
    }

    /// Send `request`, resending it after every throttled answer.
    pub async fn execute(&self, request: RequestBuilder) -> crate::Result<Response> {
        loop {
            let Some(attempt) = request.try_clone() else {
                // An invalid builder can't be cloned either; report why
                return Err(match request.build() {
                    Err(e) => ThrottleError::Request(e),
                    Ok(_) => ThrottleError::NotReplayable,
                });
            };
            self.pace().await;
            let response = attempt.send().await?;
            match self.observe(response).await? {
                Outcome::Proceed(response) => return Ok(response),
                Outcome::Retry => continue,
            }
        }
    }

    fn record_quota(&self, headers: &HeaderMap) {
        let mut state = self.state.lock();
        if state.quota.update(headers) {
            tracing::debug!(
                api = %self.api,
                limit = ?state.quota.limit,
                remaining = ?state.quota.remaining,
                reset_at = ?state.quota.reset_at,
                "Quota updated"
            );
            if state.quota.is_exhausted() {
                tracing::warn!(
                    api = %self.api,
                    reset_at = ?state.quota.reset_at,
                    "Quota window used up"
                );
            }
        }
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    header_number::<u64>(headers, RETRY_AFTER_HEADER).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> Response {
        let mut builder = http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        Response::from(builder.body(body).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_response_waits_retry_after() {
        let governor = RateGovernor::new("test");
        let started = Instant::now();

        let outcome = governor
            .observe(response(429, &[("Retry-After", "7")], ""))
            .await
            .unwrap();

        assert!(outcome.should_retry());
        assert!(started.elapsed() >= Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_response_without_header_uses_fallback() {
        let governor = RateGovernor::new("test");
        let started = Instant::now();

        let outcome = governor.observe(response(429, &[], "")).await.unwrap();

        assert!(outcome.should_retry());
        assert!(started.elapsed() >= FALLBACK_WAIT);
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let governor = RateGovernor::new("test");
        let err = governor
            .observe(response(500, &[], "upstream broke"))
            .await
            .unwrap_err();

        match err {
            ThrottleError::Api {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "upstream broke");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_success_records_quota() {
        let governor = RateGovernor::new("test");
        let outcome = governor
            .observe(response(
                200,
                &[("X-RateLimit-Limit", "90"), ("X-RateLimit-Remaining", "89")],
                "{}",
            ))
            .await
            .unwrap();

        assert!(!outcome.should_retry());
        assert_eq!(governor.quota().limit, Some(90));
        assert_eq!(governor.quota().remaining, Some(89));
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_throttles_are_bounded() {
        let governor = RateGovernor::new("test")
            .with_max_throttles(2)
            .with_fallback_wait(Duration::from_secs(1));

        for _ in 0..2 {
            assert!(governor
                .observe(response(429, &[], ""))
                .await
                .unwrap()
                .should_retry());
        }
        let err = governor.observe(response(429, &[], "")).await.unwrap_err();
        assert!(matches!(err, ThrottleError::Exhausted { attempts: 3, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_throttle_count() {
        let governor = RateGovernor::new("test")
            .with_max_throttles(1)
            .with_fallback_wait(Duration::from_secs(1));

        governor.observe(response(429, &[], "")).await.unwrap();
        governor.observe(response(200, &[], "")).await.unwrap();
        assert!(governor
            .observe(response(429, &[], ""))
            .await
            .unwrap()
            .should_retry());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pace_enforces_min_interval() {
        let governor = RateGovernor::new("test").with_min_interval(Duration::from_millis(250));

        let started = Instant::now();
        governor.pace().await;
        governor.pace().await;
        governor.pace().await;

        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pace_without_interval_does_not_wait() {
        let governor = RateGovernor::new("test");
        let started = Instant::now();
        governor.pace().await;
        governor.pace().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    /// Serve canned HTTP responses in order, one per connection, recording
    /// each request body.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<StdMutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let bodies = Arc::new(StdMutex::new(Vec::new()));
        let seen = bodies.clone();

        tokio::spawn(async move {
            for (status, extra_headers) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let body = read_body(&mut socket).await;
                seen.lock().unwrap().push(body);
                let reply = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Length: 2\r\nConnection: close\r\n{extra_headers}\r\nok"
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (format!("http://{addr}/"), bodies)
    }

    async fn read_body(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length || n == 0 {
                    return String::from_utf8_lossy(&buf[end + 4..]).to_string();
                }
            } else if n == 0 {
                return String::new();
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_resends_after_throttle() {
        let (url, bodies) = serve(vec![(429, "Retry-After: 1\r\n"), (200, "")]).await;
        let governor = RateGovernor::new("test");
        let client = reqwest::Client::new();
        let started = Instant::now();

        let response = governor
            .execute(client.post(&url).body("{\"page\":2}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
        assert_eq!(
            *bodies.lock().unwrap(),
            vec!["{\"page\":2}".to_string(), "{\"page\":2}".to_string()]
        );
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_execute_reports_error_body() {
        let (url, _) = serve(vec![(404, "")]).await;
        let err = RateGovernor::new("test")
            .execute(reqwest::Client::new().get(&url))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ThrottleError::Api { status_code: 404, ref message } if message == "ok"
        ));
    }

    #[tokio::test]
    async fn test_streaming_body_is_not_replayable() {
        let stream = futures::stream::once(async { Ok::<_, std::io::Error>("chunk") });
        let request = reqwest::Client::new()
            .post("http://127.0.0.1:9/")
            .body(reqwest::Body::wrap_stream(stream));

        let err = RateGovernor::new("test").execute(request).await.unwrap_err();
        assert!(matches!(err, ThrottleError::NotReplayable));
    }

    #[tokio::test]
    async fn test_invalid_request_reports_build_error() {
        let err = RateGovernor::new("test")
            .execute(reqwest::Client::new().get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, ThrottleError::Request(_)));
    }
}
