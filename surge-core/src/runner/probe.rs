use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{HttpClient, HttpRequest};

use super::collector::RequestOutcome;

/// Issues single measured GET probes against the target.
///
/// Every failure mode — transport error, per-request timeout, unexpected
/// status — becomes a failed [`RequestOutcome`]; nothing escapes this
/// boundary as an error. The transport handle is passed in explicitly,
/// so connection reuse across probes is the caller's policy.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    client: Arc<HttpClient>,
    base_url: Arc<str>,
    success_status: u16,
    request_timeout: Option<Duration>,
}

impl EndpointClient {
    #[must_use]
    pub fn new(
        client: Arc<HttpClient>,
        base_url: &str,
        success_status: u16,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            success_status,
            request_timeout,
        }
    }

    #[must_use]
    pub fn success_status(&self) -> u16 {
        self.success_status
    }

    /// One probe: a single GET, timed around the transport call only.
    pub async fn call(&self, path: &str) -> RequestOutcome {
        let sep = if path.starts_with('/') { "" } else { "/" };
        let mut req = HttpRequest::get_owned(format!("{}{sep}{path}", self.base_url));
        req.timeout = self.request_timeout;

        let started = Instant::now();
        let res = self.client.request(req).await;
        let elapsed = started.elapsed();

        match res {
            Ok(res) if res.status == self.success_status => RequestOutcome::success(elapsed),
            Ok(res) => RequestOutcome::failure(format!(
                "unexpected status {} (expected {})",
                res.status, self.success_status
            )),
            Err(err) => {
                RequestOutcome::failure(format!("{}: {err}", err.transport_error_kind()))
            }
        }
    }
}
