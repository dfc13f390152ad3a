//! HTTP client for the Sabre REST API.
//!
//! Wraps `reqwest` with explicit per-request deadlines, status checking, and
//! truncated-body error reporting. Every caller (auth, search, probe) goes
//! through [`SabreClient::post_json`] or [`SabreClient::post_form`]; use
//! [`SabreClient::with_base_url`] to point at a mock server in tests.

use std::time::Duration;

use crate::error::SabreError;

/// How much of an upstream error body to keep for diagnosis. Sabre error
/// payloads front-load the useful part; the rest is boilerplate.
const ERROR_BODY_LIMIT: usize = 600;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SabreClient {
    client: reqwest::Client,
    base_url: String,
}

impl SabreClient {
    /// Creates a client for the given base URL (environment-selected by the
    /// caller; never hard-coded here).
    ///
    /// # Errors
    ///
    /// Returns [`SabreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, SabreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(user_agent.to_owned())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a client pointed at a mock server (wiremock) in tests.
    ///
    /// # Errors
    ///
    /// Returns [`SabreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(base_url: &str) -> Result<Self, SabreError> {
        Self::new(base_url, "bellhop/0.1 (test)")
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a JSON body with a bearer token and parses the JSON reply.
    ///
    /// # Errors
    ///
    /// - [`SabreError::Timeout`] if `deadline` elapses.
    /// - [`SabreError::UpstreamStatus`] on a non-2xx reply (body truncated).
    /// - [`SabreError::Http`] on network failure.
    /// - [`SabreError::Deserialize`] if the body is not valid JSON.
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        bearer_token: &str,
        body: &B,
        deadline: Duration,
        context: &str,
    ) -> Result<serde_json::Value, SabreError> {
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(bearer_token)
            .json(body)
            .timeout(deadline);
        self.execute(request, deadline, context).await
    }

    /// POSTs a form-encoded body, optionally with HTTP basic credentials,
    /// and parses the JSON reply. Used by the auth protocol variants.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SabreClient::post_json`].
    pub async fn post_form(
        &self,
        path: &str,
        basic: Option<(&str, &str)>,
        form: &[(&str, &str)],
        deadline: Duration,
        context: &str,
    ) -> Result<serde_json::Value, SabreError> {
        let mut request = self.client.post(self.url(path)).form(form).timeout(deadline);
        if let Some((user, password)) = basic {
            request = request.basic_auth(user, Some(password));
        }
        self.execute(request, deadline, context).await
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        deadline: Duration,
        context: &str,
    ) -> Result<serde_json::Value, SabreError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SabreError::Timeout {
                    context: context.to_owned(),
                    deadline_ms: deadline.as_millis().try_into().unwrap_or(u64::MAX),
                }
            } else {
                SabreError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SabreError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| SabreError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Truncates on a character boundary so multi-byte bodies cannot panic.
fn truncate_body(body: &str) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body.to_owned();
    }
    let cut = (0..=ERROR_BODY_LIMIT)
        .rev()
        .find(|i| body.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}… [truncated {} bytes]", &body[..cut], body.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_duplicate_slashes() {
        let client = SabreClient::with_base_url("http://localhost:9090/").unwrap();
        assert_eq!(
            client.url("/v3.0.0/get/hotelavail"),
            "http://localhost:9090/v3.0.0/get/hotelavail"
        );
    }

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        let long = "x".repeat(5000);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < 700);
        assert!(truncated.contains("[truncated"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(1000);
        let truncated = truncate_body(&long);
        assert!(truncated.contains("[truncated"));
    }
}
