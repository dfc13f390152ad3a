use thiserror::Error;

/// Errors returned by the Sabre integration.
#[derive(Debug, Error)]
pub enum SabreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded its explicit deadline.
    #[error("{context} timed out after {deadline_ms}ms")]
    Timeout { context: String, deadline_ms: u64 },

    /// Non-2xx response from the search or availability endpoint. The body
    /// is truncated for diagnosis; callers decide whether to retry.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// An auth variant cannot run because its credentials are not present
    /// in the configuration.
    #[error("{reason}")]
    CredentialsUnavailable { reason: &'static str },

    /// Every configured auth variant failed. Carries one reason per attempt,
    /// in the order they were tried.
    #[error("all authentication variants failed: {}", attempts.join("; "))]
    AuthenticationFailed { attempts: Vec<String> },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failed_lists_every_attempt() {
        let err = SabreError::AuthenticationFailed {
            attempts: vec![
                "epr_credential: HTTP 401".to_owned(),
                "password_grant: HTTP 403".to_owned(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("epr_credential: HTTP 401"));
        assert!(msg.contains("password_grant: HTTP 403"));
    }

    #[test]
    fn timeout_reports_context_and_deadline() {
        let err = SabreError::Timeout {
            context: "hotel search".to_owned(),
            deadline_ms: 10_000,
        };
        assert_eq!(err.to_string(), "hotel search timed out after 10000ms");
    }
}
