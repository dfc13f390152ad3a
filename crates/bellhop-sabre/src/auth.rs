//! Token acquisition with multi-variant protocol fallback.
//!
//! Sabre exposes three incompatible authentication protocols whose
//! provisioning differs per account and changes outside our control. The
//! manager tries them in documented-working-first order on every refresh
//! cycle; a variant that failed last time is tried again, never blacklisted.
//! The resulting [`Credential`] is cached and replaced wholesale when it
//! enters the expiry buffer window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use bellhop_core::AppConfig;

use crate::client::SabreClient;
use crate::error::SabreError;
use crate::types::TokenResponse;

/// A token is refreshed once it is within this window of its expiry, so a
/// request never departs with a credential about to lapse mid-flight.
const EXPIRY_BUFFER: chrono::Duration = chrono::Duration::minutes(5);

/// The three protocol variants, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVariant {
    /// EPR composite identity (`V1:user:pcc:domain`) via HTTP basic auth
    /// with the `client_credentials` grant.
    EprCredential,
    /// Client id/secret basic auth with the `password` grant.
    PasswordGrant,
    /// Form-encoded client id/secret against the v1 endpoint.
    LegacySession,
}

impl AuthVariant {
    pub const PRIORITY: [AuthVariant; 3] = [
        AuthVariant::EprCredential,
        AuthVariant::PasswordGrant,
        AuthVariant::LegacySession,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AuthVariant::EprCredential => "epr_credential",
            AuthVariant::PasswordGrant => "password_grant",
            AuthVariant::LegacySession => "legacy_session",
        }
    }

    async fn attempt(
        self,
        client: &SabreClient,
        config: &AppConfig,
        deadline: Duration,
    ) -> Result<Credential, SabreError> {
        let response = match self {
            AuthVariant::EprCredential => {
                let (Some(user), Some(pcc), Some(domain), Some(password)) = (
                    config.epr_user.as_deref(),
                    config.pcc.as_deref(),
                    config.aaa_domain.as_deref(),
                    config.password.as_deref(),
                ) else {
                    return Err(SabreError::CredentialsUnavailable {
                        reason: "EPR identity not configured",
                    });
                };
                let composite = format!("V1:{user}:{pcc}:{domain}");
                client
                    .post_form(
                        "v2/auth/token",
                        Some((&composite, password)),
                        &[("grant_type", "client_credentials")],
                        deadline,
                        "auth (epr_credential)",
                    )
                    .await?
            }
            AuthVariant::PasswordGrant => {
                client
                    .post_form(
                        "v2/auth/token",
                        Some((&config.client_id, &config.client_secret)),
                        &[
                            ("grant_type", "password"),
                            ("username", &config.client_id),
                            ("password", &config.client_secret),
                        ],
                        deadline,
                        "auth (password_grant)",
                    )
                    .await?
            }
            AuthVariant::LegacySession => {
                client
                    .post_form(
                        "v1/auth/token",
                        None,
                        &[
                            ("client_id", &config.client_id),
                            ("client_secret", &config.client_secret),
                            ("grant_type", "password"),
                        ],
                        deadline,
                        "auth (legacy_session)",
                    )
                    .await?
            }
        };

        let token: TokenResponse =
            serde_json::from_value(response).map_err(|e| SabreError::Deserialize {
                context: format!("auth ({})", self.name()),
                source: e,
            })?;
        Ok(Credential::from_response(token, self))
    }
}

/// An issued bearer credential. Replaced wholesale on refresh, never
/// patched.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub variant: AuthVariant,
}

/// Upper bound on a reported token lifetime. Sabre tokens live for under an
/// hour; a reply claiming more is malformed and must not overflow the
/// expiry arithmetic.
const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

impl Credential {
    fn from_response(response: TokenResponse, variant: AuthVariant) -> Self {
        let lifetime = response.expires_in.map_or_else(
            // Legacy responses omit expires_in; fall back to the
            // conservative cached-token TTL.
            || chrono::Duration::from_std(bellhop_cache::TOKEN_TTL)
                .unwrap_or_else(|_| chrono::Duration::minutes(50)),
            |secs| {
                let secs = i64::try_from(secs)
                    .unwrap_or(MAX_TOKEN_LIFETIME_SECS)
                    .min(MAX_TOKEN_LIFETIME_SECS);
                chrono::Duration::seconds(secs)
            },
        );
        Self {
            token: response.access_token,
            expires_at: Utc::now() + lifetime,
            variant,
        }
    }

    /// Valid while the expiry buffer has not been entered.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - EXPIRY_BUFFER
    }
}

/// Injectable token source. Holds at most one trusted credential at a time;
/// a stale credential is discarded and a full fallback cycle runs.
pub struct AuthManager {
    client: Arc<SabreClient>,
    config: AppConfig,
    credential: tokio::sync::RwLock<Option<Credential>>,
}

impl AuthManager {
    #[must_use]
    pub fn new(client: Arc<SabreClient>, config: AppConfig) -> Self {
        Self {
            client,
            config,
            credential: tokio::sync::RwLock::new(None),
        }
    }

    /// Returns a bearer token, reusing the cached credential while it is
    /// outside the expiry buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SabreError::AuthenticationFailed`] only after every variant
    /// in [`AuthVariant::PRIORITY`] has failed; the per-variant reasons are
    /// aggregated in order.
    pub async fn token(&self) -> Result<String, SabreError> {
        {
            let cached = self.credential.read().await;
            if let Some(credential) = cached.as_ref() {
                if credential.is_valid_at(Utc::now()) {
                    return Ok(credential.token.clone());
                }
            }
        }

        let mut slot = self.credential.write().await;
        // Another task may have finished a refresh while we waited.
        if let Some(credential) = slot.as_ref() {
            if credential.is_valid_at(Utc::now()) {
                return Ok(credential.token.clone());
            }
        }

        let credential = self.authenticate().await?;
        let token = credential.token.clone();
        *slot = Some(credential);
        Ok(token)
    }

    /// Runs the full priority cycle once. Each attempt is independent: a
    /// failure leaves nothing behind for the next variant to trip over.
    async fn authenticate(&self) -> Result<Credential, SabreError> {
        let deadline = Duration::from_secs(self.config.auth_timeout_secs);
        let mut attempts = Vec::with_capacity(AuthVariant::PRIORITY.len());

        for variant in AuthVariant::PRIORITY {
            let started = std::time::Instant::now();
            match variant.attempt(&self.client, &self.config, deadline).await {
                Ok(credential) => {
                    tracing::info!(
                        variant = variant.name(),
                        latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                        expires_at = %credential.expires_at,
                        "authentication succeeded"
                    );
                    return Ok(credential);
                }
                Err(err) => {
                    tracing::warn!(
                        variant = variant.name(),
                        latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "authentication variant failed, trying next"
                    );
                    attempts.push(format!("{}: {err}", variant.name()));
                }
            }
        }

        Err(SabreError::AuthenticationFailed { attempts })
    }

    /// Drops the cached credential so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.credential.write().await = None;
    }
}
