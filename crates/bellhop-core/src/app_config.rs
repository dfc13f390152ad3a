/// Target Sabre environment. Selects the default base URL; credentials are
/// provisioned per environment and are not interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Cert,
    Production,
}

impl Environment {
    /// Default REST base URL for this environment, used when
    /// `SABRE_BASE_URL` is not set.
    #[must_use]
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Cert => "https://api.cert.platform.sabre.com",
            Environment::Production => "https://api.platform.sabre.com",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Cert => write!(f, "cert"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Sabre REST base URL; defaults per [`Environment`].
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// EPR identity parts for the preferred auth variant. When any of them
    /// is unset the EPR variant fails fast and the next variant is tried.
    pub epr_user: Option<String>,
    pub pcc: Option<String>,
    pub aaa_domain: Option<String>,
    pub password: Option<String>,
    pub log_level: String,
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub auth_timeout_secs: u64,
    pub probe_delay_ms: u64,
    pub verify_failure_threshold: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("epr_user", &self.epr_user)
            .field("pcc", &self.pcc)
            .field("aaa_domain", &self.aaa_domain)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("auth_timeout_secs", &self.auth_timeout_secs)
            .field("probe_delay_ms", &self.probe_delay_ms)
            .field("verify_failure_threshold", &self.verify_failure_threshold)
            .finish()
    }
}
