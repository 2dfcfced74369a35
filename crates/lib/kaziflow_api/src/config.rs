//! API server configuration.
//!
//! One process-wide configuration object, resolved once at startup by the
//! server binary (the single source of truth for the bind address and
//! database location). Everything here is read-only afterwards.

/// Default CORS origins for local frontend development.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret. Immutable after startup.
    pub jwt_secret: String,
    /// Google API key for the risk scorer. Absent = mock scoring.
    pub google_api_key: Option<String>,
    /// CORS origins allowed to call the API.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Default origin list as owned strings.
    pub fn default_allowed_origins() -> Vec<String> {
        DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
