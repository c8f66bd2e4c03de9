use serde::{Deserialize, Serialize};
use std::env;

/// Process-wide configuration, loaded once at startup and injected into the
/// application state. Request handling never reads the environment directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub admin_auth: AdminAuthConfig,
    pub client_auth: ClientAuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size when the client supplies none.
    pub default_limit: u64,
}

/// Administrator sessions ride an HTTP-only cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAuthConfig {
    pub token_secret: String,
    pub token_ttl_hours: i64,
    pub cookie_name: String,
    /// Dropped in development so local HTTP still carries the cookie.
    pub cookie_secure: bool,
}

/// Client sessions ride a bearer header, with a body-carried refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAuthConfig {
    pub access_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_secret: String,
    pub refresh_ttl_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("PAGINATION_DEFAULT_LIMIT") {
            self.pagination.default_limit = v.parse().unwrap_or(self.pagination.default_limit);
        }

        if let Ok(v) = env::var("ADMIN_TOKEN_SECRET") {
            self.admin_auth.token_secret = v;
        }
        if let Ok(v) = env::var("ADMIN_TOKEN_TTL_HOURS") {
            self.admin_auth.token_ttl_hours = v.parse().unwrap_or(self.admin_auth.token_ttl_hours);
        }
        if let Ok(v) = env::var("ADMIN_COOKIE_NAME") {
            self.admin_auth.cookie_name = v;
        }

        if let Ok(v) = env::var("CLIENT_ACCESS_SECRET") {
            self.client_auth.access_secret = v;
        }
        if let Ok(v) = env::var("CLIENT_ACCESS_TTL_MINUTES") {
            self.client_auth.access_ttl_minutes =
                v.parse().unwrap_or(self.client_auth.access_ttl_minutes);
        }
        if let Ok(v) = env::var("CLIENT_REFRESH_SECRET") {
            self.client_auth.refresh_secret = v;
        }
        if let Ok(v) = env::var("CLIENT_REFRESH_TTL_DAYS") {
            self.client_auth.refresh_ttl_days =
                v.parse().unwrap_or(self.client_auth.refresh_ttl_days);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            pagination: PaginationConfig { default_limit: 4 },
            admin_auth: AdminAuthConfig {
                token_secret: "dev-admin-secret".to_string(),
                token_ttl_hours: 24,
                cookie_name: "token".to_string(),
                cookie_secure: false,
            },
            client_auth: ClientAuthConfig {
                access_secret: "dev-client-secret".to_string(),
                access_ttl_minutes: 60,
                refresh_secret: "dev-client-refresh-secret".to_string(),
                refresh_ttl_days: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            pagination: PaginationConfig { default_limit: 4 },
            admin_auth: AdminAuthConfig {
                token_secret: String::new(),
                token_ttl_hours: 24,
                cookie_name: "token".to_string(),
                cookie_secure: true,
            },
            client_auth: ClientAuthConfig {
                access_secret: String::new(),
                access_ttl_minutes: 60,
                refresh_secret: String::new(),
                refresh_ttl_days: 14,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            pagination: PaginationConfig { default_limit: 4 },
            admin_auth: AdminAuthConfig {
                // Secrets have no baked-in production value; the deployment
                // must supply them or token issuance fails closed.
                token_secret: String::new(),
                token_ttl_hours: 4,
                cookie_name: "token".to_string(),
                cookie_secure: true,
            },
            client_auth: ClientAuthConfig {
                access_secret: String::new(),
                access_ttl_minutes: 30,
                refresh_secret: String::new(),
                refresh_ttl_days: 7,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.pagination.default_limit, 4);
        assert!(!config.admin_auth.cookie_secure);
        assert!(!config.admin_auth.token_secret.is_empty());
    }

    #[test]
    fn production_has_no_baked_in_secrets() {
        let config = AppConfig::production();
        assert!(config.admin_auth.token_secret.is_empty());
        assert!(config.client_auth.access_secret.is_empty());
        assert!(config.admin_auth.cookie_secure);
    }
}
