use std::env;

/// Runtime configuration, loaded once at startup and injected via app data.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    /// Emails granted admin access even without an `admins` row. Lets the
    /// first administrator bootstrap an empty deployment.
    pub fallback_admin_emails: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:data/facfeed.db?mode=rwc".to_string());
        let fallback_admin_emails = env::var("FALLBACK_ADMIN_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Config {
            bind_addr,
            database_url,
            fallback_admin_emails,
        }
    }

    pub fn is_fallback_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.fallback_admin_emails.iter().any(|e| e == &email)
    }
}
