use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub enforcement: EnforcementConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Token issuing and bootstrap admin account.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours(), bootstrap_admin: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn default_token_ttl_hours() -> i64 { 12 }

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    #[serde(default = "default_otp_length")]
    pub length: usize,
    #[serde(default = "default_otp_ttl")]
    pub ttl_minutes: i64,
    #[serde(default = "default_otp_attempts")]
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { length: default_otp_length(), ttl_minutes: default_otp_ttl(), max_attempts: default_otp_attempts() }
    }
}

fn default_otp_length() -> usize { 6 }
fn default_otp_ttl() -> i64 { 10 }
fn default_otp_attempts() -> i32 { 5 }

/// Business knobs for challans and emission classification.
#[derive(Debug, Clone, Deserialize)]
pub struct EnforcementConfig {
    #[serde(default = "default_due_days")]
    pub challan_due_days: i64,
    #[serde(default = "default_noise_limit")]
    pub noise_limit_db: f64,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self { challan_due_days: default_due_days(), noise_limit_db: default_noise_limit() }
    }
}

fn default_due_days() -> i64 { 14 }
fn default_noise_limit() -> f64 { 85.0 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config assembled purely from env vars, used when no file is present.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") { cfg.server.host = host; }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.database.max_connections = default_max_connections();
        cfg.database.min_connections = default_min_connections();
        cfg.database.connect_timeout_secs = default_connect_timeout();
        cfg.database.idle_timeout_secs = default_idle_timeout();
        cfg.database.max_lifetime_secs = default_max_lifetime();
        cfg.database.acquire_timeout_secs = default_acquire_timeout();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.otp.validate()?;
        self.enforcement.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().len() < 16 {
            return Err(anyhow!("auth.jwt_secret must be at least 16 characters (config.toml or JWT_SECRET)"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        if let Some(admin) = &self.bootstrap_admin {
            if admin.password.len() < 8 {
                return Err(anyhow!("auth.bootstrap_admin.password must be at least 8 characters"));
            }
        }
        Ok(())
    }
}

impl OtpConfig {
    fn validate(&self) -> Result<()> {
        if !(4..=10).contains(&self.length) {
            return Err(anyhow!("otp.length must be within 4..=10"));
        }
        if self.ttl_minutes <= 0 || self.max_attempts <= 0 {
            return Err(anyhow!("otp.ttl_minutes and otp.max_attempts must be positive"));
        }
        Ok(())
    }
}

impl EnforcementConfig {
    fn validate(&self) -> Result<()> {
        if self.challan_due_days <= 0 {
            return Err(anyhow!("enforcement.challan_due_days must be positive"));
        }
        if !(0.0..=200.0).contains(&self.noise_limit_db) {
            return Err(anyhow!("enforcement.noise_limit_db must be within 0..=200"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> AppConfig {
        toml::from_str(src).expect("parse config")
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://u:p@localhost/noise"
            [auth]
            jwt_secret = "0123456789abcdef"
            "#,
        );
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.otp.length, 6);
        assert_eq!(cfg.otp.ttl_minutes, 10);
        assert_eq!(cfg.enforcement.challan_due_days, 14);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let mut cfg = parse(
            r#"
            [database]
            url = "mysql://localhost/noise"
            [auth]
            jwt_secret = "0123456789abcdef"
            "#,
        );
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn validate_rejects_short_jwt_secret() {
        let auth = AuthConfig { jwt_secret: "short".into(), ..AuthConfig::default() };
        assert!(auth.validate().is_err());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut server = ServerConfig { host: " ".into(), port: 9000, worker_threads: Some(0) };
        server.normalize().unwrap();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.worker_threads, Some(4));
    }

    #[test]
    fn otp_length_bounds() {
        let otp = OtpConfig { length: 2, ..OtpConfig::default() };
        assert!(otp.validate().is_err());
        assert!(OtpConfig::default().validate().is_ok());
    }
}
