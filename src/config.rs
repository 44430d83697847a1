use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "recipe-box".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "recipe-box-users".into()),
            ttl_minutes: check_ttl_minutes(parse_var("JWT_EXPIRE_MINUTES", 60)?)?,
        };
        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );
        Ok(Self {
            database_url,
            jwt,
            cors_origins,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("APP_PORT", 8080)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid {name}: {v:?}")),
        Err(_) => Ok(default),
    }
}

/// Token lifetime must lie within one minute and one year.
pub const TTL_MINUTES_RANGE: std::ops::RangeInclusive<i64> = 1..=525_600;

fn check_ttl_minutes(minutes: i64) -> anyhow::Result<i64> {
    if !TTL_MINUTES_RANGE.contains(&minutes) {
        anyhow::bail!(
            "invalid JWT_EXPIRE_MINUTES: {minutes} (expected {}..={})",
            TTL_MINUTES_RANGE.start(),
            TTL_MINUTES_RANGE.end()
        );
    }
    Ok(minutes)
}

/// Splits a comma-separated origin list, dropping blank entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
