use std::str::FromStr;

use anyhow::{bail, Context};
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use time::Duration;

pub const DEFAULT_SECRET: &str = "change-this-in-prod";

/// Longest accepted access-token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub ttl: Duration,
}

/// Parses a signing algorithm name. Only the HMAC family is accepted since keys
/// are built from a shared secret.
pub fn parse_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    let alg = Algorithm::from_str(name)
        .with_context(|| format!("unknown jwt algorithm {:?}", name))?;
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(alg),
        other => bail!("jwt algorithm {:?} is not supported with a shared secret", other),
    }
}

/// Token lifetime in minutes, bounded to `1..=MAX_TTL_MINUTES`.
pub fn parse_ttl_minutes(minutes: i64) -> anyhow::Result<Duration> {
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        bail!(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {}, got {}",
            MAX_TTL_MINUTES,
            minutes
        );
    }
    Ok(Duration::minutes(minutes))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; missing or unparseable
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt = JwtConfig {
            secret: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET.into()),
            algorithm: parse_algorithm(
                lookup("ALGORITHM").as_deref().unwrap_or("HS256"),
            )?,
            ttl: parse_ttl_minutes(
                lookup("ACCESS_TOKEN_EXPIRE_MINUTES")
                    .and_then(|v| v.parse::<i64>().ok())
                    .unwrap_or(60),
            )?,
        };

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Item Vault".into()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://app.db?mode=rwc".into()),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: lookup("APP_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            jwt,
        })
    }
}
