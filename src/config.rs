//! Process configuration, read once from the environment at startup.
//!
//! Every variable is optional. Missing values fall back to a logged default;
//! malformed values abort startup.

use std::{fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, bail};
use rand::RngCore;
use tracing::{info, warn};

use crate::accounts::service::DEFAULT_BCRYPT_COST;
use crate::storage::memory::DEFAULT_TTL;

pub const MIN_SECRET_LEN: usize = 32;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cookie_secret: Vec<u8>,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub entry_ttl: Duration,
    pub reap_interval: Duration,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `load` passes the environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cookie_secret = match lookup("TODO_COOKIE_SECRET") {
            Some(secret) => {
                if secret.len() < MIN_SECRET_LEN {
                    bail!("TODO_COOKIE_SECRET must be at least {MIN_SECRET_LEN} bytes");
                }
                secret.into_bytes()
            }
            None => {
                warn!("TODO_COOKIE_SECRET not set, sessions will not survive a restart");
                let mut secret = vec![0u8; MIN_SECRET_LEN * 2];
                rand::thread_rng().fill_bytes(&mut secret);
                secret
            }
        };

        let requested_cost: u32 =
            try_load(&lookup, "TODO_BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string())?;
        let bcrypt_cost = requested_cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);
        if bcrypt_cost != requested_cost {
            warn!("TODO_BCRYPT_COST {requested_cost} out of range, using {bcrypt_cost}");
        }

        let entry_ttl_secs: u64 = try_load(
            &lookup,
            "TODO_ENTRY_TTL_SECS",
            &DEFAULT_TTL.as_secs().to_string(),
        )?;
        let reap_interval_secs: u64 = try_load(&lookup, "TODO_REAP_INTERVAL_SECS", "60")?;
        if entry_ttl_secs == 0 || reap_interval_secs == 0 {
            bail!("TODO_ENTRY_TTL_SECS and TODO_REAP_INTERVAL_SECS must be positive");
        }

        Ok(Self {
            host: try_load(&lookup, "TODO_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "TODO_PORT", "3000")?,
            cookie_secret,
            cookie_secure: try_load(&lookup, "TODO_COOKIE_SECURE", "false")?,
            bcrypt_cost,
            entry_ttl: Duration::from_secs(entry_ttl_secs),
            reap_interval: Duration::from_secs(reap_interval_secs),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(!config.cookie_secure);
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert_eq!(config.entry_ttl, DEFAULT_TTL);
        assert_eq!(config.reap_interval, Duration::from_secs(60));
        assert!(config.cookie_secret.len() >= MIN_SECRET_LEN);
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let secret = "s".repeat(MIN_SECRET_LEN);
        let config = Config::from_lookup(lookup_from(&[
            ("TODO_HOST", "0.0.0.0"),
            ("TODO_PORT", "8080"),
            ("TODO_COOKIE_SECRET", secret.as_str()),
            ("TODO_COOKIE_SECURE", "true"),
            ("TODO_ENTRY_TTL_SECS", "120"),
            ("TODO_REAP_INTERVAL_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.cookie_secret, secret.into_bytes());
        assert!(config.cookie_secure);
        assert_eq!(config.entry_ttl, Duration::from_secs(120));
        assert_eq!(config.reap_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_bcrypt_cost_is_clamped() {
        let low = Config::from_lookup(lookup_from(&[("TODO_BCRYPT_COST", "1")])).unwrap();
        let high = Config::from_lookup(lookup_from(&[("TODO_BCRYPT_COST", "99")])).unwrap();

        assert_eq!(low.bcrypt_cost, MIN_BCRYPT_COST);
        assert_eq!(high.bcrypt_cost, MAX_BCRYPT_COST);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("TODO_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TODO_COOKIE_SECRET", "short")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TODO_ENTRY_TTL_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TODO_COOKIE_SECURE", "yes")])).is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = Config::from_lookup(lookup_from(&[])).unwrap();
        let b = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_ne!(a.cookie_secret, b.cookie_secret);
    }
}
