//! Configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Evaluation endpoint that receives the final per-session report.
pub const DEFAULT_CALLBACK_URL: &str = "https://hackathon.guvi.in/api/updateHoneyPotFinalResult";

/// Accepted bounds for the callback timeout, in seconds.
const MIN_CALLBACK_TIMEOUT_SECS: u64 = 5;
const MAX_CALLBACK_TIMEOUT_SECS: u64 = 10;

/// Upper bound on retry attempts so a misconfiguration can't spin forever.
const MAX_CALLBACK_ATTEMPTS: u32 = 5;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct HoneypotConfig {
    /// Key expected in the `x-api-key` header of inbound requests.
    pub api_key: SecretString,
    /// Address the HTTP server listens on.
    pub listen_addr: SocketAddr,
    /// Outbound report delivery settings.
    pub callback: CallbackConfig,
    /// Minimum messages exchanged before a scam session may be reported.
    pub report_min_messages: u32,
    /// Optional bound on remembered sessions (oldest claims are evicted).
    pub max_tracked_sessions: Option<usize>,
}

/// Settings for the report callback.
#[derive(Debug, Clone)]
pub struct CallbackConfig {
    pub url: String,
    pub timeout: Duration,
    /// Total delivery attempts per report. 1 disables retry.
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles after each failure.
    pub initial_backoff: Duration,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CALLBACK_URL.to_string(),
            timeout: Duration::from_secs(MIN_CALLBACK_TIMEOUT_SECS),
            max_attempts: 1,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl HoneypotConfig {
    /// Build a config with defaults around the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000),
            callback: CallbackConfig::default(),
            report_min_messages: 1,
            max_tracked_sessions: None,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("HONEYPOT_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("HONEYPOT_API_KEY".into()))?;

        let mut config = Self::new(api_key);

        let ip: IpAddr = parse_or(&lookup, "HONEYPOT_BIND_ADDR", config.listen_addr.ip())?;
        let port: u16 = parse_or(&lookup, "HONEYPOT_PORT", config.listen_addr.port())?;
        config.listen_addr = SocketAddr::new(ip, port);

        if let Some(url) = lookup("HONEYPOT_CALLBACK_URL").filter(|u| !u.trim().is_empty()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    key: "HONEYPOT_CALLBACK_URL".into(),
                    message: format!("expected an http(s) URL, got '{url}'"),
                });
            }
            config.callback.url = url;
        }

        let timeout_secs: u64 = parse_or(
            &lookup,
            "HONEYPOT_CALLBACK_TIMEOUT_SECS",
            MIN_CALLBACK_TIMEOUT_SECS,
        )?;
        if !(MIN_CALLBACK_TIMEOUT_SECS..=MAX_CALLBACK_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(ConfigError::InvalidValue {
                key: "HONEYPOT_CALLBACK_TIMEOUT_SECS".into(),
                message: format!(
                    "must be between {MIN_CALLBACK_TIMEOUT_SECS} and {MAX_CALLBACK_TIMEOUT_SECS}, got {timeout_secs}"
                ),
            });
        }
        config.callback.timeout = Duration::from_secs(timeout_secs);

        let max_attempts: u32 = parse_or(&lookup, "HONEYPOT_CALLBACK_MAX_ATTEMPTS", 1)?;
        if !(1..=MAX_CALLBACK_ATTEMPTS).contains(&max_attempts) {
            return Err(ConfigError::InvalidValue {
                key: "HONEYPOT_CALLBACK_MAX_ATTEMPTS".into(),
                message: format!("must be between 1 and {MAX_CALLBACK_ATTEMPTS}, got {max_attempts}"),
            });
        }
        config.callback.max_attempts = max_attempts;

        let backoff_ms: u64 = parse_or(&lookup, "HONEYPOT_CALLBACK_BACKOFF_MS", 500)?;
        config.callback.initial_backoff = Duration::from_millis(backoff_ms);

        config.report_min_messages = parse_or(&lookup, "HONEYPOT_REPORT_MIN_MESSAGES", 1)?;

        config.max_tracked_sessions = match lookup("HONEYPOT_MAX_TRACKED_SESSIONS") {
            Some(raw) if !raw.trim().is_empty() => {
                let bound: usize = parse_value("HONEYPOT_MAX_TRACKED_SESSIONS", &raw)?;
                if bound == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "HONEYPOT_MAX_TRACKED_SESSIONS".into(),
                        message: "must be greater than zero".into(),
                    });
                }
                Some(bound)
            }
            _ => None,
        };

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => parse_value(key, &raw),
        _ => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}
