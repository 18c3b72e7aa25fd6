use std::net::IpAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ESPEAK_BIN: &str = "espeak-ng";
pub const BUILTIN_GATEWAY_PATH: &str = "/api/text_to_speech";

/// Audio type of the bytes a managed synthesis service returns.
pub const MPEG_MIME: &str = "audio/mpeg";
/// Audio type of the bytes the built-in espeak gateway returns.
pub const WAV_MIME: &str = "audio/wav";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gateway_url: String,
    pub gateway_timeout: Duration,
    pub serve_gateway: bool,
    pub espeak_bin: String,
    /// Explicit `AUDIO_MIME`; `None` lets the target gateway decide.
    pub audio_mime: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", "a number", raw))?,
            None => DEFAULT_PORT,
        };

        let serve_gateway = match lookup("SERVE_GATEWAY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("SERVE_GATEWAY", "true or false", raw))?,
            None => true,
        };

        let gateway_url = match lookup("GATEWAY_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) => {
                return Err(ConfigError::invalid("GATEWAY_URL", "an http(s) URL", url))
            }
            None if serve_gateway => builtin_url(&host, port),
            None => return Err(ConfigError::NoGateway),
        };

        let timeout_secs = match lookup("GATEWAY_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::invalid(
                        "GATEWAY_TIMEOUT_SECS",
                        "a positive number of seconds",
                        raw,
                    ))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            gateway_url,
            gateway_timeout: Duration::from_secs(timeout_secs),
            serve_gateway,
            espeak_bin: lookup("ESPEAK_BIN").unwrap_or_else(|| DEFAULT_ESPEAK_BIN.to_string()),
            audio_mime: lookup("AUDIO_MIME"),
        })
    }

    /// Where this process answers its own gateway requests.
    pub fn builtin_gateway_url(&self) -> String {
        builtin_url(&self.host, self.port)
    }

    /// True when the page talks to the gateway mounted in this process.
    pub fn targets_builtin_gateway(&self) -> bool {
        if !self.serve_gateway {
            return false;
        }
        let url = self.gateway_url.trim_end_matches('/');
        url == self.builtin_gateway_url()
            || url == format!("http://localhost:{}{}", self.port, BUILTIN_GATEWAY_PATH)
    }
}

// A wildcard bind is reachable on loopback; a specific bind only on itself.
fn builtin_url(host: &str, port: u16) -> String {
    let authority = match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) if ip.is_unspecified() => "127.0.0.1".to_string(),
        Ok(IpAddr::V6(ip)) if ip.is_unspecified() => "[::1]".to_string(),
        Ok(IpAddr::V6(ip)) => format!("[{}]", ip),
        _ => host.to_string(),
    };
    format!("http://{}:{}{}", authority, port, BUILTIN_GATEWAY_PATH)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
