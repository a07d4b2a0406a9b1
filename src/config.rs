use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

use crate::http::transport::{TransportOptions, DEFAULT_MAX_BODY_BYTES};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub log_request_bodies: bool,
    pub request_deadline: Option<Duration>,
    pub max_body_bytes: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("PROFILESVC_LOG_REQUEST_BODIES must be a boolean")]
    InvalidLogRequestBodies,
    #[error("PROFILESVC_REQUEST_DEADLINE_MS must be a positive integer")]
    InvalidRequestDeadline,
    #[error("PROFILESVC_MAX_BODY_BYTES must be a positive integer")]
    InvalidMaxBodyBytes,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let log_request_bodies = non_empty_var("PROFILESVC_LOG_REQUEST_BODIES")
            .map(|value| parse_flag(&value).ok_or(ConfigError::InvalidLogRequestBodies))
            .transpose()?
            .unwrap_or(false);
        let request_deadline = non_empty_var("PROFILESVC_REQUEST_DEADLINE_MS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|millis| *millis > 0)
                    .map(Duration::from_millis)
                    .ok_or(ConfigError::InvalidRequestDeadline)
            })
            .transpose()?;
        let max_body_bytes = non_empty_var("PROFILESVC_MAX_BODY_BYTES")
            .map(|value| {
                value
                    .parse::<usize>()
                    .ok()
                    .filter(|bytes| *bytes > 0)
                    .ok_or(ConfigError::InvalidMaxBodyBytes)
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        let config = Self {
            bind_addr,
            bind_port,
            log_request_bodies,
            request_deadline,
            max_body_bytes,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            log_request_bodies: self.log_request_bodies,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        env::remove_var("BIND_ADDR");
        env::remove_var("BIND_PORT");
        env::remove_var("PROFILESVC_LOG_REQUEST_BODIES");
        env::remove_var("PROFILESVC_REQUEST_DEADLINE_MS");
        env::remove_var("PROFILESVC_MAX_BODY_BYTES");

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert!(!config.log_request_bodies);
        assert_eq!(config.request_deadline, None);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!config.transport_options().log_request_bodies);
    }

    #[test]
    fn flag_values_parse() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn bind_socket_rejects_bad_address() {
        let config = Config {
            bind_addr: "not an address".to_string(),
            bind_port: 8080,
            log_request_bodies: false,
            request_deadline: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        };

        let err = config.bind_socket().expect_err("expected invalid socket");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }

    #[test]
    fn bind_socket_joins_addr_and_port() {
        let config = Config {
            bind_addr: "0.0.0.0".to_string(),
            bind_port: 9000,
            log_request_bodies: true,
            request_deadline: Some(Duration::from_millis(250)),
            max_body_bytes: 1024,
        };

        assert_eq!(
            config.bind_socket().expect("valid socket"),
            SocketAddr::from(([0, 0, 0, 0], 9000))
        );
        assert!(config.transport_options().log_request_bodies);
        assert_eq!(config.transport_options().max_body_bytes, 1024);
    }
}
