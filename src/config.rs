// Startup configuration — read once from the environment, then passed around.

use std::net::SocketAddr;

pub const DEFAULT_WEBUI_PORT: u16 = 5000;
pub const DEFAULT_RDP_PORT: u16 = 3389;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a port number (0-65535), got {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the HTTP server binds to on all interfaces.
    pub webui_port: u16,
    /// Remote desktop port. Shown on the status page, never bound.
    pub rdp_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webui_port: DEFAULT_WEBUI_PORT,
            rdp_port: DEFAULT_RDP_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset variables take their default;
    /// set-but-unparseable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            webui_port: port_var(&lookup, "WEBUI_PORT", DEFAULT_WEBUI_PORT)?,
            rdp_port: port_var(&lookup, "RDP_PORT", DEFAULT_RDP_PORT)?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.webui_port))
    }
}

fn port_var<F>(lookup: &F, var: &'static str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { var, value: raw }),
    }
}
