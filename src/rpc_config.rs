//! Greeter configuration shared by the client and server binaries.
//!
//! Defaults reproduce the fixed deployment: the server listens on
//! `127.0.0.1:50051` and the client dials `localhost:50051` with a one second
//! budget shared by both calls.

use std::net::SocketAddr;
use std::time::Duration;

use crate::{Result, RpcError};

/// Address the client dials unless overridden.
pub const DEFAULT_SERVER_ADDR: &str = "localhost:50051";

/// Address the server binds unless overridden.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";

/// Environment variable overriding [`RpcConfig::server_addr`].
pub const SERVER_ADDR_ENV: &str = "GREETER_ADDR";

/// Environment variable overriding [`RpcConfig::listen_addr`].
pub const LISTEN_ADDR_ENV: &str = "GREETER_LISTEN_ADDR";

/// Connection and call parameters.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    // ---
    /// Server address as dialled by the client, `host:port` or a full
    /// `http://` URI.
    pub server_addr: String,

    /// Socket address the server binds. Port `0` picks an ephemeral port.
    pub listen_addr: String,

    /// Budget of the single deadline shared by every call of a client run.
    ///
    /// Default: 1 second
    pub request_timeout: Duration,

    /// Upper bound on establishing the client connection.
    ///
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Whether the server registers the gRPC reflection service.
    pub reflection: bool,
}

impl Default for RpcConfig {
    fn default() -> Self {
        // ---
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            request_timeout: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(5),
            reflection: true,
        }
    }
}

impl RpcConfig {
    // ---
    /// Defaults with `GREETER_ADDR` / `GREETER_LISTEN_ADDR` applied on top.
    pub fn from_env() -> Self {
        // ---
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // ---
        let mut config = Self::default();
        if let Some(addr) = lookup(SERVER_ADDR_ENV) {
            config.server_addr = addr;
        }
        if let Some(addr) = lookup(LISTEN_ADDR_ENV) {
            config.listen_addr = addr;
        }
        config
    }

    /// Set the address the client dials.
    pub fn with_server_addr(mut self, addr: impl Into<String>) -> Self {
        self.server_addr = addr.into();
        self
    }

    /// Set the address the server binds.
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the shared deadline budget.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connection establishment bound.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable or disable the reflection service.
    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.reflection = enabled;
        self
    }

    /// Endpoint URI for the client; `http://` is assumed when no scheme is given.
    pub fn server_uri(&self) -> String {
        // ---
        if self.server_addr.contains("://") {
            self.server_addr.clone()
        } else {
            format!("http://{}", self.server_addr)
        }
    }

    /// Parse [`listen_addr`](Self::listen_addr) into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::InvalidAddress` if it is not `ip:port`.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        // ---
        self.listen_addr
            .parse()
            .map_err(|_| RpcError::InvalidAddress(self.listen_addr.clone()))
    }
}
