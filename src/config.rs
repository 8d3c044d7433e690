use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port the networking plugin's `restconf_uri` points at for this stub.
pub const DEFAULT_PORT: u16 = 8125;
/// Idle time allowed before the next request head on a persistent connection.
pub const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(5);
/// Time allowed for a request head to arrive once its first byte has.
pub const HEADER_TIMEOUT: Duration = Duration::from_secs(60);
pub const MAX_LINE_LENGTH: usize = 8 * 1024;
pub const MAX_HEADERS: usize = 100;

/// Framing limits applied while reading a request head or chunk sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_line_length: usize,
    pub max_headers: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_line_length: MAX_LINE_LENGTH,
            max_headers: MAX_HEADERS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub keep_alive_timeout: Duration,
    pub header_timeout: Duration,
    pub limits: RequestLimits,
}

impl ServerConfig {
    /// Listen on every interface at `port`.
    pub fn new(port: u16) -> Self {
        Self::with_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            addr,
            keep_alive_timeout: KEEP_ALIVE_TIMEOUT,
            header_timeout: HEADER_TIMEOUT,
            limits: RequestLimits::default(),
        }
    }

    pub fn keep_alive_timeout(mut self, timeout: Duration) -> Self {
        self.keep_alive_timeout = timeout;
        self
    }

    pub fn header_timeout(mut self, timeout: Duration) -> Self {
        self.header_timeout = timeout;
        self
    }

    pub fn limits(mut self, limits: RequestLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}
