use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Fixed port of the text message endpoint.
pub const MESSAGE_PORT: u16 = 8080;

/// Fixed port of the file endpoint.
pub const FILE_PORT: u16 = 8081;

/// An address/port pair a listener binds or a client connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    addr: SocketAddr,
}

impl Endpoint {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::new(ip, port),
        }
    }

    pub fn loopback(port: u16) -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
    }

    /// `127.0.0.1:8080`
    pub fn message() -> Self {
        Self::loopback(MESSAGE_PORT)
    }

    /// `127.0.0.1:8081`
    pub fn file() -> Self {
        Self::loopback(FILE_PORT)
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
