use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "quizlogs.db";
pub const DEFAULT_CANVAS_BASE_URL: &str = "https://psu.instructure.com";

/// Service configuration.
///
/// The service has no environment or CLI surface; `Config::default()` is what
/// `main` runs with, and tests build literals pointing at a temp database.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub canvas_base_url: String,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            canvas_base_url: DEFAULT_CANVAS_BASE_URL.to_string(),
        }
    }
}
