use std::env;

/// Runtime configuration, read once at startup.
///
/// `DATABASE_URL` is mandatory; the bind address falls back to the local
/// development defaults. The JWT signing secret is intentionally not held
/// here: the token module reads `JWT_SECRET` itself at mint/verify time.
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .map(|port| port.parse().expect("SERVER_PORT must be a number"))
                .unwrap_or(DEFAULT_PORT),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        }
    }

    /// The `(host, port)` pair handed to `HttpServer::bind`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.server_host.as_str(), self.server_port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        env::set_var("DATABASE_URL", "postgres://taskboard-test");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");

        let config = Config::from_env();
        assert_eq!(config.database_url, "postgres://taskboard-test");
        assert_eq!(config.bind_addr(), (DEFAULT_HOST, DEFAULT_PORT));
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        env::set_var("SERVER_PORT", "9090");
        env::set_var("SERVER_HOST", "0.0.0.0");

        let config = Config::from_env();
        assert_eq!(config.bind_addr(), ("0.0.0.0", 9090));
        assert_eq!(config.server_url(), "http://0.0.0.0:9090");
    }
}
