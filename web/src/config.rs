use std::net::SocketAddr;

use clap::Parser;
use todo_core::client::DEFAULT_BASE_URL;

/// Demo pages for the dummyjson todo and comment API.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-web", version, long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "TODO_WEB_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Base URL of the remote todo API
    #[arg(long, env = "TODO_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Ask the remote API to delay every read by this many milliseconds
    #[arg(long, env = "TODO_API_DELAY_MS")]
    pub api_delay_ms: Option<u64>,

    /// Show developer diagnostics on error pages (never enable in production)
    #[arg(long, env = "TODO_WEB_DEV", default_value_t = false)]
    pub dev: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_delay_ms: None,
            dev: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parser_defaults() {
        let parsed = Config::try_parse_from(["todo-web"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.bind, default.bind);
        assert_eq!(parsed.api_base_url, default.api_base_url);
        assert_eq!(parsed.api_delay_ms, None);
        assert!(!parsed.dev);
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = Config::try_parse_from([
            "todo-web",
            "--bind",
            "0.0.0.0:8080",
            "--api-base-url",
            "http://localhost:4000",
            "--api-delay-ms",
            "3000",
            "--dev",
        ])
        .unwrap();
        assert_eq!(parsed.bind.port(), 8080);
        assert_eq!(parsed.api_base_url, "http://localhost:4000");
        assert_eq!(parsed.api_delay_ms, Some(3000));
        assert!(parsed.dev);
    }
}
