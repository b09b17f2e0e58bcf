use serde::Serialize;

/// Where a request's host says the site is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    Development,
    Replit,
    Production,
}

impl Deployment {
    /// Classify a hostname (port, if any, is ignored)
    pub fn detect(host: &str) -> Self {
        let hostname = strip_port(host).to_ascii_lowercase();
        match hostname.as_str() {
            "localhost" | "127.0.0.1" | "0.0.0.0" | "::1" => Deployment::Development,
            h if h.ends_with(".replit.dev") || h.ends_with(".repl.co") || h.ends_with(".replit.app") => {
                Deployment::Replit
            }
            _ => Deployment::Production,
        }
    }
}

/// Resolve the API base URL clients on `host` should use.
///
/// An explicit override always wins.
pub fn api_base_url(host: &str, port: u16, override_url: Option<&str>) -> String {
    if let Some(url) = override_url {
        return url.trim_end_matches('/').to_string();
    }

    match Deployment::detect(host) {
        Deployment::Development => format!("http://localhost:{}/api", port),
        Deployment::Replit | Deployment::Production => {
            format!("https://{}/api", strip_port(host))
        }
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:5000
        return host
            .split_once(']')
            .map(|(h, _)| h.trim_start_matches('['))
            .unwrap_or(host);
    }
    match host.rsplit_once(':') {
        Some((h, port)) if !h.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Deployment::detect("localhost:5173"), Deployment::Development);
        assert_eq!(Deployment::detect("127.0.0.1"), Deployment::Development);
        assert_eq!(Deployment::detect("[::1]:5000"), Deployment::Development);
        assert_eq!(Deployment::detect("estate-demo.janedoe.replit.dev"), Deployment::Replit);
        assert_eq!(Deployment::detect("estate.repl.co"), Deployment::Replit);
        assert_eq!(Deployment::detect("www.estate.example.com"), Deployment::Production);
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(api_base_url("localhost:5173", 5000, None), "http://localhost:5000/api");
        assert_eq!(
            api_base_url("estate.replit.app", 5000, None),
            "https://estate.replit.app/api"
        );
        assert_eq!(
            api_base_url("estate.example.com:443", 5000, None),
            "https://estate.example.com/api"
        );
        assert_eq!(
            api_base_url("localhost", 5000, Some("https://api.estate.example.com/api/")),
            "https://api.estate.example.com/api"
        );
    }
}
