use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Which Google Trends endpoint the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The public Google Trends service.
    #[default]
    Production,
    /// Any other base URL, e.g. a local recording proxy.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the provider base URL associated with the environment.
    pub fn trends_url(&self) -> String {
        match self {
            Environment::Production => "https://trends.google.com/trends".to_string(),
            Environment::Custom { base_url } => base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("production") {
            return Ok(Environment::Production);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                base_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "invalid API URL '{}': expected 'production' or an http(s) URL",
            trimmed
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.trends_url())
    }
}
