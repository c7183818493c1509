//! Runtime configuration.
//!
//! Every input can come from a flag or from the environment variable named
//! next to it. Values are validated into [`Config`] and [`Window`] before any
//! request is made.

use chrono::{DateTime, Utc};
use clap::Args;

use crate::engagement::DEFAULT_BOTS;
use crate::error::ConfigError;
use crate::github::DEFAULT_API_URL;
use crate::selection::DEFAULT_EXCLUDED;

pub const TOKEN_VAR: &str = "GITHUB_API_TOKEN";
pub const BEGIN_VAR: &str = "BEGIN_DATE";
pub const END_VAR: &str = "END_DATE";

pub const DEFAULT_ORG: &str = "vmware-tanzu";
pub const DEFAULT_TOPIC: &str = "carvel";

#[derive(Args, Debug, Clone)]
pub struct GithubArgs {
    /// GitHub API token
    #[arg(long, env = TOKEN_VAR, hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Organization whose repositories are scanned
    #[arg(long, env = "PRWAIT_ORG", default_value = DEFAULT_ORG, global = true)]
    pub org: String,

    /// Repository topic that marks a tracked project
    #[arg(long, env = "PRWAIT_TOPIC", default_value = DEFAULT_TOPIC, global = true)]
    pub topic: String,

    /// Additional repository name to skip (repeatable)
    #[arg(long = "exclude", value_name = "REPO", global = true)]
    pub exclude: Vec<String>,

    /// Additional automation account whose comments are ignored (repeatable)
    #[arg(long = "bot", value_name = "LOGIN", global = true)]
    pub bots: Vec<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,
}

impl Default for GithubArgs {
    fn default() -> Self {
        GithubArgs {
            token: None,
            org: DEFAULT_ORG.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            exclude: Vec::new(),
            bots: Vec::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Start of the creation window (RFC 3339)
    #[arg(long, env = BEGIN_VAR, global = true)]
    pub begin: Option<String>,

    /// End of the creation window, inclusive (RFC 3339)
    #[arg(long, env = END_VAR, global = true)]
    pub end: Option<String>,
}

/// Validated settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub org: String,
    pub topic: String,
    pub excluded: Vec<String>,
    pub bots: Vec<String>,
    pub api_url: String,
}

impl Config {
    pub fn from_args(args: GithubArgs) -> Result<Self, ConfigError> {
        let token = require(TOKEN_VAR, args.token)?;

        let mut excluded: Vec<String> = DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect();
        excluded.extend(args.exclude);

        let mut bots: Vec<String> = DEFAULT_BOTS.iter().map(|s| s.to_string()).collect();
        bots.extend(args.bots);

        Ok(Config {
            token,
            org: args.org,
            topic: args.topic,
            excluded,
            bots,
            api_url: args.api_url,
        })
    }
}

/// Creation-time range of the pull requests to report on. Both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn from_args(args: WindowArgs) -> Result<Self, ConfigError> {
        let begin = parse_date(BEGIN_VAR, require(BEGIN_VAR, args.begin)?)?;
        let end = parse_date(END_VAR, require(END_VAR, args.end)?)?;
        Ok(Window { begin, end })
    }
}

fn require(var: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        None => Err(ConfigError::Missing { var }),
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(v) => Ok(v),
    }
}

fn parse_date(var: &'static str, value: String) -> Result<DateTime<Utc>, ConfigError> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(source) => Err(ConfigError::InvalidDate { var, value, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(begin: Option<&str>, end: Option<&str>) -> Result<Window, ConfigError> {
        Window::from_args(WindowArgs {
            begin: begin.map(str::to_string),
            end: end.map(str::to_string),
        })
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_args(GithubArgs::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "GITHUB_API_TOKEN" }));
    }

    #[test]
    fn test_blank_token() {
        let args = GithubArgs {
            token: Some("  ".to_string()),
            ..GithubArgs::default()
        };
        assert!(matches!(Config::from_args(args), Err(ConfigError::Empty { .. })));
    }

    #[test]
    fn test_defaults_and_extras() {
        let args = GithubArgs {
            token: Some("secret".to_string()),
            exclude: vec!["playground".to_string()],
            bots: vec!["dependabot[bot]".to_string()],
            ..GithubArgs::default()
        };
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.org, "vmware-tanzu");
        assert_eq!(config.topic, "carvel");
        assert!(config.excluded.iter().any(|r| r == "kubeapps"));
        assert!(config.excluded.iter().any(|r| r == "playground"));
        assert!(config.bots.iter().any(|b| b == "vmwclabot"));
        assert!(config.bots.iter().any(|b| b == "pivotal-issuemaster"));
        assert!(config.bots.iter().any(|b| b == "dependabot[bot]"));
    }

    #[test]
    fn test_window_parses_offsets_to_utc() {
        let w = window(Some("2021-01-01T00:00:00-08:00"), Some("2021-02-01T00:00:00Z")).unwrap();
        assert_eq!(w.begin, Utc.with_ymd_and_hms(2021, 1, 1, 8, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_missing_begin() {
        let err = window(None, Some("2021-02-01T00:00:00Z")).unwrap_err();
        assert_eq!(err.to_string(), "BEGIN_DATE is not set");
    }

    #[test]
    fn test_window_missing_end() {
        let err = window(Some("2021-02-01T00:00:00Z"), None).unwrap_err();
        assert_eq!(err.to_string(), "END_DATE is not set");
    }

    #[test]
    fn test_window_rejects_plain_date() {
        let err = window(Some("2021-01-01"), Some("2021-02-01T00:00:00Z")).unwrap_err();
        match err {
            ConfigError::InvalidDate { var, value, .. } => {
                assert_eq!(var, "BEGIN_DATE");
                assert_eq!(value, "2021-01-01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
