use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Login GitHub shows for comments whose author account was deleted.
pub const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Repository {
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub user: User,
    pub state: PrState,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn author(&self) -> &str {
        &self.user.login
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.user.as_ref().map_or(GHOST_LOGIN, |u| u.login.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    /// Absent while the review is still pending.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// How long one pull request waited, as produced by the engagement resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitResult {
    pub repo: String,
    pub number: u64,
    pub author: String,
    pub engaged_at: Option<DateTime<Utc>>,
    pub wait: Duration,
}
