//! GitHub REST API access.
//!
//! [`GitHubApi`] is the seam between the report pipeline and the network;
//! [`GitHubClient`] implements it with a blocking `reqwest` client. Every
//! call is sequential and any failure is returned to the caller unchanged.

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::GithubError;
use crate::models::{Comment, PullRequest, Repository, Review};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for every paginated listing.
pub const PAGE_SIZE: usize = 100;

/// Page size requested for reviews. Only the first review matters, so a single page is read.
pub const REVIEWS_PAGE_SIZE: usize = 1000;

const API_VERSION: &str = "2022-11-28";

/// Read-only GitHub operations the report needs.
pub trait GitHubApi {
    /// Public repositories of `org`, all pages.
    fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>, GithubError>;

    /// Pull requests in every state, oldest first, all pages.
    fn list_pull_requests(&self, org: &str, repo: &str) -> Result<Vec<PullRequest>, GithubError>;

    /// Conversation comments on a pull request, oldest first, all pages.
    fn list_issue_comments(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Comment>, GithubError>;

    /// Reviews on a pull request, in API order.
    fn list_reviews(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Review>, GithubError>;

    /// Whether the pull request has been merged.
    fn is_merged(&self, org: &str, repo: &str, number: u64) -> Result<bool, GithubError>;
}

/// Request pages `1, 2, ...` until one comes back shorter than `per_page`.
pub fn collect_pages<T, E, F>(per_page: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Result<Vec<T>, E>,
{
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let items = fetch(page)?;
        let done = items.len() < per_page;
        all.extend(items);
        if done {
            return Ok(all);
        }
        page += 1;
    }
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GithubError::Client)?;
        Ok(GitHubClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response, GithubError> {
        trace!(url, ?query, "GET");
        self.http
            .get(url)
            .query(query)
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .map_err(|source| GithubError::Request {
                url: url.to_string(),
                source,
            })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, GithubError> {
        let url = self.url(path);
        let response = self.send(&url, query)?;
        let status = response.status();
        let body = response.text().map_err(|source| GithubError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(status_error(&url, status, &body));
        }

        serde_json::from_str(&body).map_err(|source| GithubError::Decode { url, source })
    }

    fn get_all<T: DeserializeOwned>(&self, path: &str, extra: &[(&str, &str)]) -> Result<Vec<T>, GithubError> {
        let items = collect_pages(PAGE_SIZE, |page| {
            let mut query: Vec<(&str, String)> = extra.iter().map(|(k, v)| (*k, v.to_string())).collect();
            query.push(("per_page", PAGE_SIZE.to_string()));
            query.push(("page", page.to_string()));
            self.get_json::<Vec<T>>(path, &query)
        })?;
        debug!(path, count = items.len(), "fetched listing");
        Ok(items)
    }
}

fn status_error(url: &str, status: StatusCode, body: &str) -> GithubError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect());
    GithubError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body: message,
    }
}

impl GitHubApi for GitHubClient {
    fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>, GithubError> {
        self.get_all(&format!("/orgs/{}/repos", org), &[("type", "public")])
    }

    fn list_pull_requests(&self, org: &str, repo: &str) -> Result<Vec<PullRequest>, GithubError> {
        self.get_all(
            &format!("/repos/{}/{}/pulls", org, repo),
            &[("state", "all"), ("sort", "created"), ("direction", "asc")],
        )
    }

    fn list_issue_comments(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Comment>, GithubError> {
        self.get_all(&format!("/repos/{}/{}/issues/{}/comments", org, repo, number), &[])
    }

    fn list_reviews(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Review>, GithubError> {
        self.get_json(
            &format!("/repos/{}/{}/pulls/{}/reviews", org, repo, number),
            &[("per_page", REVIEWS_PAGE_SIZE.to_string())],
        )
    }

    fn is_merged(&self, org: &str, repo: &str, number: u64) -> Result<bool, GithubError> {
        let url = self.url(&format!("/repos/{}/{}/pulls/{}/merge", org, repo, number));
        let response = self.send(&url, &[])?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().unwrap_or_default();
                Err(status_error(&url, status, &body))
            }
        }
    }
}
