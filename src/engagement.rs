//! First-engagement detection for a single pull request.
//!
//! Engagement is the earliest of: the first comment by someone other than the
//! author or an automation account, the first submitted review, the close
//! time of a closed pull request, and the merge time of a merged one.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::error::GithubError;
use crate::github::GitHubApi;
use crate::models::{Comment, PrState, PullRequest, Review, WaitResult};

/// Hours assigned to pull requests nobody has engaged with yet, so they rank last.
pub const UNENGAGED_HOURS: i64 = 10_000;

/// Automation accounts whose comments never count as engagement.
pub const DEFAULT_BOTS: &[&str] = &["pivotal-issuemaster", "vmwclabot"];

/// Time of the first comment not written by `author` or one of `bots`.
///
/// Comments are scanned in the order given, which is the API's chronological order.
pub fn first_outside_comment(comments: &[Comment], author: &str, bots: &[String]) -> Option<DateTime<Utc>> {
    comments
        .iter()
        .find(|c| {
            let login = c.author();
            login != author && !bots.iter().any(|b| b == login)
        })
        .map(|c| c.created_at)
}

/// Submission time of the first submitted review, in API order.
pub fn first_review(reviews: &[Review]) -> Option<DateTime<Utc>> {
    reviews.iter().find_map(|r| r.submitted_at)
}

/// Smallest present timestamp, ignoring absent ones.
pub fn earliest<I>(times: I) -> Option<DateTime<Utc>>
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    times.into_iter().flatten().min()
}

/// The placeholder wait for never-engaged pull requests.
pub fn unengaged_wait() -> Duration {
    Duration::hours(UNENGAGED_HOURS)
}

/// Everything known about a pull request's activity.
#[derive(Debug, Clone, Copy)]
pub struct Activity {
    pub first_comment: Option<DateTime<Utc>>,
    pub first_review: Option<DateTime<Utc>>,
    pub merged: bool,
}

/// Compute when `pr` was first engaged with and how long that took.
///
/// Returns the engagement instant (if any) and the wait. A missing engagement
/// yields [`unengaged_wait`]. Negative waits are returned as measured.
pub fn resolve(pr: &PullRequest, activity: Activity) -> (Option<DateTime<Utc>>, Duration) {
    let closed_at = match pr.state {
        PrState::Closed => pr.closed_at,
        PrState::Open => None,
    };
    let merged_at = if activity.merged { pr.merged_at } else { None };

    let engaged_at = earliest([activity.first_comment, activity.first_review, closed_at, merged_at]);

    match engaged_at {
        Some(at) => (Some(at), at.signed_duration_since(pr.created_at)),
        None => (None, unengaged_wait()),
    }
}

/// Fetch comments, reviews and merge status for `pr` and measure its wait.
pub fn measure(
    api: &dyn GitHubApi,
    org: &str,
    repo: &str,
    pr: &PullRequest,
    bots: &[String],
) -> Result<WaitResult, GithubError> {
    let comments = api.list_issue_comments(org, repo, pr.number)?;
    let reviews = api.list_reviews(org, repo, pr.number)?;
    let merged = api.is_merged(org, repo, pr.number)?;

    let activity = Activity {
        first_comment: first_outside_comment(&comments, pr.author(), bots),
        first_review: first_review(&reviews),
        merged,
    };
    let (engaged_at, wait) = resolve(pr, activity);

    if wait < Duration::zero() {
        warn!(repo, number = pr.number, ?wait, "engagement recorded before creation");
    }
    debug!(
        repo,
        number = pr.number,
        comments = comments.len(),
        reviews = reviews.len(),
        merged,
        ?engaged_at,
        "resolved engagement"
    );

    Ok(WaitResult {
        repo: repo.to_string(),
        number: pr.number,
        author: pr.author().to_string(),
        engaged_at,
        wait,
    })
}
