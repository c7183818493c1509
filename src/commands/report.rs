use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{info, warn};

use crate::config::{Config, Window};
use crate::engagement;
use crate::github::GitHubApi;
use crate::report::{self, Ranking};
use crate::selection::select_repos;
use crate::window::within_window;

/// Walk every selected repository and measure each in-window pull request.
///
/// Progress for each repository is written to `out` as it is processed. The
/// first API error aborts the walk and the partial ranking is dropped.
pub fn collect<W: Write>(api: &dyn GitHubApi, config: &Config, window: Window, out: &mut W) -> Result<Ranking> {
    let repos = api
        .list_org_repos(&config.org)
        .with_context(|| format!("Failed to list repositories of {}", config.org))?;
    let selected = select_repos(&repos, &config.topic, &config.excluded);
    info!(org = %config.org, topic = %config.topic, total = repos.len(), selected = selected.len(), "selected repositories");

    if window.begin > window.end {
        warn!(begin = %window.begin, end = %window.end, "window begins after it ends; nothing will match");
    }

    let mut ranking = Ranking::new();
    for repo in selected {
        let prs = api
            .list_pull_requests(&config.org, &repo.name)
            .with_context(|| format!("Failed to list pull requests of {}", repo.name))?;

        writeln!(out, "========== {} ==========", repo.name)?;
        writeln!(out, "Total PRs: {}", prs.len())?;

        let in_window = within_window(&prs, window.begin, window.end);
        writeln!(out, "Filtered PRs: {}", in_window.len())?;

        for pr in in_window {
            let result = engagement::measure(api, &config.org, &repo.name, pr, &config.bots)
                .with_context(|| format!("Failed to read activity of {}#{}", repo.name, pr.number))?;
            ranking.push(result);
        }
    }

    Ok(ranking)
}

pub fn run(api: &dyn GitHubApi, config: &Config, window: Window) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let ranking = collect(api, config, window, &mut stdout)?;
    let ranked = ranking.into_ranked();
    report::render(&mut stdout, &ranked)?;
    Ok(())
}
