use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::config::Config;
use crate::github::GitHubApi;
use crate::selection::select_repos;

/// Print the repositories a report would cover.
pub fn list<W: Write>(api: &dyn GitHubApi, config: &Config, out: &mut W) -> Result<()> {
    let repos = api
        .list_org_repos(&config.org)
        .with_context(|| format!("Failed to list repositories of {}", config.org))?;
    let selected = select_repos(&repos, &config.topic, &config.excluded);

    for repo in &selected {
        writeln!(out, "{}", repo.name)?;
    }
    writeln!(out, "# of repos: {}", selected.len())?;
    Ok(())
}

pub fn run(api: &dyn GitHubApi, config: &Config) -> Result<()> {
    let mut stdout = io::stdout().lock();
    list(api, config, &mut stdout)
}
