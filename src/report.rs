use chrono::Duration;
use std::io::{self, Write};

use crate::models::WaitResult;

/// Per-pull-request results collected over a whole run.
#[derive(Debug, Default)]
pub struct Ranking {
    results: Vec<WaitResult>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: WaitResult) {
        self.results.push(result);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Sort by wait, shortest first. Equal waits keep their insertion order.
    pub fn into_ranked(mut self) -> Vec<WaitResult> {
        self.results.sort_by_key(|r| r.wait);
        self.results
    }
}

/// Median wait of `ranked`, which must be sorted ascending. Zero when empty.
pub fn median(ranked: &[WaitResult]) -> Duration {
    let count = ranked.len();
    if count == 0 {
        return Duration::zero();
    }

    let mid = count / 2;
    if count % 2 == 0 {
        (ranked[mid - 1].wait + ranked[mid].wait) / 2
    } else {
        ranked[mid].wait
    }
}

/// Render a duration as `{h}h {m}m {s}s`, keeping any sub-second fraction.
pub fn format_wait(wait: Duration) -> String {
    let negative = wait < Duration::zero();
    let abs = if negative { -wait } else { wait };
    let whole = abs.num_seconds();
    let nanos = (abs - Duration::seconds(whole)).num_nanoseconds().unwrap_or(0);
    let secs = whole.unsigned_abs();

    let fraction = if nanos == 0 {
        String::new()
    } else {
        format!(".{:09}", nanos).trim_end_matches('0').to_string()
    };

    format!(
        "{}{}h {}m {}{}s",
        if negative { "-" } else { "" },
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        fraction
    )
}

/// Write the ranked list followed by the count and the median.
pub fn render<W: Write>(out: &mut W, ranked: &[WaitResult]) -> io::Result<()> {
    for (i, r) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{}. {} #{}: {} by {}",
            i + 1,
            r.repo,
            r.number,
            format_wait(r.wait),
            r.author
        )?;
    }

    writeln!(out, "# of PRs: {}", ranked.len())?;
    writeln!(out, "Median: {}", format_wait(median(ranked)))?;
    Ok(())
}
