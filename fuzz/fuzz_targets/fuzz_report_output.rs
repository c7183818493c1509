#![no_main]

//! Fuzz target for ranking and report rendering.
//!
//! Repository names and logins come straight from the API and can hold any
//! Unicode, and waits can be negative or huge. Ranking and rendering must
//! never panic, and the median must stay within the ranked range.

use arbitrary::Arbitrary;
use chrono::Duration;
use libfuzzer_sys::fuzz_target;

use prwait::models::WaitResult;
use prwait::report::{median, render, Ranking};

#[derive(Arbitrary, Debug)]
struct Row {
    repo: String,
    author: String,
    number: u64,
    /// Wait in seconds; kept well inside chrono's range.
    wait_secs: i32,
}

fuzz_target!(|rows: Vec<Row>| {
    let mut ranking = Ranking::new();
    for row in rows.into_iter().take(200) {
        ranking.push(WaitResult {
            repo: row.repo,
            number: row.number,
            author: row.author,
            engaged_at: None,
            wait: Duration::seconds(row.wait_secs as i64),
        });
    }

    let ranked = ranking.into_ranked();
    if let (Some(first), Some(last)) = (ranked.first(), ranked.last()) {
        let m = median(&ranked);
        assert!(m >= first.wait && m <= last.wait);
    }

    let mut out = Vec::new();
    render(&mut out, &ranked).expect("writing to a Vec cannot fail");
    assert!(String::from_utf8(out).is_ok());
});
