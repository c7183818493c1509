use chrono::{DateTime, Utc};

use crate::models::PullRequest;

/// Return the pull requests created within `[begin, end]`.
///
/// `prs` must already be sorted ascending by `created_at` (the order the
/// GitHub listing returns with `sort=created&direction=asc`). The scan skips
/// everything before `begin` and stops at the first pull request created
/// after `end`, so unsorted input gives a wrong answer rather than an error.
/// Both bounds are inclusive.
pub fn within_window(prs: &[PullRequest], begin: DateTime<Utc>, end: DateTime<Utc>) -> &[PullRequest] {
    let start = prs
        .iter()
        .position(|pr| pr.created_at >= begin)
        .unwrap_or(prs.len());

    let len = prs[start..]
        .iter()
        .take_while(|pr| pr.created_at <= end)
        .count();

    &prs[start..start + len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrState, User};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()
    }

    fn pr(number: u64, created_at: DateTime<Utc>) -> PullRequest {
        PullRequest {
            number,
            user: User {
                login: "author".to_string(),
            },
            state: PrState::Open,
            created_at,
            closed_at: None,
            merged_at: None,
        }
    }

    fn numbers(prs: &[PullRequest]) -> Vec<u64> {
        prs.iter().map(|p| p.number).collect()
    }

    #[test]
    fn test_empty_input() {
        let prs: Vec<PullRequest> = Vec::new();
        assert!(within_window(&prs, base(), base() + Duration::days(1)).is_empty());
    }

    #[test]
    fn test_selects_middle_run() {
        let prs: Vec<_> = (0..6)
            .map(|i| pr(i, base() + Duration::days(i as i64)))
            .collect();
        let got = within_window(&prs, base() + Duration::hours(12), base() + Duration::days(3) + Duration::hours(1));
        assert_eq!(numbers(got), vec![1, 2, 3]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let prs = vec![
            pr(1, base()),
            pr(2, base() + Duration::hours(1)),
            pr(3, base() + Duration::hours(2)),
        ];
        let got = within_window(&prs, base(), base() + Duration::hours(2));
        assert_eq!(numbers(got), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_before_window() {
        let prs = vec![pr(1, base()), pr(2, base() + Duration::hours(1))];
        let got = within_window(&prs, base() + Duration::days(1), base() + Duration::days(2));
        assert!(got.is_empty());
    }

    #[test]
    fn test_all_after_window() {
        let prs = vec![pr(1, base() + Duration::days(5))];
        let got = within_window(&prs, base(), base() + Duration::days(1));
        assert!(got.is_empty());
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let prs: Vec<_> = (0..3).map(|i| pr(i, base() + Duration::hours(i as i64))).collect();
        let got = within_window(&prs, base() + Duration::hours(2), base());
        assert!(got.is_empty());
    }

    #[test]
    fn test_stops_at_first_pr_after_end() {
        // Out-of-order input: the scan must not look past the first late PR.
        let prs = vec![
            pr(1, base()),
            pr(2, base() + Duration::days(10)),
            pr(3, base() + Duration::hours(1)),
        ];
        let got = within_window(&prs, base(), base() + Duration::days(1));
        assert_eq!(numbers(got), vec![1]);
    }

    proptest! {
        #[test]
        fn prop_matches_inclusive_filter(
            mut offsets in proptest::collection::vec(0i64..1000, 0..60),
            a in 0i64..1000,
            b in 0i64..1000,
        ) {
            offsets.sort_unstable();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let prs: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| pr(i as u64, base() + Duration::minutes(*off)))
                .collect();
            let begin = base() + Duration::minutes(lo);
            let end = base() + Duration::minutes(hi);

            let got = numbers(within_window(&prs, begin, end));
            let expected: Vec<u64> = prs
                .iter()
                .filter(|p| p.created_at >= begin && p.created_at <= end)
                .map(|p| p.number)
                .collect();
            prop_assert_eq!(&got, &expected);

            // Contiguous: numbers are consecutive indices into the input.
            for pair in got.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
        }
    }
}
