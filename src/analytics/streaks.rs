use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::record::CanonicalRecord;

/// Run of consecutive rating days. `start`/`end` are `None` only when
/// there were no rating days at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Streak {
    pub days: usize,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Longest stretch without ratings between two rating days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gap {
    pub days: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Distinct rating days, ascending.
pub fn unique_days(records: &[CanonicalRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .filter_map(|r| r.date_rated)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Expects `days` sorted and deduplicated. Ties keep the earliest run.
pub fn longest_streak(days: &[NaiveDate]) -> Streak {
    let Some(&first) = days.first() else {
        return Streak {
            days: 0,
            start: None,
            end: None,
        };
    };

    let mut best = (1, first, first);
    let mut current_len = 1;
    let mut current_start = first;

    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            current_len += 1;
        } else {
            current_len = 1;
            current_start = pair[1];
        }

        if current_len > best.0 {
            best = (current_len, current_start, pair[1]);
        }
    }

    Streak {
        days: best.0,
        start: Some(best.1),
        end: Some(best.2),
    }
}

/// Expects `days` sorted and deduplicated. Ties keep the earliest gap.
pub fn longest_gap(days: &[NaiveDate]) -> Gap {
    let mut gap = Gap {
        days: 0,
        start: None,
        end: None,
    };

    for pair in days.windows(2) {
        let diff = (pair[1] - pair[0]).num_days();
        if diff > gap.days {
            gap = Gap {
                days: diff,
                start: Some(pair[0]),
                end: Some(pair[1]),
            };
        }
    }

    gap
}
