use std::collections::HashMap;

use serde::Serialize;

use crate::model::record::CanonicalRecord;

/// A director needs at least this many rated titles to be ranked.
pub const MIN_TITLES_PER_DIRECTOR: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disagreement {
    pub title: String,
    pub external_id: String,
    pub your_rating: f64,
    pub imdb_rating: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDirector {
    pub name: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug)]
struct DirectorTally {
    name: String,
    sum: f64,
    count: usize,
}

/// Largest |your - IMDb| gap; on ties the earlier record stays.
pub fn biggest_disagreement(records: &[CanonicalRecord]) -> Option<Disagreement> {
    let mut best: Option<Disagreement> = None;

    for record in records {
        let (Some(your_rating), Some(imdb_rating)) = (record.your_rating, record.imdb_rating)
        else {
            continue;
        };
        let delta = (your_rating - imdb_rating).abs();

        if best.as_ref().map_or(true, |b| delta > b.delta) {
            best = Some(Disagreement {
                title: record.title.clone(),
                external_id: record.external_id.clone(),
                your_rating,
                imdb_rating,
                delta,
            });
        }
    }

    best
}

/// Highest average personal rating among directors with enough rated titles.
/// Directors are visited in order of first appearance and only a strictly
/// better average replaces the current pick.
pub fn top_director(records: &[CanonicalRecord]) -> Option<TopDirector> {
    let mut tallies: Vec<DirectorTally> = vec![];
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(rating) = record.your_rating else {
            continue;
        };

        for name in record.director_names() {
            let position = *positions.entry(name.to_string()).or_insert_with(|| {
                tallies.push(DirectorTally {
                    name: name.to_string(),
                    sum: 0.0,
                    count: 0,
                });
                tallies.len() - 1
            });
            tallies[position].sum += rating;
            tallies[position].count += 1;
        }
    }

    let mut best: Option<TopDirector> = None;
    for tally in tallies
        .into_iter()
        .filter(|t| t.count >= MIN_TITLES_PER_DIRECTOR)
    {
        let average = tally.sum / tally.count as f64;
        if best.as_ref().map_or(true, |b| average > b.average) {
            best = Some(TopDirector {
                name: tally.name,
                average,
                count: tally.count,
            });
        }
    }

    best
}
