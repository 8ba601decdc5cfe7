//! Itinerary ranking for search results.
//!
//! All policies use a stable sort, so itineraries that tie keep the order
//! the search produced them in. Results are therefore deterministic for a
//! given catalog and query.

use crate::domain::Itinerary;

use super::query::Priority;

/// Normalized cost and time for one itinerary under the optimized policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizedScore {
    /// Cost mapped onto [0, 1] across the candidate set.
    pub norm_cost: f64,
    /// Duration mapped onto [0, 1] across the candidate set.
    pub norm_time: f64,
    /// Mean of the two normalized terms; lower is better.
    pub score: f64,
}

/// Rank itineraries by a priority policy.
///
/// - `Cost`: cheapest first.
/// - `Time`: shortest total duration first.
/// - `Optimized`: lowest [`OptimizedScore::score`] first.
///
/// Returns itineraries sorted best-first.
pub fn rank(mut itineraries: Vec<Itinerary>, priority: Priority) -> Vec<Itinerary> {
    match priority {
        Priority::Cost => itineraries.sort_by_key(|i| i.cost_cents()),
        Priority::Time => itineraries.sort_by_key(|i| i.duration_minutes()),
        Priority::Optimized => {
            let scores = optimized_scores(&itineraries);
            let mut scored: Vec<(f64, Itinerary)> = scores
                .into_iter()
                .map(|s| s.score)
                .zip(itineraries)
                .collect();
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
            itineraries = scored.into_iter().map(|(_, i)| i).collect();
        }
    }

    itineraries
}

/// Min-max normalized cost and time for each itinerary, in input order.
///
/// A range of zero (every candidate has the same cost, or the same
/// duration) is treated as one, so that term is zero for everyone rather
/// than a division by zero. Cost and time are weighted equally.
pub fn optimized_scores(itineraries: &[Itinerary]) -> Vec<OptimizedScore> {
    let costs = itineraries.iter().map(|i| i.cost_cents());
    let times = itineraries.iter().map(|i| i.duration_minutes() as u64);

    let (Some((min_cost, cost_range)), Some((min_time, time_range))) =
        (min_and_range(costs), min_and_range(times))
    else {
        return Vec::new();
    };

    itineraries
        .iter()
        .map(|i| {
            let norm_cost = (i.cost_cents() - min_cost) as f64 / cost_range as f64;
            let norm_time = (i.duration_minutes() as u64 - min_time) as f64 / time_range as f64;
            OptimizedScore {
                norm_cost,
                norm_time,
                score: (norm_cost + norm_time) / 2.0,
            }
        })
        .collect()
}

/// Minimum and spread of a set of values, with a zero spread reported as one.
fn min_and_range(values: impl Iterator<Item = u64>) -> Option<(u64, u64)> {
    let (min, max) = values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;

    let range = max - min;
    Some((min, if range == 0 { 1 } else { range }))
}
