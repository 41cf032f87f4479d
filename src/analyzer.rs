//! Pure analysis over an already-fetched [`Feed`].
//!
//! Everything here is stateless and takes the feed by shared reference, so
//! multiple callers can analyze the same feed concurrently. The feed is
//! never mutated.

use serde::Serialize;

use crate::model::Feed;

/// Number of objects recorded for one feed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
}

/// The object with the highest first-approach velocity in a feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastestAsteroid {
    pub name: String,
    pub km_per_hour: f64,
}

/// The object with the smallest first-approach miss distance in a feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestAsteroid {
    pub name: String,
    pub km: f64,
}

/// Everything the presentation layer renders for one fetched feed.
#[derive(Debug, Serialize)]
pub struct FeedSummary {
    pub element_count: u64,
    pub daily_counts: Vec<DailyCount>,
    pub fastest: Option<FastestAsteroid>,
    pub nearest: Option<NearestAsteroid>,
}

/// One count per date key, in the feed's own key order.
///
/// The keys are deliberately not re-sorted: the chart renders dates exactly
/// as the upstream payload delivered them.
pub fn daily_counts(feed: &Feed) -> Vec<DailyCount> {
    feed.objects_by_date
        .iter()
        .map(|(date, objects)| DailyCount {
            date: date.clone(),
            count: objects.len(),
        })
        .collect()
}

/// Maximum first-approach velocity across the feed, km/h.
///
/// Only each object's first close-approach entry is consulted; objects
/// whose first entry has no parseable velocity are skipped entirely, even
/// when a later entry carries one. Comparison is strict, so ties keep the
/// object encountered first.
pub fn fastest(feed: &Feed) -> Option<FastestAsteroid> {
    let mut best: Option<FastestAsteroid> = None;

    for (_, objects) in &feed.objects_by_date {
        for object in objects {
            let Some(km_per_hour) = object.first_approach_velocity_kmh() else {
                continue;
            };
            if best.as_ref().is_none_or(|b| km_per_hour > b.km_per_hour) {
                best = Some(FastestAsteroid {
                    name: object.name.clone(),
                    km_per_hour,
                });
            }
        }
    }

    best
}

/// Minimum first-approach miss distance across the feed, km.
///
/// Same first-entry-only and skip-unparseable rules as [`fastest`]. The
/// running minimum starts empty rather than seeded at zero, so a genuine
/// 0 km distance is reported instead of being mistaken for "nothing found
/// yet".
pub fn nearest(feed: &Feed) -> Option<NearestAsteroid> {
    let mut best: Option<NearestAsteroid> = None;

    for (_, objects) in &feed.objects_by_date {
        for object in objects {
            let Some(km) = object.first_approach_distance_km() else {
                continue;
            };
            if best.as_ref().is_none_or(|b| km < b.km) {
                best = Some(NearestAsteroid {
                    name: object.name.clone(),
                    km,
                });
            }
        }
    }

    best
}

/// Bundles all three analyses into the single value handed to a renderer.
pub fn summarize(feed: &Feed) -> FeedSummary {
    FeedSummary {
        element_count: feed.element_count,
        daily_counts: daily_counts(feed),
        fastest: fastest(feed),
        nearest: nearest(feed),
    }
}
