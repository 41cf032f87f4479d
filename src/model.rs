//! Data model for the NeoWs feed endpoint.
//!
//! The upstream payload encodes most numeric fields as JSON strings, and
//! individual records are frequently missing one sub-object or another.
//! Decoding is deliberately lenient: an absent or non-numeric value becomes
//! `None` rather than failing the whole feed, and the extrema scans in
//! [`crate::analyzer`] skip those objects.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::FetchError;

/// The date format the feed endpoint understands.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A start/end date pair, both `YYYY-MM-DD`.
///
/// Held as raw strings so that user input flows through unchanged;
/// [`DateRange::validate`] enforces the invariants before any request is
/// issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Checks the range is complete and well-formed: both dates present,
    /// parseable as `YYYY-MM-DD`, and start not after end. Any violation is
    /// an incomplete-input condition the user has to correct, so they all
    /// map to [`FetchError::MissingDateRange`].
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(FetchError::MissingDateRange);
        }
        let start = NaiveDate::parse_from_str(self.start.trim(), DATE_FORMAT)
            .map_err(|_| FetchError::MissingDateRange)?;
        let end = NaiveDate::parse_from_str(self.end.trim(), DATE_FORMAT)
            .map_err(|_| FetchError::MissingDateRange)?;
        if start > end {
            return Err(FetchError::MissingDateRange);
        }
        Ok(())
    }
}

/// One feed response: every near-earth object for the requested range,
/// grouped by approach date.
///
/// Immutable once constructed; a new fetch builds a new `Feed` rather than
/// merging into an old one. Date keys keep the order the upstream payload
/// delivered them in, which is not necessarily sorted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub element_count: u64,

    #[serde(
        rename = "near_earth_objects",
        default,
        deserialize_with = "de_objects_by_date"
    )]
    pub objects_by_date: Vec<(String, Vec<NearEarthObject>)>,
}

impl Feed {
    /// Total objects across all dates.
    pub fn total_objects(&self) -> usize {
        self.objects_by_date.iter().map(|(_, o)| o.len()).sum()
    }
}

/// A single asteroid record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearEarthObject {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "neo_reference_id", default)]
    pub reference_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "estimated_diameter", default)]
    pub diameter: EstimatedDiameter,

    #[serde(rename = "close_approach_data", default)]
    pub approaches: Vec<CloseApproach>,
}

impl NearEarthObject {
    /// Velocity of the first reported close approach, km/h. Later approach
    /// entries for the same object are ignored; only the first is trusted.
    pub fn first_approach_velocity_kmh(&self) -> Option<f64> {
        self.approaches.first()?.relative_velocity.as_ref()?.km_per_hour
    }

    /// Miss distance of the first reported close approach, km.
    pub fn first_approach_distance_km(&self) -> Option<f64> {
        self.approaches.first()?.miss_distance.as_ref()?.km
    }
}

/// Estimated diameter bounds; the upstream nests the km figures one level
/// deeper under a unit key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiameterRange {
    #[serde(rename = "estimated_diameter_min", default)]
    pub min_km: f64,

    #[serde(rename = "estimated_diameter_max", default)]
    pub max_km: f64,
}

/// One recorded instance of an object passing near Earth.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseApproach {
    #[serde(rename = "close_approach_date_full", default)]
    pub full_date: Option<String>,

    #[serde(default, deserialize_with = "de_lenient")]
    pub relative_velocity: Option<RelativeVelocity>,

    #[serde(default, deserialize_with = "de_lenient")]
    pub miss_distance: Option<MissDistance>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelativeVelocity {
    #[serde(
        rename = "kilometers_per_second",
        default,
        deserialize_with = "de_numeric_string"
    )]
    pub km_per_second: Option<f64>,

    #[serde(
        rename = "kilometers_per_hour",
        default,
        deserialize_with = "de_numeric_string"
    )]
    pub km_per_hour: Option<f64>,

    #[serde(
        rename = "miles_per_hour",
        default,
        deserialize_with = "de_numeric_string"
    )]
    pub miles_per_hour: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissDistance {
    #[serde(rename = "kilometers", default, deserialize_with = "de_numeric_string")]
    pub km: Option<f64>,

    #[serde(rename = "miles", default, deserialize_with = "de_numeric_string")]
    pub miles: Option<f64>,
}

/// Decodes the upstream's string-encoded numbers (`"54321.87"`). Accepts a
/// bare number too; anything else, including an unparseable string, becomes
/// `None`.
fn de_numeric_string<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(de)?;
    Ok(raw.and_then(|v| match v {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }))
}

/// Decodes an optional sub-object, treating a malformed value as absent
/// instead of failing the surrounding record.
fn de_lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw: Option<serde_json::Value> = Option::deserialize(de)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserializes `near_earth_objects` into a vec of `(date, objects)` pairs,
/// visiting map entries in document order so the feed's own key order
/// survives.
fn de_objects_by_date<'de, D>(de: D) -> Result<Vec<(String, Vec<NearEarthObject>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedMap;

    impl<'de> Visitor<'de> for OrderedMap {
        type Value = Vec<(String, Vec<NearEarthObject>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of date keys to arrays of near-earth objects")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Vec<NearEarthObject>>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    de.deserialize_map(OrderedMap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed_range() {
        let range = DateRange::new("2024-01-01", "2024-01-07");
        assert!(range.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_dates() {
        assert!(matches!(
            DateRange::new("", "2024-01-07").validate(),
            Err(FetchError::MissingDateRange)
        ));
        assert!(matches!(
            DateRange::new("2024-01-01", "").validate(),
            Err(FetchError::MissingDateRange)
        ));
        assert!(matches!(
            DateRange::new("  ", "  ").validate(),
            Err(FetchError::MissingDateRange)
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_and_reversed() {
        assert!(DateRange::new("01/02/2024", "2024-01-07").validate().is_err());
        assert!(DateRange::new("2024-01-07", "2024-01-01").validate().is_err());
    }

    #[test]
    fn test_same_day_range_is_valid() {
        assert!(DateRange::new("2024-01-01", "2024-01-01").validate().is_ok());
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let json = r#"{
            "kilometers_per_second": "13.74",
            "kilometers_per_hour": "49463.66",
            "miles_per_hour": "30735.12"
        }"#;
        let v: RelativeVelocity = serde_json::from_str(json).unwrap();
        assert_eq!(v.km_per_second, Some(13.74));
        assert_eq!(v.km_per_hour, Some(49463.66));
        assert_eq!(v.miles_per_hour, Some(30735.12));
    }

    #[test]
    fn test_missing_or_garbage_numeric_becomes_none() {
        let json = r#"{ "kilometers_per_hour": "not-a-number" }"#;
        let v: RelativeVelocity = serde_json::from_str(json).unwrap();
        assert_eq!(v.km_per_second, None);
        assert_eq!(v.km_per_hour, None);
    }

    #[test]
    fn test_malformed_sub_object_becomes_none() {
        let json = r#"{ "close_approach_date_full": "2024-Jan-01 12:00",
                        "relative_velocity": "oops",
                        "miss_distance": { "kilometers": "80000" } }"#;
        let approach: CloseApproach = serde_json::from_str(json).unwrap();
        assert!(approach.relative_velocity.is_none());
        assert_eq!(approach.miss_distance.unwrap().km, Some(80000.0));
    }

    #[test]
    fn test_feed_preserves_date_key_order() {
        // Keys deliberately out of calendar order.
        let json = r#"{
            "element_count": 2,
            "near_earth_objects": {
                "2024-01-03": [{ "id": "1", "name": "A" }],
                "2024-01-01": [{ "id": "2", "name": "B" }]
            }
        }"#;
        let feed: Feed = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = feed.objects_by_date.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-03", "2024-01-01"]);
        assert_eq!(feed.total_objects(), 2);
    }

    #[test]
    fn test_empty_body_is_an_empty_feed() {
        let feed: Feed = serde_json::from_str("{}").unwrap();
        assert_eq!(feed.element_count, 0);
        assert!(feed.objects_by_date.is_empty());
    }

    #[test]
    fn test_first_approach_accessors_ignore_later_entries() {
        let json = r#"{
            "id": "3542519",
            "neo_reference_id": "3542519",
            "name": "(2010 PK9)",
            "close_approach_data": [
                { "miss_distance": { "kilometers": "100" } },
                { "relative_velocity": { "kilometers_per_hour": "99999" },
                  "miss_distance": { "kilometers": "1" } }
            ]
        }"#;
        let object: NearEarthObject = serde_json::from_str(json).unwrap();
        // First entry has no velocity, so the object reports none at all.
        assert_eq!(object.first_approach_velocity_kmh(), None);
        assert_eq!(object.first_approach_distance_km(), Some(100.0));
    }
}
