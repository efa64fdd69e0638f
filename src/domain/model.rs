use crate::utils::error::{DashError, Result};
use serde::{Deserialize, Serialize};

/// Body of `/v2/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationRecord>,
}

/// One location exactly as the statistics service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub latest: Option<LatestCounts>,
    #[serde(default)]
    pub timelines: Option<LocationTimelines>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestCounts {
    pub confirmed: u64,
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationTimelines {
    pub confirmed: TimelineSeries,
    pub deaths: TimelineSeries,
}

/// A date-keyed series of cumulative counts. Keys keep the order the service sent them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSeries {
    #[serde(default)]
    pub latest: Option<u64>,
    pub timeline: serde_json::Map<String, serde_json::Value>,
}

impl TimelineSeries {
    pub fn count_at(&self, date: &str) -> Option<Result<u64>> {
        self.timeline.get(date).map(|value| {
            value.as_u64().ok_or_else(|| {
                DashError::data_source(format!(
                    "timeline value for {} is not a non-negative integer: {}",
                    date, value
                ))
            })
        })
    }
}

impl LocationRecord {
    /// Human readable identity used in error messages.
    pub fn describe(&self) -> String {
        match (&self.id, &self.province) {
            (Some(id), Some(province)) if !province.is_empty() => {
                format!("location {} ({}, {})", id, province, self.country)
            }
            (Some(id), _) => format!("location {} ({})", id, self.country),
            (None, _) => format!("location in {}", self.country),
        }
    }
}

/// A location reduced to the fields the aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
}

impl TryFrom<LocationRecord> for Location {
    type Error = DashError;

    fn try_from(record: LocationRecord) -> Result<Self> {
        let latest = record.latest.ok_or_else(|| {
            DashError::data_source(format!("{} has no latest counts", record.describe()))
        })?;

        Ok(Location {
            country: record.country,
            confirmed: latest.confirmed,
            deaths: latest.deaths,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub confirmed: u64,
    pub deaths: u64,
}

/// Everything the export pipeline pulled from the service.
#[derive(Debug, Clone)]
pub struct ExportData {
    pub summaries: Vec<CountrySummary>,
    pub timeline: Option<CountryTimeline>,
}

#[derive(Debug, Clone)]
pub struct CountryTimeline {
    pub country_code: String,
    pub points: Vec<TimelinePoint>,
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub name: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
    pub summary_rows: usize,
}
