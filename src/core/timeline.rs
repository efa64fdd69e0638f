use crate::domain::model::{LocationTimelines, TimelinePoint};
use crate::domain::ports::CaseDataSource;
use crate::utils::error::{DashError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TimelineOrder {
    /// Keep the order the service sent the dates in.
    #[default]
    Source,
    /// Sort by the parsed date.
    ByDate,
}

pub struct TimelineFetcher<D: CaseDataSource> {
    source: D,
    order: TimelineOrder,
}

impl<D: CaseDataSource> TimelineFetcher<D> {
    pub fn new(source: D) -> Self {
        Self::with_order(source, TimelineOrder::default())
    }

    pub fn with_order(source: D, order: TimelineOrder) -> Self {
        Self { source, order }
    }

    /// Daily cumulative counts for one country code, passed to the service as given.
    ///
    /// When the code matches several locations the first one is used.
    pub async fn fetch_timeline(&self, country_code: &str) -> Result<Vec<TimelinePoint>> {
        let records = self.source.locations_by_country_code(country_code).await?;
        let location = records
            .into_iter()
            .next()
            .ok_or_else(|| DashError::NotFound {
                country_code: country_code.to_string(),
            })?;

        let timelines = location.timelines.as_ref().ok_or_else(|| {
            DashError::data_source(format!("{} has no timelines", location.describe()))
        })?;

        let points = assemble_timeline(timelines)?;
        match self.order {
            TimelineOrder::Source => Ok(points),
            TimelineOrder::ByDate => sort_by_date(points),
        }
    }
}

/// Pairs each confirmed date with the deaths count for the same date.
pub fn assemble_timeline(timelines: &LocationTimelines) -> Result<Vec<TimelinePoint>> {
    let confirmed = &timelines.confirmed;
    let deaths = &timelines.deaths;

    confirmed
        .timeline
        .keys()
        .map(|date| -> Result<TimelinePoint> {
            let confirmed_count = confirmed
                .count_at(date)
                .ok_or_else(|| DashError::data_source(format!("missing confirmed count for {}", date)))??;
            let deaths_count = deaths.count_at(date).ok_or_else(|| {
                DashError::data_source(format!(
                    "date {} is in the confirmed timeline but not in the deaths timeline",
                    date
                ))
            })??;

            Ok(TimelinePoint {
                date: date.clone(),
                confirmed: confirmed_count,
                deaths: deaths_count,
            })
        })
        .collect()
}

fn parse_date(date: &str) -> Result<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date) {
        return Ok(timestamp.naive_utc());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|day| day.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| DashError::data_source(format!("unparseable timeline date '{}': {}", date, e)))
}

fn sort_by_date(points: Vec<TimelinePoint>) -> Result<Vec<TimelinePoint>> {
    let mut keyed = points
        .into_iter()
        .map(|point| -> Result<(NaiveDateTime, TimelinePoint)> {
            Ok((parse_date(&point.date)?, point))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|(date, _)| *date);
    Ok(keyed.into_iter().map(|(_, point)| point).collect())
}
