use crate::domain::model::{CountrySummary, Location};
use crate::domain::ports::CaseDataSource;
use crate::utils::error::{DashError, Result};
use std::collections::HashMap;

/// Builds the per-country ranking shown by the bar, scatter and table views.
pub struct LocationAggregator<D: CaseDataSource> {
    source: D,
}

impl<D: CaseDataSource> LocationAggregator<D> {
    pub fn new(source: D) -> Self {
        Self { source }
    }

    /// Fetches every location and returns one summary per country, largest first.
    ///
    /// A location without latest counts fails the whole call; nothing is default-filled.
    pub async fn fetch_country_summaries(&self) -> Result<Vec<CountrySummary>> {
        let records = self.source.locations().await?;
        let locations = records
            .into_iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>>>()?;

        aggregate_by_country(locations)
    }
}

/// Sums counts per exact country name, then sorts by confirmed descending.
///
/// Equal totals keep the order in which their country first appeared. A sum that
/// does not fit in a `u64` is a data source error.
pub fn aggregate_by_country(locations: Vec<Location>) -> Result<Vec<CountrySummary>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<CountrySummary> = Vec::new();

    for location in locations {
        match positions.get(&location.country) {
            Some(&position) => {
                let summary = &mut summaries[position];
                summary.confirmed = checked_sum(
                    &summary.country,
                    "confirmed",
                    summary.confirmed,
                    location.confirmed,
                )?;
                summary.deaths =
                    checked_sum(&summary.country, "deaths", summary.deaths, location.deaths)?;
            }
            None => {
                positions.insert(location.country.clone(), summaries.len());
                summaries.push(CountrySummary {
                    country: location.country,
                    confirmed: location.confirmed,
                    deaths: location.deaths,
                });
            }
        }
    }

    summaries.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
    Ok(summaries)
}

fn checked_sum(country: &str, field: &str, total: u64, count: u64) -> Result<u64> {
    total.checked_add(count).ok_or_else(|| {
        DashError::data_source(format!("{} {} total overflows", country, field))
    })
}
