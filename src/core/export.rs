use crate::core::aggregator::LocationAggregator;
use crate::core::timeline::{TimelineFetcher, TimelineOrder};
use crate::domain::model::{
    CountrySummary, CountryTimeline, ExportBundle, ExportData, ExportFile, TimelinePoint,
};
use crate::domain::ports::{CaseDataSource, Pipeline, Storage};
use crate::utils::error::{DashError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "covid_export.zip";

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub output_path: String,
    pub country_code: Option<String>,
    pub top_n: Option<usize>,
    pub order: TimelineOrder,
}

/// Writes the summary table, and optionally one country's timeline, into a zip archive.
pub struct ExportPipeline<S: Storage, D: CaseDataSource> {
    storage: S,
    aggregator: LocationAggregator<D>,
    timelines: TimelineFetcher<D>,
    options: ExportOptions,
}

impl<S: Storage, D: CaseDataSource + Clone> ExportPipeline<S, D> {
    pub fn new(storage: S, source: D, options: ExportOptions) -> Self {
        Self {
            storage,
            aggregator: LocationAggregator::new(source.clone()),
            timelines: TimelineFetcher::with_order(source, options.order),
            options,
        }
    }
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| DashError::IoError(e.into_error()))
}

/// Archive entry name for a timeline. The code goes to the service verbatim, but
/// anything other than ASCII letters and digits becomes `_` in the file name.
fn timeline_file_name(country_code: &str) -> String {
    let safe: String = country_code
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("timeline_{}.csv", safe)
}

#[async_trait::async_trait]
impl<S: Storage, D: CaseDataSource> Pipeline for ExportPipeline<S, D> {
    async fn extract(&self) -> Result<ExportData> {
        let summaries = self.aggregator.fetch_country_summaries().await?;

        let timeline = match &self.options.country_code {
            Some(country_code) => Some(CountryTimeline {
                country_code: country_code.clone(),
                points: self.timelines.fetch_timeline(country_code).await?,
            }),
            None => None,
        };

        Ok(ExportData {
            summaries,
            timeline,
        })
    }

    async fn transform(&self, data: ExportData) -> Result<ExportBundle> {
        let mut summaries: Vec<CountrySummary> = data.summaries;
        if let Some(top_n) = self.options.top_n {
            summaries.truncate(top_n);
        }

        let mut files = vec![
            ExportFile {
                name: "summaries.csv".to_string(),
                contents: to_csv(&summaries)?,
            },
            ExportFile {
                name: "summaries.json".to_string(),
                contents: serde_json::to_vec_pretty(&summaries)?,
            },
        ];

        if let Some(timeline) = data.timeline {
            let points: &[TimelinePoint] = &timeline.points;
            files.push(ExportFile {
                name: timeline_file_name(&timeline.country_code),
                contents: to_csv(points)?,
            });
        }

        Ok(ExportBundle {
            files,
            summary_rows: summaries.len(),
        })
    }

    async fn load(&self, bundle: ExportBundle) -> Result<String> {
        let output_path = format!("{}/{}", self.options.output_path, ARCHIVE_NAME);

        tracing::debug!("Creating ZIP file with {} files", bundle.files.len());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for file in &bundle.files {
                zip.start_file(file.name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(&file.contents)?;
            }
            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;

        Ok(output_path)
    }
}
