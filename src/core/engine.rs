use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting export...");

        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} country summaries{}",
            data.summaries.len(),
            match &data.timeline {
                Some(timeline) => format!(
                    " and {} timeline points for {}",
                    timeline.points.len(),
                    timeline.country_code
                ),
                None => String::new(),
            }
        );

        let bundle = self.pipeline.transform(data).await?;
        tracing::info!(
            "Prepared {} files ({} summary rows)",
            bundle.files.len(),
            bundle.summary_rows
        );

        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
