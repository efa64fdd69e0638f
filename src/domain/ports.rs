use crate::domain::model::{ExportBundle, ExportData, LocationRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// The remote statistics service.
#[async_trait]
pub trait CaseDataSource: Send + Sync {
    /// All locations with their latest cumulative counts.
    async fn locations(&self) -> Result<Vec<LocationRecord>>;

    /// Locations matching a country code, including date-keyed timelines.
    async fn locations_by_country_code(&self, country_code: &str) -> Result<Vec<LocationRecord>>;
}

#[async_trait]
impl<D: CaseDataSource + ?Sized> CaseDataSource for Arc<D> {
    async fn locations(&self) -> Result<Vec<LocationRecord>> {
        (**self).locations().await
    }

    async fn locations_by_country_code(&self, country_code: &str) -> Result<Vec<LocationRecord>> {
        (**self).locations_by_country_code(country_code).await
    }
}

/// Destination for finished export archives.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn data_source(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExportData>;
    async fn transform(&self, data: ExportData) -> Result<ExportBundle>;
    async fn load(&self, bundle: ExportBundle) -> Result<String>;
}
