use crate::domain::model::{LocationRecord, LocationsResponse};
use crate::domain::ports::{CaseDataSource, ConfigProvider};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://coronavirus-tracker-api.herokuapp.com";
pub const DEFAULT_DATA_SOURCE: &str = "jhu";

/// Client for the coronavirus-tracker `/v2/locations` API.
#[derive(Debug, Clone)]
pub struct TrackerApiClient {
    client: Client,
    endpoint: String,
    data_source: String,
}

impl TrackerApiClient {
    pub fn new(endpoint: impl Into<String>, data_source: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            data_source: data_source.into(),
        }
    }

    /// Without a timeout the reqwest defaults apply.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        data_source: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            data_source: data_source.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(
            config.api_endpoint(),
            config.data_source(),
            config.request_timeout(),
        )
    }

    fn locations_url(&self) -> String {
        format!("{}/v2/locations", self.endpoint.trim_end_matches('/'))
    }

    /// With `country_code` set, a 404 means the service knows no location for that code.
    async fn fetch_locations(
        &self,
        params: &[(&str, &str)],
        country_code: Option<&str>,
    ) -> Result<Vec<LocationRecord>> {
        let url = self.locations_url();
        tracing::debug!("Making API request to: {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("source", self.data_source.as_str())])
            .query(params)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        if let Some(country_code) = country_code {
            if response.status() == StatusCode::NOT_FOUND {
                return Err(DashError::NotFound {
                    country_code: country_code.to_string(),
                });
            }
        }

        let body: LocationsResponse = response.error_for_status()?.json().await?;
        tracing::debug!("Received {} locations", body.locations.len());
        Ok(body.locations)
    }
}

#[async_trait]
impl CaseDataSource for TrackerApiClient {
    async fn locations(&self) -> Result<Vec<LocationRecord>> {
        self.fetch_locations(&[("timelines", "false")], None).await
    }

    async fn locations_by_country_code(&self, country_code: &str) -> Result<Vec<LocationRecord>> {
        self.fetch_locations(
            &[("country_code", country_code), ("timelines", "true")],
            Some(country_code),
        )
        .await
    }
}
