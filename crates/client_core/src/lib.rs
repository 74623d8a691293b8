//! Typed read-only client for the caption dataset dashboard backend.
//!
//! Each method issues exactly one `GET` against the configured base url and hands back
//! the decoded body as-is. There is no retry, caching, or request coalescing here;
//! callers decide what to do with a [`ClientError`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::ClipId,
    protocol::{DashboardStats, DataSamplesQuery, SampleQuery, SamplesPage, ValidationReport},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, DecodeError, TransportError};

pub const SAMPLES_PATH: &str = "api/validation/samples";
const QUALITY_ANALYSIS_PATH: &str = "api/validation/quality-analysis";
const IMPROVEMENT_GUIDE_PATH: &str = "api/validation/improvement-guide";
const DASHBOARD_PATH: &str = "api/statistics/dashboard";
const RESOLUTION_STATS_PATH: &str = "api/statistics/resolution";
const CATEGORY_STATS_PATH: &str = "api/statistics/category";
const BASIC_STATISTICS_PATH: &str = "api/statistics/basic";
const ADVANCED_STATISTICS_PATH: &str = "api/statistics/advanced";
const DETAILED_ISSUES_PATH: &str = "api/statistics/issues/detailed";
const SAMPLE_DETAIL_PATH: &str = "api/statistics/sample";
const MEDIA_PATH: &str = "api/statistics/media";
const ORIGINAL_MEDIA_PATH: &str = "api/statistics/media/original";
const VALIDATION_REPORT_PATH: &str = "api/statistics/validation-report";
const DATA_SAMPLES_PATH: &str = "api/data/samples";
const PREPROCESSING_JOBS_PATH: &str = "api/preprocessing/jobs";
const PREPROCESSING_STATUS_PATH: &str = "api/preprocessing/status";
const CONVERSION_PROGRESS_PATH: &str = "api/preprocessing/conversion-progress";
const QUALITY_REPORTS_PATH: &str = "api/quality/reports";
const QUALITY_SUMMARY_PATH: &str = "api/quality/summary";
const CAPTION_ANALYSIS_PATH: &str = "api/caption-quality/analysis";
const CAPTION_SAMPLES_PATH: &str = "api/caption-quality/samples";
const CAPTION_RECOMMENDATIONS_PATH: &str = "api/caption-quality/recommendations";
const CAPTION_IMPROVEMENT_DEMO_PATH: &str = "api/caption-improvement/demo";
const MODEL_ANALYSIS_PATH: &str = "api/model/analysis";
const TRAINING_CONFIG_PATH: &str = "api/model/training-config";
const INFERENCE_RESULTS_PATH: &str = "api/inference/results";
const INFERENCE_STATUS_PATH: &str = "api/inference/status";

/// Source of sample pages for the browser controller.
#[async_trait]
pub trait SampleSource: Send + Sync {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SamplesPage, ClientError>;
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    config: ClientConfig,
}

impl DashboardClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .default_headers(config.default_headers.clone())
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// One page of validation samples. A blank category is not sent.
    pub async fn samples(&self, query: &SampleQuery) -> Result<SamplesPage, ClientError> {
        let query = SampleQuery {
            category: query
                .category
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
            ..query.clone()
        };
        self.get_json(self.http.get(self.endpoint(SAMPLES_PATH, None)).query(&query))
            .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.get_path(DASHBOARD_PATH).await
    }

    pub async fn data_samples(&self, query: &DataSamplesQuery) -> Result<Value, ClientError> {
        self.get_json(
            self.http
                .get(self.endpoint(DATA_SAMPLES_PATH, None))
                .query(query),
        )
        .await
    }

    pub async fn preprocessing_jobs(&self) -> Result<Value, ClientError> {
        self.get_path(PREPROCESSING_JOBS_PATH).await
    }

    pub async fn preprocessing_status(&self) -> Result<Value, ClientError> {
        self.get_path(PREPROCESSING_STATUS_PATH).await
    }

    pub async fn conversion_progress(&self) -> Result<Value, ClientError> {
        self.get_path(CONVERSION_PROGRESS_PATH).await
    }

    pub async fn quality_reports(&self) -> Result<Value, ClientError> {
        self.get_path(QUALITY_REPORTS_PATH).await
    }

    pub async fn quality_summary(&self) -> Result<Value, ClientError> {
        self.get_path(QUALITY_SUMMARY_PATH).await
    }

    pub async fn resolution_stats(&self) -> Result<Value, ClientError> {
        self.get_path(RESOLUTION_STATS_PATH).await
    }

    pub async fn category_stats(&self) -> Result<Value, ClientError> {
        self.get_path(CATEGORY_STATS_PATH).await
    }

    pub async fn quality_analysis(&self) -> Result<Value, ClientError> {
        self.get_path(QUALITY_ANALYSIS_PATH).await
    }

    pub async fn improvement_guide(&self) -> Result<Value, ClientError> {
        self.get_path(IMPROVEMENT_GUIDE_PATH).await
    }

    pub async fn caption_quality_analysis(&self) -> Result<Value, ClientError> {
        self.get_path(CAPTION_ANALYSIS_PATH).await
    }

    pub async fn caption_samples(&self, count: u32) -> Result<Value, ClientError> {
        self.get_json(
            self.http
                .get(self.endpoint(CAPTION_SAMPLES_PATH, None))
                .query(&[("count", count)]),
        )
        .await
    }

    pub async fn caption_recommendations(&self) -> Result<Value, ClientError> {
        self.get_path(CAPTION_RECOMMENDATIONS_PATH).await
    }

    pub async fn caption_improvement_demo(&self) -> Result<Value, ClientError> {
        self.get_path(CAPTION_IMPROVEMENT_DEMO_PATH).await
    }

    pub async fn basic_statistics(&self) -> Result<Value, ClientError> {
        self.get_path(BASIC_STATISTICS_PATH).await
    }

    pub async fn advanced_statistics(&self) -> Result<Value, ClientError> {
        self.get_path(ADVANCED_STATISTICS_PATH).await
    }

    pub async fn detailed_issues(&self) -> Result<Value, ClientError> {
        self.get_path(DETAILED_ISSUES_PATH).await
    }

    pub async fn sample_detail(&self, clip_id: &ClipId) -> Result<Value, ClientError> {
        self.get_json(
            self.http
                .get(self.endpoint(SAMPLE_DETAIL_PATH, Some(clip_id.as_str()))),
        )
        .await
    }

    pub async fn model_analysis(&self) -> Result<Value, ClientError> {
        self.get_path(MODEL_ANALYSIS_PATH).await
    }

    pub async fn training_config(&self) -> Result<Value, ClientError> {
        self.get_path(TRAINING_CONFIG_PATH).await
    }

    pub async fn inference_results(&self) -> Result<Value, ClientError> {
        self.get_path(INFERENCE_RESULTS_PATH).await
    }

    pub async fn inference_status(&self) -> Result<Value, ClientError> {
        self.get_path(INFERENCE_STATUS_PATH).await
    }

    pub async fn validation_report(&self) -> Result<ValidationReport, ClientError> {
        self.get_path(VALIDATION_REPORT_PATH).await
    }

    /// Url of the preview media for a clip. Does not touch the network.
    pub fn media_url(&self, clip_id: &ClipId) -> Url {
        self.endpoint(MEDIA_PATH, Some(clip_id.as_str()))
    }

    pub fn original_media_url(&self, clip_id: &ClipId) -> Url {
        self.endpoint(ORIGINAL_MEDIA_PATH, Some(clip_id.as_str()))
    }

    fn endpoint(&self, path: &str, id: Option<&str>) -> Url {
        let mut url = self.config.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn get_path<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.get_json(self.http.get(self.endpoint(path, None))).await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = request
            .build()
            .map_err(|err| TransportError::from_reqwest("<unbuilt request>", err))?;
        let endpoint = request.url().path().to_string();
        debug!(endpoint = %endpoint, query = request.url().query().unwrap_or(""), "GET");

        let response = self.http.execute(request).await.map_err(|err| {
            warn!(endpoint = %endpoint, "dashboard request failed: {err}");
            TransportError::from_reqwest(&endpoint, err)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = status.as_u16(), "dashboard returned error status");
            return Err(TransportError::from_status(&endpoint, status).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::from_reqwest(&endpoint, err))?;
        decode_body(&endpoint, &body)
    }
}

fn decode_body<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(endpoint = %endpoint, "dashboard response did not match schema: {err}");
        DecodeError {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl SampleSource for DashboardClient {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SamplesPage, ClientError> {
        self.samples(query).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
