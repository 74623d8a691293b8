use anyhow::{Context, Result};
use clap::ValueEnum;
use client_core::DashboardClient;
use serde_json::Value;

/// Read-only aggregate endpoints printable with `dashboard get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Endpoint {
    Dashboard,
    QualityReports,
    QualitySummary,
    QualityAnalysis,
    ImprovementGuide,
    ResolutionStats,
    CategoryStats,
    BasicStatistics,
    AdvancedStatistics,
    DetailedIssues,
    CaptionAnalysis,
    CaptionSamples,
    CaptionRecommendations,
    CaptionDemo,
    PreprocessingJobs,
    PreprocessingStatus,
    ConversionProgress,
    ModelAnalysis,
    TrainingConfig,
    InferenceResults,
    InferenceStatus,
}

const CAPTION_SAMPLE_COUNT: u32 = 5;

pub async fn fetch(client: &DashboardClient, endpoint: Endpoint) -> Result<Value> {
    let value = match endpoint {
        Endpoint::Dashboard => serde_json::to_value(client.dashboard_stats().await?)
            .context("failed to re-encode dashboard stats")?,
        Endpoint::QualityReports => client.quality_reports().await?,
        Endpoint::QualitySummary => client.quality_summary().await?,
        Endpoint::QualityAnalysis => client.quality_analysis().await?,
        Endpoint::ImprovementGuide => client.improvement_guide().await?,
        Endpoint::ResolutionStats => client.resolution_stats().await?,
        Endpoint::CategoryStats => client.category_stats().await?,
        Endpoint::BasicStatistics => client.basic_statistics().await?,
        Endpoint::AdvancedStatistics => client.advanced_statistics().await?,
        Endpoint::DetailedIssues => client.detailed_issues().await?,
        Endpoint::CaptionAnalysis => client.caption_quality_analysis().await?,
        Endpoint::CaptionSamples => client.caption_samples(CAPTION_SAMPLE_COUNT).await?,
        Endpoint::CaptionRecommendations => client.caption_recommendations().await?,
        Endpoint::CaptionDemo => client.caption_improvement_demo().await?,
        Endpoint::PreprocessingJobs => client.preprocessing_jobs().await?,
        Endpoint::PreprocessingStatus => client.preprocessing_status().await?,
        Endpoint::ConversionProgress => client.conversion_progress().await?,
        Endpoint::ModelAnalysis => client.model_analysis().await?,
        Endpoint::TrainingConfig => client.training_config().await?,
        Endpoint::InferenceResults => client.inference_results().await?,
        Endpoint::InferenceStatus => client.inference_status().await?,
    };
    Ok(value)
}
