use serde::{Deserialize, Serialize};

use crate::domain::Sample;

/// Rows per page requested by the sample browser.
pub const SAMPLE_PAGE_SIZE: u32 = 20;

/// Category filters offered by the dashboard, in display order. `None` is "all".
pub const CATEGORY_PRESETS: [&str; 5] = ["뉴스", "드라마", "예능", "다큐멘터리", "스포츠"];

/// Offset pagination query for `GET /api/validation/samples`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub skip: u64,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SampleQuery {
    /// Query for zero-based `page` with `limit` rows; blank categories mean "all".
    pub fn for_page(page: u32, limit: u32, category: Option<&str>) -> Self {
        Self {
            skip: u64::from(page) * u64::from(limit),
            limit,
            category: category
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplesPage {
    pub samples: Vec<Sample>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned: Option<u64>,
}

impl SamplesPage {
    pub fn new(samples: Vec<Sample>, total: u64) -> Self {
        Self {
            samples,
            total,
            skip: None,
            limit: None,
            returned: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Markdown source of the data quality validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_samples: u64,
    pub total_images: u64,
    pub total_videos: u64,
    pub samples_with_issues: u64,
    pub issue_rate: f64,
    pub avg_quality_score: f64,
    #[serde(default)]
    pub preprocessing_progress: Option<f64>,
    #[serde(default)]
    pub training_status: Option<String>,
}

/// Query for the page-numbered `GET /api/data/samples` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSamplesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
