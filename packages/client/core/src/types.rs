use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One row of tabular data as the backend serializes it (column -> cell).
pub type Row = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSummary {
    pub total_rows: u64,
    pub total_columns: u64,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub missing_values: HashMap<String, u64>,
    pub data_types: HashMap<String, String>,
}

impl DataSummary {
    /// Column names in a stable order: numeric columns first, then categorical,
    /// then anything only present in `data_types`. No name appears twice.
    pub fn columns(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut extra: Vec<&String> = self.data_types.keys().collect();
        extra.sort();

        for name in self
            .numeric_columns
            .iter()
            .chain(self.categorical_columns.iter())
            .chain(extra)
        {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        out
    }

    pub fn missing_for(&self, column: &str) -> u64 {
        self.missing_values.get(column).copied().unwrap_or(0)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub summary: DataSummary,
    #[serde(default)]
    pub sample_data: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// A row of the column overview table shown after upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOverview {
    pub column: String,
    pub data_type: String,
    pub missing: u64,
}

impl UploadResponse {
    pub const PREVIEW_ROWS: usize = 5;

    /// One entry per column of `data_types`, sorted by name.
    pub fn column_overview(&self) -> Vec<ColumnOverview> {
        let mut names: Vec<&String> = self.summary.data_types.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| ColumnOverview {
                column: name.clone(),
                data_type: self.summary.data_types[name].clone(),
                missing: self.summary.missing_for(name),
            })
            .collect()
    }

    pub fn preview(&self) -> &[Row] {
        let end = self.sample_data.len().min(Self::PREVIEW_ROWS);
        &self.sample_data[..end]
    }

    /// Columns to offer in the configuration step. Falls back to the summary
    /// when the backend omits the explicit column list.
    pub fn column_names(&self) -> Vec<String> {
        if self.columns.is_empty() {
            return self.summary.columns();
        }
        let mut out: Vec<String> = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Processing configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AugmentationMethod {
    Smote,
    GaussianCopula,
    BayesianNetwork,
}

impl AugmentationMethod {
    pub const ALL: [AugmentationMethod; 3] = [
        AugmentationMethod::Smote,
        AugmentationMethod::GaussianCopula,
        AugmentationMethod::BayesianNetwork,
    ];
}

impl fmt::Display for AugmentationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AugmentationMethod::Smote => "SMOTE",
            AugmentationMethod::GaussianCopula => "Gaussian Copula",
            AugmentationMethod::BayesianNetwork => "Bayesian Network",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    #[default]
    Mean,
    Median,
    Mode,
    Drop,
    Interpolate,
}

impl MissingStrategy {
    pub const ALL: [MissingStrategy; 5] = [
        MissingStrategy::Mean,
        MissingStrategy::Median,
        MissingStrategy::Mode,
        MissingStrategy::Drop,
        MissingStrategy::Interpolate,
    ];
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingStrategy::Mean => "Mean",
            MissingStrategy::Median => "Median",
            MissingStrategy::Mode => "Mode",
            MissingStrategy::Drop => "Drop rows",
            MissingStrategy::Interpolate => "Interpolate",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierStrategy {
    #[default]
    None,
    Iqr,
    Zscore,
    IsolationForest,
}

impl OutlierStrategy {
    pub const ALL: [OutlierStrategy; 4] = [
        OutlierStrategy::None,
        OutlierStrategy::Iqr,
        OutlierStrategy::Zscore,
        OutlierStrategy::IsolationForest,
    ];
}

impl fmt::Display for OutlierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlierStrategy::None => "Keep outliers",
            OutlierStrategy::Iqr => "IQR",
            OutlierStrategy::Zscore => "Z-Score",
            OutlierStrategy::IsolationForest => "Isolation Forest",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Datetime,
    Text,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 4] = [
        ColumnKind::Numeric,
        ColumnKind::Categorical,
        ColumnKind::Datetime,
        ColumnKind::Text,
    ];
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::Categorical => "Categorical",
            ColumnKind::Datetime => "Datetime",
            ColumnKind::Text => "Text",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingStrategy {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "minority")]
    Minority,
    #[serde(rename = "not majority")]
    NotMajority,
    #[serde(rename = "all")]
    All,
}

impl SamplingStrategy {
    pub const ALL: [SamplingStrategy; 4] = [
        SamplingStrategy::Auto,
        SamplingStrategy::Minority,
        SamplingStrategy::NotMajority,
        SamplingStrategy::All,
    ];
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SamplingStrategy::Auto => "Auto",
            SamplingStrategy::Minority => "Minority class",
            SamplingStrategy::NotMajority => "All but majority",
            SamplingStrategy::All => "All classes",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    pub missing_strategy: MissingStrategy,
    pub outlier_strategy: OutlierStrategy,
    // BTreeMap keeps the serialized request stable across runs.
    pub column_types: BTreeMap<String, ColumnKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationConfig {
    pub method: AugmentationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_neighbors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_strategy: Option<SamplingStrategy>,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            method: AugmentationMethod::GaussianCopula,
            target_column: None,
            augmentation_ratio: Some(1.0),
            target_rows: None,
            k_neighbors: None,
            sampling_strategy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub preprocessing_config: PreprocessingConfig,
    pub augmentation_config: AugmentationConfig,
}

impl ProcessingConfig {
    /// Whether the augmentation fields are consistent with the chosen method.
    ///
    /// SMOTE needs its target column, neighbour count and sampling strategy and
    /// must not carry an amount; every other method needs exactly one of ratio
    /// or target rows and none of the SMOTE fields.
    pub fn is_complete(&self) -> bool {
        let aug = &self.augmentation_config;
        let smote_fields = [
            aug.target_column.is_some(),
            aug.k_neighbors.is_some(),
            aug.sampling_strategy.is_some(),
        ];
        let amount_fields = [aug.augmentation_ratio.is_some(), aug.target_rows.is_some()];

        match aug.method {
            AugmentationMethod::Smote => {
                smote_fields.iter().all(|f| *f)
                    && amount_fields.iter().all(|f| !f)
                    && aug.target_column.as_deref().is_some_and(|c| !c.is_empty())
            }
            _ => {
                smote_fields.iter().all(|f| !f)
                    && amount_fields.iter().filter(|f| **f).count() == 1
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Processing results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResponse {
    pub success: bool,
    pub message: String,
    pub original_rows: u64,
    pub augmented_rows: u64,
    pub increase_ratio: f64,
    pub processing_time: f64,
    #[serde(default)]
    pub summary: Option<DataSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPage {
    pub data: Vec<Row>,
    pub total_rows: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl ProcessedPage {
    pub const DEFAULT_PAGE_SIZE: u32 = 100;
    pub const PAGE_SIZES: [u32; 4] = [10, 50, 100, 500];

    /// Column headers taken from the first row.
    pub fn headers(&self) -> Vec<String> {
        self.data
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// 1-based inclusive range of rows on this page, if any.
    pub fn row_range(&self) -> Option<(u64, u64)> {
        if self.data.is_empty() {
            return None;
        }
        let start = u64::from(self.page) * u64::from(self.page_size) + 1;
        Some((start, start + self.data.len() as u64 - 1))
    }
}

/// Per-column descriptive statistics: column -> (stat name -> value).
pub type ColumnStatistics = BTreeMap<String, BTreeMap<String, Option<f64>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub original_rows: u64,
    pub augmented_rows: u64,
    pub increase_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub original_statistics: ColumnStatistics,
    #[serde(default)]
    pub augmented_statistics: ColumnStatistics,
    pub comparison: Comparison,
}

/// A single before/after line of the statistics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StatComparison {
    pub column: String,
    pub stat: String,
    pub original: Option<f64>,
    pub augmented: Option<f64>,
}

impl Statistics {
    pub const SHOWN_STATS: [&'static str; 4] = ["mean", "std", "min", "max"];

    /// Rows for every column present in either side, limited to the stats
    /// the results panel shows.
    pub fn comparisons(&self) -> Vec<StatComparison> {
        let mut columns: Vec<&String> = self
            .original_statistics
            .keys()
            .chain(self.augmented_statistics.keys())
            .collect();
        columns.sort();
        columns.dedup();

        let lookup = |side: &ColumnStatistics, column: &str, stat: &str| {
            side.get(column).and_then(|s| s.get(stat)).copied().flatten()
        };

        let mut out = Vec::new();
        for column in columns {
            for stat in Self::SHOWN_STATS {
                let original = lookup(&self.original_statistics, column, stat);
                let augmented = lookup(&self.augmented_statistics, column, stat);
                if original.is_none() && augmented.is_none() {
                    continue;
                }
                out.push(StatComparison {
                    column: column.clone(),
                    stat: stat.to_string(),
                    original,
                    augmented,
                });
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Distribution,
    Correlation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationRequest {
    pub column_name: String,
    pub chart_type: ChartType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(default = "default_true")]
    pub success: bool,
    pub chart_data: serde_json::Value,
    pub column_name: String,
    pub chart_type: ChartType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "cp949")]
    Cp949,
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
}

impl DownloadEncoding {
    pub const ALL: [DownloadEncoding; 3] = [
        DownloadEncoding::Utf8,
        DownloadEncoding::Cp949,
        DownloadEncoding::Utf8Bom,
    ];

    /// Value of the `encoding` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            DownloadEncoding::Utf8 => "utf-8",
            DownloadEncoding::Cp949 => "cp949",
            DownloadEncoding::Utf8Bom => "utf-8-bom",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DownloadEncoding::Utf8 => "augmented_data.csv",
            DownloadEncoding::Cp949 => "augmented_data_excel.csv",
            DownloadEncoding::Utf8Bom => "augmented_data_excel_utf8.csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadEncoding::Utf8 => "UTF-8",
            DownloadEncoding::Cp949 => "Excel (CP949)",
            DownloadEncoding::Utf8Bom => "Excel (UTF-8 BOM)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsInfo {
    pub all_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataInfo {
    /// (rows, columns)
    pub shape: (u64, u64),
    pub columns: Vec<String>,
    #[serde(default)]
    pub dtypes: HashMap<String, String>,
    #[serde(default)]
    pub sample_data: Vec<Row>,
    #[serde(default)]
    pub missing_values: HashMap<String, u64>,
    #[serde(default)]
    pub summary_stats: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisUpload {
    pub success: bool,
    #[serde(default)]
    pub data_info: Option<DataInfo>,
    #[serde(default)]
    pub suggested_queries: Vec<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the server still holds for the analysis chat from an earlier
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSnapshot {
    pub data_info: DataInfo,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "type")]
    pub chart_type: String,
    /// Serialized chart figure as produced by the backend.
    pub data: serde_json::Value,
}

impl ChartPayload {
    /// The backend sends the figure as a JSON string; accept either shape.
    pub fn figure(&self) -> Option<serde_json::Value> {
        match &self.data {
            serde_json::Value::String(raw) => serde_json::from_str(raw).ok(),
            serde_json::Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub chart_data: Option<ChartPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub chart: Option<ChartPayload>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            message: message.into(),
            timestamp: Utc::now(),
            chart: None,
        }
    }

    pub fn with_chart(mut self, chart: Option<ChartPayload>) -> Self {
        self.chart = chart;
        self
    }
}

/// A CSV file chosen by the user, described before any bytes are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: std::path::PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: Option<String>,
}
