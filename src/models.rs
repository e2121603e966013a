use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Desirability assumed for a branch or college when the dataset leaves it blank.
pub const DEFAULT_WEIGHT: f64 = 70.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Data source configuration
    pub data_source_mode: DataSourceMode,
    pub dataset_path: Option<String>,
    pub dataset_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    // Weights used when a row carries no curated value
    #[serde(default = "default_weight")]
    pub default_branch_weight: f64,
    #[serde(default = "default_weight")]
    pub default_college_weight: f64,
    pub output_directory: Option<String>,
    pub result_limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceMode {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "internet")]
    Internet,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source_mode: DataSourceMode::Local,
            dataset_path: Some("data-source/cutoffs.csv".to_string()),
            dataset_url: Some("https://example.com/cutoffs.csv".to_string()),
            request_timeout_secs: default_timeout_secs(),
            default_branch_weight: DEFAULT_WEIGHT,
            default_college_weight: DEFAULT_WEIGHT,
            output_directory: Some("output".to_string()),
            result_limit: Some(25),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }

    pub fn record_defaults(&self) -> RecordDefaults {
        RecordDefaults {
            branch_weight: self.default_branch_weight,
            college_weight: self.default_college_weight,
        }
    }
}

/// Values substituted for missing curated columns while loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDefaults {
    pub branch_weight: f64,
    pub college_weight: f64,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            branch_weight: DEFAULT_WEIGHT,
            college_weight: DEFAULT_WEIGHT,
        }
    }
}

/// Admission channel of a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quota {
    AllIndia,
    HomeState,
    OtherState,
    Other(String),
}

impl Quota {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_uppercase().as_str() {
            "AI" => Quota::AllIndia,
            "HS" => Quota::HomeState,
            "OS" => Quota::OtherState,
            _ => Quota::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Quota::AllIndia => "AI",
            Quota::HomeState => "HS",
            Quota::OtherState => "OS",
            Quota::Other(label) => label,
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Quota {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of the cutoff dataset exactly as it arrives, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCutoffRow {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub nirf_number: Option<String>,
    pub fees: Option<String>,
    #[serde(rename = "avgSalary")]
    pub avg_salary: Option<String>,
    pub course: Option<String>,
    pub branch: Option<String>,
    pub quota: Option<String>,
    #[serde(rename = "seatType")]
    pub seat_type: Option<String>,
    #[serde(rename = "subCategory")]
    pub sub_category: Option<String>,
    #[serde(rename = "examType")]
    pub exam_type: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "closingRank")]
    pub closing_rank: Option<String>,
    pub round: Option<String>,
    pub branch_weight: Option<String>,
    pub weight: Option<String>,
}

/// A validated historical cutoff. Never mutated after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoffRecord {
    pub college_slug: String,
    pub college_name: String,
    pub state: String,
    pub nirf_rank: String,
    pub fees: String,
    pub avg_salary: String,
    pub course: String,
    pub branch: String,
    pub quota: Quota,
    pub seat_type: String,
    pub sub_category: String,
    pub exam_type: String,
    pub year: i32,
    pub round: String,
    pub round_ordinal: u32,
    pub closing_rank: f64,
    pub branch_weight: f64,
    pub college_weight: f64,
}

/// What the candidate tells us about themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionQuery {
    pub exam_type: String,
    pub rank: u32,
    pub seat_type: String,
    pub sub_category: String,
    pub home_state: String,
}

impl PredictionQuery {
    pub fn new(
        exam_type: impl Into<String>,
        rank: u32,
        seat_type: impl Into<String>,
        sub_category: impl Into<String>,
        home_state: impl Into<String>,
    ) -> Self {
        Self {
            exam_type: exam_type.into(),
            rank,
            seat_type: seat_type.into(),
            sub_category: sub_category.into(),
            home_state: home_state.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub college_slug: String,
    pub college_name: String,
    pub state: String,
    pub nirf_rank: String,
    pub fees: String,
    pub avg_salary: String,
    pub course: String,
    pub branch: String,
    pub quota: Quota,
    pub seat_type: String,
    pub sub_category: String,
    pub branch_weight: f64,
    pub college_weight: f64,
    pub rank_score: f64,
    pub final_score: f64,
    pub all_rounds_cutoff: String,
    // Representative round the scores were computed from
    pub round: String,
    pub year: i32,
    pub closing_rank: f64,
}

/// Trimmed, case-insensitive equality used for every categorical match.
pub fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
